//! Routes physics overlap events to receiver hooks
//!
//! The router keeps no per-pair state. Whether two bodies are entering,
//! overlapping or leaving is decided by the physics host; each delivery is
//! handled on its own:
//!
//! ```text
//! NOT_OVERLAPPING ──Enter──► OVERLAPPING ──Active (every step)──► OVERLAPPING ──Exit──► NOT_OVERLAPPING
//! ```

use crate::body::SoundBody;
use crate::config::SoundSettings;
use crate::descriptor::Role;
use crate::error::SoundWarning;
use crate::events::{HookData, PairEventKind, Receiver};
use crate::geometry;
use crate::graph::SoundGraph;

/// Two bodies reported as overlapping by the physics host
pub type BodyPair<'a, B> = (&'a B, &'a B);

/// Summary of one event delivery
#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    /// Hooks called
    pub hooks_invoked: usize,
    /// Hooks skipped for lack of a chain node
    pub warnings: Vec<SoundWarning>,
}

impl DispatchReport {
    /// Fold another report into this one
    pub fn merge(&mut self, other: DispatchReport) {
        self.hooks_invoked += other.hooks_invoked;
        self.warnings.extend(other.warnings);
    }
}

/// Stateless dispatcher from body pairs to receiver hooks
#[derive(Debug, Clone)]
pub struct ProximityRouter {
    log_missing_nodes: bool,
}

impl ProximityRouter {
    /// Create a router
    pub fn new(settings: &SoundSettings) -> Self {
        Self {
            log_missing_nodes: settings.log_missing_nodes,
        }
    }

    /// Deliver one step's worth of pairs for an event kind.
    ///
    /// Pairs are handled in order; within a pair, `a → b` is routed before
    /// `b → a`.
    pub fn dispatch<B: SoundBody>(
        &self,
        graph: &SoundGraph,
        kind: PairEventKind,
        pairs: &[BodyPair<'_, B>],
    ) -> DispatchReport {
        let mut report = DispatchReport::default();
        for &(a, b) in pairs {
            self.route(graph, kind, a, b, &mut report);
            self.route(graph, kind, b, a, &mut report);
        }
        report
    }

    /// Route `source → receiver` if the roles line up
    fn route<B: SoundBody>(
        &self,
        graph: &SoundGraph,
        kind: PairEventKind,
        source: &B,
        receiver: &B,
        report: &mut DispatchReport,
    ) {
        let (Some(source_sound), Some(receiver_sound)) = (source.sound(), receiver.sound()) else {
            return;
        };
        if !source_sound.has_role(Role::Source) {
            return;
        }

        for role in [Role::Transform, Role::Destination] {
            if receiver_sound.has_role(role) {
                self.invoke(graph, kind, role, receiver, source, report);
            }
        }
    }

    fn invoke<B: SoundBody>(
        &self,
        graph: &SoundGraph,
        kind: PairEventKind,
        role: Role,
        receiver: &B,
        source: &B,
        report: &mut DispatchReport,
    ) {
        let Some(hook) = receiver.sound().and_then(|s| s.receiver_hook(role, kind)) else {
            return;
        };

        let Some(audio_node) = graph.node_for(source.id(), receiver.id()) else {
            let warning = SoundWarning::MissingAudioNode {
                source_body: source.id(),
                source_label: source.label().to_string(),
                receiver: receiver.id(),
                receiver_label: receiver.label().to_string(),
                role,
            };
            if self.log_missing_nodes {
                log::warn!("Skipping {}: {}", kind.hook_name(), warning);
            }
            report.warnings.push(warning);
            return;
        };

        let concentricity = if kind.measures_concentricity() {
            geometry::concentricity_between(
                source.position(),
                graph.radius_for(source),
                receiver.position(),
                graph.radius_for(receiver),
            )
        } else {
            0.0
        };

        let Some(receiver_ref) = Receiver::new(role, receiver) else {
            return;
        };

        let data = HookData {
            kind,
            concentricity,
            source,
            audio_node,
            receiver: receiver_ref,
        };

        log::trace!("{} {} -> {} ({:.3})", kind.hook_name(), source.id(), receiver.id(), concentricity);
        hook(&data);
        report.hooks_invoked += 1;
    }
}

impl Default for ProximityRouter {
    fn default() -> Self {
        Self::new(&SoundSettings::default())
    }
}

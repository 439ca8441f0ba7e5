//! Sound system: graph and router bound to a physics host

use crate::body::SoundBody;
use crate::config::SoundSettings;
use crate::error::SoundWarning;
use crate::events::PairEventKind;
use crate::graph::{RebuildReport, SoundGraph};
use crate::router::{BodyPair, DispatchReport, ProximityRouter};

/// Receiver of physics lifecycle notifications.
///
/// Hosts call [`on_bodies_changed`](Self::on_bodies_changed) after their
/// world is created and after every body addition or removal, and
/// [`on_pair_event`](Self::on_pair_event) once per event kind per step.
pub trait ProximityListener<B: SoundBody>: Send {
    /// The body collection changed; `bodies` is the full new collection
    fn on_bodies_changed(&mut self, bodies: &[B]);

    /// Pairs that entered, stayed in, or left overlap this step
    fn on_pair_event(&mut self, kind: PairEventKind, pairs: &[BodyPair<'_, B>]);
}

/// Owns the sound graph and routes proximity events through it
#[derive(Debug)]
pub struct SoundSystem {
    graph: SoundGraph,
    router: ProximityRouter,
    last_rebuild: RebuildReport,
    last_dispatch: DispatchReport,
}

impl SoundSystem {
    /// Create a sound system
    pub fn new(settings: SoundSettings) -> Self {
        Self {
            router: ProximityRouter::new(&settings),
            graph: SoundGraph::new(settings),
            last_rebuild: RebuildReport::default(),
            last_dispatch: DispatchReport::default(),
        }
    }

    /// Get the graph
    pub fn graph(&self) -> &SoundGraph {
        &self.graph
    }

    /// Get the graph mutably (radius cache control)
    pub fn graph_mut(&mut self) -> &mut SoundGraph {
        &mut self.graph
    }

    /// Get the settings
    pub fn settings(&self) -> &SoundSettings {
        self.graph.settings()
    }

    /// Rebuild every chain from `bodies`
    pub fn rebuild<B: SoundBody>(&mut self, bodies: &[B]) -> &RebuildReport {
        self.last_rebuild = self.graph.rebuild(bodies);
        &self.last_rebuild
    }

    /// Route one event kind's pairs.
    ///
    /// The stored report covers this call only; use
    /// [`dispatch_step`](Self::dispatch_step) to keep a whole step's report.
    pub fn dispatch<B: SoundBody>(&mut self, kind: PairEventKind, pairs: &[BodyPair<'_, B>]) -> &DispatchReport {
        self.last_dispatch = self.router.dispatch(&self.graph, kind, pairs);
        &self.last_dispatch
    }

    /// Route every phase of one physics step, in the order given, and store
    /// the merged report
    pub fn dispatch_step<B: SoundBody>(
        &mut self,
        phases: &[(PairEventKind, Vec<BodyPair<'_, B>>)],
    ) -> &DispatchReport {
        let mut report = DispatchReport::default();
        for (kind, pairs) in phases {
            report.merge(self.router.dispatch(&self.graph, *kind, pairs));
        }
        self.last_dispatch = report;
        &self.last_dispatch
    }

    /// Dispose every chain without rebuilding
    pub fn reset(&mut self) -> usize {
        self.graph.reset()
    }

    /// Report of the most recent rebuild
    pub fn last_rebuild(&self) -> &RebuildReport {
        &self.last_rebuild
    }

    /// Report of the most recent dispatch
    pub fn last_dispatch(&self) -> &DispatchReport {
        &self.last_dispatch
    }

    /// Warnings from the most recent rebuild and dispatch
    pub fn warnings(&self) -> impl Iterator<Item = &SoundWarning> {
        self.last_rebuild.warnings.iter().chain(self.last_dispatch.warnings.iter())
    }
}

impl Default for SoundSystem {
    fn default() -> Self {
        Self::new(SoundSettings::default())
    }
}

impl<B: SoundBody> ProximityListener<B> for SoundSystem {
    fn on_bodies_changed(&mut self, bodies: &[B]) {
        self.rebuild(bodies);
    }

    fn on_pair_event(&mut self, kind: PairEventKind, pairs: &[BodyPair<'_, B>]) {
        self.dispatch(kind, pairs);
    }
}

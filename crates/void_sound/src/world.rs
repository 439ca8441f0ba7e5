//! Minimal physics world driving the sound system
//!
//! [`SoundWorld`] stands in for a physics host: it owns the bodies, rebuilds
//! the sound graph whenever bodies are added or removed and forwards each
//! step's overlap pairs by id.

use crate::body::{Body, BodyId};
use crate::config::SoundSettings;
use crate::events::PairEventKind;
use crate::router::{BodyPair, DispatchReport};
use crate::system::{ProximityListener, SoundSystem};

/// Overlap pairs reported for one physics step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepEvents {
    /// Pairs that started overlapping
    pub enter: Vec<(BodyId, BodyId)>,
    /// Pairs still overlapping
    pub active: Vec<(BodyId, BodyId)>,
    /// Pairs that stopped overlapping
    pub exit: Vec<(BodyId, BodyId)>,
}

impl StepEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entering pair
    pub fn with_enter(mut self, a: BodyId, b: BodyId) -> Self {
        self.enter.push((a, b));
        self
    }

    /// Add a still-overlapping pair
    pub fn with_active(mut self, a: BodyId, b: BodyId) -> Self {
        self.active.push((a, b));
        self
    }

    /// Add a leaving pair
    pub fn with_exit(mut self, a: BodyId, b: BodyId) -> Self {
        self.exit.push((a, b));
        self
    }

    /// Pairs of one kind
    pub fn pairs(&self, kind: PairEventKind) -> &[(BodyId, BodyId)] {
        match kind {
            PairEventKind::Enter => &self.enter,
            PairEventKind::Active => &self.active,
            PairEventKind::Exit => &self.exit,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.enter.is_empty() && self.active.is_empty() && self.exit.is_empty()
    }

    pub fn clear(&mut self) {
        self.enter.clear();
        self.active.clear();
        self.exit.clear();
    }
}

/// Body container with a built-in sound system
pub struct SoundWorld {
    bodies: Vec<Body>,
    sound: SoundSystem,
    listeners: Vec<Box<dyn ProximityListener<Body>>>,
}

impl SoundWorld {
    /// Create an empty world; the sound graph starts out empty
    pub fn new(settings: SoundSettings) -> Self {
        let mut world = Self {
            bodies: Vec::new(),
            sound: SoundSystem::new(settings),
            listeners: Vec::new(),
        };
        world.notify_bodies_changed();
        world
    }

    /// Register an additional listener
    pub fn add_listener(&mut self, mut listener: Box<dyn ProximityListener<Body>>) {
        listener.on_bodies_changed(&self.bodies);
        self.listeners.push(listener);
    }

    /// Add a body, replacing any body with the same id
    pub fn add_body(&mut self, body: Body) -> BodyId {
        let id = body.id;
        self.insert(body);
        self.notify_bodies_changed();
        id
    }

    /// Add several bodies with a single rebuild
    pub fn add_bodies(&mut self, bodies: impl IntoIterator<Item = Body>) {
        for body in bodies {
            self.insert(body);
        }
        self.notify_bodies_changed();
    }

    fn insert(&mut self, body: Body) {
        match self.bodies.iter_mut().find(|b| b.id == body.id) {
            Some(existing) => {
                log::warn!("Replacing body {} ('{}')", body.id, existing.label);
                self.sound.graph_mut().clear_radius(body.id);
                *existing = body;
            }
            None => self.bodies.push(body),
        }
    }

    /// Remove a body, returning it if present
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        let index = self.bodies.iter().position(|b| b.id == id)?;
        let body = self.bodies.remove(index);
        self.notify_bodies_changed();
        Some(body)
    }

    /// Deliver one step's pairs: enter, then active, then exit.
    ///
    /// Pairs naming unknown bodies are skipped.
    pub fn step(&mut self, events: &StepEvents) -> DispatchReport {
        let phases: Vec<(PairEventKind, Vec<BodyPair<'_, Body>>)> = PairEventKind::ALL
            .into_iter()
            .filter(|kind| !events.pairs(*kind).is_empty())
            .map(|kind| (kind, resolve_pairs(&self.bodies, events.pairs(kind))))
            .collect();

        for (kind, pairs) in &phases {
            for listener in &mut self.listeners {
                listener.on_pair_event(*kind, pairs);
            }
        }
        self.sound.dispatch_step(&phases).clone()
    }

    fn notify_bodies_changed(&mut self) {
        self.sound.rebuild(&self.bodies);
        for listener in &mut self.listeners {
            listener.on_bodies_changed(&self.bodies);
        }
    }

    /// Get a body
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// Get a body mutably.
    ///
    /// Editing a body does not trigger a rebuild. Outline radii stay cached;
    /// explicit descriptor radii take effect immediately.
    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    /// All bodies, in insertion order
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Get the sound system
    pub fn sound(&self) -> &SoundSystem {
        &self.sound
    }

    /// Get the sound system mutably
    pub fn sound_mut(&mut self) -> &mut SoundSystem {
        &mut self.sound
    }
}

impl Default for SoundWorld {
    fn default() -> Self {
        Self::new(SoundSettings::default())
    }
}

impl std::fmt::Debug for SoundWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundWorld")
            .field("bodies", &self.bodies.len())
            .field("sound", &self.sound)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn resolve_pairs<'a>(bodies: &'a [Body], ids: &[(BodyId, BodyId)]) -> Vec<BodyPair<'a, Body>> {
    let find = |id: BodyId| bodies.iter().find(|b| b.id == id);
    ids.iter()
        .filter_map(|&(a, b)| match (find(a), find(b)) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => {
                log::debug!("Ignoring pair {} / {}: unknown body", a, b);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{DestinationEntry, FactorySlot, SoundDescriptor};
    use crate::test_util::{mock_factory, square_body, NodeLog};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use approx::assert_relative_eq;
    use void_math::{polygon, Vec2};

    struct CountingListener {
        rebuilds: Arc<AtomicU32>,
        pairs: Arc<AtomicU32>,
    }

    impl ProximityListener<Body> for CountingListener {
        fn on_bodies_changed(&mut self, _bodies: &[Body]) {
            self.rebuilds.fetch_add(1, Ordering::SeqCst);
        }

        fn on_pair_event(&mut self, _kind: PairEventKind, pairs: &[BodyPair<'_, Body>]) {
            self.pairs.fetch_add(pairs.len() as u32, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_add_and_remove_rebuild() {
        let log = NodeLog::default();
        let mut world = SoundWorld::default();

        world.add_body(square_body(1, "src", Vec2::ZERO, 1.0, SoundDescriptor::source(mock_factory("osc", &log))));
        assert_eq!(world.sound().graph().chain_count(), 0);

        world.add_body(square_body(
            2,
            "dst",
            Vec2::ZERO,
            1.0,
            SoundDescriptor::new().with_destination(DestinationEntry::new(mock_factory("out", &log))),
        ));
        assert_eq!(world.sound().graph().chain_count(), 1);

        let removed = world.remove_body(BodyId(2)).unwrap();
        assert_eq!(removed.label, "dst");
        assert_eq!(world.sound().graph().chain_count(), 0);
        assert_eq!(log.disposed(), vec!["osc#0".to_string(), "out#0".to_string()]);
        assert!(world.remove_body(BodyId(2)).is_none());
    }

    #[test]
    fn test_step_order_and_unknown_ids() {
        let log = NodeLog::default();
        let order = Arc::new(Mutex::new(Vec::new()));
        let (enter, update, leave) = (order.clone(), order.clone(), order.clone());

        let mut world = SoundWorld::default();
        world.add_bodies([
            square_body(1, "src", Vec2::ZERO, 1.0, SoundDescriptor::source(mock_factory("osc", &log))),
            square_body(
                2,
                "dst",
                Vec2::ZERO,
                1.0,
                SoundDescriptor::new().with_destination(
                    DestinationEntry::new(mock_factory("out", &log))
                        .on_enter_range(move |_| enter.lock().push("enter"))
                        .on_update_concentricity(move |_| update.lock().push("update"))
                        .on_leave_range(move |_| leave.lock().push("leave")),
                ),
            ),
        ]);

        // a single step carrying all three phases
        let events = StepEvents::new()
            .with_exit(BodyId(1), BodyId(2))
            .with_active(BodyId(1), BodyId(2))
            .with_enter(BodyId(2), BodyId(1))
            .with_enter(BodyId(1), BodyId(99));

        let report = world.step(&events);
        assert_eq!(report.hooks_invoked, 3);
        assert!(report.warnings.is_empty());
        assert_eq!(*order.lock(), vec!["enter", "update", "leave"]);
    }

    #[test]
    fn test_resolve_pairs_skips_unknown_ids() {
        let bodies = vec![Body::new(1, "a"), Body::new(2, "b")];
        let pairs = resolve_pairs(
            &bodies,
            &[(BodyId(1), BodyId(99)), (BodyId(2), BodyId(1)), (BodyId(42), BodyId(2))],
        );

        assert_eq!(pairs.len(), 1);
        assert_eq!((pairs[0].0.id, pairs[0].1.id), (BodyId(2), BodyId(1)));
    }

    #[test]
    fn test_step_report_covers_all_phases() {
        let log = NodeLog::default();
        let mut world = SoundWorld::new(SoundSettings::default().quiet());
        world.add_bodies([
            square_body(1, "src", Vec2::ZERO, 1.0, SoundDescriptor::source(mock_factory("osc", &log))),
            Body::new(2, "broken").with_sound(
                SoundDescriptor::new().with_destination(
                    DestinationEntry::new(FactorySlot::Missing)
                        .on_enter_range(|_| {})
                        .on_leave_range(|_| {}),
                ),
            ),
        ]);

        let report = world.step(
            &StepEvents::new()
                .with_enter(BodyId(1), BodyId(2))
                .with_exit(BodyId(1), BodyId(2)),
        );

        assert_eq!(report.warnings.len(), 2);
        assert_eq!(world.sound().last_dispatch().warnings.len(), 2);
    }

    fn speaker_with_radius(id: u64, radius: f32) -> Body {
        Body::new(id, "speaker").with_sound(SoundDescriptor::new().with_radius(radius).with_destination(
            DestinationEntry::new(mock_factory("out", &NodeLog::default())),
        ))
    }

    #[test]
    fn test_replaced_body_gets_its_own_radius() {
        let mut world = SoundWorld::default();
        world.add_body(speaker_with_radius(1, 5.0));
        assert_eq!(world.sound().graph().radius_of(BodyId(1)), Some(5.0));

        world.add_body(speaker_with_radius(1, 20.0));
        assert_eq!(world.sound().graph().radius_of(BodyId(1)), Some(20.0));

        // outline radii are recomputed for the replacement too
        world.add_body(
            Body::new(1, "box")
                .with_vertices(polygon::rectangle(Vec2::ZERO, 6.0, 8.0))
                .with_sound(SoundDescriptor::source(mock_factory("osc", &NodeLog::default()))),
        );
        assert_relative_eq!(world.sound().graph().radius_of(BodyId(1)).unwrap(), 5.0, epsilon = 1e-5);
        world.add_body(
            Body::new(1, "box")
                .with_vertices(polygon::rectangle(Vec2::ZERO, 12.0, 16.0))
                .with_sound(SoundDescriptor::source(mock_factory("osc", &NodeLog::default()))),
        );
        assert_relative_eq!(world.sound().graph().radius_of(BodyId(1)).unwrap(), 10.0, epsilon = 1e-5);
    }

    #[test]
    fn test_edited_explicit_radius_wins() {
        let mut world = SoundWorld::default();
        world.add_body(speaker_with_radius(1, 5.0));

        if let Some(sound) = world.body_mut(BodyId(1)).and_then(|b| b.sound.as_mut()) {
            sound.radius = Some(12.0);
        }

        let body = world.body(BodyId(1)).unwrap();
        assert_eq!(world.sound().graph().radius_for(body), 12.0);
    }

    #[test]
    fn test_extra_listeners_notified() {
        let rebuilds = Arc::new(AtomicU32::new(0));
        let pairs = Arc::new(AtomicU32::new(0));

        let mut world = SoundWorld::default();
        world.add_listener(Box::new(CountingListener {
            rebuilds: rebuilds.clone(),
            pairs: pairs.clone(),
        }));
        world.add_body(Body::new(1, "a"));
        world.add_body(Body::new(2, "b"));
        world.step(&StepEvents::new().with_active(BodyId(1), BodyId(2)));

        assert_eq!(rebuilds.load(Ordering::SeqCst), 3);
        assert_eq!(pairs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_replacing_body_keeps_single_entry() {
        let mut world = SoundWorld::default();
        world.add_body(Body::new(1, "first"));
        world.add_body(Body::new(1, "second"));

        assert_eq!(world.bodies().len(), 1);
        assert_eq!(world.body(BodyId(1)).map(|b| b.label.as_str()), Some("second"));
    }
}

//! Recording audio nodes for unit tests

use crate::body::Body;
use crate::descriptor::{NodeFactory, SoundDescriptor};
use crate::node::{node_ref, AudioNode, NodeRef};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use void_math::{polygon, Vec2};

#[derive(Default)]
struct LogInner {
    created: Vec<String>,
    connections: Vec<(String, String)>,
    disposed: Vec<String>,
    parameters: Vec<(String, String, f32)>,
}

/// Shared record of everything the mock nodes were asked to do
#[derive(Clone, Default)]
pub struct NodeLog(Arc<Mutex<LogInner>>);

impl NodeLog {
    pub fn created(&self) -> Vec<String> {
        self.0.lock().created.clone()
    }

    pub fn connections(&self) -> Vec<(String, String)> {
        self.0.lock().connections.clone()
    }

    pub fn disposed(&self) -> Vec<String> {
        self.0.lock().disposed.clone()
    }

    pub fn parameters(&self) -> Vec<(String, String, f32)> {
        self.0.lock().parameters.clone()
    }
}

/// Node that records its calls into a [`NodeLog`]
pub struct MockNode {
    name: String,
    log: NodeLog,
}

impl MockNode {
    pub fn new(name: impl Into<String>, log: &NodeLog) -> Self {
        let name = name.into();
        log.0.lock().created.push(name.clone());
        Self { name, log: log.clone() }
    }
}

impl AudioNode for MockNode {
    fn connect(&mut self, next: &NodeRef) {
        let next_name = next.lock().kind().to_string();
        self.log.0.lock().connections.push((self.name.clone(), next_name));
    }

    fn dispose(&mut self) {
        self.log.0.lock().disposed.push(self.name.clone());
    }

    fn set_parameter(&mut self, name: &str, value: f32) {
        self.log
            .0
            .lock()
            .parameters
            .push((self.name.clone(), name.to_string(), value));
    }

    fn kind(&self) -> &str {
        &self.name
    }
}

/// Factory producing numbered mock nodes: `name#0`, `name#1`, ...
pub fn mock_factory(name: &str, log: &NodeLog) -> NodeFactory {
    let name = name.to_string();
    let log = log.clone();
    let counter = Arc::new(AtomicU32::new(0));
    NodeFactory::new(move || {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        node_ref(MockNode::new(format!("{}#{}", name, n), &log))
    })
}

/// Square body of the given half size centred at `position`
pub fn square_body(id: u64, label: &str, position: Vec2, half: f32, sound: SoundDescriptor) -> Body {
    Body::new(id, label)
        .with_vertices(polygon::rectangle(Vec2::ZERO, half * 2.0, half * 2.0))
        .with_position(position)
        .with_sound(sound)
}

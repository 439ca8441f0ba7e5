//! Opaque audio node handles
//!
//! The audio backend lives outside this crate. All the sound graph needs from
//! a node is a way to wire it to the next node in a chain and a way to tear
//! it down. Hooks may additionally push parameter values into it.

use parking_lot::Mutex;
use std::sync::Arc;

/// An audio node produced by a role entry's factory
pub trait AudioNode: Send {
    /// Route this node's output into `next`
    fn connect(&mut self, next: &NodeRef);

    /// Release the node's backend resources
    fn dispose(&mut self);

    /// Set a named parameter (gain, cutoff, wet mix, ...)
    fn set_parameter(&mut self, _name: &str, _value: f32) {}

    /// Short name used in trace logs
    fn kind(&self) -> &str {
        "audio_node"
    }
}

/// Shared handle to an audio node
pub type NodeRef = Arc<Mutex<dyn AudioNode>>;

/// Wrap a node into a shared handle
pub fn node_ref<N: AudioNode + 'static>(node: N) -> NodeRef {
    Arc::new(Mutex::new(node))
}

/// Connect nodes in series: `nodes[0] -> nodes[1] -> ... -> nodes[n - 1]`
pub fn chain(nodes: &[NodeRef]) {
    for pair in nodes.windows(2) {
        pair[0].lock().connect(&pair[1]);
    }
}

/// Check whether two handles point at the same node
pub fn same_node(a: &NodeRef, b: &NodeRef) -> bool {
    Arc::ptr_eq(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{MockNode, NodeLog};

    #[test]
    fn test_chain_connects_in_series() {
        let log = NodeLog::default();
        let nodes: Vec<NodeRef> = (0..3)
            .map(|i| node_ref(MockNode::new(format!("n{}", i), &log)))
            .collect();

        chain(&nodes);

        assert_eq!(
            log.connections(),
            vec![
                ("n0".to_string(), "n1".to_string()),
                ("n1".to_string(), "n2".to_string()),
            ]
        );
        assert!(log.disposed().is_empty());
    }

    #[test]
    fn test_chain_single_node_is_noop() {
        let log = NodeLog::default();
        let nodes = vec![node_ref(MockNode::new("solo", &log))];
        chain(&nodes);
        chain(&[]);
        assert!(log.connections().is_empty());
    }

    #[test]
    fn test_same_node() {
        let log = NodeLog::default();
        let a = node_ref(MockNode::new("a", &log));
        let b = node_ref(MockNode::new("b", &log));
        assert!(same_node(&a, &a.clone()));
        assert!(!same_node(&a, &b));
    }
}

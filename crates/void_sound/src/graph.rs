//! Sound graph: per-source audio chains across all destinations
//!
//! Every body-set change triggers a total rebuild: the existing chains are
//! disposed, the bodies are reclassified and one chain is built for each
//! (source, destination) pair.
//!
//! ```text
//!  source ──► transform₁ ──► transform₂ ──► … ──► destination
//! ```
//!
//! Transform and destination nodes are instantiated per chain, so a body that
//! receives from several sources owns one node in each of their chains.
//!
//! # Chain index
//!
//! Each source keeps a single index from body id to node, merged across all of
//! its chains. With more than one destination, later chains overwrite the
//! transform and destination entries of earlier ones: [`SoundGraph::node_for`]
//! only resolves nodes of the last-built chain for a shared body. The chains
//! themselves still own every node, so teardown disposes all of them.

use crate::body::{BodyId, SoundBody};
use crate::classify::{classify, RoleSets};
use crate::config::SoundSettings;
use crate::descriptor::Role;
use crate::error::SoundWarning;
use crate::geometry;
use crate::node::{chain, NodeRef};
use std::collections::{HashMap, HashSet};

/// One node of a chain, tagged with the body it represents
#[derive(Clone)]
pub struct ChainLink {
    /// Owning body
    pub body: BodyId,
    /// Role the body plays in this chain
    pub role: Role,
    /// The node instance
    pub node: NodeRef,
}

impl std::fmt::Debug for ChainLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainLink")
            .field("body", &self.body)
            .field("role", &self.role)
            .field("node", &self.node.try_lock().map(|n| n.kind().to_string()))
            .finish()
    }
}

/// Connected nodes for one (source, destination) pair
#[derive(Debug)]
pub struct SoundChain {
    source: BodyId,
    destination: BodyId,
    links: Vec<ChainLink>,
}

impl SoundChain {
    /// Source body of the chain
    pub fn source(&self) -> BodyId {
        self.source
    }

    /// Destination body of the chain
    pub fn destination(&self) -> BodyId {
        self.destination
    }

    /// Links in signal order
    pub fn links(&self) -> &[ChainLink] {
        &self.links
    }

    /// Number of nodes in the chain
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Check if the chain has no nodes
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Node representing `body` in this chain.
    ///
    /// For a body that is both the source and the destination, this is the
    /// destination node.
    pub fn node_for(&self, body: BodyId) -> Option<&NodeRef> {
        self.links.iter().rev().find(|l| l.body == body).map(|l| &l.node)
    }

    /// Dispose every node, returning how many were disposed
    fn dispose(self) -> usize {
        for link in &self.links {
            log::trace!(
                "Disposing {} node of {} in chain {} -> {}",
                link.role,
                link.body,
                self.source,
                self.destination
            );
            link.node.lock().dispose();
        }
        self.links.len()
    }
}

/// Chains and merged node index of one source
#[derive(Default)]
struct SourceChains {
    chains: Vec<SoundChain>,
    index: HashMap<BodyId, NodeRef>,
}

impl std::fmt::Debug for SourceChains {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceChains")
            .field("chains", &self.chains)
            .field("indexed", &self.index.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Summary of a rebuild
#[derive(Debug, Default)]
pub struct RebuildReport {
    /// Nodes disposed during reset
    pub nodes_disposed: usize,
    /// Chains built
    pub chains_built: usize,
    /// Nodes created
    pub nodes_created: usize,
    /// Role entries rejected during classification
    pub warnings: Vec<SoundWarning>,
}

/// Builds and owns the audio chains
#[derive(Debug)]
pub struct SoundGraph {
    settings: SoundSettings,
    sources: Vec<BodyId>,
    transforms: Vec<BodyId>,
    destinations: Vec<BodyId>,
    /// Resolved proximity radii, kept across rebuilds
    radii: HashMap<BodyId, f32>,
    /// Chains per source
    chains: HashMap<BodyId, SourceChains>,
}

impl SoundGraph {
    /// Create an empty graph
    pub fn new(settings: SoundSettings) -> Self {
        Self {
            settings,
            sources: Vec::new(),
            transforms: Vec::new(),
            destinations: Vec::new(),
            radii: HashMap::new(),
            chains: HashMap::new(),
        }
    }

    /// Get the settings
    pub fn settings(&self) -> &SoundSettings {
        &self.settings
    }

    /// Dispose every chain node and clear all chain indexes.
    ///
    /// Role lists and cached radii are kept. Returns the number of nodes disposed.
    pub fn reset(&mut self) -> usize {
        let mut disposed = 0;
        for source in &self.sources {
            if let Some(state) = self.chains.remove(source) {
                disposed += state.chains.into_iter().map(SoundChain::dispose).sum::<usize>();
            }
        }
        // chains of sources no longer listed (none in practice)
        for (_, state) in self.chains.drain() {
            disposed += state.chains.into_iter().map(SoundChain::dispose).sum::<usize>();
        }
        disposed
    }

    /// Tear down and rebuild every chain from the current body collection
    pub fn rebuild<'a, B, I>(&mut self, bodies: I) -> RebuildReport
    where
        B: SoundBody + 'a,
        I: IntoIterator<Item = &'a B>,
    {
        let bodies: Vec<&'a B> = bodies.into_iter().collect();
        let nodes_disposed = self.reset();

        let classification = classify(bodies.iter().copied());
        let roles = classification.roles;

        self.sources = roles.ids(Role::Source);
        self.transforms = roles.ids(Role::Transform);
        self.destinations = roles.ids(Role::Destination);

        let present: HashSet<BodyId> = bodies.iter().map(|b| b.id()).collect();
        self.radii.retain(|id, _| present.contains(id));
        self.update_radii(&roles);

        let mut chains_built = 0;
        let mut nodes_created = 0;
        for source in &roles.sources {
            for destination in &roles.destinations {
                if let Some(chain) = self.build_chain(*source, *destination, &roles.transforms) {
                    nodes_created += chain.len();
                    chains_built += 1;
                    let state = self.chains.entry(source.id()).or_default();
                    for link in &chain.links {
                        state.index.insert(link.body, link.node.clone());
                    }
                    state.chains.push(chain);
                }
            }
        }

        log::debug!(
            "Rebuilt sound graph: {} sources, {} transforms, {} destinations, {} chains ({} nodes disposed)",
            self.sources.len(),
            self.transforms.len(),
            self.destinations.len(),
            chains_built,
            nodes_disposed
        );

        RebuildReport {
            nodes_disposed,
            chains_built,
            nodes_created,
            warnings: classification.warnings,
        }
    }

    /// Record the radius of every classified body.
    ///
    /// Explicit descriptor radii are re-read on every rebuild; outline radii
    /// are computed once and kept until cleared.
    fn update_radii<B: SoundBody>(&mut self, roles: &RoleSets<'_, B>) {
        for body in roles.iter_all() {
            if let Some(radius) = explicit_radius(body) {
                self.radii.insert(body.id(), radius);
            } else if !self.radii.contains_key(&body.id()) {
                let radius = geometry::resolve_radius(body, &self.settings);
                self.radii.insert(body.id(), radius);
            }
        }
    }

    fn build_chain<B: SoundBody>(
        &self,
        source: &B,
        destination: &B,
        transforms: &[&B],
    ) -> Option<SoundChain> {
        let mut links = Vec::with_capacity(transforms.len() + 2);

        let mut push = |body: &B, role: Role| -> Option<()> {
            let node = body.sound()?.factory(role)?.create();
            links.push(ChainLink {
                body: body.id(),
                role,
                node,
            });
            Some(())
        };

        push(source, Role::Source)?;
        for transform in transforms {
            push(transform, Role::Transform)?;
        }
        push(destination, Role::Destination)?;

        let nodes: Vec<NodeRef> = links.iter().map(|l| l.node.clone()).collect();
        chain(&nodes);

        log::trace!(
            "Built sound chain {} -> {} ({} nodes)",
            source.id(),
            destination.id(),
            links.len()
        );

        Some(SoundChain {
            source: source.id(),
            destination: destination.id(),
            links,
        })
    }

    /// Node representing `receiver` within `source`'s chains.
    ///
    /// Returns `None` if the source has no chains or the receiver has no entry.
    pub fn node_for(&self, source: BodyId, receiver: BodyId) -> Option<&NodeRef> {
        self.chains.get(&source)?.index.get(&receiver)
    }

    /// Chains owned by a source, in destination order
    pub fn chains_for(&self, source: BodyId) -> &[SoundChain] {
        self.chains
            .get(&source)
            .map(|s| s.chains.as_slice())
            .unwrap_or(&[])
    }

    /// Chain for a specific (source, destination) pair
    pub fn chain(&self, source: BodyId, destination: BodyId) -> Option<&SoundChain> {
        self.chains_for(source)
            .iter()
            .find(|c| c.destination == destination)
    }

    /// Total number of chains
    pub fn chain_count(&self) -> usize {
        self.chains.values().map(|s| s.chains.len()).sum()
    }

    /// Total number of live nodes
    pub fn node_count(&self) -> usize {
        self.chains
            .values()
            .flat_map(|s| s.chains.iter())
            .map(SoundChain::len)
            .sum()
    }

    /// Classified sources, in scan order
    pub fn sources(&self) -> &[BodyId] {
        &self.sources
    }

    /// Classified transforms, in scan order
    pub fn transforms(&self) -> &[BodyId] {
        &self.transforms
    }

    /// Classified destinations, in scan order
    pub fn destinations(&self) -> &[BodyId] {
        &self.destinations
    }

    /// Check if a body was classified in a role
    pub fn has_role(&self, body: BodyId, role: Role) -> bool {
        let list = match role {
            Role::Source => &self.sources,
            Role::Transform => &self.transforms,
            Role::Destination => &self.destinations,
        };
        list.contains(&body)
    }

    /// Cached radius of a body
    pub fn radius_of(&self, body: BodyId) -> Option<f32> {
        self.radii.get(&body).copied()
    }

    /// Radius used for concentricity: the body's explicit radius, else the
    /// cached outline radius, else a freshly resolved one (not cached)
    pub fn radius_for<B: SoundBody + ?Sized>(&self, body: &B) -> f32 {
        explicit_radius(body)
            .or_else(|| self.radius_of(body.id()))
            .unwrap_or_else(|| geometry::resolve_radius(body, &self.settings))
    }

    /// Forget a cached radius so the next rebuild resolves it again
    pub fn clear_radius(&mut self, body: BodyId) {
        self.radii.remove(&body);
    }

    /// Forget every cached radius
    pub fn clear_radii(&mut self) {
        self.radii.clear();
    }
}

fn explicit_radius<B: SoundBody + ?Sized>(body: &B) -> Option<f32> {
    body.sound().and_then(|sound| sound.radius)
}

impl Default for SoundGraph {
    fn default() -> Self {
        Self::new(SoundSettings::default())
    }
}

impl Drop for SoundGraph {
    fn drop(&mut self) {
        self.reset();
    }
}

//! # Network Builder Module
//!
//! ## Purpose
//! Builds the chemical reaction network (CRN) of one reaction kind: nodes are species,
//! edges join a reactant to a product of at least one reaction.
//!
//! ## Key Logic Implementation
//! 1. **Nodes**: every species id becomes a node, in the order given, even when no reaction
//!    touches it.
//! 2. **Edge keys**: for each reaction, every (reactant, product) of the Cartesian product
//!    of its two lists is an edge key. Keys are unordered pairs; the orientation kept is the
//!    one seen first.
//! 3. **Aggregation**: each key accumulates the positions of the reactions producing it,
//!    in processing order. A reaction is listed once per edge even when several of its
//!    pairs collapse onto the same key.
//! 4. **Graph**: one undirected `petgraph` edge per key, added in first-seen key order.
//!    Self-pairs become self-loops.
//!
//! Edge weights are positions into the reaction slice the graph was built from, so the
//! graph never copies reaction records. `ReactionNetwork` keeps that slice's owner (the
//! `Mechanism`) next to the graph.
use crate::Mechanism::mechanism_data::{Mechanism, Reaction, ReactionKind};
use crate::errors::CrnError;
use log::{info, warn};
use petgraph::Undirected;
use petgraph::graph::{EdgeIndex, Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// (reactant id, product id) as first seen
pub type EdgeKey = (String, String);
/// nodes carry species ids, edges carry positions of their reactions
pub type CrnGraph = Graph<String, Vec<usize>, Undirected>;

fn unordered(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// undirected species graph with id lookup
#[derive(Debug, Clone)]
pub struct SpeciesGraph {
    pub graph: CrnGraph,
    node_lookup: HashMap<String, NodeIndex>,
}

impl SpeciesGraph {
    pub fn build<S: AsRef<str>>(species_ids: &[S], reactions: &[Reaction]) -> Self {
        let mut graph = CrnGraph::default();
        let mut node_lookup: HashMap<String, NodeIndex> = HashMap::new();
        for id in species_ids {
            let id = id.as_ref();
            if !node_lookup.contains_key(id) {
                let idx = graph.add_node(id.to_string());
                node_lookup.insert(id.to_string(), idx);
            }
        }

        // first-seen order of keys, and key -> its slot in that order
        let mut keys: Vec<(EdgeKey, Vec<usize>)> = Vec::new();
        let mut key_slots: HashMap<(String, String), usize> = HashMap::new();
        for (position, reaction) in reactions.iter().enumerate() {
            for reactant in &reaction.reactants {
                for product in &reaction.products {
                    let slot = *key_slots
                        .entry(unordered(reactant, product))
                        .or_insert_with(|| {
                            keys.push(((reactant.clone(), product.clone()), Vec::new()));
                            keys.len() - 1
                        });
                    let list = &mut keys[slot].1;
                    if list.last() != Some(&position) {
                        list.push(position);
                    }
                }
            }
        }

        for ((reactant, product), reaction_list) in keys {
            let a = Self::node_or_insert(&mut graph, &mut node_lookup, &reactant);
            let b = Self::node_or_insert(&mut graph, &mut node_lookup, &product);
            graph.add_edge(a, b, reaction_list);
        }
        Self { graph, node_lookup }
    }

    fn node_or_insert(
        graph: &mut CrnGraph,
        node_lookup: &mut HashMap<String, NodeIndex>,
        id: &str,
    ) -> NodeIndex {
        if let Some(&idx) = node_lookup.get(id) {
            return idx;
        }
        warn!("Species '{}' is used by a reaction but not declared", id);
        let idx = graph.add_node(id.to_string());
        node_lookup.insert(id.to_string(), idx);
        idx
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node_index(&self, species_id: &str) -> Option<NodeIndex> {
        self.node_lookup.get(species_id).copied()
    }

    /// species ids in node order
    pub fn node_ids(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].as_str())
            .collect()
    }

    /// species id at a position of the node order
    pub fn node_at(&self, position: usize) -> Option<&str> {
        if position < self.graph.node_count() {
            Some(self.graph[NodeIndex::new(position)].as_str())
        } else {
            None
        }
    }

    pub fn edge_key(&self, edge: EdgeIndex) -> Option<EdgeKey> {
        let (a, b) = self.graph.edge_endpoints(edge)?;
        Some((self.graph[a].clone(), self.graph[b].clone()))
    }

    /// edge keys in edge order
    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        self.graph
            .edge_references()
            .map(|e| (self.graph[e.source()].clone(), self.graph[e.target()].clone()))
            .collect()
    }

    /// the edge joining two species, whichever orientation it was stored with
    pub fn find_edge(&self, a: &str, b: &str) -> Option<EdgeIndex> {
        let a = self.node_index(a)?;
        let b = self.node_index(b)?;
        self.graph.find_edge(a, b)
    }

    pub fn edge_reactions(&self, edge: EdgeIndex) -> Option<&[usize]> {
        self.graph.edge_weight(edge).map(|v| v.as_slice())
    }

    pub fn reactions_between(&self, a: &str, b: &str) -> Option<&[usize]> {
        self.edge_reactions(self.find_edge(a, b)?)
    }

    /// number of edges touching a species (a self-loop counts once)
    pub fn degree(&self, species_id: &str) -> Result<usize, CrnError> {
        let idx = self
            .node_index(species_id)
            .ok_or_else(|| CrnError::SpeciesNotFound(species_id.to_string()))?;
        let mut edges: Vec<EdgeIndex> = self.graph.edges(idx).map(|e| e.id()).collect();
        edges.sort();
        edges.dedup();
        Ok(edges.len())
    }
}

/// The CRN of one reaction kind together with the mechanism it was built from.
#[derive(Debug, Clone)]
pub struct ReactionNetwork {
    mechanism: Mechanism,
    kind: ReactionKind,
    species_graph: SpeciesGraph,
}

impl ReactionNetwork {
    pub fn new(mechanism: Mechanism, kind: ReactionKind) -> Self {
        let species_graph = Self::build_graph(&mechanism, kind);
        Self {
            mechanism,
            kind,
            species_graph,
        }
    }

    fn build_graph(mechanism: &Mechanism, kind: ReactionKind) -> SpeciesGraph {
        let graph = SpeciesGraph::build(&mechanism.species_ids(), mechanism.reactions(kind));
        info!(
            "Built {} network of '{}': {} species, {} edges from {} reactions",
            kind,
            mechanism.source,
            graph.node_count(),
            graph.edge_count(),
            mechanism.reactions(kind).len()
        );
        graph
    }

    /// Rebuilds the network for another reaction kind of the same mechanism.
    pub fn set_kind(&mut self, kind: ReactionKind) {
        if kind != self.kind {
            self.kind = kind;
            self.species_graph = Self::build_graph(&self.mechanism, kind);
        }
    }

    pub fn kind(&self) -> ReactionKind {
        self.kind
    }

    pub fn mechanism(&self) -> &Mechanism {
        &self.mechanism
    }

    pub fn graph(&self) -> &SpeciesGraph {
        &self.species_graph
    }

    pub fn reactions(&self) -> &[Reaction] {
        self.mechanism.reactions(self.kind)
    }

    /// reaction records for positions stored on the edges
    pub fn reactions_at(&self, positions: &[usize]) -> Vec<&Reaction> {
        let reactions = self.reactions();
        positions.iter().filter_map(|&p| reactions.get(p)).collect()
    }
}

//! Derived queries behind the highlight of a selected species or edge.
use crate::Network::network_builder::{EdgeKey, ReactionNetwork, SpeciesGraph};
use crate::errors::CrnError;
use petgraph::graph::EdgeIndex;
use petgraph::visit::EdgeRef;
use std::collections::HashSet;

/// highlight data of a selected species
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpeciesSelection {
    pub species: String,
    /// adjacent species, each once, in edge order
    pub neighbors: Vec<String>,
    pub edges: Vec<EdgeIndex>,
    /// positions of the reactions of all incident edges, each once
    pub reactions: Vec<usize>,
}

/// highlight data of a selected edge
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeSelection {
    pub edge: EdgeIndex,
    pub key: EdgeKey,
    pub reactions: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    #[default]
    Nothing,
    Species(SpeciesSelection),
    Edge(EdgeSelection),
}

/// Neighbors, incident edges and reactions of a species.
/// Incident edges are visited in edge order; a self-loop makes the species its own neighbor.
pub fn select(graph: &SpeciesGraph, species_id: &str) -> Result<SpeciesSelection, CrnError> {
    let node = graph
        .node_index(species_id)
        .ok_or_else(|| CrnError::SpeciesNotFound(species_id.to_string()))?;

    let mut edges: Vec<EdgeIndex> = graph.graph.edges(node).map(|e| e.id()).collect();
    edges.sort();
    edges.dedup();

    let mut neighbors = Vec::new();
    let mut seen_neighbors = HashSet::new();
    let mut reactions = Vec::new();
    let mut seen_reactions = HashSet::new();
    for &edge in &edges {
        let Some((a, b)) = graph.graph.edge_endpoints(edge) else {
            continue;
        };
        let other = if a == node { b } else { a };
        if seen_neighbors.insert(other) {
            neighbors.push(graph.graph[other].clone());
        }
        for &position in &graph.graph[edge] {
            if seen_reactions.insert(position) {
                reactions.push(position);
            }
        }
    }
    Ok(SpeciesSelection {
        species: species_id.to_string(),
        neighbors,
        edges,
        reactions,
    })
}

pub fn select_edge(graph: &SpeciesGraph, edge: EdgeIndex) -> Option<EdgeSelection> {
    let key = graph.edge_key(edge)?;
    let reactions = graph.edge_reactions(edge)?.to_vec();
    Some(EdgeSelection {
        edge,
        key,
        reactions,
    })
}

/// Current selection of a viewer. Every update replaces the previous selection as a whole.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    current: Selection,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Selection {
        &self.current
    }

    /// Selects a species by id. Unknown ids leave the selection untouched and are reported.
    pub fn select_species(
        &mut self,
        network: &ReactionNetwork,
        species_id: &str,
    ) -> Result<&Selection, CrnError> {
        let selection = select(network.graph(), species_id)?;
        self.current = Selection::Species(selection);
        Ok(&self.current)
    }

    pub fn replace(&mut self, selection: Selection) {
        self.current = selection;
    }

    pub fn clear(&mut self) {
        self.current = Selection::Nothing;
    }

    pub fn is_empty(&self) -> bool {
        self.current == Selection::Nothing
    }

    pub fn selected_species(&self) -> Option<&str> {
        match &self.current {
            Selection::Species(s) => Some(s.species.as_str()),
            _ => None,
        }
    }

    /// species drawn highlighted: the selected one and its neighbors,
    /// or both ends of the selected edge
    pub fn highlighted_species(&self) -> HashSet<&str> {
        match &self.current {
            Selection::Nothing => HashSet::new(),
            Selection::Species(s) => std::iter::once(s.species.as_str())
                .chain(s.neighbors.iter().map(|n| n.as_str()))
                .collect(),
            Selection::Edge(e) => [e.key.0.as_str(), e.key.1.as_str()].into_iter().collect(),
        }
    }

    pub fn highlighted_edges(&self) -> HashSet<EdgeIndex> {
        match &self.current {
            Selection::Nothing => HashSet::new(),
            Selection::Species(s) => s.edges.iter().copied().collect(),
            Selection::Edge(e) => std::iter::once(e.edge).collect(),
        }
    }
}

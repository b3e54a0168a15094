//! Resolution of pick indices coming from the plot into selections.
//!
//! Node picks are positions in the graph's node order. Edge picks are positions in the
//! edge list last handed to the renderer, which may differ from the graph's edge order.
//! Indices that resolve to nothing are ignored: the caller gets `None` and keeps its state.
use crate::Network::network_builder::ReactionNetwork;
use crate::Network::selection::{Selection, select, select_edge};
use petgraph::graph::EdgeIndex;

#[derive(Debug, Clone, Default)]
pub struct PickDispatcher {
    drawn_edges: Vec<EdgeIndex>,
}

impl PickDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// remembers the edges in the order they were drawn
    pub fn set_drawn_edges(&mut self, edges: Vec<EdgeIndex>) {
        self.drawn_edges = edges;
    }

    pub fn on_node_pick(&self, network: &ReactionNetwork, index: usize) -> Option<Selection> {
        let species_id = network.graph().node_at(index)?;
        select(network.graph(), species_id)
            .ok()
            .map(Selection::Species)
    }

    pub fn on_edge_pick(&self, network: &ReactionNetwork, index: usize) -> Option<Selection> {
        let edge = *self.drawn_edges.get(index)?;
        select_edge(network.graph(), edge).map(Selection::Edge)
    }
}

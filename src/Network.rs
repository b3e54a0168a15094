/// Construction of the chemical reaction network of one reaction kind.
/// Species become nodes, every reactant-product pair of a reaction becomes an undirected edge
/// that lists all reactions realizing it.
///
/// # Examples
/// ```
/// use crnviz::Mechanism::mechanism_data::{Reaction, ReactionKind};
/// use crnviz::Network::network_builder::SpeciesGraph;
/// let reactions = vec![Reaction::new(1, vec!["A"], vec!["B", "C"], ReactionKind::Kinetic)];
/// let graph = SpeciesGraph::build(&["A", "B", "C"], &reactions);
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.reactions_between("A", "C"), Some(&[0][..]));
/// assert!(graph.find_edge("B", "C").is_none());
/// ```
pub mod network_builder;
/// Neighbors, incident edges and reactions of a selected species or edge
pub mod selection;
pub mod pick_dispatch;
#[cfg(test)]
mod network_builder_tests;

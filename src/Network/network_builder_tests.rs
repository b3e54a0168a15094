#[cfg(test)]
mod tests {
    use crate::Mechanism::mechanism_data::{Mechanism, Reaction, ReactionKind, Species};
    use crate::Network::network_builder::{ReactionNetwork, SpeciesGraph};
    use crate::Utils::load_from_file::load_default_mechanism;

    fn kinetic(id: i64, reactants: Vec<&str>, products: Vec<&str>) -> Reaction {
        Reaction::new(id, reactants, products, ReactionKind::Kinetic)
    }

    fn key(a: &str, b: &str) -> (String, String) {
        (a.to_string(), b.to_string())
    }

    #[test]
    fn test_worked_example() {
        let reactions = vec![kinetic(1, vec!["A"], vec!["B", "C"])];
        let graph = SpeciesGraph::build(&["A", "B", "C"], &reactions);
        assert_eq!(graph.node_ids(), vec!["A", "B", "C"]);
        assert_eq!(graph.edge_keys(), vec![key("A", "B"), key("A", "C")]);
        assert_eq!(graph.reactions_between("A", "B"), Some(&[0][..]));
        assert_eq!(graph.reactions_between("A", "C"), Some(&[0][..]));
        assert!(graph.find_edge("B", "C").is_none());
    }

    #[test]
    fn test_two_reactants_one_product() {
        let reactions = vec![kinetic(5, vec!["A", "B"], vec!["C"])];
        let graph = SpeciesGraph::build(&["A", "B", "C"], &reactions);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.reactions_between("A", "C"), Some(&[0][..]));
        assert_eq!(graph.reactions_between("B", "C"), Some(&[0][..]));
        assert!(graph.find_edge("A", "B").is_none());
    }

    #[test]
    fn test_reactions_accumulate_in_processing_order() {
        let reactions = vec![
            kinetic(10, vec!["A"], vec!["C"]),
            kinetic(11, vec!["B"], vec!["D"]),
            kinetic(12, vec!["A", "E"], vec!["C"]),
        ];
        let graph = SpeciesGraph::build(&["A", "B", "C", "D", "E"], &reactions);
        assert_eq!(graph.reactions_between("A", "C"), Some(&[0, 2][..]));
        // one edge per pair
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(
            graph.edge_keys(),
            vec![key("A", "C"), key("B", "D"), key("E", "C")]
        );
    }

    #[test]
    fn test_reverse_pairs_share_the_edge() {
        let reactions = vec![
            kinetic(1, vec!["N2O5"], vec!["NO2"]),
            kinetic(2, vec!["NO2"], vec!["N2O5"]),
        ];
        let graph = SpeciesGraph::build(&["NO2", "N2O5"], &reactions);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge_keys(), vec![key("N2O5", "NO2")]);
        assert_eq!(graph.reactions_between("NO2", "N2O5"), Some(&[0, 1][..]));
    }

    #[test]
    fn test_reaction_listed_once_per_edge() {
        // (A, B) and (B, A) collapse onto one edge within the same reaction
        let reactions = vec![kinetic(1, vec!["A", "B"], vec!["B", "A"])];
        let graph = SpeciesGraph::build(&["A", "B"], &reactions);
        assert_eq!(graph.reactions_between("A", "B"), Some(&[0][..]));
    }

    #[test]
    fn test_self_pair_is_a_self_loop() {
        let reactions = vec![kinetic(4, vec!["O1D", "O2"], vec!["O", "O2"])];
        let graph = SpeciesGraph::build(&["O1D", "O2", "O"], &reactions);
        let edge = graph.find_edge("O2", "O2").expect("self-loop expected");
        let (a, b) = graph.graph.edge_endpoints(edge).unwrap();
        assert_eq!(a, b);
        assert_eq!(graph.edge_reactions(edge), Some(&[0][..]));
        // (O1D, O2), (O2, O) and the loop
        assert_eq!(graph.degree("O2").unwrap(), 3);
    }

    #[test]
    fn test_isolated_species_are_nodes() {
        let reactions = vec![kinetic(1, vec!["A"], vec!["B"])];
        let graph = SpeciesGraph::build(&["A", "B", "Z"], &reactions);
        assert!(graph.node_index("Z").is_some());
        assert_eq!(graph.degree("Z").unwrap(), 0);
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_empty_sides_contribute_nothing() {
        let reactions = vec![
            kinetic(1, vec!["A"], vec![]),
            kinetic(2, vec![], vec!["B"]),
        ];
        let graph = SpeciesGraph::build(&["A", "B"], &reactions);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_undeclared_species_get_nodes() {
        let reactions = vec![kinetic(1, vec!["A"], vec!["X"])];
        let graph = SpeciesGraph::build(&["A"], &reactions);
        assert_eq!(graph.node_ids(), vec!["A", "X"]);
        assert!(graph.find_edge("A", "X").is_some());
    }

    #[test]
    fn test_duplicate_species_ids_give_one_node() {
        let graph = SpeciesGraph::build(&["A", "B", "A"], &[]);
        assert_eq!(graph.node_ids(), vec!["A", "B"]);
    }

    #[test]
    fn test_build_is_deterministic() {
        let mech = load_default_mechanism().unwrap();
        for kind in ReactionKind::ALL {
            let first = SpeciesGraph::build(&mech.species_ids(), mech.reactions(kind));
            let second = SpeciesGraph::build(&mech.species_ids(), mech.reactions(kind));
            assert_eq!(first.node_ids(), second.node_ids());
            assert_eq!(first.edge_keys(), second.edge_keys());
            for (e1, e2) in first
                .graph
                .edge_indices()
                .zip(second.graph.edge_indices())
            {
                assert_eq!(first.edge_reactions(e1), second.edge_reactions(e2));
            }
        }
    }

    #[test]
    fn test_every_edge_is_realized_by_its_reactions() {
        let mech = load_default_mechanism().unwrap();
        let net = ReactionNetwork::new(mech, ReactionKind::Kinetic);
        let graph = net.graph();
        for edge in graph.graph.edge_indices() {
            let (a, b) = graph.edge_key(edge).unwrap();
            let reactions = net.reactions_at(graph.edge_reactions(edge).unwrap());
            assert!(!reactions.is_empty());
            for r in reactions {
                let forward = r.reactants.contains(&a) && r.products.contains(&b);
                let backward = r.reactants.contains(&b) && r.products.contains(&a);
                assert!(forward || backward, "reaction {} does not realize ({}, {})", r.id, a, b);
            }
        }
    }

    #[test]
    fn test_network_kind_switch() {
        let species = vec![Species::new("NO2"), Species::new("NO"), Species::new("O")];
        let photolysis = vec![Reaction::new(
            4,
            vec!["NO2"],
            vec!["NO", "O"],
            ReactionKind::Photolysis,
        )];
        let kinetic_reactions = vec![kinetic(1, vec!["NO", "O"], vec!["NO2"])];
        let mech = Mechanism::new(species, kinetic_reactions, photolysis);
        let mut net = ReactionNetwork::new(mech, ReactionKind::Kinetic);
        assert_eq!(net.graph().edge_keys(), vec![key("NO", "NO2"), key("O", "NO2")]);
        net.set_kind(ReactionKind::Photolysis);
        assert_eq!(net.kind(), ReactionKind::Photolysis);
        assert_eq!(net.graph().edge_keys(), vec![key("NO2", "NO"), key("NO2", "O")]);
        let edge = net.graph().find_edge("NO", "NO2").unwrap();
        let reactions = net.reactions_at(net.graph().edge_reactions(edge).unwrap());
        assert_eq!(reactions[0].id, 4);
        assert_eq!(net.graph().node_count(), 3);
    }
}

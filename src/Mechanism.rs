/// Species and reaction records of a chemistry mechanism: the reference data every network
/// is built from.
/// Reactions come in two kinds, kinetic and photolysis, kept in separate collections.
///
/// # Examples
/// ```
/// use crnviz::Mechanism::mechanism_data::{Mechanism, Reaction, ReactionKind, Species};
/// let species = vec![Species::new("NO"), Species::new("NO2"), Species::new("O3")];
/// let r1 = Reaction::new(1, vec!["NO", "O3"], vec!["NO2"], ReactionKind::Kinetic);
/// let mech = Mechanism::new(species, vec![r1], Vec::new());
/// assert_eq!(mech.reactions(ReactionKind::Kinetic).len(), 1);
/// assert!(mech.species_by_id("O3").is_some());
/// ```
pub mod mechanism_data;
/// Turns reaction equations like `"2NO2 + hv => NO + NO3"` into reactant and product species lists.
/// Stoichiometric coefficients are stripped and photon terms (`hv`) are dropped.
///
/// # Examples
/// ```
/// use crnviz::Mechanism::equation_parser::parse_equation;
/// let (reactants, products) = parse_equation("NO2 + hv => NO + O").unwrap();
/// assert_eq!(reactants, vec!["NO2".to_string()]);
/// assert_eq!(products, vec!["NO".to_string(), "O".to_string()]);
/// ```
pub mod equation_parser;
/// Text rendering of species and reactions for the selection log
pub mod record_info;

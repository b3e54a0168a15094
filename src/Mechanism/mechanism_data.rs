//! # Mechanism Data Module
//!
//! ## Purpose
//! Holds the reference data of a chemistry mechanism: the species table and the two
//! reaction collections (kinetic and photolysis). Everything here is read-only once the
//! mechanism is loaded; networks and selections only borrow from it.
//!
//! ## Main Data Structures
//! - `Species`: identifier, display name, optional chemical formula
//! - `Reaction`: integer id, ordered reactant and product ids, optional flag, equation text
//! - `ReactionKind`: which of the two collections a reaction belongs to
//! - `Mechanism`: species table plus both reaction collections
//!
//! ## Raw records
//! Mechanism files describe reactions either with explicit `reactants`/`products` arrays
//! or with an `eq` string. `RawReaction` is the serde view of such a record and
//! `Reaction::from_raw` resolves it into a `Reaction`.
use crate::Mechanism::equation_parser::parse_equation;
use crate::errors::CrnError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// chemical species as declared in the mechanism
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub formula: Option<String>,
}

impl Species {
    /// species whose display name is its id
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            formula: None,
        }
    }

    pub fn with_formula(id: &str, name: &str, formula: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            formula: Some(formula.to_string()),
        }
    }

    /// empty display names fall back to the id
    pub(crate) fn normalize(mut self) -> Self {
        if self.name.trim().is_empty() {
            self.name = self.id.clone();
        }
        self
    }
}

/// category of a reaction; each category is a separate collection in the mechanism
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    #[default]
    Kinetic,
    Photolysis,
}

impl ReactionKind {
    pub const ALL: [ReactionKind; 2] = [ReactionKind::Kinetic, ReactionKind::Photolysis];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Kinetic => "kinetic",
            ReactionKind::Photolysis => "photolysis",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// reaction record as it appears in a mechanism file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawReaction {
    pub id: i64,
    #[serde(default)]
    pub reactants: Option<Vec<String>>,
    #[serde(default)]
    pub products: Option<Vec<String>>,
    #[serde(default)]
    pub eq: Option<String>,
    #[serde(default)]
    pub flag: Option<String>,
}

/// struct for reaction data
#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    pub id: i64,
    pub reactants: Vec<String>,
    pub products: Vec<String>,
    pub flag: Option<String>,
    /// human-readable representation of the reaction
    pub equation: String,
    pub kind: ReactionKind,
}

impl Reaction {
    /// builds a reaction from species lists, the equation text is generated
    pub fn new(id: i64, reactants: Vec<&str>, products: Vec<&str>, kind: ReactionKind) -> Self {
        let reactants: Vec<String> = reactants.iter().map(|s| s.to_string()).collect();
        let products: Vec<String> = products.iter().map(|s| s.to_string()).collect();
        let equation = format_equation(&reactants, &products);
        Self {
            id,
            reactants,
            products,
            flag: None,
            equation,
            kind,
        }
    }

    /// Resolves a raw record. Explicit `reactants`/`products` arrays take precedence over
    /// the `eq` string, which then only serves as display text.
    pub fn from_raw(raw: RawReaction, kind: ReactionKind) -> Result<Self, CrnError> {
        let (reactants, products) = match (raw.reactants, raw.products) {
            (Some(reactants), Some(products)) => (reactants, products),
            (reactants, products) => {
                let Some(eq) = raw.eq.as_deref() else {
                    return Err(CrnError::InvalidRecord(format!(
                        "reaction {} has neither an equation nor reactant/product lists",
                        raw.id
                    )));
                };
                let (parsed_reactants, parsed_products) = parse_equation(eq)?;
                (
                    reactants.unwrap_or(parsed_reactants),
                    products.unwrap_or(parsed_products),
                )
            }
        };
        let equation = match raw.eq {
            Some(eq) if !eq.trim().is_empty() => eq.trim().to_string(),
            _ => format_equation(&reactants, &products),
        };
        Ok(Self {
            id: raw.id,
            reactants,
            products,
            flag: raw.flag,
            equation,
            kind,
        })
    }

    pub fn with_flag(mut self, flag: &str) -> Self {
        self.flag = Some(flag.to_string());
        self
    }
}

/// "A + B -> C + D"
pub fn format_equation(reactants: &[String], products: &[String]) -> String {
    format!("{} -> {}", reactants.join(" + "), products.join(" + "))
}

/// species table plus kinetic and photolysis reaction collections
#[derive(Debug, Clone, Default)]
pub struct Mechanism {
    pub species: Vec<Species>,
    pub kinetic: Vec<Reaction>,
    pub photolysis: Vec<Reaction>,
    /// where the mechanism came from (file path or name of the bundled mechanism)
    pub source: String,
    species_lookup: HashMap<String, usize>,
}

impl Mechanism {
    pub fn new(species: Vec<Species>, kinetic: Vec<Reaction>, photolysis: Vec<Reaction>) -> Self {
        let species: Vec<Species> = species.into_iter().map(Species::normalize).collect();
        let mut species_lookup = HashMap::new();
        for (i, s) in species.iter().enumerate() {
            species_lookup.entry(s.id.clone()).or_insert(i);
        }
        Self {
            species,
            kinetic,
            photolysis,
            source: String::new(),
            species_lookup,
        }
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = source.to_string();
        self
    }

    /// Builds the species table from the reactions when a mechanism file declares none:
    /// every id met in a reactant or product list, in first-seen order.
    pub fn species_from_reactions(kinetic: &[Reaction], photolysis: &[Reaction]) -> Vec<Species> {
        let mut seen = HashSet::new();
        let mut species = Vec::new();
        for reaction in kinetic.iter().chain(photolysis.iter()) {
            for id in reaction.reactants.iter().chain(reaction.products.iter()) {
                if seen.insert(id.clone()) {
                    species.push(Species::new(id));
                }
            }
        }
        species
    }

    pub fn species_ids(&self) -> Vec<&str> {
        self.species.iter().map(|s| s.id.as_str()).collect()
    }

    pub fn species_by_id(&self, id: &str) -> Option<&Species> {
        self.species_lookup.get(id).map(|&i| &self.species[i])
    }

    pub fn reactions(&self, kind: ReactionKind) -> &[Reaction] {
        match kind {
            ReactionKind::Kinetic => &self.kinetic,
            ReactionKind::Photolysis => &self.photolysis,
        }
    }
}

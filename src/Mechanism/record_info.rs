//! Text tables describing species and reactions, shown in the selection log.
//!
//! `Record` wraps the two kinds of mechanism record behind one `RecordInfo` interface.
//! Records coming from untyped data (JSON values) go through `Record::try_from`, which
//! rejects anything that is neither a species nor a reaction.
use crate::Mechanism::mechanism_data::{RawReaction, Reaction, ReactionKind, Species};
use crate::errors::CrnError;
use enum_dispatch::enum_dispatch;
use prettytable::{Table, row};
use serde_json::Value;

#[enum_dispatch]
pub trait RecordInfo {
    /// one-line caption, e.g. "Species NO2" or "Reaction 12 (kinetic)"
    fn title(&self) -> String;
    fn info_table(&self) -> Table;
    fn info_text(&self) -> String {
        format!("{}\n{}", self.title(), self.info_table())
    }
}

impl RecordInfo for Species {
    fn title(&self) -> String {
        format!("Species {}", self.id)
    }

    fn info_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["id", self.id]);
        table.add_row(row!["name", self.name]);
        table.add_row(row!["formula", self.formula.as_deref().unwrap_or("-")]);
        table
    }
}

impl RecordInfo for Reaction {
    fn title(&self) -> String {
        format!("Reaction {} ({})", self.id, self.kind)
    }

    fn info_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["id", self.id]);
        table.add_row(row!["equation", self.equation]);
        table.add_row(row!["reactants", self.reactants.join(", ")]);
        table.add_row(row!["products", self.products.join(", ")]);
        table.add_row(row!["flag", self.flag.as_deref().unwrap_or("-")]);
        table.add_row(row!["kind", self.kind]);
        table
    }
}

#[enum_dispatch(RecordInfo)]
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Species(Species),
    Reaction(Reaction),
}

impl TryFrom<&Value> for Record {
    type Error = CrnError;

    /// Objects with an integer `id` and reaction fields (`eq`, `reactants`, `products`) are
    /// reactions, objects with a string `id` are species.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let Some(obj) = value.as_object() else {
            return Err(CrnError::InvalidRecord(format!(
                "expected a JSON object, got {}",
                value
            )));
        };
        let is_reaction = ["eq", "reactants", "products"]
            .iter()
            .any(|k| obj.contains_key(*k));
        match obj.get("id") {
            Some(Value::Number(_)) if is_reaction => {
                let reaction = reaction_from_value(value, obj.get("kind")).map_err(|e| {
                    CrnError::InvalidRecord(format!("reaction record {}: {}", value, e))
                })?;
                Ok(Record::Reaction(reaction))
            }
            Some(Value::String(_)) if !is_reaction => {
                let species: Species = serde_json::from_value(value.clone()).map_err(|e| {
                    CrnError::InvalidRecord(format!("species record {}: {}", value, e))
                })?;
                Ok(Record::Species(species.normalize()))
            }
            Some(id) => Err(CrnError::InvalidRecord(format!(
                "id {} does not identify a species or a reaction",
                id
            ))),
            None => Err(CrnError::InvalidRecord(format!(
                "record without id: {}",
                value
            ))),
        }
    }
}

fn reaction_from_value(value: &Value, kind: Option<&Value>) -> Result<Reaction, CrnError> {
    let kind = match kind {
        Some(k) => serde_json::from_value::<ReactionKind>(k.clone())?,
        None => ReactionKind::Kinetic,
    };
    let raw: RawReaction = serde_json::from_value(value.clone())?;
    Reaction::from_raw(raw, kind)
}

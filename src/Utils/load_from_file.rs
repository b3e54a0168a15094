use crate::Mechanism::mechanism_data::{Mechanism, RawReaction, Reaction, ReactionKind, Species};
use crate::errors::CrnError;
use log::{error, info, warn};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// mechanism shipped with the binary, used when no usable file is given
pub const DEFAULT_MECHANISM: &str = include_str!("../assets/default_mechanism.crn");
pub const DEFAULT_MECHANISM_NAME: &str = "bundled: default_mechanism.crn";

const SPECIES_HEADERS: [&str; 1] = ["SPECIES"];
const KINETIC_HEADERS: [&str; 2] = ["KINETIC", "REACTIONS"];
const PHOTOLYSIS_HEADERS: [&str; 1] = ["PHOTOLYSIS"];

/// body of one header-delimited section of a mechanism file
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub name: String,
    /// 0-based index of the first body line in the file
    pub start_line: usize,
    pub body: String,
}

/// A header is a non-empty line made only of uppercase letters and underscores.
fn is_header(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_uppercase() || c == '_')
}

/// Splits a mechanism document into its sections. Text before the first header is ignored.
pub fn split_sections(text: &str) -> Vec<Section> {
    let lines: Vec<&str> = text.lines().collect();
    let mut sections = Vec::new();
    let mut current: Option<(String, usize)> = None;
    for (i, line) in lines.iter().enumerate() {
        if is_header(line) {
            if let Some((name, start)) = current.take() {
                sections.push(Section {
                    name,
                    start_line: start,
                    body: lines[start..i].join("\n"),
                });
            }
            current = Some((line.trim().to_string(), i + 1));
        }
    }
    if let Some((name, start)) = current {
        sections.push(Section {
            name,
            start_line: start,
            body: lines[start.min(lines.len())..].join("\n"),
        });
    }
    sections
}

fn find_section<'a>(sections: &'a [Section], headers: &[&str]) -> Option<&'a Section> {
    sections.iter().find(|s| headers.contains(&s.name.as_str()))
}

/// Parses the JSON body of a section; errors are reported with file line numbers.
fn parse_section_json(
    section: &Section,
    lines: &[&str],
    file_name: &str,
) -> Result<Value, CrnError> {
    if section.body.trim().is_empty() {
        return Ok(Value::Array(Vec::new()));
    }
    match serde_json::from_str::<Value>(&section.body) {
        Ok(value) => Ok(value),
        Err(e) => {
            let error_line = e.line();
            let error_column = e.column();
            // serde_json lines are 1-based within the section body
            let actual_line = section.start_line + error_line.saturating_sub(1);
            let error_msg = format!(
                "Error parsing section {} of '{}' at line {}, column {}: {}",
                section.name,
                file_name,
                actual_line + 1,
                error_column,
                e
            );
            error!("{}", error_msg);
            if actual_line < lines.len() {
                let problem_line = lines[actual_line];
                error!("Problematic line: {}", problem_line);
                if error_column >= 1 && error_column <= problem_line.len() + 1 {
                    let pointer = " ".repeat(error_column - 1) + "^";
                    error!("{}", pointer);
                }
            }
            Err(CrnError::Parse {
                line: actual_line + 1,
                column: error_column,
                message: e.to_string(),
            })
        }
    }
}

fn parse_reactions(
    value: Value,
    kind: ReactionKind,
    section: &str,
) -> Result<Vec<Reaction>, CrnError> {
    let raw: Vec<RawReaction> = serde_json::from_value(value)?;
    let mut seen_ids = HashSet::new();
    let mut reactions = Vec::with_capacity(raw.len());
    for record in raw {
        if !seen_ids.insert(record.id) {
            warn!("Duplicate reaction id {} in section {}", record.id, section);
        }
        let reaction = Reaction::from_raw(record, kind)?;
        if reaction.reactants.is_empty() || reaction.products.is_empty() {
            warn!(
                "Reaction {} ({}) has an empty side and will not appear in the network",
                reaction.id, reaction.equation
            );
        }
        reactions.push(reaction);
    }
    Ok(reactions)
}

/// Parses a mechanism document. `file_name` is only used in messages.
pub fn parse_mechanism(text: &str, file_name: &str) -> Result<Mechanism, CrnError> {
    let lines: Vec<&str> = text.lines().collect();
    let sections = split_sections(text);
    let species_section = find_section(&sections, &SPECIES_HEADERS);
    let kinetic_section = find_section(&sections, &KINETIC_HEADERS);
    let photolysis_section = find_section(&sections, &PHOTOLYSIS_HEADERS);
    if species_section.is_none() && kinetic_section.is_none() && photolysis_section.is_none() {
        return Err(CrnError::MissingSection {
            section: "SPECIES, KINETIC or PHOTOLYSIS".to_string(),
            file: file_name.to_string(),
        });
    }
    for section in &sections {
        let known = SPECIES_HEADERS
            .iter()
            .chain(KINETIC_HEADERS.iter())
            .chain(PHOTOLYSIS_HEADERS.iter())
            .any(|h| *h == section.name);
        if !known {
            warn!("Unknown section '{}' in '{}' is ignored", section.name, file_name);
        }
    }

    let kinetic = match kinetic_section {
        Some(section) => parse_reactions(
            parse_section_json(section, &lines, file_name)?,
            ReactionKind::Kinetic,
            &section.name,
        )?,
        None => Vec::new(),
    };
    let photolysis = match photolysis_section {
        Some(section) => parse_reactions(
            parse_section_json(section, &lines, file_name)?,
            ReactionKind::Photolysis,
            &section.name,
        )?,
        None => Vec::new(),
    };
    let species = match species_section {
        Some(section) => {
            let value = parse_section_json(section, &lines, file_name)?;
            let species: Vec<Species> = serde_json::from_value(value)?;
            let mut seen = HashSet::new();
            for s in &species {
                if !seen.insert(s.id.as_str()) {
                    warn!("Species '{}' is declared twice in '{}'", s.id, file_name);
                }
            }
            species
        }
        None => {
            warn!(
                "No SPECIES section in '{}', species are collected from the reactions",
                file_name
            );
            Mechanism::species_from_reactions(&kinetic, &photolysis)
        }
    };
    if species.is_empty() {
        warn!("Mechanism '{}' contains no species", file_name);
    }
    info!(
        "Successfully parsed mechanism '{}': {} species, {} kinetic and {} photolysis reactions",
        file_name,
        species.len(),
        kinetic.len(),
        photolysis.len()
    );
    Ok(Mechanism::new(species, kinetic, photolysis).with_source(file_name))
}

pub fn load_mechanism_from_file(file_name: &str) -> Result<Mechanism, CrnError> {
    let path = Path::new(file_name);
    if !path.exists() {
        return Err(CrnError::FileNotFound(file_name.to_string()));
    }
    let text = fs::read_to_string(path)?;
    parse_mechanism(&text, file_name)
}

pub fn load_default_mechanism() -> Result<Mechanism, CrnError> {
    parse_mechanism(DEFAULT_MECHANISM, DEFAULT_MECHANISM_NAME)
}

/// Loads the given file; a missing path, a nonexistent file or an unreadable one all fall
/// back to the bundled mechanism with a warning.
pub fn load_mechanism_or_default(file_name: Option<&str>) -> Result<Mechanism, CrnError> {
    match file_name {
        None => {
            warn!("No mechanism file given, using the bundled default mechanism");
        }
        Some(name) if !Path::new(name).exists() => {
            warn!(
                "Mechanism file '{}' does not exist, using the bundled default mechanism",
                name
            );
        }
        Some(name) => match load_mechanism_from_file(name) {
            Ok(mechanism) => return Ok(mechanism),
            Err(e) => {
                error!("Failed to load mechanism '{}': {}", name, e);
                warn!("Using the bundled default mechanism");
            }
        },
    }
    load_default_mechanism()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SMALL_MECHANISM: &str = r#"
SPECIES
[
  {"id": "NO", "name": "nitric oxide", "formula": "NO"},
  {"id": "NO2", "formula": "NO2"},
  {"id": "O3", "name": "ozone"},
  {"id": "O"}
]
KINETIC
[
  {"id": 1, "eq": "NO + O3 => NO2 + O2", "reactants": ["NO", "O3"], "products": ["NO2"]},
  {"id": 2, "eq": "O + O2 => O3", "flag": "M"}
]
PHOTOLYSIS
[
  {"id": 1, "eq": "NO2 + hv => NO + O"}
]
"#;

    #[test]
    fn test_split_sections() {
        let sections = split_sections(SMALL_MECHANISM);
        let names: Vec<&str> = sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["SPECIES", "KINETIC", "PHOTOLYSIS"]);
        assert!(sections[0].body.contains("nitric oxide"));
        assert!(!sections[0].body.contains("KINETIC"));
        // header is on line index 1 (after the leading empty line)
        assert_eq!(sections[0].start_line, 2);
    }

    #[test]
    fn test_parse_small_mechanism() {
        let mech = parse_mechanism(SMALL_MECHANISM, "small.crn").unwrap();
        assert_eq!(mech.species.len(), 4);
        assert_eq!(mech.species_by_id("NO2").unwrap().name, "NO2");
        assert_eq!(mech.kinetic.len(), 2);
        assert_eq!(mech.photolysis.len(), 1);
        // explicit lists win over the equation
        assert_eq!(mech.kinetic[0].products, vec!["NO2".to_string()]);
        assert_eq!(mech.kinetic[1].reactants, vec!["O".to_string(), "O2".to_string()]);
        assert_eq!(mech.kinetic[1].flag.as_deref(), Some("M"));
        assert_eq!(mech.photolysis[0].kind, ReactionKind::Photolysis);
        assert_eq!(mech.photolysis[0].reactants, vec!["NO2".to_string()]);
        assert_eq!(mech.source, "small.crn");
    }

    #[test]
    fn test_reactions_alias_and_species_from_reactions() {
        let text = "REACTIONS\n[{\"id\": 1, \"eq\": \"A + B => C\"}]\n";
        let mech = parse_mechanism(text, "alias.crn").unwrap();
        assert_eq!(mech.kinetic.len(), 1);
        assert_eq!(mech.species_ids(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_duplicate_reaction_ids_are_kept() {
        let text = r#"
KINETIC
[
  {"id": 7, "eq": "A => B"},
  {"id": 7, "eq": "B => C"}
]
"#;
        let mech = parse_mechanism(text, "dup.crn").unwrap();
        assert_eq!(mech.kinetic.len(), 2);
        assert!(mech.kinetic.iter().all(|r| r.id == 7));
        assert_eq!(mech.kinetic[1].reactants, vec!["B".to_string()]);
    }

    #[test]
    fn test_missing_sections_is_error() {
        let result = parse_mechanism("just some text\n", "empty.crn");
        assert!(matches!(result, Err(CrnError::MissingSection { .. })));
    }

    #[test]
    fn test_parse_error_reports_file_line() {
        let text = "SPECIES\n[\n  {\"id\": \"A\"},\n  {\"id\": }\n]\n";
        match parse_mechanism(text, "broken.crn") {
            Err(CrnError::Parse { line, .. }) => assert_eq!(line, 4),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SMALL_MECHANISM.as_bytes()).unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let mech = load_mechanism_from_file(&path).unwrap();
        assert_eq!(mech.kinetic.len(), 2);
        assert_eq!(mech.source, path);
    }

    #[test]
    fn test_nonexistent_file() {
        let result = load_mechanism_from_file("definitely/not/here.crn");
        assert!(matches!(result, Err(CrnError::FileNotFound(_))));
    }

    #[test]
    fn test_fallback_to_default() {
        let mech = load_mechanism_or_default(Some("definitely/not/here.crn")).unwrap();
        assert_eq!(mech.source, DEFAULT_MECHANISM_NAME);
        let mech = load_mechanism_or_default(None).unwrap();
        assert_eq!(mech.source, DEFAULT_MECHANISM_NAME);
    }

    #[test]
    fn test_fallback_on_unparseable_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"KINETIC\n[ not json ]\n").unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let mech = load_mechanism_or_default(Some(&path)).unwrap();
        assert_eq!(mech.source, DEFAULT_MECHANISM_NAME);
    }

    #[test]
    fn test_default_mechanism_is_valid() {
        let mech = load_default_mechanism().unwrap();
        assert!(!mech.species.is_empty());
        assert!(!mech.kinetic.is_empty());
        assert!(!mech.photolysis.is_empty());
        for reaction in mech.kinetic.iter().chain(mech.photolysis.iter()) {
            for id in reaction.reactants.iter().chain(reaction.products.iter()) {
                assert!(
                    mech.species_by_id(id).is_some(),
                    "species {} of reaction {} is not declared",
                    id,
                    reaction.id
                );
            }
        }
    }
}

use crate::errors::CrnError;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// photon pseudo-species written on the reactant side of photolysis equations
const PHOTON_TERMS: [&str; 2] = ["hv", "hν"];

static ARROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<=>|<->|=>|->|=").expect("valid arrow pattern"));
static PLUS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\+\s*").expect("valid plus pattern"));
/// "2NO2" -> "NO2", "0.5 O2" -> "O2", "3*OH" -> "OH"
static COEFFICIENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?)\s*\*?\s*([A-Za-z(\[].*)$").expect("valid coefficient pattern")
});

/// Splits an equation into reactant and product species ids.
/// Accepted arrows: `<=>`, `<->`, `=>`, `->`, `=`.
pub fn parse_equation(equation: &str) -> Result<(Vec<String>, Vec<String>), CrnError> {
    let sides: Vec<&str> = ARROW.splitn(equation.trim(), 2).collect();
    if sides.len() != 2 {
        return Err(CrnError::Equation(format!(
            "no reaction arrow in '{}'",
            equation
        )));
    }
    let reactants = parse_side(sides[0]);
    let products = parse_side(sides[1]);
    if reactants.is_empty() && products.is_empty() {
        return Err(CrnError::Equation(format!(
            "no species found in '{}'",
            equation
        )));
    }
    Ok((reactants, products))
}

/// species of one side of an equation, each listed once, in order of appearance
fn parse_side(side: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut species = Vec::new();
    for term in PLUS.split(side.trim()) {
        let term = term.trim();
        if term.is_empty() {
            continue;
        }
        let name = strip_coefficient(term);
        if PHOTON_TERMS.iter().any(|p| name.eq_ignore_ascii_case(p)) {
            continue;
        }
        if seen.insert(name.clone()) {
            species.push(name);
        }
    }
    species
}

fn strip_coefficient(term: &str) -> String {
    match COEFFICIENT.captures(term) {
        Some(cap) => cap[2].trim().to_string(),
        None => term.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_simple_equation() {
        let (r, p) = parse_equation("NO + O3 => NO2 + O2").unwrap();
        assert_eq!(r, strings(&["NO", "O3"]));
        assert_eq!(p, strings(&["NO2", "O2"]));
    }

    #[test]
    fn test_all_arrow_styles() {
        for eq in ["A + B = C", "A + B -> C", "A + B <=> C", "A + B <-> C", "A+B=>C"] {
            let (r, p) = parse_equation(eq).unwrap();
            assert_eq!(r, strings(&["A", "B"]), "equation {}", eq);
            assert_eq!(p, strings(&["C"]), "equation {}", eq);
        }
    }

    #[test]
    fn test_coefficients_are_stripped() {
        let (r, p) = parse_equation("2NO2 + 0.5 O2 => 3*OH + N2O5").unwrap();
        assert_eq!(r, strings(&["NO2", "O2"]));
        assert_eq!(p, strings(&["OH", "N2O5"]));
    }

    #[test]
    fn test_photon_dropped() {
        let (r, p) = parse_equation("HCHO + hv = CO + H2").unwrap();
        assert_eq!(r, strings(&["HCHO"]));
        assert_eq!(p, strings(&["CO", "H2"]));
        let (r, p) = parse_equation("O3 + hν => O1D + O2").unwrap();
        assert_eq!(r, strings(&["O3"]));
        assert_eq!(p, strings(&["O1D", "O2"]));
        let (r, _) = parse_equation("NO3 + HV -> NO + O2").unwrap();
        assert_eq!(r, strings(&["NO3"]));
    }

    #[test]
    fn test_repeated_species_kept_once() {
        let (r, p) = parse_equation("OH + OH => H2O2").unwrap();
        assert_eq!(r, strings(&["OH"]));
        assert_eq!(p, strings(&["H2O2"]));
    }

    #[test]
    fn test_empty_product_side_is_allowed() {
        let (r, p) = parse_equation("CH3O2 =>").unwrap();
        assert_eq!(r, strings(&["CH3O2"]));
        assert!(p.is_empty());
    }

    #[test]
    fn test_missing_arrow_is_error() {
        assert!(matches!(
            parse_equation("NO + O3"),
            Err(CrnError::Equation(_))
        ));
        assert!(matches!(parse_equation(" => "), Err(CrnError::Equation(_))));
    }
}

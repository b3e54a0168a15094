use crate::Network::network_builder::ReactionNetwork;
use crate::Utils::load_from_file::load_mechanism_or_default;
use crate::gui::gui_main::gui_main;
use crate::settings::{CONFIG_FILE, ViewConfig};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Interactive viewer of chemical reaction networks",
    long_about = None
)]
pub struct Cli {
    /// chemistry-mechanism file; the bundled mechanism is used when absent or missing
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

/// Loads the configuration and the mechanism, then opens the viewer window.
pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ViewConfig::load_or_default(CONFIG_FILE);
    let file = cli.file.map(|p| p.to_string_lossy().into_owned());
    let mechanism = load_mechanism_or_default(file.as_deref())?;
    let network = ReactionNetwork::new(mechanism, config.initial_kind);
    gui_main(network, config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_flag() {
        let cli = Cli::try_parse_from(["crnviz", "--file", "mech.crn"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("mech.crn")));
        let cli = Cli::try_parse_from(["crnviz", "-f", "other.crn"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("other.crn")));
    }

    #[test]
    fn test_no_flag() {
        let cli = Cli::try_parse_from(["crnviz"]).unwrap();
        assert!(cli.file.is_none());
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["crnviz", "--verbose"]).is_err());
    }
}

//! # Settings Module
//!
//! ## Purpose
//! View configuration of the network viewer: force-layout parameters, sizes used for
//! drawing and picking, the reaction kind shown at start, and the window size.
//!
//! ## Configuration File
//! Read from `crnviz_config.json` in the working directory when it exists. Every field is
//! optional; missing fields keep their defaults. A broken file is reported and ignored.
//! ```json
//! {
//!   "force_charge": 120.0,
//!   "warmup_steps": 200,
//!   "initial_kind": "photolysis"
//! }
//! ```
use crate::Mechanism::mechanism_data::ReactionKind;
use crate::errors::CrnError;
use force_graph::SimulationParameters;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "crnviz_config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub force_charge: f32,
    pub force_spring: f32,
    pub force_max: f32,
    pub node_speed: f32,
    pub damping_factor: f32,
    /// simulation steps run before the first frame
    pub warmup_steps: usize,
    /// frames the layout keeps moving after a (re)build
    pub animation_frames: usize,
    /// point radius of a species, in pixels
    pub node_radius: f32,
    /// maximal distance of a click from a node or edge, in pixels
    pub pick_radius: f32,
    pub initial_kind: ReactionKind,
    pub window_size: [f32; 2],
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            force_charge: 150.0,
            force_spring: 0.05,
            force_max: 100.0,
            node_speed: 3000.0,
            damping_factor: 0.9,
            warmup_steps: 300,
            animation_frames: 240,
            node_radius: 6.0,
            pick_radius: 10.0,
            initial_kind: ReactionKind::Kinetic,
            window_size: [1200.0, 800.0],
        }
    }
}

impl ViewConfig {
    pub fn load_config(config_file: &str) -> Result<ViewConfig, CrnError> {
        if Path::new(config_file).exists() {
            let content = fs::read_to_string(config_file)?;
            let config: ViewConfig = serde_json::from_str(&content)?;
            info!("View configuration loaded from '{}'", config_file);
            Ok(config)
        } else {
            Ok(ViewConfig::default())
        }
    }

    pub fn load_or_default(config_file: &str) -> ViewConfig {
        match Self::load_config(config_file) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring view configuration '{}': {}", config_file, e);
                ViewConfig::default()
            }
        }
    }

    pub fn simulation_parameters(&self) -> SimulationParameters {
        SimulationParameters {
            force_charge: self.force_charge,
            force_spring: self.force_spring,
            force_max: self.force_max,
            node_speed: self.node_speed,
            damping_factor: self.damping_factor,
        }
    }
}

#[allow(non_snake_case)]
pub mod Mechanism;
#[allow(non_snake_case)]
pub mod Network;
#[allow(non_snake_case)]
pub mod Utils;
pub mod cli;
pub mod errors;
pub mod gui;
pub mod settings;

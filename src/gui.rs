pub mod gui_main;

pub mod network_gui;
pub mod network_plot;

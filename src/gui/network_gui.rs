//! # Network GUI Module
//!
//! Main window of the reaction network viewer.
//!
//! ## GUI Layout
//! - **Left Panel**: mechanism source, reaction kind selector, species search and list,
//!   layout and selection buttons
//! - **Central Panel**: the network plot; clicking a species highlights it with its
//!   neighbors and reactions, clicking an edge shows the reactions joining its two species,
//!   clicking empty space clears the highlight
//! - **Bottom Panel**: scrollable log of selection events
//!
//! All state lives in `CrnApp`; nothing is kept outside the app value.
use crate::Mechanism::mechanism_data::{ReactionKind, Species};
use crate::Mechanism::record_info::{Record, RecordInfo};
use crate::Network::network_builder::ReactionNetwork;
use crate::Network::pick_dispatch::PickDispatcher;
use crate::Network::selection::{Selection, SelectionState, select};
use crate::gui::network_plot::{
    DrawnEdge, NetworkLayout, PickTarget, draw_network, edge_geometry, pick,
};
use crate::settings::ViewConfig;
use eframe::egui;
use egui_plot::Plot;
use log::info;

/// upper bound of kept log entries
const MAX_LOG_ENTRIES: usize = 500;

/// Log lines describing a selection: the picked record(s) as tables, followed by the
/// neighbors and the equations of the tied reactions.
pub fn selection_report(network: &ReactionNetwork, selection: &Selection) -> Vec<String> {
    let mut report = Vec::new();
    match selection {
        Selection::Nothing => {}
        Selection::Species(s) => {
            let species = network
                .mechanism()
                .species_by_id(&s.species)
                .cloned()
                .unwrap_or_else(|| Species::new(&s.species));
            report.push(Record::from(species).info_text());
            if s.neighbors.is_empty() {
                report.push(format!("{} has no {} neighbors", s.species, network.kind()));
            } else {
                report.push(format!("Neighbors: {}", s.neighbors.join(", ")));
            }
            let reactions = network.reactions_at(&s.reactions);
            report.push(format!("{} {} reactions:", reactions.len(), network.kind()));
            for r in reactions {
                report.push(format!("  [{}] {}", r.id, r.equation));
            }
        }
        Selection::Edge(e) => {
            let reactions = network.reactions_at(&e.reactions);
            report.push(format!(
                "Edge {} <-> {}: {} {} reactions",
                e.key.0,
                e.key.1,
                reactions.len(),
                network.kind()
            ));
            for r in reactions {
                report.push(Record::from(r.clone()).info_text());
            }
        }
    }
    report
}

pub struct CrnApp {
    network: ReactionNetwork,
    layout: NetworkLayout,
    selection: SelectionState,
    dispatcher: PickDispatcher,
    drawn_edges: Vec<DrawnEdge>,
    log: Vec<String>,
    search_filter: String,
    kind: ReactionKind,
    config: ViewConfig,
}

impl CrnApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        network: ReactionNetwork,
        config: ViewConfig,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        Self::from_network(network, config)
    }

    pub fn from_network(network: ReactionNetwork, config: ViewConfig) -> Self {
        let layout = NetworkLayout::new(&network, &config);
        let kind = network.kind();
        let mut app = Self {
            network,
            layout,
            selection: SelectionState::new(),
            dispatcher: PickDispatcher::new(),
            drawn_edges: Vec::new(),
            log: Vec::new(),
            search_filter: String::new(),
            kind,
            config,
        };
        app.push_log(format!(
            "Loaded {}: {} species, {} {} edges",
            app.network.mechanism().source,
            app.network.graph().node_count(),
            app.network.graph().edge_count(),
            app.kind
        ));
        app
    }

    fn push_log(&mut self, line: String) {
        self.log.push(line);
        if self.log.len() > MAX_LOG_ENTRIES {
            let excess = self.log.len() - MAX_LOG_ENTRIES;
            self.log.drain(..excess);
        }
    }

    fn apply_selection(&mut self, selection: Selection) {
        let report = selection_report(&self.network, &selection);
        match &selection {
            Selection::Species(s) => info!("Selected species {}", s.species),
            Selection::Edge(e) => info!("Selected edge {} <-> {}", e.key.0, e.key.1),
            Selection::Nothing => {}
        }
        self.selection.replace(selection);
        for line in report {
            self.push_log(line);
        }
    }

    /// Selection by species id; ids that are not in the network are ignored.
    pub fn select_species(&mut self, species_id: &str) {
        let Ok(selection) = select(self.network.graph(), species_id) else {
            return;
        };
        self.apply_selection(Selection::Species(selection));
    }

    pub fn handle_pick(&mut self, target: PickTarget) {
        let selection = match target {
            PickTarget::Node(i) => self.dispatcher.on_node_pick(&self.network, i),
            PickTarget::Edge(i) => self.dispatcher.on_edge_pick(&self.network, i),
            PickTarget::Empty => {
                self.selection.clear();
                None
            }
        };
        if let Some(selection) = selection {
            self.apply_selection(selection);
        }
    }

    fn switch_kind(&mut self, kind: ReactionKind) {
        self.network.set_kind(kind);
        self.kind = kind;
        self.layout = NetworkLayout::new(&self.network, &self.config);
        self.selection.clear();
        self.drawn_edges.clear();
        self.dispatcher.set_drawn_edges(Vec::new());
        self.push_log(format!(
            "Switched to {} reactions: {} edges",
            kind,
            self.network.graph().edge_count()
        ));
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    fn show_side_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("crn_side_panel")
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading("Reaction network");
                ui.label(format!("Source: {}", self.network.mechanism().source));
                ui.label(format!(
                    "{} species, {} edges",
                    self.network.graph().node_count(),
                    self.network.graph().edge_count()
                ));
                ui.separator();

                let mut kind = self.kind;
                ui.horizontal(|ui| {
                    for k in ReactionKind::ALL {
                        ui.selectable_value(&mut kind, k, k.as_str());
                    }
                });
                if kind != self.kind {
                    self.switch_kind(kind);
                }
                ui.separator();

                ui.horizontal(|ui| {
                    ui.label("Search:");
                    ui.text_edit_singleline(&mut self.search_filter);
                });
                let filter = self.search_filter.to_lowercase();
                let mut clicked: Option<String> = None;
                egui::ScrollArea::vertical()
                    .max_height(400.0)
                    .show(ui, |ui| {
                        let selected = self.selection.selected_species();
                        for id in self.network.graph().node_ids() {
                            let label = match self.network.mechanism().species_by_id(id) {
                                Some(s) if s.name != s.id => format!("{} ({})", s.id, s.name),
                                _ => id.to_string(),
                            };
                            if !filter.is_empty() && !label.to_lowercase().contains(&filter) {
                                continue;
                            }
                            if ui.selectable_label(selected == Some(id), label).clicked() {
                                clicked = Some(id.to_string());
                            }
                        }
                    });
                if let Some(id) = clicked {
                    self.select_species(&id);
                }
                ui.separator();

                ui.horizontal(|ui| {
                    if ui.button("Reset layout").clicked() {
                        self.layout = NetworkLayout::new(&self.network, &self.config);
                    }
                    let settled = !self.layout.is_running();
                    if ui
                        .add_enabled(settled, egui::Button::new("Resume layout"))
                        .clicked()
                    {
                        self.layout.resume(self.config.animation_frames);
                    }
                });
                ui.label(if self.layout.is_running() {
                    "Layout: moving"
                } else {
                    "Layout: settled"
                });
                if ui.button("Clear selection").clicked() {
                    self.selection.clear();
                }
            });
    }

    fn show_log_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("crn_log_panel")
            .resizable(true)
            .default_height(200.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Selection log");
                    if ui.button("Clear log").clicked() {
                        self.log.clear();
                    }
                });
                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for line in &self.log {
                            ui.label(egui::RichText::new(line).monospace());
                        }
                    });
            });
    }

    fn show_plot(&mut self, ctx: &egui::Context) {
        self.drawn_edges = edge_geometry(&self.network, self.layout.positions(), &self.selection);
        self.dispatcher
            .set_drawn_edges(self.drawn_edges.iter().map(|d| d.edge).collect());
        let mut target = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            let plot_response = Plot::new("crn_plot")
                .data_aspect(1.0)
                .show_axes(false)
                .show_grid(false)
                .show_x(false)
                .show_y(false)
                .show(ui, |plot_ui| {
                    draw_network(
                        plot_ui,
                        &self.network,
                        self.layout.positions(),
                        &self.drawn_edges,
                        &self.selection,
                        &self.config,
                    );
                    plot_ui.pointer_coordinate()
                });
            if plot_response.response.clicked() {
                if let Some(point) = plot_response.inner {
                    let units_per_px = plot_response.transform.dvalue_dpos()[0].abs();
                    let max_dist = self.config.pick_radius as f64 * units_per_px;
                    target = Some(pick(
                        self.layout.positions(),
                        &self.drawn_edges,
                        [point.x, point.y],
                        max_dist,
                    ));
                }
            }
        });
        if let Some(target) = target {
            self.handle_pick(target);
        }
    }
}

impl eframe::App for CrnApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show_side_panel(ctx);
        self.show_log_panel(ctx);
        self.show_plot(ctx);
        let dt = ctx.input(|i| i.stable_dt).min(0.1);
        if self.layout.tick(dt) {
            ctx.request_repaint();
        }
    }
}

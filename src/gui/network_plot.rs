//! Layout, drawing and picking of the reaction network on an `egui_plot` canvas.
//!
//! Node positions come from a force simulation (`force_graph`) whose nodes carry the
//! position of the species in the network's node order. Plot coordinates are the
//! simulation coordinates with the y axis flipped.
use crate::Network::network_builder::ReactionNetwork;
use crate::Network::selection::SelectionState;
use crate::settings::ViewConfig;
use eframe::egui::{Align2, Color32, RichText};
use egui_plot::{Line, PlotPoint, PlotPoints, PlotUi, Points, Text};
use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData};
use petgraph::graph::EdgeIndex;
use std::f64::consts::PI;

const WARMUP_DT: f32 = 0.035;
const NODE_MASS: f32 = 10.0;
/// radius of the circle drawn for a self-loop, in layout units
const LOOP_RADIUS: f64 = 12.0;
const LOOP_SEGMENTS: usize = 16;

const EDGE_COLOR: Color32 = Color32::from_rgb(100, 180, 255);
const EDGE_DIMMED: Color32 = Color32::from_rgb(60, 70, 90);
const EDGE_HIGHLIGHT: Color32 = Color32::from_rgb(255, 90, 60);
const NODE_COLOR: Color32 = Color32::from_rgb(31, 119, 180);
const NODE_DIMMED: Color32 = Color32::from_rgb(70, 80, 100);
const NODE_NEIGHBOR: Color32 = Color32::from_rgb(255, 127, 14);
const NODE_SELECTED: Color32 = Color32::from_rgb(255, 215, 0);
const LABEL_COLOR: Color32 = Color32::from_rgb(220, 220, 220);

/// edge as drawn: its graph index and the polyline used for picking
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnEdge {
    pub edge: EdgeIndex,
    pub points: Vec<[f64; 2]>,
}

/// what a click landed on; indices are node positions or positions in the drawn edge list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickTarget {
    Node(usize),
    Edge(usize),
    Empty,
}

pub struct NetworkLayout {
    graph: ForceGraph<usize, ()>,
    positions: Vec<[f64; 2]>,
    frames_left: usize,
}

impl NetworkLayout {
    pub fn new(network: &ReactionNetwork, config: &ViewConfig) -> Self {
        let species_graph = network.graph();
        let n = species_graph.node_count();
        let mut graph = ForceGraph::new(config.simulation_parameters());
        let radius = 100.0 + 10.0 * (n as f64).sqrt();
        let mut force_nodes: Vec<DefaultNodeIdx> = Vec::with_capacity(n);
        for i in 0..n {
            let angle = (i as f64) * 2.0 * PI / n.max(1) as f64;
            let idx = graph.add_node(NodeData {
                x: (radius * angle.cos()) as f32,
                y: (radius * angle.sin()) as f32,
                mass: NODE_MASS,
                is_anchor: false,
                user_data: i,
            });
            force_nodes.push(idx);
        }
        for edge in species_graph.graph.edge_indices() {
            if let Some((a, b)) = species_graph.graph.edge_endpoints(edge) {
                // self-loops exert no spring force
                if a != b {
                    graph.add_edge(
                        force_nodes[a.index()],
                        force_nodes[b.index()],
                        EdgeData::default(),
                    );
                }
            }
        }
        for _ in 0..config.warmup_steps {
            graph.update(WARMUP_DT);
        }
        let mut layout = Self {
            graph,
            positions: vec![[0.0, 0.0]; n],
            frames_left: config.animation_frames,
        };
        layout.refresh_positions();
        layout
    }

    fn refresh_positions(&mut self) {
        let positions = &mut self.positions;
        self.graph.visit_nodes(|node| {
            let i = node.data.user_data;
            if i < positions.len() {
                positions[i] = [node.x() as f64, -(node.y() as f64)];
            }
        });
    }

    /// Advances the simulation by one frame. Returns true while the layout is still moving.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.frames_left == 0 {
            return false;
        }
        self.graph.update(dt);
        self.refresh_positions();
        self.frames_left -= 1;
        true
    }

    pub fn is_running(&self) -> bool {
        self.frames_left > 0
    }

    pub fn resume(&mut self, frames: usize) {
        self.frames_left = frames;
    }

    /// position of every species, indexed by node position
    pub fn positions(&self) -> &[[f64; 2]] {
        &self.positions
    }
}

fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt()
}

/// distance from `p` to the segment `a`-`b`
pub fn segment_distance(p: [f64; 2], a: [f64; 2], b: [f64; 2]) -> f64 {
    let (dx, dy) = (b[0] - a[0], b[1] - a[1]);
    let len2 = dx * dx + dy * dy;
    if len2 < f64::EPSILON {
        return distance(p, a);
    }
    let t = (((p[0] - a[0]) * dx + (p[1] - a[1]) * dy) / len2).clamp(0.0, 1.0);
    distance(p, [a[0] + t * dx, a[1] + t * dy])
}

fn polyline_distance(p: [f64; 2], points: &[[f64; 2]]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [single] => distance(p, *single),
        _ => points
            .windows(2)
            .map(|w| segment_distance(p, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

pub fn nearest_node(positions: &[[f64; 2]], point: [f64; 2], max_dist: f64) -> Option<usize> {
    positions
        .iter()
        .enumerate()
        .map(|(i, &pos)| (i, distance(point, pos)))
        .filter(|&(_, d)| d <= max_dist)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

pub fn nearest_edge(edges: &[DrawnEdge], point: [f64; 2], max_dist: f64) -> Option<usize> {
    edges
        .iter()
        .enumerate()
        .map(|(i, e)| (i, polyline_distance(point, &e.points)))
        .filter(|&(_, d)| d <= max_dist)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// Nodes win over edges; a click near nothing is `Empty`.
pub fn pick(
    positions: &[[f64; 2]],
    edges: &[DrawnEdge],
    point: [f64; 2],
    max_dist: f64,
) -> PickTarget {
    if let Some(i) = nearest_node(positions, point, max_dist) {
        return PickTarget::Node(i);
    }
    match nearest_edge(edges, point, max_dist) {
        Some(i) => PickTarget::Edge(i),
        None => PickTarget::Empty,
    }
}

fn loop_points(center: [f64; 2]) -> Vec<[f64; 2]> {
    let c = [center[0], center[1] + LOOP_RADIUS];
    (0..=LOOP_SEGMENTS)
        .map(|k| {
            let angle = (k as f64) * 2.0 * PI / LOOP_SEGMENTS as f64 - PI / 2.0;
            [c[0] + LOOP_RADIUS * angle.cos(), c[1] + LOOP_RADIUS * angle.sin()]
        })
        .collect()
}

/// Polylines of all edges in drawing order: plain edges first, highlighted edges on top.
pub fn edge_geometry(
    network: &ReactionNetwork,
    positions: &[[f64; 2]],
    selection: &SelectionState,
) -> Vec<DrawnEdge> {
    let graph = &network.graph().graph;
    let highlighted = selection.highlighted_edges();
    let mut plain = Vec::new();
    let mut on_top = Vec::new();
    for edge in graph.edge_indices() {
        let Some((a, b)) = graph.edge_endpoints(edge) else {
            continue;
        };
        let (Some(&pa), Some(&pb)) = (positions.get(a.index()), positions.get(b.index())) else {
            continue;
        };
        let points = if a == b { loop_points(pa) } else { vec![pa, pb] };
        let drawn = DrawnEdge { edge, points };
        if highlighted.contains(&edge) {
            on_top.push(drawn);
        } else {
            plain.push(drawn);
        }
    }
    plain.extend(on_top);
    plain
}

/// Draws edges, then nodes with labels. Colors follow the current selection.
pub fn draw_network(
    plot_ui: &mut PlotUi<'_>,
    network: &ReactionNetwork,
    positions: &[[f64; 2]],
    edges: &[DrawnEdge],
    selection: &SelectionState,
    config: &ViewConfig,
) {
    let highlighted_edges = selection.highlighted_edges();
    let highlighted_species = selection.highlighted_species();
    let active = !selection.is_empty();

    for drawn in edges {
        let (color, width) = if highlighted_edges.contains(&drawn.edge) {
            (EDGE_HIGHLIGHT, 2.5)
        } else if active {
            (EDGE_DIMMED, 1.0)
        } else {
            (EDGE_COLOR, 1.5)
        };
        plot_ui.line(
            Line::new("", PlotPoints::from(drawn.points.clone()))
                .color(color)
                .width(width),
        );
    }

    let selected = selection.selected_species();
    for (i, id) in network.graph().node_ids().into_iter().enumerate() {
        let Some(&pos) = positions.get(i) else {
            continue;
        };
        let color = if selected == Some(id) {
            NODE_SELECTED
        } else if highlighted_species.contains(id) {
            if selected.is_some() { NODE_NEIGHBOR } else { NODE_SELECTED }
        } else if active {
            NODE_DIMMED
        } else {
            NODE_COLOR
        };
        plot_ui.points(
            Points::new(id, vec![pos])
                .radius(config.node_radius)
                .color(color)
                .filled(true),
        );
        let label_color = if active && !highlighted_species.contains(id) {
            NODE_DIMMED
        } else {
            LABEL_COLOR
        };
        plot_ui.text(
            Text::new(
                id,
                PlotPoint::new(pos[0], pos[1] + 1.5 * config.node_radius as f64),
                RichText::new(id).size(12.0).color(label_color),
            )
            .anchor(Align2::CENTER_BOTTOM),
        );
    }
}

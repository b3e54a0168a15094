use crate::Network::network_builder::ReactionNetwork;
use crate::gui::network_gui::CrnApp;
use crate::settings::ViewConfig;
use eframe::egui;
use eframe::egui::IconData;

pub fn gui_main(network: ReactionNetwork, config: ViewConfig) -> Result<(), eframe::Error> {
    let icon = create_programmatic_icon();
    let title = format!("Reaction network: {}", network.mechanism().source);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_title(title)
            .with_icon(icon),
        ..Default::default()
    };
    eframe::run_native(
        "CRN viewer",
        options,
        Box::new(move |cc: &eframe::CreationContext<'_>| {
            Ok(Box::new(CrnApp::new(cc, network, config)))
        }),
    )
}

/// three small nodes joined by edges, drawn into a 32x32 RGBA buffer
fn create_programmatic_icon() -> IconData {
    let size = 32;
    let mut rgba = vec![0u8; size * size * 4];
    let nodes = [(8.0_f32, 24.0_f32), (24.0, 24.0), (16.0, 8.0)];
    for y in 0..size {
        for x in 0..size {
            let idx = (y * size + x) * 4;
            let (px, py) = (x as f32, y as f32);
            let on_node = nodes
                .iter()
                .any(|&(cx, cy)| ((px - cx).powi(2) + (py - cy).powi(2)).sqrt() < 4.5);
            let on_edge = (0..nodes.len()).any(|i| {
                let (ax, ay) = nodes[i];
                let (bx, by) = nodes[(i + 1) % nodes.len()];
                let (dx, dy) = (bx - ax, by - ay);
                let t = (((px - ax) * dx + (py - ay) * dy) / (dx * dx + dy * dy)).clamp(0.0, 1.0);
                ((px - ax - t * dx).powi(2) + (py - ay - t * dy).powi(2)).sqrt() < 1.2
            });
            if on_node {
                rgba[idx] = 255;
                rgba[idx + 1] = 200;
                rgba[idx + 2] = 0;
                rgba[idx + 3] = 255;
            } else if on_edge {
                rgba[idx] = 100;
                rgba[idx + 1] = 180;
                rgba[idx + 2] = 255;
                rgba[idx + 3] = 255;
            }
        }
    }
    IconData {
        rgba,
        width: size as u32,
        height: size as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_programmatic_icon() {
        let icon = create_programmatic_icon();
        assert_eq!(icon.width, 32);
        assert_eq!(icon.rgba.len(), 32 * 32 * 4);
        // node centers are opaque, corners transparent
        let center = (24 * 32 + 8) * 4;
        assert_eq!(icon.rgba[center + 3], 255);
        assert_eq!(icon.rgba[3], 0);
    }
}

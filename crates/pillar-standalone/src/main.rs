use std::path::PathBuf;

use eframe::egui;
use log::{info, warn};
use pillar_gui::{load_config, theme, PillarBackground, PillarConfig};

fn main() -> eframe::Result<()> {
    env_logger::init();
    info!("Starting Light Pillar");

    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => match load_config(&path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Could not load {}: {e}; using defaults", path.display());
                PillarConfig::default()
            }
        },
        None => PillarConfig::default(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([320.0, 240.0]),
        ..Default::default()
    };

    let title = config.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            theme::apply(&cc.egui_ctx);
            Ok(Box::new(PillarApp::new(&config)))
        }),
    )
}

struct PillarApp {
    background: PillarBackground,
    title: String,
}

impl PillarApp {
    fn new(config: &PillarConfig) -> Self {
        Self {
            background: PillarBackground::new(config),
            title: config.title.clone(),
        }
    }
}

impl eframe::App for PillarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.background.show(ctx);

        // Transparent panel so the pillar stays visible behind the content.
        egui::CentralPanel::default()
            .frame(egui::Frame::default())
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height() * 0.4);
                    ui.heading(egui::RichText::new(&self.title).size(42.0).strong());
                });
            });
    }
}

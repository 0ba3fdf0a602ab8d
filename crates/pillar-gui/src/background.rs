use egui::LayerId;
use log::info;
use pillar_render::{LightPillar, ManualHost, Size};

use crate::config::PillarConfig;
use crate::surface::EguiSurface;

/// The light pillar hosted as the backdrop of an egui window.
///
/// Paints on the background layer, which sits behind every panel and window
/// and never receives pointer input. Each egui pass is one display refresh:
/// pending resizes and the due frame are serviced, then another repaint is
/// requested so the animation stays paced to the display.
pub struct PillarBackground {
    pillar: LightPillar,
    host: ManualHost,
    overfill: f32,
    active: bool,
}

impl PillarBackground {
    pub fn new(config: &PillarConfig) -> Self {
        let pillar = match config.seed {
            Some(seed) => {
                info!("light pillar seeded with {seed}");
                LightPillar::seeded(seed)
            }
            None => LightPillar::new(),
        };
        Self {
            pillar,
            host: ManualHost::default(),
            overfill: config.overfill,
            active: true,
        }
    }

    /// Run one refresh of the backdrop.
    pub fn show(&mut self, ctx: &egui::Context) {
        if !self.active {
            return;
        }
        let rect = ctx.screen_rect();
        let painter = ctx.layer_painter(LayerId::background());
        let mut surface = EguiSurface::new(&painter, rect, self.overfill);

        self.host.set_viewport(Size::new(rect.width(), rect.height()));

        if !self.pillar.is_mounted() {
            // The mount reads the current size itself.
            self.host.take_resize();
            self.pillar.mount(&mut self.host, &mut surface);
        } else {
            if self.host.take_resize() {
                self.pillar.handle_resize(&mut self.host, &mut surface);
            }
            if self.host.take_frame() {
                self.pillar.on_animation_frame(&mut self.host, &mut surface);
            }
        }

        if self.host.frame_pending() {
            ctx.request_repaint();
        }
    }

    /// Stop animating and release the host registrations. Later calls to
    /// [`PillarBackground::show`] paint nothing.
    pub fn unmount(&mut self) {
        self.active = false;
        self.pillar.unmount();
    }

    pub fn pillar(&self) -> &LightPillar {
        &self.pillar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Context, Pos2, RawInput, Shape};

    fn input(width: f32, height: f32) -> RawInput {
        RawInput {
            screen_rect: Some(egui::Rect::from_min_size(Pos2::ZERO, egui::vec2(width, height))),
            ..Default::default()
        }
    }

    fn seeded() -> PillarBackground {
        PillarBackground::new(&PillarConfig {
            seed: Some(1),
            ..Default::default()
        })
    }

    #[test]
    fn test_first_pass_paints_pillar() {
        let ctx = Context::default();
        let mut background = seeded();

        let output = ctx.run(input(800.0, 600.0), |ctx| background.show(ctx));

        let lines = output
            .shapes
            .iter()
            .filter(|clipped| matches!(clipped.shape, Shape::Path(_)))
            .count();
        let meshes = output
            .shapes
            .iter()
            .filter(|clipped| matches!(clipped.shape, Shape::Mesh(_)))
            .count();
        assert!(lines >= pillar_core::RAY_COUNT);
        assert_eq!(meshes, 1);
        assert!(background.pillar().is_mounted());
        assert_eq!(background.pillar().frames(), 1);
    }

    #[test]
    fn test_each_pass_is_one_frame() {
        let ctx = Context::default();
        let mut background = seeded();
        for _ in 0..4 {
            let _ = ctx.run(input(800.0, 600.0), |ctx| background.show(ctx));
        }
        assert_eq!(background.pillar().frames(), 4);
        assert_eq!(background.pillar().field().generation(), 1);
    }

    #[test]
    fn test_window_resize_regenerates() {
        let ctx = Context::default();
        let mut background = seeded();
        let _ = ctx.run(input(800.0, 600.0), |ctx| background.show(ctx));
        let _ = ctx.run(input(1024.0, 768.0), |ctx| background.show(ctx));

        let pillar = background.pillar();
        assert_eq!(pillar.field().generation(), 2);
        assert_eq!(pillar.state().viewport.size, Size::new(1024.0, 768.0));
    }

    #[test]
    fn test_unmount_stops_painting() {
        let ctx = Context::default();
        let mut background = seeded();
        let _ = ctx.run(input(800.0, 600.0), |ctx| background.show(ctx));
        background.unmount();

        let output = ctx.run(input(800.0, 600.0), |ctx| background.show(ctx));
        assert!(output.shapes.is_empty());
        assert!(!background.pillar().is_mounted());
        assert_eq!(background.pillar().frames(), 1);
    }
}

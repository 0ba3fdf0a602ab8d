use egui::{Color32, Stroke};

// Violet palette matching the pillar backdrop
const PANEL: Color32 = Color32::from_rgba_premultiplied(18, 8, 36, 220);
const SURFACE: Color32 = Color32::from_rgb(36, 22, 64);
const SURFACE_HOVER: Color32 = Color32::from_rgb(58, 36, 102);
const FOREGROUND: Color32 = Color32::from_rgb(240, 234, 255);
const MUTED: Color32 = Color32::from_rgb(150, 132, 190);
const VIOLET: Color32 = Color32::from_rgb(139, 92, 246);
const PINK: Color32 = Color32::from_rgb(236, 72, 153);
const RED: Color32 = Color32::from_rgb(248, 113, 113);
const AMBER: Color32 = Color32::from_rgb(251, 191, 36);
const EXTREME_BG: Color32 = Color32::from_rgb(9, 0, 20);

/// Apply the dark violet theme to the egui context.
///
/// The central panel is fully transparent so the pillar on the background
/// layer shows through; windows get a translucent fill.
pub fn apply(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();

    visuals.panel_fill = Color32::TRANSPARENT;
    visuals.window_fill = PANEL;
    visuals.faint_bg_color = SURFACE;
    visuals.extreme_bg_color = EXTREME_BG;

    visuals.selection.bg_fill = VIOLET;
    visuals.selection.stroke = Stroke::new(1.0, FOREGROUND);

    visuals.hyperlink_color = PINK;
    visuals.warn_fg_color = AMBER;
    visuals.error_fg_color = RED;

    visuals.widgets.inactive.bg_fill = SURFACE;
    visuals.widgets.inactive.weak_bg_fill = SURFACE;
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, MUTED);

    visuals.widgets.hovered.bg_fill = SURFACE_HOVER;
    visuals.widgets.hovered.weak_bg_fill = SURFACE_HOVER;
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.5, FOREGROUND);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, VIOLET);

    visuals.widgets.active.bg_fill = VIOLET;
    visuals.widgets.active.weak_bg_fill = VIOLET;
    visuals.widgets.active.fg_stroke = Stroke::new(2.0, FOREGROUND);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, PINK);

    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, FOREGROUND);
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(0.0, SURFACE);

    visuals.window_stroke = Stroke::new(1.0, VIOLET.gamma_multiply(0.5));

    ctx.set_visuals(visuals);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panels_let_backdrop_through() {
        let ctx = egui::Context::default();
        apply(&ctx);
        let visuals = ctx.style().visuals.clone();
        assert_eq!(visuals.panel_fill, Color32::TRANSPARENT);
        assert!(visuals.dark_mode);
    }
}

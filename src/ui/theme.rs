use egui::{Color32, Rounding, Stroke, Visuals};

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(24, 24, 32);
pub const BG_PANEL: Color32 = Color32::from_rgb(30, 30, 40);
pub const BG_HEADER: Color32 = Color32::from_rgb(34, 37, 48);
pub const BG_FIELD: Color32 = Color32::from_rgb(20, 20, 28);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(80, 140, 220, 45);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(50, 52, 64);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(155, 160, 178);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 105, 120);

pub const ACCENT: Color32 = Color32::from_rgb(80, 140, 220);
pub const START: Color32 = Color32::from_rgb(52, 168, 83);
pub const STOP: Color32 = Color32::from_rgb(229, 57, 53);
pub const RESET: Color32 = Color32::from_rgb(23, 162, 184);
pub const PROGRESS_FILL: Color32 = Color32::from_rgb(66, 133, 244);
pub const PROGRESS_DONE: Color32 = Color32::from_rgb(52, 168, 83);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const STATUS_BAR_HEIGHT: f32 = 24.0;
pub const ROW_HEIGHT: f32 = 28.0;
pub const FIELD_HEIGHT: f32 = 26.0;
pub const BUTTON_HEIGHT: f32 = 32.0;

pub const CORNER_RADIUS: f32 = 6.0;

// ── Apply custom visuals ─────────────────────────────────────────────────────

fn widget(visuals: &mut egui::style::WidgetVisuals, fill: Color32, outline: Color32, text: Color32) {
    visuals.bg_fill = fill;
    visuals.weak_bg_fill = fill;
    visuals.bg_stroke = Stroke::new(1.0, outline);
    visuals.fg_stroke = Stroke::new(1.0, text);
    visuals.rounding = Rounding::same(CORNER_RADIUS);
}

/// Dark visuals where the timer colors double as interaction cues: hover
/// outlines use the progress blue, pressed widgets the start green and
/// validation text the stop red.
pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_HEADER;
    visuals.faint_bg_color = BG_HEADER;
    visuals.extreme_bg_color = BG_FIELD;

    let w = &mut visuals.widgets;
    widget(&mut w.noninteractive, BG_PANEL, BORDER_SUBTLE, TEXT_SECONDARY);
    widget(&mut w.inactive, BG_HEADER, BORDER_SUBTLE, TEXT_PRIMARY);
    widget(&mut w.hovered, BG_HEADER, PROGRESS_FILL, TEXT_PRIMARY);
    widget(&mut w.active, BG_DARK, START, Color32::WHITE);
    widget(&mut w.open, BG_DARK, ACCENT, TEXT_PRIMARY);
    w.active.fg_stroke.width = 2.0;

    // Progress bars and text selection share this fill.
    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, PROGRESS_FILL);

    visuals.hyperlink_color = RESET;
    visuals.error_fg_color = STOP;

    visuals.window_rounding = Rounding::same(CORNER_RADIUS * 1.5);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.striped = false;

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(10.0, 8.0);
    style.spacing.button_padding = egui::vec2(14.0, 6.0);
    style.spacing.interact_size.y = FIELD_HEIGHT;
    ctx.set_style(style);
}

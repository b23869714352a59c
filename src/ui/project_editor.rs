use crate::model::UnitField;
use crate::tracker::{FieldBuffers, ProjectView};
use crate::ui::theme;
use egui::{Color32, RichText, Ui};
use egui_phosphor::regular as icons;

/// Actions the editor can request.
pub enum EditorAction {
    NameChanged,
    DescriptionChanged,
    Finalize(UnitField),
    ToggleTimer,
    Reset,
}

fn field_label(ui: &mut Ui, text: &str) {
    ui.label(
        RichText::new(text)
            .size(10.0)
            .color(theme::TEXT_DIM)
            .strong(),
    );
}

/// Render the editor for the selected project. Buffers are edited in place;
/// anything that needs the store comes back as an action.
pub fn show_project_editor(
    fields: &mut FieldBuffers,
    view: Option<&ProjectView>,
    ui: &mut Ui,
) -> Vec<EditorAction> {
    let mut actions = Vec::new();

    // ── Name ────────────────────────────────────────────────────────────
    field_label(ui, "Project Name");
    let name = ui.add_sized(
        [ui.available_width(), theme::FIELD_HEIGHT],
        egui::TextEdit::singleline(&mut fields.name)
            .hint_text("Project name...")
            .font(egui::FontId::proportional(14.0)),
    );
    if name.changed() {
        actions.push(EditorAction::NameChanged);
    }

    // ── Description ─────────────────────────────────────────────────────
    field_label(ui, "Description");
    let description = ui.add_sized(
        [ui.available_width(), 80.0],
        egui::TextEdit::multiline(&mut fields.description).hint_text("Notes about this project..."),
    );
    if description.changed() {
        actions.push(EditorAction::DescriptionChanged);
    }

    ui.add_space(4.0);

    // ── Units ───────────────────────────────────────────────────────────
    ui.columns(2, |cols| {
        let (left, right) = cols.split_at_mut(1);
        for (ui, field, text) in [
            (&mut left[0], UnitField::Total, &mut fields.total),
            (&mut right[0], UnitField::Current, &mut fields.current),
        ] {
            field_label(ui, field.label());
            let resp = ui.add_sized(
                [ui.available_width(), theme::FIELD_HEIGHT],
                egui::TextEdit::singleline(text),
            );
            if resp.lost_focus() {
                actions.push(EditorAction::Finalize(field));
            }
        }
    });

    ui.add_space(10.0);

    // ── Progress ────────────────────────────────────────────────────────
    let (percentage, label, etc, running) = match view {
        Some(v) => (v.percentage, v.percentage_label(), v.etc.to_string(), v.running),
        None => (0.0, "0.0%".to_string(), "ETC: --:--:--".to_string(), false),
    };
    let fill = if percentage >= 100.0 {
        theme::PROGRESS_DONE
    } else {
        theme::PROGRESS_FILL
    };
    ui.add(
        egui::ProgressBar::new((percentage / 100.0) as f32)
            .desired_height(22.0)
            .fill(fill),
    );
    ui.horizontal(|ui| {
        ui.label(RichText::new(label).size(18.0).strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(etc)
                    .size(15.0)
                    .color(theme::TEXT_SECONDARY),
            );
        });
    });

    ui.add_space(10.0);

    // ── Timer controls ──────────────────────────────────────────────────
    ui.horizontal(|ui| {
        let width = (ui.available_width() - ui.spacing().item_spacing.x) / 2.0;
        let (icon, color) = if running {
            (icons::PAUSE, theme::STOP)
        } else {
            (icons::PLAY, theme::START)
        };
        let button_label = view.map_or("Start Timer", ProjectView::button_label);
        let toggle = egui::Button::new(
            RichText::new(format!("{}  {}", icon, button_label))
                .color(Color32::WHITE)
                .size(13.0),
        )
        .fill(color)
        .rounding(egui::Rounding::same(5.0));
        if ui.add_sized([width, theme::BUTTON_HEIGHT], toggle).clicked() {
            actions.push(EditorAction::ToggleTimer);
        }

        let reset = egui::Button::new(
            RichText::new(format!("{}  Reset Project", icons::ARROW_COUNTER_CLOCKWISE))
                .color(Color32::WHITE)
                .size(13.0),
        )
        .fill(theme::RESET)
        .rounding(egui::Rounding::same(5.0));
        if ui.add_sized([width, theme::BUTTON_HEIGHT], reset).clicked() {
            actions.push(EditorAction::Reset);
        }
    });

    actions
}

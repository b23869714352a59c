use crate::model::Project;
use crate::ui::theme;
use egui::{Color32, RichText, Ui};
use egui_phosphor::regular as icons;
use uuid::Uuid;

/// Actions that the project list can request.
pub enum ProjectListAction {
    None,
    Select(Uuid),
    Add,
    Delete,
}

/// Render the left-side project list with its add/delete buttons.
pub fn show_project_list(
    projects: &[Project],
    selected: Option<Uuid>,
    ui: &mut Ui,
) -> ProjectListAction {
    let mut action = ProjectListAction::None;

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Projects")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({})", projects.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        let half = (ui.available_width() - ui.spacing().item_spacing.x) / 2.0;
        let add = egui::Button::new(
            RichText::new(format!("{}  Add", icons::PLUS)).color(Color32::WHITE),
        )
        .fill(theme::ACCENT)
        .rounding(egui::Rounding::same(5.0));
        if ui.add_sized([half, theme::ROW_HEIGHT], add).clicked() {
            action = ProjectListAction::Add;
        }
        let delete = egui::Button::new(
            RichText::new(format!("{}  Delete", icons::TRASH)).color(Color32::WHITE),
        )
        .fill(theme::STOP)
        .rounding(egui::Rounding::same(5.0));
        if ui
            .add_enabled_ui(selected.is_some(), |ui| ui.add_sized([half, theme::ROW_HEIGHT], delete))
            .inner
            .clicked()
        {
            action = ProjectListAction::Delete;
        }
    });

    ui.add_space(6.0);
    ui.separator();
    ui.add_space(2.0);

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for project in projects {
                let is_selected = selected == Some(project.id);
                let marker = if project.is_running {
                    format!("{} ", icons::TIMER)
                } else {
                    String::new()
                };
                let text = RichText::new(format!("{}{}", marker, project.name))
                    .size(12.5)
                    .color(if is_selected {
                        theme::TEXT_PRIMARY
                    } else {
                        theme::TEXT_SECONDARY
                    });
                let resp = ui.add_sized(
                    [ui.available_width(), theme::ROW_HEIGHT],
                    egui::SelectableLabel::new(is_selected, text),
                );
                if resp.clicked() && !is_selected {
                    action = ProjectListAction::Select(project.id);
                }
            }
        });

    action
}

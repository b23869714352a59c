use crate::app::ProgressApp;
use egui::{menu, RichText, Ui};

/// Render the top menu bar.
pub fn show_toolbar(app: &mut ProgressApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  Project  ").size(13.0), |ui| {
            if ui.button("  Add Project").clicked() {
                app.add_project();
                ui.close_menu();
            }
            if ui.button("  Delete Project").clicked() {
                ui.close_menu();
                app.delete_selected();
            }
            if ui.button("  Reset Project").clicked() {
                app.reset_selected();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Quit").clicked() {
                ui.close_menu();
                app.quit(ui.ctx());
            }
        });

        ui.menu_button(RichText::new("  Help  ").size(13.0), |ui| {
            if ui.button("  Open Data Folder").clicked() {
                app.open_data_folder();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Right-aligned data file name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let file = app
                .data_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(not saved)".to_string());
            ui.label(RichText::new(file).size(11.0).weak());
        });
    });
}

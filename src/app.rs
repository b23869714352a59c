use std::path::{Path, PathBuf};
use std::time::Instant;

use rfd::MessageLevel;
use uuid::Uuid;

use crate::config::AppSettings;
use crate::io::{self, PersistError};
use crate::model::project::unix_now;
use crate::model::{FieldNotice, ProjectStore, TimerTransition, UnitField};
use crate::tracker::{Tracker, TrackerError};
use crate::ui;

/// Main application state.
pub struct ProgressApp {
    pub tracker: Tracker,
    pub settings: AppSettings,
    pub data_file: Option<PathBuf>,

    // Dialog state
    pub show_about: bool,

    // Status message
    pub status_message: String,

    last_tick: Option<Instant>,
    saved: bool,
}

impl ProgressApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: AppSettings) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);
        ui::theme::apply_theme(&cc.egui_ctx);

        let data_file = match settings.data_file.clone() {
            Some(path) => Ok(path),
            None => io::file::default_data_file(),
        };
        let (store, data_file) = match data_file {
            Ok(path) => (Self::load_store(&path), Some(path)),
            Err(e) => {
                tracing::error!(error = %e, "cannot locate data file");
                ui::dialogs::show_message(MessageLevel::Error, "Load Error", &e.to_string());
                (ProjectStore::new(), None)
            }
        };

        let status_message = format!("{} projects loaded", store.len());
        Self {
            tracker: Tracker::new(store),
            settings,
            data_file,
            show_about: false,
            status_message,
            last_tick: None,
            saved: false,
        }
    }

    fn load_store(path: &Path) -> ProjectStore {
        match io::load_projects(path) {
            Ok(projects) => ProjectStore::from_projects(projects),
            Err(e) => {
                tracing::error!(error = %e, "loading projects failed, starting empty");
                let level = match e {
                    PersistError::Decode { .. } => MessageLevel::Warning,
                    _ => MessageLevel::Error,
                };
                let text = match e {
                    PersistError::Decode { .. } => e.to_string(),
                    _ => format!("An unexpected error occurred while loading projects: {}", e),
                };
                ui::dialogs::show_message(level, "Load Error", &text);
                ProjectStore::new()
            }
        }
    }

    // --- Project operations ---

    pub fn add_project(&mut self) {
        let (_, notices) = self.tracker.add_project(unix_now());
        for notice in notices {
            Self::report_notice(&notice);
        }
        self.status_message = "Project added".to_string();
    }

    pub fn select_project(&mut self, id: Uuid) {
        for notice in self.tracker.select(Some(id), unix_now()) {
            Self::report_notice(&notice);
        }
    }

    pub fn delete_selected(&mut self) {
        let Some(name) = self
            .tracker
            .selected()
            .and_then(|id| self.tracker.store().get(id))
            .map(|p| p.name.clone())
        else {
            self.report("Delete Project", &TrackerError::NothingToDelete);
            return;
        };

        if self.settings.confirm_delete
            && !ui::dialogs::confirm(
                "Delete Project",
                &format!("Are you sure you want to delete '{}'?", name),
            )
        {
            return;
        }

        match self.tracker.delete_selected() {
            Ok(name) => self.status_message = format!("Deleted '{}'", name),
            Err(e) => self.report("Delete Project", &e),
        }
    }

    pub fn reset_selected(&mut self) {
        match self.tracker.reset_selected() {
            Ok(()) => self.status_message = "Project reset".to_string(),
            Err(e) => self.report("Reset Project", &e),
        }
    }

    pub fn finalize_field(&mut self, field: UnitField) {
        if let Some(notice) = self.tracker.finalize(field, unix_now()) {
            Self::report_notice(&notice);
        }
    }

    pub fn toggle_timer(&mut self) {
        let now = unix_now();
        if self.tracker.selected().is_some() {
            for notice in self.tracker.finalize_all(now) {
                Self::report_notice(&notice);
            }
        }
        match self.tracker.toggle_timer(now) {
            Ok(TimerTransition::Started) => self.status_message = "Timer started".to_string(),
            Ok(TimerTransition::Stopped) => self.status_message = "Timer stopped".to_string(),
            Err(e) => {
                let title = if matches!(e, TrackerError::NothingToToggle) {
                    "Timer Control"
                } else if e.is_info() {
                    "Timer Info"
                } else {
                    "Timer Error"
                };
                self.report(title, &e);
            }
        }
    }

    fn tick(&mut self) {
        let tick = self.tracker.tick(unix_now());
        for notice in &tick.notices {
            Self::report_notice(notice);
        }
        for name in tick.completed {
            self.status_message = format!("'{}' complete", name);
        }
    }

    /// Write the project file. Runs once, when the window closes.
    pub fn save_on_exit(&mut self) {
        if self.saved {
            return;
        }
        self.saved = true;
        for notice in self.tracker.finalize_all(unix_now()) {
            Self::report_notice(&notice);
        }
        let Some(path) = self.data_file.clone() else {
            tracing::warn!("no data file location, projects not saved");
            return;
        };
        if let Err(e) = io::save_projects(self.tracker.store().projects(), &path) {
            tracing::error!(error = %e, "saving projects failed");
            ui::dialogs::show_message(
                MessageLevel::Error,
                "Save Error",
                &format!("An error occurred while saving projects: {}", e),
            );
        }
    }

    pub fn quit(&mut self, ctx: &egui::Context) {
        self.save_on_exit();
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }

    pub fn open_data_folder(&mut self) {
        let Some(dir) = self.data_file.as_ref().and_then(|p| p.parent()) else {
            self.status_message = "No data folder".to_string();
            return;
        };
        if let Err(e) = open::that(dir) {
            tracing::warn!(error = %e, "could not open data folder");
            self.status_message = format!("Could not open {}", dir.display());
        }
    }

    fn report_notice(notice: &FieldNotice) {
        let (title, level) = if notice.is_info() {
            ("Input Info", MessageLevel::Info)
        } else {
            ("Input Error", MessageLevel::Warning)
        };
        ui::dialogs::show_message(level, title, &notice.to_string());
    }

    fn report(&self, title: &str, err: &TrackerError) {
        tracing::info!(%err, "{}", title);
        let level = if err.is_info() {
            MessageLevel::Info
        } else {
            MessageLevel::Warning
        };
        ui::dialogs::show_message(level, title, &err.to_string());
    }
}

impl eframe::App for ProgressApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let interval = self.settings.poll_interval();
        if self.last_tick.map_or(true, |t| t.elapsed() >= interval) {
            self.tick();
            self.last_tick = Some(Instant::now());
        }
        ctx.request_repaint_after(interval);

        if ctx.input(|i| i.viewport().close_requested()) {
            self.save_on_exit();
        }

        // Top panel: menu
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let running = self
                            .tracker
                            .store()
                            .projects()
                            .iter()
                            .filter(|p| p.is_running)
                            .count();
                        ui.label(
                            egui::RichText::new(format!(
                                "Projects: {} · Running: {}",
                                self.tracker.store().len(),
                                running
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: project list
        let mut list_action = ui::project_list::ProjectListAction::None;
        egui::SidePanel::left("project_panel")
            .default_width(220.0)
            .min_width(180.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                list_action = ui::project_list::show_project_list(
                    self.tracker.store().projects(),
                    self.tracker.selected(),
                    ui,
                );
            });

        match list_action {
            ui::project_list::ProjectListAction::Select(id) => self.select_project(id),
            ui::project_list::ProjectListAction::Add => self.add_project(),
            ui::project_list::ProjectListAction::Delete => self.delete_selected(),
            ui::project_list::ProjectListAction::None => {}
        }

        // Central panel: editor for the selected project
        let view = self.tracker.view(unix_now());
        let mut editor_actions = Vec::new();
        egui::CentralPanel::default()
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_DARK)
                    .inner_margin(egui::Margin::same(16.0)),
            )
            .show(ctx, |ui| {
                if self.tracker.selected().is_some() {
                    editor_actions = ui::project_editor::show_project_editor(
                        &mut self.tracker.fields,
                        view.as_ref(),
                        ui,
                    );
                } else {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            egui::RichText::new("No project selected. Add one to get started.")
                                .color(ui::theme::TEXT_DIM),
                        );
                    });
                }
            });

        for action in editor_actions {
            match action {
                ui::project_editor::EditorAction::NameChanged => self.tracker.edit_name(),
                ui::project_editor::EditorAction::DescriptionChanged => {
                    self.tracker.edit_description()
                }
                ui::project_editor::EditorAction::Finalize(field) => self.finalize_field(field),
                ui::project_editor::EditorAction::ToggleTimer => self.toggle_timer(),
                ui::project_editor::EditorAction::Reset => self.reset_selected(),
            }
        }

        // Dialogs
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}

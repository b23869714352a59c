//! GUI-independent state behind the main window: the project store, the
//! current selection and the text buffers of the editor fields.

use thiserror::Error;
use uuid::Uuid;

use crate::model::etc;
use crate::model::input;
use crate::model::{
    EtcState, FieldNotice, Project, ProjectStore, StoreError, TimerError, TimerTransition,
    UnitField,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("No project selected to delete.")]
    NothingToDelete,

    #[error("No project selected to reset.")]
    NothingToReset,

    #[error("No project selected or invalid project.")]
    NothingToToggle,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Timer(#[from] TimerError),
}

impl TrackerError {
    pub fn is_info(&self) -> bool {
        match self {
            TrackerError::Timer(e) => e.is_info(),
            TrackerError::Store(_) => false,
            _ => true,
        }
    }
}

/// Text as currently typed into the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBuffers {
    pub name: String,
    pub description: String,
    pub total: String,
    pub current: String,
}

impl Default for FieldBuffers {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            total: input::format_units(0.0),
            current: input::format_units(0.0),
        }
    }
}

/// Everything the editor shows about the selected project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectView {
    /// 0..=100
    pub percentage: f64,
    pub etc: EtcState,
    pub running: bool,
}

impl ProjectView {
    pub fn percentage_label(&self) -> String {
        format!("{:.1}%", self.percentage)
    }

    pub fn button_label(&self) -> &'static str {
        if self.running {
            "Stop Timer"
        } else {
            "Start Timer"
        }
    }
}

/// Outcome of one periodic recompute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tick {
    /// Names of projects whose timers stopped because they reached their total.
    pub completed: Vec<String>,
    /// Adjustments made while committing typed values that reached the total.
    pub notices: Vec<FieldNotice>,
}

pub struct Tracker {
    store: ProjectStore,
    selected: Option<Uuid>,
    pub fields: FieldBuffers,
}

impl Tracker {
    /// Wrap a store, selecting its first project.
    pub fn new(store: ProjectStore) -> Self {
        let first = store.projects().first().map(|p| p.id);
        let mut tracker = Self {
            store,
            selected: None,
            fields: FieldBuffers::default(),
        };
        tracker.load_fields(first);
        tracker
    }

    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    pub fn selected(&self) -> Option<Uuid> {
        self.selected
    }

    /// Change the selection. Values typed for the outgoing project are
    /// committed first, then the buffers are reloaded from the new record.
    pub fn select(&mut self, id: Option<Uuid>, now: f64) -> Vec<FieldNotice> {
        if id.is_some() && id == self.selected {
            return Vec::new();
        }
        let notices = self.finalize_all(now);
        self.load_fields(id);
        notices
    }

    fn load_fields(&mut self, id: Option<Uuid>) {
        let id = id.filter(|id| self.store.get(*id).is_some());
        self.selected = id;
        self.fields = match id.and_then(|id| self.store.get(id)) {
            Some(p) => FieldBuffers {
                name: p.name.clone(),
                description: p.description.clone(),
                total: input::format_units(p.total_units),
                current: input::format_units(p.current_units),
            },
            None => FieldBuffers::default(),
        };
    }

    /// Create a project and select it, committing the outgoing buffers.
    pub fn add_project(&mut self, now: f64) -> (Uuid, Vec<FieldNotice>) {
        let notices = self.finalize_all(now);
        let id = self.store.create().id;
        self.load_fields(Some(id));
        (id, notices)
    }

    /// Delete the selected project and select the first remaining one.
    pub fn delete_selected(&mut self) -> Result<String, TrackerError> {
        let id = self.selected.ok_or(TrackerError::NothingToDelete)?;
        let removed = self.store.delete(id)?;
        let first = self.store.projects().first().map(|p| p.id);
        self.load_fields(first);
        Ok(removed.name)
    }

    pub fn reset_selected(&mut self) -> Result<(), TrackerError> {
        let id = self.selected.ok_or(TrackerError::NothingToReset)?;
        self.store.reset(id)?;
        self.load_fields(Some(id));
        Ok(())
    }

    /// Live name edit. Blank names are not applied.
    pub fn edit_name(&mut self) {
        if self.fields.name.trim().is_empty() {
            return;
        }
        if let Some(project) = self.selected.and_then(|id| self.store.get_mut(id)) {
            project.name.clone_from(&self.fields.name);
        }
    }

    pub fn edit_description(&mut self) {
        if let Some(project) = self.selected.and_then(|id| self.store.get_mut(id)) {
            project.description.clone_from(&self.fields.description);
        }
    }

    /// Commit one numeric field of the selected project.
    pub fn finalize(&mut self, field: UnitField, now: f64) -> Option<FieldNotice> {
        let project = self.selected.and_then(|id| self.store.get_mut(id))?;
        let text = match field {
            UnitField::Total => &mut self.fields.total,
            UnitField::Current => &mut self.fields.current,
        };
        let notice = input::finalize(project, field, text, now);
        if let Some(notice) = notice {
            tracing::debug!(project = %project.id, ?field, %notice, "field adjusted");
        }
        notice
    }

    /// Commit both numeric fields, total first.
    pub fn finalize_all(&mut self, now: f64) -> Vec<FieldNotice> {
        [UnitField::Total, UnitField::Current]
            .into_iter()
            .filter_map(|field| self.finalize(field, now))
            .collect()
    }

    pub fn toggle_timer(&mut self, now: f64) -> Result<TimerTransition, TrackerError> {
        let id = self.selected.ok_or(TrackerError::NothingToToggle)?;
        let project = self.store.get_mut(id).ok_or(StoreError::UnknownProject(id))?;
        Ok(project.toggle(now)?)
    }

    /// Periodic recompute over every project. A running selected project
    /// whose typed values reach the total has them committed, so it stops
    /// together with the projects already complete on record.
    pub fn tick(&mut self, now: f64) -> Tick {
        let live_complete = self
            .live_snapshot()
            .is_some_and(|p| p.is_running && p.is_complete());
        let notices = if live_complete {
            self.finalize_all(now)
        } else {
            Vec::new()
        };
        let completed = self
            .store
            .complete_finished(now)
            .into_iter()
            .filter_map(|id| self.store.get(id).map(|p| p.name.clone()))
            .collect();
        Tick { completed, notices }
    }

    /// The selected project with its numeric fields as typed.
    fn live_snapshot(&self) -> Option<Project> {
        let project = self.selected.and_then(|id| self.store.get(id))?;
        let mut snapshot = project.clone();
        snapshot.total_units = input::parse_live(&self.fields.total, project.total_units);
        snapshot.current_units = input::parse_live(&self.fields.current, project.current_units);
        Some(snapshot)
    }

    /// Derived display for the selected project, using the values as typed.
    pub fn view(&self, now: f64) -> Option<ProjectView> {
        let snapshot = self.live_snapshot()?;
        Some(ProjectView {
            percentage: etc::percentage(snapshot.current_units, snapshot.total_units),
            etc: etc::estimate(&snapshot, now),
            running: snapshot.is_running,
        })
    }
}

use thiserror::Error;
use uuid::Uuid;

use super::project::Project;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("no project with id {0}")]
    UnknownProject(Uuid),
}

/// All projects, in list order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectStore {
    projects: Vec<Project>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from loaded records. A later record with an id already
    /// seen replaces the earlier one in place.
    pub fn from_projects(projects: impl IntoIterator<Item = Project>) -> Self {
        let mut store = Self::new();
        for mut project in projects {
            project.normalize();
            store.upsert(project);
        }
        store
    }

    fn upsert(&mut self, project: Project) {
        match self.projects.iter_mut().find(|p| p.id == project.id) {
            Some(existing) => {
                tracing::warn!(project = %project.id, "duplicate project id, keeping the later record");
                *existing = project;
            }
            None => self.projects.push(project),
        }
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: Uuid) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id == id)
    }

    /// Append a fresh project named after its position.
    pub fn create(&mut self) -> &Project {
        let project = Project::new(format!("New Project {}", self.projects.len() + 1));
        tracing::info!(project = %project.id, name = %project.name, "project created");
        self.projects.push(project);
        &self.projects[self.projects.len() - 1]
    }

    /// Remove a project, returning it with its timer flag cleared.
    pub fn delete(&mut self, id: Uuid) -> Result<Project, StoreError> {
        let idx = self
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::UnknownProject(id))?;
        let mut project = self.projects.remove(idx);
        project.is_running = false;
        tracing::info!(project = %id, name = %project.name, "project deleted");
        Ok(project)
    }

    pub fn reset(&mut self, id: Uuid) -> Result<(), StoreError> {
        let project = self.get_mut(id).ok_or(StoreError::UnknownProject(id))?;
        project.reset();
        tracing::info!(project = %id, "project reset");
        Ok(())
    }

    /// Stop every running project that has reached its total. Returns the ids
    /// that were stopped.
    pub fn complete_finished(&mut self, now: f64) -> Vec<Uuid> {
        let mut finished = Vec::new();
        for project in self.projects.iter_mut().filter(|p| p.is_running && p.is_complete()) {
            project.stop(now);
            tracing::info!(project = %project.id, name = %project.name, "project complete, timer stopped");
            finished.push(project.id);
        }
        finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_numbers_projects() {
        let mut store = ProjectStore::new();
        assert_eq!(store.create().name, "New Project 1");
        let second = store.create().clone();
        assert_eq!(second.name, "New Project 2");
        assert_eq!(second.total_units, 100.0);
        assert_eq!(second.current_units, 0.0);
        assert!(!second.is_running);
        assert_eq!(store.len(), 2);
        assert_ne!(store.projects()[0].id, second.id);
    }

    #[test]
    fn delete_removes_and_clears_running() {
        let mut store = ProjectStore::new();
        let id = store.create().id;
        store.get_mut(id).unwrap().start(0.0).unwrap();
        let removed = store.delete(id).unwrap();
        assert!(!removed.is_running);
        assert!(store.is_empty());
        assert_eq!(store.delete(id), Err(StoreError::UnknownProject(id)));
    }

    #[test]
    fn duplicate_ids_keep_later_record_in_place() {
        let a = Project::new("A");
        let b = Project::new("B");
        let mut a2 = a.clone();
        a2.name = "A2".into();
        let store = ProjectStore::from_projects(vec![a, b, a2]);
        let names: Vec<_> = store.projects().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["A2", "B"]);
    }

    #[test]
    fn completion_stops_only_finished_running_projects() {
        let mut store = ProjectStore::new();
        let done = store.create().id;
        let busy = store.create().id;
        for id in [done, busy] {
            let p = store.get_mut(id).unwrap();
            p.current_units = 10.0;
            p.start(0.0).unwrap();
        }
        store.get_mut(done).unwrap().current_units = 100.0;

        assert_eq!(store.complete_finished(8.0), vec![done]);
        let p = store.get(done).unwrap();
        assert!(!p.is_running);
        assert_eq!(p.elapsed_at_pause, 8.0);
        assert!(store.get(busy).unwrap().is_running);

        // Nothing further happens on later ticks.
        assert!(store.complete_finished(20.0).is_empty());
        assert_eq!(store.get(done).unwrap().elapsed_at_pause, 8.0);
    }

    #[test]
    fn reset_unknown_is_an_error() {
        let mut store = ProjectStore::new();
        let id = Uuid::new_v4();
        assert_eq!(store.reset(id), Err(StoreError::UnknownProject(id)));
    }
}

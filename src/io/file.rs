use crate::model::Project;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DATA_FILE_NAME: &str = "projects.json";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Could not decode project data from {path}. File might be corrupted. ({source})")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode project data: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("no per-user data directory is available on this system")]
    NoDataDir,
}

impl PersistError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        PersistError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Default location of the project file, creating its directory if needed.
pub fn default_data_file() -> Result<PathBuf, PersistError> {
    let dirs = directories::ProjectDirs::from("", "", "ProgressTracker").ok_or(PersistError::NoDataDir)?;
    let dir = dirs.data_dir();
    std::fs::create_dir_all(dir).map_err(|e| PersistError::io(dir, e))?;
    Ok(dir.join(DATA_FILE_NAME))
}

/// Load all projects from a JSON array. A missing file is an empty list.
pub fn load_projects(path: &Path) -> Result<Vec<Project>, PersistError> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no data file found, starting with no projects");
        return Ok(Vec::new());
    }
    let json = std::fs::read_to_string(path).map_err(|e| PersistError::io(path, e))?;
    let projects: Vec<Project> = serde_json::from_str(&json).map_err(|source| PersistError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), count = projects.len(), "projects loaded");
    Ok(projects)
}

/// Save all projects. The file is replaced only after the new contents were
/// written completely.
pub fn save_projects(projects: &[Project], path: &Path) -> Result<(), PersistError> {
    let json = serde_json::to_string_pretty(projects).map_err(PersistError::Encode)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PersistError::io(parent, e))?;
    }
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json).map_err(|e| PersistError::io(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(PersistError::io(path, e));
    }
    tracing::info!(path = %path.display(), count = projects.len(), "projects saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let projects = load_projects(&dir.path().join("nope.json")).unwrap();
        assert!(projects.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DATA_FILE_NAME);

        let mut a = Project::new("Thesis");
        a.total_units = 240.0;
        a.current_units = 17.5;
        a.elapsed_at_pause = 93.25;
        a.description = "chapters".into();
        let mut b = Project::new("Running");
        b.current_units = 3.0;
        b.start(1_700_000_000.5).unwrap();

        let projects = vec![a, b];
        save_projects(&projects, &path).unwrap();
        assert_eq!(load_projects(&path).unwrap(), projects);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn saved_objects_have_exactly_the_record_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DATA_FILE_NAME);
        save_projects(&[Project::new("X")], &path).unwrap();

        let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let obj = raw[0].as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            [
                "current_units",
                "description",
                "elapsed_at_pause",
                "id",
                "is_running",
                "name",
                "start_time",
                "total_units",
            ]
        );
        assert!(obj["start_time"].is_null());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DATA_FILE_NAME);
        std::fs::write(&path, r#"[{"name":"X"}]"#).unwrap();

        let projects = load_projects(&path).unwrap();
        assert_eq!(projects.len(), 1);
        let p = &projects[0];
        assert_eq!(p.name, "X");
        assert_eq!(p.total_units, 100.0);
        assert_eq!(p.current_units, 0.0);
        assert!(!p.is_running);
        assert_eq!(p.start_time, None);
        assert_eq!(p.elapsed_at_pause, 0.0);
        assert!(p.description.is_empty());
        assert!(!p.id.is_nil());
    }

    #[test]
    fn empty_object_gets_unnamed_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DATA_FILE_NAME);
        std::fs::write(&path, "[{}, {}]").unwrap();

        let projects = load_projects(&path).unwrap();
        assert_eq!(projects[0].name, "Unnamed Project");
        assert_ne!(projects[0].id, projects[1].id);
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DATA_FILE_NAME);
        std::fs::write(&path, "[{\"name\": ").unwrap();

        let err = load_projects(&path).unwrap_err();
        assert!(matches!(err, PersistError::Decode { .. }));
    }

    #[test]
    fn failed_save_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DATA_FILE_NAME);
        save_projects(&[Project::new("Kept")], &path).unwrap();

        // A directory squatting on the temp file name makes the write fail.
        std::fs::create_dir(path.with_extension("json.tmp")).unwrap();
        let err = save_projects(&[Project::new("Lost")], &path).unwrap_err();
        assert!(matches!(err, PersistError::Io { .. }));

        let projects = load_projects(&path).unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "Kept");
    }

    #[test]
    fn unreadable_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_projects(dir.path()).unwrap_err();
        match err {
            PersistError::Io { path, .. } => assert_eq!(path, dir.path()),
            other => panic!("expected an I/O error, got {other:?}"),
        }
    }
}

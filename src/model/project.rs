use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const DEFAULT_TOTAL_UNITS: f64 = 100.0;

/// Current wall-clock time as fractional Unix seconds.
pub fn unix_now() -> f64 {
    chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// Reasons a stopped timer refuses to start.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    #[error("Total Work Units must be a positive number to start the timer.")]
    TotalNotPositive,

    #[error("Current Work Units cannot be negative.")]
    CurrentNegative,

    #[error("Current Work Units already meet or exceed Total. Project is complete. No need to start timer.")]
    AlreadyComplete,
}

impl TimerError {
    /// `AlreadyComplete` is informational rather than a mistake.
    pub fn is_info(&self) -> bool {
        matches!(self, TimerError::AlreadyComplete)
    }
}

/// Which way a toggle went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTransition {
    Started,
    Stopped,
}

/// A tracked project: a quantity of work, how much of it is done, and a
/// pausable wall-clock timer.
///
/// Every field has a default so that partially written records still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub total_units: f64,
    pub current_units: f64,
    /// Unix seconds when the open running interval began.
    pub start_time: Option<f64>,
    pub is_running: bool,
    /// Seconds accumulated by previous running intervals.
    pub elapsed_at_pause: f64,
    pub description: String,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: "Unnamed Project".to_string(),
            total_units: DEFAULT_TOTAL_UNITS,
            current_units: 0.0,
            start_time: None,
            is_running: false,
            elapsed_at_pause: 0.0,
            description: String::new(),
        }
    }
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Seconds of running time, including the open interval if any.
    pub fn elapsed(&self, now: f64) -> f64 {
        match (self.is_running, self.start_time) {
            (true, Some(start)) => self.elapsed_at_pause + (now - start),
            _ => self.elapsed_at_pause,
        }
    }

    /// True once the timer has run at least once since the last reset.
    pub fn has_started(&self) -> bool {
        self.is_running || self.elapsed_at_pause > 0.0
    }

    /// Fraction of the work done, or `None` when the total is not positive.
    pub fn progress_ratio(&self) -> Option<f64> {
        (self.total_units > 0.0).then(|| self.current_units / self.total_units)
    }

    pub fn is_complete(&self) -> bool {
        self.progress_ratio().is_some_and(|r| r >= 1.0)
    }

    /// Stopped → Running, if the units allow it.
    pub fn start(&mut self, now: f64) -> Result<(), TimerError> {
        if self.is_running {
            return Ok(());
        }
        if self.total_units <= 0.0 {
            return Err(TimerError::TotalNotPositive);
        }
        if self.current_units < 0.0 {
            return Err(TimerError::CurrentNegative);
        }
        if self.current_units >= self.total_units {
            return Err(TimerError::AlreadyComplete);
        }
        self.start_time = Some(now);
        self.is_running = true;
        tracing::debug!(project = %self.id, "timer started");
        Ok(())
    }

    /// Running → Stopped, folding the open interval into the accumulated time.
    pub fn stop(&mut self, now: f64) {
        if let Some(start) = self.start_time.take() {
            if self.is_running {
                self.elapsed_at_pause += (now - start).max(0.0);
            }
        }
        if self.is_running {
            tracing::debug!(project = %self.id, elapsed = self.elapsed_at_pause, "timer stopped");
        }
        self.is_running = false;
    }

    pub fn toggle(&mut self, now: f64) -> Result<TimerTransition, TimerError> {
        if self.is_running {
            self.stop(now);
            Ok(TimerTransition::Stopped)
        } else {
            self.start(now)?;
            Ok(TimerTransition::Started)
        }
    }

    /// Back to a fresh record, keeping identity and name.
    pub fn reset(&mut self) {
        self.is_running = false;
        self.start_time = None;
        self.elapsed_at_pause = 0.0;
        self.current_units = 0.0;
        self.total_units = DEFAULT_TOTAL_UNITS;
        self.description.clear();
    }

    /// Repair a record read from disk so the running flag and start time agree.
    pub fn normalize(&mut self) {
        if self.is_running && self.start_time.is_none() {
            tracing::warn!(project = %self.id, "running project without start time, loading as stopped");
            self.is_running = false;
        }
        if !self.is_running {
            self.start_time = None;
        }
        if !self.elapsed_at_pause.is_finite() || self.elapsed_at_pause < 0.0 {
            self.elapsed_at_pause = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn half_done() -> Project {
        let mut p = Project::new("Book");
        p.current_units = 50.0;
        p
    }

    #[test]
    fn start_then_stop_accumulates_elapsed() {
        let mut p = half_done();
        p.start(1_000.0).unwrap();
        assert!(p.is_running);
        assert_eq!(p.start_time, Some(1_000.0));
        assert_eq!(p.elapsed(1_004.0), 4.0);

        p.stop(1_010.0);
        assert!(!p.is_running);
        assert_eq!(p.start_time, None);
        assert_eq!(p.elapsed_at_pause, 10.0);

        p.start(2_000.0).unwrap();
        assert_eq!(p.elapsed(2_005.0), 15.0);
    }

    #[test]
    fn immediate_stop_leaves_accumulated_time_unchanged() {
        let mut p = half_done();
        p.elapsed_at_pause = 7.5;
        p.start(500.0).unwrap();
        p.stop(500.0);
        assert_eq!(p.elapsed_at_pause, 7.5);
        assert_eq!(p.current_units, 50.0);
    }

    #[test]
    fn start_rejects_invalid_units_without_mutation() {
        let mut p = half_done();
        p.total_units = 0.0;
        assert_eq!(p.start(1.0), Err(TimerError::TotalNotPositive));

        let mut p = half_done();
        p.current_units = -1.0;
        assert_eq!(p.start(1.0), Err(TimerError::CurrentNegative));

        let mut p = half_done();
        p.current_units = 100.0;
        let before = p.clone();
        assert_eq!(p.start(1.0), Err(TimerError::AlreadyComplete));
        assert_eq!(p, before);
        assert!(TimerError::AlreadyComplete.is_info());
    }

    #[test]
    fn toggle_alternates() {
        let mut p = half_done();
        assert_eq!(p.toggle(0.0), Ok(TimerTransition::Started));
        assert_eq!(p.toggle(3.0), Ok(TimerTransition::Stopped));
        assert_eq!(p.elapsed_at_pause, 3.0);
        assert!(p.has_started());
    }

    #[test]
    fn reset_keeps_name_and_id() {
        let mut p = half_done();
        p.description = "notes".into();
        p.total_units = 80.0;
        p.start(0.0).unwrap();
        assert!(p.start_time.is_some());
        let id = p.id;
        p.reset();
        assert_eq!(p.id, id);
        assert_eq!(p.name, "Book");
        assert_eq!(p.total_units, DEFAULT_TOTAL_UNITS);
        assert_eq!(p.current_units, 0.0);
        assert_eq!(p.elapsed_at_pause, 0.0);
        assert!(!p.is_running);
        assert_eq!(p.start_time, None);
        assert!(p.description.is_empty());
        assert!(!p.has_started());
    }

    #[test]
    fn normalize_repairs_inconsistent_timer_state() {
        let mut p = half_done();
        p.is_running = true;
        p.normalize();
        assert!(!p.is_running);

        let mut p = half_done();
        p.start_time = Some(12.0);
        p.normalize();
        assert_eq!(p.start_time, None);
    }
}

//! Progress percentage and estimated time to completion.

use std::fmt;

use super::project::Project;

/// What the ETC label should say for a project at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EtcState {
    /// Never started.
    NoEstimate,
    /// Stopped after running for the given seconds.
    Paused(f64),
    NeedPositiveTotal,
    /// Running, but there is no rate to extrapolate from yet.
    Calculating,
    Complete,
    /// Seconds left at the observed rate.
    Remaining(f64),
    /// Progress went negative while typing.
    Estimating,
    Error,
}

impl fmt::Display for EtcState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EtcState::NoEstimate => write!(f, "ETC: --:--:--"),
            EtcState::Paused(secs) => {
                write!(f, "ETC: Paused ({} elapsed)", format_duration(Some(*secs)))
            }
            EtcState::NeedPositiveTotal => write!(f, "ETC: Total > 0 req."),
            EtcState::Calculating => write!(f, "ETC: Calculating..."),
            EtcState::Complete => write!(f, "ETC: Complete!"),
            EtcState::Remaining(secs) => write!(f, "ETC: {}", format_duration(Some(*secs))),
            EtcState::Estimating => write!(f, "ETC: Estimating..."),
            EtcState::Error => write!(f, "ETC: Error"),
        }
    }
}

fn is_near_zero(x: f64) -> bool {
    x.abs() <= f64::EPSILON
}

/// Completion percentage in `[0, 100]`.
pub fn percentage(current: f64, total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    let pct = current / total * 100.0;
    if pct.is_nan() {
        0.0
    } else {
        pct.clamp(0.0, 100.0)
    }
}

/// Estimate the time to completion. Pure: a complete running project is
/// reported as `Complete` but not stopped here. A project stopped after
/// reaching its total keeps reading `Complete`.
pub fn estimate(project: &Project, now: f64) -> EtcState {
    if !project.is_running {
        return if !project.has_started() {
            EtcState::NoEstimate
        } else if project.is_complete() {
            EtcState::Complete
        } else {
            EtcState::Paused(project.elapsed_at_pause)
        };
    }

    let total = project.total_units;
    let current = project.current_units;
    let elapsed = project.elapsed(now);

    if total <= 0.0 {
        return EtcState::NeedPositiveTotal;
    }
    if is_near_zero(current) || is_near_zero(elapsed) {
        return EtcState::Calculating;
    }

    let ratio = current / total;
    if !ratio.is_finite() || !elapsed.is_finite() {
        return EtcState::Error;
    }
    if ratio >= 1.0 {
        return EtcState::Complete;
    }
    if ratio <= 0.0 {
        return EtcState::Estimating;
    }

    let rate = current / elapsed;
    if !rate.is_finite() || rate <= 0.0 {
        return EtcState::Error;
    }
    let remaining = (total - current) / rate;
    if remaining.is_finite() {
        EtcState::Remaining(remaining)
    } else {
        EtcState::Error
    }
}

/// `HH:MM:SS` with unbounded hours; `--:--:--` for absent, negative or
/// non-finite input.
pub fn format_duration(seconds: Option<f64>) -> String {
    match seconds {
        Some(s) if s.is_finite() && s >= 0.0 => {
            let whole = s.floor() as u64;
            format!("{:02}:{:02}:{:02}", whole / 3600, (whole % 3600) / 60, whole % 60)
        }
        _ => "--:--:--".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(current: f64, total: f64, start: f64) -> Project {
        let mut p = Project::new("Test");
        p.total_units = total;
        p.current_units = current;
        p.start(start).unwrap();
        p
    }

    #[test]
    fn percentage_is_ratio_and_clamped() {
        assert_eq!(percentage(25.0, 100.0), 25.0);
        assert_eq!(percentage(100.0, 100.0), 100.0);
        assert_eq!(percentage(150.0, 100.0), 100.0);
        assert_eq!(percentage(-5.0, 100.0), 0.0);
        assert_eq!(percentage(5.0, 0.0), 0.0);
        assert_eq!(percentage(5.0, -3.0), 0.0);
    }

    #[test]
    fn half_way_after_ten_seconds_needs_ten_more() {
        let p = running(50.0, 100.0, 1_000.0);
        let etc = estimate(&p, 1_010.0);
        assert_eq!(etc, EtcState::Remaining(10.0));
        assert_eq!(etc.to_string(), "ETC: 00:00:10");
    }

    #[test]
    fn stopped_states() {
        let p = Project::new("Idle");
        assert_eq!(estimate(&p, 5.0), EtcState::NoEstimate);
        assert_eq!(estimate(&p, 5.0).to_string(), "ETC: --:--:--");

        let mut p = running(10.0, 100.0, 0.0);
        p.stop(3_725.0);
        assert_eq!(estimate(&p, 9_999.0), EtcState::Paused(3_725.0));
        assert_eq!(
            estimate(&p, 9_999.0).to_string(),
            "ETC: Paused (01:02:05 elapsed)"
        );
    }

    #[test]
    fn finished_and_stopped_stays_complete() {
        let mut p = running(10.0, 100.0, 0.0);
        p.current_units = 100.0;
        p.stop(30.0);
        assert_eq!(estimate(&p, 60.0), EtcState::Complete);
    }

    #[test]
    fn running_without_rate_is_calculating() {
        let mut p = running(10.0, 100.0, 0.0);
        p.current_units = 0.0;
        assert_eq!(estimate(&p, 5.0), EtcState::Calculating);

        let p = running(10.0, 100.0, 7.0);
        assert_eq!(estimate(&p, 7.0), EtcState::Calculating);
    }

    #[test]
    fn running_with_bad_total_asks_for_one() {
        let mut p = running(10.0, 100.0, 0.0);
        p.total_units = 0.0;
        assert_eq!(estimate(&p, 5.0), EtcState::NeedPositiveTotal);
    }

    #[test]
    fn complete_is_reported_without_stopping() {
        let mut p = running(10.0, 100.0, 0.0);
        p.current_units = 100.0;
        assert_eq!(estimate(&p, 5.0), EtcState::Complete);
        assert!(p.is_running);
    }

    #[test]
    fn negative_live_progress_is_estimating() {
        let mut p = running(10.0, 100.0, 0.0);
        p.current_units = -4.0;
        assert_eq!(estimate(&p, 5.0), EtcState::Estimating);
    }

    #[test]
    fn degenerate_arithmetic_is_an_error() {
        let mut p = running(10.0, 100.0, 0.0);
        p.current_units = f64::NAN;
        assert_eq!(estimate(&p, 5.0), EtcState::Error);
        assert_eq!(EtcState::Error.to_string(), "ETC: Error");
    }

    #[test]
    fn formats_durations() {
        assert_eq!(format_duration(Some(0.0)), "00:00:00");
        assert_eq!(format_duration(Some(59.9)), "00:00:59");
        assert_eq!(format_duration(Some(3_661.0)), "01:01:01");
        assert_eq!(format_duration(Some(360_000.0)), "100:00:00");
        assert_eq!(format_duration(Some(-1.0)), "--:--:--");
        assert_eq!(format_duration(Some(f64::INFINITY)), "--:--:--");
        assert_eq!(format_duration(None), "--:--:--");
    }
}

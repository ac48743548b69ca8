use crate::domain::pull_request::CombinedStatus;

/// Progress line for a check suite that is still running.
pub fn status_line(status: &CombinedStatus) -> Option<String> {
    if !status.state.is_pending() {
        return None;
    }
    Some(format!(
        "Status is {}. {}/{} succeeded...",
        status.state,
        status.succeeded_count(),
        status.total_count()
    ))
}

/// Logs progress lines, skipping a line identical to the previous one.
#[derive(Debug, Default)]
pub struct StatusLog {
    last_line: Option<String>,
}

impl StatusLog {
    pub fn log_debounced(&mut self, status: &CombinedStatus) -> Option<String> {
        let line = status_line(status)?;
        if self.last_line.as_deref() == Some(line.as_str()) {
            return None;
        }
        log::info!("{line}");
        self.last_line = Some(line.clone());
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pull_request::{CheckStatus, StatusState};

    fn status(state: StatusState, checks: &[StatusState]) -> CombinedStatus {
        CombinedStatus {
            state,
            statuses: checks
                .iter()
                .map(|&s| CheckStatus {
                    state: s,
                    context: None,
                    description: None,
                    target_url: None,
                })
                .collect(),
        }
    }

    #[test]
    fn pending_status_reports_progress() {
        use StatusState::*;
        let s = status(Pending, &[Success, Pending, Success, Failure]);
        assert_eq!(status_line(&s).as_deref(), Some("Status is pending. 2/4 succeeded..."));
    }

    #[test]
    fn resolved_status_has_no_progress_line() {
        assert_eq!(status_line(&status(StatusState::Success, &[StatusState::Success])), None);
        assert_eq!(status_line(&status(StatusState::Error, &[])), None);
    }

    #[test]
    fn repeated_lines_are_suppressed() {
        use StatusState::*;
        let mut log = StatusLog::default();
        let one = status(Pending, &[Success, Pending]);
        let two = status(Pending, &[Success, Success, Pending]);

        assert!(log.log_debounced(&one).is_some());
        assert!(log.log_debounced(&one).is_none());
        assert!(log.log_debounced(&one).is_none());
        assert_eq!(
            log.log_debounced(&two).as_deref(),
            Some("Status is pending. 2/3 succeeded...")
        );
        // a changed line followed by the earlier one is logged again
        assert!(log.log_debounced(&one).is_some());
    }

    #[test]
    fn resolved_status_does_not_reset_debounce() {
        use StatusState::*;
        let mut log = StatusLog::default();
        let pending = status(Pending, &[Pending]);
        assert!(log.log_debounced(&pending).is_some());
        assert!(log.log_debounced(&status(Success, &[Success])).is_none());
        assert!(log.log_debounced(&pending).is_none());
    }
}

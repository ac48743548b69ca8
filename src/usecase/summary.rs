use crate::domain::pull_request::{CheckStatus, CombinedStatus, PullRequest, StatusState};

fn check_line(check: &CheckStatus) -> String {
    let description = check
        .description
        .as_deref()
        .or(check.context.as_deref())
        .unwrap_or("");
    match (check.state, check.target_url.as_deref()) {
        (StatusState::Success, _) | (_, None) => format!("{} - {description}", check.state),
        (state, Some(url)) => format!("{state} - {description} - {url}"),
    }
}

/// One line per individual check, in the order the API reported them.
/// Non-successful checks carry their target URL so they can be followed up.
pub fn summary_lines(status: &CombinedStatus) -> Vec<String> {
    status.statuses.iter().map(check_line).collect()
}

/// Title and body of the desktop notification sent when the suite resolves.
pub fn notification_text(pr: &PullRequest, status: &CombinedStatus) -> (String, String) {
    let title = match status.state {
        StatusState::Success => "Checks passed".to_string(),
        StatusState::Pending => "Checks still running".to_string(),
        state => format!("Checks finished: {state}"),
    };
    let body = format!(
        "{} ({}) - {}/{} succeeded",
        pr.title,
        pr.pr_ref,
        status.succeeded_count(),
        status.total_count()
    );
    (title, body)
}

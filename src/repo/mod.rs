use anyhow::Result;

use crate::domain::pull_request::{CombinedStatus, PrRef, PullRequest};

pub mod github;
pub mod memory;

/// Where the poll loop reads pull request metadata and check results from.
pub trait StatusSource {
    fn pull_request(&mut self, pr_ref: &PrRef) -> Result<PullRequest>;
    fn combined_status(&mut self, pr: &PullRequest) -> Result<CombinedStatus>;
}

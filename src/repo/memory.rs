use std::collections::VecDeque;

use anyhow::{Result, anyhow};

use super::StatusSource;
use crate::domain::pull_request::{CombinedStatus, PrRef, PullRequest};

const INITIAL_HEAD: &str = "9f2c1a7e4b3d8c6f0a1e2d3c4b5a69788796a5b4";

struct Step {
    /// Head commit the pull request points at from this step on.
    head: Option<String>,
    result: Result<CombinedStatus, String>,
}

/// Replays a fixed sequence of statuses without touching the network.
/// Once the script runs out, the last status keeps being returned.
pub struct ScriptedStatusSource {
    title: String,
    head_sha: String,
    script: VecDeque<Step>,
    last: Option<CombinedStatus>,
    pub pull_request_calls: usize,
    pub status_calls: usize,
    /// Head SHA each status was requested for, in call order.
    pub status_shas: Vec<String>,
}

impl ScriptedStatusSource {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            head_sha: INITIAL_HEAD.to_string(),
            script: VecDeque::new(),
            last: None,
            pull_request_calls: 0,
            status_calls: 0,
            status_shas: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn with_seed(title: impl Into<String>, seed: impl IntoIterator<Item = CombinedStatus>) -> Self {
        let mut source = Self::new(title);
        for status in seed {
            source.push(status);
        }
        source
    }

    pub fn push(&mut self, status: CombinedStatus) -> &mut Self {
        self.script.push_back(Step {
            head: None,
            result: Ok(status),
        });
        self
    }

    /// Queue a status reported after the pull request moved to `sha`.
    #[cfg(test)]
    pub fn push_on_head(&mut self, sha: impl Into<String>, status: CombinedStatus) -> &mut Self {
        self.script.push_back(Step {
            head: Some(sha.into()),
            result: Ok(status),
        });
        self
    }

    /// Queue a failed fetch.
    #[cfg(test)]
    pub fn push_error(&mut self, message: impl Into<String>) -> &mut Self {
        self.script.push_back(Step {
            head: None,
            result: Err(message.into()),
        });
        self
    }
}

impl StatusSource for ScriptedStatusSource {
    fn pull_request(&mut self, pr_ref: &PrRef) -> Result<PullRequest> {
        self.pull_request_calls += 1;
        if let Some(head) = self.script.front().and_then(|s| s.head.as_ref()) {
            self.head_sha = head.clone();
        }
        Ok(PullRequest {
            pr_ref: pr_ref.clone(),
            title: self.title.clone(),
            html_url: format!(
                "https://github.com/{}/{}/pull/{}",
                pr_ref.org, pr_ref.repo, pr_ref.number
            ),
            head_sha: self.head_sha.clone(),
            head_repo: pr_ref.full_name(),
        })
    }

    fn combined_status(&mut self, pr: &PullRequest) -> Result<CombinedStatus> {
        self.status_calls += 1;
        self.status_shas.push(pr.head_sha.clone());
        match self.script.pop_front().map(|s| s.result) {
            Some(Ok(status)) => {
                self.last = Some(status.clone());
                Ok(status)
            }
            Some(Err(message)) => Err(anyhow!(message)),
            None => self
                .last
                .clone()
                .ok_or_else(|| anyhow!("no scripted status available")),
        }
    }
}

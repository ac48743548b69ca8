pub mod auth;
pub mod model;

use anyhow::{Result, anyhow};
use auth::Credentials;
use model::PullRequestResponse;
use octocrab::Octocrab;
use tokio::runtime::Runtime;

use super::StatusSource;
use crate::domain::pull_request::{CombinedStatus, PrRef, PullRequest};

/// Blocking facade over octocrab that owns its own Tokio runtime.
pub struct GithubClient {
    rt: Runtime,
    octo: Octocrab,
}

impl GithubClient {
    pub fn new(credentials: Credentials, api_base: Option<&str>) -> Result<Self> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .map_err(|e| anyhow!("failed to build tokio runtime: {e}"))?;

        let octo = rt.block_on(async {
            let mut builder =
                Octocrab::builder().basic_auth(credentials.username, credentials.password);
            if let Some(api) = api_base {
                builder = builder
                    .base_uri(api)
                    .map_err(|e| anyhow!("invalid API base URL {api:?}: {e}"))?;
            }
            builder
                .build()
                .map_err(|e| anyhow!("failed to init GitHub client: {e}"))
        })?;

        Ok(Self { rt, octo })
    }
}

impl StatusSource for GithubClient {
    fn pull_request(&mut self, pr_ref: &PrRef) -> Result<PullRequest> {
        let route = format!(
            "/repos/{}/{}/pulls/{}",
            pr_ref.org, pr_ref.repo, pr_ref.number
        );
        log::debug!("GET {route}");
        let resp: PullRequestResponse = self
            .rt
            .block_on(self.octo.get(&route, None::<&()>))
            .map_err(|e| anyhow!("failed to fetch pull request {pr_ref}: {e}"))?;
        Ok(resp.into_pull_request(pr_ref))
    }

    fn combined_status(&mut self, pr: &PullRequest) -> Result<CombinedStatus> {
        // combined_status_for_ref takes a named ref, not a raw SHA
        let route = format!("/repos/{}/commits/{}/status", pr.head_repo, pr.head_sha);
        log::debug!("GET {route}");
        self.rt
            .block_on(self.octo.get(&route, None::<&()>))
            .map_err(|e| anyhow!("failed to fetch status of {}@{}: {e}", pr.head_repo, pr.head_sha))
    }
}

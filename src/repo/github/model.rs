use crate::domain::pull_request::{PrRef, PullRequest};

#[derive(Debug, serde::Deserialize)]
pub struct HeadRepo {
    pub full_name: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct Head {
    pub sha: String,
    // null when the fork behind the PR has been deleted
    pub repo: Option<HeadRepo>,
}

/// Subset of `GET /repos/{owner}/{repo}/pulls/{number}`.
#[derive(Debug, serde::Deserialize)]
pub struct PullRequestResponse {
    pub title: String,
    pub html_url: String,
    pub head: Head,
}

impl PullRequestResponse {
    pub fn into_pull_request(self, pr_ref: &PrRef) -> PullRequest {
        let head_repo = self
            .head
            .repo
            .map(|r| r.full_name)
            .unwrap_or_else(|| pr_ref.full_name());
        PullRequest {
            pr_ref: pr_ref.clone(),
            title: self.title,
            html_url: self.html_url,
            head_sha: self.head.sha,
            head_repo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pr_ref() -> PrRef {
        PrRef {
            org: "acme".into(),
            repo: "widgets".into(),
            number: 9,
        }
    }

    #[test]
    fn maps_fork_head_repo() {
        let json = r#"{
            "number": 9,
            "title": "Add sprockets",
            "html_url": "https://github.com/acme/widgets/pull/9",
            "head": {"sha": "deadbeef", "ref": "sprockets", "repo": {"full_name": "someone/widgets"}}
        }"#;
        let resp: PullRequestResponse = serde_json::from_str(json).unwrap();
        let pr = resp.into_pull_request(&pr_ref());
        assert_eq!(pr.title, "Add sprockets");
        assert_eq!(pr.head_sha, "deadbeef");
        assert_eq!(pr.head_repo, "someone/widgets");
        assert_eq!(pr.pr_ref, pr_ref());
    }

    #[test]
    fn deleted_fork_falls_back_to_base_repo() {
        let json = r#"{
            "title": "Orphaned",
            "html_url": "https://github.com/acme/widgets/pull/9",
            "head": {"sha": "cafe", "repo": null}
        }"#;
        let resp: PullRequestResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.into_pull_request(&pr_ref()).head_repo, "acme/widgets");
    }
}

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

static PR_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?P<host>[^/]+)/(?P<org>[^/]+)/(?P<repo>[^/]+)/pull/(?P<number>[^/?#]+)(?:[/?#].*)?$")
        .expect("pull request url pattern")
});

static PR_SHORTHAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<org>[^/\s#]+)/(?P<repo>[^/\s#]+)#(?P<number>\S+)$")
        .expect("pull request shorthand pattern")
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("not a pull request URL or org/repo#N reference: {0:?}")]
    Unrecognized(String),
    #[error("pull request URL points at {found}, expected {expected}")]
    WrongHost { expected: String, found: String },
    #[error("invalid pull request number {0:?}")]
    InvalidNumber(String),
}

/// Identifies a single pull request on the hosting platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrRef {
    pub org: String,
    pub repo: String,
    pub number: u64,
}

impl PrRef {
    /// Parse a web URL such as `https://github.com/org/repo/pull/12/files`
    /// or the `org/repo#12` shorthand.
    pub fn parse(input: &str, host: &str) -> Result<Self, ParseError> {
        let input = input.trim();

        if let Some(caps) = PR_URL.captures(input) {
            let found = &caps["host"];
            if !found.eq_ignore_ascii_case(host) {
                return Err(ParseError::WrongHost {
                    expected: host.to_string(),
                    found: found.to_string(),
                });
            }
            return Self::from_parts(&caps["org"], &caps["repo"], &caps["number"]);
        }

        if let Some(caps) = PR_SHORTHAND.captures(input) {
            return Self::from_parts(&caps["org"], &caps["repo"], &caps["number"]);
        }

        Err(ParseError::Unrecognized(input.to_string()))
    }

    fn from_parts(org: &str, repo: &str, number: &str) -> Result<Self, ParseError> {
        let number = match number.parse::<u64>() {
            Ok(n) if n > 0 => n,
            _ => return Err(ParseError::InvalidNumber(number.to_string())),
        };
        Ok(Self {
            org: org.to_string(),
            repo: repo.to_string(),
            number,
        })
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.org, self.repo)
    }
}

impl fmt::Display for PrRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.org, self.repo, self.number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub pr_ref: PrRef,
    pub title: String,
    pub html_url: String,
    pub head_sha: String,
    /// `owner/name` of the repository holding the head commit.
    pub head_repo: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusState {
    Pending,
    Success,
    Failure,
    Error,
}

impl StatusState {
    pub fn is_pending(self) -> bool {
        matches!(self, StatusState::Pending)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusState::Pending => "pending",
            StatusState::Success => "success",
            StatusState::Failure => "failure",
            StatusState::Error => "error",
        }
    }
}

impl fmt::Display for StatusState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckStatus {
    pub state: StatusState,
    pub context: Option<String>,
    pub description: Option<String>,
    pub target_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CombinedStatus {
    pub state: StatusState,
    #[serde(default)]
    pub statuses: Vec<CheckStatus>,
}

impl CombinedStatus {
    pub fn succeeded_count(&self) -> usize {
        self.statuses
            .iter()
            .filter(|s| s.state == StatusState::Success)
            .count()
    }

    pub fn total_count(&self) -> usize {
        self.statuses.len()
    }
}

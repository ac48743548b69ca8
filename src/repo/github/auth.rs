use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, anyhow};

/// Username/password pair as stored by the local git credential helper.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Parse the `key=value` lines printed by `git credential fill`.
pub fn parse_credential_output(text: &str) -> Result<Credentials> {
    let mut username = None;
    let mut password = None;
    for line in text.lines() {
        if let Some(v) = line.strip_prefix("username=") {
            username.get_or_insert_with(|| v.to_string());
        } else if let Some(v) = line.strip_prefix("password=") {
            password.get_or_insert_with(|| v.to_string());
        }
    }

    if text.trim().is_empty() {
        return Err(anyhow!("`git credential fill` returned empty stdout"));
    }

    let username = username.filter(|s| !s.is_empty());
    let password = password.filter(|s| !s.is_empty());
    match (username, password) {
        (Some(username), Some(password)) => Ok(Credentials { username, password }),
        (None, None) => Err(anyhow!(
            "`git credential fill` output is missing username and password"
        )),
        (None, Some(_)) => Err(anyhow!("`git credential fill` output is missing username")),
        (Some(_), None) => Err(anyhow!("`git credential fill` output is missing password")),
    }
}

/// Ask `git credential fill` for the stored credentials of `host`.
pub fn resolve_credentials(host: &str) -> Result<Credentials> {
    let mut child = Command::new("git")
        .args(["credential", "fill"])
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("failed to execute `git credential fill`")?;

    {
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| anyhow!("`git credential fill` stdin unavailable"))?;
        write!(stdin, "protocol=https\nhost={host}\n\n")
            .context("failed to write to `git credential fill`")?;
    }

    let output = child
        .wait_with_output()
        .context("failed to wait for `git credential fill`")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!(
            "`git credential fill` failed (exit {}): {}",
            output.status,
            stderr.trim()
        ));
    }

    log::debug!("resolved credentials for {host} via git credential helper");
    parse_credential_output(&String::from_utf8_lossy(&output.stdout))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_helper_output() {
        let out = "protocol=https\nhost=github.com\nusername=octo\npassword=ghp_secret=with=equals\n";
        let creds = parse_credential_output(out).unwrap();
        assert_eq!(creds.username, "octo");
        assert_eq!(creds.password, "ghp_secret=with=equals");
    }

    #[test]
    fn first_value_wins_and_crlf_is_stripped() {
        let out = "username=first\r\npassword=one\r\nusername=second\r\npassword=two\r\n";
        let creds = parse_credential_output(out).unwrap();
        assert_eq!(creds.username, "first");
        assert_eq!(creds.password, "one");
    }

    #[test]
    fn reports_missing_fields() {
        let err = parse_credential_output("username=octo\n").unwrap_err();
        assert!(err.to_string().contains("missing password"), "{err}");

        let err = parse_credential_output("password=x\n").unwrap_err();
        assert!(err.to_string().contains("missing username"), "{err}");

        let err = parse_credential_output("protocol=https\n").unwrap_err();
        assert!(err.to_string().contains("username and password"), "{err}");

        let err = parse_credential_output("").unwrap_err();
        assert!(err.to_string().contains("empty stdout"), "{err}");
    }

    #[test]
    fn debug_output_hides_password() {
        let creds = Credentials {
            username: "octo".into(),
            password: "hunter2".into(),
        };
        assert!(!format!("{creds:?}").contains("hunter2"));
    }
}

use std::process::Command;

use anyhow::{Result, anyhow};

pub trait Notifier {
    fn notify(&self, title: &str, body: &str) -> Result<()>;
}

/// Posts through the platform's notification command line tool.
pub struct DesktopNotifier;

/// Used with `--no-notify`.
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _title: &str, _body: &str) -> Result<()> {
        Ok(())
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<()> {
        let mut cmd = notification_command(title, body);
        let program = cmd.get_program().to_string_lossy().into_owned();
        let output = cmd
            .output()
            .map_err(|e| anyhow!("failed to execute `{program}`: {e}"))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "`{program}` failed (exit {}): {}",
                output.status,
                stderr.trim()
            ));
        }
        Ok(())
    }
}

fn applescript_quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

fn notification_command(title: &str, body: &str) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("osascript");
        cmd.arg("-e").arg(format!(
            "display notification {} with title {}",
            applescript_quote(body),
            applescript_quote(title)
        ));
        cmd
    } else {
        let mut cmd = Command::new("notify-send");
        cmd.args(["--app-name", "prwatch", title, body]);
        cmd
    }
}

/// Send a notification, downgrading failure to a warning.
pub fn notify_or_warn(notifier: &dyn Notifier, title: &str, body: &str) {
    if let Err(e) = notifier.notify(title, body) {
        log::warn!("desktop notification failed: {e:#}");
    }
}

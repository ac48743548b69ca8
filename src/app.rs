use std::time::{Duration, Instant};

use anyhow::Result;

use crate::domain::pull_request::{CombinedStatus, PrRef, PullRequest};
use crate::repo::StatusSource;
use crate::usecase::status_log::StatusLog;

#[derive(Debug, Clone)]
pub struct WatchOptions {
    pub interval: Duration,
    pub timeout: Option<Duration>,
    /// Consecutive failed polls tolerated before giving up.
    pub max_errors: u32,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            timeout: None,
            max_errors: 3,
        }
    }
}

#[derive(Debug)]
pub enum WatchOutcome {
    Finished(PullRequest, CombinedStatus),
    TimedOut(PullRequest, CombinedStatus),
}

pub struct Watcher<S: StatusSource> {
    source: S,
    pr_ref: PrRef,
    opts: WatchOptions,
    log: StatusLog,
}

impl<S: StatusSource> Watcher<S> {
    pub fn new(source: S, pr_ref: PrRef, opts: WatchOptions) -> Self {
        Self {
            source,
            pr_ref,
            opts,
            log: StatusLog::default(),
        }
    }

    #[cfg(test)]
    pub fn source(&self) -> &S {
        &self.source
    }

    fn fetch(&mut self) -> Result<(PullRequest, CombinedStatus)> {
        let pr = self.source.pull_request(&self.pr_ref)?;
        let status = self.source.combined_status(&pr)?;
        Ok((pr, status))
    }

    /// Poll until the combined status leaves `pending` or the timeout passes.
    pub fn run(&mut self) -> Result<WatchOutcome> {
        let started = Instant::now();
        let (mut pr, mut status) = self.fetch()?;
        log::info!("Watching \"{}\" - {}...", pr.title, pr.html_url);

        let mut failures = 0u32;
        while status.state.is_pending() {
            self.log.log_debounced(&status);

            let mut pause = self.opts.interval;
            if let Some(timeout) = self.opts.timeout {
                let remaining = timeout.saturating_sub(started.elapsed());
                if remaining.is_zero() {
                    log::warn!("Gave up after {}s, checks still pending", timeout.as_secs());
                    return Ok(WatchOutcome::TimedOut(pr, status));
                }
                pause = pause.min(remaining);
            }

            std::thread::sleep(pause);

            match self.fetch() {
                Ok((next_pr, next_status)) => {
                    failures = 0;
                    if next_pr.head_sha != pr.head_sha {
                        log::info!("Head moved to {}", next_pr.head_sha);
                    }
                    pr = next_pr;
                    status = next_status;
                }
                Err(e) => {
                    failures += 1;
                    if failures > self.opts.max_errors {
                        return Err(e.context(format!(
                            "giving up on {} after {failures} consecutive failed polls",
                            self.pr_ref
                        )));
                    }
                    log::warn!(
                        "poll failed ({failures}/{}): {e:#}",
                        self.opts.max_errors
                    );
                }
            }
        }

        log::info!("Build finished. Status: {}", status.state);
        Ok(WatchOutcome::Finished(pr, status))
    }
}

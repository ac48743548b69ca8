mod app;
mod config;
mod domain;
mod logger;
mod notify;
mod repo;
mod ui;
mod usecase;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use app::{WatchOptions, WatchOutcome, Watcher};
use config::{FileConfig, OpenMode};
use domain::pull_request::{CheckStatus, CombinedStatus, PrRef, StatusState};
use notify::{DesktopNotifier, Notifier, SilentNotifier};
use repo::StatusSource;
use repo::github::GithubClient;
use repo::github::auth::resolve_credentials;
use repo::memory::ScriptedStatusSource;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "prwatch: wait for a pull request's checks and get notified",
    long_about = None
)]
struct Args {
    /// Pull request URL (https://github.com/org/repo/pull/123) or org/repo#123
    pr: String,

    /// Seconds between polls
    #[arg(long)]
    interval: Option<u64>,

    /// Give up after this many seconds while checks are still pending
    #[arg(long)]
    timeout: Option<u64>,

    /// Consecutive failed polls tolerated before exiting
    #[arg(long)]
    max_errors: Option<u32>,

    /// Web host of the code-hosting platform
    #[arg(long)]
    host: Option<String>,

    /// REST API base URL (e.g. https://ghe.example.com/api/v3)
    #[arg(long)]
    api_base: Option<String>,

    /// Skip the desktop notification
    #[arg(long, default_value_t = false)]
    no_notify: bool,

    /// Whether to open the pull request in a browser when done
    #[arg(long, value_enum)]
    open: Option<OpenMode>,

    /// Replay a scripted status sequence instead of calling the API
    #[arg(long, default_value_t = false)]
    demo: bool,

    /// Debug logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Path to config file (default: OS config dir)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// File defaults overlaid with command line flags.
struct Settings {
    watch: WatchOptions,
    host: String,
    api_base: Option<String>,
    notify: bool,
    open: OpenMode,
}

impl Settings {
    fn resolve(args: &Args, file: FileConfig) -> Self {
        let interval_secs = args.interval.unwrap_or(file.interval_secs);
        Self {
            watch: WatchOptions {
                interval: Duration::from_secs(interval_secs),
                timeout: args.timeout.or(file.timeout_secs).map(Duration::from_secs),
                max_errors: args.max_errors.unwrap_or(file.max_errors),
            },
            host: args.host.clone().unwrap_or(file.host),
            api_base: args.api_base.clone().or(file.api_base),
            notify: file.notify && !args.no_notify,
            open: args.open.unwrap_or(file.open),
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    logger::init(args.verbose)?;

    let file = match args.config.as_ref() {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::load_default()?,
    };
    let settings = Settings::resolve(&args, file);

    let pr_ref = PrRef::parse(&args.pr, &settings.host)?;

    let outcome = if args.demo {
        watch(demo_source(), pr_ref, &settings)?
    } else {
        let credentials = resolve_credentials(&settings.host)
            .with_context(|| format!("no credentials for {} in git credential helper", settings.host))?;
        let client = GithubClient::new(credentials, settings.api_base.as_deref())?;
        watch(client, pr_ref, &settings)?
    };

    Ok(finish(outcome, &settings))
}

fn watch<S: StatusSource>(source: S, pr_ref: PrRef, settings: &Settings) -> Result<WatchOutcome> {
    Watcher::new(source, pr_ref, settings.watch.clone()).run()
}

fn finish(outcome: WatchOutcome, settings: &Settings) -> ExitCode {
    let notifier: Box<dyn Notifier> = if settings.notify {
        Box::new(DesktopNotifier)
    } else {
        Box::new(SilentNotifier)
    };

    let (pr, status, code) = match outcome {
        WatchOutcome::Finished(pr, status) => {
            let code = if status.state == StatusState::Success { 0 } else { 1 };
            (pr, status, code)
        }
        WatchOutcome::TimedOut(pr, status) => (pr, status, 2),
    };

    ui::print_summary(&usecase::summary::summary_lines(&status));

    let (title, body) = usecase::summary::notification_text(&pr, &status);
    notify::notify_or_warn(notifier.as_ref(), &title, &body);

    let open = match settings.open {
        OpenMode::Always => true,
        OpenMode::Never => false,
        OpenMode::Prompt => {
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            ui::confirm(&mut stdin.lock(), &mut stdout, "Open pull request in browser?")
                .unwrap_or_else(|e| {
                    log::warn!("could not read answer: {e:#}");
                    false
                })
        }
    };
    if open && let Err(e) = ui::open_in_browser(&pr.html_url) {
        log::warn!("{e:#}");
    }

    ExitCode::from(code)
}

fn demo_check(state: StatusState, context: &str, description: &str) -> CheckStatus {
    CheckStatus {
        state,
        context: Some(context.to_string()),
        description: Some(description.to_string()),
        target_url: (state != StatusState::Success)
            .then(|| format!("https://ci.example.com/{context}")),
    }
}

fn demo_source() -> ScriptedStatusSource {
    use StatusState::*;
    let step = |state, checks: [(StatusState, &str); 3]| CombinedStatus {
        state,
        statuses: checks
            .into_iter()
            .map(|(s, description)| {
                let context = description.split(' ').next().unwrap_or("ci");
                demo_check(s, context, description)
            })
            .collect(),
    };

    let mut source = ScriptedStatusSource::new("Demo pull request");
    source
        .push(step(
            Pending,
            [(Pending, "lint queued"), (Pending, "tests queued"), (Pending, "docs queued")],
        ))
        .push(step(
            Pending,
            [(Success, "lint passed"), (Pending, "tests running"), (Pending, "docs building")],
        ))
        .push(step(
            Pending,
            [(Success, "lint passed"), (Pending, "tests running"), (Pending, "docs building")],
        ))
        .push(step(
            Pending,
            [(Success, "lint passed"), (Pending, "tests running"), (Success, "docs built")],
        ))
        .push(step(
            Success,
            [(Success, "lint passed"), (Success, "tests passed"), (Success, "docs built")],
        ));
    source
}

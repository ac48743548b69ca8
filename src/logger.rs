use anyhow::Result;
use log::LevelFilter;
use simple_logger::SimpleLogger;

/// A parseable `RUST_LOG` sets the level for everything; otherwise this
/// crate logs at info (debug with `verbose`) and dependencies at warn.
fn build(verbose: bool, rust_log: Option<&str>) -> SimpleLogger {
    if let Some(level) = rust_log.and_then(|s| s.trim().parse::<LevelFilter>().ok()) {
        return SimpleLogger::new().with_level(level);
    }
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .with_module_level(env!("CARGO_CRATE_NAME"), level)
}

/// Timestamped logging to stdout; `RUST_LOG` overrides the chosen level.
pub fn init(verbose: bool) -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    build(verbose, rust_log.as_deref()).init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log, Metadata};

    fn enabled(logger: &SimpleLogger, target: &str, level: Level) -> bool {
        logger.enabled(&Metadata::builder().target(target).level(level).build())
    }

    #[test]
    fn verbose_flag_controls_crate_level() {
        let quiet = build(false, None);
        assert!(enabled(&quiet, "prwatch::app", Level::Info));
        assert!(!enabled(&quiet, "prwatch::app", Level::Debug));
        assert!(!enabled(&quiet, "hyper::client", Level::Info));

        let verbose = build(true, None);
        assert!(enabled(&verbose, "prwatch::repo::github", Level::Debug));
    }

    #[test]
    fn rust_log_overrides_crate_level() {
        let logger = build(false, Some("error"));
        assert!(!enabled(&logger, "prwatch::app", Level::Info));
        assert!(enabled(&logger, "prwatch::app", Level::Error));

        let logger = build(false, Some("trace"));
        assert!(enabled(&logger, "prwatch::app", Level::Trace));
        assert!(enabled(&logger, "octocrab", Level::Debug));
    }

    #[test]
    fn unparseable_rust_log_is_ignored() {
        let logger = build(true, Some("prwatch=debug,hyper=info"));
        assert!(enabled(&logger, "prwatch::app", Level::Debug));
        assert!(!enabled(&logger, "hyper::client", Level::Info));
    }
}

//! Logging bootstrap for the command-line binary.
//!
//! The library only emits `log` records; installing a backend is left to the
//! binary so embedders can route them wherever they like.

use flexi_logger::{Logger, LoggerHandle};

/// Environment variable holding a log spec such as `debug` or
/// `choreledger::application=trace`.
pub const LOG_ENV: &str = "CHORELEDGER_LOG";

/// Level used when neither `--verbose` nor the environment says otherwise.
pub const DEFAULT_LEVEL: &str = "warn";

/// Pick the log spec: the environment wins, then `--verbose`, then the default.
pub fn resolve_level(verbose: bool, env_spec: Option<&str>) -> String {
    match env_spec.map(str::trim).filter(|s| !s.is_empty()) {
        Some(spec) => spec.to_string(),
        None if verbose => "debug".to_string(),
        None => DEFAULT_LEVEL.to_string(),
    }
}

/// Start logging to stderr. Keep the returned handle alive for the lifetime
/// of the process.
pub fn init_logging(verbose: bool) -> anyhow::Result<LoggerHandle> {
    let env_spec = std::env::var(LOG_ENV).ok();
    let level = resolve_level(verbose, env_spec.as_deref());

    let handle = Logger::try_with_str(&level)
        .map_err(|err| anyhow::anyhow!("invalid log level `{level}`: {err}"))?
        .log_to_stderr()
        .format_for_stderr(flexi_logger::default_format)
        .start()
        .map_err(|err| anyhow::anyhow!("failed to start logger: {err}"))?;

    log::debug!("event=app_start module=cli status=ok level={level}");
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_level_default() {
        assert_eq!(resolve_level(false, None), "warn");
    }

    #[test]
    fn test_resolve_level_verbose() {
        assert_eq!(resolve_level(true, None), "debug");
        assert_eq!(resolve_level(true, Some("  ")), "debug");
    }

    #[test]
    fn test_resolve_level_env_wins() {
        assert_eq!(resolve_level(true, Some("trace")), "trace");
        assert_eq!(resolve_level(false, Some(" info ")), "info");
    }
}

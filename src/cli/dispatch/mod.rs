//! Map validated CLI arguments to the action the binary runs.

use crate::cli::actions::{Action, server::Args};
use crate::cli::commands::{
    ARG_BASE_URL, ARG_DSN, ARG_ENABLED, ARG_PORT, ARG_SESSION_TTL_SECONDS,
};
use anyhow::{Context, Result, anyhow};
use url::Url;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if the base URL is not an absolute http(s) URL.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
    let dsn = matches.get_one::<String>(ARG_DSN).cloned();

    let base_url = matches
        .get_one::<String>(ARG_BASE_URL)
        .cloned()
        .context("missing required argument: --base-url")?;
    let parsed = Url::parse(&base_url).context("invalid EMAILTOKEN_BASE_URL")?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(anyhow!("--base-url must use http or https"));
    }

    let session_ttl_seconds = matches
        .get_one::<i64>(ARG_SESSION_TTL_SECONDS)
        .copied()
        .context("missing required argument: --session-ttl-seconds")?;

    Ok(Action::Server(Args {
        port,
        dsn,
        base_url,
        enabled: matches.get_flag(ARG_ENABLED),
        session_ttl_seconds,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENV_VARS: [&str; 6] = [
        "EMAILTOKEN_PORT",
        "EMAILTOKEN_DSN",
        "EMAILTOKEN_BASE_URL",
        "EMAILTOKEN_ENABLED",
        "EMAILTOKEN_SESSION_TTL_SECONDS",
        "EMAILTOKEN_LOG_LEVEL",
    ];

    /// Dispatch `args` with every `EMAILTOKEN_*` variable unset except `env`.
    fn parse_with_env(env: &[(&str, &str)], args: &[&str]) -> Result<Action> {
        let vars: Vec<(&str, Option<&str>)> = ENV_VARS
            .iter()
            .map(|key| {
                let value = env.iter().find(|(name, _)| name == key).map(|(_, v)| *v);
                (*key, value)
            })
            .collect();

        temp_env::with_vars(vars, || {
            let mut argv = vec!["emailtoken"];
            argv.extend_from_slice(args);
            let matches = crate::cli::commands::new().get_matches_from(argv);
            handler(&matches)
        })
    }

    fn parse(args: &[&str]) -> Result<Action> {
        parse_with_env(&[], args)
    }

    #[test]
    fn defaults_to_memory_store() {
        let Ok(Action::Server(args)) = parse(&[]) else {
            panic!("expected server action");
        };
        assert_eq!(args.port, 8080);
        assert!(args.dsn.is_none());
        assert!(!args.enabled);
        assert_eq!(args.base_url, "http://localhost:8080");
        assert_eq!(args.session_ttl_seconds, 43_200);
    }

    #[test]
    fn reads_port_and_ttl_from_env() {
        let result = parse_with_env(
            &[
                ("EMAILTOKEN_PORT", "9443"),
                ("EMAILTOKEN_SESSION_TTL_SECONDS", "60"),
            ],
            &[],
        );
        let Ok(Action::Server(args)) = result else {
            panic!("expected server action");
        };
        assert_eq!(args.port, 9443);
        assert_eq!(args.session_ttl_seconds, 60);
    }

    #[test]
    fn rejects_relative_base_url() {
        let result = parse(&["--base-url", "login.example.com"]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_non_http_base_url() {
        let result = parse(&["--base-url", "ftp://login.example.com"]);
        assert!(result.is_err());
    }

    #[test]
    fn passes_flags_through() {
        let Ok(Action::Server(args)) = parse(&[
            "--dsn",
            "postgres://localhost/emailtoken",
            "--base-url",
            "https://login.example.com",
            "--enabled",
        ]) else {
            panic!("expected server action");
        };
        assert_eq!(args.dsn.as_deref(), Some("postgres://localhost/emailtoken"));
        assert!(args.enabled);
    }
}

//! Command-line argument dispatch and server initialization.
//!
//! This module maps validated CLI arguments to the appropriate action, such
//! as starting the API server with its full configuration.

use crate::cli::actions::{server::Args, Action};
use anyhow::{Context, Result};

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);
    let dsn = matches
        .get_one::<String>("dsn")
        .cloned()
        .context("missing required argument: --dsn")?;
    let frontend_base_url = matches
        .get_one::<String>("frontend-url")
        .cloned()
        .context("missing required argument: --frontend-url")?;
    let session_ttl_seconds = matches
        .get_one::<i64>("session-ttl")
        .copied()
        .context("missing required argument: --session-ttl")?;

    Ok(Action::Server(Args {
        port,
        dsn,
        frontend_base_url,
        session_ttl_seconds,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dsn_is_required() {
        temp_env::with_vars([("KLEIDI_DSN", None::<&str>)], || {
            let command = crate::cli::commands::new();
            let result = command.try_get_matches_from(vec!["kleidi"]);
            assert!(result.is_err());
        });
    }

    #[test]
    fn defaults_flow_through() {
        temp_env::with_vars(
            [
                ("KLEIDI_PORT", None::<&str>),
                ("KLEIDI_FRONTEND_URL", None),
                ("KLEIDI_SESSION_TTL", None),
            ],
            || {
                let command = crate::cli::commands::new();
                let matches = command.get_matches_from(vec![
                    "kleidi",
                    "--dsn",
                    "postgres://user@localhost:5432/kleidi",
                ]);
                let action = handler(&matches).expect("action");
                let Action::Server(args) = action;
                assert_eq!(args.port, 8080);
                assert_eq!(args.dsn, "postgres://user@localhost:5432/kleidi");
                assert_eq!(args.frontend_base_url, "http://localhost:3000");
                assert_eq!(args.session_ttl_seconds, 43200);
            },
        );
    }
}

// SPDX-FileCopyrightText: 2026 Tripdeck Authors
// SPDX-License-Identifier: MIT

//! Tripdeck CLI entrypoint.
//!
//! Starts the interactive terminal planner. State lives in a per-user data
//! directory by default; `--state <dir>` (or a positional directory) points
//! it elsewhere, `--api-url` selects a different planning backend.

use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use tripdeck::service::PlannerClient;
use tripdeck::session::TripSession;
use tripdeck::store::{StateStore, WriteDurability};

const DEFAULT_API_URL: &str = "https://plan-your-trip-wcaj.onrender.com";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<state-dir>] [--api-url <url>] [--timeout-secs <n>] [--durable-writes]\n  {program} [--state <dir>] [--api-url <url>] [--timeout-secs <n>] [--durable-writes]\n\nIf state-dir/--state is omitted, a per-user data directory is used.\n--api-url points at an alternative planning backend (default {DEFAULT_API_URL}).\n--timeout-secs overrides the backend request timeout (default 30).\n--durable-writes opts into slower, fsync-backed persistence."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    state_dir: Option<String>,
    api_url: Option<String>,
    timeout_secs: Option<u64>,
    durable_writes: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--state" => {
                if options.state_dir.is_some() {
                    return Err(());
                }
                let dir = args.next().ok_or(())?;
                options.state_dir = Some(dir);
            }
            "--api-url" => {
                if options.api_url.is_some() {
                    return Err(());
                }
                let url = args.next().ok_or(())?;
                options.api_url = Some(url);
            }
            "--timeout-secs" => {
                if options.timeout_secs.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let secs: u64 = raw.parse().map_err(|_| ())?;
                if secs == 0 {
                    return Err(());
                }
                options.timeout_secs = Some(secs);
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.state_dir.is_some() {
                    return Err(());
                }
                options.state_dir = Some(arg);
            }
        }
    }

    Ok(options)
}

fn default_state_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("tripdeck"))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("TRIPDECK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tripdeck=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "tripdeck".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        init_logging();

        let state_dir = options
            .state_dir
            .map(PathBuf::from)
            .unwrap_or_else(default_state_dir);
        let mut store = StateStore::new(state_dir);
        if options.durable_writes {
            store = store.with_durability(WriteDurability::Durable);
        }

        let api_url = options.api_url.as_deref().unwrap_or(DEFAULT_API_URL);
        let mut client = PlannerClient::new(api_url)?;
        if let Some(secs) = options.timeout_secs {
            client = client.with_timeout(Duration::from_secs(secs));
        }

        let session = TripSession::restore(store);
        tripdeck::tui::run(session, client)?;
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("tripdeck: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliOptions};

    #[test]
    fn parses_empty_args() {
        let options = parse_options(std::iter::empty()).expect("parse options");
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn parses_state_dir_flag() {
        let options = parse_options(["--state".to_owned(), "some/dir".to_owned()].into_iter())
            .expect("parse options");
        assert_eq!(options.state_dir.as_deref(), Some("some/dir"));
    }

    #[test]
    fn parses_positional_state_dir() {
        let options = parse_options(["some/dir".to_owned()].into_iter()).expect("parse options");
        assert_eq!(options.state_dir.as_deref(), Some("some/dir"));
    }

    #[test]
    fn parses_api_url_and_timeout() {
        let options = parse_options(
            [
                "--api-url".to_owned(),
                "http://localhost:8080".to_owned(),
                "--timeout-secs".to_owned(),
                "5".to_owned(),
            ]
            .into_iter(),
        )
        .expect("parse options");
        assert_eq!(options.api_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(options.timeout_secs, Some(5));
    }

    #[test]
    fn parses_durable_writes() {
        let options =
            parse_options(["--durable-writes".to_owned()].into_iter()).expect("parse options");
        assert!(options.durable_writes);
    }

    #[test]
    fn rejects_unknown_args() {
        parse_options(["--nope".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_duplicate_flags() {
        parse_options(
            [
                "--state".to_owned(),
                ".".to_owned(),
                "--state".to_owned(),
                "other".to_owned(),
            ]
            .into_iter(),
        )
        .unwrap_err();

        parse_options(["--durable-writes".to_owned(), "--durable-writes".to_owned()].into_iter())
            .unwrap_err();
    }

    #[test]
    fn rejects_multiple_positional_state_dirs() {
        parse_options(["one".to_owned(), "two".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_positional_state_dir_with_state_flag() {
        parse_options(["--state".to_owned(), "one".to_owned(), "two".to_owned()].into_iter())
            .unwrap_err();
    }

    #[test]
    fn rejects_missing_flag_values() {
        parse_options(["--state".to_owned()].into_iter()).unwrap_err();
        parse_options(["--api-url".to_owned()].into_iter()).unwrap_err();
        parse_options(["--timeout-secs".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_zero_or_garbage_timeout() {
        parse_options(["--timeout-secs".to_owned(), "0".to_owned()].into_iter()).unwrap_err();
        parse_options(["--timeout-secs".to_owned(), "soon".to_owned()].into_iter()).unwrap_err();
    }
}

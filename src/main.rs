// Main CLI entry point for kong-route-tester
// Uses clap for argument parsing

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use kong_route_tester::engine::ProbeEngine;
use kong_route_tester::models::TestConfig;
use kong_route_tester::parsers::load;
use kong_route_tester::reporting::{write_header, write_outcome, write_summary};
use kong_route_tester::summary::summarize;
use std::io::Write;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn cli() -> Command {
    Command::new("kong-route-tester")
        .version(clap::crate_version!())
        .about("Probe every route in a Kong declarative config and classify the responses")
        .after_help("EXAMPLES:\n  kong-route-tester --file kong.yaml --url http://localhost:8000\n  kong-route-tester -f kong.yaml -u https://api.example.com --token TOKEN --test-unauth=false\n  kong-route-tester -f kong.yaml --dry-run --verbose --max 20")
        .arg(Arg::new("file")
            .short('f')
            .long("file")
            .num_args(1)
            .default_value("kong.yaml")
            .help("Path to Kong configuration file"))
        .arg(Arg::new("url")
            .short('u')
            .long("url")
            .num_args(1)
            .default_value("http://localhost:8000")
            .help("Base URL for testing"))
        .arg(Arg::new("token")
            .short('t')
            .long("token")
            .num_args(1)
            .default_value("")
            .help("Authentication token for testing authenticated routes"))
        .arg(Arg::new("test_auth")
            .long("test-auth")
            .num_args(0..=1)
            .require_equals(true)
            .default_value("true")
            .default_missing_value("true")
            .value_parser(value_parser!(bool))
            .help("Test authenticated routes"))
        .arg(Arg::new("test_unauth")
            .long("test-unauth")
            .num_args(0..=1)
            .require_equals(true)
            .default_value("true")
            .default_missing_value("true")
            .value_parser(value_parser!(bool))
            .help("Test unauthenticated routes"))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .action(ArgAction::SetTrue)
            .help("Verbose output"))
        .arg(Arg::new("dry_run")
            .long("dry-run")
            .action(ArgAction::SetTrue)
            .help("Dry run - show what would be tested without making requests"))
        .arg(Arg::new("max")
            .long("max")
            .num_args(1)
            .default_value("0")
            .value_parser(value_parser!(usize))
            .help("Maximum number of requests to make (0 = unlimited)"))
        .arg(Arg::new("timeout")
            .long("timeout")
            .num_args(1)
            .default_value("10")
            .value_parser(value_parser!(u64).range(1..))
            .help("Per-request timeout in seconds (at least 1)"))
}

fn test_config(matches: &ArgMatches) -> TestConfig {
    let flag = |id: &str| matches.get_one::<bool>(id).copied().unwrap_or(true);
    let text = |id: &str| matches.get_one::<String>(id).cloned().unwrap_or_default();

    TestConfig::new(text("url"))
        .with_token(text("token"))
        .with_route_filter(flag("test_auth"), flag("test_unauth"))
        .with_verbose(matches.get_flag("verbose"))
        .with_dry_run(matches.get_flag("dry_run"))
        .with_max_requests(matches.get_one::<usize>("max").copied().unwrap_or(0))
        .with_request_timeout(Duration::from_secs(
            matches.get_one::<u64>("timeout").copied().unwrap_or(10),
        ))
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "kong_route_tester=debug"
    } else {
        "kong_route_tester=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn warn_on_write_error(result: std::io::Result<()>, what: &str) {
    if let Err(e) = result {
        tracing::warn!(error = %e, "Failed to write {}", what);
    }
}

#[tokio::main]
async fn main() {
    let matches = cli().get_matches();
    let config = test_config(&matches);
    init_tracing(config.verbose);

    let file = matches
        .get_one::<String>("file")
        .cloned()
        .unwrap_or_else(|| "kong.yaml".to_string());

    let configuration = match load(&file) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading Kong configuration: {}", e);
            std::process::exit(1);
        }
    };

    let engine = match ProbeEngine::new(config.clone()) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Failed to build HTTP client: {}", e);
            std::process::exit(2);
        }
    };

    let stdout = std::io::stdout();
    warn_on_write_error(
        write_header(&mut stdout.lock(), &config.base_url, config.dry_run, chrono::Local::now()),
        "report header",
    );

    let outcomes = engine
        .execute_with(&configuration, |outcome| {
            warn_on_write_error(
                write_outcome(&mut stdout.lock(), outcome, config.verbose),
                "outcome line",
            );
        })
        .await;

    let summary = summarize(&outcomes);
    let mut out = stdout.lock();
    warn_on_write_error(
        write_summary(&mut out, &summary).and_then(|_| out.flush()),
        "summary",
    );
}

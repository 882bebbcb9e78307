mod cli;
mod commands;

use clap::ArgMatches;
use cli::{CheckParams, GenerateParams, RenderParams, build_cli, verbosity};
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("generate", m)) => {
            init_logging(m);
            let params = GenerateParams::from_matches(m);
            commands::generate::run(params.into());
        }
        Some(("render", m)) => {
            init_logging(m);
            let params = RenderParams::from_matches(m);
            commands::render::run(params.into());
        }
        Some(("check", m)) => {
            init_logging(m);
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `-v`.
///
/// Commands print collected diagnostics themselves, so at the default level
/// the per-diagnostic log lines are muted.
fn init_logging(m: &ArgMatches) {
    let fallback = match verbosity(m) {
        0 => "warn,stubgen_compiler::diagnostics=error",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror command `*Args` but are populated from clap
//! - `from_matches()` pulls the fields each command uses
//! - `Into<*Args>` impls bridge dispatch and command handlers

use std::path::PathBuf;

use clap::ArgMatches;
use stubgen_compiler::Sentinel;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::generate::GenerateArgs;
use crate::commands::render::RenderArgs;

pub struct GenerateParams {
    pub descriptors: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub jobs: Option<usize>,
    pub sentinel: Sentinel,
    pub no_protected: bool,
}

impl GenerateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            descriptors: parse_descriptors(m),
            output_dir: m
                .get_one::<PathBuf>("output_dir")
                .cloned()
                .unwrap_or_else(|| PathBuf::from("stubs")),
            jobs: m.get_one::<usize>("jobs").copied(),
            sentinel: parse_sentinel(m),
            no_protected: m.get_flag("no_protected"),
        }
    }
}

impl From<GenerateParams> for GenerateArgs {
    fn from(p: GenerateParams) -> Self {
        Self {
            descriptors: p.descriptors,
            output_dir: p.output_dir,
            jobs: p.jobs,
            sentinel: p.sentinel,
            include_protected: !p.no_protected,
        }
    }
}

pub struct RenderParams {
    pub descriptor: PathBuf,
    pub sentinel: Sentinel,
    pub no_protected: bool,
    pub color: ColorChoice,
}

impl RenderParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            descriptor: m
                .get_one::<PathBuf>("descriptor")
                .cloned()
                .unwrap_or_default(),
            sentinel: parse_sentinel(m),
            no_protected: m.get_flag("no_protected"),
            color: parse_color(m),
        }
    }
}

impl From<RenderParams> for RenderArgs {
    fn from(p: RenderParams) -> Self {
        Self {
            descriptor: p.descriptor,
            sentinel: p.sentinel,
            include_protected: !p.no_protected,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub descriptors: Vec<PathBuf>,
    pub no_protected: bool,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            descriptors: parse_descriptors(m),
            no_protected: m.get_flag("no_protected"),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            descriptors: p.descriptors,
            include_protected: !p.no_protected,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

/// Number of `-v` flags on a subcommand.
pub fn verbosity(m: &ArgMatches) -> u8 {
    m.get_count("verbose")
}

fn parse_descriptors(m: &ArgMatches) -> Vec<PathBuf> {
    m.get_many::<PathBuf>("descriptors")
        .map(|paths| paths.cloned().collect())
        .unwrap_or_default()
}

fn parse_sentinel(m: &ArgMatches) -> Sentinel {
    m.get_one::<String>("sentinel")
        .and_then(|s| Sentinel::from_name(s))
        .unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands,
//! so `generate`, `render` and `check` agree on names and help text.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// One or more descriptor set files (positional).
pub fn descriptors_arg() -> Arg {
    Arg::new("descriptors")
        .value_name("DESCRIPTOR")
        .required(true)
        .num_args(1..)
        .value_parser(value_parser!(PathBuf))
        .help("Descriptor set JSON files, one per artifact")
}

/// Exactly one descriptor set file (positional).
pub fn descriptor_arg() -> Arg {
    Arg::new("descriptor")
        .value_name("DESCRIPTOR")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Descriptor set JSON file")
}

/// Output directory (-o/--output).
pub fn output_dir_arg() -> Arg {
    Arg::new("output_dir")
        .short('o')
        .long("output")
        .value_name("DIR")
        .default_value("stubs")
        .value_parser(value_parser!(PathBuf))
        .help("Directory receiving one .cs file per artifact")
}

/// Worker threads (-j/--jobs).
pub fn jobs_arg() -> Arg {
    Arg::new("jobs")
        .short('j')
        .long("jobs")
        .value_name("N")
        .value_parser(value_parser!(usize))
        .help("Worker threads for multiple artifacts (default: one per core)")
}

/// Stub body failure expression (--sentinel).
pub fn sentinel_arg() -> Arg {
    Arg::new("sentinel")
        .long("sentinel")
        .value_name("KIND")
        .default_value("throw-null")
        .value_parser(["throw-null", "not-implemented"])
        .help("Expression every stub body throws")
}

/// Skip protected declarations (--no-protected).
pub fn no_protected_arg() -> Arg {
    Arg::new("no_protected")
        .long("no-protected")
        .action(ArgAction::SetTrue)
        .help("Omit protected members and nested types")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v for debug logs, -vv for trace logs)")
}

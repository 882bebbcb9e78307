//! Command builders for the CLI.
//!
//! Each command is built from the shared arg builders in `args.rs`.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("stubgen")
        .about("Compile-only C# stubs from artifact metadata")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(generate_command())
        .subcommand(render_command())
        .subcommand(check_command())
}

/// Write one stub file per descriptor set.
pub fn generate_command() -> Command {
    Command::new("generate")
        .about("Write stub files for one or more artifacts")
        .override_usage(
            "\
  stubgen generate <DESCRIPTOR>... [-o <DIR>] [-j <N>]",
        )
        .after_help(
            r#"EXAMPLES:
  stubgen generate acme.http.json               # writes stubs/Acme.Http.cs
  stubgen generate *.json -o ref -j 4           # many artifacts, 4 workers
  stubgen generate acme.json --no-protected     # public surface only
  stubgen generate acme.json --sentinel not-implemented"#,
        )
        .arg(descriptors_arg())
        .arg(output_dir_arg())
        .arg(jobs_arg())
        .arg(sentinel_arg())
        .arg(no_protected_arg())
        .arg(verbose_arg())
}

/// Print one artifact's unit to stdout.
pub fn render_command() -> Command {
    Command::new("render")
        .about("Print the stub unit for one artifact")
        .after_help(
            r#"EXAMPLES:
  stubgen render acme.http.json                 # print to stdout
  stubgen render acme.http.json --color always | less -R"#,
        )
        .arg(descriptor_arg())
        .arg(sentinel_arg())
        .arg(no_protected_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}

/// Validate descriptor sets without writing anything.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Validate descriptor sets and print diagnostics")
        .after_help(
            r#"EXAMPLES:
  stubgen check acme.http.json                  # report skipped declarations
  stubgen check *.json --strict                 # fail on any warning"#,
        )
        .arg(descriptors_arg())
        .arg(no_protected_arg())
        .arg(strict_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}

use std::path::PathBuf;

use stubgen_compiler::diagnostics::render_error;
use stubgen_compiler::{Config, Diagnostics, MetadataReader};

use super::{CommandError, exit_with};

pub struct CheckArgs {
    pub descriptors: Vec<PathBuf>,
    pub include_protected: bool,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let config = Config::new().include_protected(args.include_protected);
    let reader = MetadataReader::new(&config);
    let mut rejected = 0;

    for path in &args.descriptors {
        let metadata = match reader.read(path) {
            Ok(metadata) => metadata,
            Err(e) => {
                rejected += 1;
                eprintln!("{}", render_error(&e, args.color));
                continue;
            }
        };

        eprint!(
            "{}",
            metadata
                .diagnostics
                .printer()
                .artifact(&metadata.artifact.name)
                .render()
        );
        if !passes(&metadata.diagnostics, args.strict) {
            rejected += 1;
        }
    }

    if rejected > 0 {
        exit_with(CommandError::CheckFailed(rejected));
    }

    // Silent on success (like cargo check)
}

pub(crate) fn passes(diagnostics: &Diagnostics, strict: bool) -> bool {
    if strict {
        !diagnostics.has_errors() && !diagnostics.has_warnings()
    } else {
        !diagnostics.has_errors()
    }
}

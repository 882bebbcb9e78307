use std::io::IsTerminal;
use std::path::PathBuf;

use stubgen_compiler::diagnostics::render_error;
use stubgen_compiler::{ArtifactReport, Config, Sentinel, generate_all};

use super::{CommandError, exit_with};

pub struct GenerateArgs {
    pub descriptors: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub jobs: Option<usize>,
    pub sentinel: Sentinel,
    pub include_protected: bool,
}

impl GenerateArgs {
    pub fn config(&self) -> Config {
        Config::new()
            .output_dir(&self.output_dir)
            .jobs(self.jobs)
            .sentinel(self.sentinel)
            .include_protected(self.include_protected)
    }
}

pub fn run(args: GenerateArgs) {
    let config = args.config();
    let colored = std::io::stderr().is_terminal();

    let results = generate_all(&args.descriptors, &config);
    let total = results.len();
    let mut failed = 0;

    for result in &results {
        match result {
            Ok(report) => {
                eprint!(
                    "{}",
                    report
                        .diagnostics
                        .printer()
                        .artifact(&report.artifact.name)
                        .render()
                );
                eprintln!("{}", summary_line(report));
            }
            Err(e) => {
                failed += 1;
                eprintln!("{}", render_error(e, colored));
            }
        }
    }

    if failed > 0 {
        exit_with(CommandError::ArtifactsFailed { failed, total });
    }
}

/// One line per artifact: status, name, destination and counts.
pub(crate) fn summary_line(report: &ArtifactReport) -> String {
    let mut line = format!(
        "{:>9} {} -> {} ({} types, {} members",
        report.status.to_string(),
        report.artifact.name,
        report.output.display(),
        report.types,
        report.members,
    );
    let counts = [
        (report.diagnostics.error_count(), "error"),
        (report.diagnostics.warning_count(), "warning"),
    ];
    for (n, what) in counts {
        match n {
            0 => {}
            1 => line.push_str(&format!(", 1 {what}")),
            n => line.push_str(&format!(", {n} {what}s")),
        }
    }
    line.push(')');
    line
}

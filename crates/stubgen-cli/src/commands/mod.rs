pub mod check;
pub mod generate;
pub mod render;


/// Why a command finished with a non-zero exit code.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{failed} of {total} artifacts failed")]
    ArtifactsFailed { failed: usize, total: usize },

    #[error("{0} descriptor set(s) did not pass the check")]
    CheckFailed(usize),
}

/// Print the error and exit with status 1.
pub fn exit_with(error: CommandError) -> ! {
    eprintln!("error: {error}");
    std::process::exit(1);
}

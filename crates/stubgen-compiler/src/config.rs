//! Configuration for stub generation.

use std::path::{Path, PathBuf};

use stubgen_core::Colors;

/// Failure expression every stub body evaluates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Sentinel {
    /// `throw null` - shortest form, raises NullReferenceException
    #[default]
    ThrowNull,
    /// `throw new System.NotImplementedException()`
    NotImplemented,
}

impl Sentinel {
    pub fn expression(self) -> &'static str {
        match self {
            Self::ThrowNull => "throw null",
            Self::NotImplemented => "throw new System.NotImplementedException()",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "throw-null" | "null" => Some(Self::ThrowNull),
            "not-implemented" => Some(Self::NotImplemented),
            _ => None,
        }
    }
}

/// Configuration threaded through one generation run.
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory receiving one file per artifact
    pub(crate) output_dir: PathBuf,
    /// Failure expression used by stub bodies
    pub(crate) sentinel: Sentinel,
    /// Whether protected members and nested types are mirrored
    pub(crate) include_protected: bool,
    /// Color configuration for terminal output
    pub(crate) colors: Colors,
    /// Worker threads for multi-artifact runs (`None` = rayon default)
    pub(crate) jobs: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("stubs"),
            sentinel: Sentinel::default(),
            include_protected: true,
            colors: Colors::OFF,
            jobs: None,
        }
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output directory.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the failure expression for stub bodies.
    pub fn sentinel(mut self, value: Sentinel) -> Self {
        self.sentinel = value;
        self
    }

    /// Set whether protected declarations are mirrored.
    pub fn include_protected(mut self, value: bool) -> Self {
        self.include_protected = value;
        self
    }

    /// Set whether to use colored output.
    pub fn colored(mut self, enabled: bool) -> Self {
        self.colors = Colors::new(enabled);
        self
    }

    /// Set the worker thread count for multi-artifact runs.
    pub fn jobs(mut self, value: Option<usize>) -> Self {
        self.jobs = value.filter(|&n| n > 0);
        self
    }

    pub fn get_output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn get_sentinel(&self) -> Sentinel {
        self.sentinel
    }

    pub fn colors(&self) -> Colors {
        self.colors
    }
}

use std::path::PathBuf;

use cardeps_graph::WalkPolicy;

use crate::cli::OutputFormat;

pub fn default_root() -> PathBuf {
    PathBuf::from(".")
}

pub fn default_out_dir() -> PathBuf {
    PathBuf::from(".")
}

pub fn default_formats() -> Vec<OutputFormat> {
    vec![OutputFormat::Dot, OutputFormat::Text]
}

pub fn default_skip_dirs() -> Vec<String> {
    WalkPolicy::default().skip_dirs
}

pub fn default_skip_files() -> Vec<String> {
    WalkPolicy::default().skip_files
}

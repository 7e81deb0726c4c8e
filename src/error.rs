//! Error types
//!
//! Load failures are fatal: a garden that fails validation never runs.

use std::path::PathBuf;

use thiserror::Error;

use crate::sim::FoodKind;

/// Scene validation failures raised while binding the core to a scene
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("expecting scene to have exactly one camera, but it has {0}")]
    CameraCount(usize),
    #[error("player transform `{0}` not found")]
    MissingPlayer(String),
    #[error("player transform `{name}` appears {count} times")]
    DuplicatePlayer { name: String, count: usize },
    #[error("bounds transform `{0}` not found")]
    MissingBounds(String),
    #[error("expected {expected} foods, found {found}")]
    FoodCount { expected: usize, found: usize },
    #[error("expected {expected} {kind:?} foods, found {found}")]
    FoodKindCount {
        kind: FoodKind,
        expected: usize,
        found: usize,
    },
}

/// Settings file failures
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read settings {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not write settings {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

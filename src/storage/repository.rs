use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{error, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::{Customer, Employee};

/// The full persisted state of the bank: every customer, every employee, and
/// an opaque bag of globals the core carries along without interpreting.
///
/// Any of the three top-level keys may be missing on disk; each defaults to
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub globals: Map<String, Value>,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("No bank file at {0}")]
    NotFound(PathBuf),

    #[error("Unable to read bank file at {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Bank file at {path} is not valid: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Unable to encode bank file for {path}: {source}")]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Unable to write bank file to {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// The persistence boundary. Owns nothing but the path; every load returns a
/// fresh in-memory snapshot and every save rewrites the whole file.
///
/// The write is a plain truncating write, not an atomic replace; a crash
/// mid-save can leave a truncated file behind.
#[derive(Debug, Clone)]
pub struct Repository {
    path: PathBuf,
}

impl Repository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn load(&self) -> Result<Snapshot, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                warn!("no bank file found at {}", self.path.display());
                return Err(StorageError::NotFound(self.path.clone()));
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&contents).map_err(|source| StorageError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    pub fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        let contents =
            serde_json::to_string_pretty(snapshot).map_err(|source| StorageError::Encode {
                path: self.path.clone(),
                source,
            })?;

        fs::write(&self.path, contents).map_err(|source| {
            error!("unable to write to disk: {}", source);
            StorageError::Write {
                path: self.path.clone(),
                source,
            }
        })
    }
}

//! Loading of the seed dataset supplied by the rendering shell at start-up.

pub mod seed;

use std::path::{Path, PathBuf};

use crate::errors::LedgerError;

pub use seed::{SeedDataset, SeedRecord};

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over where the start-up dataset comes from.
pub trait SeedSource {
    fn load(&self) -> Result<SeedDataset>;
}

/// Seed dataset stored as a JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonSeedFile {
    path: PathBuf,
}

impl JsonSeedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SeedSource for JsonSeedFile {
    fn load(&self) -> Result<SeedDataset> {
        seed::load_seed_from_file(&self.path)
    }
}

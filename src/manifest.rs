//! Run manifest: generation metadata for reproducibility.
//!
//! Every run directory gets a `manifest.json` recording the seed, profile,
//! program count, and generator version, so any batch can be regenerated
//! exactly.

use std::fs;
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generator version information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorInfo {
    pub version: String,
}

impl GeneratorInfo {
    pub fn current() -> Self {
        Self {
            version: VERSION.to_string(),
        }
    }
}

/// The complete manifest written to `manifest.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub seed: u64,
    pub profile: String,
    pub count: usize,
    pub generated_at_unix: u64,
    pub generator: GeneratorInfo,
}

impl Manifest {
    pub fn new(seed: u64, profile: String, count: usize) -> Self {
        let generated_at_unix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            seed,
            profile,
            count,
            generated_at_unix,
            generator: GeneratorInfo::current(),
        }
    }

    /// Write the manifest to `dir/manifest.json`.
    pub fn write_to_dir(&self, dir: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        fs::write(dir.join("manifest.json"), json)
    }
}

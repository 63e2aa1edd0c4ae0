// Application state module
// Immutable per-process state derived from the startup configuration

use std::path::{Path, PathBuf};

use super::types::Config;

/// Shared application state
///
/// Built once at startup and handed to every connection task via `Arc`.
/// Nothing here mutates after construction, so no locking is needed.
pub struct AppState {
    pub config: Config,
    asset_root: PathBuf,
    index_file: PathBuf,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let asset_root = PathBuf::from(&config.assets.root);
        let index_file = asset_root.join(&config.assets.index_file);
        Self {
            config,
            asset_root,
            index_file,
        }
    }

    /// Directory every resolved path must stay under
    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }

    /// Entry document served for any unmatched path
    pub fn index_file(&self) -> &Path {
        &self.index_file
    }
}

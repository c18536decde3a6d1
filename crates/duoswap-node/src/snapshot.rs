use std::fs;
use std::path::Path;

use anyhow::Result;
use duoswap_core::serialize;
use duoswap_pool::PoolRegistry;

/// Load a registry snapshot, if one exists
pub fn load_registry(path: &Path) -> Result<Option<PoolRegistry>> {
    if !path.exists() {
        return Ok(None);
    }
    let bytes = fs::read(path)?;
    let registry = serialize::from_bytes(&bytes)?;
    Ok(Some(registry))
}

/// Write a registry snapshot via temp file and rename
pub fn save_registry(registry: &PoolRegistry, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let bytes = serialize::to_bytes(registry)?;
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, &bytes)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

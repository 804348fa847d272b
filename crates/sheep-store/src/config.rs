use anyhow::Context;
use std::path::PathBuf;

/// Resolve the location of the shared results database.
///
/// `SHEEP_HOME` names the installation root; without it the store lives
/// under `~/SHEEP`. Either way the file is `frontend/sheep.db` below that
/// root. Failing to resolve a root is fatal at startup.
pub fn db_location() -> anyhow::Result<PathBuf> {
    let root = match std::env::var("SHEEP_HOME") {
        Ok(sheep_home) => PathBuf::from(sheep_home),
        Err(_) => {
            let home = std::env::var("HOME")
                .context("neither SHEEP_HOME nor HOME is set, cannot locate sheep.db")?;
            PathBuf::from(home).join("SHEEP")
        }
    };
    Ok(root.join("frontend").join("sheep.db"))
}

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt as _;

use super::{store::RecordBackend, user_record::UserRecord};

/// Stores the user record as human readable JSON, readable and writable by the owner only.
pub struct UserRecordFile {
    path: PathBuf,
}

impl UserRecordFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordBackend for UserRecordFile {
    async fn load(&self) -> Result<Option<UserRecord>> {
        load(&self.path).await
    }

    async fn save(&self, record: &UserRecord) -> Result<()> {
        save(record, &self.path).await
    }
}

/// Returns Ok(None) if the file doesn't exist yet
pub async fn load(path: &Path) -> Result<Option<UserRecord>> {
    log::info!("Loading user record from {}...", path.display());
    if !tokio::fs::try_exists(path).await? {
        log::info!("Loading user record...not found");
        return Ok(None);
    }

    let content = tokio::fs::read(path).await?;
    let record = serde_json::from_slice(&content)?;

    log::info!("Loading user record...done");

    Ok(Some(record))
}

pub async fn save(record: &UserRecord, path: &Path) -> Result<()> {
    log::info!("Saving user record...");

    let content = serde_json::to_vec_pretty(record)?;

    // First write to temporary file so a failed write never leaves a half-written record behind
    let filename = path
        .file_name()
        .ok_or_else(|| anyhow!("Path has no filename"))?
        .to_str()
        .ok_or_else(|| anyhow!("Filename isn't valid utf-8"))?;
    let tmppath = path.with_file_name(format!("{}.temp", filename));
    let mut file = create_owner_only(&tmppath).await?;
    file.write_all(&content).await?;
    file.sync_all().await?;
    drop(file);

    // Ok, writing succeeded, let's now replace the real file with the tmpfile
    tokio::fs::rename(&tmppath, path).await?;

    log::info!("Saving user record...done");

    Ok(())
}

async fn create_owner_only(path: &Path) -> Result<tokio::fs::File> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);
    Ok(options.open(path).await?)
}

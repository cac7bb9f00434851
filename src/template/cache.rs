// file: src/template/cache.rs
// version: 1.0.0
// guid: 9d24b6e1-0a5f-4c87-b3d2-f1e7a4c0865b

//! Queries and mutations of the host's template cache directory

use super::candidate::{TemplateFilter, ARCHIVE_EXTENSIONS};
use crate::error::{Result, TemplateError};
use crate::network::{RemoteCommand, RemoteExecutor};
use serde::Serialize;
use tracing::debug;

/// Directory where `pveam` stores downloaded templates on the `local` storage
pub const CACHE_DIR: &str = "/var/lib/vz/template/cache";

/// A template archive present in the remote cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CachedTemplate {
    pub name: String,
}

impl CachedTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Absolute path on the remote host
    pub fn remote_path(&self) -> String {
        remote_path(&self.name)
    }
}

/// Absolute cache path for a template name
pub fn remote_path(name: &str) -> String {
    format!("{}/{}", CACHE_DIR, name)
}

/// Whether the named template is already cached
pub async fn exists<E: RemoteExecutor + ?Sized>(executor: &mut E, name: &str) -> Result<bool> {
    let command = RemoteCommand::file_exists(&remote_path(name));
    let output = executor.run(&command).await?;

    match output.exit_code {
        Some(0) => Ok(true),
        Some(1) => Ok(false),
        code => Err(TemplateError::remote(command.render(), code, output.diagnostic())),
    }
}

/// Cache entries with a template archive extension, most recently modified first
pub async fn list<E: RemoteExecutor + ?Sized>(executor: &mut E) -> Result<Vec<CachedTemplate>> {
    let listing = executor
        .run_with_output(&RemoteCommand::list_directory(CACHE_DIR))
        .await?;

    Ok(parse_listing(&listing))
}

/// Parse `ls -1t` output, keeping only archives
pub fn parse_listing(listing: &str) -> Vec<CachedTemplate> {
    listing
        .lines()
        .map(str::trim)
        .filter(|name| ARCHIVE_EXTENSIONS.iter().any(|ext| name.ends_with(ext)))
        .map(CachedTemplate::new)
        .collect()
}

/// Supported entries older than the newest one, given a newest-first listing
pub fn superseded<'a>(entries: &'a [CachedTemplate], filter: &TemplateFilter) -> Vec<&'a CachedTemplate> {
    entries
        .iter()
        .filter(|entry| filter.matches(&entry.name))
        .skip(1)
        .collect()
}

/// Delete one cached template
pub async fn remove<E: RemoteExecutor + ?Sized>(executor: &mut E, entry: &CachedTemplate) -> Result<()> {
    debug!("Removing {}", entry.remote_path());
    executor
        .run_with_output(&RemoteCommand::remove_file(&entry.remote_path()))
        .await
        .map(|_| ())
}

// file: src/template/selector.rs
// version: 1.0.0
// guid: 3f7a1c95-e2d8-4b06-a9f4-6c0e8b2d5a17

//! Template selection by fixed release preference

use super::candidate::{TemplateCandidate, TemplateFilter, VersionTag};
use crate::error::{Result, TemplateError};
use crate::network::{RemoteCommand, RemoteExecutor};
use tracing::{debug, info, warn};

/// Repository section holding base system templates
pub const SYSTEM_SECTION: &str = "system";

/// First candidate of the most preferred release present.
///
/// Rows keep their input order within a release; no version comparison
/// beyond the fixed preference table.
pub fn select_candidate(candidates: &[TemplateCandidate]) -> Option<&TemplateCandidate> {
    VersionTag::PREFERENCE
        .iter()
        .find_map(|tag| candidates.iter().find(|c| c.version == *tag))
}

/// Lists the repository and picks the template to provision
pub struct TemplateSelector<'a> {
    filter: &'a TemplateFilter,
}

impl<'a> TemplateSelector<'a> {
    pub fn new(filter: &'a TemplateFilter) -> Self {
        Self { filter }
    }

    /// Fetch the supported candidates currently offered by the host
    pub async fn fetch_candidates<E: RemoteExecutor + ?Sized>(&self, executor: &mut E) -> Result<Vec<TemplateCandidate>> {
        let listing = executor
            .run_with_output(&RemoteCommand::list_available(SYSTEM_SECTION))
            .await?;

        let candidates = self.filter.parse_listing(&listing);
        debug!("{} supported templates in listing", candidates.len());
        Ok(candidates)
    }

    /// Select a template, refreshing the index once if the listing is empty
    pub async fn select<E: RemoteExecutor + ?Sized>(&self, executor: &mut E) -> Result<TemplateCandidate> {
        let mut candidates = self.fetch_candidates(executor).await?;

        if candidates.is_empty() {
            warn!("No supported templates listed, refreshing the template index");
            executor.run_with_output(&RemoteCommand::refresh_index()).await?;
            candidates = self.fetch_candidates(executor).await?;
        }

        if candidates.is_empty() {
            return Err(TemplateError::no_candidate(
                "the host lists no Ubuntu LTS amd64 templates, even after 'pveam update'",
            ));
        }

        let selected = select_candidate(&candidates).cloned().ok_or_else(|| {
            TemplateError::no_candidate("no listed template matches a preferred release")
        })?;

        info!("Selected template {} (Ubuntu {})", selected.name, selected.version);
        Ok(selected)
    }
}

// file: src/provision/mod.rs
// version: 1.0.0
// guid: a2e6f0d4-5c18-4b9a-bf37-c81d2e94a065

//! Template provisioning workflow
//!
//! Validates the connection, selects the newest supported template, makes
//! sure it is cached on the host and optionally prunes older templates.

use crate::config::ProvisionConfig;
use crate::error::{Result, TemplateError};
use crate::network::{RemoteCommand, RemoteExecutor};
use crate::security::ConnectionValidator;
use crate::template::{cache, TemplateCandidate, TemplateFilter, TemplateSelector};
use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Storage that maps to the template cache directory
pub const CACHE_STORAGE: &str = "local";

/// Stages of a provisioning run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProvisionState {
    Start,
    ConfigLoaded,
    ConnectionValidated,
    CandidateSelected,
    /// Template already present, download skipped
    Cached,
    Downloading,
    DownloadVerified,
    CleanedUp,
    Reported,
    Done,
}

impl fmt::Display for ProvisionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProvisionState::Start => "start",
            ProvisionState::ConfigLoaded => "config-loaded",
            ProvisionState::ConnectionValidated => "connection-validated",
            ProvisionState::CandidateSelected => "candidate-selected",
            ProvisionState::Cached => "cached",
            ProvisionState::Downloading => "downloading",
            ProvisionState::DownloadVerified => "download-verified",
            ProvisionState::CleanedUp => "cleaned-up",
            ProvisionState::Reported => "reported",
            ProvisionState::Done => "done",
        };
        f.write_str(name)
    }
}

/// Result of the optional cleanup stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupOutcome {
    /// Entries that were deleted
    pub removed: Vec<String>,

    /// Entries whose deletion failed; the run continued past them
    pub failed: Vec<String>,
}

/// Everything the completion report needs
#[derive(Debug, Clone, Serialize)]
pub struct ProvisionSummary {
    pub template: TemplateCandidate,
    pub remote_path: String,
    pub storage: String,
    pub host_version: String,
    pub downloaded: bool,
    pub cleanup: Option<CleanupOutcome>,
    pub cache_contents: Vec<String>,
    pub states: Vec<ProvisionState>,
    pub completed_at: DateTime<Utc>,
}

/// Drives one provisioning run against a remote host
pub struct Provisioner<'a> {
    config: &'a ProvisionConfig,
    filter: TemplateFilter,
    show_progress: bool,
    states: Vec<ProvisionState>,
}

impl<'a> Provisioner<'a> {
    /// Create a provisioner for an already loaded configuration
    pub fn new(config: &'a ProvisionConfig) -> Result<Self> {
        Ok(Self {
            config,
            filter: TemplateFilter::new()?,
            show_progress: false,
            states: vec![ProvisionState::Start, ProvisionState::ConfigLoaded],
        })
    }

    /// Show a spinner while the download runs
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn state(&self) -> ProvisionState {
        self.states.last().copied().unwrap_or(ProvisionState::Start)
    }

    fn advance(&mut self, next: ProvisionState) {
        debug!("State {} -> {}", self.state(), next);
        self.states.push(next);
    }

    /// Run the workflow to completion; any error aborts the run
    pub async fn run<E: RemoteExecutor + ?Sized>(mut self, executor: &mut E) -> Result<ProvisionSummary> {
        let host_version = ConnectionValidator::new(&self.config.connection)
            .validate(executor)
            .await?;
        self.advance(ProvisionState::ConnectionValidated);

        let template = TemplateSelector::new(&self.filter).select(executor).await?;
        self.advance(ProvisionState::CandidateSelected);

        let cached = cache::exists(executor, &template.name).await?;
        let mut downloaded = false;
        let mut cleanup = None;

        if cached && !self.config.force_download {
            info!("Template {} already cached, skipping download", template.name);
            self.advance(ProvisionState::Cached);
        } else {
            if cached {
                info!("FORCE_DOWNLOAD is set, downloading {} again", template.name);
            }
            self.advance(ProvisionState::Downloading);
            self.download(executor, &template).await?;

            if !cache::exists(executor, &template.name).await? {
                return Err(TemplateError::remote(
                    RemoteCommand::download(CACHE_STORAGE, &template.name).render(),
                    Some(0),
                    format!(
                        "download reported success but {} is missing",
                        cache::remote_path(&template.name)
                    ),
                ));
            }
            downloaded = true;
            self.advance(ProvisionState::DownloadVerified);

            if self.config.cleanup_old_templates {
                cleanup = Some(self.cleanup(executor).await);
                self.advance(ProvisionState::CleanedUp);
            } else {
                debug!("CLEANUP_OLD_TEMPLATES not set, keeping older templates");
            }
        }

        let cache_contents = match cache::list(executor).await {
            Ok(entries) => entries.into_iter().map(|e| e.name).collect(),
            Err(e) => {
                warn!("Could not list the template cache: {}", e);
                Vec::new()
            }
        };
        self.advance(ProvisionState::Reported);
        self.advance(ProvisionState::Done);

        Ok(ProvisionSummary {
            remote_path: cache::remote_path(&template.name),
            storage: CACHE_STORAGE.to_string(),
            template,
            host_version,
            downloaded,
            cleanup,
            cache_contents,
            states: self.states,
            completed_at: Utc::now(),
        })
    }

    async fn download<E: RemoteExecutor + ?Sized>(&self, executor: &mut E, template: &TemplateCandidate) -> Result<()> {
        info!("Downloading {} to storage '{}'", template.name, CACHE_STORAGE);

        let spinner = self.show_progress.then(|| download_spinner(&template.name));
        let result = executor
            .run_with_output(&RemoteCommand::download(CACHE_STORAGE, &template.name))
            .await;

        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        result?;
        info!("Download of {} finished", template.name);
        Ok(())
    }

    /// Keep the newest supported template, delete the rest; failures only warn
    async fn cleanup<E: RemoteExecutor + ?Sized>(&self, executor: &mut E) -> CleanupOutcome {
        let mut outcome = CleanupOutcome::default();

        let entries = match cache::list(executor).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Could not list the template cache, skipping cleanup: {}", e);
                return outcome;
            }
        };

        let old = cache::superseded(&entries, &self.filter);
        if old.is_empty() {
            info!("No older templates to remove");
            return outcome;
        }

        for entry in old {
            match cache::remove(executor, entry).await {
                Ok(()) => {
                    info!("Removed old template {}", entry.name);
                    outcome.removed.push(entry.name.clone());
                }
                Err(e) => {
                    warn!("Failed to remove {}: {}", entry.name, e);
                    outcome.failed.push(entry.name.clone());
                }
            }
        }

        outcome
    }
}

fn download_spinner(name: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Downloading {}", name));
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

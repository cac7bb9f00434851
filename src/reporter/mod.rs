// file: src/reporter/mod.rs
// version: 2.0.0
// guid: 6f3d0b8a-1e94-4c2b-a7d5-c9e82f16b053

//! Human-readable output for the terminal

use crate::error::TemplateError;
use crate::preflight::PreflightReport;
use crate::provision::ProvisionSummary;
use colored::Colorize;
use std::fmt::Write;

/// Categorized one-line diagnostic for a fatal error
pub fn format_error(error: &TemplateError) -> String {
    format!("{} {}", format!("[{}]", error.category()).as_str().red().bold(), error)
}

/// Preflight checks as ✓/✗ lines followed by a verdict
pub fn format_preflight(report: &PreflightReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Preflight checks".bold());

    for check in &report.checks {
        let mark = if check.passed { "✓".green() } else { "✗".red() };
        let _ = writeln!(out, "  {} {:<14} {}", mark, check.name, check.detail);
    }

    let verdict = if report.passed {
        "Ready: the host can be provisioned".green().bold()
    } else {
        "Not ready: fix the failed check above".red().bold()
    };
    let _ = writeln!(out, "{}", verdict);
    out
}

/// Completion summary for a provisioning run
pub fn format_summary(summary: &ProvisionSummary) -> String {
    let mut out = String::new();
    let name = &summary.template.name;

    let _ = writeln!(out, "{}", "Template provisioning complete".green().bold());
    let _ = writeln!(out, "  Host:      {}", summary.host_version);
    let _ = writeln!(out, "  Template:  {} (Ubuntu {})", name, summary.template.version);
    let _ = writeln!(out, "  Path:      {}", summary.remote_path);
    let _ = writeln!(
        out,
        "  Status:    {}",
        if summary.downloaded { "downloaded" } else { "already cached" }
    );

    if let Some(cleanup) = &summary.cleanup {
        let _ = writeln!(out, "  Removed:   {}", cleanup.removed.len());
        for failed in &cleanup.failed {
            let _ = writeln!(out, "  {} could not remove {}", "⚠".yellow(), failed);
        }
    }

    let _ = writeln!(out, "\n{}", "Cached templates:".bold());
    if summary.cache_contents.is_empty() {
        let _ = writeln!(out, "  (none listed)");
    }
    for entry in &summary.cache_contents {
        let _ = writeln!(out, "  {}", entry);
    }

    let _ = writeln!(out, "\n{}", "Example usage:".bold());
    let _ = writeln!(
        out,
        "  pct create <vmid> {}:vztmpl/{} --hostname <name> --memory 1024 --net0 name=eth0,bridge=vmbr0,ip=dhcp",
        summary.storage, name
    );
    let _ = writeln!(out, "  pct start <vmid>");
    let _ = writeln!(out, "  pveam list {}", summary.storage);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provision::{CleanupOutcome, ProvisionState};
    use crate::template::{TemplateCandidate, VersionTag};

    fn summary() -> ProvisionSummary {
        ProvisionSummary {
            template: TemplateCandidate {
                name: "ubuntu-24.04-standard_24.04-2_amd64.tar.zst".to_string(),
                version: VersionTag::V24_04,
            },
            remote_path: "/var/lib/vz/template/cache/ubuntu-24.04-standard_24.04-2_amd64.tar.zst".to_string(),
            storage: "local".to_string(),
            host_version: "pve-manager/8.2.4".to_string(),
            downloaded: true,
            cleanup: Some(CleanupOutcome {
                removed: vec!["ubuntu-20.04-standard_20.04-1_amd64.tar.gz".to_string()],
                failed: vec!["ubuntu-22.04-standard_22.04-1_amd64.tar.zst".to_string()],
            }),
            cache_contents: vec!["ubuntu-24.04-standard_24.04-2_amd64.tar.zst".to_string()],
            states: vec![ProvisionState::Done],
            completed_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_summary_includes_usage_and_path() {
        colored::control::set_override(false);

        let text = format_summary(&summary());

        assert!(text.contains("local:vztmpl/ubuntu-24.04-standard_24.04-2_amd64.tar.zst"));
        assert!(text.contains("Path:      /var/lib/vz/template/cache/ubuntu-24.04"));
        assert!(text.contains("could not remove ubuntu-22.04-standard_22.04-1_amd64.tar.zst"));
        assert!(text.contains("Removed:   1"));
    }

    #[test]
    fn test_error_line_has_category() {
        colored::control::set_override(false);

        let line = format_error(&TemplateError::no_candidate("empty listing"));

        assert_eq!(line, "[TEMPLATE] No supported template found: empty listing");
    }
}

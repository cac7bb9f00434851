// file: src/template/candidate.rs
// version: 1.0.0
// guid: b80f4e2c-97d1-4a3e-b6c5-0e2a91d7f4b8

//! Typed parsing of template names and repository listings

use crate::error::{Result, TemplateError};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Distribution family the toolkit provisions
pub const SUPPORTED_FAMILY: &str = "ubuntu";

/// Architecture the toolkit provisions
pub const SUPPORTED_ARCH: &str = "amd64";

/// Archive extensions the host uses for container templates
pub const ARCHIVE_EXTENSIONS: [&str; 3] = [".tar.zst", ".tar.gz", ".tar.xz"];

/// Supported LTS release tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VersionTag {
    #[serde(rename = "24.04")]
    V24_04,
    #[serde(rename = "22.04")]
    V22_04,
    #[serde(rename = "20.04")]
    V20_04,
}

impl VersionTag {
    /// Most preferred first
    pub const PREFERENCE: [VersionTag; 3] = [VersionTag::V24_04, VersionTag::V22_04, VersionTag::V20_04];

    pub fn as_str(&self) -> &'static str {
        match self {
            VersionTag::V24_04 => "24.04",
            VersionTag::V22_04 => "22.04",
            VersionTag::V20_04 => "20.04",
        }
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VersionTag {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "24.04" => Ok(VersionTag::V24_04),
            "22.04" => Ok(VersionTag::V22_04),
            "20.04" => Ok(VersionTag::V20_04),
            _ => Err(TemplateError::no_candidate(format!("unsupported release {}", s))),
        }
    }
}

/// A downloadable template the repository offers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateCandidate {
    pub name: String,
    pub version: VersionTag,
}

/// Matches `ubuntu-<version>-standard_<build>_amd64.<archive>` file names
pub struct TemplateFilter {
    pattern: Regex,
}

impl TemplateFilter {
    pub fn new() -> Result<Self> {
        let extensions = ARCHIVE_EXTENSIONS
            .iter()
            .map(|ext| regex::escape(ext))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = Regex::new(&format!(
            r"^{}-(\d{{2}}\.\d{{2}})-standard_[A-Za-z0-9.+~-]+_{}(?:{})$",
            SUPPORTED_FAMILY, SUPPORTED_ARCH, extensions
        ))
        .map_err(|e| TemplateError::config(format!("Invalid template pattern: {}", e)))?;

        Ok(Self { pattern })
    }

    /// True when the file name follows the supported family/arch convention
    pub fn matches(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }

    /// Parse one template name; unsupported names and releases yield `None`
    pub fn parse_name(&self, name: &str) -> Option<TemplateCandidate> {
        let cap = self.pattern.captures(name)?;
        let version = cap[1].parse::<VersionTag>().ok()?;

        Some(TemplateCandidate {
            name: name.to_string(),
            version,
        })
    }

    /// Parse `pveam available` output (`<section> <name>` rows), keeping row order
    pub fn parse_listing(&self, listing: &str) -> Vec<TemplateCandidate> {
        listing
            .lines()
            .filter_map(|row| row.split_whitespace().last())
            .filter_map(|name| self.parse_name(name))
            .collect()
    }
}

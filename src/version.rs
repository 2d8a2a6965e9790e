use std::fmt;
use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::{GitPushError, Result};

/// Pattern for a semantic-version token of the form `v<major>.<minor>.<patch>`.
const VERSION_PATTERN: &str = r"v\d+\.\d+\.\d+";

/// A semantic-version token extracted from free text (e.g. "v1.2.3").
///
/// The token is kept verbatim; the numeric triplet is deliberately not
/// validated beyond the digit pattern (leading zeros and ranges pass through).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionToken(String);

impl VersionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Extracts the first version token from free text.
///
/// Scans `text` for the first substring matching `v\d+\.\d+\.\d+` and returns
/// it. Case-sensitive, no normalization.
///
/// # Arguments
/// * `text` - Free text that should contain a version token
/// * `source` - Name of the text's origin, used in the error message
///
/// # Returns
/// * `Ok(VersionToken)` - The first match
/// * `Err` - If no token is present in `text`
pub fn extract_version(text: &str, source: &str) -> Result<VersionToken> {
    let re = Regex::new(VERSION_PATTERN).expect("version pattern is valid");
    match re.find(text) {
        Some(m) => Ok(VersionToken(m.as_str().to_string())),
        None => Err(GitPushError::version(format!(
            "no version token in {}",
            source
        ))),
    }
}

/// Reads the configured version file and extracts its version token.
///
/// This is the single canonical file-reading helper; every command that needs
/// a version token goes through it with the configured file name.
pub fn read_version_file(path: &Path) -> Result<VersionToken> {
    let text = fs::read_to_string(path)?;
    extract_version(&text, &path.display().to_string())
}

/// Checks whether the local version already appears as a tag in a remote
/// listing.
///
/// Extracts the version token from `local_text` (an error if absent), then
/// matches `/<token>` as a whole word anywhere in `remote_listing`. All
/// matches are echoed for diagnostics, but one is enough for a `true` result.
///
/// Not called from the push flow: the original force-push path deletes the
/// remote tag without consulting this check.
pub fn tag_exists(local_text: &str, remote_listing: &str) -> Result<bool> {
    let token = extract_version(local_text, "local version text")?;

    let pattern = format!(r"(?m)/{}\b", regex::escape(token.as_str()));
    let re = Regex::new(&pattern)
        .map_err(|e| GitPushError::version(format!("bad tag pattern: {}", e)))?;

    let matches: Vec<&str> = re.find_iter(remote_listing).map(|m| m.as_str()).collect();
    println!("{} matches", matches.len());
    for m in &matches {
        println!("{}", m);
    }

    Ok(!matches.is_empty())
}

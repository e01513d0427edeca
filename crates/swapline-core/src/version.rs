//! Protocol version helpers

pub use semver::Version;

use crate::errors::Result;

/// Oldest protocol version this workspace can execute
pub const MIN_SUPPORTED_VERSION: Version = Version::new(1, 95, 0);

pub fn parse_version(input: &str) -> Result<Version> {
    Ok(Version::parse(input.trim())?)
}

/// Pick the entry with the highest threshold not above `version`.
///
/// `table` must be sorted by ascending threshold.
pub fn select_versioned<'a, T>(table: &'a [(Version, T)], version: &Version) -> Option<&'a T> {
    table
        .iter()
        .rev()
        .find(|(threshold, _)| threshold <= version)
        .map(|(_, item)| item)
}

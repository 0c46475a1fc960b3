//! Volume size reporting.

use std::fmt;

use serde::{Serialize, Serializer};

/// Approximate size of the model volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VolumeSize {
    NotCreated,
    Unknown,
    Known(String),
}

impl fmt::Display for VolumeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotCreated => f.write_str("not created"),
            Self::Unknown => f.write_str("unknown"),
            Self::Known(size) => f.write_str(size),
        }
    }
}

impl Serialize for VolumeSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Extract `volume`'s size from `docker system df -v` output.
///
/// Only rows of the "Local Volumes space usage" section are considered; the
/// size is the last column of the row whose first column is the volume name.
#[must_use]
pub fn parse_df_size(df_output: &str, volume: &str) -> Option<String> {
    let mut in_volumes = false;
    for line in df_output.lines() {
        let trimmed = line.trim();
        if trimmed.contains("usage:") {
            in_volumes = trimmed.starts_with("Local Volumes");
            continue;
        }
        if !in_volumes {
            continue;
        }
        let mut cols = trimmed.split_whitespace();
        if cols.next() == Some(volume) {
            return cols.last().map(str::to_string);
        }
    }
    None
}

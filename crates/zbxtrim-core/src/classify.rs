//! Threshold classification of retention values

use crate::duration::parse_duration;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which retention setting of an item is being judged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetentionKind {
    /// Raw per-measurement values
    History,
    /// Hourly min/avg/max aggregates
    Trends,
}

impl RetentionKind {
    /// Longest retention (in days) that is still acceptable
    pub fn threshold_days(self) -> f64 {
        match self {
            RetentionKind::History => 7.0,
            RetentionKind::Trends => 30.0,
        }
    }

    /// Token written back when the current value is too long
    pub fn remediation_target(self) -> &'static str {
        match self {
            RetentionKind::History => "7d",
            RetentionKind::Trends => "30d",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RetentionKind::History => "History",
            RetentionKind::Trends => "Trends",
        }
    }
}

impl fmt::Display for RetentionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of judging one retention token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub needs_update: bool,
    pub days: f64,
    /// Target token when `needs_update`, otherwise the original token
    pub replacement: String,
}

pub fn classify(kind: RetentionKind, token: &str) -> Classification {
    let days = parse_duration(token);
    let needs_update = days > kind.threshold_days();
    let replacement = if needs_update {
        kind.remediation_target().to_string()
    } else {
        token.to_string()
    };

    Classification {
        needs_update,
        days,
        replacement,
    }
}

//! Selection policy for remediation planning

use serde::{Deserialize, Serialize};

/// History value shipped by stock Zabbix templates
pub const LEGACY_HISTORY: &str = "31d";

/// Trends value shipped by stock Zabbix templates
pub const LEGACY_TRENDS: &str = "365d";

/// Default number of templates taken by the top-N policy
pub const TOP_TEMPLATES: usize = 10;

/// Default per-template item cap for the top-N policy
pub const TOP_ITEMS_PER_TEMPLATE: usize = 50;

/// How an item is judged eligible for remediation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Either kind exceeds its threshold
    Threshold,
    /// History is exactly `31d` and trends exactly `365d`
    ExactLegacy,
}

/// Which templates and items end up in a remediation plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionPolicy {
    pub match_mode: MatchMode,

    /// Keep only the N templates with the most qualifying items (None = all)
    pub max_templates: Option<usize>,

    /// Truncate each template's items in enumeration order (None = all)
    pub max_items_per_template: Option<usize>,
}

impl SelectionPolicy {
    /// Every qualifying template and item
    pub fn full() -> Self {
        Self {
            match_mode: MatchMode::Threshold,
            max_templates: None,
            max_items_per_template: None,
        }
    }

    /// The most affected templates, with a per-template item cap
    pub fn top(max_templates: usize, max_items_per_template: usize) -> Self {
        Self {
            match_mode: MatchMode::Threshold,
            max_templates: Some(max_templates),
            max_items_per_template: Some(max_items_per_template),
        }
    }

    /// Only items still carrying the stock `31d`/`365d` pair
    pub fn exact_legacy() -> Self {
        Self {
            match_mode: MatchMode::ExactLegacy,
            max_templates: None,
            max_items_per_template: None,
        }
    }
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self::full()
    }
}

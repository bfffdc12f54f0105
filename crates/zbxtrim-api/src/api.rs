//! Operations the commands need from a monitoring backend

use crate::error::ApiError;
use serde::Serialize;
use zbxtrim_core::{ItemRecord, TemplateRecord, LEGACY_HISTORY, LEGACY_TRENDS};

/// Exact-match filter on item retention fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItemFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trends: Option<String>,
}

impl ItemFilter {
    /// Items still carrying the stock `31d`/`365d` retention pair
    pub fn legacy() -> Self {
        Self {
            history: Some(LEGACY_HISTORY.to_string()),
            trends: Some(LEGACY_TRENDS.to_string()),
        }
    }

    pub fn matches(&self, item: &ItemRecord) -> bool {
        self.history.as_ref().is_none_or(|h| *h == item.history)
            && self.trends.as_ref().is_none_or(|t| *t == item.trends)
    }
}

/// Read and write access to templates and items.
///
/// Implemented by [`crate::ZabbixClient`]; commands are generic over it so
/// they can run against an in-memory backend in tests.
#[allow(async_fn_in_trait)]
pub trait MonitoringApi {
    /// All templates, optionally with their items
    async fn list_templates(&self, include_items: bool) -> Result<Vec<TemplateRecord>, ApiError>;

    /// Items of one template, optionally restricted by `filter`
    async fn list_items(
        &self,
        template_id: &str,
        filter: Option<&ItemFilter>,
    ) -> Result<Vec<ItemRecord>, ApiError>;

    /// Rewrite the given retention values of one item; `None` leaves a kind unchanged
    async fn update_item(
        &self,
        item_id: &str,
        history: Option<&str>,
        trends: Option<&str>,
    ) -> Result<(), ApiError>;
}

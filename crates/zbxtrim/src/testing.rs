//! In-memory monitoring backend for command tests

use std::cell::RefCell;
use std::collections::HashSet;
use zbxtrim_api::{ApiError, ItemFilter, MonitoringApi, RpcError};
use zbxtrim_core::{ItemRecord, TemplateRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedUpdate {
    pub item_id: String,
    pub history: Option<String>,
    pub trends: Option<String>,
}

pub struct FakeApi {
    /// `None` makes every listing call fail
    templates: Option<Vec<TemplateRecord>>,
    failing_items: HashSet<String>,
    /// Items whose update drops the connection
    disconnecting_items: HashSet<String>,
    /// Listing failures are connection losses rather than query errors
    disconnected: bool,
    pub updates: RefCell<Vec<RecordedUpdate>>,
    pub item_queries: RefCell<Vec<(String, Option<ItemFilter>)>>,
}

impl FakeApi {
    pub fn new(templates: Vec<TemplateRecord>) -> Self {
        Self {
            templates: Some(templates),
            failing_items: HashSet::new(),
            disconnecting_items: HashSet::new(),
            disconnected: false,
            updates: RefCell::new(Vec::new()),
            item_queries: RefCell::new(Vec::new()),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            templates: None,
            ..Self::new(Vec::new())
        }
    }

    pub fn disconnected() -> Self {
        Self {
            disconnected: true,
            ..Self::unavailable()
        }
    }

    pub fn failing_on(mut self, item_id: &str) -> Self {
        self.failing_items.insert(item_id.to_string());
        self
    }

    pub fn disconnecting_on(mut self, item_id: &str) -> Self {
        self.disconnecting_items.insert(item_id.to_string());
        self
    }

    fn connection_error() -> ApiError {
        ApiError::Connection {
            url: "http://zabbix.test/api_jsonrpc.php".into(),
            source: RpcError::Decode("connection reset".into()),
        }
    }

    fn query_error(&self, method: &'static str) -> ApiError {
        if self.disconnected {
            return Self::connection_error();
        }
        ApiError::Query {
            method,
            source: RpcError::Decode("backend unavailable".into()),
        }
    }
}

impl MonitoringApi for FakeApi {
    async fn list_templates(&self, include_items: bool) -> Result<Vec<TemplateRecord>, ApiError> {
        let templates = self
            .templates
            .clone()
            .ok_or_else(|| self.query_error("template.get"))?;
        Ok(templates
            .into_iter()
            .map(|t| if include_items { t } else { t.with_items(Vec::new()) })
            .collect())
    }

    async fn list_items(
        &self,
        template_id: &str,
        filter: Option<&ItemFilter>,
    ) -> Result<Vec<ItemRecord>, ApiError> {
        self.item_queries
            .borrow_mut()
            .push((template_id.to_string(), filter.cloned()));

        let templates = self
            .templates
            .as_ref()
            .ok_or_else(|| self.query_error("item.get"))?;
        Ok(templates
            .iter()
            .filter(|t| t.template_id == template_id)
            .flat_map(|t| t.items.iter())
            .filter(|item| filter.is_none_or(|f| f.matches(item)))
            .cloned()
            .collect())
    }

    async fn update_item(
        &self,
        item_id: &str,
        history: Option<&str>,
        trends: Option<&str>,
    ) -> Result<(), ApiError> {
        if self.disconnecting_items.contains(item_id) {
            return Err(Self::connection_error());
        }
        if self.failing_items.contains(item_id) {
            return Err(ApiError::Mutation {
                item_id: item_id.to_string(),
                source: RpcError::Remote {
                    code: -32500,
                    message: "Application error.".into(),
                    data: "Cannot update a templated item.".into(),
                },
            });
        }
        self.updates.borrow_mut().push(RecordedUpdate {
            item_id: item_id.to_string(),
            history: history.map(str::to_string),
            trends: trends.map(str::to_string),
        });
        Ok(())
    }
}

//! Template and item records as returned by the Zabbix API

use serde::{Deserialize, Serialize};

/// A monitored item and its retention settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(rename = "itemid")]
    pub item_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "key_", default)]
    pub key: String,
    /// Raw history retention token
    #[serde(default)]
    pub history: String,
    /// Raw trends retention token
    #[serde(default)]
    pub trends: String,
}

impl ItemRecord {
    pub fn new(
        item_id: impl Into<String>,
        name: impl Into<String>,
        history: impl Into<String>,
        trends: impl Into<String>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            name: name.into(),
            key: String::new(),
            history: history.into(),
            trends: trends.into(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }
}

/// A template with its items in API enumeration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRecord {
    #[serde(rename = "templateid")]
    pub template_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub items: Vec<ItemRecord>,
}

impl TemplateRecord {
    pub fn new(template_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
            name: name.into(),
            items: Vec::new(),
        }
    }

    pub fn with_items(mut self, items: Vec<ItemRecord>) -> Self {
        self.items = items;
        self
    }
}

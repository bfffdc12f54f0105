//! Remediation planning over template listings

use crate::classify::{classify, RetentionKind};
use crate::config::{MatchMode, SelectionPolicy, LEGACY_HISTORY, LEGACY_TRENDS};
use crate::types::{ItemRecord, TemplateRecord};
use serde::{Deserialize, Serialize};

/// Planned change for one item. A `None` target leaves that kind untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemChange {
    pub item_id: String,
    pub name: String,
    pub key: String,
    pub current_history: String,
    pub current_trends: String,
    pub new_history: Option<String>,
    pub new_trends: Option<String>,
}

impl ItemChange {
    /// History value after the change is applied
    pub fn history_after(&self) -> &str {
        self.new_history.as_deref().unwrap_or(&self.current_history)
    }

    /// Trends value after the change is applied
    pub fn trends_after(&self) -> &str {
        self.new_trends.as_deref().unwrap_or(&self.current_trends)
    }

    pub fn changes(&self, kind: RetentionKind) -> bool {
        match kind {
            RetentionKind::History => self.new_history.is_some(),
            RetentionKind::Trends => self.new_trends.is_some(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplatePlan {
    pub template_id: String,
    pub name: String,
    /// Qualifying items before the per-template cap
    pub qualifying_items: usize,
    pub items: Vec<ItemChange>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemediationPlan {
    pub templates: Vec<TemplatePlan>,
}

impl RemediationPlan {
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    pub fn item_count(&self) -> usize {
        self.templates.iter().map(|t| t.items.len()).sum()
    }
}

/// Build a remediation plan for `templates` under `policy`.
///
/// Templates without any qualifying item are dropped. With `max_templates`
/// set, templates are ranked by the number of items they will actually update,
/// after the per-template cap (stable, so ties keep listing order).
pub fn plan(templates: &[TemplateRecord], policy: &SelectionPolicy) -> RemediationPlan {
    let mut selected: Vec<TemplatePlan> = templates
        .iter()
        .filter_map(|template| {
            let mut items = qualifying_changes(&template.items, policy.match_mode);
            if items.is_empty() {
                return None;
            }
            let qualifying_items = items.len();
            if let Some(cap) = policy.max_items_per_template {
                items.truncate(cap);
            }
            Some(TemplatePlan {
                template_id: template.template_id.clone(),
                name: template.name.clone(),
                qualifying_items,
                items,
            })
        })
        .collect();

    if let Some(max) = policy.max_templates {
        selected.sort_by(|a, b| b.items.len().cmp(&a.items.len()));
        selected.truncate(max);
    }

    RemediationPlan {
        templates: selected,
    }
}

/// Apply the policy's match mode and item cap to a single template's items
pub fn plan_items(items: &[ItemRecord], policy: &SelectionPolicy) -> Vec<ItemChange> {
    let mut changes = qualifying_changes(items, policy.match_mode);
    if let Some(cap) = policy.max_items_per_template {
        changes.truncate(cap);
    }
    changes
}

fn qualifying_changes(items: &[ItemRecord], mode: MatchMode) -> Vec<ItemChange> {
    items
        .iter()
        .filter_map(|item| change_for(item, mode))
        .collect()
}

fn change_for(item: &ItemRecord, mode: MatchMode) -> Option<ItemChange> {
    if mode == MatchMode::ExactLegacy
        && (item.history != LEGACY_HISTORY || item.trends != LEGACY_TRENDS)
    {
        return None;
    }

    let history = classify(RetentionKind::History, &item.history);
    let trends = classify(RetentionKind::Trends, &item.trends);
    if !history.needs_update && !trends.needs_update {
        return None;
    }

    Some(ItemChange {
        item_id: item.item_id.clone(),
        name: item.name.clone(),
        key: item.key.clone(),
        current_history: item.history.clone(),
        current_trends: item.trends.clone(),
        new_history: history.needs_update.then_some(history.replacement),
        new_trends: trends.needs_update.then_some(trends.replacement),
    })
}

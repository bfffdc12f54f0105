//! Read-only retention statistics across templates

use crate::classify::{classify, RetentionKind};
use crate::types::TemplateRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-template counts of items over threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSummary {
    pub template_id: String,
    pub name: String,
    pub total_items: usize,
    pub long_history_items: usize,
    pub long_trends_items: usize,
}

impl TemplateSummary {
    pub fn problematic_items(&self) -> usize {
        self.long_history_items + self.long_trends_items
    }
}

/// One raw retention value and how many items carry it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueShare {
    pub value: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionReport {
    pub total_templates: usize,
    pub total_items: usize,
    pub templates_with_long_history: usize,
    pub templates_with_long_trends: usize,
    pub items_with_long_history: usize,
    pub items_with_long_trends: usize,
    pub history_values: BTreeMap<String, usize>,
    pub trends_values: BTreeMap<String, usize>,
    /// Templates with at least one long value, in listing order
    pub templates: Vec<TemplateSummary>,
}

impl RetentionReport {
    /// Distribution of raw values for one kind, sorted by value
    pub fn distribution(&self, kind: RetentionKind) -> Vec<ValueShare> {
        let values = match kind {
            RetentionKind::History => &self.history_values,
            RetentionKind::Trends => &self.trends_values,
        };
        values
            .iter()
            .map(|(value, &count)| ValueShare {
                value: value.clone(),
                count,
                percentage: percentage(count, self.total_items),
            })
            .collect()
    }

    /// Templates with the most over-threshold items first
    pub fn top_templates(&self, n: usize) -> Vec<&TemplateSummary> {
        let mut ranked: Vec<&TemplateSummary> = self.templates.iter().collect();
        ranked.sort_by(|a, b| b.problematic_items().cmp(&a.problematic_items()));
        ranked.truncate(n);
        ranked
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

pub fn analyze(templates: &[TemplateRecord]) -> RetentionReport {
    let mut report = RetentionReport {
        total_templates: templates.len(),
        ..Default::default()
    };

    for template in templates {
        let mut summary = TemplateSummary {
            template_id: template.template_id.clone(),
            name: template.name.clone(),
            total_items: template.items.len(),
            long_history_items: 0,
            long_trends_items: 0,
        };
        report.total_items += summary.total_items;

        for item in &template.items {
            *report.history_values.entry(item.history.clone()).or_default() += 1;
            *report.trends_values.entry(item.trends.clone()).or_default() += 1;

            if classify(RetentionKind::History, &item.history).needs_update {
                report.items_with_long_history += 1;
                summary.long_history_items += 1;
            }
            if classify(RetentionKind::Trends, &item.trends).needs_update {
                report.items_with_long_trends += 1;
                summary.long_trends_items += 1;
            }
        }

        if summary.problematic_items() == 0 {
            continue;
        }
        if summary.long_history_items > 0 {
            report.templates_with_long_history += 1;
        }
        if summary.long_trends_items > 0 {
            report.templates_with_long_trends += 1;
        }
        report.templates.push(summary);
    }

    report
}

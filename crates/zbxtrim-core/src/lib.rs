//! Retention classification and remediation planning for Zabbix templates

mod analysis;
mod classify;
mod config;
mod duration;
mod planner;
mod types;

pub use analysis::{analyze, RetentionReport, TemplateSummary, ValueShare};
pub use classify::{classify, Classification, RetentionKind};
pub use config::{
    MatchMode, SelectionPolicy, LEGACY_HISTORY, LEGACY_TRENDS, TOP_ITEMS_PER_TEMPLATE,
    TOP_TEMPLATES,
};
pub use duration::parse_duration;
pub use planner::{plan, plan_items, ItemChange, RemediationPlan, TemplatePlan};
pub use types::{ItemRecord, TemplateRecord};

use std::borrow::Cow;
use std::io::{self, BufRead, Write};

use tracing::{error, warn};
use zbxtrim_api::{ApiError, ItemFilter, MonitoringApi};
use zbxtrim_core::{
    plan, plan_items, ItemChange, MatchMode, RemediationPlan, RetentionKind, SelectionPolicy,
    TemplatePlan,
};

use super::clip;
use crate::prompt::confirm;

const NAME_WIDTH: usize = 60;

/// Tally of one update run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UpdateSummary {
    pub templates: usize,
    pub updated: usize,
    pub failed: usize,
}

impl UpdateSummary {
    /// Percentage of attempted items that were updated
    pub fn success_rate(&self) -> Option<f64> {
        let attempted = self.updated + self.failed;
        (attempted > 0).then(|| self.updated as f64 / attempted as f64 * 100.0)
    }
}

pub async fn run(policy: SelectionPolicy) -> anyhow::Result<()> {
    let client = super::connect().await?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();

    execute(&client, &policy, &mut input, &mut out).await?;
    Ok(())
}

/// Plan, confirm, then apply. Returns `None` when nothing was applied.
async fn execute<A, R, W>(
    api: &A,
    policy: &SelectionPolicy,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<Option<UpdateSummary>>
where
    A: MonitoringApi,
    R: BufRead,
    W: Write,
{
    describe_policy(policy, out)?;
    writeln!(out, "\nLooking for templates with long history/trends...")?;

    let templates = match api.list_templates(true).await {
        Ok(templates) => templates,
        Err(e) if e.is_fatal() => return Err(e.into()),
        Err(e) => {
            error!(error = %e, "could not list templates");
            Vec::new()
        }
    };

    let plan = plan(&templates, policy);
    if plan.is_empty() {
        writeln!(out, "No templates need updating")?;
        return Ok(None);
    }

    print_plan(&plan, out)?;

    let question = format!(
        "\nUpdate {} items in {} templates?",
        plan.item_count(),
        plan.template_count()
    );
    if !confirm(input, out, &question)? {
        writeln!(out, "Operation cancelled")?;
        return Ok(None);
    }

    writeln!(out, "\nStarting update...")?;
    let summary = apply_plan(api, &plan, policy, out).await?;

    writeln!(out, "\nUpdate finished")?;
    writeln!(out, "  Templates processed: {}", summary.templates)?;
    writeln!(out, "  Items updated: {}", summary.updated)?;
    writeln!(out, "  Items failed: {}", summary.failed)?;
    if let Some(rate) = summary.success_rate() {
        writeln!(out, "  Success rate: {rate:.1}%")?;
    }
    Ok(Some(summary))
}

fn describe_policy<W: Write>(policy: &SelectionPolicy, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "New values: History={}, Trends={}",
        RetentionKind::History.remediation_target(),
        RetentionKind::Trends.remediation_target()
    )?;
    match policy.match_mode {
        MatchMode::Threshold => writeln!(
            out,
            "Selecting items with history > {}d or trends > {}d",
            RetentionKind::History.threshold_days(),
            RetentionKind::Trends.threshold_days()
        )?,
        MatchMode::ExactLegacy => writeln!(
            out,
            "Selecting items with history = {} and trends = {}",
            zbxtrim_core::LEGACY_HISTORY,
            zbxtrim_core::LEGACY_TRENDS
        )?,
    }
    if let Some(max) = policy.max_templates {
        writeln!(out, "Limited to {max} templates")?;
    }
    if let Some(max) = policy.max_items_per_template {
        writeln!(out, "Limited to {max} items per template")?;
    }
    Ok(())
}

fn print_plan<W: Write>(plan: &RemediationPlan, out: &mut W) -> io::Result<()> {
    writeln!(out, "Templates selected: {}", plan.template_count())?;
    writeln!(out, "Items to update: {}", plan.item_count())?;
    for (i, template) in plan.templates.iter().enumerate() {
        write!(
            out,
            "  {:2}. {:<width$} | {:>3} items",
            i + 1,
            clip(&template.name, NAME_WIDTH),
            template.items.len(),
            width = NAME_WIDTH,
        )?;
        if template.qualifying_items > template.items.len() {
            write!(out, " (of {} over threshold)", template.qualifying_items)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Apply every planned change.
///
/// Per-item failures are counted and skipped; a fatal error stops the run.
async fn apply_plan<A: MonitoringApi, W: Write>(
    api: &A,
    plan: &RemediationPlan,
    policy: &SelectionPolicy,
    out: &mut W,
) -> anyhow::Result<UpdateSummary> {
    let mut summary = UpdateSummary::default();
    let total = plan.template_count();

    for (i, template) in plan.templates.iter().enumerate() {
        writeln!(out, "\n[{}/{}] Template: {}", i + 1, total, template.name)?;
        summary.templates += 1;

        let Some(changes) = current_changes(api, template, policy).await? else {
            writeln!(out, "  Skipped: could not re-read items")?;
            continue;
        };

        let mut updated = 0;
        let mut failed = 0;
        for change in changes.iter() {
            let result = api
                .update_item(
                    &change.item_id,
                    change.new_history.as_deref(),
                    change.new_trends.as_deref(),
                )
                .await;

            match result {
                Ok(()) => {
                    updated += 1;
                    print_change(change, out)?;
                }
                Err(e) if e.is_fatal() => return Err(e.into()),
                Err(e) => {
                    failed += 1;
                    warn!(
                        item = %change.name,
                        key = %change.key,
                        error = %e,
                        "item update failed"
                    );
                    writeln!(
                        out,
                        "  FAILED {} ({}): {e}",
                        clip(&change.name, NAME_WIDTH),
                        change.key
                    )?;
                }
            }
        }

        writeln!(out, "  Result: {updated} updated, {failed} failed")?;
        summary.updated += updated;
        summary.failed += failed;
    }

    Ok(summary)
}

/// Items to change for `template`.
///
/// Exact-legacy runs re-read the template's items with the legacy filter just
/// before mutating; `None` means that read failed and the template is skipped.
async fn current_changes<'a, A: MonitoringApi>(
    api: &A,
    template: &'a TemplatePlan,
    policy: &SelectionPolicy,
) -> Result<Option<Cow<'a, [ItemChange]>>, ApiError> {
    if policy.match_mode != MatchMode::ExactLegacy {
        return Ok(Some(Cow::Borrowed(template.items.as_slice())));
    }

    match api
        .list_items(&template.template_id, Some(&ItemFilter::legacy()))
        .await
    {
        Ok(items) => Ok(Some(Cow::Owned(plan_items(&items, policy)))),
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            error!(template = %template.name, error = %e, "could not re-read template items");
            Ok(None)
        }
    }
}

fn print_change<W: Write>(change: &ItemChange, out: &mut W) -> io::Result<()> {
    writeln!(out, "  OK {} ({})", clip(&change.name, NAME_WIDTH), change.key)?;
    if change.changes(RetentionKind::History) {
        writeln!(
            out,
            "     History: {} -> {}",
            change.current_history,
            change.history_after()
        )?;
    }
    if change.changes(RetentionKind::Trends) {
        writeln!(
            out,
            "     Trends:  {} -> {}",
            change.current_trends,
            change.trends_after()
        )?;
    }
    Ok(())
}

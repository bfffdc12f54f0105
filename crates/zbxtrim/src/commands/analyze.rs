use std::io::{self, Write};

use tracing::error;
use zbxtrim_api::MonitoringApi;
use zbxtrim_core::{analyze, classify, Classification, RetentionKind, RetentionReport};

use super::clip;

const TOP_LISTED: usize = 10;
const NAME_WIDTH: usize = 50;

pub async fn run(template: Option<&str>) -> anyhow::Result<()> {
    let client = super::connect().await?;
    let mut out = io::stdout().lock();

    match template {
        Some(template_id) => analyze_template(&client, template_id, &mut out).await,
        None => analyze_all(&client, &mut out).await,
    }
}

async fn analyze_all<A: MonitoringApi, W: Write>(api: &A, out: &mut W) -> anyhow::Result<()> {
    writeln!(out, "\nAnalyzing templates...")?;

    // A failed query is reported like an empty listing
    let templates = match api.list_templates(true).await {
        Ok(templates) => templates,
        Err(e) if e.is_fatal() => return Err(e.into()),
        Err(e) => {
            error!(error = %e, "could not list templates");
            Vec::new()
        }
    };
    if templates.is_empty() {
        writeln!(out, "No templates found")?;
        return Ok(());
    }

    render_report(&analyze(&templates), out)?;
    Ok(())
}

async fn analyze_template<A: MonitoringApi, W: Write>(
    api: &A,
    template_id: &str,
    out: &mut W,
) -> anyhow::Result<()> {
    writeln!(out, "\nAnalyzing items of template {template_id}...")?;

    let items = match api.list_items(template_id, None).await {
        Ok(items) => items,
        Err(e) if e.is_fatal() => return Err(e.into()),
        Err(e) => {
            error!(template_id, error = %e, "could not list items");
            Vec::new()
        }
    };
    if items.is_empty() {
        writeln!(out, "No items found for template {template_id}")?;
        return Ok(());
    }

    let mut flagged = 0;
    for item in &items {
        let history = classify(RetentionKind::History, &item.history);
        let trends = classify(RetentionKind::Trends, &item.trends);
        if history.needs_update || trends.needs_update {
            flagged += 1;
        }

        writeln!(out, "  {} ({})", clip(&item.name, NAME_WIDTH), item.key)?;
        writeln!(
            out,
            "    History: {:>6} = {:>6.1} days  {}",
            item.history,
            history.days,
            verdict(&history)
        )?;
        writeln!(
            out,
            "    Trends:  {:>6} = {:>6.1} days  {}",
            item.trends,
            trends.days,
            verdict(&trends)
        )?;
    }

    writeln!(out, "\n{flagged} of {} items need changes", items.len())?;
    Ok(())
}

fn verdict(classification: &Classification) -> String {
    if classification.needs_update {
        format!("-> {}", classification.replacement)
    } else {
        "ok".to_string()
    }
}

fn render_report<W: Write>(report: &RetentionReport, out: &mut W) -> io::Result<()> {
    let history_limit = RetentionKind::History.threshold_days();
    let trends_limit = RetentionKind::Trends.threshold_days();

    writeln!(out, "\nSUMMARY")?;
    writeln!(out, "  Templates: {}", report.total_templates)?;
    writeln!(out, "  Items: {}", report.total_items)?;
    writeln!(
        out,
        "  Templates with history > {history_limit}d: {}",
        report.templates_with_long_history
    )?;
    writeln!(
        out,
        "  Templates with trends > {trends_limit}d: {}",
        report.templates_with_long_trends
    )?;
    writeln!(
        out,
        "  Items with history > {history_limit}d: {}",
        report.items_with_long_history
    )?;
    writeln!(
        out,
        "  Items with trends > {trends_limit}d: {}",
        report.items_with_long_trends
    )?;

    for kind in [RetentionKind::History, RetentionKind::Trends] {
        writeln!(out, "\n{} VALUES", kind.label().to_uppercase())?;
        for share in report.distribution(kind) {
            writeln!(
                out,
                "  {:>6}: {:>6} items ({:>5.1}%)",
                share.value, share.count, share.percentage
            )?;
        }
    }

    writeln!(out, "\nTOP {TOP_LISTED} TEMPLATES BY ITEMS OVER THRESHOLD")?;
    for (i, template) in report.top_templates(TOP_LISTED).iter().enumerate() {
        writeln!(
            out,
            "  {:2}. {:<width$} | H:{:>3} T:{:>3} (total: {})",
            i + 1,
            clip(&template.name, NAME_WIDTH),
            template.long_history_items,
            template.long_trends_items,
            template.problematic_items(),
            width = NAME_WIDTH,
        )?;
    }

    writeln!(out, "\nRECOMMENDATIONS")?;
    writeln!(out, "  For test environments consider running `zbxtrim update`:")?;
    writeln!(
        out,
        "  - History -> {} ({} items)",
        RetentionKind::History.remediation_target(),
        report.items_with_long_history
    )?;
    writeln!(
        out,
        "  - Trends -> {} ({} items)",
        RetentionKind::Trends.remediation_target(),
        report.items_with_long_trends
    )?;
    Ok(())
}

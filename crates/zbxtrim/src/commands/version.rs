use std::io::{self, Write};

use zbxtrim_core::{RetentionKind, LEGACY_HISTORY, LEGACY_TRENDS};

pub fn run() -> anyhow::Result<()> {
    write_banner(&mut io::stdout().lock())?;
    Ok(())
}

/// Version line followed by the retention rules this build applies
fn write_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "zbxtrim {}", env!("CARGO_PKG_VERSION"))?;
    for kind in [RetentionKind::History, RetentionKind::Trends] {
        writeln!(
            out,
            "  {:<7} over {}d -> {}",
            kind.label(),
            kind.threshold_days(),
            kind.remediation_target()
        )?;
    }
    writeln!(out, "  legacy  {LEGACY_HISTORY}/{LEGACY_TRENDS}")
}

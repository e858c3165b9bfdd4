//! Init-config command implementation.

use anyhow::{Context, Result, bail};
use delve_core::{Config, OpcodeTable, save_opcodes};
use std::path::Path;
use tracing::info;

/// Write the default config and opcode table
pub fn run(out: &Path, opcodes_out: &Path, force: bool) -> Result<()> {
    for path in [out, opcodes_out] {
        if path.exists() && !force {
            bail!("{} already exists (use --force to overwrite)", path.display());
        }
    }

    Config::default()
        .save(out)
        .with_context(|| format!("Failed to write {}", out.display()))?;
    info!("Wrote config to {}", out.display());

    save_opcodes(opcodes_out, &OpcodeTable::default())
        .with_context(|| format!("Failed to write {}", opcodes_out.display()))?;
    info!("Wrote opcodes to {}", opcodes_out.display());

    Ok(())
}

//! CLI command implementations.

pub mod decode;
pub mod hex_utils;
pub mod hexdump;
pub mod init_config;
pub mod replay;

use anyhow::{Context, Result};
use delve_core::{OpcodeTable, load_opcodes};
use std::path::Path;
use tracing::info;

/// Opcode table from `path`, or the built-in defaults
pub fn load_opcode_table(path: Option<&Path>) -> Result<OpcodeTable> {
    match path {
        Some(path) => {
            let table = load_opcodes(path)
                .with_context(|| format!("Failed to load opcodes from {}", path.display()))?;
            info!("Loaded opcodes version: {}", table.version);
            Ok(table)
        }
        None => Ok(OpcodeTable::default()),
    }
}

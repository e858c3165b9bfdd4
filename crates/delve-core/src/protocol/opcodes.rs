use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Zone-down opcodes for the game version being observed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpcodeTable {
    pub version: String,
    pub system_log_message: u16,
    pub actor_control_self: u16,
}

impl Default for OpcodeTable {
    fn default() -> Self {
        Self {
            version: "7.1".to_string(),
            system_log_message: 0x0161,
            actor_control_self: 0x0200,
        }
    }
}

impl OpcodeTable {
    pub fn is_valid(&self) -> bool {
        !self.version.is_empty()
            && self.system_log_message != 0
            && self.actor_control_self != 0
            && self.system_log_message != self.actor_control_self
    }
}

/// Load an opcode table from a TOML file
pub fn load_opcodes<P: AsRef<Path>>(path: P) -> Result<OpcodeTable> {
    let content = fs::read_to_string(path.as_ref())?;
    let table: OpcodeTable = toml::from_str(&content)?;
    if !table.is_valid() {
        return Err(Error::InvalidOpcodes(format!(
            "version={:?} system_log_message={:#x} actor_control_self={:#x}",
            table.version, table.system_log_message, table.actor_control_self
        )));
    }
    debug!("Loaded opcodes for version {}", table.version);
    Ok(table)
}

/// Save an opcode table as TOML
pub fn save_opcodes<P: AsRef<Path>>(path: P, table: &OpcodeTable) -> Result<()> {
    let content = toml::to_string_pretty(table)?;
    fs::write(path, content)?;
    Ok(())
}

//! Decode command implementation.
//!
//! Prints the payload as a hexdump followed by the dungeon signal it carries,
//! which is handy when checking opcode tables against a new game patch.

use anyhow::Result;
use delve_core::{Direction, DungeonSignal, NetworkMessage, OpcodeTable, decode_signal};
use owo_colors::OwoColorize;
use std::path::Path;

use super::hex_utils::{format_opcode, parse_hex_bytes, parse_hex_u16};
use super::{hexdump, load_opcode_table};

/// Run the decode command
pub fn run(opcode: &str, payload: &str, opcodes: Option<&Path>) -> Result<()> {
    let opcode = parse_hex_u16(opcode)?;
    let payload = parse_hex_bytes(payload)?;
    let table = load_opcode_table(opcodes)?;

    println!(
        "Opcode {} ({}), {} bytes:",
        format_opcode(opcode),
        opcode_name(opcode, &table),
        payload.len()
    );
    println!();
    for line in hexdump::format(&payload, true) {
        println!("{}", line);
    }
    println!();

    match decode(opcode, &payload, &table) {
        Ok(Some(signal)) => println!("Signal: {}", format!("{:?}", signal).green()),
        Ok(None) => println!("{}", "No dungeon signal".dimmed()),
        Err(e) => println!("{} {}", "Decode error:".red(), e),
    }
    Ok(())
}

fn opcode_name(opcode: u16, table: &OpcodeTable) -> &'static str {
    if opcode == table.system_log_message {
        "SystemLogMessage"
    } else if opcode == table.actor_control_self {
        "ActorControlSelf"
    } else {
        "unknown"
    }
}

/// Decode a server-to-client payload
pub fn decode(
    opcode: u16,
    payload: &[u8],
    table: &OpcodeTable,
) -> delve_core::Result<Option<DungeonSignal>> {
    let msg = NetworkMessage {
        payload,
        opcode,
        source_actor: 0,
        target_actor: 0,
        direction: Direction::ZoneDown,
    };
    decode_signal(&msg, table)
}

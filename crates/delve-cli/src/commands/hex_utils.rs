//! Hex parsing and formatting utilities.

use anyhow::{Result, bail};

/// Parse a hex opcode string (with or without 0x prefix).
pub fn parse_hex_u16(s: &str) -> Result<u16> {
    let s = s.trim();
    let digits = s.trim_start_matches("0x").trim_start_matches("0X");
    u16::from_str_radix(digits, 16).map_err(|e| anyhow::anyhow!("Invalid hex opcode {:?}: {}", s, e))
}

/// Parse a hex byte string. Whitespace between bytes is ignored.
pub fn parse_hex_bytes(s: &str) -> Result<Vec<u8>> {
    let digits: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = digits.trim_start_matches("0x").trim_start_matches("0X");
    if digits.len() % 2 != 0 {
        bail!("Hex payload has an odd number of digits ({})", digits.len());
    }

    (0..digits.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|e| anyhow::anyhow!("Invalid hex byte at {}: {}", i / 2, e))
        })
        .collect()
}

/// Format an opcode as a hex string with 0x prefix.
pub fn format_opcode(opcode: u16) -> String {
    format!("0x{:04X}", opcode)
}

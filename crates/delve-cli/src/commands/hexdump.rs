//! Hexdump formatting for message payloads.
//!
//! # Output Format
//!
//! ```text
//! 0x000: 6D 00 00 00 01 EA 00 00  01 00 00 00 00 00 00 00  |m...............|
//! ```

/// Format bytes in traditional hexdump layout, one line per 16 bytes
pub fn format(bytes: &[u8], ascii: bool) -> Vec<String> {
    bytes
        .chunks(16)
        .enumerate()
        .map(|(i, chunk)| format_line(i * 16, chunk, ascii))
        .collect()
}

fn format_line(offset: usize, chunk: &[u8], ascii: bool) -> String {
    let mut line = format!("0x{:03X}: ", offset);

    for j in 0..16 {
        if j == 8 {
            line.push(' ');
        }
        match chunk.get(j) {
            Some(byte) => line.push_str(&format!("{:02X} ", byte)),
            None => line.push_str("   "),
        }
    }

    if ascii {
        line.push_str(" |");
        for byte in chunk {
            if *byte >= 0x20 && *byte < 0x7F {
                line.push(*byte as char);
            } else {
                line.push('.');
            }
        }
        for _ in chunk.len()..16 {
            line.push(' ');
        }
        line.push('|');
    }

    line
}

//! Hex dump formatting for `xxd` and for the final analysis pass.

/// Bytes shown by `xxd` before truncating.
pub const XXD_MAX_BYTES: usize = 512;

/// Bytes per `xxd` row.
pub const XXD_ROW_BYTES: usize = 14;

/// Notice appended when `xxd` output is cut short.
pub const TRUNCATION_NOTICE: &str = "... [truncated] ...";

fn printable(b: u8) -> char {
    if (0x20..0x7f).contains(&b) {
        b as char
    } else {
        '.'
    }
}

/// `xxd`-style rows: `000000: 41 42 ... |AB...|`, capped at
/// [`XXD_MAX_BYTES`] with a trailing [`TRUNCATION_NOTICE`] when cut.
pub fn xxd_lines(data: &[u8]) -> Vec<String> {
    let shown = &data[..data.len().min(XXD_MAX_BYTES)];
    let mut lines = Vec::with_capacity(shown.len().div_ceil(XXD_ROW_BYTES) + 1);
    for (row, chunk) in shown.chunks(XXD_ROW_BYTES).enumerate() {
        let hex: Vec<String> = chunk.iter().map(|b| format!("{b:02x}")).collect();
        let ascii: String = chunk.iter().copied().map(printable).collect();
        lines.push(format!(
            "{:06x}: {:<width$} |{ascii}|",
            row * XXD_ROW_BYTES,
            hex.join(" "),
            width = XXD_ROW_BYTES * 3 - 1
        ));
    }
    if data.len() > XXD_MAX_BYTES {
        lines.push(TRUNCATION_NOTICE.to_string());
    }
    lines
}

/// Canonical 16-byte dump with an extra gap after the eighth byte:
/// `00000000  41 42 ...  |AB|`.
pub fn canonical(data: &[u8]) -> String {
    let mut out = String::new();
    for (row, chunk) in data.chunks(16).enumerate() {
        out.push_str(&format!("{:08x}  ", row * 16));
        for i in 0..16 {
            match chunk.get(i) {
                Some(b) => out.push_str(&format!("{b:02x} ")),
                None => out.push_str("   "),
            }
            if i == 7 {
                out.push(' ');
            }
        }
        out.push_str(" |");
        out.extend(chunk.iter().copied().map(printable));
        out.push_str("|\n");
    }
    out
}

// src/utils/log.rs

//! Console presentation helpers with server-style formatting.
//!
//! Diagnostics go through the `log` facade; these helpers print result
//! tables for the CLI with a consistent timestamped prefix.

use chrono::Local;

/// Format a console line with timestamp and tag.
fn format_line(tag: &str, message: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!("[{}] [{}] {}", timestamp, tag, message)
}

/// Print a success message
pub fn success(message: &str) {
    println!("{}", format_line("INFO", &format!("✓ {}", message)));
}

/// Print a header
pub fn header(title: &str) {
    let border = "═".repeat(60);
    println!("{}", border);
    println!("  {}", title);
    println!("{}", border);
}

/// Print a sub-item (indented)
pub fn sub_item(message: &str) {
    println!("    {}", message);
}

/// Print a separator line
pub fn separator() {
    println!("{}", "─".repeat(60));
}

/// Print a summary section
pub fn summary(title: &str, items: &[(&str, String)]) {
    println!();
    println!("{}", format_line("SUMMARY", title));
    for (key, value) in items {
        println!("    {}: {}", key, value);
    }
}

/// Render `value` with thousands separators, rounded to whole units.
pub fn group_thousands(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    if negative { format!("-{out}") } else { out }
}

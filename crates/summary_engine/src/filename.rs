use std::fmt::Write;

use sha2::{Digest, Sha256};

const MAX_TITLE_LEN: usize = 80;

/// `{title}--{hash8(job_id)}.md`. Same inputs always give the same name; the
/// title part is safe on every mainstream filesystem.
pub fn meeting_filename(title: &str, job_id: &str) -> String {
    format!("{}--{}.md", safe_title(title), job_hash(job_id))
}

fn safe_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for c in title.chars() {
        let c = if is_unsafe(c) || c.is_whitespace() { '_' } else { c };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    let mut out = out.trim_matches(&['_', '.'][..]).to_string();
    if out.is_empty() {
        out = "meeting".to_string();
    }
    if out.len() > MAX_TITLE_LEN {
        let mut cut = MAX_TITLE_LEN;
        while !out.is_char_boundary(cut) {
            cut -= 1;
        }
        out.truncate(cut);
    }
    if is_reserved_device_name(&out) {
        out.push('_');
    }
    out
}

fn is_unsafe(c: char) -> bool {
    matches!(c, '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || c.is_control()
}

fn is_reserved_device_name(name: &str) -> bool {
    const RESERVED: &[&str] = &["CON", "PRN", "AUX", "NUL"];
    if RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name)) {
        return true;
    }
    // COM1..COM9, LPT1..LPT9
    let upper = name.to_ascii_uppercase();
    let bytes = upper.as_bytes();
    bytes.len() == 4
        && (upper.starts_with("COM") || upper.starts_with("LPT"))
        && (b'1'..=b'9').contains(&bytes[3])
}

fn job_hash(job_id: &str) -> String {
    let digest = Sha256::digest(job_id.as_bytes());
    digest.iter().take(4).fold(String::with_capacity(8), |mut hex, byte| {
        let _ = write!(hex, "{byte:02x}");
        hex
    })
}

//! Soft-bullet text handling.
//!
//! Descriptions are stored as plain text with an embedded `• ` marker at the
//! start of each line. The editor inserts markers as the user breaks lines and
//! the renderer strips them back out; stored text is never rewritten on load,
//! so an edit/save/reload cycle neither duplicates nor loses markers.

const BULLET: char = '•';

/// Text inserted when the user breaks a line inside a bulleted description.
pub const BULLET_BREAK: &str = "\n• ";

/// Removes a leading bullet marker (and the spaces after it) from every line.
/// Line breaks are preserved.
pub fn clean_bullets(text: &str) -> String {
    text.split('\n')
        .map(|line| match line.strip_prefix(BULLET) {
            Some(rest) => rest.trim_start_matches([' ', '\t']),
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cleaned lines of a bulleted description, ready for display.
pub fn display_lines(text: &str) -> Vec<String> {
    let cleaned = clean_bullets(text);
    if cleaned.trim().is_empty() {
        return vec![];
    }
    cleaned.split('\n').map(|l| l.trim_end().to_string()).collect()
}

/// Inserts a bulleted line break at `cursor` (a character offset, clamped to
/// the text length). Returns the new text and the cursor placed just after the
/// inserted marker.
pub fn insert_bullet_break(text: &str, cursor: usize) -> (String, usize) {
    let char_len = text.chars().count();
    let cursor = cursor.min(char_len);
    let split_at = text
        .char_indices()
        .nth(cursor)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len());

    let mut out = String::with_capacity(text.len() + BULLET_BREAK.len());
    out.push_str(&text[..split_at]);
    out.push_str(BULLET_BREAK);
    out.push_str(&text[split_at..]);

    (out, cursor + BULLET_BREAK.chars().count())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

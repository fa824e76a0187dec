//! Text windows around marker lines

use regex::Regex;

/// Lines `start..=end` of a page, centered on a line containing the marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextWindow {
    /// Index of the marker line within the page (0-based)
    pub marker_line: usize,
    pub start: usize,
    pub end: usize,
    /// Window lines joined with single spaces
    pub text: String,
}

/// One window per marker line, clamped to the page.
///
/// Whitespace-only lines are skipped before counting, so the radius and the
/// indices in [`TextWindow`] refer to lines of text. `pdf-extract` puts a
/// blank line between most visual lines.
///
/// Overlapping windows are kept separate; the caller unions their matches.
pub fn marker_windows(page: &str, marker: &Regex, radius: usize) -> Vec<TextWindow> {
    let lines: Vec<&str> = page.lines().filter(|l| !l.trim().is_empty()).collect();

    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| marker.is_match(line))
        .map(|(idx, _)| {
            let start = idx.saturating_sub(radius);
            let end = idx.saturating_add(radius).min(lines.len() - 1);
            TextWindow {
                marker_line: idx,
                start,
                end,
                text: lines[start..=end].join(" "),
            }
        })
        .collect()
}

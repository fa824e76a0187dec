//! Marker and callsign patterns used by the extractor

use regex::Regex;

use lazy_static::lazy_static;

/// Airport code searched for by default
pub const DEFAULT_MARKER: &str = "VIDP";

/// Lines kept on each side of a marker line.
///
/// Table rows are often split across lines by text extraction, so the
/// marker and the flight number can end up a line or two apart.
pub const WINDOW_RADIUS: usize = 2;

/// Two or three letters, one to four digits, optional trailing letter
pub const CALLSIGN_PATTERN: &str = r"\b[A-Z]{2,3}[0-9]{1,4}[A-Z]?\b";

lazy_static! {
    /// Compiled form of [`CALLSIGN_PATTERN`]
    pub static ref CALLSIGN_RE: Regex = Regex::new(CALLSIGN_PATTERN).unwrap();

    /// Whole-word matcher for [`DEFAULT_MARKER`]
    pub static ref DEFAULT_MARKER_RE: Regex =
        Regex::new(&format!(r"(?i)\b{}\b", DEFAULT_MARKER)).unwrap();
}

/// Build a case-insensitive whole-word matcher for an airport code.
///
/// Returns `None` for a blank marker.
pub fn marker_regex(marker: &str) -> Option<Regex> {
    let marker = marker.trim();
    if marker.is_empty() {
        return None;
    }
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(marker))).ok()
}

/// All callsign-shaped tokens in `text`, in order of appearance
pub fn find_callsigns(text: &str) -> impl Iterator<Item = &str> {
    CALLSIGN_RE.find_iter(text).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn callsigns(text: &str) -> Vec<&str> {
        find_callsigns(text).collect()
    }

    #[test]
    fn test_callsign_shapes() {
        assert_eq!(callsigns("DAL123"), vec!["DAL123"]);
        assert_eq!(callsigns("AI101"), vec!["AI101"]);
        assert_eq!(callsigns("IGO2345A"), vec!["IGO2345A"]);
        assert_eq!(callsigns("UK9"), vec!["UK9"]);
    }

    #[test]
    fn test_callsign_rejects_non_matching_shapes() {
        // Too many letters, too many digits, lowercase, embedded in a longer word
        assert!(callsigns("ABCD123").is_empty());
        assert!(callsigns("AB12345").is_empty());
        assert!(callsigns("dal123").is_empty());
        assert!(callsigns("XDAL123").is_empty());
        assert!(callsigns("DAL123AB").is_empty());
    }

    #[test]
    fn test_callsign_in_table_row() {
        let row = "VIDP | 0530 | (AIC302) ETD 0600, SEJ171/VOBL";
        assert_eq!(callsigns(row), vec!["AIC302", "SEJ171"]);
    }

    #[test]
    fn test_marker_is_whole_word_and_case_insensitive() {
        let re = marker_regex("VIDP").unwrap();
        assert!(re.is_match("DEST VIDP 0600"));
        assert!(re.is_match("dest vidp"));
        assert!(re.is_match("VOBL-VIDP"));
        assert!(!re.is_match("AVIDPORT"));
        assert!(!re.is_match("NAVIDPOINT"));
        assert!(!re.is_match("VIDPX"));
    }

    #[test]
    fn test_default_marker_matches_built_marker() {
        let built = marker_regex(DEFAULT_MARKER).unwrap();
        assert_eq!(DEFAULT_MARKER_RE.as_str(), built.as_str());
        assert!(DEFAULT_MARKER_RE.is_match("arr vidp"));
        assert!(!DEFAULT_MARKER_RE.is_match("AVIDPORT"));
    }

    #[test]
    fn test_blank_marker_rejected() {
        assert!(marker_regex("").is_none());
        assert!(marker_regex("   ").is_none());
    }

    #[test]
    fn test_marker_is_escaped() {
        let re = marker_regex("V.DP").unwrap();
        assert!(!re.is_match("VIDP"));
        assert!(re.is_match("V.DP"));
    }
}

//! Alert subject and body formatting

use shared_types::AlertRecord;

/// A composed, ready-to-send alert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub subject: String,
    pub body: String,
}

/// Compose one alert covering every record, or `None` if there is nothing to report.
pub fn compose_alert(marker: &str, records: &[AlertRecord]) -> Option<Alert> {
    if records.is_empty() {
        return None;
    }
    Some(Alert {
        subject: compose_subject(marker, records.len()),
        body: compose_body(records),
    })
}

pub fn compose_subject(marker: &str, files: usize) -> String {
    format!("{} ATFM Alert — {} file(s) with matches", marker, files)
}

/// One block per record: the URL, then its callsigns as a bulleted list.
///
/// Blocks are separated by a blank line. Output order follows `records`.
pub fn compose_body(records: &[AlertRecord]) -> String {
    let mut lines = Vec::new();
    for record in records {
        lines.push(format!("PDF: {}", record.document));
        lines.push("Callsigns found:".to_string());
        for callsign in &record.callsigns {
            lines.push(format!(" - {}", callsign));
        }
        lines.push(String::new());
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn record(url: &str, callsigns: &[&str]) -> AlertRecord {
        let set: BTreeSet<String> = callsigns.iter().map(|s| s.to_string()).collect();
        AlertRecord::new(url.into(), set).unwrap()
    }

    #[test]
    fn test_body_single_record() {
        let body = compose_body(&[record("https://x/a.pdf", &["SEJ202", "AIC101"])]);
        assert_eq!(
            body,
            "PDF: https://x/a.pdf\nCallsigns found:\n - AIC101\n - SEJ202\n"
        );
    }

    #[test]
    fn test_body_separates_records_with_blank_line() {
        let body = compose_body(&[
            record("https://x/a.pdf", &["DAL123"]),
            record("https://x/b.pdf", &["UAE15"]),
        ]);
        assert_eq!(
            body,
            "PDF: https://x/a.pdf\nCallsigns found:\n - DAL123\n\n\
             PDF: https://x/b.pdf\nCallsigns found:\n - UAE15\n"
        );
    }

    #[test]
    fn test_subject_counts_files() {
        assert_eq!(
            compose_subject("VIDP", 2),
            "VIDP ATFM Alert — 2 file(s) with matches"
        );
    }

    #[test]
    fn test_no_records_no_alert() {
        assert!(compose_alert("VIDP", &[]).is_none());
    }

    #[test]
    fn test_compose_alert() {
        let alert = compose_alert("VIDP", &[record("https://x/a.pdf", &["DAL123"])]).unwrap();
        assert_eq!(alert.subject, "VIDP ATFM Alert — 1 file(s) with matches");
        assert!(alert.body.starts_with("PDF: https://x/a.pdf\n"));
    }
}

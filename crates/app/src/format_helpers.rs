//! Shared formatting utilities for the UI layer.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, NaiveDate};
use sha2::{Digest, Sha256};

/// Format an ISO date or datetime as "20/01/2026".
///
/// Unparseable input is returned as sent; a missing date renders "—".
pub fn format_date(value: Option<&str>) -> String {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return "—".to_string();
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%d/%m/%Y").to_string();
    }
    raw.get(..10)
        .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Short, stable fingerprint of a base64 digital signature: the first 16
/// hex chars of the SHA-256 of the decoded bytes. `None` when the value is
/// not valid base64.
pub fn signature_fingerprint(signature: &str) -> Option<String> {
    let bytes = STANDARD.decode(signature.trim()).ok()?;
    let digest = Sha256::digest(&bytes);
    let mut hex = hex::encode(digest);
    hex.truncate(16);
    Some(hex)
}

/// "1 registro" / "3 registros".
pub fn count_label(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("1 {singular}")
    } else {
        format!("{count} {plural}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn dates_render_day_first() {
        assert_eq!(format_date(Some("2026-01-20T21:35:00Z")), "20/01/2026");
        assert_eq!(format_date(Some("2026-01-20T21:35:00.000Z")), "20/01/2026");
        assert_eq!(format_date(Some("2025-12-03")), "03/12/2025");
        assert_eq!(format_date(Some("ontem")), "ontem");
        assert_eq!(format_date(None), "—");
        assert_eq!(format_date(Some("  ")), "—");
    }

    #[test]
    fn fingerprint_is_sha256_prefix_of_decoded_bytes() {
        // base64("abc"); sha256("abc") = ba7816bf8f01cfea...
        assert_eq!(
            signature_fingerprint("YWJj").as_deref(),
            Some("ba7816bf8f01cfea")
        );
        assert_eq!(signature_fingerprint("não é base64!"), None);
    }

    #[test]
    fn count_labels() {
        assert_eq!(count_label(1, "caso", "casos"), "1 caso");
        assert_eq!(count_label(0, "caso", "casos"), "0 casos");
    }
}

//! Record hashing
//!
//! The primary key of every record is a SHA-256 over the property, the
//! account and the dimension values of the row. The pairs are sorted and
//! serialized as a JSON array of `[name, value]` arrays with `", "`
//! separators and every non-ASCII character escaped. Changing the
//! byte layout changes every primary key.

use sha2::{Digest, Sha256};
use std::fmt::Write;

/// Compute the record hash for a row
///
/// `dimension_pairs` holds raw API names and raw values. Order does not
/// matter.
pub fn generate_record_hash(
    property_id: &str,
    account_id: &str,
    dimension_pairs: &[(String, String)],
) -> String {
    let mut pairs: Vec<(&str, &str)> = Vec::with_capacity(dimension_pairs.len() + 2);
    pairs.push(("property_id", property_id));
    pairs.push(("account_id", account_id));
    pairs.extend(dimension_pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    pairs.sort_unstable();

    let serialized = serialize_pairs(&pairs);
    let digest = Sha256::digest(serialized.as_bytes());
    format!("{digest:x}")
}

/// `[["a", "b"], ["c", "d"]]`
fn serialize_pairs(pairs: &[(&str, &str)]) -> String {
    let mut out = String::from("[");
    for (i, (name, value)) in pairs.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push('[');
        push_ascii_json_string(&mut out, name);
        out.push_str(", ");
        push_ascii_json_string(&mut out, value);
        out.push(']');
    }
    out.push(']');
    out
}

/// JSON string with every character outside printable ASCII escaped
fn push_ascii_json_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            ' '..='~' => out.push(c),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{unit:04x}");
                }
            }
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn canary_pairs() -> Vec<(String, String)> {
        pairs(&[
            ("achievementId", "hi"),
            ("campaignId", "(not set)"),
            ("date", "20220906"),
            ("campaignName", "(my_campaign)"),
            ("country", "my_country"),
            ("city", "my_city"),
            ("firstSessionDate", "20220906"),
        ])
    }

    #[test]
    fn test_canary_hash() {
        assert_eq!(
            generate_record_hash("123456789", "123456", &canary_pairs()),
            "0854e5a26abcccf6990128ab5581b429698e05a6436fc09defe5a22d7f479f9e"
        );
    }

    #[test]
    fn test_hash_ignores_pair_order() {
        let mut reversed = canary_pairs();
        reversed.reverse();
        assert_eq!(
            generate_record_hash("123456789", "123456", &reversed),
            generate_record_hash("123456789", "123456", &canary_pairs())
        );
    }

    #[test]
    fn test_hash_depends_on_values() {
        let a = generate_record_hash("1", "2", &pairs(&[("country", "Germany")]));
        let b = generate_record_hash("1", "2", &pairs(&[("country", "France")]));
        let c = generate_record_hash("1", "3", &pairs(&[("country", "Germany")]));
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_serialize_uses_spaced_separators() {
        assert_eq!(
            serialize_pairs(&[("account_id", "1"), ("date", "20220101")]),
            r#"[["account_id", "1"], ["date", "20220101"]]"#
        );
    }

    #[test]
    fn test_ascii_escaping() {
        let mut out = String::new();
        push_ascii_json_string(&mut out, "a\"b\\c\nd\u{1}é😀\u{7f}");
        assert_eq!(out, r#""a\"b\\c\nd\u0001\u00e9\ud83d\ude00\u007f""#);
    }
}

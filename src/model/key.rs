//! Join/partition key normalization

use super::table::CellValue;

/// Canonical join key derived from a cell value.
///
/// Keeps only ASCII letters and digits, lower-cased. Never fails: blank,
/// formula and absent cells all map to the empty key.
pub fn normalize_key(cell: Option<&CellValue>) -> String {
    match cell {
        Some(value) => normalize_text(&value.key_text()),
        None => String::new(),
    }
}

/// Normalize raw key text
pub fn normalize_text(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<CellValue> {
        vec![
            CellValue::from("  AB-12 / x "),
            CellValue::from("Ünïcode Straße 9"),
            CellValue::Number(1234.5),
            CellValue::Number(-7.0),
            CellValue::Boolean(false),
            CellValue::Formula("A1*2".into()),
            CellValue::Empty,
        ]
    }

    #[test]
    fn test_normalize_strips_and_lowercases() {
        assert_eq!(normalize_key(Some(&CellValue::from("  AB-12 / x "))), "ab12x");
        assert_eq!(normalize_key(Some(&CellValue::from("Ünïcode Straße 9"))), "ncodestrae9");
        assert_eq!(normalize_key(Some(&CellValue::Number(1234.5))), "12345");
        assert_eq!(normalize_key(Some(&CellValue::Number(-7.0))), "70");
        assert_eq!(normalize_key(Some(&CellValue::Boolean(true))), "true");
    }

    #[test]
    fn test_degenerate_keys_are_empty() {
        assert_eq!(normalize_key(Some(&CellValue::Empty)), "");
        assert_eq!(normalize_key(Some(&CellValue::Formula("SUM(A:A)".into()))), "");
        assert_eq!(normalize_key(None), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for cell in samples() {
            let once = normalize_key(Some(&cell));
            let twice = normalize_key(Some(&CellValue::Text(once.clone())));
            assert_eq!(once, twice);
            assert!(once
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn test_number_keys_keep_fraction_digit() {
        let number = normalize_key(Some(&CellValue::Number(2.0)));
        assert_eq!(number, "20");
        assert_ne!(normalize_key(Some(&CellValue::from("2"))), number);
        assert_eq!(normalize_key(Some(&CellValue::from("2.0"))), number);
        assert_eq!(normalize_key(Some(&CellValue::Number(1e21))), "10e21");
        assert_eq!(normalize_key(Some(&CellValue::Number(1e-7))), "10e7");
    }
}

//! seat_map.rs
//!
//! Генерация и проверка посадочных мест по геометрии зала.
//!
//! Метка места = буква ряда + номер кресла: "A1", "B12", после ряда "Z"
//! идут "AA", "AB" и так далее. Набор меток полностью определяется
//! количеством рядов и кресел в ряду.

use serde::{Deserialize, Serialize};

/// Категория места в зале.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatClass {
    Vip,
    Standard,
}

/// Буквенная метка ряда по его индексу (0-based): A..Z, AA, AB, ...
pub fn row_label(index: u32) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    letters.reverse();
    // only ASCII uppercase ends up in the buffer
    String::from_utf8(letters).unwrap()
}

/// Полный набор меток для зала rows x columns, построчно.
pub fn generate_labels(rows: u32, columns: u32) -> Vec<String> {
    let mut labels = Vec::with_capacity((rows * columns) as usize);
    for row in 0..rows {
        let letter = row_label(row);
        for column in 1..=columns {
            labels.push(format!("{}{}", letter, column));
        }
    }
    labels
}

/// Разбирает метку в координаты (индекс ряда 0-based, номер кресла 1-based).
///
/// Возвращает `None`, если метка не в каноничной форме: пустая буквенная
/// часть, строчные буквы, ведущий ноль в номере ("A01") и т.п.
pub fn parse_label(label: &str) -> Option<(u32, u32)> {
    let digit_start = label.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = label.split_at(digit_start);

    if letters.is_empty() || !letters.bytes().all(|b| b.is_ascii_uppercase()) {
        return None;
    }
    if digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // bijective base-26: A=1 .. Z=26, AA=27
    let mut row_number: u32 = 0;
    for b in letters.bytes() {
        row_number = row_number.checked_mul(26)?.checked_add((b - b'A' + 1) as u32)?;
    }

    let column: u32 = digits.parse().ok()?;
    Some((row_number - 1, column))
}

/// Проверка, что метка входит в набор, порождаемый геометрией rows x columns.
pub fn is_within(rows: u32, columns: u32, label: &str) -> bool {
    match parse_label(label) {
        Some((row, column)) => row < rows && column >= 1 && column <= columns,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn row_labels_follow_spreadsheet_order() {
        assert_eq!(row_label(0), "A");
        assert_eq!(row_label(1), "B");
        assert_eq!(row_label(25), "Z");
        assert_eq!(row_label(26), "AA");
        assert_eq!(row_label(27), "AB");
        assert_eq!(row_label(51), "AZ");
        assert_eq!(row_label(52), "BA");
    }

    #[test]
    fn generates_row_major_labels() {
        let labels = generate_labels(2, 3);
        assert_eq!(labels, vec!["A1", "A2", "A3", "B1", "B2", "B3"]);
    }

    #[test]
    fn generates_past_z_for_tall_halls() {
        let labels = generate_labels(27, 1);
        assert_eq!(labels.last().map(String::as_str), Some("AA1"));
    }

    #[test]
    fn parses_canonical_labels() {
        assert_eq!(parse_label("A1"), Some((0, 1)));
        assert_eq!(parse_label("C4"), Some((2, 4)));
        assert_eq!(parse_label("Z10"), Some((25, 10)));
        assert_eq!(parse_label("AA7"), Some((26, 7)));
    }

    #[test]
    fn rejects_non_canonical_labels() {
        for label in ["", "A", "12", "a1", "A0", "A01", "1A", "A-1", "A 1", "Ä1"] {
            assert_eq!(parse_label(label), None, "label {:?} must be rejected", label);
        }
    }

    #[test]
    fn membership_respects_geometry_bounds() {
        assert!(is_within(6, 8, "A1"));
        assert!(is_within(6, 8, "F8"));
        assert!(!is_within(6, 8, "G1")); // ряда G нет
        assert!(!is_within(6, 8, "A9")); // кресла 9 нет
        assert!(!is_within(6, 8, "AA1"));
    }

    proptest! {
        #[test]
        fn label_count_matches_geometry(rows in 1u32..40, columns in 1u32..40) {
            let labels = generate_labels(rows, columns);
            prop_assert_eq!(labels.len() as u32, rows * columns);
        }

        #[test]
        fn every_generated_label_is_unique_and_valid(rows in 1u32..30, columns in 1u32..30) {
            let labels = generate_labels(rows, columns);
            let unique: std::collections::HashSet<_> = labels.iter().collect();
            prop_assert_eq!(unique.len(), labels.len());
            for label in &labels {
                prop_assert!(is_within(rows, columns, label));
            }
        }

        #[test]
        fn parse_round_trips_generated_labels(rows in 1u32..30, columns in 1u32..30) {
            for (index, label) in generate_labels(rows, columns).iter().enumerate() {
                let expected = (index as u32 / columns, index as u32 % columns + 1);
                prop_assert_eq!(parse_label(label), Some(expected));
            }
        }
    }
}

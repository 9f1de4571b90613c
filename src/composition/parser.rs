//! Tolerant line parser for composition text.
//!
//! Each non-blank line is matched against [LINE_SHAPES] in order; the first
//! shape that yields three numbers wins. Lines that match no shape, or whose
//! numbers sum to zero, are dropped without failing the rest of the input.

use tracing::debug;

use super::{CompositionRatio, Ratios};

/// Accepted textual shapes for one composition line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineShape {
    /// Three numbers separated by runs of whitespace, `/`, `.` or `-` (`"7 11 2"`, `"4/4/2"`).
    Delimited,
    /// Exactly three digits with no separators, one digit per class (`"208"`).
    Compact,
}

/// Shapes in the order they are tried.
pub const LINE_SHAPES: [LineShape; 2] = [LineShape::Delimited, LineShape::Compact];

impl LineShape {
    /// Extract `(inf, rng, cav)` from an already trimmed line.
    pub fn extract(self, line: &str) -> Option<[f64; 3]> {
        match self {
            LineShape::Delimited => extract_delimited(line),
            LineShape::Compact => extract_compact(line),
        }
    }
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '/' | '.' | '-')
}

fn extract_delimited(line: &str) -> Option<[f64; 3]> {
    let numbers: Vec<f64> = line
        .split(is_delimiter)
        .filter_map(|token| token.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .collect();
    match numbers.as_slice() {
        &[inf, rng, cav] => Some([inf, rng, cav]),
        _ => None,
    }
}

fn extract_compact(line: &str) -> Option<[f64; 3]> {
    let mut digits = line.chars().map(|c| c.to_digit(10));
    match (digits.next(), digits.next(), digits.next(), digits.next()) {
        (Some(Some(inf)), Some(Some(rng)), Some(Some(cav)), None) => {
            Some([f64::from(inf), f64::from(rng), f64::from(cav)])
        }
        _ => None,
    }
}

fn match_shapes(line: &str) -> Option<[f64; 3]> {
    LINE_SHAPES.iter().find_map(|shape| shape.extract(line))
}

/// Parse multi-line text into compositions, preserving line order.
///
/// Ids come from the original line index (blank lines included), so
/// `"\n208"` yields a single record with id `custom-1`. Input with no valid
/// line yields an empty vector.
pub fn parse_compositions(text: &str) -> Vec<CompositionRatio> {
    text.split('\n')
        .enumerate()
        .filter_map(|(index, raw)| parse_line(index, raw))
        .collect()
}

/// Whitespace plus U+FEFF, so a byte-order mark at the start of a file is not part of the first line.
fn is_padding(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

fn parse_line(index: usize, raw: &str) -> Option<CompositionRatio> {
    let line = raw.trim_matches(is_padding);
    if line.is_empty() {
        return None;
    }

    let Some([inf, rng, cav]) = match_shapes(line) else {
        debug!(line = index, text = line, "skipping line: expected three numbers");
        return None;
    };

    let Some(ratios) = Ratios::from_parts(inf, rng, cav) else {
        debug!(line = index, text = line, "skipping line: parts sum to zero");
        return None;
    };

    Some(CompositionRatio {
        id: format!("custom-{index}"),
        label: line.to_uppercase(),
        ratios,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::RATIO_EPSILON;

    fn assert_ratios(ratios: &Ratios, inf: f64, rng: f64, cav: f64) {
        assert!((ratios.inf - inf).abs() < RATIO_EPSILON, "inf {} != {inf}", ratios.inf);
        assert!((ratios.rng - rng).abs() < RATIO_EPSILON, "rng {} != {rng}", ratios.rng);
        assert!((ratios.cav - cav).abs() < RATIO_EPSILON, "cav {} != {cav}", ratios.cav);
    }

    #[test]
    fn delimited_line_with_spaces() {
        let parsed = parse_compositions("7 11 2");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].id, "custom-0");
        assert_eq!(parsed[0].label, "7 11 2");
        assert_ratios(&parsed[0].ratios, 0.35, 0.55, 0.10);
    }

    #[test]
    fn delimited_line_with_mixed_separators() {
        let parsed = parse_compositions("4/4-2");
        assert_eq!(parsed.len(), 1);
        assert_ratios(&parsed[0].ratios, 0.4, 0.4, 0.2);

        let parsed = parse_compositions("5 . 3 //  2");
        assert_eq!(parsed.len(), 1);
        assert_ratios(&parsed[0].ratios, 0.5, 0.3, 0.2);
    }

    #[test]
    fn compact_line_uses_one_digit_per_class() {
        let parsed = parse_compositions("208");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].label, "208");
        assert_ratios(&parsed[0].ratios, 0.2, 0.0, 0.8);
    }

    #[test]
    fn compact_shape_requires_three_digits() {
        assert_eq!(LineShape::Compact.extract("1e2"), None);
        assert_eq!(LineShape::Compact.extract("2.5"), None);
        assert_eq!(LineShape::Compact.extract("2085"), None);
        assert_eq!(LineShape::Compact.extract("20"), None);
        assert!(parse_compositions("1e2").is_empty());
    }

    #[test]
    fn three_characters_with_separator_match_neither_shape() {
        // Splits into two tokens, and '.' is not a digit.
        assert!(parse_compositions("1.2").is_empty());
        assert_eq!(LineShape::Delimited.extract("1 2 3"), Some([1.0, 2.0, 3.0]));
    }

    #[test]
    fn two_tokens_are_discarded() {
        assert!(parse_compositions("20 8").is_empty());
    }

    #[test]
    fn zero_total_is_discarded() {
        assert!(parse_compositions("0 0 0").is_empty());
        assert!(parse_compositions("000").is_empty());
    }

    #[test]
    fn overflowing_parts_are_discarded() {
        assert!(parse_compositions("1e308 1e308 1e308").is_empty());
        assert_eq!(parse_compositions("1e308 1e308 1e308\n1 1 1").len(), 1);
    }

    #[test]
    fn byte_order_mark_is_trimmed() {
        let parsed = parse_compositions("\u{FEFF}7 11 2\n208\n");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].id, "custom-0");
        assert_eq!(parsed[0].label, "7 11 2");
        assert_ratios(&parsed[0].ratios, 0.35, 0.55, 0.10);

        assert!(parse_compositions("\u{FEFF}\n\u{FEFF}  ").is_empty());
    }

    #[test]
    fn blank_input_yields_nothing() {
        assert!(parse_compositions("").is_empty());
        assert!(parse_compositions("   \n  \n").is_empty());
    }

    #[test]
    fn non_numeric_tokens_are_ignored() {
        let parsed = parse_compositions("inf 6 rng 3 cav 1");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].label, "INF 6 RNG 3 CAV 1");
        assert_ratios(&parsed[0].ratios, 0.6, 0.3, 0.1);
    }

    #[test]
    fn ids_follow_original_line_positions() {
        let parsed = parse_compositions("\n569\nbad line\n\n  9 6 5  \r\n208");
        let ids: Vec<&str> = parsed.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["custom-1", "custom-4", "custom-5"]);
        assert_eq!(parsed[1].label, "9 6 5");
    }

    #[test]
    fn labels_are_upper_cased_and_may_repeat() {
        let parsed = parse_compositions("4x 4x 2x\n208\n208");
        // "4x" tokens do not parse, so the first line is dropped.
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].label, parsed[1].label);
        assert_ne!(parsed[0].id, parsed[1].id);

        let parsed = parse_compositions("a 1 b 2 c 3");
        assert_eq!(parsed[0].label, "A 1 B 2 C 3");
    }
}

//! Natural ordering for filenames: digit runs compare numerically, so
//! "ep2" sorts before "ep10".

/// One run of a filename: non-digit text (lower-cased) or a digit run
/// parsed as an integer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum NaturalPart {
    Text(String),
    Number(u128),
}

/// Comparable key over alternating text and numeric runs.
///
/// Keys always start with a text part (empty when the string begins with a
/// digit), so two keys compare text-to-text and number-to-number at every
/// position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NaturalKey(Vec<NaturalPart>);

/// Build a natural ordering key for a string. Never fails; digit runs too
/// long for a u128 saturate to the maximum value.
pub fn natural_key(s: &str) -> NaturalKey {
    let mut parts: Vec<NaturalPart> = Vec::new();
    let mut text = String::new();
    let mut digits = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            if digits.is_empty() {
                // Flush the pending text run even when empty, keeping the
                // text/number alternation aligned across keys.
                parts.push(NaturalPart::Text(text.to_lowercase()));
                text.clear();
            }
            digits.push(c);
        } else {
            if !digits.is_empty() {
                parts.push(NaturalPart::Number(parse_digit_run(&digits)));
                digits.clear();
            }
            text.push(c);
        }
    }

    if !digits.is_empty() {
        parts.push(NaturalPart::Number(parse_digit_run(&digits)));
    } else if !text.is_empty() || parts.is_empty() {
        parts.push(NaturalPart::Text(text.to_lowercase()));
    }

    NaturalKey(parts)
}

fn parse_digit_run(digits: &str) -> u128 {
    digits.parse().unwrap_or(u128::MAX)
}

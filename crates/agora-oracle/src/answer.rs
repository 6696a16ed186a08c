//! Lenient parsing of raw oracle answers.
//!
//! LLM answers rarely arrive as bare values: quantities come back as
//! "3 units of wood" or "$2.50", verdicts as "Yes, Alice bought wood."
//! Each parser here tries the strict reading first and then scans for a
//! usable token, returning `None` when nothing in the answer qualifies.
//! Substituting a default for a failed parse is the caller's decision.

use rust_decimal::Decimal;

// ---------------------------------------------------------------------------
// Verdicts
// ---------------------------------------------------------------------------

/// Interprets a yes/no answer.
///
/// The verdict is `true` iff the first word of the trimmed answer starts
/// with "yes", case-insensitive. Anything else, including an empty
/// answer, reads as no.
#[must_use]
pub fn parse_yes_no(raw: &str) -> bool {
    raw.trim()
        .split_whitespace()
        .next()
        .is_some_and(|word| word.to_ascii_lowercase().starts_with("yes"))
}

// ---------------------------------------------------------------------------
// Numbers
// ---------------------------------------------------------------------------

/// Extracts an integer from an answer.
///
/// Tries the whole trimmed answer first, then each whitespace token with
/// surrounding punctuation stripped. `"3"`, `"-2 wood"`, and `"about 4."`
/// all parse; `"3.5"` and `"several"` do not.
#[must_use]
pub fn parse_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }
    numeric_tokens(trimmed).find_map(|token| token.parse::<i64>().ok())
}

/// Extracts a decimal from an answer.
///
/// Tries the whole trimmed answer first, then each whitespace token with
/// surrounding punctuation stripped, so `"2.5"`, `"$2.50"`, and
/// `"it cost 2.5 money"` all parse.
#[must_use]
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<Decimal>() {
        return Some(value);
    }
    numeric_tokens(trimmed).find_map(|token| token.parse::<Decimal>().ok())
}

/// Whitespace tokens trimmed down to their numeric core.
///
/// Characters that cannot appear in a number are stripped from both ends,
/// which peels currency symbols and commas off tokens like `"$2.50,"`
/// without touching interior signs or points. A trailing period is then
/// stripped as well: after the digits of `"7."` it can only be sentence
/// punctuation.
fn numeric_tokens(trimmed: &str) -> impl Iterator<Item = &str> {
    trimmed
        .split_whitespace()
        .map(|token| {
            token
                .trim_matches(|c: char| !c.is_ascii_digit() && c != '-' && c != '.')
                .trim_end_matches('.')
        })
        .filter(|token| !token.is_empty())
}

// ---------------------------------------------------------------------------
// Name lists
// ---------------------------------------------------------------------------

/// Splits a comma-separated list of names.
///
/// Each segment is trimmed of whitespace and trailing sentence
/// punctuation; empty segments are dropped. Membership checks against
/// the roster are the caller's job, so stray words like "None" pass
/// through here unharmed.
#[must_use]
pub fn parse_name_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|segment| segment.trim().trim_end_matches('.').trim())
        .filter(|segment| !segment.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Token extraction from the unprocessed-input buffer.
//!
//! The console accumulates raw text from the input bar, shortcut firings, and
//! programmatic submissions in a single buffer, then pulls one command token
//! out of it per tick. Extraction is a pure, single left-to-right pass: it
//! never fails, it just classifies characters and drops what it cannot use.
//!
//! Character classes:
//! - Separators (`\r`, `\n`, `\t`, space) terminate a non-empty token and are
//!   consumed with it; leading separators are skipped.
//! - Marker characters (`-`, `+`, `_`) are part of the token only while no
//!   alphanumeric has been accepted yet, so a command may *begin* with a run
//!   of markers (`--grid`) but `ab-cd` collapses to `abcd`.
//! - ASCII alphanumerics are accepted and lower-cased.
//! - Everything else is noise and is silently discarded.

/// Result of extracting one token from a buffer.
///
/// `remainder` borrows the unconsumed tail of the input; the consumed prefix
/// includes the separator that terminated the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction<'a> {
    /// The lower-cased command token. Empty if the buffer held no token.
    pub token: String,
    /// Everything after the consumed prefix.
    pub remainder: &'a str,
}

/// Returns true for the characters that terminate a token.
fn is_separator(c: char) -> bool {
    matches!(c, '\r' | '\n' | '\t' | ' ')
}

/// Returns true for the characters legal at the start of a command name.
fn is_marker(c: char) -> bool {
    matches!(c, '-' | '+' | '_')
}

/// Extracts the next command token from `buffer`.
///
/// If a separator terminates the token, the remainder starts immediately
/// after that separator. If the scan reaches the end of the buffer, the whole
/// buffer is consumed and the remainder is empty — even when the accumulated
/// token is empty (a buffer of pure noise or separators is simply drained).
pub fn next_token(buffer: &str) -> Extraction<'_> {
    let mut token = String::new();
    let mut seen_alnum = false;

    for (idx, c) in buffer.char_indices() {
        if is_separator(c) {
            if token.is_empty() {
                continue;
            }
            let rest = idx + c.len_utf8();
            return Extraction {
                token,
                remainder: &buffer[rest..],
            };
        }

        if c.is_ascii_alphanumeric() {
            token.push(c.to_ascii_lowercase());
            seen_alnum = true;
        } else if is_marker(c) && !seen_alnum {
            token.push(c);
        }
        // anything else: noise, dropped
    }

    Extraction {
        token,
        remainder: "",
    }
}

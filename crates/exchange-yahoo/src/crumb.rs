//! Crumb extraction from the quote page's embedded script state.
//!
//! The quote page inlines a large JSON blob containing
//! `"CrumbStore":{"crumb":"..."}`. The extraction here scans for the marker
//! and then takes the balanced JSON object that follows, rather than cutting
//! at the next comma; crumbs routinely contain escapes (`/`) and the
//! comma-cut approach breaks on them. The page format is undocumented and
//! upstream can change it without warning, so everything format-dependent
//! stays behind this one function.

use crate::error::{Result, YahooError};
use serde::Deserialize;

/// Marker preceding the crumb object in the quote page.
const CRUMB_MARKER: &str = "\"CrumbStore\"";

#[derive(Deserialize)]
struct CrumbStore {
    crumb: String,
}

/// Extracts the crumb token from a quote page body.
///
/// # Errors
/// Returns [`YahooError::CrumbMissing`] when the marker is absent and
/// [`YahooError::CrumbMalformed`] when the marker is present but the
/// fragment after it is not a parseable `{"crumb": ...}` object.
pub fn extract_crumb(body: &str) -> Result<String> {
    let marker_at = body.find(CRUMB_MARKER).ok_or(YahooError::CrumbMissing)?;
    let after = &body[marker_at + CRUMB_MARKER.len()..];

    // Only a colon and whitespace may sit between the marker and its object.
    let object_at = after
        .char_indices()
        .find(|(_, c)| !c.is_whitespace() && *c != ':')
        .map(|(i, _)| i)
        .ok_or_else(|| YahooError::CrumbMalformed("nothing follows marker".to_string()))?;
    if !after[object_at..].starts_with('{') {
        return Err(YahooError::CrumbMalformed(
            "marker not followed by an object".to_string(),
        ));
    }

    let fragment = balanced_object(&after[object_at..])?;
    let store: CrumbStore = serde_json::from_str(fragment)
        .map_err(|e| YahooError::CrumbMalformed(e.to_string()))?;

    if store.crumb.is_empty() {
        return Err(YahooError::CrumbMalformed("empty crumb value".to_string()));
    }
    Ok(store.crumb)
}

/// Returns the shortest prefix of `input` that forms a balanced JSON object.
///
/// Braces inside string literals (and escaped quotes inside those strings)
/// do not count toward the balance.
fn balanced_object(input: &str) -> Result<&str> {
    debug_assert!(input.starts_with('{'));

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (index, c) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&input[..=index]);
                }
            }
            _ => {}
        }
    }

    Err(YahooError::CrumbMalformed(
        "unterminated object after marker".to_string(),
    ))
}

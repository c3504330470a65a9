//! Encoding and decoding of facet values embedded in LPSE path segments.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use thiserror::Error;
use tracing::debug;

/// Escapes everything but alphanumerics, `-`, `_`, `.` and the space, which
/// is turned into `+` once the escaping is done. `+`, `%`, `:` and `/` always
/// leave as `%2B`, `%25`, `%3A` and `%2F`.
const PANL_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b' ');

/// Where a token was read from. Query strings keep `%3A` and `%2F` escaped,
/// since `:` and `/` are only structural inside a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenSource {
    #[default]
    PathSegment,
    QueryString,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathCodecError {
    #[error("malformed percent escape at byte {position} of '{token}'")]
    MalformedEscape { token: String, position: usize },
    #[error("'{token}' does not decode to valid UTF-8")]
    InvalidUtf8 { token: String },
}

/// Turns display text into a token that can sit in one LPSE path segment.
pub fn encode_panl(text: &str) -> String {
    utf8_percent_encode(text, PANL_SEGMENT)
        .to_string()
        .replace(' ', "+")
}

/// Decodes a token taken from a path segment.
pub fn decode_panl(token: &str) -> Result<String, PathCodecError> {
    decode_panl_from(token, TokenSource::PathSegment)
}

/// Decodes a token in a single pass: every `+` becomes a space and every
/// escape becomes its character, so an escaped `%2B` always ends up as a
/// literal `+` and is never read again as a space.
pub fn decode_panl_from(token: &str, source: TokenSource) -> Result<String, PathCodecError> {
    check_escapes(token)?;

    let spaced = token.replace('+', " ");
    let prepared = match source {
        TokenSource::PathSegment => Cow::Borrowed(spaced.as_str()),
        TokenSource::QueryString => Cow::Owned(keep_structural_escapes(&spaced)),
    };

    percent_decode_str(&prepared)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| PathCodecError::InvalidUtf8 { token: token.to_string() })
}

/// Text to show for a token. A token that cannot be decoded is shown as is.
pub fn display_token(token: &str) -> String {
    match decode_panl(token) {
        Ok(text) => text,
        Err(e) => {
            debug!("showing raw token: {}", e);
            token.to_string()
        }
    }
}

fn check_escapes(token: &str) -> Result<(), PathCodecError> {
    let bytes = token.as_bytes();
    let mut position = 0;
    while position < bytes.len() {
        if bytes[position] != b'%' {
            position += 1;
            continue;
        }
        let is_escape = bytes
            .get(position + 1..position + 3)
            .is_some_and(|hex| hex.iter().all(|b| b.is_ascii_hexdigit()));
        if !is_escape {
            return Err(PathCodecError::MalformedEscape { token: token.to_string(), position });
        }
        position += 3;
    }
    Ok(())
}

// "%3A" becomes "%253A", which the decoder turns back into the text "%3A"
fn keep_structural_escapes(token: &str) -> String {
    let mut kept = token.to_string();
    for escape in ["%3A", "%3a", "%2F", "%2f"] {
        kept = kept.replace(escape, &format!("%25{}", &escape[1..]));
    }
    kept
}

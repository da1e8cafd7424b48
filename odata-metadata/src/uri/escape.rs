//! Path segment escaping

use percent_encoding::AsciiSet;
use percent_encoding::CONTROLS;
use percent_encoding::utf8_percent_encode;
use url::Url;

/// Characters escaped inside a single path segment.
///
/// OData key punctuation (`'`, `(`, `)`, `=`, `,`) and `$` are kept.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'\\')
    .add(b'^')
    .add(b'[')
    .add(b']')
    .add(b'|');

/// Escapes `text` for use as (part of) a path segment.
pub fn escape_segment(text: &str) -> String {
    utf8_percent_encode(text, SEGMENT).to_string()
}

/// Appends an already escaped segment, adding a separating slash unless the
/// path already ends in one.
pub(crate) fn push_escaped_segment(uri: &mut Url, escaped: &str) {
    let mut path = uri.path().to_string();
    if !path.ends_with('/') {
        path.push('/');
    }
    path.push_str(escaped);
    uri.set_path(&path);
}

/// Escapes `segment` and appends it as a new path segment.
pub(crate) fn push_segment(uri: &mut Url, segment: &str) {
    push_escaped_segment(uri, &escape_segment(segment));
}

/// Appends already escaped text to the last path segment.
pub(crate) fn push_to_last_segment(uri: &mut Url, escaped: &str) {
    let path = format!("{}{}", uri.path(), escaped);
    uri.set_path(&path);
}

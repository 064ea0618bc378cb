//! URI percent-encoding for ShortSQL strings.
//!
//! The URL-safe form leaves every character that is legal somewhere in a URI
//! untouched (so `~`, `?`, `:`, `,` and friends survive) and percent-encodes
//! the rest, `|`, `[`, `>` and `^` among them.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use std::borrow::Cow;

/// Bytes left as-is: URI unreserved marks plus reserved characters and `#`.
pub const URI: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'#');

/// Percent-encode `input` for embedding in a URL.
pub fn encode(input: &str) -> String {
    utf8_percent_encode(input, URI).to_string()
}

/// Reverse [`encode`]. Invalid UTF-8 after decoding is replaced lossily.
pub fn decode(input: &str) -> Cow<'_, str> {
    percent_decode_str(input).decode_utf8_lossy()
}

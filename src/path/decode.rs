use memchr::memchr;
use std::borrow::Cow;

use super::{PathError, PathResult};

/// Decodes `%XX` escapes in a request path.
///
/// A path without `%` is returned borrowed. Every escape must be followed by
/// two hex digits and the decoded bytes must form valid UTF-8. `%2F` decodes
/// to a slash and therefore separates segments once the path is cleaned.
#[tracing::instrument(level = "trace", skip_all, fields(path_len = input.len() as u64))]
pub fn decode_percent(input: &str) -> PathResult<Cow<'_, str>> {
    let bytes = input.as_bytes();
    let Some(first) = memchr(b'%', bytes) else {
        return Ok(Cow::Borrowed(input));
    };

    let mut output = Vec::with_capacity(bytes.len());
    output.extend_from_slice(&bytes[..first]);

    let mut i = first;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let value = bytes
                    .get(i + 1..i + 3)
                    .and_then(|pair| decode_hex_pair(pair[0], pair[1]))
                    .ok_or_else(|| PathError::InvalidPercentEncoding {
                        input: input.to_string(),
                        index: i,
                    })?;
                output.push(value);
                i += 3;
            }
            byte => {
                output.push(byte);
                i += 1;
            }
        }
    }

    String::from_utf8(output)
        .map(Cow::Owned)
        .map_err(|_| PathError::InvalidUtf8 {
            input: input.to_string(),
        })
}

fn decode_hex_pair(hi: u8, lo: u8) -> Option<u8> {
    fn val(byte: u8) -> Option<u8> {
        match byte {
            b'0'..=b'9' => Some(byte - b'0'),
            b'a'..=b'f' => Some(byte - b'a' + 10),
            b'A'..=b'F' => Some(byte - b'A' + 10),
            _ => None,
        }
    }

    Some(val(hi)? << 4 | val(lo)?)
}

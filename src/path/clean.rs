/// Lexically cleans a slash-separated path.
///
/// Repeated slashes collapse, `.` segments are dropped and each `..` removes
/// the segment before it. A `..` that would climb above the root of a rooted
/// path is discarded. Trailing slashes are removed except for the root itself.
/// Cleaning an already clean path returns it unchanged.
#[inline]
#[tracing::instrument(level = "trace", skip_all, fields(path_len = path.len() as u64))]
pub fn clean_path(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let bytes = path.as_bytes();
    let len = bytes.len();
    let rooted = bytes[0] == b'/';
    let mut output = String::with_capacity(len);

    // `floor` is the length below which `..` may not backtrack.
    let mut idx = 0usize;
    let mut floor = 0usize;
    if rooted {
        output.push('/');
        idx = 1;
        floor = 1;
    }

    while idx < len {
        if bytes[idx] == b'/' {
            idx += 1;
        } else if bytes[idx] == b'.' && (idx + 1 == len || bytes[idx + 1] == b'/') {
            idx += 1;
        } else if bytes[idx] == b'.'
            && bytes[idx + 1] == b'.'
            && (idx + 2 == len || bytes[idx + 2] == b'/')
        {
            idx += 2;
            if output.len() > floor {
                let written = output.as_bytes();
                let mut w = written.len() - 1;
                while w > floor && written[w] != b'/' {
                    w -= 1;
                }
                output.truncate(w);
            } else if !rooted {
                if !output.is_empty() {
                    output.push('/');
                }
                output.push_str("..");
                floor = output.len();
            }
        } else {
            if (rooted && output.len() != 1) || (!rooted && !output.is_empty()) {
                output.push('/');
            }
            let start = idx;
            while idx < len && bytes[idx] != b'/' {
                idx += 1;
            }
            output.push_str(&path[start..idx]);
        }
    }

    if output.is_empty() {
        return ".".to_string();
    }
    output
}

#[inline]
pub fn is_rooted(path: &str) -> bool {
    path.as_bytes().first() == Some(&b'/')
}

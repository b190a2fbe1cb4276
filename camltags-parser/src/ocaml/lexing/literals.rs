//! Comment and string scanning
//!
//! OCaml comments nest, and "comments do not occur inside string or character literals", so a
//! `*)` inside a quoted string within a comment does not close it. Both scanners work on the
//! bytes that follow the opening marker and return how many of them belong to the construct,
//! closing marker included. Running out of input ends the construct at the end of the input.

/// Length of a string literal body, starting just past the opening quote.
pub fn string_body_len(bytes: &[u8]) -> usize {
    let mut escaped = false;
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'"' && !escaped {
            return i + 1;
        }
        escaped = !escaped && b == b'\\';
    }
    bytes.len()
}

/// Length of a comment body, starting just past the opening `(*`.
pub fn comment_body_len(bytes: &[u8]) -> usize {
    let mut depth = 1usize;
    let mut last_is_star = false;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b')' if last_is_star => {
                i += 1;
                depth -= 1;
                if depth == 0 {
                    return i;
                }
                last_is_star = false;
            }
            b'(' if bytes.get(i + 1) == Some(&b'*') => {
                depth += 1;
                i += 2;
                last_is_star = false;
            }
            b'"' => {
                i += 1 + string_body_len(&bytes[i + 1..]);
                last_is_star = false;
            }
            // '"' would otherwise open a string
            b'\'' if bytes.get(i + 1) == Some(&b'"') && bytes.get(i + 2) == Some(&b'\'') => {
                i += 3;
                last_is_star = false;
            }
            b => {
                last_is_star = b == b'*';
                i += 1;
            }
        }
    }

    bytes.len()
}

//! Token combiners.
//!
//! The tokenizer splits on every quote and slash, so string literals and
//! line comments arrive as runs of small tokens. These passes merge each
//! run back into one token so it can be looked up as a whole. Both are
//! single forward passes that only merge adjacent tokens; the combined
//! stream still concatenates to the original text.

/// Runs the string combiner, then the comment combiner.
pub fn combine_tokens<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    combine_comment_tokens(&combine_string_tokens(tokens))
}

/// Merges `"..."` and `$"..."` runs into single tokens.
///
/// A string still open at the end of input is flushed as one final token.
pub fn combine_string_tokens<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    let mut combined = Vec::with_capacity(tokens.len());
    let mut current = String::new();
    let mut in_string = false;
    // `$` was seen and the opening quote has not been consumed yet.
    let mut awaiting_quote = false;

    for (index, token) in tokens.iter().enumerate() {
        let token = token.as_ref();

        if in_string {
            current.push_str(token);
            if awaiting_quote {
                awaiting_quote = false;
            } else if token.starts_with('"') || token.ends_with('"') {
                combined.push(std::mem::take(&mut current));
                in_string = false;
            }
            continue;
        }

        let opens_interpolated = token.starts_with('$')
            && !token.contains('"')
            && tokens
                .get(index + 1)
                .is_some_and(|next| next.as_ref() == "\"");

        if opens_interpolated {
            in_string = true;
            awaiting_quote = true;
            current.push_str(token);
        } else if token.starts_with('"') && !is_closed_string(token) {
            in_string = true;
            current.push_str(token);
        } else {
            combined.push(token.to_string());
        }
    }

    if in_string {
        tracing::trace!(partial = %current, "unterminated string literal");
        combined.push(current);
    }

    combined
}

/// Merges `//` comments, up to and including the newline, into single tokens.
///
/// A comment still open at the end of input is flushed without a newline.
pub fn combine_comment_tokens<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    let mut combined = Vec::with_capacity(tokens.len());
    let mut current = String::new();
    let mut in_comment = false;
    let mut tokens = tokens.iter().map(AsRef::as_ref).peekable();

    while let Some(token) = tokens.next() {
        if in_comment {
            current.push_str(token);
            if token == "\n" {
                combined.push(std::mem::take(&mut current));
                in_comment = false;
            }
        } else if token == "/" && tokens.peek() == Some(&"/") {
            in_comment = true;
            current.push_str(token);
        } else {
            combined.push(token.to_string());
        }
    }

    if in_comment {
        combined.push(current);
    }

    combined
}

/// A token that already opens and closes a string, e.g. `"hello"`.
fn is_closed_string(token: &str) -> bool {
    token.len() >= 2 && token.starts_with('"') && token.ends_with('"')
}

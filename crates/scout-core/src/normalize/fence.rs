//! Fenced code block extraction.

const FENCE: &str = "```";

/// Return the body of the first fenced block in `text`, trimmed.
///
/// The opening fence may carry a language tag (` ```json `, ` ```JSON `,
/// ` ```javascript `). Returns `None` when there is no opening fence or it
/// is never closed.
pub fn extract_fenced(text: &str) -> Option<&str> {
    let start = text.find(FENCE)? + FENCE.len();
    let after_open = &text[start..];
    let body_start = skip_language_tag(after_open);
    let body = &after_open[body_start..];
    let end = body.find(FENCE)?;
    Some(body[..end].trim())
}

/// Byte offset just past the language tag, or 0 when there is none.
fn skip_language_tag(after_open: &str) -> usize {
    let tag_len: usize = after_open
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+'))
        .map(char::len_utf8)
        .sum();

    if tag_len == 0 {
        return 0;
    }

    let tag = &after_open[..tag_len];
    let followed_by_space = after_open[tag_len..]
        .chars()
        .next()
        .map_or(true, char::is_whitespace);

    // "```json{...}" has no separator but the tag is still unambiguous
    if followed_by_space || tag.eq_ignore_ascii_case("json") {
        tag_len
    } else {
        0
    }
}

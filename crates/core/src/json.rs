//! Recovery of a JSON object embedded in free-form model output.

/// Return the widest brace-delimited span of `text`: from the first `{` to
/// the last `}`, inclusive.
///
/// No structural validation happens here; prose and code fences around the
/// object are stripped, anything between the braces is kept as is.
pub fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

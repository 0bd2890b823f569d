//! Substring extraction with a clamping boundary policy.

/// Returns the substring of `value` starting at character `start` and at most
/// `length` characters long.
///
/// Offsets count Unicode scalar values, so a multi-byte character is never
/// split. Out-of-range offsets are clamped rather than rejected:
///
/// - `start` at or past the end yields an empty string
/// - no `length`, or `start + length` at or past the end, yields the rest of
///   the string from `start`
///
/// # Examples
///
/// ```
/// use tf_truncate::truncate;
///
/// assert_eq!(truncate("HelloWorld", 0, Some(5)), "Hello");
/// assert_eq!(truncate("HelloWorld", 5, None), "World");
/// assert_eq!(truncate("HelloWorld", 20, Some(2)), "");
/// assert_eq!(truncate("héllo", 1, Some(3)), "éll");
/// ```
pub fn truncate(value: &str, start: usize, length: Option<usize>) -> String {
    let Some((begin, _)) = value.char_indices().nth(start) else {
        return String::new();
    };
    let rest = &value[begin..];

    match length.and_then(|len| rest.char_indices().nth(len)) {
        Some((end, _)) => rest[..end].to_string(),
        None => rest.to_string(),
    }
}

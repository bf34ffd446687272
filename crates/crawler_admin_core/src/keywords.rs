/// Splits keyword text into the list the backend expects: one entry per
/// line, trimmed, blank lines dropped.
pub fn keywords_to_list(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Joins a backend keyword list back into editable text.
pub fn keywords_to_text<S: AsRef<str>>(keywords: &[S]) -> String {
    keywords
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n")
}

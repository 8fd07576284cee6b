use super::segmenter::FENCE;

/// Collects all fenced code from a raw reply and re-wraps it tagged with the
/// requested output language.
///
/// This is a second, independent pass over the reply that ignores section
/// markers entirely. Unlike the segmenter's strict fence handling, a line
/// toggles code mode whenever its trimmed value merely *starts with* the
/// fence, because upstream replies open blocks with a trailing language tag
/// (```` ```python ````) that must still toggle. Whatever tag the upstream
/// text used is discarded; the result is always
/// `` ```<language>\n<collected lines>\n``` ``.
pub fn extract_code(reply: &str, language: &str) -> String {
    let mut collected = vec![format!("{}{}", FENCE, language)];
    let mut in_code = false;

    for line in reply.lines() {
        if line.trim().starts_with(FENCE) {
            in_code = !in_code;
            continue;
        }

        if in_code {
            collected.push(line.to_string());
        }
    }

    let mut code = collected.join("\n");
    code.push('\n');
    code.push_str(FENCE);
    code
}

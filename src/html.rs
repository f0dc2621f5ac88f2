/// Decode HTML entities (`&amp;`, `&quot;`, `&#039;`, `&eacute;`, ...) in
/// provider text.
///
/// Plain text passes through unchanged, so decoding an already decoded
/// string is a no-op.
pub fn decode_entities(input: &str) -> String {
    html_escape::decode_html_entities(input).into_owned()
}

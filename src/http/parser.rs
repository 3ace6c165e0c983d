/// Extracts the resource path from a single request line.
///
/// The path is the substring immediately following the literal `"GET "`
/// token, truncated at the first space after it, so
/// `"GET /index.html HTTP/1.1"` yields `"/index.html"`. Lines without the
/// token, and a token followed by nothing, yield `None` — an empty capture is
/// never returned.
pub fn target_from_line(line: &str) -> Option<String> {
    let rest = line.split_once("GET ")?.1;
    let path = rest.split(' ').next().unwrap_or(rest);

    if path.is_empty() {
        return None;
    }
    Some(path.to_string())
}

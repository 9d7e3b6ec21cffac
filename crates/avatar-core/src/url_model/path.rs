//! Last path segment of a URL.

/// Extracts the last non-empty path segment from a URL, without query or fragment.
///
/// Unparseable input is treated as a bare path. Returns `None` if the path is
/// empty/root or ends in a dot segment.
pub fn last_path_segment(url: &str) -> Option<String> {
    let segment = match url::Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()?
            .filter(|s| !s.is_empty())
            .last()?
            .to_string(),
        Err(_) => {
            let path = url.split(['?', '#']).next().unwrap_or("");
            path.rsplit('/').find(|s| !s.is_empty())?.to_string()
        }
    };
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment)
}

//! Parse HTTP response header lines collected by the curl header callback.

/// Status code from a status line such as `HTTP/1.1 200 OK` or `HTTP/2 404`.
///
/// Returns `None` for ordinary header lines.
pub fn parse_status_line(line: &str) -> Option<u32> {
    let line = line.trim();
    if !line.starts_with("HTTP/") {
        return None;
    }
    let code = line.split_whitespace().nth(1)?;
    if code.len() != 3 {
        return None;
    }
    code.parse::<u32>().ok()
}

/// 2xx only. Redirects count as failures since they are never followed.
pub fn is_success(code: u32) -> bool {
    (200..300).contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_lines() {
        assert_eq!(parse_status_line("HTTP/1.1 200 OK"), Some(200));
        assert_eq!(parse_status_line("HTTP/2 404"), Some(404));
        assert_eq!(parse_status_line("HTTP/1.0 302 Found\r\n"), Some(302));
    }

    #[test]
    fn header_lines_ignored() {
        assert_eq!(parse_status_line("Content-Length: 12345"), None);
        assert_eq!(parse_status_line(""), None);
        assert_eq!(parse_status_line("HTTP/1.1 abc"), None);
        assert_eq!(parse_status_line("HTTP/1.1 2000 Weird"), None);
    }

    #[test]
    fn success_range() {
        assert!(is_success(200));
        assert!(is_success(206));
        assert!(!is_success(304));
        assert!(!is_success(302));
        assert!(!is_success(500));
    }
}

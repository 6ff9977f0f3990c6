//! Location handling: base paths, URL splitting and path validation
//!
//! Everything here is pure string work, shared by route definitions,
//! navigation targets and the resolution step.

/// A location split into its matchable path and the parts that never match
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    /// Percent-decoded path (always starts with `/`)
    pub path: String,
    /// Query string without the leading `?`
    pub query: Option<String>,
    /// Fragment without the leading `#`
    pub fragment: Option<String>,
}

impl Location {
    /// Split `path?query#fragment` and decode the path.
    ///
    /// A path with a malformed escape is kept as written.
    pub fn parse(url: &str) -> Self {
        let (rest, fragment) = match url.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment.to_string())),
            None => (url, None),
        };
        let (raw_path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (rest, None),
        };

        let raw_path = if raw_path.is_empty() { "/" } else { raw_path };
        let path = decode_path(raw_path).unwrap_or_else(|| raw_path.to_string());

        Self {
            path,
            query,
            fragment,
        }
    }
}

/// Normalize a base prefix: drop any origin, force a leading `/`,
/// drop the trailing `/`. `"/"` and `""` both become `""`.
///
/// The result is percent-encoded the way browsers report `pathname`,
/// so `"/my app"` and `"/my%20app"` normalize to the same base.
///
/// # Example
/// ```
/// use waypoint_router::normalize_base;
///
/// assert_eq!(normalize_base("app/"), "/app");
/// assert_eq!(normalize_base("https://example.com/app/"), "/app");
/// assert_eq!(normalize_base("/"), "");
/// assert_eq!(normalize_base("/my app"), "/my%20app");
/// ```
pub fn normalize_base(base: &str) -> String {
    let base = base.trim();
    let base = strip_origin(base);

    let mut normalized = String::with_capacity(base.len() + 1);
    if !base.starts_with('/') {
        normalized.push('/');
    }
    normalized.push_str(base);

    while normalized.ends_with('/') {
        normalized.pop();
    }

    match decode_path(&normalized) {
        Some(decoded) => encode_path(&decoded),
        None => normalized,
    }
}

fn strip_origin(url: &str) -> &str {
    let Some(scheme_end) = url.find("://") else {
        return url;
    };
    let scheme = &url[..scheme_end];
    if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphanumeric()) {
        return url;
    }
    let after = &url[scheme_end + 3..];
    match after.find('/') {
        Some(slash) => &after[slash..],
        None => "",
    }
}

/// Strip a normalized base from an observed location.
///
/// The comparison ignores ASCII case and accepts the base either
/// percent-encoded or decoded. The base only matches on a segment
/// boundary; locations outside the base are returned unchanged.
pub fn strip_base<'a>(url: &'a str, base: &str) -> &'a str {
    if base.is_empty() {
        return url;
    }
    if let Some(rest) = strip_prefix_segment(url, base) {
        return rest;
    }
    match decode_path(base) {
        Some(decoded) if decoded != base => strip_prefix_segment(url, &decoded).unwrap_or(url),
        _ => url,
    }
}

fn strip_prefix_segment<'a>(url: &'a str, base: &str) -> Option<&'a str> {
    let head = url.get(..base.len())?;
    if !head.eq_ignore_ascii_case(base) {
        return None;
    }
    let rest = &url[base.len()..];
    match rest.as_bytes().first() {
        None => Some("/"),
        Some(b'/') | Some(b'?') | Some(b'#') => Some(rest),
        Some(_) => None,
    }
}

/// Prepend a normalized base to an app-relative location
pub fn join_base(base: &str, url: &str) -> String {
    let mut joined = String::with_capacity(base.len() + url.len());
    joined.push_str(base);
    joined.push_str(url);
    joined
}

/// Check the syntax of an app-relative path (no query or fragment)
pub fn validate_path(path: &str) -> std::result::Result<(), &'static str> {
    if path.is_empty() {
        return Err("path is empty");
    }
    if !path.starts_with('/') {
        return Err("path must start with '/'");
    }
    if path.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err("path contains whitespace or control characters");
    }
    if decode_bytes(path).is_none() {
        return Err("malformed percent escape");
    }
    Ok(())
}

/// Percent-encode a decoded path, leaving `/` and the characters browsers
/// keep verbatim in `pathname` untouched.
pub fn encode_path(path: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut encoded = String::with_capacity(path.len());
    for &b in path.as_bytes() {
        if b.is_ascii_alphanumeric() || b"/-._~!$&'()*+,;=:@".contains(&b) {
            encoded.push(b as char);
        } else {
            encoded.push('%');
            encoded.push(HEX[(b >> 4) as usize] as char);
            encoded.push(HEX[(b & 0xf) as usize] as char);
        }
    }
    encoded
}

/// Percent-decode a path. `None` on a malformed escape or invalid UTF-8.
pub fn decode_path(path: &str) -> Option<String> {
    if !path.contains('%') {
        return Some(path.to_string());
    }
    String::from_utf8(decode_bytes(path)?).ok()
}

fn decode_bytes(s: &str) -> Option<Vec<u8>> {
    let bytes = s.as_bytes();
    let mut result = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let high = hex_char_to_val(*bytes.get(i + 1)?)?;
            let low = hex_char_to_val(*bytes.get(i + 2)?)?;
            result.push((high << 4) | low);
            i += 3;
        } else {
            result.push(bytes[i]);
            i += 1;
        }
    }

    Some(result)
}

fn hex_char_to_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base(""), "");
        assert_eq!(normalize_base("/"), "");
        assert_eq!(normalize_base("/app"), "/app");
        assert_eq!(normalize_base("/app/"), "/app");
        assert_eq!(normalize_base("app"), "/app");
        assert_eq!(normalize_base("http://localhost:5173/ui/"), "/ui");
        assert_eq!(normalize_base("https://example.com"), "");
        assert_eq!(normalize_base("/my app/"), "/my%20app");
        assert_eq!(normalize_base("/my%20app"), "/my%20app");
        assert_eq!(normalize_base("/caf\u{e9}"), "/caf%C3%A9");
        // Malformed escape is kept as written
        assert_eq!(normalize_base("/100%"), "/100%");
    }

    #[test]
    fn test_strip_base() {
        assert_eq!(strip_base("/app/tasks", "/app"), "/tasks");
        assert_eq!(strip_base("/app", "/app"), "/");
        assert_eq!(strip_base("/APP/tasks", "/app"), "/tasks");
        assert_eq!(strip_base("/app?x=1", "/app"), "?x=1");
        // Not on a segment boundary
        assert_eq!(strip_base("/application", "/app"), "/application");
        // Outside the base
        assert_eq!(strip_base("/other", "/app"), "/other");
        assert_eq!(strip_base("/tasks", ""), "/tasks");
    }

    #[test]
    fn test_strip_encoded_base() {
        assert_eq!(strip_base("/my%20app/tasks", "/my%20app"), "/tasks");
        assert_eq!(strip_base("/my app/tasks", "/my%20app"), "/tasks");
        assert_eq!(strip_base("/caf%c3%a9?x=1", "/caf%C3%A9"), "?x=1");
        assert_eq!(strip_base("/my%20apps", "/my%20app"), "/my%20apps");
    }

    #[test]
    fn test_encode_path() {
        assert_eq!(encode_path("/my app/tasks"), "/my%20app/tasks");
        assert_eq!(encode_path("/caf\u{e9}"), "/caf%C3%A9");
        assert_eq!(encode_path("/a-b_c.d~e"), "/a-b_c.d~e");
        assert_eq!(encode_path("/100%"), "/100%25");
    }

    #[test]
    fn test_parse_location() {
        let loc = Location::parse("/tasks?page=2#top");
        assert_eq!(loc.path, "/tasks");
        assert_eq!(loc.query.as_deref(), Some("page=2"));
        assert_eq!(loc.fragment.as_deref(), Some("top"));

        let loc = Location::parse("?x=1");
        assert_eq!(loc.path, "/");
        assert_eq!(loc.query.as_deref(), Some("x=1"));
        assert_eq!(loc.fragment, None);
    }

    #[test]
    fn test_parse_decodes_path() {
        assert_eq!(Location::parse("/t%61sks").path, "/tasks");
        assert_eq!(Location::parse("/caf%C3%A9").path, "/café");
        // Malformed escape is kept verbatim
        assert_eq!(Location::parse("/100%").path, "/100%");
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("/").is_ok());
        assert!(validate_path("/tasks").is_ok());
        assert!(validate_path("/a%20b").is_ok());
        assert_eq!(validate_path(""), Err("path is empty"));
        assert_eq!(validate_path("tasks"), Err("path must start with '/'"));
        assert!(validate_path("/a b").is_err());
        assert!(validate_path("/a\nb").is_err());
        assert_eq!(validate_path("/%zz"), Err("malformed percent escape"));
    }

    #[test]
    fn test_join_base() {
        assert_eq!(join_base("/app", "/tasks"), "/app/tasks");
        assert_eq!(join_base("", "/tasks"), "/tasks");
    }
}

use url::Url;

/// Reduces a URL to the canonical identity key used for deduplication.
///
/// The key is `host[:port]` followed by the cleaned path: hostname
/// lower-cased with any leading `www.` label removed, the port kept only
/// when it is not the scheme's default, the path lower-cased with duplicate
/// separators collapsed and a trailing separator dropped, and the query
/// string and fragment discarded entirely. A bare root path normalizes to
/// the empty string, so `https://example.com/` becomes `example.com`.
pub fn normalize_url(raw: &str) -> Result<String, url::ParseError> {
    let url = parse_lenient(raw)?;

    let mut host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    if let Some(bare) = host.strip_prefix("www.") {
        host = bare.to_string();
    }

    // The url crate elides known default ports at parse time, so any port
    // still present here is a non-default one and stays in the key.
    if let Some(port) = url.port() {
        host = format!("{host}:{port}");
    }

    // `.` and `..` segments are already resolved during parsing; collapsing
    // empty segments removes duplicate and trailing separators in one pass.
    let path = url.path().to_ascii_lowercase();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if segments.is_empty() {
        Ok(host)
    } else {
        Ok(format!("{host}/{}", segments.join("/")))
    }
}

/// Parses a URL, assuming `https` for scheme-less input.
///
/// Keys produced by `normalize_url` carry no scheme; the retry lets the
/// function accept its own output, keeping normalization idempotent.
fn parse_lenient(raw: &str) -> Result<Url, url::ParseError> {
    match Url::parse(raw) {
        Ok(url) if url.host_str().is_some() => Ok(url),
        Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("https://{raw}"))
        }
        Err(e) => Err(e),
    }
}

/// Removes a single trailing path separator, if present.
pub fn trim_trailing_slash(s: &str) -> &str {
    s.strip_suffix('/').unwrap_or(s)
}

// Path helpers shared by the link interceptor and the content loader.
//
// All functions here are pure string transformations:
// 1. normalize_path: "./about" -> "/about", "//a//b/" -> "/a/b/", "contact" -> "/contact"
// 2. content_url: "/blog" -> "/blog/", "/feed.xml" stays, "/" stays
// 3. is_internal_href: decides whether an anchor href is handled client-side
// 4. same_page: trailing-slash-insensitive comparison used for active link highlighting

/// Normalize a raw href into a root-relative path.
///
/// Strips one leading `./`, makes sure the result starts with `/` and
/// collapses every run of `/` into a single one. Running it on its own
/// output returns the same string.
pub fn normalize_path(path: &str) -> String {
    let path = path.strip_prefix("./").unwrap_or(path);
    let mut normalized = String::with_capacity(path.len() + 1);

    if !path.starts_with('/') {
        normalized.push('/');
    }

    for ch in path.chars() {
        if ch == '/' && normalized.ends_with('/') {
            continue;
        }
        normalized.push(ch);
    }

    normalized
}

/// Turn a normalized path into the URL that is actually fetched.
///
/// Directory-style URLs are canonical on the server, so a path whose last
/// segment has no extension gets a trailing slash. Query strings and
/// fragments are kept after the inserted slash.
pub fn content_url(path: &str) -> String {
    let split_at = path.find(['?', '#']).unwrap_or(path.len());
    let (base, suffix) = path.split_at(split_at);

    if base.is_empty() || base == "/" || base.ends_with('/') {
        return path.to_owned();
    }

    let last_segment = base.rsplit('/').next().unwrap_or(base);
    if last_segment.contains('.') {
        return path.to_owned();
    }

    format!("{base}/{suffix}")
}

/// Returns true when `href` starts with an explicit URI scheme such as
/// `tel:` or `javascript:`.
pub fn has_scheme(href: &str) -> bool {
    let Some(colon) = href.find(':') else {
        return false;
    };

    let scheme = &href[..colon];
    let mut chars = scheme.chars();

    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Decide whether an anchor's `href` attribute should be loaded in place.
///
/// Fragment-only, `http*`, `mailto:` and other scheme links always go
/// through the browser.
pub fn is_internal_href(href: &str) -> bool {
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("http")
        || href.starts_with("mailto:")
        || has_scheme(href)
    {
        return false;
    }

    href.starts_with('/') || href.starts_with("./") || !href.contains("://")
}

/// Drop a single trailing `/`.
pub fn trim_trailing_slash(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

/// Whether a link `href` points at `current_path`, ignoring a trailing slash
/// on either side.
pub fn same_page(href: &str, current_path: &str) -> bool {
    trim_trailing_slash(href) == trim_trailing_slash(current_path)
}

//! Sanitizers for caller-supplied configuration strings.
//!
//! Everything here is allow-list based: characters or markup outside the
//! list are stripped, never escaped-and-kept. Escaping is reserved for
//! values that are data rather than structure (display names, attribute
//! values).

/// Attributes whose values are URLs and get scheme-checked.
const URL_ATTRS: &[&str] = &["href", "src", "xlink:href"];

/// URL schemes that never survive sanitization.
const BLOCKED_SCHEMES: &[&str] = &["javascript:", "data:", "vbscript:"];

/// Strip everything but ASCII letters from a tag name. An empty result
/// means "omit this wrapper", which the renderer honors instead of emitting
/// malformed angle brackets.
pub fn sanitize_tag_name(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_alphabetic()).collect()
}

/// Sanitize a whitespace-separated class list token-by-token, so a
/// multi-token class string is not treated as one invalid token.
pub fn sanitize_class_list(raw: &str) -> String {
    raw.split_whitespace()
        .map(sanitize_class_token)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn sanitize_class_token(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

/// Escape text for placement in HTML content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for placement inside a double-quoted attribute value.
pub fn escape_attr(text: &str) -> String {
    escape_html(text)
}

/// Reduce a markup fragment to allow-listed tags and attributes.
///
/// Disallowed tags lose their markup but keep their text content;
/// disallowed attributes are dropped from surviving tags. A `<` that never
/// closes is neutralized to `&lt;`.
pub fn sanitize_fragment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        let tail = &rest[lt + 1..];
        match tail.find('>') {
            Some(gt) => {
                if let Some(tag) = sanitize_tag(&tail[..gt]) {
                    out.push_str(&tag);
                }
                rest = &tail[gt + 1..];
            }
            None => {
                out.push_str("&lt;");
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Re-emit one tag (the text between `<` and `>`) if its name is
/// allow-listed, keeping only allowed attributes. Returns `None` to drop
/// the tag entirely.
fn sanitize_tag(inner: &str) -> Option<String> {
    let inner = inner.trim();
    let (closing, inner) = match inner.strip_prefix('/') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, inner),
    };
    let self_closing = inner.ends_with('/');
    let inner = inner.trim_end_matches('/').trim_end();

    let name_len = inner
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .count();
    if name_len == 0 {
        return None;
    }
    let name = inner[..name_len].to_ascii_lowercase();
    let allowed = allowed_attrs(&name)?;

    if closing {
        return Some(format!("</{}>", name));
    }

    let mut tag = format!("<{}", name);
    for (attr, value) in parse_attrs(&inner[name_len..]) {
        let attr = attr.to_ascii_lowercase();
        if !allowed.contains(&attr.as_str()) {
            continue;
        }
        match value {
            Some(v) => {
                if URL_ATTRS.contains(&attr.as_str()) && has_blocked_scheme(&v) {
                    continue;
                }
                tag.push_str(&format!(" {}=\"{}\"", attr, escape_attr(&v)));
            }
            None => {
                tag.push(' ');
                tag.push_str(&attr);
            }
        }
    }
    if self_closing {
        tag.push_str(" />");
    } else {
        tag.push('>');
    }
    Some(tag)
}

fn has_blocked_scheme(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    BLOCKED_SCHEMES.iter().any(|s| compact.starts_with(s))
}

/// Parse `name`, `name=value`, `name="value"`, and `name='value'` pairs out
/// of a tag body. Tolerant by design: junk between attributes is skipped.
fn parse_attrs(mut s: &str) -> Vec<(String, Option<String>)> {
    let mut attrs = Vec::new();
    loop {
        s = s.trim_start();
        if s.is_empty() {
            break;
        }
        let name_len = s
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
            .count();
        if name_len == 0 {
            let mut it = s.chars();
            it.next();
            s = it.as_str();
            continue;
        }
        let name = s[..name_len].to_string();
        s = &s[name_len..];
        let trimmed = s.trim_start();
        if let Some(rest) = trimmed.strip_prefix('=') {
            let rest = rest.trim_start();
            let (value, remainder) = if let Some(r) = rest.strip_prefix('"') {
                match r.find('"') {
                    Some(end) => (r[..end].to_string(), &r[end + 1..]),
                    None => (r.to_string(), ""),
                }
            } else if let Some(r) = rest.strip_prefix('\'') {
                match r.find('\'') {
                    Some(end) => (r[..end].to_string(), &r[end + 1..]),
                    None => (r.to_string(), ""),
                }
            } else {
                let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
                (rest[..end].to_string(), &rest[end..])
            };
            attrs.push((name, Some(value)));
            s = remainder;
        } else {
            attrs.push((name, None));
            s = trimmed;
        }
    }
    attrs
}

/// The fragment allow-list: tag name → permitted attributes. Headings,
/// inline text tags, common SVG primitives, image and anchor. No script or
/// style elements, no event attributes.
fn allowed_attrs(tag: &str) -> Option<&'static [&'static str]> {
    let attrs: &'static [&'static str] = match tag {
        "div" | "span" => &["class", "style", "title"],
        "a" => &["href", "class", "title", "target", "rel"],
        "i" => &["class", "style", "aria-hidden", "role"],
        "svg" => &[
            "class",
            "width",
            "height",
            "viewbox",
            "fill",
            "stroke",
            "stroke-width",
            "stroke-linecap",
            "stroke-linejoin",
            "xmlns",
            "preserveaspectratio",
        ],
        "path" => &["d", "fill", "stroke", "stroke-width", "stroke-linecap", "stroke-linejoin"],
        "circle" => &[
            "cx",
            "cy",
            "r",
            "fill",
            "stroke",
            "stroke-width",
            "stroke-linecap",
            "stroke-linejoin",
        ],
        "rect" => &[
            "x",
            "y",
            "width",
            "height",
            "rx",
            "ry",
            "fill",
            "stroke",
            "stroke-width",
            "stroke-linecap",
            "stroke-linejoin",
        ],
        "line" => &[
            "x1",
            "y1",
            "x2",
            "y2",
            "fill",
            "stroke",
            "stroke-width",
            "stroke-linecap",
            "stroke-linejoin",
        ],
        "polyline" | "polygon" => &[
            "points",
            "fill",
            "stroke",
            "stroke-width",
            "stroke-linecap",
            "stroke-linejoin",
        ],
        "ellipse" => &[
            "cx",
            "cy",
            "rx",
            "ry",
            "fill",
            "stroke",
            "stroke-width",
            "stroke-linecap",
            "stroke-linejoin",
        ],
        "g" => &["class", "fill", "stroke", "stroke-width", "transform"],
        "text" => &[
            "x",
            "y",
            "dx",
            "dy",
            "font-size",
            "font-family",
            "text-anchor",
            "fill",
            "stroke",
            "stroke-width",
        ],
        "image" => &["xlink:href", "x", "y", "width", "height", "preserveaspectratio"],
        "img" => &["src", "alt", "class", "style", "width", "height", "loading"],
        "strong" | "em" | "b" | "p" | "ul" | "li" | "hr" => &["class", "style"],
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => &["class", "style", "title"],
        "br" => &[],
        _ => return None,
    };
    Some(attrs)
}

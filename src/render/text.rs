// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Escaping and plain-text conversion for service-provided strings.

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Reduce a POI's HTML info blob to plain text.
///
/// Tags are dropped (with the contents of `script` and `style`), a handful
/// of common entities are decoded, and whitespace is collapsed. The result
/// is still raw text: escape it before putting it in a page.
pub fn info_to_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let lower = html.to_ascii_lowercase();
    let mut i = 0;

    while i < html.len() {
        let rest = &html[i..];
        if !rest.starts_with('<') {
            let next = rest.find('<').unwrap_or(rest.len());
            text.push_str(&rest[..next]);
            i += next;
            continue;
        }

        // A tag needs a name, `/` or `!` right after the `<`, and a closing `>`.
        let opens_tag = rest[1..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '/' || c == '!');
        let Some(end) = rest.find('>').filter(|_| opens_tag) else {
            text.push('<');
            i += 1;
            continue;
        };

        let tag = lower[i + 1..i + end].trim_start();
        let skip_until = ["script", "style"]
            .into_iter()
            .find(|name| tag.starts_with(name))
            .map(|name| format!("</{}", name));

        i += end + 1;
        text.push(' ');

        if let Some(closing) = skip_until {
            match lower[i..].find(&closing) {
                Some(pos) => {
                    let after = &html[i + pos..];
                    i += pos + after.find('>').map_or(after.len(), |p| p + 1);
                }
                None => break,
            }
        }
    }

    collapse_whitespace(&decode_entities(&text))
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        // Last, so "&amp;lt;" stays "&lt;".
        .replace("&amp;", "&")
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

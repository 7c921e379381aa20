use regex::{Captures, Regex};
use std::sync::LazyLock;

/// CSS hex escape as emitted in inline styles: a backslash, two hex digits and
/// a terminating space (`\3a `)
static RE_CSS_HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\([0-9a-fA-F]{2}) ").expect("valid regex"));

static RE_HTML_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]+);").expect("valid regex")
});

/// Decodes backslash escapes (`\\`, `\/`, `\"`, `\n`, `\xHH`, `\uXXXX`)
///
/// Surrogate pairs written as two `\u` escapes are combined. Unknown escapes
/// and lone surrogates are kept verbatim, backslash included.
///
/// # Example
///
/// ```
/// use fb_post_scraper::codec::decode_escapes;
///
/// assert_eq!(decode_escapes(r"\/page_content\/abc"), "/page_content/abc");
/// assert_eq!(decode_escapes(r"caf\u00e9"), "café");
/// ```
pub fn decode_escapes(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '\\' || i + 1 >= chars.len() {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        let escape = chars[i + 1];
        match escape {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '\\' | '/' | '"' | '\'' => out.push(escape),
            'x' => match hex_value(&chars, i + 2, 2).and_then(char::from_u32) {
                Some(c) => {
                    out.push(c);
                    i += 4;
                    continue;
                }
                None => out.push_str("\\x"),
            },
            'u' => {
                if let Some((c, consumed)) = unicode_escape(&chars, i) {
                    out.push(c);
                    i += consumed;
                    continue;
                }
                out.push_str("\\u");
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
        i += 2;
    }

    out
}

/// Decodes a CSS `url(...)` value taken from an inline style attribute
///
/// Inline styles escape URL punctuation as `\3a ` (hex pair plus space); these
/// are rewritten to `\x3a` and the whole string is then passed through
/// [`decode_escapes`].
pub fn decode_css_url(url: &str) -> String {
    let rewritten = RE_CSS_HEX.replace_all(url, r"\x${1}");
    decode_escapes(&rewritten)
}

/// Decodes the HTML character references that show up inside attribute values
///
/// Named references outside the common XML set are left as they are.
pub fn decode_html_entities(input: &str) -> String {
    RE_HTML_ENTITY
        .replace_all(input, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match entity {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some('\u{a0}'),
                    _ => None,
                }
            };
            decoded
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Reads `len` hex digits starting at `start`
fn hex_value(chars: &[char], start: usize, len: usize) -> Option<u32> {
    let digits = chars.get(start..start + len)?;
    let text: String = digits.iter().collect();
    if !text.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(&text, 16).ok()
}

/// Decodes a `\uXXXX` escape at `start`, pairing it with a following low
/// surrogate when needed. Returns the character and the number of input
/// chars consumed.
fn unicode_escape(chars: &[char], start: usize) -> Option<(char, usize)> {
    let high = hex_value(chars, start + 2, 4)?;

    if (0xD800..0xDC00).contains(&high) {
        let next = start + 6;
        if chars.get(next) == Some(&'\\') && chars.get(next + 1) == Some(&'u') {
            let low = hex_value(chars, next + 2, 4)?;
            if (0xDC00..0xE000).contains(&low) {
                let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                return char::from_u32(combined).map(|c| (c, 12));
            }
        }
        return None;
    }

    char::from_u32(high).map(|c| (c, 6))
}

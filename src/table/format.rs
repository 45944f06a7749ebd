//! Line-level reading and writing of locale table entries.
//!
//! Entries look like `  "key": "value",`. Both sides use JavaScript string escapes,
//! and the writers always emit JSON escapes so that every written line can be read
//! back without loss.

/// A `"key": "value"` entry as it appears on a line, still escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEntry<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

impl RawEntry<'_> {
    /// Returns the unescaped `(key, value)` pair.
    #[must_use]
    pub fn decode(&self) -> (String, String) {
        (unescape(self.key), unescape(self.value))
    }
}

/// Quotes and escapes a string the way `JSON.stringify` does.
#[must_use]
pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{text}\""))
}

/// Formats one table entry line (two-space indent, trailing comma).
#[must_use]
pub fn format_entry(key: &str, value: &str) -> String {
    format!("  {}: {},", quote(key), quote(value))
}

/// Reads a quoted string at the start of `input`.
///
/// Returns the raw (still escaped) content and the remainder after the closing quote.
/// Only `"` and `'` open a string; the closing quote must match the opening one.
fn scan_quoted(input: &str) -> Option<(&str, &str)> {
    let mut chars = input.char_indices();
    let (_, quote_char) = chars.next()?;
    if quote_char != '"' && quote_char != '\'' {
        return None;
    }

    let mut escaped = false;
    for (index, ch) in chars {
        if escaped {
            escaped = false;
            continue;
        }
        if ch == '\\' {
            escaped = true;
        } else if ch == quote_char {
            let content = input.get(1..index)?;
            let rest = input.get(index + ch.len_utf8()..)?;
            return Some((content, rest));
        }
    }

    None
}

/// Extracts the raw key of a `"key":` line, ignoring whatever follows the colon.
#[must_use]
pub fn parse_entry_key(line: &str) -> Option<&str> {
    let (key, rest) = scan_quoted(line.trim_start())?;
    rest.trim_start().starts_with(':').then_some(key)
}

/// Extracts a full `"key": "value"` entry from a line.
#[must_use]
pub fn parse_entry(line: &str) -> Option<RawEntry<'_>> {
    let (key, rest) = scan_quoted(line.trim_start())?;
    let rest = rest.trim_start().strip_prefix(':')?;
    let (value, _) = scan_quoted(rest.trim_start())?;
    Some(RawEntry { key, value })
}

/// Decodes JavaScript string escapes.
///
/// Unknown escapes keep the escaped character, malformed hex escapes are kept
/// verbatim, and unpaired surrogates become U+FFFD.
#[must_use]
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        let Some(next) = chars.next() else {
            out.push('\\');
            break;
        };

        match next {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            // line continuation
            '\n' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            'x' => {
                let hex: String = chars.clone().take(2).collect();
                match u32::from_str_radix(&hex, 16).ok().filter(|_| hex.len() == 2) {
                    Some(code) => {
                        chars.nth(1);
                        out.push(char::from_u32(code).unwrap_or('\u{fffd}'));
                    }
                    None => out.push('x'),
                }
            }
            'u' => match read_unicode_escape(&mut chars) {
                Some(code) => push_code_unit(&mut out, &mut chars, code),
                None => out.push('u'),
            },
            other => out.push(other),
        }
    }

    out
}

/// Reads the digits of a `\u` escape (`XXXX` or `{X...}`), consuming them on success.
fn read_unicode_escape(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<u32> {
    if chars.peek() == Some(&'{') {
        let digits: String = chars.clone().skip(1).take_while(|c| *c != '}').collect();
        let code = u32::from_str_radix(&digits, 16).ok()?;
        // '{' + digits + '}'
        for _ in 0..digits.chars().count() + 2 {
            chars.next();
        }
        return Some(code);
    }

    let digits: String = chars.clone().take(4).collect();
    if digits.len() != 4 {
        return None;
    }
    let code = u32::from_str_radix(&digits, 16).ok()?;
    for _ in 0..4 {
        chars.next();
    }
    Some(code)
}

/// Pushes a UTF-16 code unit (or full code point), pairing surrogates when possible.
fn push_code_unit(
    out: &mut String,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    code: u32,
) {
    if (0xD800..0xDC00).contains(&code) {
        let lookahead: String = chars.clone().take(6).collect();
        if let Some(low) = lookahead
            .strip_prefix("\\u")
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .filter(|low| (0xDC00..0xE000).contains(low))
        {
            for _ in 0..6 {
                chars.next();
            }
            let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
            out.push(char::from_u32(combined).unwrap_or('\u{fffd}'));
            return;
        }
    }
    out.push(char::from_u32(code).unwrap_or('\u{fffd}'));
}

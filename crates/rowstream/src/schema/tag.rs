//! Field annotation parsing.
//!
//! Annotations use the struct tag convention: a space separated list of
//! `key:"value"` pairs, where the value is a quoted string whose first
//! comma-separated element is a name and the rest are options.
//!
//! ```text
//! db:"user_id" json:"userId,omitempty"
//! ```
//!
//! Values accept the usual double-quoted string escapes: `\a \b \f \n \r \t
//! \v \\ \"`, `\xHH` and three-digit octal bytes, and `\uHHHH` /
//! `\UHHHHHHHH` code points.

use thiserror::Error;

/// Why an annotation could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    /// The annotation is not a sequence of `key:"value"` pairs.
    #[error("bad syntax for struct tag pair")]
    Syntax,
    /// A key is empty or contains invalid characters.
    #[error("bad syntax for struct tag key")]
    KeySyntax,
    /// A value is not a properly terminated quoted string.
    #[error("bad syntax for struct tag value")]
    ValueSyntax,
    /// The requested key is not present.
    #[error("tag does not exist")]
    NotExist,
}

/// One `key:"name,opt,..."` entry of an annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Tag key, e.g. `db`.
    pub key: String,
    /// First element of the value.
    pub name: String,
    /// Remaining comma separated elements of the value.
    pub options: Vec<String>,
}

impl Tag {
    /// Returns true if `option` follows the name in the tag value.
    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// Parsed annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    tags: Vec<Tag>,
}

impl Tags {
    /// Parse an annotation string.
    ///
    /// An empty (or blank) annotation parses to an empty set of tags.
    ///
    /// # Errors
    ///
    /// Returns a [`TagError`] describing the first syntax problem.
    pub fn parse(annotation: &str) -> Result<Self, TagError> {
        let mut tags = Vec::new();
        let mut rest = annotation;

        loop {
            rest = rest.trim_start_matches(' ');
            if rest.is_empty() {
                break;
            }

            let key_end = rest
                .find(|c: char| c <= ' ' || c == ':' || c == '"' || c == '\u{7f}')
                .unwrap_or(rest.len());
            if key_end == 0 {
                return Err(TagError::KeySyntax);
            }
            let key = &rest[..key_end];
            rest = &rest[key_end..];

            rest = rest.strip_prefix(':').ok_or(TagError::Syntax)?;
            if !rest.starts_with('"') {
                return Err(TagError::ValueSyntax);
            }

            let (value, after) = split_quoted(rest)?;
            rest = after;

            let mut parts = value.split(',');
            let name = parts.next().unwrap_or_default().to_owned();
            let options = parts.map(str::to_owned).collect();
            tags.push(Tag {
                key: key.to_owned(),
                name,
                options,
            });
        }

        Ok(Self { tags })
    }

    /// Look up a tag by key.
    ///
    /// If a key appears more than once the first occurrence is returned.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::NotExist`] when the key is absent.
    pub fn get(&self, key: &str) -> Result<&Tag, TagError> {
        self.tags
            .iter()
            .find(|t| t.key == key)
            .ok_or(TagError::NotExist)
    }

    /// Keys in annotation order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|t| t.key.as_str())
    }

    /// Number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns true if the annotation had no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Split a leading double-quoted string off `input`, unescaping it.
///
/// `input` must start with `"`. Returns the unescaped contents and the text
/// after the closing quote.
fn split_quoted(input: &str) -> Result<(String, &str), TagError> {
    let mut value = Vec::with_capacity(input.len());
    let mut chars = input.char_indices().skip(1);

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => {
                let value = String::from_utf8(value).map_err(|_| TagError::ValueSyntax)?;
                return Ok((value, &input[i + 1..]));
            }
            '\\' => unescape(&mut chars, &mut value)?,
            '\n' => return Err(TagError::ValueSyntax),
            _ => {
                let mut utf8 = [0; 4];
                value.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
            }
        }
    }

    Err(TagError::ValueSyntax)
}

/// Decode one escape sequence (the backslash already consumed) into `out`.
///
/// `\x` and octal escapes produce a single byte; `\u` and `\U` produce a
/// UTF-8 encoded code point.
fn unescape(
    chars: &mut impl Iterator<Item = (usize, char)>,
    out: &mut Vec<u8>,
) -> Result<(), TagError> {
    let (_, escaped) = chars.next().ok_or(TagError::ValueSyntax)?;
    let byte = match escaped {
        'a' => 0x07,
        'b' => 0x08,
        'f' => 0x0c,
        'n' => b'\n',
        'r' => b'\r',
        't' => b'\t',
        'v' => 0x0b,
        '\\' => b'\\',
        '"' => b'"',
        'x' => {
            let v = digits(chars, 2, 16)?;
            u8::try_from(v).map_err(|_| TagError::ValueSyntax)?
        }
        '0'..='7' => {
            let rest = digits(chars, 2, 8)?;
            let v = escaped.to_digit(8).ok_or(TagError::ValueSyntax)? * 64 + rest;
            u8::try_from(v).map_err(|_| TagError::ValueSyntax)?
        }
        'u' | 'U' => {
            let width = if escaped == 'u' { 4 } else { 8 };
            let c = char::from_u32(digits(chars, width, 16)?).ok_or(TagError::ValueSyntax)?;
            let mut utf8 = [0; 4];
            out.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
            return Ok(());
        }
        _ => return Err(TagError::ValueSyntax),
    };
    out.push(byte);
    Ok(())
}

/// Read exactly `count` digits in `radix`.
fn digits(
    chars: &mut impl Iterator<Item = (usize, char)>,
    count: usize,
    radix: u32,
) -> Result<u32, TagError> {
    let mut v: u32 = 0;
    for _ in 0..count {
        let (_, c) = chars.next().ok_or(TagError::ValueSyntax)?;
        let d = c.to_digit(radix).ok_or(TagError::ValueSyntax)?;
        v = v * radix + d;
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_multiple_keys() {
        let tags = Tags::parse(r#"db:"user_id" json:"userId,omitempty""#).unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags.keys().collect::<Vec<_>>(), ["db", "json"]);

        let db = tags.get("db").unwrap();
        assert_eq!(db.name, "user_id");
        assert!(db.options.is_empty());

        let json = tags.get("json").unwrap();
        assert_eq!(json.name, "userId");
        assert!(json.has_option("omitempty"));
    }

    #[test]
    fn test_parse_empty() {
        assert!(Tags::parse("").unwrap().is_empty());
        assert!(Tags::parse("   ").unwrap().is_empty());
    }

    #[test]
    fn test_escaped_value() {
        let tags = Tags::parse(r#"db:"a\"b""#).unwrap();
        assert_eq!(tags.get("db").unwrap().name, "a\"b");
    }

    #[test]
    fn test_numeric_escapes() {
        let name = |annotation: &str| {
            let tags = Tags::parse(annotation).unwrap();
            tags.get("db").unwrap().name.clone()
        };
        assert_eq!(name(r#"db:"a\x41""#), "aA");
        assert_eq!(name(r#"db:"\101b""#), "Ab");
        assert_eq!(name(r#"db:"caf\u00e9""#), "caf\u{e9}");
        assert_eq!(name(r#"db:"\U0001F600""#), "\u{1F600}");
        assert_eq!(name(r#"db:"\xc3\xa9""#), "\u{e9}");
        assert_eq!(name(r#"db:"t\tb""#), "t\tb");
    }

    #[test]
    fn test_bad_numeric_escapes() {
        assert_eq!(Tags::parse(r#"db:"\x4""#), Err(TagError::ValueSyntax));
        assert_eq!(Tags::parse(r#"db:"\xzz""#), Err(TagError::ValueSyntax));
        assert_eq!(Tags::parse(r#"db:"\400""#), Err(TagError::ValueSyntax));
        assert_eq!(Tags::parse(r#"db:"\ud800""#), Err(TagError::ValueSyntax));
        // Byte escapes must still form valid UTF-8.
        assert_eq!(Tags::parse(r#"db:"\xff""#), Err(TagError::ValueSyntax));
    }

    #[test]
    fn test_missing_key() {
        let tags = Tags::parse(r#"json:"a""#).unwrap();
        assert_eq!(tags.get("db"), Err(TagError::NotExist));
    }

    #[test]
    fn test_syntax_errors() {
        assert_eq!(Tags::parse(r#":"a""#), Err(TagError::KeySyntax));
        assert_eq!(Tags::parse("db"), Err(TagError::Syntax));
        assert_eq!(Tags::parse("db:a"), Err(TagError::ValueSyntax));
        assert_eq!(Tags::parse(r#"db:"a"#), Err(TagError::ValueSyntax));
        assert_eq!(Tags::parse(r#"db:"a\q""#), Err(TagError::ValueSyntax));
        assert_eq!(Tags::parse(r#"db:"a\'""#), Err(TagError::ValueSyntax));
    }

    #[test]
    fn test_first_duplicate_key_wins() {
        let tags = Tags::parse(r#"db:"first" db:"second""#).unwrap();
        assert_eq!(tags.get("db").unwrap().name, "first");
    }
}

//! Front-matter parsing
//!
//! A lightweight line-based reader for the `---` delimited block at the top
//! of a markdown document. It deliberately does not use a YAML parser: every
//! line is `key: value`, values are scalars or a bracketed list, and anything
//! it does not understand is skipped instead of failing the document.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref INTEGER: Regex = Regex::new(r"^-?\d+$").unwrap();
}

/// A single parsed front-matter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrontMatterValue {
    String(String),
    Number(i64),
    List(Vec<String>),
}

impl FrontMatterValue {
    /// Scalar value as text. Lists have no scalar form.
    pub fn as_text(&self) -> Option<String> {
        match self {
            FrontMatterValue::String(s) => Some(s.clone()),
            FrontMatterValue::Number(n) => Some(n.to_string()),
            FrontMatterValue::List(_) => None,
        }
    }

    /// Value as a positive or negative integer, accepting numeric strings.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FrontMatterValue::Number(n) => Some(*n),
            FrontMatterValue::String(s) => s.trim().parse().ok(),
            FrontMatterValue::List(_) => None,
        }
    }
}

/// Which flavour of front-matter a document uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Hand-written content: one layer of matching quotes stripped, lists
    /// parsed, everything else kept as text.
    #[default]
    Content,
    /// Files written by the sync job: double-quoted values are unescaped and
    /// bare integers become numbers.
    Managed,
}

/// Front-matter fields in document order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrontMatter {
    fields: IndexMap<String, FrontMatterValue>,
}

impl FrontMatter {
    /// Parse content front-matter. Returns (front_matter, body).
    ///
    /// Never fails: a document without a complete `---` block yields empty
    /// front-matter and the whole input as body.
    pub fn parse(content: &str) -> (Self, &str) {
        Self::parse_with(content, Dialect::Content)
    }

    /// Parse front-matter using the given dialect
    pub fn parse_with(content: &str, dialect: Dialect) -> (Self, &str) {
        let Some((block, body)) = split_block(content) else {
            return (FrontMatter::default(), content);
        };

        let mut fields = IndexMap::new();
        for line in block.lines() {
            let Some(colon) = line.find(':') else {
                continue;
            };
            if colon == 0 {
                continue;
            }
            let key = line[..colon].trim();
            if key.is_empty() {
                continue;
            }
            let value = parse_value(line[colon + 1..].trim(), dialect);
            fields.insert(key.to_string(), value);
        }

        (FrontMatter { fields }, body)
    }

    pub fn get(&self, key: &str) -> Option<&FrontMatterValue> {
        self.fields.get(key)
    }

    /// Non-empty scalar value for `key`
    pub fn get_text(&self, key: &str) -> Option<String> {
        self.get(key)
            .and_then(FrontMatterValue::as_text)
            .filter(|s| !s.is_empty())
    }

    /// First non-empty scalar among `keys`
    pub fn first_text(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.get_text(key))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Locate the block between an opening `---` line and the next `---` line.
/// Returns (block, body) with leading blank lines removed from the body.
fn split_block(content: &str) -> Option<(&str, &str)> {
    let mut lines = content.split_inclusive('\n');
    let first = lines.next()?;
    if !first.ends_with('\n') || first.trim_end() != "---" {
        return None;
    }

    let block_start = first.len();
    let mut offset = block_start;
    for line in lines {
        if line.trim_end() == "---" {
            let block = &content[block_start..offset];
            let body = &content[offset + line.len()..];
            return Some((block, body.trim_start_matches(['\n', '\r'])));
        }
        offset += line.len();
    }

    None
}

fn parse_value(raw: &str, dialect: Dialect) -> FrontMatterValue {
    match dialect {
        Dialect::Content => {
            let value = strip_matching_quotes(raw);
            match parse_list(value, dialect) {
                Some(items) => FrontMatterValue::List(items),
                None => FrontMatterValue::String(value.to_string()),
            }
        }
        Dialect::Managed => {
            if let Some(inner) = quoted_inner(raw, '"') {
                return FrontMatterValue::String(unescape(inner));
            }
            if INTEGER.is_match(raw) {
                if let Ok(n) = raw.parse() {
                    return FrontMatterValue::Number(n);
                }
            }
            match parse_list(raw, dialect) {
                Some(items) => FrontMatterValue::List(items),
                None => FrontMatterValue::String(strip_matching_quotes(raw).to_string()),
            }
        }
    }
}

/// `[a, "b", 'c']` -> `["a", "b", "c"]`; commas inside quotes are kept.
fn parse_list(value: &str, dialect: Dialect) -> Option<Vec<String>> {
    let inner = value.strip_prefix('[')?.strip_suffix(']')?;

    let mut items = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in inner.chars() {
        if escaped {
            current.push(c);
            escaped = false;
            continue;
        }
        match (c, quote) {
            ('\\', Some('"')) if dialect == Dialect::Managed => {
                current.push(c);
                escaped = true;
            }
            ('"' | '\'', None) => {
                quote = Some(c);
                current.push(c);
            }
            (c, Some(q)) if c == q => {
                quote = None;
                current.push(c);
            }
            (',', None) => items.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    items.push(current);

    Some(
        items
            .iter()
            .map(|item| unquote_item(item.trim(), dialect))
            .filter(|item| !item.is_empty())
            .collect(),
    )
}

fn unquote_item(item: &str, dialect: Dialect) -> String {
    if dialect == Dialect::Managed {
        if let Some(inner) = quoted_inner(item, '"') {
            return unescape(inner);
        }
    }
    strip_matching_quotes(item).trim().to_string()
}

fn quoted_inner(value: &str, quote: char) -> Option<&str> {
    if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
        Some(&value[1..value.len() - 1])
    } else {
        None
    }
}

fn strip_matching_quotes(value: &str) -> &str {
    quoted_inner(value, '"')
        .or_else(|| quoted_inner(value, '\''))
        .unwrap_or(value)
}

/// Undo the escaping applied when a managed file is rendered: `\"` -> `"`
/// and `\\` -> `\`. Other backslashes are left alone.
fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if next == '"' || next == '\\' {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

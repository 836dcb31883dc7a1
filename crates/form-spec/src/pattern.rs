use std::fmt;

use regex::{Regex, RegexBuilder};
use thiserror::Error;

const DELIMITERS: [char; 3] = ['/', '#', '~'];

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("{0}")]
    Syntax(#[from] regex::Error),
    #[error("unsupported pattern flag '{0}'")]
    UnknownFlag(char),
}

/// Whole-string pattern attached to a regex field.
///
/// The literal may be a bare expression (`^[a-z]+$`) or use the delimited
/// form with trailing flags (`/^[a-z]+$/i`). Matching is always anchored at
/// both ends.
#[derive(Clone)]
pub struct FieldPattern {
    literal: String,
    body: String,
    flags: String,
    regex: Regex,
}

impl FieldPattern {
    pub fn parse(literal: &str) -> Result<Self, PatternError> {
        let (body, flags) = split_delimited(literal).unwrap_or((literal, ""));
        let mut builder = RegexBuilder::new(&format!(r"\A(?:{})\z", body));
        for flag in flags.chars() {
            match flag {
                'i' => builder.case_insensitive(true),
                'm' => builder.multi_line(true),
                's' => builder.dot_matches_new_line(true),
                'x' => builder.ignore_whitespace(true),
                'u' => builder.unicode(true),
                other => return Err(PatternError::UnknownFlag(other)),
            };
        }
        Ok(Self {
            literal: literal.to_string(),
            body: body.to_string(),
            flags: flags.to_string(),
            regex: builder.build()?,
        })
    }

    pub fn is_full_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// The literal as written in the form definition.
    pub fn as_str(&self) -> &str {
        &self.literal
    }

    /// The expression without delimiters or flags.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn flags(&self) -> &str {
        &self.flags
    }
}

impl fmt::Debug for FieldPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldPattern").field(&self.literal).finish()
    }
}

impl PartialEq for FieldPattern {
    fn eq(&self, other: &Self) -> bool {
        self.literal == other.literal
    }
}

fn split_delimited(literal: &str) -> Option<(&str, &str)> {
    let delimiter = literal.chars().next().filter(|ch| DELIMITERS.contains(ch))?;
    let rest = &literal[delimiter.len_utf8()..];
    let close = rest.rfind(delimiter)?;
    let flags = &rest[close + delimiter.len_utf8()..];
    if flags.chars().all(|ch| ch.is_ascii_alphabetic()) {
        Some((&rest[..close], flags))
    } else {
        None
    }
}

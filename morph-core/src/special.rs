//! Replacement of special characters with readable words.

/// Options for [`replace_special_characters`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaceOptions {
    /// Characters that are kept verbatim even though they have a word.
    pub exclude: Vec<char>,
    /// Text placed between a replaced word and its neighbours.
    pub separator: String,
}

impl ReplaceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exclude(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.exclude.extend(chars);
        self
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

/// The word a special character is replaced with, if it has one.
pub fn special_character_word(c: char) -> Option<&'static str> {
    let word = match c {
        ' ' => "space",
        '!' => "exclamation",
        '"' => "quotation",
        '#' => "hash",
        '$' => "dollar",
        '%' => "percent",
        '&' => "ampersand",
        '\'' => "apostrophe",
        '(' => "roundleft",
        ')' => "roundright",
        '*' => "asterisk",
        '+' => "plus",
        ',' => "comma",
        '-' => "minus",
        '.' => "dot",
        '/' => "slash",
        ':' => "colon",
        ';' => "semicolon",
        '<' => "less",
        '=' => "equal",
        '>' => "greater",
        '?' => "question",
        '@' => "at",
        '[' => "squareleft",
        '\\' => "backslash",
        ']' => "squareright",
        '^' => "circumflex",
        '_' => "underscore",
        '`' => "graveaccent",
        '{' => "curlyleft",
        '|' => "vertical",
        '}' => "curlyright",
        '~' => "tilde",
        _ => return None,
    };
    Some(word)
}

/// Replace every special character in `value` with its word.
///
/// Runs of ordinary characters are kept intact. Each replaced word is joined
/// to its neighbours with `options.separator`.
///
/// ```
/// use morphgen_core::{ReplaceOptions, replace_special_characters};
///
/// let options = ReplaceOptions::new().separator("_");
/// assert_eq!(replace_special_characters("a.b", &options), "a_dot_b");
/// ```
pub fn replace_special_characters(value: &str, options: &ReplaceOptions) -> String {
    let mut segments: Vec<String> = Vec::new();
    let mut run = String::new();

    for c in value.chars() {
        match special_character_word(c) {
            Some(word) if !options.exclude.contains(&c) => {
                if !run.is_empty() {
                    segments.push(std::mem::take(&mut run));
                }
                segments.push(word.to_string());
            }
            _ => run.push(c),
        }
    }
    if !run.is_empty() {
        segments.push(run);
    }

    segments.join(&options.separator)
}

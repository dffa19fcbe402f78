//! Indentation-aware text buffer shared by every renderer.

use super::Indentation;

/// Accumulates generated source one line at a time.
///
/// Renderers that loop over properties use the `push_*` methods, which
/// borrow the builder. Short fixed snippets read better with the chaining
/// methods, which take it by value.
///
/// ```
/// use morphgen_codegen::builder::{CodeBuilder, Indentation};
///
/// let code = CodeBuilder::new(Indentation::RUST)
///     .line("pub struct Address {")
///     .indent()
///     .line("pub city: String,")
///     .dedent()
///     .line("}")
///     .build();
///
/// assert_eq!(code, "pub struct Address {\n    pub city: String,\n}\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    level: usize,
    indentation: Indentation,
    out: String,
}

impl CodeBuilder {
    pub fn new(indentation: Indentation) -> Self {
        Self {
            level: 0,
            indentation,
            out: String::new(),
        }
    }

    /// Write `s` at the current level, followed by a newline.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.pad();
        self.out.push_str(s);
        self.out.push('\n');
        self
    }

    /// Write each line of `s` at the current level. Blank lines stay blank.
    pub fn push_lines(&mut self, s: &str) -> &mut Self {
        for line in s.lines() {
            if line.trim().is_empty() {
                self.push_blank();
            } else {
                self.push_line(line);
            }
        }
        self
    }

    pub fn push_blank(&mut self) -> &mut Self {
        self.out.push('\n');
        self
    }

    /// Append `s` verbatim.
    pub fn push_raw(&mut self, s: &str) -> &mut Self {
        self.out.push_str(s);
        self
    }

    pub fn push_indent(&mut self) -> &mut Self {
        self.level += 1;
        self
    }

    pub fn push_dedent(&mut self) -> &mut Self {
        self.level = self.level.saturating_sub(1);
        self
    }

    /// Write `text` as a comment, one `prefix` per line. Empty lines get the
    /// bare prefix.
    pub fn push_doc(&mut self, prefix: &str, text: &str) -> &mut Self {
        for line in text.lines() {
            self.pad();
            self.out.push_str(prefix);
            if !line.is_empty() {
                self.out.push(' ');
                self.out.push_str(line);
            }
            self.out.push('\n');
        }
        self
    }

    pub fn line(mut self, s: &str) -> Self {
        self.push_line(s);
        self
    }

    pub fn lines(mut self, s: &str) -> Self {
        self.push_lines(s);
        self
    }

    pub fn indent(mut self) -> Self {
        self.push_indent();
        self
    }

    pub fn dedent(mut self) -> Self {
        self.push_dedent();
        self
    }

    /// Fold `items` into the builder with `f`.
    pub fn each<T, I, F>(self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        items.into_iter().fold(self, f)
    }

    /// The generated text, ending in a newline if any line was written.
    pub fn build(self) -> String {
        self.out
    }

    /// The generated text without trailing newlines.
    pub fn build_trimmed(self) -> String {
        let mut code = self.out;
        let len = code.trim_end_matches('\n').len();
        code.truncate(len);
        code
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    fn pad(&mut self) {
        let unit = self.indentation.unit();
        for _ in 0..self.level {
            self.out.push_str(&unit);
        }
    }
}

//! Indentation configuration for generated code.

use serde::Deserialize;

/// Character used for one unit of indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndentationStyle {
    #[default]
    Spaces,
    Tabs,
}

/// Indentation of generated code: `size` characters of `style` per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Indentation {
    pub style: IndentationStyle,
    pub size: usize,
}

impl Indentation {
    /// 4-space indentation (Rust).
    pub const RUST: Self = Self::spaces(4);

    /// 2-space indentation (TypeScript).
    pub const TYPESCRIPT: Self = Self::spaces(2);

    pub const fn spaces(size: usize) -> Self {
        Self {
            style: IndentationStyle::Spaces,
            size,
        }
    }

    pub const fn tabs(size: usize) -> Self {
        Self {
            style: IndentationStyle::Tabs,
            size,
        }
    }

    /// The string for one indentation level.
    pub fn unit(&self) -> String {
        let c = match self.style {
            IndentationStyle::Spaces => " ",
            IndentationStyle::Tabs => "\t",
        };
        c.repeat(self.size)
    }

    /// Prefix every non-blank line of `content` with `levels` indentation
    /// levels. Blank lines are kept as they are.
    pub fn apply(&self, content: &str, levels: usize) -> String {
        let prefix = self.unit().repeat(levels);
        if prefix.is_empty() {
            return content.to_string();
        }
        content
            .split('\n')
            .map(|line| {
                if line.trim().is_empty() {
                    line.to_string()
                } else {
                    format!("{prefix}{line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Indentation {
    fn default() -> Self {
        Self::TYPESCRIPT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit() {
        assert_eq!(Indentation::spaces(2).unit(), "  ");
        assert_eq!(Indentation::RUST.unit(), "    ");
        assert_eq!(Indentation::tabs(1).unit(), "\t");
    }

    #[test]
    fn test_apply_skips_blank_lines() {
        let indented = Indentation::spaces(2).apply("a\n\n  \nb", 1);
        assert_eq!(indented, "  a\n\n  \n  b");
    }

    #[test]
    fn test_apply_multiple_levels() {
        assert_eq!(Indentation::tabs(1).apply("x", 2), "\t\tx");
        assert_eq!(Indentation::spaces(0).apply("x", 3), "x");
    }

    #[test]
    fn test_deserialize() {
        let parsed: Indentation = toml::from_str("style = \"tabs\"\nsize = 1").unwrap();
        assert_eq!(parsed, Indentation::tabs(1));

        let defaulted: Indentation = toml::from_str("size = 4").unwrap();
        assert_eq!(defaulted, Indentation::RUST);
    }
}

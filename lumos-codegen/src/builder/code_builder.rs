//! Code builder utility for generating properly indented code.

use super::Indent;

/// Mutable API for building code with proper indentation.
///
/// # Example
///
/// ```
/// use lumos_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::php();
/// builder
///     .push_line("class Cache")
///     .push_line("{")
///     .push_indent()
///     .push_line("public static function get(string $key): mixed")
///     .push_dedent()
///     .push_line("}");
/// let code = builder.build();
///
/// assert!(code.starts_with("class Cache\n{\n    public static"));
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with 4-space indentation (PHP default).
    pub fn php() -> Self {
        Self::new(Indent::PHP)
    }

    /// Add a line of code with current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Add raw text without indentation or newline.
    pub fn push_raw(&mut self, s: &str) -> &mut Self {
        self.buffer.push_str(s);
        self
    }

    /// Increase indentation level.
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a PHP docblock (`/** ... */`) from the given lines.
    ///
    /// Empty lines become bare ` *` separators.
    pub fn push_doc(&mut self, lines: &[String]) -> &mut Self {
        self.write_indent();
        self.buffer.push_str("/**\n");
        for line in lines {
            self.write_indent();
            if line.is_empty() {
                self.buffer.push_str(" *\n");
            } else {
                self.buffer.push_str(" * ");
                self.buffer.push_str(line);
                self.buffer.push('\n');
            }
        }
        self.write_indent();
        self.buffer.push_str(" */\n");
        self
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

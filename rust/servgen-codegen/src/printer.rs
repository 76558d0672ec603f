//! Indentation-aware printer used by every emission stage.
//!
//! A `Printer` is bound to a destination writer for a lexical scope. Text is
//! assembled one physical line at a time: when a line is complete it is
//! written to the destination prefixed with the indentation that was active
//! when the line's first non-blank character arrived. Blank lines are never
//! indented. A trailing unterminated line is flushed when the printer is
//! dropped, so leaving a scope early with `?` never loses output and never
//! writes it twice.
//!
//! # Basic Example
//!
//! ```
//! use servgen_codegen::printer::Printer;
//! use servgen_codegen::pr_writeln;
//!
//! let mut output = String::new();
//! {
//!     let mut p = Printer::with_indent_spaces(&mut output, 2);
//!
//!     p.writeln("class Example {").unwrap();
//!     {
//!         let _indent = p.indent();
//!         pr_writeln!(p, "int value = {};", 42).unwrap();
//!     }
//!     p.write("};").unwrap();
//! }
//! assert_eq!(output, "class Example {\n  int value = 42;\n};");
//! ```
//!
//! # Templates
//!
//! ```
//! use servgen_codegen::printer::Printer;
//! use servgen_codegen::template::{Template, Vars};
//!
//! let mut output = String::new();
//! {
//!     let mut p = Printer::with_indent_spaces(&mut output, 2);
//!     let _indent = p.indent();
//!     let t = Template::parse("return $name$;\n").unwrap();
//!     p.print(&t, &Vars::new().with("name", "x")).unwrap();
//! }
//! assert_eq!(output, "  return x;\n");
//! ```
//!
//! Nested emitters that are handed the same printer share its depth: an
//! indent taken by a caller stays in effect for everything the callee prints.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::GenerateError;
use crate::template::{Template, Vars};

/// A printer that tracks indentation and buffers the current line.
pub struct Printer<W: fmt::Write> {
    writer: W,
    indent_level: Rc<Cell<usize>>,
    indent_string: String,
    line: String,
    // Depth captured at the line's first non-blank character.
    line_indent: Option<usize>,
}

impl<W: fmt::Write> Printer<W> {
    /// Create a new Printer with the given writer and indent string (e.g., "  " or "\t")
    pub fn new(writer: W, indent_string: String) -> Self {
        Self {
            writer,
            indent_level: Rc::new(Cell::new(0)),
            indent_string,
            line: String::new(),
            line_indent: None,
        }
    }

    /// Create a new Printer indenting by `spaces` spaces per level.
    pub fn with_indent_spaces(writer: W, spaces: usize) -> Self {
        Self::new(writer, " ".repeat(spaces))
    }

    /// Write text. Every newline in `text` completes a physical line.
    pub fn write(&mut self, text: &str) -> fmt::Result {
        let mut rest = text;
        while let Some(pos) = rest.find('\n') {
            self.push_partial(&rest[..pos]);
            self.flush_line()?;
            self.writer.write_char('\n')?;
            rest = &rest[pos + 1..];
        }
        self.push_partial(rest);
        Ok(())
    }

    /// Write text followed by a newline.
    pub fn writeln(&mut self, text: &str) -> fmt::Result {
        self.write(text)?;
        self.write("\n")
    }

    /// Write an empty line
    pub fn blank_line(&mut self) -> fmt::Result {
        self.write("\n")
    }

    /// Render `template` against `vars` and write the result.
    ///
    /// The template is fully resolved before anything is written, so an
    /// unknown variable leaves the output untouched.
    pub fn print(&mut self, template: &Template, vars: &Vars) -> Result<(), GenerateError> {
        let rendered = template.render(vars)?;
        self.write(&rendered)?;
        Ok(())
    }

    /// Create an indentation guard. Indentation increases while the guard is alive.
    ///
    /// Guards must be dropped in reverse order of creation for the depth to
    /// read as intended; scoping each guard to a block does that.
    pub fn indent(&mut self) -> IndentGuard {
        self.indent_level.set(self.indent_level.get() + 1);
        IndentGuard {
            indent_level: Rc::clone(&self.indent_level),
        }
    }

    /// Write a complete block with a closure for the body: `header {`, the
    /// indented body, then `}`.
    pub fn block<F, E>(&mut self, header: &str, body: F) -> Result<(), E>
    where
        F: FnOnce(&mut Self) -> Result<(), E>,
        E: From<fmt::Error>,
    {
        self.writeln(&format!("{} {{", header))?;
        {
            let _indent = self.indent();
            body(self)?;
        }
        self.writeln("}")?;
        Ok(())
    }

    /// Get the current indentation level
    pub fn indent_level(&self) -> usize {
        self.indent_level.get()
    }

    /// Write out the pending unterminated line, if any. Called on drop.
    pub fn finish(mut self) -> fmt::Result {
        self.flush_line()
    }

    /// Write formatted text (like write! macro)
    ///
    /// Use the `pr_write!` and `pr_writeln!` macros instead of calling this directly.
    #[doc(hidden)]
    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        let formatted = format!("{}", args);
        self.write(&formatted)
    }

    /// Write formatted text with newline (like writeln! macro)
    ///
    /// Use the `pr_write!` and `pr_writeln!` macros instead of calling this directly.
    #[doc(hidden)]
    pub fn writeln_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        let formatted = format!("{}", args);
        self.writeln(&formatted)
    }

    fn push_partial(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.line_indent.is_none() && !text.trim().is_empty() {
            self.line_indent = Some(self.indent_level.get());
        }
        self.line.push_str(text);
    }

    fn flush_line(&mut self) -> fmt::Result {
        if let Some(depth) = self.line_indent.take() {
            for _ in 0..depth {
                self.writer.write_str(&self.indent_string)?;
            }
        }
        self.writer.write_str(&self.line)?;
        self.line.clear();
        Ok(())
    }
}

impl<W: fmt::Write> Drop for Printer<W> {
    fn drop(&mut self) {
        // Errors here have nowhere to go; `finish` reports them.
        let _ = self.flush_line();
    }
}

/// RAII guard that maintains indentation level
///
/// Uses `Rc<Cell<usize>>` to independently manage indent level without any borrows.
pub struct IndentGuard {
    indent_level: Rc<Cell<usize>>,
}

impl Drop for IndentGuard {
    fn drop(&mut self) {
        let current = self.indent_level.get();
        self.indent_level.set(current.saturating_sub(1));
    }
}

/// Write formatted text to a Printer (like std::write!)
///
/// # Example
/// ```ignore
/// pr_write!(p, "return {};", 42)?;
/// ```
#[macro_export]
macro_rules! pr_write {
    ($printer:expr, $($arg:tt)*) => {
        $printer.write_fmt(format_args!($($arg)*))
    };
}

/// Write formatted text with newline to a Printer (like std::writeln!)
///
/// # Example
/// ```ignore
/// pr_writeln!(p, "return {};", 42)?;
/// ```
#[macro_export]
macro_rules! pr_writeln {
    ($printer:expr, $($arg:tt)*) => {
        $printer.writeln_fmt(format_args!($($arg)*))
    };
}

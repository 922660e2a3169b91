//! Indented block writer.
//!
//! Open blocks are kept on an explicit stack so that every closing line is
//! written in reverse order of opening, whatever order the caller emits
//! content in.

use std::io::{self, Write};

use crate::error::{GenerateError, Result};

/// Indentation unit.
const INDENT: &str = "\t";

#[derive(Debug)]
struct Scope {
    /// Line written when the scope closes. `None` for scopes that only
    /// affect indentation.
    close: Option<String>,
    /// Whether the scope indents its body.
    indented: bool,
}

/// Writes lines at the indentation implied by the open scopes.
#[derive(Debug)]
pub struct BlockWriter<W: Write> {
    out: W,
    depth: usize,
    scopes: Vec<Scope>,
}

impl<W: Write> BlockWriter<W> {
    /// Creates a writer with no open scopes.
    pub const fn new(out: W) -> Self {
        Self {
            out,
            depth: 0,
            scopes: Vec::new(),
        }
    }

    /// Returns the current indentation level.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the number of open scopes.
    #[must_use]
    pub fn open_scopes(&self) -> usize {
        self.scopes.len()
    }

    /// Writes a line at the current depth.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        self.line_at(0, text)
    }

    /// Writes a line `extra` levels deeper than the current depth.
    pub fn line_at(&mut self, extra: usize, text: &str) -> io::Result<()> {
        let indent = INDENT.repeat(self.depth + extra);
        writeln!(self.out, "{indent}{text}")
    }

    /// Writes an empty line. Empty lines carry no indentation.
    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    /// Writes `header` and opens a scope that is closed by `close`.
    pub fn open(
        &mut self,
        header: &str,
        close: impl Into<String>,
        indented: bool,
    ) -> io::Result<()> {
        self.line(header)?;
        self.enter(Some(close.into()), indented);
        Ok(())
    }

    /// Opens a scope without writing a header line.
    pub fn enter(&mut self, close: Option<String>, indented: bool) {
        if indented {
            self.depth += 1;
        }
        self.scopes.push(Scope { close, indented });
    }

    /// Closes the innermost scope. Does nothing if none is open.
    pub fn close(&mut self) -> io::Result<()> {
        let Some(scope) = self.scopes.pop() else {
            return Ok(());
        };
        if scope.indented {
            self.depth -= 1;
        }
        match scope.close {
            Some(close) => self.line(&close),
            None => Ok(()),
        }
    }

    /// Closes every open scope, innermost first.
    pub fn close_all(&mut self) -> io::Result<()> {
        while !self.scopes.is_empty() {
            self.close()?;
        }
        Ok(())
    }

    /// Flushes and returns the sink.
    ///
    /// # Errors
    ///
    /// Fails with [`GenerateError::UnclosedScopes`] if any scope is still
    /// open.
    pub fn finish(mut self) -> Result<W> {
        if !self.scopes.is_empty() {
            return Err(GenerateError::UnclosedScopes(self.scopes.len()));
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(w: BlockWriter<Vec<u8>>) -> String {
        String::from_utf8(w.finish().unwrap()).unwrap()
    }

    #[test]
    fn test_nested_scopes_close_in_reverse() {
        let mut w = BlockWriter::new(Vec::new());
        w.open("a {", "} // a", false).unwrap();
        w.open("b {", "} // b", true).unwrap();
        w.open("c {", "} // c", true).unwrap();
        w.line("x;").unwrap();
        w.close_all().unwrap();

        assert_eq!(text(w), "a {\nb {\n\tc {\n\t\tx;\n\t} // c\n} // b\n} // a\n");
    }

    #[test]
    fn test_silent_scope_only_indents() {
        let mut w = BlockWriter::new(Vec::new());
        w.line("template<typename T>").unwrap();
        w.enter(None, true);
        w.open("struct s {", "};", true).unwrap();
        w.line("T v;").unwrap();
        w.close().unwrap();
        w.close().unwrap();
        w.line("done").unwrap();

        assert_eq!(
            text(w),
            "template<typename T>\n\tstruct s {\n\t\tT v;\n\t};\ndone\n"
        );
    }

    #[test]
    fn test_blank_lines_are_not_indented() {
        let mut w = BlockWriter::new(Vec::new());
        w.open("{", "}", true).unwrap();
        w.blank().unwrap();
        w.line_at(2, "deep").unwrap();
        w.close().unwrap();

        assert_eq!(text(w), "{\n\n\t\t\tdeep\n}\n");
    }

    #[test]
    fn test_finish_with_open_scope_fails() {
        let mut w = BlockWriter::new(Vec::new());
        w.open("{", "}", true).unwrap();
        assert_eq!(w.open_scopes(), 1);
        assert!(matches!(w.finish(), Err(GenerateError::UnclosedScopes(1))));
    }

    #[test]
    fn test_close_without_scope_is_noop() {
        let mut w = BlockWriter::new(Vec::new());
        w.close().unwrap();
        assert_eq!(w.depth(), 0);
        assert_eq!(text(w), "");
    }
}

use std::fmt::{self, Write};

const INDENT: &str = "    ";

/// Line-oriented text sink that tracks the current indentation level.
pub struct CodeWriter<W: Write> {
    w: W,
    indent_level: u32,
}

impl<W: Write> CodeWriter<W> {
    pub fn new(w: W) -> CodeWriter<W> {
        CodeWriter { w, indent_level: 0 }
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn unindent(&mut self) -> Result<(), Error> {
        if self.indent_level == 0 {
            return Err(Error::IndentUnderflow);
        }
        self.indent_level -= 1;
        Ok(())
    }

    pub fn append_indent(&mut self) -> Result<(), Error> {
        for _ in 0..self.indent_level {
            self.w.write_str(INDENT)?;
        }
        Ok(())
    }

    pub fn append_newline(&mut self) -> Result<(), Error> {
        self.w.write_char('\n')?;
        Ok(())
    }

    pub fn append(&mut self, s: &str) -> Result<(), Error> {
        self.w.write_str(s)?;
        Ok(())
    }

    pub fn append_line(&mut self, s: &str) -> Result<(), Error> {
        self.append_indent()?;
        self.append(s)?;
        self.append_newline()
    }

    pub fn into_inner(self) -> W {
        self.w
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unindent past column zero")]
    IndentUnderflow,
    #[error(transparent)]
    Fmt(#[from] fmt::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_follow_indent_level() {
        let mut w = CodeWriter::new(String::new());
        w.append_line("a {").unwrap();
        w.indent();
        w.append_line("b;").unwrap();
        w.indent();
        w.append_line("c;").unwrap();
        w.unindent().unwrap();
        w.unindent().unwrap();
        w.append_line("}").unwrap();

        assert_eq!(w.into_inner(), "a {\n    b;\n        c;\n}\n");
    }

    #[test]
    fn blank_line_has_no_trailing_whitespace() {
        let mut w = CodeWriter::new(String::new());
        w.indent();
        w.append_newline().unwrap();
        assert_eq!(w.into_inner(), "\n");
    }

    #[test]
    fn unindent_at_zero_fails() {
        let mut w = CodeWriter::new(String::new());
        assert!(matches!(w.unindent(), Err(Error::IndentUnderflow)));
    }
}

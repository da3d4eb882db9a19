//! Line writer for arf source
//!
//! arf is read one line at a time: a line is an indentation level, [`INDENT_WIDTH`] spaces per
//! level, followed by words separated by single spaces. [`LineWriter`] only ever writes whole lines
//! of that shape, so rendered output always lexes with the indentation it was given.

use arf_core::lang::punctuation::INDENT_WIDTH;

#[derive(Debug, Default)]
pub struct LineWriter {
    output: String,
}

impl LineWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `words` as one line at indentation `level`. A line without words is skipped.
    pub fn line<I>(&mut self, level: usize, words: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut words = words.into_iter().filter(|word| !word.as_ref().is_empty());
        let Some(first) = words.next() else {
            return;
        };
        self.output.push_str(&" ".repeat(level * INDENT_WIDTH));
        self.output.push_str(first.as_ref());
        for word in words {
            self.output.push(' ');
            self.output.push_str(word.as_ref());
        }
        self.output.push('\n');
    }

    pub fn blank_lines(&mut self, count: usize) {
        for _ in 0..count {
            self.output.push('\n');
        }
    }

    pub fn finish(self) -> String {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_use_lexer_indent_width() {
        let mut writer = LineWriter::new();
        writer.line(0, ["func", "rr", "main"]);
        writer.line(1, ["---"]);
        writer.line(2, ["[x]"]);
        assert_eq!(writer.finish(), "func rr main\n        ---\n                [x]\n");
    }

    #[test]
    fn test_empty_words_are_dropped() {
        let mut writer = LineWriter::new();
        writer.line(1, Vec::<String>::new());
        writer.line(1, ["", ""]);
        writer.line(0, ["data", "", "rr", "x:Int"]);
        assert_eq!(writer.finish(), "data rr x:Int\n");
    }

    #[test]
    fn test_blank_lines() {
        let mut writer = LineWriter::new();
        writer.line(0, ["a"]);
        writer.blank_lines(2);
        writer.line(0, ["b"]);
        assert_eq!(writer.finish(), "a\n\n\nb\n");
    }
}

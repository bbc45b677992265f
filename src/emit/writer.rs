//! Line-oriented text builder for generated C.

#[derive(Debug, Default)]
pub(crate) struct CodeWriter {
    out: String,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line followed by `\n`.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.out.push_str(text.as_ref());
        self.out.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.out.push('\n');
        self
    }

    pub fn lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for l in lines {
            self.line(l);
        }
        self
    }

    pub fn finish(self) -> String {
        self.out
    }
}

use crate::span::Pos;

/// Text of the token currently being assembled.
#[derive(Debug)]
pub(crate) struct TokenBuffer {
    text: String,
    /// Where the first buffered rune was read. `None` while empty.
    start: Option<Pos>,
}

impl TokenBuffer {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            start: None,
        }
    }

    /// Append `ch`, read at `at`.
    pub(crate) fn push(&mut self, ch: char, at: Pos) {
        self.text.push(ch);
        if self.start.is_none() {
            self.start = Some(at);
        }
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.text
    }

    /// Hand out the buffered text and its start, leaving the buffer empty.
    pub(crate) fn take(&mut self) -> (String, Option<Pos>) {
        (std::mem::take(&mut self.text), self.start.take())
    }
}

use std::io::{self, Write};

/// A CGI response, built up in memory and sent all at once: the header
/// block, a blank line, then the body.
///
/// Nothing written here is escaped. Whatever a handler puts in goes to the
/// client as-is, markup and all.
#[derive(Debug, Clone)]
pub struct ResponseDocument {
    content_type: &'static str,
    body: String,
}

impl ResponseDocument {
    /// An empty `text/html` document.
    pub fn html() -> ResponseDocument {
        ResponseDocument { content_type: "text/html", body: String::new() }
    }
    /// Appends `text` and a newline to the body.
    pub fn line<S: AsRef<str>>(&mut self, text: S) {
        self.body.push_str(text.as_ref());
        self.body.push('\n');
    }
    /// Everything after the blank line.
    pub fn body(&self) -> &str { &self.body }
    /// Writes the whole response to `out` and flushes it.
    pub fn send<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "Content-Type: {}\n\n", self.content_type)?;
        out.write_all(self.body.as_bytes())?;
        out.flush()
    }
}

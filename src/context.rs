use std::{
    collections::HashMap,
    io::Read,
    iter::FromIterator,
};

use tracing::debug;

use crate::error::RequestError;

/// Everything a handler may know about the request it is answering: the CGI
/// meta-variables the web server handed us, plus whether the body stream is a
/// terminal.
///
/// A context is built once per request, before the handler runs, and never
/// changes afterward. Handlers must use it instead of `std::env`.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    vars: HashMap<String, String>,
    interactive: bool,
}

impl RequestContext {
    /// A context holding exactly `vars`, with a non-interactive body stream.
    pub fn new(vars: HashMap<String, String>) -> RequestContext {
        RequestContext { vars, interactive: false }
    }
    /// Snapshots the environment of the current process. Names or values
    /// that aren't valid Unicode are converted lossily.
    pub fn from_process() -> RequestContext {
        let vars = std::env::vars_os()
            .map(|(k, v)| (k.to_string_lossy().into_owned(),
                           v.to_string_lossy().into_owned()))
            .collect();
        RequestContext {
            vars,
            interactive: crate::host::stdin_is_terminal(),
        }
    }
    /// Overrides whether the body stream is reported as a terminal.
    pub fn with_interactive(mut self, interactive: bool) -> RequestContext {
        self.interactive = interactive;
        self
    }
    /// Whether the request body stream is a terminal. Never true when a real
    /// web server is on the other end.
    pub fn is_interactive(&self) -> bool { self.interactive }
    /// The value of `name`, or `MissingVariable` if it isn't set.
    pub fn get(&self, name: &'static str) -> Result<&str, RequestError> {
        self.vars.get(name).map(String::as_str)
            .ok_or(RequestError::MissingVariable(name))
    }
    /// The value of `name`, or the empty string if it isn't set.
    pub fn var(&self, name: &'static str) -> &str {
        self.var_or(name, "")
    }
    /// The value of `name`, or `default` if it isn't set.
    pub fn var_or<'a>(&'a self, name: &'static str, default: &'a str)
                      -> &'a str {
        match self.get(name) {
            Ok(value) => value,
            Err(e) => {
                debug!(error = %e, "substituting {:?}", default);
                default
            },
        }
    }
    /// `REQUEST_METHOD`, or the empty string.
    pub fn request_method(&self) -> &str {
        self.var("REQUEST_METHOD")
    }
    /// Parses `CONTENT_LENGTH`. Only a non-empty run of ASCII digits that
    /// fits in a `u64` is accepted; no sign, no whitespace.
    pub fn content_length(&self) -> Result<u64, RequestError> {
        let raw = self.get("CONTENT_LENGTH")?;
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RequestError::MalformedContentLength(raw.to_owned()))
        }
        raw.parse()
            .map_err(|_| RequestError::MalformedContentLength(raw.to_owned()))
    }
    /// Captures the POST body from `body`.
    ///
    /// Reads nothing unless this is a POST with a valid `CONTENT_LENGTH`, and
    /// never reads past `CONTENT_LENGTH` bytes. If the stream runs dry (or
    /// fails) early, whatever arrived before that is the body.
    pub fn read_post_body<R: Read + ?Sized>(&self, body: &mut R) -> Vec<u8> {
        if self.request_method() != "POST" { return Vec::new() }
        let expected = match self.content_length() {
            Ok(x) => x,
            Err(e) => {
                debug!(error = %e, "not reading the request body");
                return Vec::new()
            },
        };
        let mut buf = Vec::new();
        if let Err(e) = body.take(expected).read_to_end(&mut buf) {
            debug!(error = %e, "error while reading the request body");
        }
        let received = buf.len() as u64;
        if received < expected {
            let e = RequestError::ShortRead { expected, received };
            debug!(error = %e, "accepting short request body");
        }
        buf
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestContext {
    fn from_iter<I: IntoIterator<Item=(K, V)>>(iter: I) -> RequestContext {
        RequestContext::new(iter.into_iter()
                            .map(|(k, v)| (k.into(), v.into()))
                            .collect())
    }
}

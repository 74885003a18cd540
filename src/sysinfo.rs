//! The `info` page: who and what is answering this request.

use std::io;

use chrono::Local;
use tracing::warn;

use crate::{host, IO, RequestContext, ResponseDocument};

/// Same shape as `2024-03-01 17:04:12.345678`.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Host facts as they will be shown. A fact that couldn't be looked up is
/// the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostFacts {
    pub hostname: String,
    pub platform: String,
    pub runtime_version: String,
    pub time: String,
}

impl HostFacts {
    /// Looks everything up now. Never fails; see `HostFacts`.
    pub fn gather() -> HostFacts {
        HostFacts {
            hostname: or_empty("hostname", host::hostname()),
            platform: or_empty("platform", host::platform()),
            runtime_version: option_env!("RUSTC_VERSION")
                .unwrap_or("").to_string(),
            time: Local::now().format(TIME_FORMAT).to_string(),
        }
    }
}

fn or_empty(what: &str, result: io::Result<String>) -> String {
    match result {
        Ok(x) => x,
        Err(e) => {
            warn!(error = %e, "couldn't determine {}", what);
            String::new()
        },
    }
}

/// Lays out the page for `facts`.
pub fn render(facts: &HostFacts) -> ResponseDocument {
    let mut doc = ResponseDocument::html();
    doc.line("<html><head><title>System Info</title></head><body>");
    doc.line("<h1>Server System Information</h1>");
    doc.line("<ul>");
    doc.line(format!("<li><strong>Hostname:</strong> {}</li>",
                     facts.hostname));
    doc.line(format!("<li><strong>Platform:</strong> {}</li>",
                     facts.platform));
    doc.line(format!("<li><strong>Runtime Version:</strong> {}</li>",
                     facts.runtime_version));
    doc.line(format!("<li><strong>Current Server Time:</strong> {}</li>",
                     facts.time));
    doc.line("</ul>");
    doc.line("</body></html>");
    doc
}

/// Looks up the host facts and sends the page. The request itself is
/// ignored.
pub fn handler(io: &mut dyn IO, _: RequestContext) -> anyhow::Result<i32> {
    render(&HostFacts::gather()).send(io)?;
    Ok(0)
}

//! The `path_info` page: what the web server told us about this request.

use crate::{IO, RequestContext, ResponseDocument};

/// The meta-variables listed at the bottom of the page, in display order.
pub const SHOWN_VARIABLES: [&str; 7] = [
    "REQUEST_METHOD",
    "QUERY_STRING",
    "SCRIPT_NAME",
    "SERVER_NAME",
    "SERVER_PORT",
    "SERVER_PROTOCOL",
    "REMOTE_ADDR",
];

/// Shown in the debug block in place of an unset variable.
const NOT_SET: &str = "Not set";
/// How much of the POST body the debug block previews, in characters.
const PREVIEW_CHARS: usize = 30;

const STYLE: &str = "\
<style>
body { font-family: Arial, sans-serif; margin: 20px; }
h1 { color: #333; }
h2 { color: #0066cc; margin-top: 20px; }
.env-var { background: #f5f5f5; padding: 10px; margin: 5px 0; border-radius: 5px; }
.path-segment { color: #cc0000; font-weight: bold; }
</style>";

/// Which version of the page to produce. The default is the full one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathInfoOptions {
    /// Capture and echo the POST body, and show the debug block describing
    /// it. When false, the body is never read.
    pub debug_block: bool,
}

impl Default for PathInfoOptions {
    fn default() -> PathInfoOptions {
        PathInfoOptions { debug_block: true }
    }
}

impl PathInfoOptions {
    /// No debug block, no POST body.
    pub fn plain() -> PathInfoOptions {
        PathInfoOptions { debug_block: false }
    }
}

/// The non-empty `/`-separated pieces of `path_info`, in order.
pub fn path_segments(path_info: &str) -> Vec<&str> {
    path_info.split('/').filter(|s| !s.is_empty()).collect()
}

/// Lays out the page for `ctx`. `post_data` is the body already captured
/// from the request (empty if there was none).
pub fn render(ctx: &RequestContext, post_data: &[u8],
              options: PathInfoOptions) -> ResponseDocument {
    let mut doc = ResponseDocument::html();
    let post_text = if options.debug_block {
        String::from_utf8_lossy(post_data)
    } else {
        "".into()
    };
    if options.debug_block {
        doc.line("<h2>Debug Info:</h2>");
        doc.line("<div class='env-var'>");
        doc.line(format!("CONTENT_LENGTH: '{}'<br>",
                         ctx.var_or("CONTENT_LENGTH", NOT_SET)));
        doc.line(format!("CONTENT_TYPE: '{}'<br>",
                         ctx.var_or("CONTENT_TYPE", NOT_SET)));
        doc.line(format!("Raw POST data length: {}<br>", post_data.len()));
        if post_text.is_empty() {
            doc.line("No POST data received<br>");
        }
        else {
            let preview: String = post_text.chars().take(PREVIEW_CHARS)
                .collect();
            doc.line(format!("First 30 chars: '{}'<br>", preview));
        }
        let isatty = if ctx.is_interactive() { "True" } else { "False" };
        doc.line(format!("stdin isatty: {}<br>", isatty));
        doc.line("</div>");
    }
    doc.line("<html>");
    doc.line("<head><title>CGI PATH_INFO Test</title>");
    doc.line(STYLE);
    doc.line("</head>");
    doc.line("<body>");
    doc.line("<h1>CGI PATH_INFO Test</h1>");
    let path_info = ctx.var("PATH_INFO");
    doc.line("<h2>PATH_INFO:</h2>");
    doc.line(format!("<div class='env-var'>{}</div>", path_info));
    if !path_info.is_empty() {
        doc.line("<h2>Path Segments:</h2>");
        let segments = path_segments(path_info);
        if segments.is_empty() {
            doc.line("<p>No path segments found.</p>");
        }
        else {
            doc.line("<ul>");
            for (i, segment) in segments.iter().enumerate() {
                doc.line(format!("<li>Segment {}: <span class='path-segment'>\
                                  {}</span></li>", i + 1, segment));
            }
            doc.line("</ul>");
        }
    }
    if !post_text.is_empty() {
        doc.line("<h2>POST Data:</h2>");
        doc.line(format!("<div class='env-var'>{}</div>", post_text));
    }
    doc.line("<h2>Other CGI Environment Variables:</h2>");
    doc.line("<ul>");
    for &name in SHOWN_VARIABLES.iter() {
        doc.line(format!("<li><strong>{}:</strong> <div class='env-var'>{}\
                          </div></li>", name, ctx.var(name)));
    }
    doc.line("</ul>");
    doc.line("</body></html>");
    doc
}

/// Captures the body (if `options` asks for it), then sends the page.
pub fn respond(io: &mut dyn IO, ctx: &RequestContext,
               options: PathInfoOptions) -> anyhow::Result<i32> {
    let post_data = if options.debug_block {
        ctx.read_post_body(io)
    } else {
        Vec::new()
    };
    render(ctx, &post_data, options).send(io)?;
    Ok(0)
}

/// The full page, for the `path_info` binary.
pub fn handler(io: &mut dyn IO, ctx: RequestContext) -> anyhow::Result<i32> {
    respond(io, &ctx, PathInfoOptions::default())
}

/// The reduced page, for the `path_info_plain` binary.
pub fn plain_handler(io: &mut dyn IO, ctx: RequestContext)
                     -> anyhow::Result<i32> {
    respond(io, &ctx, PathInfoOptions::plain())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::run;

    fn ctx(vars: &[(&str, &str)]) -> RequestContext {
        vars.iter().map(|&(k, v)| (k, v)).collect()
    }

    #[test]
    fn segments_skip_empty_pieces() {
        assert_eq!(path_segments("/a/b/c"), vec!["a", "b", "c"]);
        assert_eq!(path_segments("a//b/"), vec!["a", "b"]);
        assert!(path_segments("///").is_empty());
        assert!(path_segments("").is_empty());
    }

    #[test]
    fn numbers_segments_from_one() {
        let (code, out) = run(handler, ctx(&[("PATH_INFO", "/a/b/c")]), b"");
        assert_eq!(code, 0);
        assert!(out.contains("<div class='env-var'>/a/b/c</div>"));
        assert!(out.contains("<ul>\n\
            <li>Segment 1: <span class='path-segment'>a</span></li>\n\
            <li>Segment 2: <span class='path-segment'>b</span></li>\n\
            <li>Segment 3: <span class='path-segment'>c</span></li>\n\
            </ul>"));
    }

    #[test]
    fn only_slashes_means_no_segments() {
        let (_, out) = run(handler, ctx(&[("PATH_INFO", "///")]), b"");
        assert!(out.contains("<h2>Path Segments:</h2>\n\
                              <p>No path segments found.</p>"));
        assert!(!out.contains("Segment 1"));
    }

    #[test]
    fn no_path_info_skips_segments() {
        let (_, out) = run(handler, ctx(&[]), b"");
        assert!(out.contains("<h2>PATH_INFO:</h2>\n\
                              <div class='env-var'></div>"));
        assert!(!out.contains("Path Segments"));
        let (_, out) = run(handler, ctx(&[("PATH_INFO", "")]), b"");
        assert!(!out.contains("Path Segments"));
    }

    #[test]
    fn post_body_is_captured_to_content_length() {
        let (_, out) = run(handler,
                           ctx(&[("REQUEST_METHOD", "POST"),
                                 ("CONTENT_LENGTH", "5"),
                                 ("CONTENT_TYPE", "text/plain")]),
                           b"hello world");
        assert!(out.contains("CONTENT_LENGTH: '5'<br>"));
        assert!(out.contains("CONTENT_TYPE: 'text/plain'<br>"));
        assert!(out.contains("Raw POST data length: 5<br>"));
        assert!(out.contains("First 30 chars: 'hello'<br>"));
        assert!(out.contains("<h2>POST Data:</h2>\n\
                              <div class='env-var'>hello</div>"));
        assert!(!out.contains("hello world"));
    }

    #[test]
    fn preview_is_thirty_characters() {
        let body = "0123456789".repeat(4);
        let (_, out) = run(handler,
                           ctx(&[("REQUEST_METHOD", "POST"),
                                 ("CONTENT_LENGTH", "40")]),
                           body.as_bytes());
        assert!(out.contains(&format!("First 30 chars: '{}'<br>",
                                      &body[..30])));
        assert!(out.contains(&format!("<div class='env-var'>{}</div>",
                                      body)));
    }

    #[test]
    fn multibyte_body_counts_bytes_but_previews_characters() {
        let body = "é".repeat(40);
        let (_, out) = run(handler,
                           ctx(&[("REQUEST_METHOD", "POST"),
                                 ("CONTENT_LENGTH", "80")]),
                           body.as_bytes());
        assert!(out.contains("Raw POST data length: 80<br>"));
        assert!(out.contains(&format!("First 30 chars: '{}'<br>",
                                      "é".repeat(30))));
        assert!(out.contains(&format!("<div class='env-var'>{}</div>",
                                      body)));
    }

    #[test]
    fn invalid_utf8_is_replaced_for_display() {
        let (_, out) = run(handler,
                           ctx(&[("REQUEST_METHOD", "POST"),
                                 ("CONTENT_LENGTH", "3")]),
                           b"a\xffb");
        assert!(out.contains("Raw POST data length: 3<br>"));
        assert!(out.contains("First 30 chars: 'a\u{FFFD}b'<br>"));
        assert!(out.contains("<h2>POST Data:</h2>\n\
                              <div class='env-var'>a\u{FFFD}b</div>"));
    }

    #[test]
    fn get_ignores_the_body() {
        let (_, out) = run(handler,
                           ctx(&[("REQUEST_METHOD", "GET"),
                                 ("CONTENT_LENGTH", "5")]),
                           b"hello world");
        assert!(out.contains("Raw POST data length: 0<br>"));
        assert!(out.contains("No POST data received<br>"));
        assert!(!out.contains("POST Data"));
        assert!(!out.contains("hello"));
    }

    #[test]
    fn malformed_content_length_skips_the_body() {
        let (code, out) = run(handler,
                              ctx(&[("REQUEST_METHOD", "POST"),
                                    ("CONTENT_LENGTH", "abc")]),
                              b"hello world");
        assert_eq!(code, 0);
        assert!(out.contains("CONTENT_LENGTH: 'abc'<br>"));
        assert!(out.contains("No POST data received<br>"));
        assert!(!out.contains("POST Data"));
    }

    #[test]
    fn unset_variables_render_empty() {
        let (code, out) = run(handler, ctx(&[]), b"");
        assert_eq!(code, 0);
        assert!(out.contains("CONTENT_LENGTH: 'Not set'<br>"));
        assert!(out.contains("CONTENT_TYPE: 'Not set'<br>"));
        assert!(out.contains("stdin isatty: False<br>"));
        for name in SHOWN_VARIABLES.iter() {
            assert!(out.contains(&format!(
                "<li><strong>{}:</strong> <div class='env-var'></div></li>",
                name)));
        }
        assert!(out.ends_with("</ul>\n</body></html>\n"));
    }

    #[test]
    fn variables_are_listed_in_fixed_order() {
        let vars: Vec<(&str, &str)> = vec![
            ("REMOTE_ADDR", "10.0.0.7"),
            ("SERVER_PROTOCOL", "HTTP/1.1"),
            ("SERVER_PORT", "8080"),
            ("SERVER_NAME", "localhost"),
            ("SCRIPT_NAME", "/cgi/path_info"),
            ("QUERY_STRING", "x=1&y=2"),
            ("REQUEST_METHOD", "GET"),
        ];
        let (_, out) = run(handler, ctx(&vars), b"");
        let mut last = 0;
        for name in SHOWN_VARIABLES.iter() {
            let value = vars.iter().find(|(k, _)| k == name).unwrap().1;
            let item = format!("<li><strong>{}:</strong> \
                                <div class='env-var'>{}</div></li>",
                               name, value);
            let at = out.find(&item).unwrap();
            assert!(at > last);
            last = at;
        }
    }

    #[test]
    fn echoes_values_verbatim() {
        let (_, out) = run(handler, ctx(&[("PATH_INFO", "/<b>x</b>")]), b"");
        assert!(out.contains("<div class='env-var'>/<b>x</b></div>"));
    }

    #[test]
    fn sections_come_in_order() {
        let (_, out) = run(handler,
                           ctx(&[("REQUEST_METHOD", "POST"),
                                 ("CONTENT_LENGTH", "3"),
                                 ("PATH_INFO", "/a")]),
                           b"abc");
        assert!(out.starts_with("Content-Type: text/html\n\n\
                                 <h2>Debug Info:</h2>"));
        let order = ["Debug Info:", "<title>CGI PATH_INFO Test</title>",
                     "<h2>PATH_INFO:</h2>", "<h2>Path Segments:</h2>",
                     "<h2>POST Data:</h2>",
                     "<h2>Other CGI Environment Variables:</h2>"];
        let positions: Vec<usize> = order.iter()
            .map(|s| out.find(s).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn plain_variant_reads_nothing() {
        let (code, out) = run(plain_handler,
                              ctx(&[("REQUEST_METHOD", "POST"),
                                    ("CONTENT_LENGTH", "5"),
                                    ("PATH_INFO", "/a")]),
                              b"hello");
        assert_eq!(code, 0);
        assert!(out.starts_with("Content-Type: text/html\n\n<html>"));
        assert!(!out.contains("Debug Info"));
        assert!(!out.contains("POST Data"));
        assert!(out.contains("<span class='path-segment'>a</span>"));
        assert!(out.contains("<li><strong>REQUEST_METHOD:</strong> \
                              <div class='env-var'>POST</div></li>"));
    }

    #[test]
    fn interactive_stdin_is_reported() {
        let (_, out) = run(handler, ctx(&[]).with_interactive(true), b"");
        assert!(out.contains("stdin isatty: True<br>"));
    }
}

//! This crate is a pair of introspection CGI scripts, plus the thin wrapper
//! they run inside. One page describes the server (`info`); the other echoes
//! back what the web server told us about the request (`path_info`).
//!
//! This is *not* a web framework. Things `cgi_introspect` **does not do**:
//!
//! - Parse the request body in any way. A POST body is captured, byte for
//! byte, up to `CONTENT_LENGTH`, and that's it.
//! - Escape anything. Echoed values go into the page verbatim; don't put
//! these scripts anywhere an attacker could link a victim to.
//! - Remember anything between requests.
//! - Act as a gateway. The web server parses the request and fills in the
//! CGI meta-variables before we ever run.
//!
//! Each binary's `main` hands one handler to [`main`](fn.main.html):
//!
//! ```rust,no_run
//! pub fn main() {
//!     cgi_introspect::main(cgi_introspect::path_info::handler)
//! }
//! ```
//!
//! Handlers get the request as a [`RequestContext`](struct.RequestContext.html)
//! and the CGI streams as an [`IO`](trait.IO.html), instead of reaching for
//! `std::env`, `stdin` and `stdout` themselves. That makes them easy to drive
//! from tests.
//!
//! Diagnostics go to stderr through `tracing`. The filter comes from
//! `RUST_LOG`, defaulting to warnings and worse.
//!
//! See the [Common Gateway Interface][1] specification for more information.
//!
//! [1]: https://tools.ietf.org/html/rfc3875

use std::{
    io,
    io::{Read, BufRead, Write, BufWriter},
};

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[cfg(unix)] mod unix;

mod context;
mod error;
mod host;
mod response;
pub mod path_info;
pub mod sysinfo;

pub use context::RequestContext;
pub use error::RequestError;
pub use response::ResponseDocument;

/// Wraps the stdin and stdout streams of a standard CGI invocation.
///
/// See the [Common Gateway Interface][1] specification for more information.
///
/// [1]: https://tools.ietf.org/html/rfc3875
pub trait IO : BufRead + Write {
}

struct DualIO<R: BufRead, W: Write> {
    i: R,
    o: W,
}

impl<R: BufRead, W: Write> Read for DualIO<R, W> {
    fn read(&mut self, buf: &mut[u8]) -> io::Result<usize> {
        self.i.read(buf)
    }
}

impl<R: BufRead, W: Write> BufRead for DualIO<R, W> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.i.fill_buf()
    }
    fn consume(&mut self, amount: usize) {
        self.i.consume(amount)
    }
}

impl<R: BufRead, W: Write> Write for DualIO<R, W> {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.o.write(bytes)
    }
    fn flush(&mut self) -> io::Result<()> {
        self.o.flush()
    }
}

impl<R: BufRead, W: Write> IO for DualIO<R, W> {
}

/// How we were started, judging by `GATEWAY_INTERFACE`.
#[derive(Debug, PartialEq, Eq)]
enum Invocation {
    Cgi,
    /// Some gateway interface that isn't CGI.
    Foreign(String),
    /// Not run by a web server at all.
    Missing,
}

fn invocation(ctx: &RequestContext) -> Invocation {
    match ctx.get("GATEWAY_INTERFACE") {
        Ok(x) if x.starts_with("CGI/") => Invocation::Cgi,
        Ok(x) => Invocation::Foreign(x.to_owned()),
        Err(_) => Invocation::Missing,
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("cgi_introspect=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init()
        .ok();
}

/// The first (and only) function your program's `main` function should call.
/// Sets up logging, snapshots the request, and calls `handler` once with it.
///
/// `main` does not return. The handler's `Ok` value becomes the exit status;
/// an `Err` is logged and exits with status 1. Request content should never
/// produce an `Err`; only failing to write the response should.
///
/// If we weren't invoked as a CGI script (no `GATEWAY_INTERFACE`), prints
/// usage to stderr and exits with status 1 without calling `handler`.
pub fn main<H>(handler: H) -> !
where H: FnOnce(&mut dyn IO, RequestContext) -> anyhow::Result<i32> {
    use std::process::exit;
    init_logging();
    match sub_main(handler) {
        Ok(i) => exit(i),
        Err(e) => {
            error!("Unexpected error: {:#}", e);
            exit(1)
        }
    }
}

fn sub_main<H>(handler: H) -> anyhow::Result<i32>
where H: FnOnce(&mut dyn IO, RequestContext) -> anyhow::Result<i32> {
    let ctx = RequestContext::from_process();
    match invocation(&ctx) {
        Invocation::Cgi => (),
        Invocation::Foreign(x) => {
            error!(gateway_interface = %x, "Unknown GATEWAY_INTERFACE type");
            return Ok(1)
        },
        Invocation::Missing => {
            print_usage();
            return Ok(1)
        },
    }
    info!(method = ctx.request_method(),
          script = ctx.var("SCRIPT_NAME"),
          path_info = ctx.var("PATH_INFO"),
          "handling request");
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut io = DualIO {
        i: stdin.lock(),
        o: BufWriter::new(stdout.lock()),
    };
    let status = handler(&mut io, ctx)?;
    io.flush()?;
    Ok(status)
}

fn print_usage() {
    let app_name = std::env::args().next()
        .unwrap_or_else(|| "cgi_introspect".to_string());
    eprintln!(r#"
Usage: configure {} to be run by your web server as a CGI script.

It takes no arguments or options. Everything it needs comes from the CGI
meta-variables (GATEWAY_INTERFACE, REQUEST_METHOD, PATH_INFO, ...) and, for
POST requests, from standard input. Set RUST_LOG to control how much it logs
to standard error."#, &app_name);
}

//! Facts about the machine we're running on. Everything here goes through
//! the `unix` module where one exists, and falls back to what the standard
//! library knows at compile time elsewhere.

#[cfg(unix)]
use crate::unix;
use std::io;

pub fn hostname() -> io::Result<String> {
    #[cfg(unix)] return unix::hostname();
    #[cfg(not(unix))] return std::env::var("COMPUTERNAME")
        .map_err(|e| io::Error::new(io::ErrorKind::NotFound, e));
}

pub fn platform() -> io::Result<String> {
    #[cfg(unix)] return unix::platform();
    #[cfg(not(unix))] return Ok(format!("{}-{}", std::env::consts::OS,
                                        std::env::consts::ARCH));
}

pub fn stdin_is_terminal() -> bool {
    #[cfg(unix)] return unix::stdin_is_terminal();
    #[cfg(not(unix))] return false;
}

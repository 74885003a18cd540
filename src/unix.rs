use std::io;

use nix::{
    sys::utsname::uname,
    unistd,
};
use tracing::warn;

fn to_io(e: nix::Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e)
}

pub fn hostname() -> io::Result<String> {
    let name = unistd::gethostname().map_err(to_io)?;
    Ok(name.to_string_lossy().into_owned())
}

/// `<sysname>-<release>-<machine>`, e.g. `Linux-6.5.0-21-generic-x86_64`.
pub fn platform() -> io::Result<String> {
    let uts = uname().map_err(to_io)?;
    Ok(format!("{}-{}-{}",
               uts.sysname().to_string_lossy(),
               uts.release().to_string_lossy(),
               uts.machine().to_string_lossy()))
}

pub fn stdin_is_terminal() -> bool {
    match unistd::isatty(libc::STDIN_FILENO) {
        Ok(x) => x,
        // A closed stdin is certainly not a terminal.
        Err(nix::Error::EBADF) => false,
        Err(e) => {
            warn!(error = %e, "isatty(stdin) failed");
            false
        },
    }
}

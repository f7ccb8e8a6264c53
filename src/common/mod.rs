pub mod io;

/// The platform's native line terminator, used when no separator is given.
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Get the GNU-compatible tool name by stripping the 'f' prefix.
/// e.g., "fbase64" -> "base64"
#[inline]
pub fn gnu_name(binary_name: &str) -> &str {
    binary_name.strip_prefix('f').unwrap_or(binary_name)
}

/// Reset SIGPIPE to SIG_DFL so a closed pipe ends the process like GNU tools.
/// Rust ignores SIGPIPE by default. Call at the start of main().
#[inline]
pub fn reset_sigpipe() {
    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

/// Format an IO error message without the "(os error N)" suffix,
/// e.g. "No such file or directory" as GNU tools print it.
pub fn io_error_msg(e: &std::io::Error) -> String {
    match e.raw_os_error() {
        Some(raw) => std::io::Error::from_raw_os_error(raw)
            .to_string()
            .replace(&format!(" (os error {})", raw), ""),
        None => e.to_string(),
    }
}

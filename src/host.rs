//! Operating-system hostname lookup.
//!
//! In a Kubernetes pod this is the pod name, which is what makes the `GET /`
//! response useful for telling replicas apart behind a load balancer.

use thiserror::Error;

/// Why the hostname could not be read.
#[derive(Debug, Error)]
pub enum HostnameError {
    #[error("gethostname failed: {0}")]
    Os(#[from] std::io::Error),

    #[error("hostname is not valid UTF-8")]
    NotUtf8,
}

/// Return the name the operating system reports for this host.
///
/// Read fresh on every call; nothing is cached.
#[cfg(unix)]
pub fn hostname() -> Result<String, HostnameError> {
    use std::ffi::CStr;

    let mut buf = [0u8; 256];
    // SAFETY: the pointer and length describe a live, writable buffer.
    let rc = unsafe { libc::gethostname(buf.as_mut_ptr().cast::<libc::c_char>(), buf.len()) };
    if rc != 0 {
        return Err(std::io::Error::last_os_error().into());
    }
    // POSIX leaves truncated names unterminated.
    buf[buf.len() - 1] = 0;

    let name = CStr::from_bytes_until_nul(&buf).map_err(|_| HostnameError::NotUtf8)?;
    name.to_str()
        .map(str::to_owned)
        .map_err(|_| HostnameError::NotUtf8)
}

#[cfg(not(unix))]
pub fn hostname() -> Result<String, HostnameError> {
    std::env::var("COMPUTERNAME").map_err(|e| match e {
        std::env::VarError::NotPresent => std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "COMPUTERNAME is not set",
        )
        .into(),
        std::env::VarError::NotUnicode(_) => HostnameError::NotUtf8,
    })
}

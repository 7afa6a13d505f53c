//! Host platform queries.

pub mod paths;

/// Whether the current process runs with administrator rights.
///
/// Machine-scope writes need this on Windows. Other hosts report whether the
/// effective user is root.
#[cfg(windows)]
pub fn is_elevated() -> bool {
  use windows_sys::Win32::Foundation::{CloseHandle, HANDLE};
  use windows_sys::Win32::Security::{GetTokenInformation, TOKEN_ELEVATION, TOKEN_QUERY, TokenElevation};
  use windows_sys::Win32::System::Threading::{GetCurrentProcess, OpenProcessToken};

  let mut token: HANDLE = std::ptr::null_mut();

  // SAFETY: GetCurrentProcess returns a pseudo handle; `token` is a valid out pointer
  // and is closed before returning.
  unsafe {
    if OpenProcessToken(GetCurrentProcess(), TOKEN_QUERY, &mut token) == 0 {
      return false;
    }

    let mut elevation = TOKEN_ELEVATION { TokenIsElevated: 0 };
    let mut returned = 0u32;
    let ok = GetTokenInformation(
      token,
      TokenElevation,
      (&mut elevation as *mut TOKEN_ELEVATION).cast(),
      std::mem::size_of::<TOKEN_ELEVATION>() as u32,
      &mut returned,
    );
    CloseHandle(token);

    ok != 0 && elevation.TokenIsElevated != 0
  }
}

/// Whether the current process runs with administrator rights.
#[cfg(unix)]
pub fn is_elevated() -> bool {
  rustix::process::geteuid().is_root()
}

#[cfg(not(any(unix, windows)))]
pub fn is_elevated() -> bool {
  false
}

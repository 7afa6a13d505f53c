//! Native registry access through the Win32 API.

use std::ffi::OsStr;
use std::os::windows::ffi::OsStrExt;
use std::ptr;

use windows_sys::Win32::Foundation::{
  ERROR_FILE_NOT_FOUND, ERROR_MORE_DATA, ERROR_NO_MORE_ITEMS, ERROR_SUCCESS, WIN32_ERROR,
};
use windows_sys::Win32::System::Registry::{
  HKEY, HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_READ, KEY_SET_VALUE, REG_OPTION_NON_VOLATILE, REG_SAM_FLAGS,
  REG_SZ, RRF_NOEXPAND, RRF_RT_REG_EXPAND_SZ, RRF_RT_REG_SZ, RegCloseKey, RegCreateKeyExW, RegDeleteKeyValueW,
  RegDeleteKeyW, RegEnumKeyExW, RegGetValueW, RegOpenKeyExW, RegSetValueExW,
};

use super::{Hive, Registry, RegistryError};

/// Longest key name the registry allows, plus the terminator.
const MAX_KEY_NAME: usize = 256;

fn to_wide(s: &str) -> Vec<u16> {
  OsStr::new(s).encode_wide().chain(Some(0)).collect()
}

fn root(hive: Hive) -> HKEY {
  match hive {
    Hive::LocalMachine => HKEY_LOCAL_MACHINE,
    Hive::CurrentUser => HKEY_CURRENT_USER,
  }
}

fn os_error(code: WIN32_ERROR, action: &str, hive: Hive, path: &str) -> RegistryError {
  RegistryError::os(code, format!("failed to {} {}\\{}", action, hive, path))
}

/// Open key handle, closed on drop.
struct KeyHandle(HKEY);

impl Drop for KeyHandle {
  fn drop(&mut self) {
    // SAFETY: the handle came from a successful RegOpenKeyExW/RegCreateKeyExW
    // and is closed exactly once.
    unsafe {
      RegCloseKey(self.0);
    }
  }
}

fn open(hive: Hive, path: &str, access: REG_SAM_FLAGS) -> Result<Option<KeyHandle>, RegistryError> {
  let wide = to_wide(path);
  let mut handle: HKEY = ptr::null_mut();

  // SAFETY: `wide` is NUL-terminated and outlives the call; `handle` is a valid out pointer.
  let status = unsafe { RegOpenKeyExW(root(hive), wide.as_ptr(), 0, access, &mut handle) };

  match status {
    ERROR_SUCCESS => Ok(Some(KeyHandle(handle))),
    ERROR_FILE_NOT_FOUND => Ok(None),
    code => Err(os_error(code, "open", hive, path)),
  }
}

/// The Windows registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsRegistry;

impl WindowsRegistry {
  pub fn new() -> Self {
    Self
  }
}

impl Registry for WindowsRegistry {
  fn subkeys(&self, hive: Hive, path: &str) -> Result<Option<Vec<String>>, RegistryError> {
    let Some(key) = open(hive, path, KEY_READ)? else {
      return Ok(None);
    };

    let mut names = Vec::new();
    let mut buf = [0u16; MAX_KEY_NAME];

    for index in 0u32.. {
      let mut len = buf.len() as u32;

      // SAFETY: `buf` holds `len` u16s; the optional out parameters are null.
      let status = unsafe {
        RegEnumKeyExW(
          key.0,
          index,
          buf.as_mut_ptr(),
          &mut len,
          ptr::null(),
          ptr::null_mut(),
          ptr::null_mut(),
          ptr::null_mut(),
        )
      };

      match status {
        ERROR_SUCCESS => names.push(String::from_utf16_lossy(&buf[..len as usize])),
        ERROR_NO_MORE_ITEMS => break,
        code => return Err(os_error(code, "enumerate", hive, path)),
      }
    }

    Ok(Some(names))
  }

  fn read_value(&self, hive: Hive, path: &str, name: Option<&str>) -> Result<Option<String>, RegistryError> {
    let wide_path = to_wide(path);
    let wide_name = name.map(to_wide);
    let name_ptr = wide_name.as_ref().map_or(ptr::null(), |n| n.as_ptr());
    let flags = RRF_RT_REG_SZ | RRF_RT_REG_EXPAND_SZ | RRF_NOEXPAND;

    let mut size: u32 = 0;
    // SAFETY: size query with a null data pointer; all strings are NUL-terminated.
    let status = unsafe {
      RegGetValueW(
        root(hive),
        wide_path.as_ptr(),
        name_ptr,
        flags,
        ptr::null_mut(),
        ptr::null_mut(),
        &mut size,
      )
    };
    match status {
      ERROR_SUCCESS => {}
      ERROR_FILE_NOT_FOUND => return Ok(None),
      code => return Err(os_error(code, "read", hive, path)),
    }

    loop {
      let mut buf = vec![0u16; (size as usize).div_ceil(2)];
      let mut written = (buf.len() * 2) as u32;

      // SAFETY: `buf` is `written` bytes long.
      let status = unsafe {
        RegGetValueW(
          root(hive),
          wide_path.as_ptr(),
          name_ptr,
          flags,
          ptr::null_mut(),
          buf.as_mut_ptr().cast(),
          &mut written,
        )
      };

      match status {
        ERROR_SUCCESS => {
          buf.truncate(written as usize / 2);
          while buf.last() == Some(&0) {
            buf.pop();
          }
          return Ok(Some(String::from_utf16_lossy(&buf)));
        }
        // Value grew between the size query and the read
        ERROR_MORE_DATA => size = written,
        ERROR_FILE_NOT_FOUND => return Ok(None),
        code => return Err(os_error(code, "read", hive, path)),
      }
    }
  }

  fn key_exists(&self, hive: Hive, path: &str) -> Result<bool, RegistryError> {
    Ok(open(hive, path, KEY_READ)?.is_some())
  }

  fn create_key(&self, hive: Hive, path: &str) -> Result<(), RegistryError> {
    let wide = to_wide(path);
    let mut handle: HKEY = ptr::null_mut();

    // SAFETY: `wide` is NUL-terminated; class, security attributes and disposition are optional.
    let status = unsafe {
      RegCreateKeyExW(
        root(hive),
        wide.as_ptr(),
        0,
        ptr::null(),
        REG_OPTION_NON_VOLATILE,
        KEY_SET_VALUE,
        ptr::null(),
        &mut handle,
        ptr::null_mut(),
      )
    };

    if status != ERROR_SUCCESS {
      return Err(os_error(status, "create", hive, path));
    }
    drop(KeyHandle(handle));
    Ok(())
  }

  fn write_value(&self, hive: Hive, path: &str, name: Option<&str>, data: &str) -> Result<(), RegistryError> {
    let key = open(hive, path, KEY_SET_VALUE)?.ok_or_else(|| os_error(ERROR_FILE_NOT_FOUND, "open", hive, path))?;
    let wide_name = name.map(to_wide);
    let name_ptr = wide_name.as_ref().map_or(ptr::null(), |n| n.as_ptr());
    let wide_data = to_wide(data);

    // SAFETY: REG_SZ data is the NUL-terminated UTF-16 buffer, sized in bytes.
    let status = unsafe {
      RegSetValueExW(
        key.0,
        name_ptr,
        0,
        REG_SZ,
        wide_data.as_ptr().cast(),
        (wide_data.len() * 2) as u32,
      )
    };

    if status != ERROR_SUCCESS {
      return Err(os_error(status, "write", hive, path));
    }
    Ok(())
  }

  fn delete_value(&self, hive: Hive, path: &str, name: Option<&str>) -> Result<bool, RegistryError> {
    let wide_path = to_wide(path);
    let wide_name = name.map(to_wide);
    let name_ptr = wide_name.as_ref().map_or(ptr::null(), |n| n.as_ptr());

    // SAFETY: both strings are NUL-terminated or null for the default value.
    let status = unsafe { RegDeleteKeyValueW(root(hive), wide_path.as_ptr(), name_ptr) };

    match status {
      ERROR_SUCCESS => Ok(true),
      ERROR_FILE_NOT_FOUND => Ok(false),
      code => Err(os_error(code, "delete value in", hive, path)),
    }
  }

  fn delete_key(&self, hive: Hive, path: &str) -> Result<bool, RegistryError> {
    let wide = to_wide(path);

    // SAFETY: `wide` is NUL-terminated.
    let status = unsafe { RegDeleteKeyW(root(hive), wide.as_ptr()) };

    match status {
      ERROR_SUCCESS => Ok(true),
      ERROR_FILE_NOT_FOUND => Ok(false),
      code => Err(os_error(code, "delete", hive, path)),
    }
  }

  fn describe(&self) -> String {
    "Windows registry".to_string()
  }
}

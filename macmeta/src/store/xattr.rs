// SPDX-License-Identifier: MIT

//! Raw extended-attribute syscalls.
//!
//! Thin `io::Result` wrappers over `getxattr`/`setxattr`/`listxattr`/
//! `removexattr`. The macOS variants take extra position/options arguments;
//! everything else gets the plain four-argument form. A missing attribute is
//! reported as `Ok(None)`, not an error.

use std::ffi::CString;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

fn cpath(path: &Path) -> io::Result<CString> {
    CString::new(path.as_os_str().as_bytes())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "path contains NUL"))
}

fn cname(name: &str) -> io::Result<CString> {
    CString::new(name)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "attribute name contains NUL"))
}

fn is_missing_attr(err: &io::Error) -> bool {
    #[cfg(target_os = "macos")]
    {
        err.raw_os_error() == Some(libc::ENOATTR)
    }
    #[cfg(not(target_os = "macos"))]
    {
        err.raw_os_error() == Some(libc::ENODATA)
    }
}

unsafe fn sys_get(path: &CString, name: &CString, buf: *mut u8, size: usize) -> isize {
    #[cfg(target_os = "macos")]
    unsafe {
        libc::getxattr(path.as_ptr(), name.as_ptr(), buf.cast(), size, 0, 0)
    }
    #[cfg(not(target_os = "macos"))]
    unsafe {
        libc::getxattr(path.as_ptr(), name.as_ptr(), buf.cast(), size)
    }
}

unsafe fn sys_set(path: &CString, name: &CString, buf: *const u8, size: usize) -> i32 {
    #[cfg(target_os = "macos")]
    unsafe {
        libc::setxattr(path.as_ptr(), name.as_ptr(), buf.cast(), size, 0, 0)
    }
    #[cfg(not(target_os = "macos"))]
    unsafe {
        libc::setxattr(path.as_ptr(), name.as_ptr(), buf.cast(), size, 0)
    }
}

unsafe fn sys_remove(path: &CString, name: &CString) -> i32 {
    #[cfg(target_os = "macos")]
    unsafe {
        libc::removexattr(path.as_ptr(), name.as_ptr(), 0)
    }
    #[cfg(not(target_os = "macos"))]
    unsafe {
        libc::removexattr(path.as_ptr(), name.as_ptr())
    }
}

unsafe fn sys_list(path: &CString, buf: *mut u8, size: usize) -> isize {
    #[cfg(target_os = "macos")]
    unsafe {
        libc::listxattr(path.as_ptr(), buf.cast(), size, 0)
    }
    #[cfg(not(target_os = "macos"))]
    unsafe {
        libc::listxattr(path.as_ptr(), buf.cast(), size)
    }
}

/// Reads the full value of `name`, or `None` when the attribute is absent.
pub fn get(path: &Path, name: &str) -> io::Result<Option<Vec<u8>>> {
    let (path, name) = (cpath(path)?, cname(name)?);
    // Size query then read, retrying if the value grows in between.
    loop {
        let len = unsafe { sys_get(&path, &name, core::ptr::null_mut(), 0) };
        if len < 0 {
            let err = io::Error::last_os_error();
            return if is_missing_attr(&err) { Ok(None) } else { Err(err) };
        }
        let mut buf = vec![0u8; len as usize];
        let read = unsafe { sys_get(&path, &name, buf.as_mut_ptr(), buf.len()) };
        if read < 0 {
            let err = io::Error::last_os_error();
            if err.raw_os_error() == Some(libc::ERANGE) {
                continue;
            }
            return if is_missing_attr(&err) { Ok(None) } else { Err(err) };
        }
        buf.truncate(read as usize);
        return Ok(Some(buf));
    }
}

/// Reports the value size of `name` without reading it.
pub fn size(path: &Path, name: &str) -> io::Result<Option<u64>> {
    let (path, name) = (cpath(path)?, cname(name)?);
    let len = unsafe { sys_get(&path, &name, core::ptr::null_mut(), 0) };
    if len < 0 {
        let err = io::Error::last_os_error();
        return if is_missing_attr(&err) { Ok(None) } else { Err(err) };
    }
    Ok(Some(len as u64))
}

pub fn set(path: &Path, name: &str, value: &[u8]) -> io::Result<()> {
    let (path, name) = (cpath(path)?, cname(name)?);
    let rc = unsafe { sys_set(&path, &name, value.as_ptr(), value.len()) };
    if rc < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Removes `name`; removing an attribute that is not there succeeds.
pub fn remove(path: &Path, name: &str) -> io::Result<()> {
    let (path, name) = (cpath(path)?, cname(name)?);
    let rc = unsafe { sys_remove(&path, &name) };
    if rc < 0 {
        let err = io::Error::last_os_error();
        if !is_missing_attr(&err) {
            return Err(err);
        }
    }
    Ok(())
}

/// Lists attribute names on `path`.
pub fn list(path: &Path) -> io::Result<Vec<String>> {
    let path = cpath(path)?;
    loop {
        let len = unsafe { sys_list(&path, core::ptr::null_mut(), 0) };
        if len < 0 {
            return Err(io::Error::last_os_error());
        }
        if len == 0 {
            return Ok(Vec::new());
        }
        let mut buf = vec![0u8; len as usize];
        let read = unsafe { sys_list(&path, buf.as_mut_ptr(), buf.len()) };
        if read < 0 {
            let err = io::Error::last_os_error();
            if err.raw_os_error() == Some(libc::ERANGE) {
                continue;
            }
            return Err(err);
        }
        buf.truncate(read as usize);
        return Ok(buf
            .split(|&b| b == 0)
            .filter(|s| !s.is_empty())
            .map(|s| String::from_utf8_lossy(s).into_owned())
            .collect());
    }
}

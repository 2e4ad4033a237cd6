/*
 * lib.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * This file is part of mailheaderclean, a set of email header tools.
 *
 * mailheaderclean is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * mailheaderclean is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with mailheaderclean.  If not, see <http://www.gnu.org/licenses/>.
 */

//! C FFI for mailheaderclean core, for embedding in hosts such as shell loadable builtins.
//! Each operation reads a message from a path and writes to an open file descriptor, which is
//! not closed. Status returns are 0 on success and 1 on failure; on failure the message is
//! available from mailheaderclean_last_error.
//! All string parameters are UTF-8 NUL-terminated.

use libc::{c_char, c_int};
use std::ffi::{CStr, CString};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::mem::ManuallyDrop;
use std::path::Path;
use std::ptr;

#[cfg(unix)]
use std::os::unix::io::FromRawFd;

use mailheaderclean_core::message::{extract_body_file, extract_headers_file, filter_headers_file};
use mailheaderclean_core::{MailError, PolicyConfig, RemovalList, RemovalPolicyBuilder};

pub const MAILHEADERCLEAN_SUCCESS: c_int = 0;
pub const MAILHEADERCLEAN_FAILURE: c_int = 1;

thread_local! {
    static LAST_ERROR: std::cell::RefCell<Option<CString>> = std::cell::RefCell::new(None);
}

fn set_last_error(err: &MailError) {
    let msg = CString::new(err.to_string()).unwrap_or_else(|_| CString::new("(error)").unwrap());
    LAST_ERROR.with(|e| *e.borrow_mut() = Some(msg));
}

fn clear_last_error() {
    LAST_ERROR.with(|e| *e.borrow_mut() = None);
}

fn ptr_to_str(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string()) }
}

/// Removal list from the config file and MAILHEADERCLEAN* variables, read on every call so that
/// changes to the shell environment take effect. Never fails: a bad config file falls back to the
/// environment alone, a failed build to an empty list.
fn current_removal_list() -> RemovalList {
    let config = PolicyConfig::resolve(None).unwrap_or_else(|e| {
        set_last_error(&e);
        PolicyConfig::from_env()
    });
    RemovalPolicyBuilder::new(&config).build_or_empty()
}

/// Borrow `fd` as a File without taking ownership (the caller closes it).
#[cfg(unix)]
unsafe fn borrow_fd(fd: c_int) -> ManuallyDrop<File> {
    ManuallyDrop::new(File::from_raw_fd(fd))
}

type Operation = fn(&Path, &mut BufWriter<&File>) -> Result<(), MailError>;

#[cfg(unix)]
unsafe fn run_on_fd(path: *const c_char, fd: c_int, op: Operation) -> c_int {
    let path = match ptr_to_str(path) {
        Some(p) => p,
        None => {
            set_last_error(&MailError::Config("path is null or not valid UTF-8".to_string()));
            return MAILHEADERCLEAN_FAILURE;
        }
    };
    if fd < 0 {
        set_last_error(&MailError::Config(format!("invalid file descriptor {}", fd)));
        return MAILHEADERCLEAN_FAILURE;
    }
    let file = borrow_fd(fd);
    let mut writer = BufWriter::new(&*file);
    let result = op(Path::new(&path), &mut writer).and_then(|_| writer.flush().map_err(MailError::from));
    match result {
        Ok(()) => {
            clear_last_error();
            MAILHEADERCLEAN_SUCCESS
        }
        Err(e) => {
            set_last_error(&e);
            MAILHEADERCLEAN_FAILURE
        }
    }
}

/// Version string (static, do not free).
#[no_mangle]
pub extern "C" fn mailheaderclean_version() -> *const c_char {
    b"0.1.0\0".as_ptr() as *const c_char
}

/// Last error message from a failed call. Valid until next FFI call. Do not free.
#[no_mangle]
pub extern "C" fn mailheaderclean_last_error() -> *const c_char {
    LAST_ERROR.with(|e| {
        e.borrow()
            .as_ref()
            .map(|s| s.as_ptr())
            .unwrap_or(ptr::null())
    })
}

/// Free a string returned by mailheaderclean_policy_list. No-op if ptr is NULL.
#[no_mangle]
pub unsafe extern "C" fn mailheaderclean_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        let _ = CString::from_raw(ptr);
    }
}

/// Write the unfolded header block of the message at `path` to `fd`.
#[cfg(unix)]
#[no_mangle]
pub unsafe extern "C" fn mailheader_extract_fd(path: *const c_char, fd: c_int) -> c_int {
    run_on_fd(path, fd, |p, w| extract_headers_file(p, w))
}

/// Write the body (everything after the first blank line) of the message at `path` to `fd`.
#[cfg(unix)]
#[no_mangle]
pub unsafe extern "C" fn mailmessage_extract_fd(path: *const c_char, fd: c_int) -> c_int {
    run_on_fd(path, fd, |p, w| extract_body_file(p, w))
}

/// Write the message at `path` to `fd` with non-essential headers removed. The policy is built
/// from the configuration file and the MAILHEADERCLEAN* environment variables at call time.
#[cfg(unix)]
#[no_mangle]
pub unsafe extern "C" fn mailheaderclean_filter_fd(path: *const c_char, fd: c_int) -> c_int {
    run_on_fd(path, fd, |p, w| {
        let removal = current_removal_list();
        filter_headers_file(p, w, &removal).map(|_| ())
    })
}

/// Active removal list, one pattern per line (each line ends in \n). Caller frees with
/// mailheaderclean_free_string. Returns NULL only if the list contains a NUL byte.
#[no_mangle]
pub extern "C" fn mailheaderclean_policy_list() -> *mut c_char {
    let removal = current_removal_list();
    let mut text = String::new();
    for pattern in removal.iter() {
        text.push_str(pattern);
        text.push('\n');
    }
    match CString::new(text) {
        Ok(s) => s.into_raw(),
        Err(_) => {
            set_last_error(&MailError::Config("removal pattern contains NUL".to_string()));
            ptr::null_mut()
        }
    }
}

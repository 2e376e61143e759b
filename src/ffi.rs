//! Ownership guards for memory crossing the C ABI.
//!
//! The engine hands back two kinds of heap buffers: error strings written
//! through a `char**` out-parameter and values returned by `rocksdb_get`.
//! Both belong to the caller and must be released with `rocksdb_free`
//! exactly once. The guards here copy what they need into Rust-owned memory
//! and free the native buffer on drop, on every path out of the call.

use std::{
    ffi::{c_char, c_void, CStr, CString},
    path::Path,
    ptr, slice,
};

use librocksdb_sys as sys;

use crate::{
    error::{Error, Result},
    logging::rockwrap_log,
};

/// Receiver for the engine's `char** errptr` out-parameter.
pub(crate) struct ErrorSlot {
    ptr: *mut c_char,
}

impl ErrorSlot {
    pub(crate) fn new() -> Self {
        Self {
            ptr: ptr::null_mut(),
        }
    }

    /// Pointer to pass as `errptr`. Valid while `self` is borrowed.
    pub(crate) fn as_out(&mut self) -> *mut *mut c_char {
        &mut self.ptr
    }

    /// Translates the slot into a `Result`, releasing any native string.
    pub(crate) fn into_result(self) -> Result<()> {
        if self.ptr.is_null() {
            return Ok(());
        }
        // SAFETY: a non-null errptr is a NUL-terminated string allocated by
        // the engine and still owned by this slot.
        let message = unsafe { CStr::from_ptr(self.ptr) }
            .to_string_lossy()
            .into_owned();
        rockwrap_log!(
            log::Level::Debug,
            "ffi",
            "engine_error",
            "message={:?}",
            message
        );
        Err(Error::Engine(message))
    }
}

impl Drop for ErrorSlot {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            // SAFETY: engine-allocated, freed once; the pointer is nulled after.
            unsafe { sys::rocksdb_free(self.ptr.cast::<c_void>()) };
            self.ptr = ptr::null_mut();
        }
    }
}

/// An engine-allocated byte buffer, freed on drop.
pub(crate) struct NativeBuf {
    ptr: *mut c_char,
    len: usize,
}

impl NativeBuf {
    /// Takes ownership of `ptr`. Returns `None` when the engine returned null.
    ///
    /// # Safety
    /// `ptr` must be null or point to `len` readable bytes allocated by the
    /// engine, and must not be freed by anyone else.
    pub(crate) unsafe fn from_raw(ptr: *mut c_char, len: usize) -> Option<Self> {
        if ptr.is_null() {
            None
        } else {
            Some(Self { ptr, len })
        }
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        // SAFETY: guaranteed by `from_raw`.
        unsafe { slice::from_raw_parts(self.ptr.cast::<u8>(), self.len) }
    }

    pub(crate) fn to_vec(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

impl Drop for NativeBuf {
    fn drop(&mut self) {
        // SAFETY: non-null by construction, engine-allocated, freed once.
        unsafe { sys::rocksdb_free(self.ptr.cast::<c_void>()) };
    }
}

/// Borrowed key or value as the engine's pointer+length pair.
///
/// Empty slices yield a dangling but non-null pointer with length 0, which
/// the engine never dereferences.
pub(crate) fn raw_bytes(bytes: &[u8]) -> (*const c_char, usize) {
    (bytes.as_ptr().cast::<c_char>(), bytes.len())
}

/// Converts a filesystem path into the NUL-terminated form `rocksdb_open` takes.
pub(crate) fn path_to_cstring(path: &Path) -> Result<CString> {
    #[cfg(unix)]
    let bytes = {
        use std::os::unix::ffi::OsStrExt;
        path.as_os_str().as_bytes().to_vec()
    };
    #[cfg(not(unix))]
    let bytes = path
        .to_str()
        .ok_or_else(|| Error::InvalidPath(path.to_path_buf()))?
        .as_bytes()
        .to_vec();

    CString::new(bytes).map_err(|_| Error::InvalidPath(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slot_is_ok() {
        assert_eq!(ErrorSlot::new().into_result(), Ok(()));
    }

    #[test]
    fn engine_error_string_is_translated() {
        let dir = tempfile::tempdir().unwrap();
        let missing = path_to_cstring(&dir.path().join("missing")).unwrap();

        // SAFETY: options are created and destroyed locally; open fails so
        // no database handle is returned.
        unsafe {
            let opts = sys::rocksdb_options_create();
            sys::rocksdb_options_set_create_if_missing(opts, 0);
            let mut slot = ErrorSlot::new();
            let db = sys::rocksdb_open(opts, missing.as_ptr(), slot.as_out());
            sys::rocksdb_options_destroy(opts);

            assert!(db.is_null());
            let err = slot.into_result().unwrap_err();
            assert!(err.engine_message().is_some_and(|m| !m.is_empty()));
        }
    }

    #[test]
    fn null_native_buffer_is_absent() {
        // SAFETY: null is always accepted.
        assert!(unsafe { NativeBuf::from_raw(ptr::null_mut(), 0) }.is_none());
    }

    #[test]
    fn empty_slice_keeps_non_null_pointer() {
        let (ptr, len) = raw_bytes(&[]);
        assert!(!ptr.is_null());
        assert_eq!(len, 0);

        let (_, len) = raw_bytes(b"foo");
        assert_eq!(len, 3);
    }

    #[test]
    fn interior_nul_path_is_rejected() {
        let err = path_to_cstring(Path::new("bad\0path")).unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));
    }
}

//! The database handle.
//!
//! [`DB`] owns one engine instance plus the default options objects used by
//! calls that do not pass their own. Keys and values cross the C ABI as
//! borrowed pointer+length pairs; anything the engine allocates is copied
//! into Rust memory and released before the call returns.

use std::{
    fmt,
    path::{Path, PathBuf},
    ptr::NonNull,
};

use librocksdb_sys as sys;

use crate::{
    error::{Error, Result},
    ffi::{self, ErrorSlot, NativeBuf},
    logging::rockwrap_log,
    option::{DbOptions, ReadOptions, WriteOptions},
};

/// Handle to a RocksDB instance.
///
/// Created closed by [`DB::new`]; [`DB::open`] attaches an engine instance and
/// [`DB::close`] (or dropping the handle) releases it. Key/value operations
/// on a closed handle return [`Error::NotOpen`].
pub struct DB {
    inner: Option<NonNull<sys::rocksdb_t>>,
    path: Option<PathBuf>,
    db_opts: DbOptions,
    read_opts: ReadOptions,
    write_opts: WriteOptions,
}

impl DB {
    /// Allocate a closed handle with default options. Performs no I/O.
    pub fn new() -> Self {
        Self {
            inner: None,
            path: None,
            db_opts: DbOptions::new(),
            read_opts: ReadOptions::new(),
            write_opts: WriteOptions::new(),
        }
    }

    /// Open the database at `path`, creating it first when `create_if_missing`
    /// is set.
    ///
    /// # Errors
    /// [`Error::AlreadyOpen`] if this handle is open, [`Error::InvalidPath`]
    /// if `path` contains a NUL byte, or [`Error::Engine`] with the engine's
    /// message (missing database, lock held by another process, corruption).
    pub fn open(&mut self, path: impl AsRef<Path>, create_if_missing: bool) -> Result<()> {
        if self.inner.is_some() {
            return Err(Error::AlreadyOpen);
        }
        let path = path.as_ref();
        let c_path = ffi::path_to_cstring(path)?;

        self.db_opts.set_create_if_missing(create_if_missing);

        let mut err = ErrorSlot::new();
        // SAFETY: options and path outlive the call; errptr points at `err`.
        let raw = unsafe { sys::rocksdb_open(self.db_opts.as_ptr(), c_path.as_ptr(), err.as_out()) };
        if let Err(e) = err.into_result() {
            rockwrap_log!(
                log::Level::Warn,
                "db",
                "db_open_failed",
                "path={} create_if_missing={} error={:?}",
                path.display(),
                create_if_missing,
                e.to_string(),
            );
            return Err(e);
        }
        let handle = NonNull::new(raw)
            .ok_or_else(|| Error::Engine("rocksdb_open returned no handle".to_string()))?;

        self.inner = Some(handle);
        self.path = Some(path.to_path_buf());
        rockwrap_log!(
            log::Level::Info,
            "db",
            "db_open",
            "path={} create_if_missing={}",
            path.display(),
            self.db_opts.create_if_missing(),
        );
        Ok(())
    }

    /// Release the engine instance. Closing a closed handle does nothing.
    ///
    /// The handle can be opened again afterwards.
    pub fn close(&mut self) {
        if let Some(handle) = self.inner.take() {
            // SAFETY: `handle` came from `rocksdb_open` and is closed once,
            // having been taken out of `inner`.
            unsafe { sys::rocksdb_close(handle.as_ptr()) };
            let path = self.path.take().unwrap_or_default();
            rockwrap_log!(
                log::Level::Debug,
                "db",
                "db_close",
                "path={}",
                path.display(),
            );
        }
    }

    /// Whether an engine instance is attached.
    pub fn is_open(&self) -> bool {
        self.inner.is_some()
    }

    /// Path passed to the successful `open`, while the handle is open.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Set `key` to `value` using the handle's default write options.
    pub fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.put_opt(key, value, &self.write_opts)
    }

    /// Set `key` to `value` using caller-supplied write options.
    pub fn put_opt(&self, key: &[u8], value: &[u8], opts: &WriteOptions) -> Result<()> {
        let db = self.raw()?;
        let (k_ptr, k_len) = ffi::raw_bytes(key);
        let (v_ptr, v_len) = ffi::raw_bytes(value);

        let mut err = ErrorSlot::new();
        // SAFETY: `db` is open; key, value and options are borrowed for the
        // duration of the call.
        unsafe {
            sys::rocksdb_put(
                db,
                opts.as_ptr(),
                k_ptr,
                k_len,
                v_ptr,
                v_len,
                err.as_out(),
            )
        };
        err.into_result()
    }

    /// Value stored under `key`, using the handle's default read options.
    ///
    /// Returns `Ok(None)` when the key is absent; an empty stored value is
    /// `Ok(Some(vec![]))`.
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.get_opt(key, &self.read_opts)
    }

    /// Value stored under `key`, using caller-supplied read options.
    pub fn get_opt(&self, key: &[u8], opts: &ReadOptions) -> Result<Option<Vec<u8>>> {
        let db = self.raw()?;
        let (k_ptr, k_len) = ffi::raw_bytes(key);

        let mut err = ErrorSlot::new();
        let mut v_len = 0usize;
        // SAFETY: `db` is open; key and options are borrowed for the call;
        // `v_len` and `err` are valid out-parameters.
        let value = unsafe {
            let raw = sys::rocksdb_get(db, opts.as_ptr(), k_ptr, k_len, &mut v_len, err.as_out());
            NativeBuf::from_raw(raw, v_len)
        };
        err.into_result()?;
        Ok(value.map(|buf| buf.to_vec()))
    }

    /// Remove `key` using the handle's default write options.
    ///
    /// Removing an absent key succeeds.
    pub fn delete(&self, key: &[u8]) -> Result<()> {
        self.delete_opt(key, &self.write_opts)
    }

    /// Remove `key` using caller-supplied write options.
    pub fn delete_opt(&self, key: &[u8], opts: &WriteOptions) -> Result<()> {
        let db = self.raw()?;
        let (k_ptr, k_len) = ffi::raw_bytes(key);

        let mut err = ErrorSlot::new();
        // SAFETY: `db` is open; key and options are borrowed for the call.
        unsafe { sys::rocksdb_delete(db, opts.as_ptr(), k_ptr, k_len, err.as_out()) };
        err.into_result()
    }

    fn raw(&self) -> Result<*mut sys::rocksdb_t> {
        self.inner.map(NonNull::as_ptr).ok_or(Error::NotOpen)
    }
}

impl Default for DB {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DB {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for DB {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DB")
            .field("path", &self.path)
            .field("open", &self.is_open())
            .field("db_opts", &self.db_opts)
            .finish()
    }
}

//! Owned wrappers around the engine's options objects.
//!
//! Each wrapper allocates its native object on construction and destroys it
//! exactly once on drop. Setters consume and return `self`.

use std::{
    ffi::{c_int, c_uchar},
    fmt,
    ptr::NonNull,
};

use librocksdb_sys as sys;

/// Engine-level options used by `open`.
pub(crate) struct DbOptions {
    inner: NonNull<sys::rocksdb_options_t>,
    create_if_missing: bool,
}

impl DbOptions {
    pub(crate) fn new() -> Self {
        // SAFETY: no preconditions; ownership passes to the wrapper.
        let inner = NonNull::new(unsafe { sys::rocksdb_options_create() })
            .expect("rocksdb could not allocate options");
        Self {
            inner,
            create_if_missing: false,
        }
    }

    pub(crate) fn set_create_if_missing(&mut self, create_if_missing: bool) {
        // SAFETY: `inner` is live until drop.
        unsafe {
            sys::rocksdb_options_set_create_if_missing(
                self.inner.as_ptr(),
                c_uchar::from(create_if_missing),
            )
        };
        self.create_if_missing = create_if_missing;
    }

    pub(crate) fn create_if_missing(&self) -> bool {
        self.create_if_missing
    }

    pub(crate) fn as_ptr(&self) -> *const sys::rocksdb_options_t {
        self.inner.as_ptr()
    }
}

impl Drop for DbOptions {
    fn drop(&mut self) {
        // SAFETY: created in `new`, destroyed once here.
        unsafe { sys::rocksdb_options_destroy(self.inner.as_ptr()) };
    }
}

impl fmt::Debug for DbOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbOptions")
            .field("create_if_missing", &self.create_if_missing)
            .finish()
    }
}

/// Options applied to a single read.
///
/// A handle keeps a default instance for [`crate::DB::get`]; pass your own to
/// [`crate::DB::get_opt`] to override it for one call.
pub struct ReadOptions {
    inner: NonNull<sys::rocksdb_readoptions_t>,
    verify_checksums: bool,
    fill_cache: bool,
}

impl ReadOptions {
    /// Engine defaults: checksums verified, blocks added to the cache.
    pub fn new() -> Self {
        // SAFETY: no preconditions; ownership passes to the wrapper.
        let inner = NonNull::new(unsafe { sys::rocksdb_readoptions_create() })
            .expect("rocksdb could not allocate read options");
        Self {
            inner,
            verify_checksums: true,
            fill_cache: true,
        }
    }

    /// Verify block checksums on every read.
    pub fn verify_checksums(mut self, verify_checksums: bool) -> Self {
        // SAFETY: `inner` is live until drop.
        unsafe {
            sys::rocksdb_readoptions_set_verify_checksums(
                self.inner.as_ptr(),
                c_uchar::from(verify_checksums),
            )
        };
        self.verify_checksums = verify_checksums;
        self
    }

    /// Whether blocks read by this call populate the block cache.
    pub fn fill_cache(mut self, fill_cache: bool) -> Self {
        // SAFETY: `inner` is live until drop.
        unsafe {
            sys::rocksdb_readoptions_set_fill_cache(self.inner.as_ptr(), c_uchar::from(fill_cache))
        };
        self.fill_cache = fill_cache;
        self
    }

    /// Current checksum verification setting.
    pub fn is_verify_checksums(&self) -> bool {
        self.verify_checksums
    }

    /// Current cache fill setting.
    pub fn is_fill_cache(&self) -> bool {
        self.fill_cache
    }

    pub(crate) fn as_ptr(&self) -> *const sys::rocksdb_readoptions_t {
        self.inner.as_ptr()
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ReadOptions {
    fn drop(&mut self) {
        // SAFETY: created in `new`, destroyed once here.
        unsafe { sys::rocksdb_readoptions_destroy(self.inner.as_ptr()) };
    }
}

impl fmt::Debug for ReadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadOptions")
            .field("verify_checksums", &self.verify_checksums)
            .field("fill_cache", &self.fill_cache)
            .finish()
    }
}

/// Options applied to a single put or delete.
///
/// A handle keeps a default instance for [`crate::DB::put`] and
/// [`crate::DB::delete`]; the `_opt` variants take an override.
pub struct WriteOptions {
    inner: NonNull<sys::rocksdb_writeoptions_t>,
    sync: bool,
    disable_wal: bool,
}

impl WriteOptions {
    /// Engine defaults: no fsync per write, WAL enabled.
    pub fn new() -> Self {
        // SAFETY: no preconditions; ownership passes to the wrapper.
        let inner = NonNull::new(unsafe { sys::rocksdb_writeoptions_create() })
            .expect("rocksdb could not allocate write options");
        Self {
            inner,
            sync: false,
            disable_wal: false,
        }
    }

    /// Fsync the WAL before the write returns.
    pub fn sync(mut self, sync: bool) -> Self {
        // SAFETY: `inner` is live until drop.
        unsafe { sys::rocksdb_writeoptions_set_sync(self.inner.as_ptr(), c_uchar::from(sync)) };
        self.sync = sync;
        self
    }

    /// Skip the WAL for this write. Unflushed data is lost on crash.
    pub fn disable_wal(mut self, disable_wal: bool) -> Self {
        // SAFETY: `inner` is live until drop.
        unsafe {
            sys::rocksdb_writeoptions_disable_WAL(self.inner.as_ptr(), c_int::from(disable_wal))
        };
        self.disable_wal = disable_wal;
        self
    }

    /// Current sync setting.
    pub fn is_sync(&self) -> bool {
        self.sync
    }

    /// Current WAL setting.
    pub fn is_wal_disabled(&self) -> bool {
        self.disable_wal
    }

    pub(crate) fn as_ptr(&self) -> *const sys::rocksdb_writeoptions_t {
        self.inner.as_ptr()
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for WriteOptions {
    fn drop(&mut self) {
        // SAFETY: created in `new`, destroyed once here.
        unsafe { sys::rocksdb_writeoptions_destroy(self.inner.as_ptr()) };
    }
}

impl fmt::Debug for WriteOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteOptions")
            .field("sync", &self.sync)
            .field("disable_wal", &self.disable_wal)
            .finish()
    }
}

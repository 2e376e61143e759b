#![deny(missing_docs)]
//! Handle-based binding over the RocksDB C API.
//!
//! The crate exposes a deliberately small surface: open a database, put, get
//! and delete raw byte keys, close it. Storage, compaction, caching and
//! durability are the engine's; this layer only manages the lifetime of the
//! native objects and turns the engine's error strings into [`Error`] values.
//!
//! ```no_run
//! use rockwrap::DB;
//!
//! # fn main() -> rockwrap::Result<()> {
//! let mut db = DB::new();
//! db.open("/tmp/rockwrap-demo", true)?;
//!
//! db.put(b"foo", b"bar")?;
//! assert_eq!(db.get(b"foo")?, Some(b"bar".to_vec()));
//!
//! db.delete(b"foo")?;
//! assert_eq!(db.get(b"foo")?, None);
//!
//! db.close();
//! # Ok(())
//! # }
//! ```

mod ffi;
mod logging;

/// The database handle and its key/value operations.
pub mod db;

/// Error type and result alias.
pub mod error;

/// Read and write options passed per call.
pub mod option;

pub use crate::{
    db::DB,
    error::{Error, Result},
    option::{ReadOptions, WriteOptions},
};

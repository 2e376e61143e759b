use std::path::PathBuf;

use rockwrap::{Error, DB};
use tempfile::TempDir;

fn temp_db_path() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join(format!("rockwrap-test-{}", fastrand::u64(..)));
    (dir, path)
}

#[test]
fn open_missing_without_create_fails() {
    let (_dir, path) = temp_db_path();
    let mut db = DB::new();

    let err = db.open(&path, false).expect_err("missing db must not open");
    assert!(matches!(err, Error::Engine(_)));
    assert!(!db.is_open());
}

#[test]
fn open_with_create_builds_directory() {
    let (_dir, path) = temp_db_path();
    let mut db = DB::new();

    db.open(&path, false).expect_err("missing db must not open");
    db.open(&path, true).expect("open with create");
    assert!(path.is_dir());
}

#[test]
fn data_survives_close_and_reopen() {
    let (_dir, path) = temp_db_path();

    let mut db = DB::new();
    db.open(&path, true).expect("open");
    db.put(b"persisted", b"value").expect("put");
    db.close();
    assert_eq!(db.get(b"persisted"), Err(Error::NotOpen));

    db.open(&path, false).expect("reopen existing");
    assert_eq!(
        db.get(b"persisted").expect("get"),
        Some(b"value".to_vec())
    );
}

#[test]
fn reopen_through_fresh_handle_after_drop() {
    let (_dir, path) = temp_db_path();
    {
        let mut db = DB::new();
        db.open(&path, true).expect("open");
        db.put(b"k", b"v").expect("put");
    }

    let mut db = DB::default();
    db.open(&path, false).expect("reopen");
    assert_eq!(db.get(b"k").expect("get"), Some(b"v".to_vec()));
}

#[test]
fn second_handle_on_locked_path_reports_engine_error() {
    let (_dir, path) = temp_db_path();
    let mut first = DB::new();
    first.open(&path, true).expect("open");

    let mut second = DB::new();
    let err = second.open(&path, false).expect_err("lock is held");
    assert!(err.engine_message().is_some());
    assert!(!second.is_open());
}

#[test]
fn use_after_close_is_reported() {
    let (_dir, path) = temp_db_path();
    let mut db = DB::new();
    db.open(&path, true).expect("open");
    db.close();

    assert_eq!(db.put(b"k", b"v"), Err(Error::NotOpen));
    assert_eq!(db.delete(b"k"), Err(Error::NotOpen));
    assert_eq!(db.get(b"k"), Err(Error::NotOpen));
}

#[test]
fn double_open_is_reported() {
    let (_dir, path) = temp_db_path();
    let mut db = DB::new();
    db.open(&path, true).expect("open");

    assert_eq!(db.open(&path, true), Err(Error::AlreadyOpen));
    assert!(db.is_open());
}

#[cfg(unix)]
#[test]
fn path_with_nul_is_rejected() {
    let mut db = DB::new();
    let err = db.open("bad\0path", true).expect_err("nul in path");
    assert!(matches!(err, Error::InvalidPath(_)));
}

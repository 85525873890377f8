use std::fs;

use summary_engine::{ensure_save_dir, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_save_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("nested").join("out");
    assert!(!new_dir.exists());
    ensure_save_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn file_in_place_of_dir_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    assert!(ensure_save_dir(&file_path).is_err());

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write("meeting.md", "data").is_err());
    assert!(!file_path.with_file_name("meeting.md").exists());
}

#[test]
fn atomic_write_leaves_only_the_target() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let path = writer.write("meeting.md", "hello").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "hello");

    let names: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("meeting.md")]);
}

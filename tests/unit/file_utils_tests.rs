/*!
 * Tests for file utility functions
 */

use std::path::Path;
use anyhow::Result;
use glossalign::file_utils::{FileManager, ALIGNED_INFIX};
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.txt", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::dir_exists(&test_file));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

#[test]
fn test_generate_output_path_withExtension_shouldInsertInfixBeforeExtension() {
    let output_path = FileManager::generate_output_path(Path::new("/tmp/corpus/text.txt"), ALIGNED_INFIX);
    assert_eq!(output_path, Path::new("/tmp/corpus/text.aligned.txt"));
}

#[test]
fn test_generate_output_path_withoutExtension_shouldAppendInfix() {
    let output_path = FileManager::generate_output_path(Path::new("notes"), ALIGNED_INFIX);
    assert_eq!(output_path, Path::new("notes.aligned"));
}

#[test]
fn test_is_generated_output_withAlignedFile_shouldReturnTrue() {
    assert!(FileManager::is_generated_output("text.aligned.txt", ALIGNED_INFIX));
    assert!(!FileManager::is_generated_output("text.txt", ALIGNED_INFIX));
    assert!(!FileManager::is_generated_output("aligned.txt", ALIGNED_INFIX));
}

#[test]
fn test_ensure_dir_withNestedPath_shouldCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b");

    FileManager::ensure_dir(&nested)?;

    assert!(FileManager::dir_exists(&nested));
    Ok(())
}

#[test]
fn test_find_files_withMixedExtensions_shouldReturnMatchingFilesSorted() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "b.txt", "")?;
    common::create_test_file(temp_dir.path(), "a.TXT", "")?;
    common::create_test_file(temp_dir.path(), "c.srt", "")?;
    common::create_test_file(temp_dir.path(), "sub/d.txt", "")?;

    let files = FileManager::find_files(temp_dir.path(), ".txt")?;
    let names: Vec<String> = files
        .iter()
        .map(|f| f.file_name().unwrap().to_string_lossy().to_string())
        .collect();

    assert_eq!(names, vec!["a.TXT", "b.txt", "d.txt"]);
    Ok(())
}

#[test]
fn test_write_to_file_withMissingParent_shouldCreateItAndRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out").join("text.txt");

    FileManager::write_to_file(&path, "\\t a\n")?;

    assert_eq!(FileManager::read_to_string(&path)?, "\\t a\n");
    Ok(())
}

#[test]
fn test_read_to_string_withMissingFile_shouldNameThePath() {
    let err = FileManager::read_to_string("does/not/exist.txt").unwrap_err();
    assert!(format!("{:#}", err).contains("exist.txt"));
}

/*!
 * End-to-end tests for realigning files and folders
 */

use std::fs;
use anyhow::Result;
use glossalign::app_controller::{Controller, RunStatus};
use glossalign::errors::AppError;
use glossalign::file_utils::{FileManager, ALIGNED_INFIX};
use glossalign::Config;
use crate::common::{self, SAMPLE_GLOSS, SAMPLE_GLOSS_ALIGNED};

#[test]
fn test_runFolder_withNestedTextFiles_shouldWriteAlignedSiblings() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let first = common::create_test_gloss(temp_dir.path(), "a.txt")?;
    let second = common::create_test_gloss(temp_dir.path(), "sub/b.txt")?;
    common::create_test_file(temp_dir.path(), "notes.md", SAMPLE_GLOSS)?;
    let controller = Controller::with_config(Config::default())?;

    let summary = controller.run_folder(temp_dir.path(), "txt", false, false)?;

    assert_eq!(summary.written_count(), 2);
    assert!(!summary.has_failures());
    for input in [first, second] {
        let output = FileManager::generate_output_path(&input, ALIGNED_INFIX);
        assert_eq!(fs::read_to_string(output)?, SAMPLE_GLOSS_ALIGNED);
    }
    assert!(!temp_dir.path().join("notes.aligned.md").exists());
    Ok(())
}

#[test]
fn test_runFolder_runTwice_shouldSkipOutputsAndNotRealignThem() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_gloss(temp_dir.path(), "a.txt")?;
    let controller = Controller::with_config(Config::default())?;

    controller.run_folder(temp_dir.path(), "txt", false, false)?;
    let summary = controller.run_folder(temp_dir.path(), "txt", false, false)?;

    // a.aligned.txt is not picked up as an input
    assert_eq!(summary.processed.len(), 1);
    assert_eq!(summary.processed[0].status, RunStatus::SkippedExisting);
    assert!(!temp_dir.path().join("a.aligned.aligned.txt").exists());

    let summary = controller.run_folder(temp_dir.path(), "txt", true, false)?;
    assert_eq!(summary.written_count(), 1);
    Ok(())
}

#[test]
fn test_runFolder_withMalformedFile_shouldContinueAndCollectFailure() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "bad.txt", "\\t foo\n")?;
    let good = common::create_test_file(temp_dir.path(), "good.txt", "\\t:a b\n\\gl:xxx y\n")?;
    let mut config = Config::default();
    config.tiers.marker_delimiter = ":".to_string();
    let controller = Controller::with_config(config)?;

    let summary = controller.run_folder(temp_dir.path(), "txt", false, false)?;

    assert_eq!(summary.failed.len(), 1);
    assert!(summary.failed[0].0.ends_with("bad.txt"));
    assert!(summary.failed[0].1.contains("Malformed line 1"));
    assert_eq!(summary.written_count(), 1);
    let output = FileManager::generate_output_path(&good, ALIGNED_INFIX);
    assert_eq!(fs::read_to_string(output)?, "\\t: a   b\n\\gl:xxx y\n");
    Ok(())
}

#[test]
fn test_runFolder_withCheckOnly_shouldWriteNothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_gloss(temp_dir.path(), "a.txt")?;
    common::create_test_file(temp_dir.path(), "b.txt", SAMPLE_GLOSS_ALIGNED)?;
    let controller = Controller::with_config(Config::default())?;

    let summary = controller.run_folder(temp_dir.path(), "txt", false, true)?;

    let changed: Vec<_> = summary.processed.iter().filter(|r| r.report.has_changes()).collect();
    assert_eq!(changed.len(), 1);
    assert!(changed[0].input.ends_with("a.txt"));
    assert!(!temp_dir.path().join("a.aligned.txt").exists());
    Ok(())
}

#[test]
fn test_runFolder_withEmptyDirectory_shouldReturnEmptySummary() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(Config::default())?;

    let summary = controller.run_folder(temp_dir.path(), "txt", false, false)?;

    assert!(summary.processed.is_empty());
    assert!(!summary.has_failures());
    Ok(())
}

#[test]
fn test_runFolder_withMissingDirectory_shouldReturnFileError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(Config::default())?;

    let result = controller.run_folder(&temp_dir.path().join("missing"), "txt", false, false);

    assert!(matches!(result, Err(AppError::File(_))));
    Ok(())
}

#[test]
fn test_run_withSavedConfig_shouldApplyCustomMarkers() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config_path = temp_dir.path().join("glossalign.json");
    common::config_with_markers(&["\\tx", "\\ge"]).save_to_path(&config_path)?;
    let input = common::create_test_file(temp_dir.path(), "text.txt", "\\tx ba\u{301}ra ka\n\\ge stone DEM\n")?;

    let config = Config::load_from_path(&config_path)?.unwrap_or_default();
    let controller = Controller::with_config(config)?;
    let output = temp_dir.path().join("out.txt");
    controller.run(&input, &output, false)?;

    assert_eq!(fs::read_to_string(output)?, "\\tx ba\u{301}ra  ka\n\\ge stone DEM\n");
    Ok(())
}

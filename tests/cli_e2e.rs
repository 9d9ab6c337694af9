//! End-to-end CLI tests for wa2mm.
//!
//! These tests run the actual binary against transcript fixtures written
//! into a temporary directory and check both the console output and the
//! generated JSONL.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Creates a temporary directory populated with transcript fixtures.
fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");

    let transcript = "\
25.12.2023, 09:30 - Alice: Merry Christmas everyone! 🎄
25.12.2023, 09:31 - Bob: Thanks Alice!
25.12.2023, 09:32 - Bob: IMG-20231225-WA0001.jpg (file attached)
25.12.2023, 09:35 - Alice: ask @491701234567 about dinner
";
    fs::write(dir.path().join("chat.txt"), transcript).unwrap();

    // Unicode-heavy transcript
    let unicode = "\
01.01.2024, 12:00 - Алиса: С Новым годом! 🎉
01.01.2024, 12:01 - 田中: あけまして 🎊
";
    fs::write(dir.path().join("unicode.txt"), unicode).unwrap();

    // Empty transcript
    fs::write(dir.path().join("empty.txt"), "").unwrap();

    dir
}

fn wa2mm_cmd() -> Command {
    let cmd = std::process::Command::new(env!("CARGO_BIN_EXE_wa2mm"));
    Command::from_std(cmd)
}

fn output_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

mod basic_functionality {
    use super::*;

    #[test]
    fn test_basic_conversion() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("chat.txt");
        let output = output_path(&fixtures, "out.jsonl");

        wa2mm_cmd()
            .args([
                input.to_str().unwrap(),
                "--team",
                "family",
                "--channel",
                "holidays",
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Done"))
            .stdout(predicate::str::contains("Posts:"));

        assert!(output.exists());
        let content = fs::read_to_string(&output).unwrap();
        assert!(content.contains("Merry Christmas"));
    }

    #[test]
    fn test_version_line_comes_first() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("chat.txt");
        let output = output_path(&fixtures, "out.jsonl");

        wa2mm_cmd()
            .args([
                input.to_str().unwrap(),
                "--team",
                "family",
                "--channel",
                "holidays",
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success();

        let content = fs::read_to_string(&output).unwrap();
        let first: serde_json::Value =
            serde_json::from_str(content.lines().next().unwrap()).unwrap();
        assert_eq!(first["type"], "version");
        assert_eq!(first["version"], 1);
    }

    #[test]
    fn test_every_line_is_json() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("chat.txt");
        let output = output_path(&fixtures, "out.jsonl");

        wa2mm_cmd()
            .args([
                input.to_str().unwrap(),
                "--team",
                "family",
                "--channel",
                "holidays",
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success();

        let content = fs::read_to_string(&output).unwrap();
        for line in content.lines() {
            let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(parsed.is_object());
            assert!(parsed.get("type").is_some());
        }
    }

    #[test]
    fn test_team_and_channel_applied() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("chat.txt");
        let output = output_path(&fixtures, "out.jsonl");

        wa2mm_cmd()
            .args([
                input.to_str().unwrap(),
                "--team",
                "family",
                "--channel",
                "holidays",
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success();

        let content = fs::read_to_string(&output).unwrap();
        let post: serde_json::Value =
            serde_json::from_str(content.lines().nth(1).unwrap()).unwrap();
        assert_eq!(post["post"]["team"], "family");
        assert_eq!(post["post"]["channel"], "holidays");
    }
}

// ============================================================================
// Mapping Tests
// ============================================================================

mod mappings {
    use super::*;

    #[test]
    fn test_user_mapping_applied() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("chat.txt");
        let output = output_path(&fixtures, "out.jsonl");

        wa2mm_cmd()
            .args([
                input.to_str().unwrap(),
                "--team",
                "family",
                "--channel",
                "holidays",
                "--users",
                r#""Alice"="alice";"Bob"="bob";"#,
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("2 users"));

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.contains(r#""user":"alice""#));
        assert!(content.contains(r#""user":"bob""#));
        // the unmapped phone mention in the body still falls back, so only
        // the author field may be checked here
        assert!(!content.contains(r#""user":"unknown-user""#));
    }

    #[test]
    fn test_unmapped_user_falls_back() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("chat.txt");
        let output = output_path(&fixtures, "out.jsonl");

        wa2mm_cmd()
            .args([
                input.to_str().unwrap(),
                "--team",
                "family",
                "--channel",
                "holidays",
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("fell back"))
            .stdout(predicate::str::contains("unmapped user 'Alice'"));

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.contains("unknown-user"));
    }

    #[test]
    fn test_phone_mapping_applied() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("chat.txt");
        let output = output_path(&fixtures, "out.jsonl");

        wa2mm_cmd()
            .args([
                input.to_str().unwrap(),
                "--team",
                "family",
                "--channel",
                "holidays",
                "--users",
                r#""Alice"="alice";"Bob"="bob";"#,
                "--phones",
                r#""491701234567"="charlie";"#,
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success();

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.contains("@charlie"));
        assert!(!content.contains("@491701234567"));
    }

    #[test]
    fn test_emoji_mapping_applied() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("chat.txt");
        let output = output_path(&fixtures, "out.jsonl");

        wa2mm_cmd()
            .args([
                input.to_str().unwrap(),
                "--team",
                "family",
                "--channel",
                "holidays",
                "--emojis",
                r#""🎄"=":christmas_tree:";"#,
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success();

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.contains(":christmas_tree:"));
    }
}

// ============================================================================
// Attachment Tests
// ============================================================================

mod attachments {
    use super::*;

    #[test]
    fn test_attachment_paths_in_output() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("chat.txt");
        let output = output_path(&fixtures, "out.jsonl");

        wa2mm_cmd()
            .args([
                input.to_str().unwrap(),
                "--team",
                "family",
                "--channel",
                "holidays",
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success();

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.contains("data/IMG-20231225-WA0001.jpg"));
    }

    #[test]
    fn test_missing_media_is_reported() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("chat.txt");
        let output = output_path(&fixtures, "out.jsonl");
        let media_dir = fixtures.path().join("media");
        fs::create_dir_all(&media_dir).unwrap();

        wa2mm_cmd()
            .args([
                input.to_str().unwrap(),
                "--team",
                "family",
                "--channel",
                "holidays",
                "--media-dir",
                media_dir.to_str().unwrap(),
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("missing"))
            .stdout(predicate::str::contains("IMG-20231225-WA0001.jpg"));
    }

    #[test]
    fn test_present_media_not_reported() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("chat.txt");
        let output = output_path(&fixtures, "out.jsonl");
        let media_dir = fixtures.path().join("media");
        fs::create_dir_all(&media_dir).unwrap();
        fs::write(media_dir.join("IMG-20231225-WA0001.jpg"), b"jpeg").unwrap();

        wa2mm_cmd()
            .args([
                input.to_str().unwrap(),
                "--team",
                "family",
                "--channel",
                "holidays",
                "--media-dir",
                media_dir.to_str().unwrap(),
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("missing").not());
    }
}

// ============================================================================
// Error Handling Tests
// ============================================================================

mod error_handling {
    use super::*;

    #[test]
    fn test_nonexistent_input() {
        wa2mm_cmd()
            .args([
                "no_such_transcript.txt",
                "--team",
                "family",
                "--channel",
                "holidays",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error"));
    }

    #[test]
    fn test_missing_team_argument() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("chat.txt");

        wa2mm_cmd()
            .args([input.to_str().unwrap(), "--channel", "holidays"])
            .assert()
            .failure();
    }

    #[test]
    fn test_empty_team_rejected() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("chat.txt");

        wa2mm_cmd()
            .args([
                input.to_str().unwrap(),
                "--team",
                "   ",
                "--channel",
                "holidays",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("team"));
    }

    #[test]
    fn test_missing_input_argument() {
        wa2mm_cmd()
            .args(["--team", "family", "--channel", "holidays"])
            .assert()
            .failure();
    }
}

// ============================================================================
// Edge Cases
// ============================================================================

mod edge_cases {
    use super::*;

    #[test]
    fn test_empty_transcript() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("empty.txt");
        let output = output_path(&fixtures, "out.jsonl");

        wa2mm_cmd()
            .args([
                input.to_str().unwrap(),
                "--team",
                "family",
                "--channel",
                "holidays",
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success();

        // Only the version record remains
        let content = fs::read_to_string(&output).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_unicode_content() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("unicode.txt");
        let output = output_path(&fixtures, "out.jsonl");

        wa2mm_cmd()
            .args([
                input.to_str().unwrap(),
                "--team",
                "family",
                "--channel",
                "holidays",
                "--users",
                r#""Алиса"="alisa";"田中"="tanaka";"#,
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success();

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.contains("С Новым годом"));
        assert!(content.contains("あけまして"));
        assert!(content.contains(r#""user":"alisa""#));
        assert!(content.contains(r#""user":"tanaka""#));
    }

    #[test]
    fn test_max_length_splits_output() {
        let fixtures = setup_fixtures();
        let long_line = "word ".repeat(60);
        let transcript = format!("25.12.2023, 09:30 - Alice: {}\n", long_line.trim_end());
        let input = fixtures.path().join("long.txt");
        fs::write(&input, transcript).unwrap();
        let output = output_path(&fixtures, "out.jsonl");

        wa2mm_cmd()
            .args([
                input.to_str().unwrap(),
                "--team",
                "family",
                "--channel",
                "holidays",
                "--max-length",
                "120",
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success();

        let content = fs::read_to_string(&output).unwrap();
        // 1 version record plus several fragments for the single post
        assert!(content.lines().count() > 2);
        assert!(content.contains("(continued)"));
        for line in content.lines().skip(1) {
            let post: serde_json::Value = serde_json::from_str(line).unwrap();
            let message = post["post"]["message"].as_str().unwrap();
            assert!(message.chars().count() <= 120);
        }
    }

    #[test]
    fn test_path_with_spaces() {
        let fixtures = setup_fixtures();
        let dir_with_space = fixtures.path().join("path with spaces");
        fs::create_dir_all(&dir_with_space).unwrap();

        let input = dir_with_space.join("chat.txt");
        fs::copy(fixtures.path().join("chat.txt"), &input).unwrap();
        let output = dir_with_space.join("out.jsonl");

        wa2mm_cmd()
            .args([
                input.to_str().unwrap(),
                "--team",
                "family",
                "--channel",
                "holidays",
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success();

        assert!(output.exists());
    }
}

// ============================================================================
// Help and Version Tests
// ============================================================================

mod help_and_version {
    use super::*;

    #[test]
    fn test_help_flag() {
        wa2mm_cmd()
            .args(["--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage"))
            .stdout(predicate::str::contains("--team"))
            .stdout(predicate::str::contains("--channel"));
    }

    #[test]
    fn test_version_flag() {
        wa2mm_cmd()
            .args(["--version"])
            .assert()
            .success()
            .stdout(predicate::str::contains("wa2mm"));
    }
}

// ============================================================================
// Output Verification Tests
// ============================================================================

mod output_verification {
    use super::*;

    #[test]
    fn test_output_shows_statistics() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("chat.txt");
        let output = output_path(&fixtures, "out.jsonl");

        wa2mm_cmd()
            .args([
                input.to_str().unwrap(),
                "--team",
                "family",
                "--channel",
                "holidays",
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Summary"))
            .stdout(predicate::str::contains("Posts:"))
            .stdout(predicate::str::contains("Fragments:"))
            .stdout(predicate::str::contains("Total time:"));
    }

    #[test]
    fn test_output_shows_target_info() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("chat.txt");
        let output = output_path(&fixtures, "out.jsonl");

        wa2mm_cmd()
            .args([
                input.to_str().unwrap(),
                "--team",
                "family",
                "--channel",
                "holidays",
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("family/holidays"));
    }
}

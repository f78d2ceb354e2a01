//! End-to-end tests for quickopen-scan against real directory trees.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use quickopen_scan::{FsPolicy, ScanError, ScanOutcome, ScanRequest, scan};
use tempfile::TempDir;

/// Builds the tree used by most tests:
///
/// ```text
/// docs/readme.md
/// docs/notes.txt
/// src/main.go
/// ```
fn setup_basic_tree() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    fs::create_dir_all(root.join("docs")).unwrap();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("docs/readme.md"), "# Readme").unwrap();
    fs::write(root.join("docs/notes.txt"), "notes").unwrap();
    fs::write(root.join("src/main.go"), "package main").unwrap();

    temp_dir
}

fn write_file(root: &Path, relative: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, relative).unwrap();
}

/// Contents with each group sorted, since directory order is up to the OS.
fn sorted(outcome: &ScanOutcome) -> BTreeMap<String, Vec<String>> {
    outcome
        .contents
        .iter()
        .map(|(dir, names)| {
            let mut names = names.clone();
            names.sort();
            (dir.clone(), names)
        })
        .collect()
}

fn table(groups: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    groups
        .iter()
        .map(|(dir, names)| {
            (
                dir.to_string(),
                names.iter().map(|n| n.to_string()).collect(),
            )
        })
        .collect()
}

fn policy_for(temp_dir: &TempDir) -> FsPolicy {
    FsPolicy::new(temp_dir.path())
}

// ============================================================================
// GROUPING AND EXCLUSION
// ============================================================================

mod grouping {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exclude_glob_scenario() {
        let temp_dir = setup_basic_tree();
        let request = ScanRequest::builder().exclude("*.txt").build();

        let outcome = scan(&request, &policy_for(&temp_dir)).unwrap();

        assert_eq!(
            sorted(&outcome),
            table(&[("docs", &["readme.md"]), ("src", &["main.go"])])
        );
        assert!(!outcome.truncated);
        assert!(outcome.scan_seconds >= 0.0);
    }

    #[test]
    fn test_without_excludes_lists_everything() {
        let temp_dir = setup_basic_tree();

        let outcome = scan(&ScanRequest::default(), &policy_for(&temp_dir)).unwrap();

        assert_eq!(
            sorted(&outcome),
            table(&[
                ("docs", &["notes.txt", "readme.md"]),
                ("src", &["main.go"]),
            ])
        );
    }

    #[test]
    fn test_files_in_root_use_dot_key() {
        let temp_dir = setup_basic_tree();
        write_file(temp_dir.path(), "top.md");

        let outcome = scan(&ScanRequest::default(), &policy_for(&temp_dir)).unwrap();

        assert_eq!(outcome.contents.get("."), Some(&["top.md".to_string()][..]));
    }

    #[test]
    fn test_key_is_relative_to_root_for_any_start() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), "a/b/file.txt");
        let policy = policy_for(&temp_dir);

        for start in ["", "a", "a/b", "./a/../a/b"] {
            let request = ScanRequest::builder().path(start).build();
            let outcome = scan(&request, &policy).unwrap();
            assert_eq!(
                sorted(&outcome),
                table(&[("a/b", &["file.txt"])]),
                "start path {start:?}"
            );
        }
    }

    #[test]
    fn test_excluded_directory_hides_descendants() {
        let temp_dir = setup_basic_tree();
        write_file(temp_dir.path(), "node_modules/pkg/index.js");
        write_file(temp_dir.path(), "node_modules/top.js");

        let request = ScanRequest::builder().exclude("node_*").build();
        let outcome = scan(&request, &policy_for(&temp_dir)).unwrap();

        assert!(
            outcome
                .contents
                .iter()
                .all(|(dir, _)| !dir.starts_with("node_modules"))
        );
        assert_eq!(outcome.total_files(), 3);
    }

    #[test]
    fn test_exclude_glob_only_matches_names() {
        let temp_dir = setup_basic_tree();

        // Would match "src/main.go" as a path, but globs see bare names.
        let request = ScanRequest::builder().exclude("src*").build();
        let outcome = scan(&request, &policy_for(&temp_dir)).unwrap();

        assert!(outcome.contents.get("src").is_none());

        let request = ScanRequest::builder().exclude("*/main.go").build();
        let outcome = scan(&request, &policy_for(&temp_dir)).unwrap();

        assert_eq!(outcome.contents.get("src"), Some(&["main.go".to_string()][..]));
    }

    #[test]
    fn test_exclude_paths_prune_subtrees() {
        let temp_dir = setup_basic_tree();
        write_file(temp_dir.path(), "build/out/app.bin");
        write_file(temp_dir.path(), "build/log.txt");
        write_file(temp_dir.path(), "cache/blob");

        let absolute_cache = temp_dir.path().join("cache").to_string_lossy().to_string();
        let request = ScanRequest::builder()
            .exclude_path("build")
            .exclude_path(absolute_cache)
            .build();
        let outcome = scan(&request, &policy_for(&temp_dir)).unwrap();

        assert!(
            outcome
                .contents
                .iter()
                .all(|(dir, _)| !dir.starts_with("build") && !dir.starts_with("cache"))
        );
        assert_eq!(outcome.total_files(), 3);
    }

    #[test]
    fn test_exclude_path_is_exact_not_glob() {
        let temp_dir = setup_basic_tree();

        let request = ScanRequest::builder().exclude_path("sr*").build();
        let outcome = scan(&request, &policy_for(&temp_dir)).unwrap();

        assert!(outcome.contents.get("src").is_some());
    }

    #[test]
    fn test_excluded_start_path_returns_nothing() {
        let temp_dir = setup_basic_tree();

        let request = ScanRequest::builder()
            .path("docs")
            .exclude_path("docs")
            .build();
        let outcome = scan(&request, &policy_for(&temp_dir)).unwrap();

        assert!(outcome.contents.is_empty());
        assert!(!outcome.truncated);
    }

    #[test]
    fn test_hidden_entries_follow_host_policy() {
        let temp_dir = setup_basic_tree();
        write_file(temp_dir.path(), ".git/HEAD");
        write_file(temp_dir.path(), "src/.env");
        write_file(temp_dir.path(), "src/__pycache__/main.cpython.pyc");

        let outcome = scan(&ScanRequest::default(), &policy_for(&temp_dir)).unwrap();
        assert_eq!(
            sorted(&outcome),
            table(&[
                ("docs", &["notes.txt", "readme.md"]),
                ("src", &["main.go"]),
            ])
        );

        let permissive = policy_for(&temp_dir).with_allow_hidden(true);
        let outcome = scan(&ScanRequest::default(), &permissive).unwrap();
        assert_eq!(
            sorted(&outcome),
            table(&[
                (".git", &["HEAD"]),
                ("docs", &["notes.txt", "readme.md"]),
                ("src", &[".env", "main.go"]),
            ])
        );
    }
}

// ============================================================================
// BUDGET
// ============================================================================

mod budget {
    use super::*;
    use pretty_assertions::assert_eq;

    fn setup_wide_tree() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        for dir in ["a", "b", "c", "a/nested", "b/nested/deeper"] {
            for i in 0..5 {
                write_file(temp_dir.path(), &format!("{dir}/file{i}.txt"));
            }
        }
        temp_dir
    }

    #[test]
    fn test_max_load_one() {
        let temp_dir = setup_basic_tree();
        let request = ScanRequest::builder().max_load(1).build();

        let outcome = scan(&request, &policy_for(&temp_dir)).unwrap();

        assert_eq!(outcome.total_files(), 1);
        assert!(outcome.truncated);
    }

    #[test]
    fn test_total_never_exceeds_max_load() {
        let temp_dir = setup_wide_tree();
        let policy = policy_for(&temp_dir);

        for max_load in 1..=30 {
            let request = ScanRequest::builder().max_load(max_load).build();
            let outcome = scan(&request, &policy).unwrap();
            let expected = usize::try_from(max_load).unwrap().min(25);
            assert_eq!(outcome.total_files(), expected, "max_load={max_load}");
            assert_eq!(outcome.truncated, max_load < 25, "max_load={max_load}");
        }
    }

    #[test]
    fn test_non_positive_max_load_uses_default() {
        let temp_dir = setup_wide_tree();
        let policy = policy_for(&temp_dir);

        for max_load in [0, -1] {
            let request = ScanRequest::builder()
                .max_load(max_load)
                .default_max_load(4)
                .build();
            let outcome = scan(&request, &policy).unwrap();
            assert_eq!(outcome.total_files(), 4);
        }

        let outcome = scan(&ScanRequest::default(), &policy).unwrap();
        assert_eq!(outcome.total_files(), 25);
    }

    #[test]
    fn test_rejected_files_do_not_consume_budget() {
        let temp_dir = setup_wide_tree();
        write_file(temp_dir.path(), "c/target.md");
        let request = ScanRequest::builder()
            .keyword("target")
            .max_load(1)
            .build();

        let outcome = scan(&request, &policy_for(&temp_dir)).unwrap();

        assert_eq!(sorted(&outcome), table(&[("c", &["target.md"])]));
    }
}

// ============================================================================
// KEYWORD FILTERING
// ============================================================================

mod keyword {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_keyword_scenario() {
        let temp_dir = setup_basic_tree();
        let request = ScanRequest::builder().keyword("mn").build();

        let outcome = scan(&request, &policy_for(&temp_dir)).unwrap();

        assert_eq!(sorted(&outcome), table(&[("src", &["main.go"])]));
    }

    #[test]
    fn test_keyword_matches_parent_directories() {
        let temp_dir = setup_basic_tree();
        let request = ScanRequest::builder().keyword("dcrd").build();

        let outcome = scan(&request, &policy_for(&temp_dir)).unwrap();

        assert_eq!(sorted(&outcome), table(&[("docs", &["readme.md"])]));
    }

    #[test]
    fn test_keyword_is_case_insensitive() {
        let temp_dir = setup_basic_tree();
        let request = ScanRequest::builder().keyword("SRC MAIN").build();

        let outcome = scan(&request, &policy_for(&temp_dir)).unwrap();

        assert_eq!(sorted(&outcome), table(&[("src", &["main.go"])]));
    }

    #[test]
    fn test_blank_keyword_is_no_filter() {
        let temp_dir = setup_basic_tree();
        let policy = policy_for(&temp_dir);
        let baseline = sorted(&scan(&ScanRequest::default(), &policy).unwrap());

        for blank in ["", " ", "\t \n"] {
            let request = ScanRequest::builder().keyword(blank).build();
            let outcome = scan(&request, &policy).unwrap();
            assert_eq!(sorted(&outcome), baseline, "keyword {blank:?}");
        }
    }
}

// ============================================================================
// ERRORS
// ============================================================================

mod errors {
    use super::*;

    #[test]
    fn test_missing_start_path() {
        let temp_dir = setup_basic_tree();
        let request = ScanRequest::builder().path("nope").build();

        let result = scan(&request, &policy_for(&temp_dir));

        assert!(matches!(result, Err(ScanError::StartNotFound(_))));
    }

    #[test]
    fn test_missing_root() {
        let policy = FsPolicy::new("/definitely/not/a/real/root");

        let result = scan(&ScanRequest::default(), &policy);

        assert!(matches!(result, Err(ScanError::StartNotFound(_))));
    }

    #[test]
    fn test_start_path_is_a_file() {
        let temp_dir = setup_basic_tree();
        let request = ScanRequest::builder().path("src/main.go").build();

        let result = scan(&request, &policy_for(&temp_dir));

        assert!(matches!(result, Err(ScanError::NotADirectory(_))));
    }

    #[test]
    fn test_start_path_outside_root() {
        let temp_dir = setup_basic_tree();
        let request = ScanRequest::builder().path("../..").build();

        let result = scan(&request, &policy_for(&temp_dir));

        assert!(matches!(result, Err(ScanError::OutsideRoot(_))));
    }
}

//! Integration tests for the Git interface.
//!
//! These tests use real git repositories created via tempfile to verify
//! that the Git interface works correctly with actual git operations.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use gitapi::git::{Git, GitError, GitState};
use gitapi::status::{bits, classify, Category, RepositoryState};

/// Test fixture that creates a real git repository.
struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create a new test repository with an initial commit.
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");

        run_git(dir.path(), &["init"]);
        run_git(dir.path(), &["config", "user.email", "test@example.com"]);
        run_git(dir.path(), &["config", "user.name", "Test User"]);
        run_git(dir.path(), &["config", "commit.gpgsign", "false"]);

        std::fs::write(dir.path().join("README.md"), "# Test Repo\n").unwrap();
        run_git(dir.path(), &["add", "README.md"]);
        run_git(dir.path(), &["commit", "-m", "Initial commit"]);

        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn git(&self) -> Git {
        Git::open(self.path()).expect("failed to open test repo")
    }

    fn write(&self, path: &str, content: &str) {
        let full = self.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full, content).unwrap();
    }

    fn commit_file(&self, path: &str, content: &str, message: &str) {
        self.write(path, content);
        run_git(self.path(), &["add", path]);
        run_git(self.path(), &["commit", "-m", message]);
    }

    /// Read a config value through the git CLI.
    fn config_get(&self, key: &str) -> Option<String> {
        let output = Command::new("git")
            .args(["config", "--local", "--get", key])
            .current_dir(self.path())
            .output()
            .expect("git config failed");
        output
            .status
            .success()
            .then(|| String::from_utf8_lossy(&output.stdout).trim_end().to_string())
    }

    /// Leave the repository mid-merge with `conflict.txt` conflicted.
    fn start_conflicting_merge(&self) {
        self.commit_file("conflict.txt", "base\n", "Add conflict.txt");
        run_git(self.path(), &["checkout", "-b", "side"]);
        self.commit_file("conflict.txt", "side\n", "Side change");
        run_git(self.path(), &["checkout", "-"]);
        self.commit_file("conflict.txt", "main\n", "Main change");

        let output = Command::new("git")
            .args(["merge", "side"])
            .current_dir(self.path())
            .output()
            .expect("git merge failed to run");
        assert!(!output.status.success(), "merge was expected to conflict");
    }
}

/// Run a git command in the given directory.
fn run_git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git command failed");

    if !output.status.success() {
        panic!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

fn paths_in(git: &Git, category: Category) -> Vec<String> {
    let entries = git.status_entries().unwrap();
    let classification = classify(&entries, &git.state().operations());
    classification
        .get(category)
        .iter()
        .map(|e| e.path.clone())
        .collect()
}

mod open {
    use super::*;

    #[test]
    fn discovers_from_subdirectory() {
        let repo = TestRepo::new();
        repo.write("src/lib.rs", "");

        let git = Git::open(&repo.path().join("src")).unwrap();
        let info = git.info().unwrap();
        assert_eq!(
            std::fs::canonicalize(&info.work_dir).unwrap(),
            std::fs::canonicalize(repo.path()).unwrap()
        );
        assert!(info.config_path().ends_with(".git/config"));
    }

    #[test]
    fn plain_directory_is_not_a_repo() {
        let dir = TempDir::new().unwrap();
        let err = Git::open(dir.path()).unwrap_err();
        assert!(matches!(err, GitError::NotARepo { .. }));
        assert!(err.is_not_found());
    }

    #[test]
    fn bare_repository_is_rejected() {
        let dir = TempDir::new().unwrap();
        run_git(dir.path(), &["init", "--bare"]);
        let err = Git::open(dir.path()).unwrap_err();
        assert!(matches!(err, GitError::BareRepo));
    }
}

mod status {
    use super::*;

    #[test]
    fn clean_repository_has_no_entries() {
        let repo = TestRepo::new();
        assert!(repo.git().status_entries().unwrap().is_empty());
        assert_eq!(repo.git().state(), GitState::Clean);
    }

    #[test]
    fn untracked_directories_are_expanded() {
        let repo = TestRepo::new();
        repo.write("new/a.txt", "a");
        repo.write("new/b.txt", "b");

        let mut untracked = paths_in(&repo.git(), Category::Untracked);
        untracked.sort();
        assert_eq!(untracked, vec!["new/a.txt", "new/b.txt"]);
    }

    #[test]
    fn worktree_changes() {
        let repo = TestRepo::new();
        repo.commit_file("gone.txt", "x", "Add gone.txt");
        repo.write("README.md", "changed\n");
        std::fs::remove_file(repo.path().join("gone.txt")).unwrap();

        let git = repo.git();
        assert_eq!(paths_in(&git, Category::Modified), vec!["README.md"]);
        assert_eq!(paths_in(&git, Category::Missing), vec!["gone.txt"]);
    }

    #[test]
    fn index_changes() {
        let repo = TestRepo::new();
        repo.commit_file("old.txt", "x", "Add old.txt");
        repo.write("added.txt", "new");
        repo.write("README.md", "staged\n");
        run_git(repo.path(), &["add", "added.txt", "README.md"]);
        run_git(repo.path(), &["rm", "-q", "old.txt"]);

        let git = repo.git();
        assert_eq!(paths_in(&git, Category::Added), vec!["added.txt"]);
        assert_eq!(paths_in(&git, Category::Changed), vec!["README.md"]);
        assert_eq!(paths_in(&git, Category::Removed), vec!["old.txt"]);
    }

    #[test]
    fn staged_and_unstaged_change_lands_twice() {
        let repo = TestRepo::new();
        repo.write("README.md", "staged\n");
        run_git(repo.path(), &["add", "README.md"]);
        repo.write("README.md", "staged and more\n");

        let entries = repo.git().status_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].bit, bits::INDEX_MODIFIED | bits::WT_MODIFIED);
    }

    #[test]
    fn ignored_files_are_not_reported() {
        let repo = TestRepo::new();
        repo.commit_file(".gitignore", "*.log\n", "Ignore logs");
        repo.write("debug.log", "noise");

        assert!(repo.git().status_entries().unwrap().is_empty());
    }

    #[test]
    fn conflicting_merge_sets_state() {
        let repo = TestRepo::new();
        repo.start_conflicting_merge();

        let git = repo.git();
        assert_eq!(git.state(), GitState::Merge);
        assert_eq!(paths_in(&git, Category::Conflicting), vec!["conflict.txt"]);

        let entries = git.status_entries().unwrap();
        let classification = classify(&entries, &git.state().operations());
        assert_eq!(classification.state, RepositoryState::Merging);
    }
}

mod config {
    use super::*;

    #[test]
    fn set_string_writes_local_config() {
        let repo = TestRepo::new();
        repo.git()
            .set_config_string("user.name", "Ada Lovelace")
            .unwrap();
        assert_eq!(repo.config_get("user.name").as_deref(), Some("Ada Lovelace"));
    }

    #[test]
    fn set_string_creates_subsection() {
        let repo = TestRepo::new();
        repo.git()
            .set_config_string("branch.main.remote", "origin")
            .unwrap();

        assert_eq!(
            repo.config_get("branch.main.remote").as_deref(),
            Some("origin")
        );
        let text = std::fs::read_to_string(repo.path().join(".git/config")).unwrap();
        assert!(text.contains("[branch \"main\"]"));
    }

    #[test]
    fn empty_value_is_stored_as_empty() {
        let repo = TestRepo::new();
        repo.git().set_config_string("user.name", "").unwrap();
        assert_eq!(repo.config_get("user.name").as_deref(), Some(""));
    }

    #[test]
    fn invalid_key_is_a_write_error() {
        let repo = TestRepo::new();
        let err = repo.git().set_config_string("nodot", "x").unwrap_err();
        assert!(matches!(err, GitError::ConfigWrite { .. }));
    }
}

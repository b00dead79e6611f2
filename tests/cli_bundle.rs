//! End-to-end tests for the rbundle binary.
//!
//! Each test builds a throwaway repository (with a `.git` marker so config
//! discovery stops there) and runs the compiled binary inside it.

use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;
use serde_json::Value;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

const DAY: Duration = Duration::from_secs(86_400);

struct Repo {
    _temp: TempDir,
    root: PathBuf,
}

impl Repo {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let root = temp.path().canonicalize().unwrap();
        fs::create_dir(root.join(".git")).unwrap();
        Self { _temp: temp, root }
    }

    fn doc(&self, rel: &str, body: &str, age: Duration) -> &Self {
        let path = self.root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, body).unwrap();
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(SystemTime::now() - age)
            .unwrap();
        self
    }

    fn config(&self, body: &str) -> &Self {
        let dir = self.root.join(".rbundle");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), body).unwrap();
        self
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("rbundle"));
        cmd.current_dir(&self.root);
        cmd.env_remove("RUST_LOG");
        cmd
    }

    /// Run successfully and return the printed bundle directory.
    fn bundle(&self, args: &[&str]) -> PathBuf {
        let output = self.cmd().args(args).output().unwrap();
        assert!(
            output.status.success(),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        let stdout = String::from_utf8(output.stdout).unwrap();
        let dir = PathBuf::from(stdout.trim_end());
        assert!(dir.is_absolute());
        assert!(dir.is_dir());
        dir
    }
}

fn manifest(bundle_dir: &Path) -> Value {
    let json = fs::read_to_string(bundle_dir.join("manifest.json")).unwrap();
    serde_json::from_str(&json).unwrap()
}

fn relatives(manifest: &Value) -> Vec<String> {
    manifest["selected"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["relative"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn query_selects_recent_matching_document() {
    let repo = Repo::new();
    repo.doc(
        "research/aws/s3-irsa.md",
        "IRSA basics. irsa trust policy. Irsa with S3 and s3 access points.",
        Duration::ZERO,
    )
    .doc("research/misc/notes.md", "unrelated", DAY * 200);

    let dir = repo.bundle(&["--query", "irsa s3", "--days", "180"]);

    assert!(dir.starts_with(repo.root.join("notebook-bundles")));
    assert!(dir.file_name().unwrap().to_str().unwrap().ends_with("__irsa-s3"));

    let m = manifest(&dir);
    assert_eq!(m["query"], "irsa s3");
    assert_eq!(m["regex"], false);
    assert_eq!(m["days"], 180);
    assert_eq!(m["limit"], 50);
    assert_eq!(m["researchDir"], "research");
    assert_eq!(relatives(&m), vec!["research/aws/s3-irsa.md"]);

    let entry = &m["selected"][0];
    assert_eq!(entry["hits"], 5);
    assert_eq!(entry["out"], "research__aws__s3-irsa.md");
    let score = entry["score"].as_f64().unwrap();
    assert!((500.0..=510.0).contains(&score));
    assert!(m["createdAt"].as_str().unwrap().ends_with("+00:00"));

    assert!(dir.join("research__aws__s3-irsa.md").is_file());
    assert!(!dir.join("research__misc__notes.md").exists());
}

#[test]
fn empty_query_orders_recent_files_by_recency() {
    let repo = Repo::new();
    repo.doc("research/a.md", "a", DAY * 5)
        .doc("research/b.md", "b", DAY)
        .doc("research/c.md", "c", DAY * 10)
        .doc("research/old/x.md", "x", DAY * 30)
        .doc("research/old/y.md", "y", DAY * 30);

    let dir = repo.bundle(&["--days", "14", "--limit", "200"]);

    let m = manifest(&dir);
    assert_eq!(
        relatives(&m),
        vec!["research/b.md", "research/a.md", "research/c.md"]
    );
    assert!(dir.file_name().unwrap().to_str().unwrap().ends_with("__bundle"));

    let index = fs::read_to_string(dir.join("index.md")).unwrap();
    assert!(index.contains("- Query: `(none)`"));
    assert!(index.contains("- Window: last 14 days"));
    assert!(index.contains("- Files: 3"));
    assert!(index.contains("1. `research__b.md` ← `research/b.md` (hits=0, ageDays=1.0)"));
}

#[test]
fn limit_zero_produces_summary_only_bundle() {
    let repo = Repo::new();
    repo.doc("research/a.md", "a", Duration::ZERO);

    let dir = repo.bundle(&["--limit", "0"]);

    let mut names: Vec<String> = fs::read_dir(&dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["index.md", "manifest.json"]);
    assert_eq!(manifest(&dir)["selected"], serde_json::json!([]));
}

#[test]
fn same_basename_in_different_dirs_both_copied() {
    let repo = Repo::new();
    repo.doc("research/a/x.md", "one", Duration::ZERO)
        .doc("research/b/x.md", "two", Duration::ZERO);

    let dir = repo.bundle(&[]);

    assert_eq!(fs::read_to_string(dir.join("research__a__x.md")).unwrap(), "one");
    assert_eq!(fs::read_to_string(dir.join("research__b__x.md")).unwrap(), "two");
}

#[test]
fn missing_research_dir_exits_2() {
    let repo = Repo::new();

    repo.cmd()
        .args(["--query", "irsa"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("research dir not found"));

    assert!(!repo.root.join("notebook-bundles").exists());
}

#[test]
fn invalid_regex_exits_2() {
    let repo = Repo::new();
    repo.doc("research/a.md", "a", Duration::ZERO);

    repo.cmd()
        .args(["--query", "(unclosed", "--regex"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a valid regular expression"));
}

#[test]
fn regex_query_counts_alternation() {
    let repo = Repo::new();
    repo.doc("research/scaling.md", "Karpenter vs cluster-autoscaler; karpenter wins", Duration::ZERO)
        .doc("research/other.md", "nothing to see", Duration::ZERO);

    let dir = repo.bundle(&["--query", "karpenter|autoscaler", "--regex", "--name", "scaling"]);

    assert!(dir.file_name().unwrap().to_str().unwrap().ends_with("__scaling"));
    let m = manifest(&dir);
    assert_eq!(m["regex"], true);
    assert_eq!(relatives(&m), vec!["research/scaling.md"]);
    assert_eq!(m["selected"][0]["hits"], 3);
}

#[test]
fn custom_research_dir_out_and_ext() {
    let repo = Repo::new();
    repo.doc("notes/a.txt", "alpha", Duration::ZERO)
        .doc("notes/b.md", "beta", Duration::ZERO);

    let dir = repo.bundle(&["--research-dir", "notes", "--out", "dist/bundles", "--ext", ".TXT"]);

    assert!(dir.starts_with(repo.root.join("dist").join("bundles")));
    let m = manifest(&dir);
    assert_eq!(m["researchDir"], "notes");
    assert_eq!(relatives(&m), vec!["notes/a.txt"]);
}

#[test]
fn config_file_supplies_defaults_and_cli_wins() {
    let repo = Repo::new();
    repo.config("[defaults]\nlimit = 1\ndays = 30\n")
        .doc("research/a.md", "a", DAY)
        .doc("research/b.md", "b", DAY * 2);

    let dir = repo.bundle(&[]);
    let m = manifest(&dir);
    assert_eq!(m["limit"], 1);
    assert_eq!(m["days"], 30);
    assert_eq!(relatives(&m), vec!["research/a.md"]);

    let dir = repo.bundle(&["--limit", "5", "--name", "wide"]);
    assert_eq!(relatives(&manifest(&dir)).len(), 2);
}

#[test]
fn config_exclude_globs_apply() {
    let repo = Repo::new();
    repo.config("[selectors]\nexclude = [\"drafts/**\"]\n")
        .doc("research/keep.md", "k", Duration::ZERO)
        .doc("research/drafts/wip.md", "w", Duration::ZERO);

    let dir = repo.bundle(&[]);
    assert_eq!(relatives(&manifest(&dir)), vec!["research/keep.md"]);
}

#[test]
fn vendored_directories_are_scanned_without_config() {
    let repo = Repo::new();
    repo.doc("research/a.md", "irsa", Duration::ZERO)
        .doc("research/node_modules/guide.md", "irsa", Duration::ZERO);

    let dir = repo.bundle(&["--query", "irsa"]);

    let mut rels = relatives(&manifest(&dir));
    rels.sort();
    assert_eq!(rels, vec!["research/a.md", "research/node_modules/guide.md"]);
}

#[test]
fn empty_research_dir_scans_repo_root() {
    let repo = Repo::new();
    repo.doc("top.md", "top", Duration::ZERO)
        .doc("research/a.md", "a", DAY);

    let dir = repo.bundle(&["--research-dir", ""]);

    let m = manifest(&dir);
    assert_eq!(m["researchDir"], ".");
    assert_eq!(relatives(&m), vec!["top.md", "research/a.md"]);
    assert!(dir.join("top.md").is_file());
    assert!(dir.join("research__a.md").is_file());
}

#[test]
fn empty_out_writes_bundle_under_repo_root() {
    let repo = Repo::new();
    repo.doc("research/a.md", "a", Duration::ZERO);

    let dir = repo.bundle(&["--out", ""]);

    assert_eq!(dir.parent().unwrap(), repo.root);
}

#[test]
fn unknown_config_key_exits_2() {
    let repo = Repo::new();
    repo.config("[defaults]\nmodel = \"big\"\n")
        .doc("research/a.md", "a", Duration::ZERO);

    repo.cmd()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration file has invalid format"));
}

#[test]
fn print_config_reports_sources_and_exits_0() {
    let repo = Repo::new();
    repo.config("[defaults]\ndays = 90\n");

    repo.cmd()
        .args(["--print-config", "--limit", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("days = 90 (from config)"))
        .stdout(predicate::str::contains("limit = 7 (from cli)"))
        .stdout(predicate::str::contains("research_dir = research (from default)"));

    assert!(!repo.root.join("notebook-bundles").exists());
}

#[test]
fn unwritable_output_root_exits_1() {
    let repo = Repo::new();
    repo.doc("research/a.md", "a", Duration::ZERO);
    fs::write(repo.root.join("blocker"), "a file, not a directory").unwrap();

    repo.cmd()
        .args(["--out", "blocker/bundles"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ERROR:"));
}

#[test]
fn verbose_logs_go_to_stderr_only() {
    let repo = Repo::new();
    repo.doc("research/a.md", "a", Duration::ZERO);

    let output = repo.cmd().arg("-v").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("selection complete"));
}

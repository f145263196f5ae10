/// End-to-end tests for the CLI
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("plugin-modernizer")
            .arg("--help")
            .assert()
            .code(0)
            .stdout(predicate::str::contains("--plugins"))
            .stdout(predicate::str::contains("--dry-run"));
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("plugin-modernizer")
            .arg("--version")
            .assert()
            .code(0)
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("plugin-modernizer")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Invalid format value
    #[test]
    fn test_exit_code_invalid_format() {
        cargo_bin_cmd!("plugin-modernizer")
            .args(["-f", "invalid_format"])
            .assert()
            .code(2);
    }

    /// Exit code 2: zero workers
    #[test]
    fn test_exit_code_zero_workers() {
        cargo_bin_cmd!("plugin-modernizer")
            .args(["--plugins", "git", "--workers", "0"])
            .assert()
            .code(2);
    }

    /// Exit code 3: nothing to modernize
    #[test]
    fn test_exit_code_no_plugins() {
        let dir = TempDir::new().unwrap();
        cargo_bin_cmd!("plugin-modernizer")
            .current_dir(dir.path())
            .assert()
            .code(3)
            .stderr(predicate::str::contains("no plugins to modernize"));
    }

    /// Exit code 3: unreadable plugin file
    #[test]
    fn test_exit_code_missing_plugin_file() {
        let dir = TempDir::new().unwrap();
        cargo_bin_cmd!("plugin-modernizer")
            .current_dir(dir.path())
            .args(["--plugin-file", "does-not-exist.txt"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Failed to read file"));
    }
}

fn git(dir: &Path, args: &[&str]) -> bool {
    Command::new("git")
        .current_dir(dir)
        .args(["-c", "user.name=test", "-c", "user.email=test@example.com"])
        .args(args)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// A git-tracked plugin checkout without a BOM, so nothing needs the network
fn local_plugin(root: &Path) -> Option<std::path::PathBuf> {
    let dir = root.join("sample-plugin");
    fs::create_dir(&dir).unwrap();
    fs::write(
        dir.join("pom.xml"),
        r#"<project>
  <artifactId>sample</artifactId>
  <properties><jenkins.version>2.479.1</jenkins.version></properties>
</project>
"#,
    )
    .unwrap();
    let ready = git(&dir, &["init", "--quiet"])
        && git(&dir, &["add", "pom.xml"])
        && git(&dir, &["commit", "--quiet", "-m", "init"]);
    ready.then_some(dir)
}

#[cfg(unix)]
#[test]
fn test_e2e_local_dry_run_writes_report() {
    let dir = TempDir::new().unwrap();
    let Some(plugin) = local_plugin(dir.path()) else {
        return;
    };
    let report_path = dir.path().join("report.json");

    cargo_bin_cmd!("plugin-modernizer")
        .current_dir(dir.path())
        .args(["--local", plugin.to_str().unwrap()])
        .args(["--dry-run", "--maven-executable", "true"])
        .args(["--cache-path", dir.path().join("cache").to_str().unwrap()])
        .args(["-o", report_path.to_str().unwrap()])
        .assert()
        .code(0);

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report["dry_run"], true);
    assert_eq!(report["totals"]["succeeded"], 1);
    let summary = &report["plugins"][0];
    assert_eq!(summary["name"], "sample-plugin");
    assert_eq!(summary["jdk"], 17);
    assert_eq!(summary["stage"], "verified");
}

#[cfg(unix)]
#[test]
fn test_e2e_failing_build_exits_with_plugin_failures() {
    let dir = TempDir::new().unwrap();
    let Some(plugin) = local_plugin(dir.path()) else {
        return;
    };

    cargo_bin_cmd!("plugin-modernizer")
        .current_dir(dir.path())
        .args(["--local", plugin.to_str().unwrap()])
        .args(["--dry-run", "--maven-executable", "false", "-f", "markdown"])
        .args(["--cache-path", dir.path().join("cache").to_str().unwrap()])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("## Failures"))
        .stdout(predicate::str::contains("### sample-plugin"));
}

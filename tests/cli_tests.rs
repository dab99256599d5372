//! CLI integration tests using the REAL gitopsi binary

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;

#[allow(deprecated)]
fn gitopsi_cmd() -> Command {
    let mut cmd = Command::cargo_bin("gitopsi").unwrap();
    // Ignore developer overrides
    cmd.env_remove("GITOPSI_PROJECT");
    cmd.env_remove("GITOPSI_REGISTRY");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Command bound to the fixture's project and registry
fn project_cmd(project: &common::TestProject) -> Command {
    let mut cmd = gitopsi_cmd();
    cmd.arg("-p")
        .arg(&project.path)
        .arg("-r")
        .arg(&project.registry);
    cmd
}

#[test]
fn test_help_output() {
    gitopsi_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "gitopsi installs versioned infrastructure patterns",
        ))
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("uninstall"))
        .stdout(predicate::str::contains("outdated"));
}

#[test]
fn test_short_help_uses_summary() {
    gitopsi_cmd()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pattern installer for GitOps"));
}

#[test]
fn test_version_output() {
    gitopsi_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gitopsi"))
        .stdout(predicate::str::contains("Build info"));
}

#[test]
fn test_install_generates_files() {
    let project = common::TestProject::with_fixture_registry();

    project_cmd(&project)
        .args(["install", "monitoring", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed monitoring 1.1.0"))
        .stdout(predicate::str::contains(
            "argocd/applications/monitoring-dev.yaml",
        ));

    assert!(project.file_exists("argocd/applications/monitoring-dev.yaml"));
    assert!(project.file_exists(
        "infrastructure/observability/monitoring/overlays/dev/kustomization.yaml"
    ));
    assert!(project.file_exists(".gitopsi/patterns.yaml"));
}

#[test]
fn test_install_twice_reports_already_installed() {
    let project = common::TestProject::with_fixture_registry();
    project_cmd(&project)
        .args(["install", "monitoring", "-y"])
        .assert()
        .success();

    project_cmd(&project)
        .args(["install", "monitoring", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already installed"));
}

#[test]
fn test_install_dry_run_writes_nothing() {
    let project = common::TestProject::with_fixture_registry();

    project_cmd(&project)
        .args(["install", "monitoring", "--dry-run", "--env", "prod"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would install monitoring 1.1.0"))
        .stdout(predicate::str::contains("Files that would be generated:"))
        .stdout(predicate::str::contains(
            "argocd/applications/monitoring-prod.yaml",
        ));

    assert!(!project.file_exists("argocd"));
    assert!(!project.file_exists(".gitopsi"));
}

#[test]
fn test_install_with_overrides() {
    let project = common::TestProject::with_fixture_registry();

    project_cmd(&project)
        .args(["install", "monitoring", "--set", "replicas=3", "-y"])
        .assert()
        .success();

    let release =
        project.read_file("infrastructure/observability/monitoring/base/monitoring-release.yaml");
    assert!(release.contains("replicas: 3"));
    assert_eq!(
        project.ledger()["patterns"]["monitoring"]["config"]["replicas"].as_i64(),
        Some(3)
    );
}

#[test]
fn test_install_with_mistyped_override_fails() {
    let project = common::TestProject::with_fixture_registry();

    project_cmd(&project)
        .args(["install", "monitoring", "--set", "replicas=many", "-y"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("replicas"));

    assert!(!project.file_exists("infrastructure"));
}

#[test]
fn test_install_unknown_pattern_fails() {
    let project = common::TestProject::with_fixture_registry();

    project_cmd(&project)
        .args(["install", "does-not-exist", "-y"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: Pattern 'does-not-exist' not found in any registry",
        ));
}

#[test]
fn test_install_with_flux_settings() {
    let project = common::TestProject::with_fixture_registry();
    project.write_settings("gitopsTool: flux\n");

    project_cmd(&project)
        .args(["install", "monitoring", "-y"])
        .assert()
        .success();

    let app = project.read_file("flux/applications/monitoring-dev.yaml");
    assert!(app.contains("kind: Kustomization"));
    assert!(!project.file_exists("argocd"));
}

#[test]
fn test_list_empty_and_populated() {
    let project = common::TestProject::with_fixture_registry();

    project_cmd(&project)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No patterns installed."));

    project_cmd(&project)
        .args(["install", "ingress", "-y"])
        .assert()
        .success();

    project_cmd(&project)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed patterns (2):"))
        .stdout(predicate::str::contains("cert-manager"))
        .stdout(predicate::str::contains("ingress"));
}

#[test]
fn test_list_json() {
    let project = common::TestProject::with_fixture_registry();
    project_cmd(&project)
        .args(["install", "monitoring", "-y"])
        .assert()
        .success();

    let output = project_cmd(&project)
        .args(["list", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["name"], "monitoring");
    assert_eq!(entries[0]["version"], "1.1.0");
    assert_eq!(entries[0]["files"], 5);
}

#[test]
fn test_status_detects_missing_file() {
    let project = common::TestProject::with_fixture_registry();
    project_cmd(&project)
        .args(["install", "monitoring", "-y"])
        .assert()
        .success();

    project_cmd(&project)
        .args(["status", "monitoring"])
        .assert()
        .success()
        .stdout(predicate::str::contains("healthy"))
        .stdout(predicate::str::contains("5/5 present"));

    std::fs::remove_file(project.path.join("argocd/applications/monitoring-dev.yaml")).unwrap();

    let output = project_cmd(&project)
        .args(["status", "monitoring", "--json"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["health"], "degraded");
    assert_eq!(json["missing"][0], "argocd/applications/monitoring-dev.yaml");
}

#[test]
fn test_status_not_installed_fails() {
    let project = common::TestProject::with_fixture_registry();

    project_cmd(&project)
        .args(["status", "monitoring"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not installed"));
}

#[test]
fn test_uninstall_removes_files() {
    let project = common::TestProject::with_fixture_registry();
    project_cmd(&project)
        .args(["install", "monitoring", "-y"])
        .assert()
        .success();

    project_cmd(&project)
        .args(["uninstall", "monitoring", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Uninstalled monitoring"))
        .stdout(predicate::str::contains("Removed files:"));

    assert!(!project.file_exists("infrastructure"));
    assert!(!project.file_exists("argocd"));
    project_cmd(&project)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No patterns installed."));
}

#[test]
fn test_uninstall_keep_files() {
    let project = common::TestProject::with_fixture_registry();
    project_cmd(&project)
        .args(["install", "monitoring", "-y"])
        .assert()
        .success();

    project_cmd(&project)
        .args(["uninstall", "monitoring", "--keep-files", "-y"])
        .assert()
        .success();

    assert!(project.file_exists("argocd/applications/monitoring-dev.yaml"));
}

#[test]
fn test_update_and_outdated() {
    let project = common::TestProject::with_fixture_registry();
    project_cmd(&project)
        .args(["install", "monitoring", "--version", "1.0.0", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed monitoring 1.0.0"));

    project_cmd(&project)
        .arg("outdated")
        .assert()
        .success()
        .stdout(predicate::str::contains("Updates available (1):"))
        .stdout(predicate::str::contains("1.0.0 → 1.1.0"));

    project_cmd(&project)
        .args(["update", "monitoring", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed monitoring 1.1.0"));

    project_cmd(&project)
        .arg("outdated")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "All installed patterns are up to date.",
        ));

    project_cmd(&project)
        .args(["update", "monitoring", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Already at target version"));
}

#[test]
fn test_deps_prints_tree() {
    let project = common::TestProject::with_fixture_registry();

    project_cmd(&project)
        .args(["deps", "ingress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ingress"))
        .stdout(predicate::str::contains("└─ cert-manager"))
        .stdout(predicate::str::contains("└─ external-dns"));
}

#[test]
fn test_conflicts_command() {
    let project = common::TestProject::with_fixture_registry();

    project_cmd(&project)
        .args(["conflicts", "grafana"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No conflicts for 'grafana'"));

    project_cmd(&project)
        .args(["install", "monitoring", "-y"])
        .assert()
        .success();

    project_cmd(&project)
        .args(["conflicts", "grafana"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Conflicts for 'grafana' (1):"))
        .stdout(predicate::str::contains("namespace 'monitoring'"));
}

#[test]
fn test_search() {
    let project = common::TestProject::with_fixture_registry();

    project_cmd(&project)
        .args(["search", "prometheus"])
        .assert()
        .success()
        .stdout(predicate::str::contains("monitoring 1.1.0"))
        .stdout(predicate::str::contains("grafana").not());

    project_cmd(&project)
        .args(["search", "--category", "security"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cert-manager"));

    project_cmd(&project)
        .args(["search", "nothing-matches-this"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No patterns found."));
}

#[test]
fn test_validate_fixture_and_invalid_pattern() {
    let project = common::TestProject::with_fixture_registry();

    gitopsi_cmd()
        .arg("validate")
        .arg(project.registry.join("observability/monitoring/1.1.0"))
        .assert()
        .success()
        .stdout(predicate::str::contains("valid monitoring 1.1.0"));

    project.write_file(
        "broken/pattern.yaml",
        r#"apiVersion: gitopsi.io/v1
kind: Pattern
metadata:
  name: Broken_Name
  version: not-a-version
spec:
  components:
    - name: chart
      type: helm
      chart: ""
      repository: ""
"#,
    );
    gitopsi_cmd()
        .arg("validate")
        .arg(project.path.join("broken"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid pattern definition"));
}

#[test]
fn test_scaffold_then_validate_and_index() {
    let project = common::TestProject::new();

    gitopsi_cmd()
        .args(["scaffold", "loki", "--category", "observability", "--dir"])
        .arg(&project.registry)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    assert!(project.registry.join("loki/pattern.yaml").exists());

    gitopsi_cmd()
        .arg("validate")
        .arg(project.registry.join("loki"))
        .assert()
        .success();

    gitopsi_cmd()
        .arg("scaffold")
        .arg("loki")
        .arg("--dir")
        .arg(&project.registry)
        .assert()
        .failure()
        .stderr(predicate::str::contains("pattern already exists"));

    gitopsi_cmd()
        .arg("index")
        .arg(&project.registry)
        .assert()
        .success()
        .stdout(predicate::str::contains("(1 patterns, 1 categories)"));
    assert!(project.registry.join("index.yaml").exists());
}

#[test]
fn test_completions() {
    gitopsi_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gitopsi"));

    gitopsi_cmd()
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown shell"));
}

#[test]
#[serial]
fn test_project_and_registry_from_environment() {
    let project = common::TestProject::with_fixture_registry();

    gitopsi_cmd()
        .env("GITOPSI_PROJECT", &project.path)
        .env("GITOPSI_REGISTRY", &project.registry)
        .args(["install", "cert-manager", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed cert-manager 1.2.0"));

    assert!(project.file_exists("argocd/applications/cert-manager-dev.yaml"));
}

#[test]
#[serial]
fn test_project_discovered_from_nested_directory() {
    let project = common::TestProject::with_fixture_registry();
    project.write_settings("platform: kubernetes\n");
    std::fs::create_dir_all(project.path.join("infrastructure/general")).unwrap();

    gitopsi_cmd()
        .current_dir(project.path.join("infrastructure/general"))
        .arg("-r")
        .arg(&project.registry)
        .args(["install", "monitoring", "-y"])
        .assert()
        .success();

    assert!(project.file_exists("argocd/applications/monitoring-dev.yaml"));
    assert!(!project.file_exists("infrastructure/general/argocd"));
}

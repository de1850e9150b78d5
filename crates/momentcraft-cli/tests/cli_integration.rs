//! CLI Integration Tests
//!
//! These tests verify the CLI commands work correctly end-to-end.
//! They test the "wiring" between the CLI and the core library.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// Create a CLI command with a temporary data directory
fn cli_cmd(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("momentcraft").expect("Failed to find momentcraft binary");
    cmd.arg("--data-dir").arg(data_dir.path());
    cmd
}

/// Extract a value from CLI output lines like "  ID:  gift_..." or
/// "  Link: https://..."
fn extract_field(output: &str, label: &str) -> Option<String> {
    for line in output.lines() {
        if let Some(rest) = line.trim_start().strip_prefix(label) {
            return Some(rest.trim().to_string());
        }
    }
    None
}

fn create_gift(data_dir: &TempDir, sender: &str) -> String {
    let output = cli_cmd(data_dir)
        .args([
            "gift", "create", "--recipient", "Dina", "--sender", sender, "--message",
            "Happy Birthday!", "--moment", "Birthday",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    extract_field(&stdout, "ID:").expect("no gift id in output")
}

// ============================================================================
// Gift Commands
// ============================================================================

#[test]
fn test_gift_create_prints_id_and_url() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args([
            "gift", "create", "--recipient", "Dina", "--sender", "Alice", "--message",
            "Happy Birthday!", "--moment", "Birthday",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gift created!"))
        .stdout(predicate::str::contains("gift_"))
        .stdout(predicate::str::contains("gift.html?id=gift_"));
}

#[test]
fn test_gift_create_rejects_empty_message() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args([
            "gift", "create", "--recipient", "Dina", "--sender", "Alice", "--message", "  ",
            "--moment", "Birthday",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("message"));
}

#[test]
fn test_gift_show_roundtrip() {
    let data_dir = TempDir::new().unwrap();
    let id = create_gift(&data_dir, "Alice");

    cli_cmd(&data_dir)
        .args(["gift", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice"))
        .stdout(predicate::str::contains("Happy Birthday!"))
        .stdout(predicate::str::contains("no collaborators yet"));
}

#[test]
fn test_gift_show_unknown_id_is_dedicated_notice() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["gift", "show", "gift_1730000000000_zzzzzzzzz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Gift not found"));
}

#[test]
fn test_gift_list_counts_letters() {
    let data_dir = TempDir::new().unwrap();
    create_gift(&data_dir, "Alice");
    create_gift(&data_dir, "Bob");

    cli_cmd(&data_dir)
        .args(["gift", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 gift(s):"))
        .stdout(predicate::str::contains("Alice"))
        .stdout(predicate::str::contains("Bob"));
}

// ============================================================================
// Collaboration Flow
// ============================================================================

#[test]
fn test_collaboration_flow_end_to_end() {
    let data_dir = TempDir::new().unwrap();

    // Collaboration is a login-gated feature
    cli_cmd(&data_dir)
        .args([
            "gift", "collab", "--sender", "Alice", "--message", "From all of us", "--moment",
            "Farewell",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Login required"));

    cli_cmd(&data_dir)
        .args(["account", "login"])
        .assert()
        .success();

    let output = cli_cmd(&data_dir)
        .args([
            "gift", "collab", "--sender", "Alice", "--message", "From all of us", "--moment",
            "Farewell",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let link = extract_field(&stdout, "Link:").expect("no collaboration link in output");
    assert!(link.contains("mode=collaboration&giftId=gift_"));

    cli_cmd(&data_dir)
        .args(["gift", "join", &link, "--sender", "Bob", "--message", "Good luck!"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Letter added!"));

    let id = extract_field(&stdout, "ID:").unwrap();
    cli_cmd(&data_dir)
        .args(["gift", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Letters: 2"))
        .stdout(predicate::str::contains("Bob - Good luck!"));
}

#[test]
fn test_join_with_stale_link_is_not_found() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args([
            "gift",
            "join",
            "https://momentcraft.app/index.html?mode=collaboration&giftId=gift_1730000000000_zzzzzzzzz",
            "--sender",
            "Bob",
            "--message",
            "hi",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("may no longer be valid"));

    // The stale link never created a gift
    cli_cmd(&data_dir)
        .args(["gift", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No gifts yet."));
}

// ============================================================================
// Selections
// ============================================================================

#[test]
fn test_select_is_login_gated_then_applies() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["select", "effect", "hearts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Login required"));

    cli_cmd(&data_dir).args(["account", "login"]).assert().success();

    cli_cmd(&data_dir)
        .args(["select", "effect", "hearts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Effect selected: hearts"));

    cli_cmd(&data_dir)
        .args(["select", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Effect:     hearts"));

    cli_cmd(&data_dir)
        .args(["select", "clear"])
        .assert()
        .success();

    cli_cmd(&data_dir)
        .args(["select", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Effect:     (none)"));
}

#[test]
fn test_select_unknown_effect_fails() {
    let data_dir = TempDir::new().unwrap();
    cli_cmd(&data_dir).args(["account", "login"]).assert().success();

    cli_cmd(&data_dir)
        .args(["select", "effect", "fireworks"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No effect with id"));
}

#[test]
fn test_catalog_music_lists_defaults() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["catalog", "music"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default_1"))
        .stdout(predicate::str::contains("Happy Birthday Song 1"))
        .stdout(predicate::str::contains("[Default]"));
}

// ============================================================================
// Accounts
// ============================================================================

#[test]
fn test_register_then_duplicate_email_fails() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args([
            "account", "register", "--name", "Alice", "--email", "alice@example.com",
            "--password", "pw",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("You are now logged in"));

    cli_cmd(&data_dir)
        .args([
            "account", "register", "--name", "Imposter", "--email", "alice@example.com",
            "--password", "pw2",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already registered"));
}

// ============================================================================
// Admin Commands
// ============================================================================

#[test]
fn test_admin_commands_require_login() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["admin", "dashboard"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Admin access required"));
}

#[test]
fn test_admin_login_rejects_bad_credentials() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["admin", "login", "admin", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid username or password!"));
}

#[test]
fn test_admin_dashboard_after_login() {
    let data_dir = TempDir::new().unwrap();
    create_gift(&data_dir, "Alice");

    cli_cmd(&data_dir)
        .args(["admin", "login", "admin", "admin123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Admin login successful."));

    cli_cmd(&data_dir)
        .args(["admin", "dashboard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gifts:       1"))
        .stdout(predicate::str::contains("Music:       5"))
        .stdout(predicate::str::contains("Alice created a gift for Dina"));
}

#[test]
fn test_admin_cannot_delete_system_music() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["admin", "login", "admin", "admin123"])
        .assert()
        .success();

    cli_cmd(&data_dir)
        .args(["admin", "music", "remove", "default_1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("System tracks cannot be deleted."));
}

#[test]
fn test_admin_background_delete_is_unconditional() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["admin", "login", "admin", "admin123"])
        .assert()
        .success();

    cli_cmd(&data_dir)
        .args(["admin", "backgrounds", "remove", "bg2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Background removed."));

    cli_cmd(&data_dir)
        .args(["admin", "backgrounds", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bg1"))
        .stdout(predicate::str::contains("bg2").not());
}

#[test]
fn test_admin_gift_moderation() {
    let data_dir = TempDir::new().unwrap();
    let id = create_gift(&data_dir, "Alice");

    cli_cmd(&data_dir)
        .args(["admin", "login", "admin", "admin123"])
        .assert()
        .success();

    cli_cmd(&data_dir)
        .args(["admin", "gifts", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(&id));

    cli_cmd(&data_dir)
        .args(["admin", "gifts", "delete", &id])
        .assert()
        .success();

    // Idempotent: deleting again is still fine
    cli_cmd(&data_dir)
        .args(["admin", "gifts", "delete", &id])
        .assert()
        .success();

    cli_cmd(&data_dir)
        .args(["gift", "show", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Gift not found"));
}

//! CLI command integration tests.
//! Each test uses a temp directory via WB_DATA_DIR for full isolation.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn wb_cmd(data_dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("wb").unwrap();
    cmd.env("WB_DATA_DIR", data_dir.path());
    cmd
}

fn extract_stat_value(output: &str, prefix: &str) -> String {
    output
        .lines()
        .find(|l| l.starts_with(prefix))
        .unwrap_or_else(|| panic!("stat line starting with '{prefix}' not found in output:\n{output}"))
        .split_whitespace()
        .last()
        .unwrap()
        .to_string()
}

#[test]
fn stats_fresh_profile() {
    let dir = TempDir::new().unwrap();
    wb_cmd(&dir)
        .args(["stats", "--profile", "fresh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("profile:   fresh"))
        .stdout(predicate::str::contains("cycles:    0"))
        .stdout(predicate::str::contains("turns:     0"));

    assert!(dir.path().join("profiles").join("fresh.db").exists());
}

#[test]
fn chat_replies_and_records_history() {
    let dir = TempDir::new().unwrap();

    wb_cmd(&dir)
        .args(["chat", "I have a terrible headache"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Headaches can be caused by"));

    wb_cmd(&dir)
        .args(["chat", "xyz123 random gibberish"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "I'm primarily focused on health and wellness topics",
        ));

    wb_cmd(&dir)
        .args(["history", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("you:   xyz123 random gibberish"))
        .stdout(predicate::str::contains("terrible headache").not());
}

#[test]
fn chat_blank_message_fails() {
    let dir = TempDir::new().unwrap();
    wb_cmd(&dir)
        .args(["chat", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("message is empty"));
}

#[test]
fn chat_verbose_reports_match() {
    let dir = TempDir::new().unwrap();
    wb_cmd(&dir)
        .args(["chat", "hello", "--verbose"])
        .assert()
        .success()
        .stderr(predicate::str::contains("--- matched: rule:greeting ---"));
}

#[test]
fn history_empty() {
    let dir = TempDir::new().unwrap();
    wb_cmd(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("(no conversation yet)"));
}

#[test]
fn topics_and_topic() {
    let dir = TempDir::new().unwrap();
    wb_cmd(&dir)
        .arg("topics")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sleep: "))
        .stdout(predicate::str::contains("Hydration: "));

    wb_cmd(&dir)
        .args(["topics", "--search", "yoga"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stress Management: "))
        .stdout(predicate::str::contains("Sleep: ").not());

    wb_cmd(&dir)
        .args(["topic", "menstrual health"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Menstrual Health\n"));

    wb_cmd(&dir)
        .args(["topic", "astrology"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown topic"));
}

#[test]
fn knowledge_toml_overrides_builtin_table() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("knowledge.toml"),
        "[[entry]]\ntopic = \"Sleep\"\ncontent = \"Lights out by ten.\"\n",
    )
    .unwrap();

    wb_cmd(&dir)
        .args(["chat", "help me sleep"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lights out by ten."));
}

#[test]
fn predict_without_data() {
    let dir = TempDir::new().unwrap();
    wb_cmd(&dir)
        .arg("predict")
        .assert()
        .success()
        .stdout(predicate::str::contains("(no period data yet)"));
}

#[test]
fn period_log_then_predict() {
    let dir = TempDir::new().unwrap();

    for (start, end) in [
        ("2024-01-01", "2024-01-05"),
        ("2024-01-29", "2024-02-02"),
        ("2024-02-26", "2024-03-01"),
    ] {
        wb_cmd(&dir)
            .args(["period", "log", start, end])
            .assert()
            .success()
            .stdout(predicate::str::contains("logged"));
    }

    wb_cmd(&dir)
        .arg("predict")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "next period: 2024-03-25 (average cycle 28 days)",
        ));
}

#[test]
fn period_toggle_sequence() {
    let dir = TempDir::new().unwrap();

    wb_cmd(&dir)
        .args(["period", "toggle", "2024-05-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("period started 2024-05-01"));

    wb_cmd(&dir)
        .args(["period", "toggle", "2024-05-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-05-01 to 2024-05-05 recorded (5 days)"));

    wb_cmd(&dir)
        .args(["period", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("history:  1"));
}

#[test]
fn period_log_rejects_inverted_range() {
    let dir = TempDir::new().unwrap();
    wb_cmd(&dir)
        .args(["period", "log", "2024-02-10", "2024-02-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid range"));
}

#[test]
fn bad_date_is_rejected() {
    let dir = TempDir::new().unwrap();
    wb_cmd(&dir)
        .args(["period", "toggle", "01/02/2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected YYYY-MM-DD"));
}

#[test]
fn day_log_accumulates() {
    let dir = TempDir::new().unwrap();

    wb_cmd(&dir)
        .args(["day", "2024-03-02", "--symptom", "cramps", "--mood", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("symptoms: Cramps"))
        .stdout(predicate::str::contains("mood:     2/5"));

    wb_cmd(&dir)
        .args(["day", "2024-03-02", "--symptom", "mood swings", "--notes", "long day"])
        .assert()
        .success()
        .stdout(predicate::str::contains("symptoms: Cramps, Mood Swings"))
        .stdout(predicate::str::contains("mood:     2/5"))
        .stdout(predicate::str::contains("notes:    long day"));

    wb_cmd(&dir)
        .args(["day", "2024-03-02", "--mood", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn emotion_log_and_list() {
    let dir = TempDir::new().unwrap();

    wb_cmd(&dir)
        .args(["emotion", "log", "2024-04-02", "Anxious", "--note", "exam"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-04-02: anxious"));
    wb_cmd(&dir)
        .args(["emotion", "log", "2024-04-01", "calm"])
        .assert()
        .success();

    let output = wb_cmd(&dir).args(["emotion", "list"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["2024-04-02  anxious  exam", "2024-04-01  calm"]);

    wb_cmd(&dir)
        .args(["emotion", "log", "2024-04-03", "grumpy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown emotion"));
}

#[test]
fn emotion_delete_removes_entry() {
    let dir = TempDir::new().unwrap();

    for (date, emotion) in [("2024-04-01", "calm"), ("2024-04-02", "sad")] {
        wb_cmd(&dir)
            .args(["emotion", "log", date, emotion])
            .assert()
            .success();
    }

    wb_cmd(&dir)
        .args(["emotion", "delete", "2024-04-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted 2024-04-01: calm"));

    wb_cmd(&dir)
        .args(["emotion", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-04-02  sad"))
        .stdout(predicate::str::contains("2024-04-01").not());

    wb_cmd(&dir)
        .args(["emotion", "delete", "2024-04-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no entry for 2024-04-01"));
}

#[test]
fn sessions_listing() {
    let dir = TempDir::new().unwrap();
    wb_cmd(&dir)
        .args(["sessions", "--category", "sleep"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deep Sleep"))
        .stdout(predicate::str::contains("45:00"))
        .stdout(predicate::str::contains("Flow State").not());

    wb_cmd(&dir)
        .args(["sessions", "--id", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stress Relief (relax)"))
        .stdout(predicate::str::contains("15:00"));
}

#[test]
fn profiles_are_isolated() {
    let dir = TempDir::new().unwrap();
    wb_cmd(&dir)
        .args(["emotion", "log", "2024-04-02", "happy", "--profile", "a"])
        .assert()
        .success();

    wb_cmd(&dir)
        .args(["emotion", "list", "--profile", "b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(no entries)"));
}

#[test]
fn export_import_roundtrip() {
    let dir = TempDir::new().unwrap();

    wb_cmd(&dir)
        .args(["period", "log", "2024-01-01", "2024-01-05", "--profile", "src"])
        .assert()
        .success();
    wb_cmd(&dir)
        .args(["emotion", "log", "2024-01-02", "tired", "--profile", "src"])
        .assert()
        .success();

    let export_path = dir.path().join("export.json");
    wb_cmd(&dir)
        .args(["export", "--profile", "src"])
        .arg(&export_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("exported to"));
    assert!(export_path.exists(), "export file should exist");

    wb_cmd(&dir)
        .args(["import", "--profile", "dst"])
        .arg(&export_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("imported from"));

    let stats = |profile: &str| {
        let output = wb_cmd(&dir)
            .args(["stats", "--profile", profile])
            .output()
            .unwrap();
        String::from_utf8_lossy(&output.stdout).to_string()
    };
    let (a, b) = (stats("src"), stats("dst"));
    assert_eq!(extract_stat_value(&a, "cycles:"), extract_stat_value(&b, "cycles:"));
    assert_eq!(extract_stat_value(&a, "emotions:"), "1");
    assert_eq!(extract_stat_value(&b, "emotions:"), "1");
}

#[test]
fn import_invalid_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{ not json").unwrap();

    wb_cmd(&dir)
        .arg("import")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to import JSON"));
}

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::path::Path;

fn ledger(state: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ledger").expect("ledger binary builds");
    cmd.arg("--state").arg(state).env("RUST_LOG", "warn");
    cmd
}

fn read_state(path: &Path) -> Value {
    let raw = std::fs::read_to_string(path).expect("state file readable");
    serde_json::from_str(&raw).expect("state file is JSON")
}

#[test]
fn cli_init_refuses_overwrite_without_force() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = dir.path().join("state.json");

    ledger(&state).arg("init").assert().success();
    assert_eq!(read_state(&state), json!({"ledger": {}}));

    ledger(&state)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("REFUSING INIT"));

    ledger(&state).args(["init", "--force"]).assert().success();
    Ok(())
}

#[test]
fn cli_get_and_set_ledger_values() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = dir.path().join("state.json");
    ledger(&state).arg("init").assert().success();

    ledger(&state)
        .args(["set", "publisherTime", "1"])
        .assert()
        .success();
    assert_eq!(read_state(&state), json!({"ledger": {"publisherTime": 1}}));

    ledger(&state)
        .args(["get", "publisherTime"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1"));

    ledger(&state)
        .args(["get", "missing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("null"));

    ledger(&state)
        .args(["set", "publisherTime", "{broken"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("argument must be valid JSON"));
    Ok(())
}

#[test]
fn cli_save_replace_and_remove_promotion() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = dir.path().join("state.json");
    let settings = dir.path().join("settings.yaml");
    std::fs::write(&settings, "payments:\n  enabled: false\n")?;
    let settings_s = settings.to_string_lossy().to_string();

    ledger(&state).arg("init").assert().success();

    let first = r#"{"promotionId":"2","stateWallet":{"disabledWallet":{"notification":{"message":"Hello"}}}}"#;
    ledger(&state)
        .args(["promotion", "save", "--payload", first, "--settings", &settings_s])
        .assert()
        .success()
        .stdout(predicate::str::contains("hide_notification=").not());
    assert_eq!(
        read_state(&state)["ledger"]["promotion"],
        json!({
            "promotionId": "2",
            "activeState": "disabledWallet",
            "remindTimestamp": -1,
            "stateWallet": {"disabledWallet": {"notification": {"message": "Hello"}}}
        })
    );

    let payload_file = dir.path().join("promo.json");
    std::fs::write(&payload_file, r#"{"promotionId":"1"}"#)?;
    ledger(&state)
        .args(["promotion", "save", "--settings", &settings_s, "--payload-file"])
        .arg(&payload_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("hide_notification=Hello"));
    assert_eq!(
        read_state(&state)["ledger"]["promotion"],
        json!({"promotionId": "1", "activeState": "disabledWallet", "remindTimestamp": -1})
    );

    ledger(&state)
        .args(["promotion", "remove"])
        .assert()
        .success();
    assert_eq!(read_state(&state), json!({"ledger": {"promotion": {}}}));
    Ok(())
}

#[test]
fn cli_classify_notification_and_reminders() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = dir.path().join("state.json");
    std::fs::write(
        &state,
        r#"{"ledger": {"info": {"balance": 10}, "promotion": {"promotionId": "1"}}}"#,
    )?;

    ledger(&state)
        .args(["promotion", "classify", "--payments-enabled", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("active_state=fundedWallet"));

    ledger(&state)
        .args(["promotion", "set-notification", "message", "\"Funded!\""])
        .assert()
        .success()
        .stdout(predicate::str::contains("Funded!"));

    ledger(&state)
        .args(["promotion", "remind-later", "--offset-ms", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("remind_timestamp="));

    let remind_at = read_state(&state)["ledger"]["promotion"]["remindTimestamp"]
        .as_i64()
        .expect("remindTimestamp is an integer");

    ledger(&state)
        .args(["promotion", "due", "--now-ms", &(remind_at - 1).to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("reminder_due=false"));

    ledger(&state)
        .args(["promotion", "due", "--now-ms", &remind_at.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("reminder_due=true"));

    ledger(&state)
        .args(["promotion", "about"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Funded!"));
    Ok(())
}

#[test]
fn cli_missing_state_file_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let state = dir.path().join("absent.json");
    ledger(&state)
        .args(["promotion", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read state file"));
}

#[test]
fn cli_settings_hash_prints_hash() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let settings = dir.path().join("settings.yaml");
    std::fs::write(&settings, "payments:\n  enabled: true\n")?;

    Command::cargo_bin("ledger")?
        .env("RUST_LOG", "warn")
        .arg("settings-hash")
        .arg(&settings)
        .assert()
        .success()
        .stdout(predicate::str::contains("settings_hash="))
        .stdout(predicate::str::contains(r#"{"payments":{"enabled":true}}"#));
    Ok(())
}

//! Offline behavior of the `bankkaro` binary

use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary run from an empty directory with no `BANKKARO_*` overrides
fn bankkaro(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bankkaro").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("BANKKARO_CARDS_URL")
        .env_remove("BANKKARO_CALCULATOR_URL")
        .env_remove("BANKKARO_TIMEOUT_MS")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    bankkaro(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("cards"))
        .stdout(predicate::str::contains("calculate"))
        .stdout(predicate::str::contains("questions"))
        .stdout(predicate::str::contains("health"));
}

#[test]
fn test_questions_text() {
    let dir = TempDir::new().unwrap();
    bankkaro(&dir)
        .args(["questions", "--category", "fuel"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fuel"))
        .stdout(predicate::str::contains("Monthly Fuel Expenses"))
        .stdout(predicate::str::contains("1 question"));
}

#[test]
fn test_questions_json() {
    let dir = TempDir::new().unwrap();
    let output = bankkaro(&dir)
        .args(["--format", "json", "questions", "--category", "travel"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let questions: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let keys: Vec<_> = questions
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["key"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        keys,
        [
            "hotels_annual",
            "flights_annual",
            "domestic_lounge_usage_quarterly",
            "international_lounge_usage_quarterly"
        ]
    );
}

#[test]
fn test_unknown_category_rejected() {
    let dir = TempDir::new().unwrap();
    bankkaro(&dir)
        .args(["questions", "--category", "groceries"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown calculator category"));
}

#[test]
fn test_invalid_slug_fails_closed() {
    let dir = TempDir::new().unwrap();
    let output = bankkaro(&dir)
        .args(["--format", "json", "cards", &"x".repeat(101)])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["count"], 0);
    assert_eq!(doc["notifications"].as_array().unwrap().len(), 1);
    assert_eq!(doc["notifications"][0]["title"], "Error");
    assert_eq!(
        doc["notifications"][0]["description"],
        "Unable to load cards. Please try again."
    );
}

#[test]
fn test_invalid_spend_fails_closed() {
    let dir = TempDir::new().unwrap();
    bankkaro(&dir)
        .args(["calculate", "--category", "fuel", "--spend", "custom=-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Unable to calculate rewards. Please try again.",
        ));
}

#[test]
fn test_malformed_spend_argument() {
    let dir = TempDir::new().unwrap();
    bankkaro(&dir)
        .args(["calculate", "--spend", "fuel=lots"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a number"));
}

#[test]
fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();
    bankkaro(&dir)
        .args(["--config", "nope.toml", "cards"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_bad_endpoint_in_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("bankkaro.toml"),
        "[gateway]\ncards_url = \"ftp://cards.example\"\n",
    )
    .unwrap();

    bankkaro(&dir)
        .arg("cards")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid gateway configuration"));
}

#[test]
fn test_spend_must_be_finite() {
    let dir = TempDir::new().unwrap();
    bankkaro(&dir)
        .args(["calculate", "--spend", "fuel=NaN"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a number"));
}

#[test]
fn test_bad_timeout_env_reports_code() {
    let dir = TempDir::new().unwrap();
    bankkaro(&dir)
        .env("BANKKARO_TIMEOUT_MS", "soon")
        .arg("health")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid BANKKARO_* environment"))
        .stderr(predicate::str::contains("E3000"));
}

#[test]
fn test_health_reports_coded_errors() {
    let server = MockServer::start();
    let cards = server.mock(|when, then| {
        when.method(POST).path("/sp/api/cards");
        then.status(503).body("maintenance");
    });
    let calculator = server.mock(|when, then| {
        when.method(POST).path("/cg/api/pro");
        then.status(200).json_body(serde_json::json!({"savings": 4200}));
    });

    let dir = TempDir::new().unwrap();
    let output = bankkaro(&dir)
        .env("BANKKARO_CARDS_URL", server.url("/sp/api/cards"))
        .env("BANKKARO_CALCULATOR_URL", server.url("/cg/api/pro"))
        .args(["--format", "json", "health"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    cards.assert_hits(1);
    calculator.assert_hits(1);

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["overall"], "degraded");
    assert_eq!(doc["endpoints"][0]["name"], "cards");
    assert_eq!(doc["endpoints"][0]["error"]["code_str"], "E4002");
    assert_eq!(doc["endpoints"][0]["error"]["category"], "Network");
    assert_eq!(doc["endpoints"][0]["error"]["context"], "maintenance");
    assert_eq!(doc["endpoints"][1]["name"], "calculator");
    assert_eq!(doc["endpoints"][1]["status"], "ok");
}

#[test]
fn test_health_all_ok() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/sp/api/cards");
        then.status(200)
            .json_body(serde_json::json!({"cards": [{"id": "1", "name": "Fuel Card"}]}));
    });
    server.mock(|when, then| {
        when.method(POST).path("/cg/api/pro");
        then.status(200).json_body(serde_json::json!({}));
    });

    let dir = TempDir::new().unwrap();
    bankkaro(&dir)
        .env("BANKKARO_CARDS_URL", server.url("/sp/api/cards"))
        .env("BANKKARO_CALCULATOR_URL", server.url("/cg/api/pro"))
        .arg("health")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 card"))
        .stdout(predicate::str::contains("All endpoints healthy"));
}

#![forbid(unsafe_code)]

use assert_cmd::prelude::*;
use httpmock::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const CORPUS_PATH: &str = "/project_resources/translations.json";

fn locale_sync(output_dir: &Path) -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("locale-sync")?;
    cmd.arg("--no-color")
        .arg("--output-dir")
        .arg(output_dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("LOCALE_SYNC_API_URL")
        .env_remove("LOCALE_SYNC_API_KEY")
        .env_remove("LOCALE_SYNC_LANGUAGES")
        .env_remove("LOCALE_SYNC_OUTPUT_DIR")
        .env_remove("LOCALE_SYNC_DEFAULT_LANGUAGE")
        .env_remove("LOCALE_SYNC_TIMEOUT");
    Ok(cmd)
}

#[test]
fn sync_merges_into_existing_bundle() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path(CORPUS_PATH)
            .query_param("api_key", "test-key");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"en-US":{"common":{"hello":"Hi"}}}"#);
    });

    let temp = TempDir::new()?;
    let out = temp.path().join("locales");
    fs::create_dir_all(out.join("en-US"))?;
    fs::write(
        out.join("en-US/common.json"),
        "{\n  \"hello\": \"Hello\",\n  \"bye\": \"Bye\"\n}\n",
    )?;

    let mut cmd = locale_sync(&out)?;
    cmd.arg("--api-url")
        .arg(server.url(CORPUS_PATH))
        .arg("--api-key")
        .arg("test-key")
        .arg("--languages")
        .arg("en-US");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("en-US/common: updated, 2→2 keys, +0 new"))
        .stdout(predicate::str::contains("1 files processed"));
    mock.assert();

    let written = fs::read_to_string(out.join("en-US/common.json"))?;
    assert_eq!(written, "{\n  \"hello\": \"Hi\",\n  \"bye\": \"Bye\"\n}\n");
    Ok(())
}

#[test]
fn sync_json_report() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(CORPUS_PATH);
        then.status(200)
            .body(r#"{"en":{"common":{"a":"A"}},"ar":{"common":{"a":"أ"}}}"#);
    });

    let temp = TempDir::new()?;
    let out = temp.path().join("locales");

    let mut cmd = locale_sync(&out)?;
    cmd.arg("--json")
        .arg("--api-url")
        .arg(server.url(CORPUS_PATH))
        .arg("--api-key")
        .arg("k");
    let output = cmd.output()?;
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let cells = report["cells"].as_array().ok_or("cells missing")?;
    assert_eq!(cells.len(), 2);
    assert!(cells.iter().all(|cell| cell["action"] == "created"));
    assert!(out.join("ar/common.json").is_file());
    Ok(())
}

#[test]
fn fetch_failure_exits_nonzero_and_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(CORPUS_PATH);
        then.status(500).body("boom");
    });

    let temp = TempDir::new()?;
    let out = temp.path().join("locales");

    let mut cmd = locale_sync(&out)?;
    cmd.arg("sync")
        .arg("--api-url")
        .arg(server.url(CORPUS_PATH))
        .arg("--api-key")
        .arg("secret-key");
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("500"))
        .stderr(predicate::str::contains("secret-key").not());

    assert!(!out.exists());
    Ok(())
}

#[test]
fn missing_api_key_exits_nonzero() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let out = temp.path().join("locales");

    let mut cmd = locale_sync(&out)?;
    cmd.arg("sync");
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("LOCALE_SYNC_API_KEY"));
    assert!(!out.exists());
    Ok(())
}

#[test]
fn dry_run_leaves_store_untouched() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(CORPUS_PATH);
        then.status(200).body(r#"{"en":{"common":{"a":"A"}}}"#);
    });

    let temp = TempDir::new()?;
    let out = temp.path().join("locales");

    let mut cmd = locale_sync(&out)?;
    cmd.arg("--dry-run")
        .arg("--languages")
        .arg("en")
        .arg("--api-url")
        .arg(server.url(CORPUS_PATH))
        .arg("--api-key")
        .arg("k");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("dry run"));

    assert!(!out.join("en/common.json").exists());
    Ok(())
}

#[test]
fn status_lists_bundles() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let out = temp.path().join("locales");
    fs::create_dir_all(out.join("en"))?;
    fs::write(out.join("en/common.json"), r#"{"a": "A", "b": {"c": "C"}}"#)?;

    let mut cmd = locale_sync(&out)?;
    cmd.arg("status").arg("--languages").arg("en");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("common"));
    Ok(())
}

#[test]
fn get_resolves_nested_key_with_fallback() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let out = temp.path().join("locales");
    fs::create_dir_all(out.join("en"))?;
    fs::write(
        out.join("en/players.json"),
        r#"{"pdf": {"pdfDocument": "PDF document"}}"#,
    )?;

    let mut cmd = locale_sync(&out)?;
    cmd.arg("get")
        .arg("players")
        .arg("pdf.pdfDocument")
        .arg("--lang")
        .arg("ar");
    cmd.assert()
        .success()
        .stdout(predicate::str::diff("PDF document\n"));

    let mut cmd = locale_sync(&out)?;
    cmd.arg("get").arg("players").arg("pdf.missing");
    cmd.assert()
        .success()
        .stdout(predicate::str::diff("pdf.missing\n"));
    Ok(())
}

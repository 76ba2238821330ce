use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde_json::Value;
use tempfile::TempDir;

const EXPECTED_ROOT_HELP: &str = "payee-resolver - map raw statement payees to real merchant names

Usage:
  payee-resolver <command>

Start here:
  payee-resolver resolve \"7-ELEVEN 23020 SEATTLE WA\"
  payee-resolver batch --help
  payee-resolver model
";

const BUNDLED_CORPUS: &str = "LAKE CITY SEATTLE WA
LAKE CITY 2304
LAKE CITY WAY STORE
AMAZN Mktp US*MM3ABCD
Amazon Marketplace AMZN.COM/BILL WA
AMAZON MKT 12345
UBER TRIP 29384
UBER *TRIP HELP.UBER.COM
UBER EATS 21390
";

struct CliOutcome {
    code: Option<i32>,
    stdout: String,
    stderr: String,
}

fn workspace() -> (TempDir, PathBuf) {
    let dir = tempfile::Builder::new().prefix("payee-resolver-cli-").tempdir();
    assert!(dir.is_ok());
    match dir {
        Ok(dir) => {
            let corpus = write_file(dir.path(), "corpus.txt", BUNDLED_CORPUS);
            (dir, corpus)
        }
        Err(_) => panic!("could not create a temporary workspace"),
    }
}

fn write_file(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    let write = fs::write(&path, body);
    assert!(write.is_ok());
    path
}

fn command_in(dir: &Path, corpus: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_payee-resolver"));
    command.current_dir(dir);
    command.env("PAYEE_RESOLVER_CORPUS", corpus);
    command.env_remove("RUST_LOG");
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());
    command
}

fn run_cli_in(dir: &Path, corpus: &Path, args: &[&str]) -> CliOutcome {
    let mut command = command_in(dir, corpus);
    command.args(args);

    let output = command.output();
    assert!(output.is_ok());
    match output {
        Ok(result) => CliOutcome {
            code: result.status.code(),
            stdout: String::from_utf8_lossy(&result.stdout).to_string(),
            stderr: String::from_utf8_lossy(&result.stderr).to_string(),
        },
        Err(_) => CliOutcome {
            code: None,
            stdout: String::new(),
            stderr: String::new(),
        },
    }
}

fn parse_json(body: &str) -> Value {
    let parsed = serde_json::from_str::<Value>(body);
    assert!(parsed.is_ok(), "not JSON: {body}");
    parsed.unwrap_or(Value::Null)
}

fn assert_text_error_contract(body: &str, code: &str) {
    assert!(body.contains("Something went wrong, but it's easy to fix."));
    assert!(body.contains(&format!("  Error:    {code}")));
    assert!(body.contains("  Details:"));
    assert!(body.contains("What to do next:"));
}

#[test]
fn root_command_uses_short_plaintext_help() {
    let (dir, corpus) = workspace();
    let outcome = run_cli_in(dir.path(), &corpus, &[]);
    assert_eq!(outcome.code, Some(0));
    assert_eq!(outcome.stdout, EXPECTED_ROOT_HELP);
}

#[test]
fn help_and_version_return_success_output() {
    let (dir, corpus) = workspace();

    let help = run_cli_in(dir.path(), &corpus, &["--help"]);
    assert_eq!(help.code, Some(0));
    assert!(help.stdout.contains("payee-resolver resolve <payee>"));
    assert!(help.stdout.contains("PAYEE_RESOLVER_CORPUS"));

    let version = run_cli_in(dir.path(), &corpus, &["--version"]);
    assert_eq!(version.code, Some(0));
    assert_eq!(version.stdout.trim(), "payee-resolver 0.1.0");
}

#[test]
fn batch_help_describes_column_choice_and_confidence_bands() {
    let (dir, corpus) = workspace();
    let outcome = run_cli_in(dir.path(), &corpus, &["batch", "--help"]);
    assert_eq!(outcome.code, Some(0));
    assert!(outcome.stdout.contains("a column headed `payee` (any case)"));
    assert!(outcome.stdout.contains("Confidence by stage:"));
}

#[test]
fn resolve_plaintext_and_json_contracts_are_supported() {
    let (dir, corpus) = workspace();

    let text = run_cli_in(dir.path(), &corpus, &["resolve", "7-ELEVEN 23020 SEATTLE WA"]);
    assert_eq!(text.code, Some(0));
    assert_eq!(text.stdout, "Real name:   7-Eleven\nConfidence:  0.95\n");

    let json = run_cli_in(
        dir.path(),
        &corpus,
        &["resolve", "LAKE CITY SEATTLE WA", "--json"],
    );
    assert_eq!(json.code, Some(0));
    let payload = parse_json(&json.stdout);
    assert!(
        payload["real_name"]
            .as_str()
            .is_some_and(|name| name.contains("Lake City"))
    );
    assert_eq!(payload["confidence"], Value::from(0.85));
    assert!(payload.get("ok").is_none());
}

#[test]
fn resolve_accepts_empty_payee() {
    let (dir, corpus) = workspace();
    let outcome = run_cli_in(dir.path(), &corpus, &["resolve", "", "--json"]);
    assert_eq!(outcome.code, Some(0));
    let payload = parse_json(&outcome.stdout);
    assert_eq!(payload["real_name"], Value::String(String::new()));
    assert_eq!(payload["confidence"], Value::from(0.0));
}

#[test]
fn debug_logging_goes_to_stderr_only() {
    let (dir, corpus) = workspace();
    let mut command = command_in(dir.path(), &corpus);
    command.env("RUST_LOG", "debug");
    command.args(["resolve", "SHELL OIL 57", "--json"]);

    let output = command.output();
    assert!(output.is_ok());
    if let Ok(result) = output {
        assert!(result.status.success());
        let stdout = String::from_utf8_lossy(&result.stdout).to_string();
        let stderr = String::from_utf8_lossy(&result.stderr).to_string();
        assert_eq!(parse_json(&stdout)["real_name"], Value::String("Shell".to_string()));
        assert!(stderr.contains("known payee match"));
    }
}

#[test]
fn batch_writes_default_output_file_and_prints_table() {
    let (dir, corpus) = workspace();
    write_file(
        dir.path(),
        "payees.csv",
        "Payee,amount\n7-ELEVEN 23020 SEATTLE WA,-4.10\n,-1.00\nLOCAL STORE FL,-12.00\n",
    );

    let outcome = run_cli_in(dir.path(), &corpus, &["batch", "payees.csv"]);
    assert_eq!(outcome.code, Some(0));
    let lines = outcome.stdout.lines().collect::<Vec<&str>>();
    assert!(lines[0].starts_with("ORIGINAL PAYEE"));
    assert_eq!(lines[1], "-".repeat(96));
    assert!(lines[2].starts_with("7-ELEVEN 23020 SEATTLE WA"));
    assert!(lines[2].contains("| 7-Eleven"));
    assert!(lines[3].starts_with("LOCAL STORE FL"));
    assert!(outcome.stdout.contains("Rows skipped:   1"));
    assert!(
        outcome
            .stdout
            .contains("Results saved to resolved_payees.csv")
    );
    assert!(outcome.stderr.contains("skipped 1 of 3 batch rows"));

    let written = fs::read_to_string(dir.path().join("resolved_payees.csv"));
    assert!(written.is_ok());
    if let Ok(body) = written {
        assert!(body.starts_with("original_payee,real_name,confidence\n"));
        assert!(body.contains("7-ELEVEN 23020 SEATTLE WA,7-Eleven,0.95"));
        assert!(body.contains("LOCAL STORE FL,Local Store,0.4"));
    }
}

#[test]
fn batch_json_uses_structured_envelope() {
    let (dir, corpus) = workspace();
    write_file(dir.path(), "payees.csv", "0\nAMAZN Mktp US*MM3ABCD\n");

    let outcome = run_cli_in(
        dir.path(),
        &corpus,
        &["batch", "payees.csv", "--output", "out.csv", "--json"],
    );
    assert_eq!(outcome.code, Some(0));
    let payload = parse_json(&outcome.stdout);
    assert_eq!(payload["ok"], Value::Bool(true));
    assert_eq!(payload["version"], Value::String("v1".to_string()));
    assert_eq!(payload["data"]["payee_column"], Value::String("0".to_string()));
    assert_eq!(
        payload["data"]["rows"][0]["real_name"],
        Value::String("Amazon".to_string())
    );
    assert!(dir.path().join("out.csv").exists());
}

#[test]
fn missing_batch_input_is_a_user_error_in_both_modes() {
    let (dir, corpus) = workspace();

    let text = run_cli_in(dir.path(), &corpus, &["batch", "absent.csv"]);
    assert_eq!(text.code, Some(1));
    assert_text_error_contract(&text.stdout, "batch_input_unreadable");
    assert!(text.stdout.contains("  Path:     absent.csv"));

    let json = run_cli_in(dir.path(), &corpus, &["batch", "absent.csv", "--json"]);
    assert_eq!(json.code, Some(1));
    let payload = parse_json(&json.stdout);
    assert_eq!(
        payload["error"]["code"],
        Value::String("batch_input_unreadable".to_string())
    );
    assert!(payload["error"]["recovery_steps"].is_array());
}

#[test]
fn model_reports_bundled_clusters() {
    let (dir, corpus) = workspace();

    let text = run_cli_in(dir.path(), &corpus, &["model"]);
    assert_eq!(text.code, Some(0));
    assert!(text.stdout.starts_with("Payee cluster model"));
    assert!(text.stdout.contains("  Fitted:        yes"));
    assert!(text.stdout.contains("(3 members)"));

    let json = run_cli_in(dir.path(), &corpus, &["model", "--json"]);
    assert_eq!(json.code, Some(0));
    let payload = parse_json(&json.stdout);
    assert_eq!(payload["data"]["corpus_size"], Value::from(9));
    assert_eq!(payload["data"]["cluster_count"], Value::from(3));
}

#[test]
fn corpus_flag_overrides_environment() {
    let (dir, corpus) = workspace();
    let missing = dir.path().join("missing-corpus.txt");
    let missing_arg = missing.display().to_string();

    let outcome = run_cli_in(
        dir.path(),
        &corpus,
        &["model", "--corpus", missing_arg.as_str(), "--json"],
    );
    assert_eq!(outcome.code, Some(1));
    let payload = parse_json(&outcome.stdout);
    assert_eq!(
        payload["error"]["code"],
        Value::String("corpus_unreadable".to_string())
    );
}

#[test]
fn parse_errors_are_json_when_json_flag_is_present() {
    let (dir, corpus) = workspace();

    let json = run_cli_in(dir.path(), &corpus, &["resolve", "A", "B", "--json"]);
    assert_eq!(json.code, Some(1));
    let payload = parse_json(&json.stdout);
    assert_eq!(
        payload["error"]["code"],
        Value::String("invalid_argument".to_string())
    );

    let text = run_cli_in(dir.path(), &corpus, &["frobnicate"]);
    assert_eq!(text.code, Some(1));
    assert_text_error_contract(&text.stdout, "invalid_argument");
}

#[test]
fn batch_output_pipe_close_does_not_panic() {
    let (dir, corpus) = workspace();
    let mut body = String::from("payee\n");
    for index in 0..5000 {
        body.push_str(&format!("UBER TRIP {index}\n"));
    }
    write_file(dir.path(), "many.csv", &body);

    let mut producer = command_in(dir.path(), &corpus);
    producer.args(["batch", "many.csv"]);
    let spawned = producer.spawn();
    assert!(spawned.is_ok());
    if let Ok(mut child) = spawned {
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        assert!(stdout.is_some());

        if let Some(pipe) = stdout {
            let mut reader = BufReader::new(pipe);
            let mut first_line = String::new();
            assert!(reader.read_line(&mut first_line).is_ok());
            assert!(first_line.starts_with("ORIGINAL PAYEE"));
            drop(reader);
        }

        let status = child.wait();
        assert!(status.is_ok());
        if let Ok(exit_status) = status {
            assert!(exit_status.success());
        }

        if let Some(mut pipe) = stderr {
            let mut stderr_text = String::new();
            assert!(pipe.read_to_string(&mut stderr_text).is_ok());
            assert!(!stderr_text.contains("panicked"));
        }
    }
}

//! Shared helpers for the binary's integration tests.
//!
//! Every run happens in a temp directory with the survey's environment
//! variables cleared, so a stray `survey.toml` or exporter cannot leak in.

#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

pub fn survey_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_human-ai-survey"))
        .args(args)
        .current_dir(dir)
        .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
        .env_remove("SURVEY_CONFIG")
        .env_remove("SURVEY_LOG_FILE")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute human-ai-survey")
}

/// Run and assert success. Returns stdout.
pub fn survey_ok(dir: &Path, args: &[&str]) -> String {
    let out = survey_in(dir, args);
    let stderr = String::from_utf8_lossy(&out.stderr);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        out.status.success(),
        "human-ai-survey {} failed:\nstdout: {stdout}\nstderr: {stderr}",
        args.join(" "),
    );
    stdout.to_string()
}

/// Run and assert failure. Returns stderr.
pub fn survey_fails(dir: &Path, args: &[&str]) -> String {
    let out = survey_in(dir, args);
    assert!(
        !out.status.success(),
        "Expected human-ai-survey {} to fail, but it succeeded.\nstdout: {}",
        args.join(" "),
        String::from_utf8_lossy(&out.stdout),
    );
    String::from_utf8_lossy(&out.stderr).to_string()
}

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod mock_api;

pub use mock_api::MockApi;
pub use mock_api::RecordedRequest;

use assert_cmd::Command;
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;
use tokio::runtime::Runtime;

pub fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// `asc` with every credential source cleared and the config file pointed
/// at an empty temp directory, so the host machine never leaks in.
pub fn asc_cmd(config_dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("asc"));
    for name in [
        "ASC_KEY_ID",
        "ASC_ISSUER_ID",
        "ASC_PRIVATE_KEY_PATH",
        "ASC_PRIVATE_KEY",
        "ASC_PRIVATE_KEY_B64",
        "ASC_BASE_URL",
        "ASC_TIMEOUT",
        "ASC_LOG_LEVEL",
        "ASC_LOG_FILE",
        "NO_COLOR",
    ] {
        cmd.env_remove(name);
    }
    cmd.env("ASC_CONFIG_PATH", config_dir.path().join("config.json"));
    cmd
}

/// Runs the CLI against a [`MockApi`] with valid test credentials.
pub struct TestHarness {
    api: MockApi,
    config_dir: TempDir,
    runtime: Runtime,
}

impl TestHarness {
    pub fn new() -> Self {
        let runtime = Runtime::new().expect("Failed to create tokio runtime");
        let api = runtime.block_on(MockApi::start());
        let config_dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            api,
            config_dir,
            runtime,
        }
    }

    pub fn api(&self) -> &MockApi {
        &self.api
    }

    pub fn cli_command(&self) -> Command {
        let mut cmd = asc_cmd(&self.config_dir);
        cmd.env("ASC_BASE_URL", self.api.base_url())
            .env("ASC_KEY_ID", "TESTKEY123")
            .env("ASC_ISSUER_ID", "issuer-uuid")
            .env(
                "ASC_PRIVATE_KEY_PATH",
                fixtures_path().join("AuthKey_TEST.p8"),
            );
        cmd
    }

    pub fn run(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.cli_command().args(args).assert()
    }

    /// Runs a successful command and parses its JSON stdout.
    pub fn run_json(&self, args: &[&str]) -> Value {
        let output = self.run(args).success().get_output().stdout.clone();
        serde_json::from_slice(&output).unwrap_or_else(|err| {
            panic!(
                "stdout is not JSON ({err}): {}",
                String::from_utf8_lossy(&output)
            )
        })
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.api.get_requests()
    }

    pub fn requests_for(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

/// Parses the structured error an `--output json` failure writes to stderr.
pub fn stderr_json(assert: &assert_cmd::assert::Assert) -> Value {
    let stderr = &assert.get_output().stderr;
    serde_json::from_slice(stderr).unwrap_or_else(|err| {
        panic!(
            "stderr is not JSON ({err}): {}",
            String::from_utf8_lossy(stderr)
        )
    })
}

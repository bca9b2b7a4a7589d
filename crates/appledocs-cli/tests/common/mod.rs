#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::time::Duration;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// Create a configured `appledocs` command suitable for integration tests.
#[allow(dead_code)]
pub fn appledocs_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("appledocs"));
    cmd.timeout(CMD_TIMEOUT);
    cmd
}

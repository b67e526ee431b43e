//! Standard-library root discovery.

use std::path::PathBuf;
use std::process::Command;

use crate::error::EngineError;

/// Expression printing the runtime's library directory and exiting.
const LIB_DIR_EXPR: &str = "io:format(\"~s\", [code:lib_dir()]), halt().";

/// Asks the runtime at `erl` where its standard library lives.
pub fn discover_otp_root(erl: &str) -> Result<PathBuf, EngineError> {
    let output = Command::new(erl)
        .args(["-noshell", "-eval", LIB_DIR_EXPR])
        .output()
        .map_err(|e| EngineError::Spawn {
            program: erl.to_string(),
            source: e,
        })?;

    if !output.status.success() {
        return Err(EngineError::OtpRoot(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if root.is_empty() {
        return Err(EngineError::OtpRoot("empty library directory".to_string()));
    }
    tracing::debug!(%root, "discovered OTP library root");
    Ok(PathBuf::from(root))
}

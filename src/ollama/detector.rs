use tokio::process::Command;

use crate::utils::{GatewayError, Result};

/// Check if the Ollama binary is on the PATH
pub fn is_installed(binary: &str) -> bool {
    which::which(binary).is_ok()
}

/// Raw `ollama list` output, header included
pub async fn list_models(binary: &str) -> Result<String> {
    let output = Command::new(binary)
        .arg("list")
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| {
            GatewayError::BackendUnavailable(format!("failed to run {} list: {}", binary, e))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GatewayError::BackendUnavailable(format!(
            "{} list exited with {}: {}",
            binary,
            output.status,
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

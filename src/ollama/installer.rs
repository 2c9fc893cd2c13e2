use tokio::process::Command;

use crate::utils::{GatewayError, Result};

/// Pull a model and return everything the installer printed.
///
/// The child is killed if the returned future is dropped, so an outer
/// deadline really stops the download.
pub async fn install_model(binary: &str, model: &str) -> Result<String> {
    tracing::info!("Pulling {} with {}...", model, binary);

    let output = Command::new(binary)
        .arg("pull")
        .arg(model)
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| GatewayError::PullFailed(format!("failed to run {} pull: {}", binary, e)))?;

    let mut log = String::from_utf8_lossy(&output.stdout).into_owned();
    log.push_str(&String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        tracing::error!("Pulling {} failed with {}", model, output.status);
        return Err(GatewayError::PullFailed(format!(
            "{} pull {} exited with {}: {}",
            binary,
            model,
            output.status,
            log.trim()
        )));
    }

    tracing::info!("Successfully pulled model {}", model);
    Ok(log)
}

use std::process::{Command, Stdio};

use tracing::info;

use crate::rpc::RpcError;

#[derive(Debug)]
pub struct LocalValidatorConfig {
    pub binary: String,
    pub reset: bool,
    pub wait_time: u64,
    pub rpc_port: Option<u16>,
    pub limit_ledger_size: Option<u64>,
}

impl Default for LocalValidatorConfig {
    fn default() -> Self {
        Self {
            binary: "solana-test-validator".to_string(),
            reset: true,
            wait_time: 10,
            rpc_port: None,
            limit_ledger_size: None,
        }
    }
}

impl LocalValidatorConfig {
    pub fn command(&self) -> String {
        let mut command = format!("{} --quiet", self.binary);
        if self.reset {
            command.push_str(" --reset");
        }
        if let Some(rpc_port) = self.rpc_port {
            command.push_str(&format!(" --rpc-port {}", rpc_port));
        }
        if let Some(limit_ledger_size) = self.limit_ledger_size {
            command.push_str(&format!(" --limit-ledger-size {}", limit_ledger_size));
        }
        command
    }
}

/// Starts a detached test validator and waits `wait_time` seconds for it to
/// accept requests. A validator that exits within that window, for example
/// because its port is taken, is reported as an error.
pub async fn spawn_validator(config: LocalValidatorConfig) -> Result<(), RpcError> {
    let command = config.command();
    info!("Starting validator with command: {}", command);

    let mut child = Command::new("sh")
        .arg("-c")
        .arg(&command)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .spawn()?;

    tokio::time::sleep(tokio::time::Duration::from_secs(config.wait_time)).await;

    if let Some(status) = child.try_wait()? {
        return Err(RpcError::CustomError(format!(
            "Validator `{}` exited during startup with {}",
            command, status
        )));
    }
    // Not waited on; the validator outlives this call.
    std::mem::drop(child);
    Ok(())
}

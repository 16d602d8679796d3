//! Hand-off of exported reports to an external share command

use crate::error::{Result, SobrietyError};
use std::path::Path;
use std::process::Command;

/// Session for passing an exported file to a share command
pub struct ShareSession {
    command: String,
}

impl ShareSession {
    /// Create a new share session with the given command
    pub fn new(share_command: String) -> Self {
        ShareSession {
            command: share_command,
        }
    }

    /// Launch the share command with the file path and return immediately
    pub fn share(&self, file_path: &Path) -> Result<()> {
        let (program, mut args) = self
            .parse_command()
            .ok_or_else(|| SobrietyError::Share("No share command configured".to_string()))?;

        args.push(file_path.to_string_lossy().to_string());
        tracing::debug!(program = %program, path = %file_path.display(), "launching share command");

        // cmd /C resolves .bat and .cmd wrappers on Windows
        let mut cmd = if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(&program);
            cmd
        } else {
            Command::new(&program)
        };

        cmd.args(&args)
            .spawn()
            .map_err(|e| SobrietyError::Share(format!("Failed to launch '{}': {}", program, e)))?;

        Ok(())
    }

    /// Parse command into program and arguments
    fn parse_command(&self) -> Option<(String, Vec<String>)> {
        let mut parts = self.command.split_whitespace();
        let program = parts.next()?.to_string();
        let args = parts.map(|s| s.to_string()).collect();
        Some((program, args))
    }
}

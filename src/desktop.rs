// src/desktop.rs
//! Host integration: clipboard, URL hand-off and printing via local commands

use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::app_log;
use crate::core::ConfigManager;
use crate::error::ClientError;
use crate::utils::split_command;

/// Side effects the view performs outside the application.
pub trait Desktop: Send + Sync {
    fn copy_text(&self, text: &str) -> Result<(), ClientError>;

    /// Hand a URL (PDF retrieval, `mailto:`) to the system handler.
    fn open_url(&self, url: &str) -> Result<(), ClientError>;

    /// Hand a standalone HTML document to the print pipeline.
    fn print_document(&self, html: &str) -> Result<(), ClientError>;
}

#[derive(Debug, Clone)]
pub struct CommandDesktop {
    clipboard_command: String,
    open_command: String,
    print_command: String,
    spool_dir: PathBuf,
}

impl CommandDesktop {
    pub fn new(
        clipboard_command: impl Into<String>,
        open_command: impl Into<String>,
        print_command: impl Into<String>,
    ) -> Self {
        Self {
            clipboard_command: clipboard_command.into(),
            open_command: open_command.into(),
            print_command: print_command.into(),
            spool_dir: std::env::temp_dir(),
        }
    }

    pub fn from_config(config: &ConfigManager) -> Self {
        Self::new(
            config.clipboard_command.clone(),
            config.open_command.clone(),
            config.print_command.clone(),
        )
    }

    /// Directory print documents are written to before spooling.
    pub fn with_spool_dir(mut self, dir: PathBuf) -> Self {
        self.spool_dir = dir;
        self
    }

    fn command(configured: &str) -> Result<Command> {
        let (program, args) = split_command(configured)
            .ok_or_else(|| anyhow::anyhow!("No command configured"))?;
        let mut cmd = Command::new(program);
        cmd.args(args);
        Ok(cmd)
    }

    fn run(mut cmd: Command, what: &str) -> Result<()> {
        let output = cmd
            .output()
            .with_context(|| format!("Failed to execute {} command", what))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("{} command failed: {}", what, stderr.trim());
        }
        Ok(())
    }

    fn pipe_to_clipboard(&self, text: &str) -> Result<()> {
        let mut child = Self::command(&self.clipboard_command)?
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .context("Failed to execute clipboard command")?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .context("Failed to write to clipboard command")?;
        }

        let output = child
            .wait_with_output()
            .context("Clipboard command did not finish")?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("clipboard command failed: {}", stderr.trim());
        }
        Ok(())
    }

    /// Write the document to a temp file, print it, then remove the file.
    /// The print command must have copied the document when it exits.
    fn spool_and_print(&self, html: &str) -> Result<()> {
        let mut spool = tempfile::Builder::new()
            .prefix("hire3x-results-")
            .suffix(".html")
            .tempfile_in(&self.spool_dir)
            .with_context(|| {
                format!("Failed to create print document in {}", self.spool_dir.display())
            })?;
        spool
            .write_all(html.as_bytes())
            .with_context(|| format!("Failed to write print document: {}", spool.path().display()))?;

        let mut cmd = Self::command(&self.print_command)?;
        cmd.arg(spool.path());
        Self::run(cmd, "print")?;
        app_log!(info, "Sent {} to the printer", spool.path().display());

        spool.close().context("Failed to remove print document")
    }
}

impl Desktop for CommandDesktop {
    fn copy_text(&self, text: &str) -> Result<(), ClientError> {
        self.pipe_to_clipboard(text).map_err(|e| {
            app_log!(warn, "Clipboard write failed: {:#}", e);
            ClientError::Clipboard(format!("{:#}", e))
        })
    }

    fn open_url(&self, url: &str) -> Result<(), ClientError> {
        app_log!(info, "Opening {}", url);
        Self::command(&self.open_command)
            .and_then(|mut cmd| {
                cmd.arg(url);
                Self::run(cmd, "open")
            })
            .map_err(|e| ClientError::Host(format!("{:#}", e)))
    }

    fn print_document(&self, html: &str) -> Result<(), ClientError> {
        self.spool_and_print(html)
            .map_err(|e| ClientError::Host(format!("{:#}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_clipboard_program_is_clipboard_error() {
        let desktop = CommandDesktop::new("hire3x-no-such-clipboard", "true", "true");
        let err = desktop.copy_text("hello").unwrap_err();
        assert!(matches!(err, ClientError::Clipboard(_)));
    }

    #[test]
    fn test_empty_open_command_is_host_error() {
        let desktop = CommandDesktop::new("cat", "   ", "true");
        assert!(matches!(
            desktop.open_url("mailto:a@b.c"),
            Err(ClientError::Host(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_clipboard_pipes_text_to_command() {
        let desktop = CommandDesktop::new("cat", "true", "true");
        assert!(desktop.copy_text("Subject: Hi\n\nBody").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_print_spools_document_then_removes_it() {
        let dir = tempfile::tempdir().unwrap();
        let desktop = CommandDesktop::new("cat", "true", "grep -q candidate-card")
            .with_spool_dir(dir.path().to_path_buf());

        desktop
            .print_document("<html><div class=\"candidate-card\"></div></html>")
            .unwrap();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_print_command_is_host_error() {
        let dir = tempfile::tempdir().unwrap();
        let desktop =
            CommandDesktop::new("cat", "true", "false").with_spool_dir(dir.path().to_path_buf());
        assert!(matches!(
            desktop.print_document("<html></html>"),
            Err(ClientError::Host(_))
        ));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}

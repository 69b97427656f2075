use std::io::Write;

use crate::error::{CopyError, Result};

/// Destination for copied text.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        copy_to_system_clipboard(text)
    }
}

/// Writes the payload to stdout, for piping.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl ClipboardSink for StdoutSink {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

/// Copy text to system clipboard using platform-appropriate method
fn copy_to_system_clipboard(text: &str) -> Result<()> {
    // Command-line tools are more reliable than arboard on Linux, where the
    // clipboard owner must outlive the process
    #[cfg(target_os = "linux")]
    {
        let commands: [(&str, &[&str]); 3] = [
            ("wl-copy", &[]),
            ("xclip", &["-selection", "clipboard"]),
            ("xsel", &["--clipboard", "--input"]),
        ];

        for (cmd, args) in commands {
            if pipe_to_command(cmd, args, text) {
                return Ok(());
            }
        }

        Err(CopyError::Clipboard(
            "No clipboard tool found (install xclip or wl-copy)".to_string(),
        ))
    }

    #[cfg(not(target_os = "linux"))]
    {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| CopyError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| CopyError::Clipboard(e.to_string()))?;
        Ok(())
    }
}

/// Feed `text` to a command's stdin. The child is always waited on, even
/// when the write fails.
#[cfg(target_os = "linux")]
fn pipe_to_command(cmd: &str, args: &[&str], text: &str) -> bool {
    use std::process::{Command, Stdio};

    let Ok(mut child) = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    else {
        return false;
    };

    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()).is_ok(),
        None => false,
    };
    let succeeded = child.wait().map(|s| s.success()).unwrap_or(false);

    written && succeeded
}

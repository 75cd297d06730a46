use crate::domain::ports::MapViewer;
use crate::utils::error::Result;
use std::path::Path;
use std::process::{Command, Stdio};

/// Opens files with the platform's default handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl SystemBrowser {
    fn command(target: &str) -> Command {
        if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", target]);
            cmd
        } else if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(target);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(target);
            cmd
        }
    }
}

impl MapViewer for SystemBrowser {
    fn open(&self, path: &Path) -> Result<()> {
        let target = format!("file://{}", path.display());
        tracing::debug!("Opening {} in the default browser", target);

        // Detached; the shell must not wait on the browser process.
        Self::command(&target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(())
    }
}

/// Viewer that leaves the written map alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBrowser;

impl MapViewer for NoBrowser {
    fn open(&self, path: &Path) -> Result<()> {
        tracing::debug!("Browser disabled, not opening {}", path.display());
        Ok(())
    }
}

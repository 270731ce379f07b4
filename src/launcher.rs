//! External trailer launcher
//!
//! Hands a trailer URL to the system URL opener (browser) or to mpv.
//! Playback happens entirely outside this process.

use std::process::Stdio;
use thiserror::Error;
use tokio::process::{Child, Command};

/// Program used to open a trailer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenerKind {
    /// Platform URL handler (xdg-open, open, start)
    #[default]
    System,
    /// mpv media player (needs yt-dlp for YouTube)
    Mpv,
}

impl OpenerKind {
    /// Get the command name for this opener
    pub fn command(&self) -> &'static str {
        match self {
            OpenerKind::System => {
                if cfg!(target_os = "macos") {
                    "open"
                } else if cfg!(target_os = "windows") {
                    "cmd"
                } else {
                    "xdg-open"
                }
            }
            OpenerKind::Mpv => "mpv",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OpenerKind::System => "browser",
            OpenerKind::Mpv => "mpv",
        }
    }
}

impl std::fmt::Display for OpenerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Errors from launching an external opener
#[derive(Debug, Error)]
pub enum LauncherError {
    #[error("Opener '{0}' not found. Install it first.")]
    NotFound(String),
    #[error("Failed to start opener: {0}")]
    StartFailed(#[from] std::io::Error),
    #[error("Refusing to open non-http URL: {0}")]
    InvalidUrl(String),
}

/// Opens trailer URLs outside the terminal
pub struct TrailerLauncher {
    kind: OpenerKind,
}

impl TrailerLauncher {
    pub fn new(kind: OpenerKind) -> Self {
        Self { kind }
    }

    pub fn system() -> Self {
        Self::new(OpenerKind::System)
    }

    pub fn mpv() -> Self {
        Self::new(OpenerKind::Mpv)
    }

    pub fn kind(&self) -> OpenerKind {
        self.kind
    }

    /// Check if the opener is available on the system
    pub async fn is_available(&self) -> bool {
        if cfg!(target_os = "windows") && self.kind == OpenerKind::System {
            return true;
        }
        command_available(self.kind.command()).await
    }

    /// Arguments passed to the opener for a URL
    pub fn args(&self, url: &str) -> Vec<String> {
        match self.kind {
            OpenerKind::System if cfg!(target_os = "windows") => {
                vec!["/C".into(), "start".into(), String::new(), url.into()]
            }
            OpenerKind::System => vec![url.into()],
            OpenerKind::Mpv => vec![url.into(), "--force-window=immediate".into()],
        }
    }

    /// Spawn the opener for a URL without waiting for it
    pub fn open(&self, url: &str) -> Result<Child, LauncherError> {
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(LauncherError::InvalidUrl(url.to_string()));
        }

        let mut cmd = Command::new(self.kind.command());
        cmd.args(self.args(url));
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::null());

        tracing::info!(opener = %self.kind, url, "opening trailer");
        cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LauncherError::NotFound(self.kind.command().to_string())
            } else {
                LauncherError::StartFailed(e)
            }
        })
    }
}

/// Whether `which` can find a program on PATH
async fn command_available(program: &str) -> bool {
    Command::new("which")
        .arg(program)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opener_command() {
        let cmd = OpenerKind::System.command();
        assert!(["xdg-open", "open", "cmd"].contains(&cmd));
        assert_eq!(OpenerKind::Mpv.command(), "mpv");
    }

    #[test]
    fn test_opener_display() {
        assert_eq!(OpenerKind::System.to_string(), "browser");
        assert_eq!(OpenerKind::Mpv.to_string(), "mpv");
        assert_eq!(OpenerKind::default(), OpenerKind::System);
    }

    #[test]
    fn test_mpv_args() {
        let args = TrailerLauncher::mpv().args("https://www.youtube.com/watch?v=x");
        assert_eq!(args[0], "https://www.youtube.com/watch?v=x");
        assert!(args.contains(&"--force-window=immediate".to_string()));
    }

    #[tokio::test]
    async fn test_rejects_non_http_url() {
        let result = TrailerLauncher::system().open("file:///etc/passwd");
        assert!(matches!(result, Err(LauncherError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_missing_program_is_unavailable() {
        assert!(!command_available("flixtui-no-such-opener").await);
    }
}

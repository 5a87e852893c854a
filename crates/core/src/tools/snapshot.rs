//! Desktop screenshot tool.
//!
//! Captures the whole screen into `<snapshots_dir>/<filename>` with the
//! platform's native capture program:
//! - macOS: `screencapture -x`
//! - Linux: ImageMagick `import -window root`
//! - Windows: PowerShell + System.Drawing

use crate::tools::base::{plain_file_name, required_str, Tool, ToolError};
use crate::tools::process::CommandRunner;
use ak_protocol::tool_models::{ToolArgs, ToolResult};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

pub const SNAPSHOT_TOOL: &str = "snapshot-tool";

/// Platform capture command for a target path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl CaptureCommand {
    /// Build the capture command for `os` (as in `std::env::consts::OS`).
    ///
    /// Returns `None` for platforms without a known capture program.
    pub fn for_platform(os: &str, target: &Path) -> Option<Self> {
        let target = target.display().to_string();
        match os {
            "macos" => Some(Self {
                program: "screencapture".to_string(),
                args: vec!["-x".to_string(), target],
            }),
            "linux" => Some(Self {
                program: "import".to_string(),
                args: vec!["-window".to_string(), "root".to_string(), target],
            }),
            "windows" => Some(Self {
                program: "powershell".to_string(),
                args: vec![
                    "-NoProfile".to_string(),
                    "-Command".to_string(),
                    format!(
                        "Add-Type -AssemblyName System.Windows.Forms; Add-Type -AssemblyName System.Drawing; \
                         $b = [System.Windows.Forms.Screen]::PrimaryScreen.Bounds; \
                         $bmp = New-Object System.Drawing.Bitmap($b.Width, $b.Height); \
                         $g = [System.Drawing.Graphics]::FromImage($bmp); \
                         $g.CopyFromScreen($b.Location, [System.Drawing.Point]::Empty, $b.Size); \
                         $bmp.Save('{target}'); $g.Dispose(); $bmp.Dispose()"
                    ),
                ],
            }),
            _ => None,
        }
    }
}

/// Takes a screenshot of the desktop.
///
/// Arguments: `filename` (required).
/// Success payload: `filePath`, `fileSize`, `message`.
pub struct SnapshotTool {
    snapshots_dir: PathBuf,
}

impl SnapshotTool {
    pub fn new(snapshots_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots_dir: snapshots_dir.into(),
        }
    }

    async fn capture(&self, filename: &str) -> Result<ToolResult, ToolError> {
        tokio::fs::create_dir_all(&self.snapshots_dir).await?;
        let file_path = self.snapshots_dir.join(filename);

        let Some(command) = CaptureCommand::for_platform(std::env::consts::OS, &file_path) else {
            return Err(ToolError::NotAvailable(format!(
                "Unsupported platform: {}",
                std::env::consts::OS
            )));
        };

        CommandRunner::run(&command.program, &command.args).await?;

        let file_size = tokio::fs::metadata(&file_path).await?.len();
        let file_path = file_path.display().to_string();

        Ok(ToolResult::ok(json!({
            "filePath": file_path,
            "fileSize": file_size,
            "message": format!("Screenshot saved to {file_path}"),
        })))
    }
}

#[async_trait]
impl Tool for SnapshotTool {
    fn name(&self) -> &str {
        SNAPSHOT_TOOL
    }

    fn description(&self) -> &str {
        "Take a screenshot of the desktop and save it to the snapshots folder"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "filename": {
                    "type": "string",
                    "description": "Filename for the screenshot (e.g., 'screenshot.png')"
                }
            },
            "required": ["filename"]
        })
    }

    async fn check_availability(&self) -> bool {
        match CaptureCommand::for_platform(std::env::consts::OS, Path::new("availability.png")) {
            Some(command) => CommandRunner::is_installed(&command.program),
            None => false,
        }
    }

    async fn invoke(&self, args: &ToolArgs) -> Result<ToolResult, ToolError> {
        let filename = required_str(args, "filename")?;
        let Some(filename) = plain_file_name(filename) else {
            return Ok(ToolResult::failure(
                format!("Invalid filename: {filename}"),
                "Failed to take screenshot",
            ));
        };

        // Capture problems are an expected outcome, reported as a tagged failure.
        match self.capture(filename).await {
            Ok(result) => Ok(result),
            Err(e) => Ok(ToolResult::failure(e.to_string(), "Failed to take screenshot")),
        }
    }
}

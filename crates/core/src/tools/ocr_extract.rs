//! OCR text extraction tool backed by the `tesseract` CLI.
//!
//! Runs `tesseract <image> stdout tsv`, rebuilds the recognized text line
//! by line from the word rows, and writes it to
//! `<output_dir>/<outputFilename>`.

use crate::tools::base::{optional_str, plain_file_name, required_str, Tool, ToolError};
use crate::tools::process::CommandRunner;
use ak_protocol::tool_models::{ToolArgs, ToolResult};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

pub const OCR_EXTRACT_TOOL: &str = "ocr-extract-tool";
pub const DEFAULT_OUTPUT_FILENAME: &str = "text.txt";

const TESSERACT: &str = "tesseract";

/// Text and mean word confidence recognized from one image.
#[derive(Debug, Clone, PartialEq)]
pub struct Recognition {
    pub text: String,
    pub confidence: f64,
}

impl Recognition {
    /// Parse tesseract's TSV output.
    ///
    /// Columns: `level page_num block_num par_num line_num word_num left top
    /// width height conf text`. Only word rows (level 5) with a
    /// non-negative confidence contribute. Words of the same
    /// `(page, block, paragraph, line)` are joined by spaces, lines by `\n`.
    pub fn from_tsv(tsv: &str) -> Self {
        let mut lines: Vec<String> = Vec::new();
        let mut current_line: Option<(u32, u32, u32, u32)> = None;
        let mut confidence_sum = 0.0;
        let mut word_count = 0usize;

        for row in tsv.lines().skip(1) {
            let cols: Vec<&str> = row.split('\t').collect();
            if cols.len() < 12 || cols[0] != "5" {
                continue;
            }

            let Ok(conf) = cols[10].trim().parse::<f64>() else {
                continue;
            };
            let word = cols[11].trim();
            if conf < 0.0 || word.is_empty() {
                continue;
            }

            let key = (
                cols[1].parse().unwrap_or(0),
                cols[2].parse().unwrap_or(0),
                cols[3].parse().unwrap_or(0),
                cols[4].parse().unwrap_or(0),
            );

            match lines.last_mut() {
                Some(line) if current_line == Some(key) => {
                    line.push(' ');
                    line.push_str(word);
                }
                _ => {
                    lines.push(word.to_string());
                    current_line = Some(key);
                }
            }

            confidence_sum += conf;
            word_count += 1;
        }

        let confidence = if word_count == 0 {
            0.0
        } else {
            confidence_sum / word_count as f64
        };

        Self {
            text: lines.join("\n"),
            confidence,
        }
    }
}

/// Extracts text from an image and saves it to a file.
///
/// Arguments: `imagePath` (required), `outputFilename` (default `text.txt`).
/// Success payload: `imagePath`, `outputPath`, `textLength`, `text`,
/// `confidence`, `message`.
pub struct OcrExtractTool {
    output_dir: PathBuf,
}

impl OcrExtractTool {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    async fn extract(&self, image_path: &str, output_filename: &str) -> Result<ToolResult, ToolError> {
        let output = CommandRunner::run(
            TESSERACT,
            &[
                image_path.to_string(),
                "stdout".to_string(),
                "tsv".to_string(),
            ],
        )
        .await?;

        let recognition = Recognition::from_tsv(&output.stdout);

        tokio::fs::create_dir_all(&self.output_dir).await?;
        let output_path = self.output_dir.join(output_filename);
        tokio::fs::write(&output_path, &recognition.text).await?;
        let output_path = output_path.display().to_string();

        Ok(ToolResult::ok(json!({
            "imagePath": image_path,
            "outputPath": output_path,
            "textLength": recognition.text.chars().count(),
            "text": recognition.text,
            "confidence": recognition.confidence,
            "message": format!("Text extracted and saved to {output_path}"),
        })))
    }
}

#[async_trait]
impl Tool for OcrExtractTool {
    fn name(&self) -> &str {
        OCR_EXTRACT_TOOL
    }

    fn description(&self) -> &str {
        "Extract text from a screenshot using OCR and save it to a text file"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "imagePath": {
                    "type": "string",
                    "description": "Path to the screenshot image file"
                },
                "outputFilename": {
                    "type": "string",
                    "description": "Output filename for extracted text (default: text.txt)"
                }
            },
            "required": ["imagePath"]
        })
    }

    async fn check_availability(&self) -> bool {
        CommandRunner::is_installed(TESSERACT)
    }

    async fn invoke(&self, args: &ToolArgs) -> Result<ToolResult, ToolError> {
        let image_path = required_str(args, "imagePath")?;
        let output_filename = optional_str(args, "outputFilename").unwrap_or(DEFAULT_OUTPUT_FILENAME);
        let Some(output_filename) = plain_file_name(output_filename) else {
            return Ok(ToolResult::failure(
                format!("Invalid output filename: {output_filename}"),
                "Failed to extract text from image",
            ));
        };

        if !Path::new(image_path).exists() {
            return Ok(ToolResult::failure(
                "Image file not found",
                format!("Could not find image at: {image_path}"),
            ));
        }

        match self.extract(image_path, output_filename).await {
            Ok(result) => Ok(result),
            Err(e) => Ok(ToolResult::failure(
                e.to_string(),
                "Failed to extract text from image",
            )),
        }
    }
}

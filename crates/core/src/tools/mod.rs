//! Tool contract and implementations.
//!
//! Tools are the leaves of every agent pipeline: each step invokes exactly
//! one [`Tool`] and records the tagged [`ToolResult`](ak_protocol::ToolResult)
//! it returns.

pub mod base;
pub mod mock_tool;
pub mod ocr_extract;
pub mod process;
pub mod snapshot;
pub mod toolset;

pub use base::{Tool, ToolError};
pub use mock_tool::MockTool;
pub use ocr_extract::{OcrExtractTool, OCR_EXTRACT_TOOL};
pub use snapshot::{SnapshotTool, SNAPSHOT_TOOL};
pub use toolset::ToolSet;

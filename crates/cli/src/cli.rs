//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for agent-kit
#[derive(Parser, Debug)]
#[command(name = "agent-kit")]
#[command(author, version, about = "Route free-text commands to agents")]
#[command(long_about = r#"
agent-kit routes a line of text such as "run screen process" to the agent
that claims it, runs the agent's steps in order and reports the result.

Configuration is read from <root>/.agent-kit/:
  config.toml     server address, directive keyword, artifact directories
  commands.yaml   extra trigger phrases per agent

Example:
  agent-kit agents
  agent-kit run screen process --filename desk.png
  agent-kit serve --port 8080
  agent-kit call-tool snapshot-tool '{"filename": "desk.png"}'
"#)]
pub struct Cli {
    /// Project root containing the `.agent-kit/` directory
    #[arg(long, global = true, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Verbosity level (-v = debug, -vv = trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Port to listen on, overriding configuration and PORT
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Dispatch one command and print the report
    Run {
        /// Command text, e.g. `screen process` or `run screenshot ocr`
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Screenshot file name
        #[arg(long, value_name = "FILE")]
        filename: Option<String>,

        /// Text output file name
        #[arg(long, value_name = "FILE")]
        output_filename: Option<String>,

        /// Print the structured response as JSON
        #[arg(long)]
        json: bool,
    },

    /// List registered agents and their commands
    Agents,

    /// List the tools behind the agents with their argument schemas
    Tools,

    /// Invoke one tool directly and print its JSON result
    CallTool {
        /// Tool name, e.g. `snapshot-tool`
        name: String,

        /// Tool arguments as a JSON object
        #[arg(value_name = "JSON")]
        args: Option<String>,
    },

    /// Serve the tools over MCP on stdin/stdout
    Mcp,
}

//! CLI entrypoint for agent-kit

mod cli;

use ak_core::dispatch::bootstrap;
use ak_protocol::agent_models::AgentOptions;
use ak_protocol::tool_models::ToolArgs;
use ak_server::mcp::McpServer;
use clap::Parser;
use cli::{Cli, Command};
use color_eyre::eyre::eyre;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise verbosity picks the level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("info"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let (mut config, dispatcher) = bootstrap(&cli.root)
        .await
        .map_err(|e| eyre!("{e:#}"))?;

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.global.server.port = port;
            }
            ak_server::serve(&config.global.server, dispatcher)
                .await
                .map_err(|e| eyre!("{e:#}"))?;
        }

        Command::Run {
            text,
            filename,
            output_filename,
            json,
        } => {
            let mut options = AgentOptions::new();
            if let Some(filename) = filename {
                options = options.with("filename", filename);
            }
            if let Some(output_filename) = output_filename {
                options = options.with("outputFilename", output_filename);
            }

            let outcome = dispatcher.dispatch(&text.join(" "), options).await;
            let success = outcome.success();

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome.into_response())?);
            } else {
                println!("{}", outcome.content());
                if let Some(report) = outcome.report() {
                    let status = if report.success {
                        format!("✔ {} succeeded", report.agent_name).as_str().green().bold()
                    } else {
                        format!("✘ {} failed", report.agent_name).as_str().red().bold()
                    };
                    eprintln!("{status}");
                }
            }

            if !success {
                std::process::exit(1);
            }
        }

        Command::Agents => {
            for agent in dispatcher.agents() {
                println!("{}", agent.name.as_str().cyan().bold());
                println!("  {}", agent.description);
                println!("  {} {}", "Commands:".dimmed(), agent.commands.join(", "));
            }
        }

        Command::Tools => {
            for tool in dispatcher.tools().definitions() {
                println!("{}", tool.name.as_str().cyan().bold());
                println!("  {}", tool.description);
                println!(
                    "  {} {}",
                    "Arguments:".dimmed(),
                    serde_json::to_string(&tool.input_schema)?
                );
            }
        }

        Command::CallTool { name, args } => {
            let args = match args.as_deref() {
                Some(raw) => serde_json::from_str::<ToolArgs>(raw)
                    .map_err(|e| eyre!("Tool arguments must be a JSON object: {e}"))?,
                None => ToolArgs::new(),
            };

            let result = dispatcher.tools().call(&name, &args).await;
            println!("{}", serde_json::to_string_pretty(&result)?);

            if !result.success {
                std::process::exit(1);
            }
        }

        Command::Mcp => {
            McpServer::new(dispatcher.tools().clone())
                .run()
                .await
                .map_err(|e| eyre!("{e:#}"))?;
        }
    }

    Ok(())
}

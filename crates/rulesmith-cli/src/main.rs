//! Rulesmith CLI - AI-driven Wazuh rule optimization
//!
//! Without arguments, runs the optimizer once on built-in example data.

mod api;
mod config;
mod demo;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use api::RulesmithClient;
use config::{mask, Config};
use rulesmith::{GeminiProvider, GroupOutcome, RuleOptimizer, RulesmithConfig};

#[derive(Parser)]
#[command(name = "rulesmith")]
#[command(about = "Rulesmith CLI - AI-driven Wazuh rule optimization", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimize the built-in example rules and print the result (default)
    Demo,

    /// Post an alert batch file to a running Rulesmith server
    Submit {
        /// JSON file: [{"category": "...", "alerts": ["..."]}, ...]
        file: String,
        /// Server URL (overrides config)
        #[arg(short, long)]
        server: Option<String>,
        /// API key (overrides config)
        #[arg(short = 'k', long)]
        api_key: Option<String>,
    },

    /// Show or update configuration
    Config {
        /// Store a default server URL for `submit`
        #[arg(long)]
        server_url: Option<String>,
        /// Store an API key for `submit`
        #[arg(long)]
        api_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,rulesmith=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Demo) {
        Commands::Demo => cmd_demo().await,
        Commands::Submit {
            file,
            server,
            api_key,
        } => cmd_submit(file, server, api_key).await,
        Commands::Config {
            server_url,
            api_key,
        } => cmd_config(server_url, api_key),
    }
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_demo() -> Result<()> {
    println!("\n🚀 Starting AI-Driven Wazuh Rule Optimization...\n");

    let config = RulesmithConfig::from_env()?;
    let provider = Arc::new(GeminiProvider::new(&config.gemini)?);
    let optimizer = RuleOptimizer::new(provider);

    let rules = demo::rules()?;
    let alerts = demo::alerts()?;

    println!("{}", "Rules under review:".bold());
    for rule in &rules {
        println!("  • {}", demo::describe(rule));
    }
    println!("{}", "Alerts:".bold());
    for alert in &alerts {
        println!("  • {}", alert);
    }

    // Errors come back as marked text; the demo always finishes
    let output = optimizer
        .optimize_or_report(demo::CATEGORY, &rules, &alerts)
        .await;

    println!("\n🔍 {}\n", "Optimized Wazuh Rules:".bold());
    if output.starts_with(rulesmith::ERROR_MARKER) {
        println!("{}", output.red());
    } else {
        println!("{}", output);
    }

    Ok(())
}

async fn cmd_submit(file: String, server: Option<String>, api_key: Option<String>) -> Result<()> {
    let config = Config::load()?;

    let content =
        fs::read_to_string(&file).with_context(|| format!("Failed to read file: {}", file))?;
    let batch: serde_json::Value =
        serde_json::from_str(&content).with_context(|| format!("{} is not valid JSON", file))?;

    let server_url = server.unwrap_or(config.server_url);
    let api_key = api_key.or(config.api_key);
    let client = RulesmithClient::new(&server_url, api_key.as_deref());

    let response = client.process_alerts(&batch).await?;

    println!("{} {}", "✓".green(), response.message);
    println!("  {} {}", "batch:".dimmed(), response.batch_id.dimmed());

    for outcome in &response.results {
        match outcome {
            GroupOutcome::Saved { category, path, .. } => {
                println!("  {} {} → {}", "✓".green(), category.cyan(), path);
            }
            GroupOutcome::Error {
                index,
                category,
                error,
                ..
            } => {
                let label = category
                    .clone()
                    .unwrap_or_else(|| format!("group #{}", index));
                println!("  {} {} {}", "✗".red(), label.cyan(), error.red());
            }
        }
    }

    if response.results.is_empty() && !response.saved_files.is_empty() {
        for path in &response.saved_files {
            println!("  {} {}", "✓".green(), path);
        }
    }

    Ok(())
}

fn cmd_config(server_url: Option<String>, api_key: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    if server_url.is_some() || api_key.is_some() {
        if let Some(url) = server_url {
            config.server_url = url;
        }
        if let Some(key) = api_key {
            config.api_key = Some(key);
        }
        config.save()?;
        println!("{} Saved to {:?}", "✓".green(), Config::config_path()?);
        return Ok(());
    }

    println!("{}", "Rulesmith Configuration".bold());
    println!("  Config file: {:?}", Config::config_path()?);
    println!("  Server URL:  {}", config.server_url);
    println!(
        "  API key:     {}",
        config
            .api_key
            .as_deref()
            .map(mask)
            .unwrap_or_else(|| "(not set)".dimmed().to_string())
    );

    println!("\n{}", "Optimizer (environment):".bold());
    match RulesmithConfig::from_env() {
        Ok(env) => {
            println!("  GOOGLE_API_KEY: {}", mask(&env.gemini.api_key));
            println!("  Model:          {}", env.gemini.model);
            println!("  Review dir:     {}", env.rules_dir.display());
            println!(
                "  Rule source:    {}",
                env.wazuh
                    .as_ref()
                    .map(|w| w.api_url.clone())
                    .unwrap_or_else(|| "synthetic".to_string())
            );
        }
        Err(e) => println!("  {}", e.to_string().red()),
    }

    Ok(())
}

mod cli;
mod commands;
mod prompt;
#[cfg(test)]
mod testing;

use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { template } => commands::analyze::run(template.as_deref()).await,
        Commands::Update {
            policy,
            max_templates,
            max_items,
        } => commands::update::run(cli::selection_policy(policy, max_templates, max_items)).await,
        Commands::Version => commands::version::run(),
    }
}

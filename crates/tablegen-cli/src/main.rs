use clap::{Parser, Subcommand};

mod gen;

#[derive(Parser)]
#[command(name = "tablegen", version, about = "Generate typed API layers from remote table metadata")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inspect the metadata service and generate per-table modules
    Gen(gen::Args),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match Cli::parse().command {
        Command::Gen(args) => gen::exec(args).await,
    }
}

use clap::Parser;
mod commands;
mod error;
use commands::cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), error::CliError> {
    // stdout carries the command output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = cli::Args::parse();
    let cmd = args
        .command
        .take()
        .unwrap_or(cli::Commands::Build(cli::BuildArgs::default()));

    let exit = dispatch(cmd, &args).await?;
    if exit != 0 {
        std::process::exit(exit);
    }
    Ok(())
}

async fn dispatch(cmd: cli::Commands, args: &cli::Args) -> Result<i32, error::CliError> {
    let cfg = scanctx_core::config::load(args.config.as_deref())?;
    match cmd {
        cli::Commands::Build(build_args) => commands::build::run(&cfg, &build_args, args.format).await,
        cli::Commands::Scope(scope_args) => commands::scope::run(&cfg, &scope_args, args.format),
        cli::Commands::Tier(tier_args) => commands::tier::run(&cfg, &tier_args, args.format),
    }
}

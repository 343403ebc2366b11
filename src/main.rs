use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod atlas;
use self::args::Args;
use self::atlas::cli_main;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();
    cli_main(args)
}

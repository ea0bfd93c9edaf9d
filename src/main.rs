use clap::Parser;
use sitesearch::cli::Cli;

fn main() -> anyhow::Result<()> {
    sitesearch::logging::init_from_env()?;

    let cli = Cli::parse();
    cli.run()
}

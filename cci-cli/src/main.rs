//! CCI CLI - Command line tool for loading and querying COVID-19 case data.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "cci-cli",
    version,
    about = "COVID-19 case insights toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: cci_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    cci_cmd::run(cli.command)
}

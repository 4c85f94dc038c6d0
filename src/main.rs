use clap::Parser;

use pricealert::cli::{check, price, run, CheckCommand, Cli, Commands};
use pricealert::cli::output;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Run(args) => run::execute(args).await,
        Commands::Check(CheckCommand::Config(args)) => check::execute_config(&args.config),
        Commands::Price(args) => price::execute_price(args).await,
        Commands::Compare(args) => price::execute_compare(args).await,
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

mod commands;
mod terminal;

use commands::{CommandLine, Commands};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLine::parse_args();

    logging::init_logging()?;
    print::banner();

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Read(args) => {
            print::header("reading your palm");
            commands::read::read(args, config).await
        }
        Commands::Config => {
            print::header("configuration");
            commands::config::config(&config)
        }
    }
}

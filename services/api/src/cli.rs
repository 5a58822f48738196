use crate::quote::{run_quote, QuoteArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use tour_pricing::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Tour Pricing Service",
    about = "Serve tour pricing previews and booking intake, or quote a tour from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Price a tour for a participant count without starting the server
    Quote(QuoteArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Quote(args) => run_quote(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["tour-pricing-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn quote_accepts_negative_participant_counts() {
        let cli = Cli::try_parse_from([
            "tour-pricing-api",
            "quote",
            "--tour-id",
            "2",
            "--participants",
            "-3",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Quote(args)) => {
                assert_eq!(args.tour_id, 2);
                assert_eq!(args.participants, -3);
                assert!(args.catalog.is_none());
            }
            other => panic!("expected quote command, got {other:?}"),
        }
    }
}

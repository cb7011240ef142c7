use crate::report::{run_score, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use eih_scorer::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "EIH Site Scorer",
    about = "Score candidate Emergency Interim Housing sites from the command line or over HTTP",
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
    /// Score a single coordinate and print the breakdown
    Score(ScoreArgs),
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
        Command::Score(args) => run_score(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn score_defaults_to_downtown_san_jose() {
        let cli = Cli::try_parse_from(["eih-scorer-api", "score"]).expect("score parses");
        match cli.command {
            Some(Command::Score(args)) => {
                assert_eq!(args.lat, 37.3382);
                assert_eq!(args.lon, -121.8863);
                assert!(!args.json);
            }
            other => panic!("expected score command, got {other:?}"),
        }
    }

    #[test]
    fn negative_longitude_is_accepted_as_a_value() {
        let cli = Cli::try_parse_from(["eih-scorer-api", "score", "--lon", "-121.9", "--json"])
            .expect("score parses");
        match cli.command {
            Some(Command::Score(args)) => {
                assert_eq!(args.lon, -121.9);
                assert!(args.json);
            }
            other => panic!("expected score command, got {other:?}"),
        }
    }
}

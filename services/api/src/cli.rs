use crate::demo::{run_demo, run_triage, DemoArgs, TriageArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fedorato::config::AppConfig;
use fedorato::error::AppError;
use fedorato::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Fedorato",
    about = "Triage insurance submissions against underwriting guidelines",
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
    /// Classify every submission in a broker CSV or JSON export
    Triage(TriageArgs),
    /// Classify the built-in sample inbox
    Demo(DemoArgs),
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
    let config = AppConfig::load()?;
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args, config).await,
        Command::Triage(args) => {
            telemetry::init_cli(&config.telemetry)?;
            run_triage(args, &config)
        }
        Command::Demo(args) => {
            telemetry::init_cli(&config.telemetry)?;
            run_demo(args, &config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn triage_requires_input_and_accepts_guidelines() {
        let cli = Cli::try_parse_from([
            "fedorato-api",
            "triage",
            "--input",
            "inbox.csv",
            "--guidelines",
            "strict.json",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Triage(args)) => {
                assert_eq!(args.input, PathBuf::from("inbox.csv"));
                assert_eq!(args.guidelines, Some(PathBuf::from("strict.json")));
            }
            other => panic!("expected triage command, got {other:?}"),
        }

        assert!(Cli::try_parse_from(["fedorato-api", "triage"]).is_err());
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["fedorato-api"]).expect("arguments parse");
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["fedorato-api", "serve", "--port", "8080"])
            .expect("arguments parse");
        match cli.command {
            Some(Command::Serve(args)) => assert_eq!(args.port, Some(8080)),
            other => panic!("expected serve command, got {other:?}"),
        }
    }
}

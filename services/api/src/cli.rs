use crate::console::{run_console, RunArgs};
use crate::evaluate::{run_evaluate, EvaluateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use productivity_coach::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Productivity Coach",
    about = "Take the productivity habit assessment or serve it over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk through the questionnaire in the terminal (default command)
    Run(RunArgs),
    /// Score a fully answered questionnaire passed as flags
    Evaluate(EvaluateArgs),
    /// Start the HTTP service
    Serve(ServeArgs),
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
        .unwrap_or_else(|| Command::Run(RunArgs::default()));

    match command {
        Command::Run(args) => run_console(args),
        Command::Evaluate(args) => run_evaluate(args),
        Command::Serve(args) => server::run(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_run() {
        let cli = Cli::try_parse_from(["productivity-coach"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn evaluate_splits_comma_separated_choices() {
        let cli = Cli::try_parse_from([
            "productivity-coach",
            "evaluate",
            "--choices",
            "1,2,3,4,1,2,3,4,1,2",
            "--challenge",
            "deadlines",
            "--json",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Evaluate(args)) => {
                assert_eq!(args.choices, vec![1, 2, 3, 4, 1, 2, 3, 4, 1, 2]);
                assert_eq!(args.challenge, "deadlines");
                assert!(args.focus_time.is_empty());
                assert!(args.json);
            }
            other => panic!("expected evaluate command, got {other:?}"),
        }
    }

    #[test]
    fn evaluate_requires_choices() {
        assert!(Cli::try_parse_from(["productivity-coach", "evaluate"]).is_err());
    }

    #[test]
    fn serve_accepts_overrides() {
        let cli = Cli::try_parse_from(["productivity-coach", "serve", "--port", "8080"])
            .expect("parses");
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.port, Some(8080));
                assert!(args.host.is_none());
            }
            other => panic!("expected serve command, got {other:?}"),
        }
    }
}

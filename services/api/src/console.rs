use crate::infra::load_analyzer;
use clap::Args;
use productivity_coach::analysis::TextAnalyzer;
use productivity_coach::assessment::InvalidChoice;
use productivity_coach::config::AppConfig;
use productivity_coach::error::AppError;
use productivity_coach::recommendations::Tier;
use productivity_coach::session::{
    AssessmentOutcome, AssessmentRecord, AssessmentSession, Prompt, SessionError, Step,
};
use productivity_coach::telemetry::{self, LogSink};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Default)]
pub(crate) struct RunArgs {
    /// Where to write the JSON record (defaults to APP_OUTPUT_PATH)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Skip writing the JSON record
    #[arg(long)]
    pub(crate) no_save: bool,
}

pub(crate) fn run_console(args: RunArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, LogSink::Stderr)?;
    let analyzer = load_analyzer(&config)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();

    let record = run_questionnaire(&mut input, &mut output, analyzer)?;
    render_outcome(&mut output, &record.system_output)?;

    if !args.no_save {
        let path = args.output.unwrap_or(config.output.path);
        save_record(&mut output, &record, &path)?;
    }
    Ok(())
}

pub(crate) fn save_record<W: Write>(
    output: &mut W,
    record: &AssessmentRecord,
    path: &Path,
) -> Result<(), AppError> {
    record.write_to(path)?;
    info!(path = %path.display(), "assessment record saved");
    writeln!(
        output,
        "\n\n(A file named '{}' with your detailed results has been saved.)",
        path.display()
    )?;
    Ok(())
}

/// Walk the whole questionnaire over line-oriented input.
pub(crate) fn run_questionnaire<R, W>(
    input: &mut R,
    output: &mut W,
    analyzer: Arc<TextAnalyzer>,
) -> Result<AssessmentRecord, AppError>
where
    R: BufRead,
    W: Write,
{
    let mut session = AssessmentSession::new(analyzer);
    let mut prompt = session.begin();

    writeln!(output, "--- Part 1: Multiple Choice Productivity Test ---\n")?;

    while let Some(current) = prompt {
        prompt = match current {
            Prompt::MultipleChoice {
                number, question, ..
            } => {
                writeln!(output, "Q{number}: {}", question.prompt)?;
                for (index, option) in question.options.iter().enumerate() {
                    writeln!(output, "  {}. {option}", index + 1)?;
                }

                loop {
                    write!(output, "Enter your choice (1-4): ")?;
                    output.flush()?;
                    let line = read_line(input)?;
                    match session.respond(&line) {
                        Ok(step) => {
                            writeln!(output, "{}", "-".repeat(20))?;
                            break next_prompt(step);
                        }
                        Err(SessionError::InvalidChoice(InvalidChoice::NotANumber(_))) => {
                            writeln!(output, "Invalid input. Please enter a number.")?;
                        }
                        Err(SessionError::InvalidChoice(InvalidChoice::OutOfRange(_))) => {
                            writeln!(
                                output,
                                "Invalid input. Please enter a number between 1 and 4."
                            )?;
                        }
                        Err(SessionError::Finished) => break None,
                    }
                }
            }
            Prompt::Descriptive {
                number, question, ..
            } => {
                if number == 1 {
                    writeln!(output, "\n--- Part 2: Descriptive Questions ---\n")?;
                }
                write!(output, "{}\n> ", question.prompt)?;
                output.flush()?;
                let line = read_line(input)?;
                match session.respond(&line) {
                    Ok(step) => next_prompt(step),
                    Err(_) => None,
                }
            }
        };
    }

    session.record().ok_or_else(|| {
        AppError::Io(io::Error::new(
            io::ErrorKind::Other,
            "assessment ended before every question was answered",
        ))
    })
}

fn next_prompt(step: Step) -> Option<Prompt> {
    match step {
        Step::Ask(prompt) => Some(prompt),
        Step::Completed => None,
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String, AppError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(AppError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before the assessment finished",
        )));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub(crate) fn render_outcome<W: Write>(
    output: &mut W,
    outcome: &AssessmentOutcome,
) -> Result<(), AppError> {
    writeln!(output, "\n\n======================================")?;
    writeln!(output, "      Your Personalized Analysis      ")?;
    writeln!(output, "======================================\n")?;

    writeln!(output, "👤 PRODUCTIVITY PROFILE: {}\n", outcome.profile)?;
    writeln!(output, "📝 SUMMARY:")?;
    writeln!(output, "   {}\n", outcome.summary)?;

    writeln!(output, "💡 RECOMMENDED ACTIONS:\n")?;
    for tier in [Tier::Basic, Tier::Premium] {
        let entries = outcome.recommendations.tier(tier);
        if entries.is_empty() {
            continue;
        }
        if tier == Tier::Premium {
            writeln!(output)?;
        }
        writeln!(output, "--- {} ---", tier.label())?;
        for entry in entries {
            writeln!(output, "  • {entry}")?;
        }
    }
    Ok(())
}

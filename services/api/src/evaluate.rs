use crate::console::{render_outcome, save_record};
use crate::infra::load_analyzer;
use clap::Args;
use productivity_coach::config::AppConfig;
use productivity_coach::error::AppError;
use productivity_coach::session::{descriptive_answers, evaluate_once, AssessmentRecord};
use productivity_coach::telemetry::{self, LogSink};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct EvaluateArgs {
    /// Comma separated choices for every question, e.g. 1,3,2,4,1,2,3,4,1,2
    #[arg(long, value_delimiter = ',', required = true)]
    pub(crate) choices: Vec<u8>,
    /// Answer to the biggest-challenge follow-up question
    #[arg(long, default_value = "")]
    pub(crate) challenge: String,
    /// Answer to the focus-time follow-up question
    #[arg(long, default_value = "")]
    pub(crate) focus_time: String,
    /// Print the full record as JSON instead of the readable report
    #[arg(long)]
    pub(crate) json: bool,
    /// Also write the JSON record to this path
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, LogSink::Stderr)?;
    let analyzer = load_analyzer(&config)?;

    let stdout = io::stdout();
    let mut output = stdout.lock();
    let record = evaluate(&analyzer, &args)?;
    print_record(&mut output, &record, args.json)?;

    if let Some(path) = args.output.as_deref() {
        save_record(&mut output, &record, path)?;
    }
    Ok(())
}

fn evaluate(
    analyzer: &productivity_coach::analysis::TextAnalyzer,
    args: &EvaluateArgs,
) -> Result<AssessmentRecord, AppError> {
    let answers = descriptive_answers([args.challenge.as_str(), args.focus_time.as_str()]);
    Ok(evaluate_once(analyzer, &args.choices, answers)?)
}

fn print_record<W: Write>(
    output: &mut W,
    record: &AssessmentRecord,
    json: bool,
) -> Result<(), AppError> {
    if json {
        let rendered = record.to_json()?;
        writeln!(output, "{rendered}")?;
        Ok(())
    } else {
        render_outcome(output, &record.system_output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use productivity_coach::analysis::TextAnalyzer;
    use crate::test_support::has_tip;
    use productivity_coach::assessment::Profile;

    fn args(choices: Vec<u8>) -> EvaluateArgs {
        EvaluateArgs {
            choices,
            challenge: "Social media and my phone keep distracting me".to_string(),
            focus_time: "Early in the morning with a schedule".to_string(),
            ..EvaluateArgs::default()
        }
    }

    #[test]
    fn evaluates_flag_input() {
        let analyzer = TextAnalyzer::default();
        let record = evaluate(&analyzer, &args(vec![1; 10])).expect("valid input");
        assert_eq!(record.system_output.mcq_score, 12);
        assert_eq!(record.system_output.profile, Profile::ModeratelyDistracted);
        assert!(has_tip(
            &record.system_output.recommendations,
            "Turn Off Notifications"
        ));
    }

    #[test]
    fn short_choice_lists_are_rejected() {
        let analyzer = TextAnalyzer::default();
        let err = evaluate(&analyzer, &args(vec![1, 2])).expect_err("too few choices");
        assert!(matches!(err, AppError::Input(_)));
    }

    #[test]
    fn json_output_parses_back() {
        let analyzer = TextAnalyzer::default();
        let record = evaluate(&analyzer, &args(vec![3; 10])).expect("valid input");
        let mut output = Vec::new();
        print_record(&mut output, &record, true).expect("printed");
        let value: serde_json::Value = serde_json::from_slice(&output).expect("json output");
        assert_eq!(value["system_output"]["mcq_score"], 16);
    }
}

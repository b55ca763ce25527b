//! The questionnaire as a four-stage wizard, plus the outcome and output
//! record it produces once complete.

mod outcome;
mod record;
mod wizard;

pub use outcome::{summarize, AssessmentOutcome, RecordedChoice};
pub use record::{AssessmentRecord, RecordError, UserInput};
pub use wizard::{AssessmentSession, Prompt, SessionError, Stage, Step};

use crate::analysis::{FreeTextAnswer, TextAnalyzer};
use crate::assessment::{Choice, InvalidChoice, DESCRIPTIVE_QUESTIONS, QUESTIONS};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("expected {expected} answers to the forced-choice questions, got {actual}")]
    ChoiceCount { expected: usize, actual: usize },
    #[error("question {question}: {source}")]
    Choice {
        question: usize,
        #[source]
        source: InvalidChoice,
    },
}

/// Validate a complete set of raw forced-choice answers in question order.
pub fn record_choices(raw: &[u8]) -> Result<Vec<RecordedChoice>, InputError> {
    if raw.len() != QUESTIONS.len() {
        return Err(InputError::ChoiceCount {
            expected: QUESTIONS.len(),
            actual: raw.len(),
        });
    }

    QUESTIONS
        .iter()
        .zip(raw)
        .enumerate()
        .map(|(index, (question, value))| {
            Choice::new(*value)
                .map(|choice| RecordedChoice::new(index, question, choice))
                .map_err(|source| InputError::Choice {
                    question: index + 1,
                    source,
                })
        })
        .collect()
}

/// Pair descriptive answers with their question keys, in question order.
pub fn descriptive_answers<I, S>(texts: I) -> Vec<FreeTextAnswer>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    DESCRIPTIVE_QUESTIONS
        .iter()
        .zip(texts)
        .map(|(question, text)| FreeTextAnswer::new(question.key, text))
        .collect()
}

/// Evaluate a fully collected questionnaire without walking the wizard.
pub fn evaluate_once(
    analyzer: &TextAnalyzer,
    raw_choices: &[u8],
    answers: Vec<FreeTextAnswer>,
) -> Result<AssessmentRecord, InputError> {
    let choices = record_choices(raw_choices)?;
    let outcome = AssessmentOutcome::evaluate(analyzer, &choices, &answers);
    Ok(AssessmentRecord::new(&choices, &answers, &outcome))
}

use super::outcome::{AssessmentOutcome, RecordedChoice};
use super::record::AssessmentRecord;
use crate::analysis::{FreeTextAnswer, TextAnalyzer};
use crate::assessment::{
    Choice, DescriptiveQuestion, InvalidChoice, Question, DESCRIPTIVE_QUESTIONS, QUESTIONS,
};
use serde::Serialize;
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where a session is in the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum Stage {
    Start,
    MultipleChoice { index: usize },
    Descriptive { index: usize },
    Finished,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Start => "start",
            Stage::MultipleChoice { .. } => "multiple_choice",
            Stage::Descriptive { .. } => "descriptive",
            Stage::Finished => "finished",
        }
    }
}

/// The next thing the user should be asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    MultipleChoice {
        number: usize,
        total: usize,
        question: &'static Question,
    },
    Descriptive {
        number: usize,
        total: usize,
        question: &'static DescriptiveQuestion,
    },
}

impl Prompt {
    /// Markdown rendering used by the chat shell.
    pub fn render(&self) -> String {
        match self {
            Prompt::MultipleChoice {
                number,
                total,
                question,
            } => {
                let mut text = format!("**Question {number}/{total}:**\n\n{}\n\n", question.prompt);
                for (index, option) in question.options.iter().enumerate() {
                    let _ = writeln!(text, "{}. {option}", index + 1);
                }
                text.push_str("\nPlease type a number from 1 to 4.");
                text
            }
            Prompt::Descriptive {
                number,
                total,
                question,
            } => format!(
                "**Follow-up Question {number}/{total}:**\n\n{}",
                question.prompt
            ),
        }
    }
}

/// What a successful `respond` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Ask(Prompt),
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("invalid choice: {0}")]
    InvalidChoice(#[from] InvalidChoice),
    #[error("assessment already finished")]
    Finished,
}

/// One user's pass through the questionnaire.
///
/// Stages only move forward: start, every forced-choice question, every
/// descriptive question, then finished. Rejected input never touches the
/// answers recorded so far.
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    analyzer: Arc<TextAnalyzer>,
    stage: Stage,
    choices: Vec<RecordedChoice>,
    answers: Vec<FreeTextAnswer>,
    outcome: Option<AssessmentOutcome>,
}

impl AssessmentSession {
    pub fn new(analyzer: Arc<TextAnalyzer>) -> Self {
        Self {
            analyzer,
            stage: Stage::Start,
            choices: Vec::with_capacity(QUESTIONS.len()),
            answers: Vec::with_capacity(DESCRIPTIVE_QUESTIONS.len()),
            outcome: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn choices(&self) -> &[RecordedChoice] {
        &self.choices
    }

    pub fn answers(&self) -> &[FreeTextAnswer] {
        &self.answers
    }

    pub fn outcome(&self) -> Option<&AssessmentOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.stage == Stage::Finished
    }

    pub fn current_prompt(&self) -> Option<Prompt> {
        match self.stage {
            Stage::MultipleChoice { index } => {
                QUESTIONS
                    .get(index)
                    .map(|question| Prompt::MultipleChoice {
                        number: index + 1,
                        total: QUESTIONS.len(),
                        question,
                    })
            }
            Stage::Descriptive { index } => {
                DESCRIPTIVE_QUESTIONS
                    .get(index)
                    .map(|question| Prompt::Descriptive {
                        number: index + 1,
                        total: DESCRIPTIVE_QUESTIONS.len(),
                        question,
                    })
            }
            Stage::Start | Stage::Finished => None,
        }
    }

    /// Leave the start stage; a no-op once the questionnaire is underway.
    pub fn begin(&mut self) -> Option<Prompt> {
        if self.stage == Stage::Start {
            self.transition(Stage::MultipleChoice { index: 0 });
        }
        self.current_prompt()
    }

    /// Feed one line of user input into the current stage.
    pub fn respond(&mut self, input: &str) -> Result<Step, SessionError> {
        match self.stage {
            Stage::Start => {
                self.transition(Stage::MultipleChoice { index: 0 });
            }
            Stage::MultipleChoice { index } => {
                let choice = Choice::parse(input).map_err(|err| {
                    warn!(question = index + 1, error = %err, "rejected forced-choice answer");
                    SessionError::InvalidChoice(err)
                })?;
                self.choices
                    .push(RecordedChoice::new(index, &QUESTIONS[index], choice));

                if self.choices.len() == QUESTIONS.len() {
                    self.transition(Stage::Descriptive { index: 0 });
                } else {
                    self.transition(Stage::MultipleChoice { index: index + 1 });
                }
            }
            Stage::Descriptive { index } => {
                let question = &DESCRIPTIVE_QUESTIONS[index];
                self.answers
                    .push(FreeTextAnswer::new(question.key, input.trim()));

                if self.answers.len() == DESCRIPTIVE_QUESTIONS.len() {
                    self.finish();
                    return Ok(Step::Completed);
                }
                self.transition(Stage::Descriptive { index: index + 1 });
            }
            Stage::Finished => return Err(SessionError::Finished),
        }

        Ok(self.current_prompt().map_or(Step::Completed, Step::Ask))
    }

    /// Output record for a finished session.
    pub fn record(&self) -> Option<AssessmentRecord> {
        self.outcome
            .as_ref()
            .map(|outcome| AssessmentRecord::new(&self.choices, &self.answers, outcome))
    }

    fn finish(&mut self) {
        let outcome = AssessmentOutcome::evaluate(&self.analyzer, &self.choices, &self.answers);
        info!(
            score = outcome.mcq_score,
            profile = %outcome.profile,
            tags = outcome.nlp_analysis.all_tags.len(),
            "assessment completed"
        );
        self.outcome = Some(outcome);
        self.transition(Stage::Finished);
    }

    fn transition(&mut self, next: Stage) {
        if self.stage == Stage::Start {
            info!(questions = QUESTIONS.len(), "assessment started");
        }
        debug!(from = self.stage.label(), to = next.label(), "session stage transition");
        self.stage = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::Profile;

    fn session() -> AssessmentSession {
        AssessmentSession::new(Arc::new(TextAnalyzer::default()))
    }

    fn answer_all_choices(session: &mut AssessmentSession, input: &str) {
        for _ in 0..QUESTIONS.len() {
            session.respond(input).expect("choice accepted");
        }
    }

    #[test]
    fn any_input_leaves_start_stage() {
        let mut session = session();
        assert_eq!(session.current_prompt(), None);
        let step = session.respond("hello").expect("start accepted");
        assert_eq!(session.stage(), Stage::MultipleChoice { index: 0 });
        match step {
            Step::Ask(Prompt::MultipleChoice { number, total, .. }) => {
                assert_eq!((number, total), (1, 10));
            }
            other => panic!("expected first question, got {other:?}"),
        }
        assert!(session.choices().is_empty());
    }

    #[test]
    fn invalid_choice_keeps_recorded_answers() {
        let mut session = session();
        session.begin();
        session.respond("2").expect("valid choice");
        session.respond("3").expect("valid choice");

        for bad in ["", "abc", "0", "5", "2.5"] {
            let err = session.respond(bad).expect_err("bad input rejected");
            assert!(matches!(err, SessionError::InvalidChoice(_)), "{bad}");
        }

        assert_eq!(session.stage(), Stage::MultipleChoice { index: 2 });
        let recorded: Vec<u8> = session.choices().iter().map(|c| c.choice.value()).collect();
        assert_eq!(recorded, vec![2, 3]);
    }

    #[test]
    fn moves_to_descriptive_after_last_choice() {
        let mut session = session();
        session.begin();
        answer_all_choices(&mut session, "1");
        assert_eq!(session.stage(), Stage::Descriptive { index: 0 });
        match session.current_prompt() {
            Some(Prompt::Descriptive { question, .. }) => assert_eq!(question.key, "challenge"),
            other => panic!("expected descriptive prompt, got {other:?}"),
        }
    }

    #[test]
    fn finishing_evaluates_outcome_and_rejects_more_input() {
        let mut session = session();
        session.begin();
        answer_all_choices(&mut session, "4");
        session
            .respond("Notifications from my phone")
            .expect("first answer");
        let step = session.respond("Early mornings").expect("second answer");
        assert_eq!(step, Step::Completed);
        assert!(session.is_finished());

        let outcome = session.outcome().expect("outcome computed");
        assert_eq!(outcome.mcq_score, 18);
        assert_eq!(outcome.profile, Profile::ModeratelyDistracted);
        assert!(outcome
            .recommendations
            .contains_title("Turn Off Notifications"));

        assert_eq!(session.respond("again"), Err(SessionError::Finished));
        let record = session.record().expect("record available");
        assert_eq!(record.user_input.mcq_answers.len(), 10);
        assert_eq!(record.user_input.descriptive_answers[1].key, "focus_time");
    }

    #[test]
    fn record_is_unavailable_until_finished() {
        let mut session = session();
        session.begin();
        assert!(session.record().is_none());
    }

    #[test]
    fn prompts_render_numbered_options() {
        let prompt = Prompt::MultipleChoice {
            number: 3,
            total: 10,
            question: &QUESTIONS[2],
        };
        let text = prompt.render();
        assert!(text.starts_with("**Question 3/10:**"));
        assert!(text.contains("1. Almost Always\n"));
        assert!(text.ends_with("Please type a number from 1 to 4."));
    }
}

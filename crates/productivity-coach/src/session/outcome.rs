use crate::analysis::{AnalysisReport, BehavioralTag, FreeTextAnswer, TextAnalyzer};
use crate::assessment::{
    profile_for, question_score, score, Choice, Profile, Question, QUESTIONS,
};
use crate::recommendations::{select, Recommendations};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One answered forced-choice question as it appears in the output record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedChoice {
    pub question: String,
    pub choice: Choice,
    pub answer: String,
    pub score: u8,
    pub reversed: bool,
}

impl RecordedChoice {
    /// Record `choice` for the question at zero-based `index`.
    pub fn new(index: usize, question: &Question, choice: Choice) -> Self {
        Self {
            question: format!("Q{}", index + 1),
            choice,
            answer: question.option(choice.value()).unwrap_or_default().to_string(),
            score: question_score(choice, question.reversed),
            reversed: question.reversed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentOutcome {
    pub mcq_score: u32,
    pub profile: Profile,
    pub nlp_analysis: AnalysisReport,
    pub summary: String,
    pub recommendations: Recommendations,
}

impl AssessmentOutcome {
    /// Score the choices, analyze the text, and pick tips.
    pub fn evaluate(
        analyzer: &TextAnalyzer,
        choices: &[RecordedChoice],
        answers: &[FreeTextAnswer],
    ) -> Self {
        let mcq_score = score(choices.iter().map(|entry| (entry.choice, entry.reversed)));
        let profile = profile_for(mcq_score, QUESTIONS.len());
        let nlp_analysis = analyzer.analyze(answers);
        let summary = summarize(profile, &nlp_analysis.all_tags);
        let recommendations = select(profile, &nlp_analysis.all_tags);

        Self {
            mcq_score,
            profile,
            nlp_analysis,
            summary,
            recommendations,
        }
    }
}

/// Two or three sentences describing the profile and the dominant patterns.
pub fn summarize(profile: Profile, tags: &BTreeSet<BehavioralTag>) -> String {
    let mut summary = format!("Your results show you're in the '{profile}' category. ");

    let Some(first) = tags.iter().next() else {
        summary.push_str("You seem to have a good handle on your productivity habits.");
        return summary;
    };

    if tags.contains(&BehavioralTag::Procrastination) && tags.contains(&BehavioralTag::Distraction)
    {
        summary.push_str(
            "It seems like procrastination and frequent distractions are key challenges for you. ",
        );
    } else if tags.contains(&BehavioralTag::Burnout) || tags.contains(&BehavioralTag::TimeAnxiety)
    {
        summary.push_str(
            "We've noticed signs of potential burnout and pressure related to time management. ",
        );
    } else {
        summary.push_str(&format!("You appear to be struggling with {first}. "));
    }

    summary.push_str("Let's find some steps to help you improve.");
    summary
}

//! Forced-choice questionnaire: the static question catalog, answer
//! validation, scoring, and profile classification.

mod questions;
mod scoring;

pub use questions::{DescriptiveQuestion, Question, DESCRIPTIVE_QUESTIONS, QUESTIONS};
pub use scoring::{
    profile_for, question_score, score, Choice, InvalidChoice, Profile, UnknownProfile,
    MAX_QUESTION_SCORE,
};

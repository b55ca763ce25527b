//! Productivity habit assessment.
//!
//! Ten forced-choice answers are scored into a [`assessment::Profile`], two
//! free-text answers are tagged with [`analysis::TextAnalyzer`], and the pair
//! selects tips from the static [`recommendations`] catalog. The
//! [`session`] wizard strings the steps together for interactive shells.

pub mod analysis;
pub mod assessment;
pub mod chat;
pub mod config;
pub mod error;
pub mod recommendations;
pub mod session;
pub mod telemetry;

use super::outcome::{AssessmentOutcome, RecordedChoice};
use crate::analysis::FreeTextAnswer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInput {
    pub mcq_answers: Vec<RecordedChoice>,
    pub descriptive_answers: Vec<FreeTextAnswer>,
}

/// Everything one run produced, written once at the end for later review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub generated_at: DateTime<Utc>,
    pub user_input: UserInput,
    pub system_output: AssessmentOutcome,
}

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("unable to write assessment record to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to serialize assessment record: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl AssessmentRecord {
    pub fn new(
        choices: &[RecordedChoice],
        answers: &[FreeTextAnswer],
        outcome: &AssessmentOutcome,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            user_input: UserInput {
                mcq_answers: choices.to_vec(),
                descriptive_answers: answers.to_vec(),
            },
            system_output: outcome.clone(),
        }
    }

    /// Pretty JSON with four-space indentation.
    pub fn to_json(&self) -> Result<String, RecordError> {
        let mut buffer = Vec::new();
        self.write_json(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), RecordError> {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        self.serialize(&mut serializer)?;
        Ok(())
    }

    /// Create or truncate `path` and write the record to it.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), RecordError> {
        let path = path.as_ref();
        let io_error = |source| RecordError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        self.write_json(&mut writer)?;
        writer.flush().map_err(io_error)
    }
}

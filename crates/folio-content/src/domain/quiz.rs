//! Quiz records for the work chapter.

use serde::{Deserialize, Serialize};

use super::chapter::{Stage, Step};

/// One answer option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    /// Answer text.
    pub text: String,
    /// Whether picking this option is correct.
    #[serde(default)]
    pub is_correct: bool,
}

/// A multiple-choice question with the project it leads to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    /// Stable identifier, used to record answers.
    pub id: String,
    /// Short title shown above the question.
    pub title: String,
    /// The question text.
    pub question: String,
    /// Answer options in display order.
    pub options: Vec<QuizOption>,
    /// Explanation shown once answered.
    #[serde(default)]
    pub result_text: String,
    /// Label of the button leading to the project.
    #[serde(default)]
    pub project_button_text: String,
}

impl Quiz {
    /// Key of the stage that presents the quiz at `position` (zero-based).
    #[must_use]
    pub fn stage_key(position: usize) -> String {
        format!("Question {}", position + 1)
    }

    /// The one-step stage that presents this quiz at `position` (zero-based)
    /// in the chapter's question list.
    #[must_use]
    pub fn to_stage(&self, position: usize) -> Stage {
        Stage::new(
            Self::stage_key(position),
            vec![Step::new(self.title.clone(), self.question.clone())],
        )
    }
}

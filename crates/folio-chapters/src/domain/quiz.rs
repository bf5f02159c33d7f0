//! Answers given to a quiz chapter's questions.

use std::collections::BTreeMap;

use folio_content::domain::quiz::Quiz;
use folio_core::error::DomainError;
use serde::Serialize;

/// The option picked for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerRecord {
    /// Index of the picked option.
    pub selected: usize,
    /// Whether that option is the correct one.
    pub correct: bool,
}

/// Answer state for the questions of one chapter. Chapters without quizzes
/// hold an empty set that rejects every answer.
#[derive(Debug, Clone, Default)]
pub struct QuizAnswers {
    quizzes: Vec<Quiz>,
    answers: BTreeMap<String, AnswerRecord>,
}

impl QuizAnswers {
    /// Creates an empty answer sheet for `quizzes`.
    #[must_use]
    pub fn new(quizzes: Vec<Quiz>) -> Self {
        Self {
            quizzes,
            answers: BTreeMap::new(),
        }
    }

    /// Records the option picked for `quiz_id`, replacing any earlier answer.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownQuiz` if no quiz has that id and
    /// `DomainError::UnknownOption` if `option_index` is out of range.
    pub fn answer(&mut self, quiz_id: &str, option_index: usize) -> Result<AnswerRecord, DomainError> {
        let quiz = self.quiz(quiz_id)?;
        let option = quiz
            .options
            .get(option_index)
            .ok_or_else(|| DomainError::UnknownOption {
                quiz_id: quiz_id.to_owned(),
                index: option_index,
            })?;
        let record = AnswerRecord {
            selected: option_index,
            correct: option.is_correct,
        };
        self.answers.insert(quiz_id.to_owned(), record);
        Ok(record)
    }

    /// Forgets the answer to `quiz_id`. Returns whether one was recorded.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownQuiz` if no quiz has that id.
    pub fn replay_question(&mut self, quiz_id: &str) -> Result<bool, DomainError> {
        self.quiz(quiz_id)?;
        Ok(self.answers.remove(quiz_id).is_some())
    }

    /// Forgets every answer.
    pub fn reset(&mut self) {
        self.answers.clear();
    }

    /// The recorded answer for `quiz_id`, if any.
    #[must_use]
    pub fn get(&self, quiz_id: &str) -> Option<AnswerRecord> {
        self.answers.get(quiz_id).copied()
    }

    /// All recorded answers keyed by quiz id.
    #[must_use]
    pub fn answers(&self) -> &BTreeMap<String, AnswerRecord> {
        &self.answers
    }

    /// The quizzes this sheet accepts answers for.
    #[must_use]
    pub fn quizzes(&self) -> &[Quiz] {
        &self.quizzes
    }

    /// Key of the stage that presents `quiz_id`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownQuiz` if no quiz has that id.
    pub fn stage_key(&self, quiz_id: &str) -> Result<String, DomainError> {
        self.quizzes
            .iter()
            .position(|q| q.id == quiz_id)
            .map(Quiz::stage_key)
            .ok_or_else(|| DomainError::UnknownQuiz(quiz_id.to_owned()))
    }

    fn quiz(&self, quiz_id: &str) -> Result<&Quiz, DomainError> {
        self.quizzes
            .iter()
            .find(|q| q.id == quiz_id)
            .ok_or_else(|| DomainError::UnknownQuiz(quiz_id.to_owned()))
    }
}

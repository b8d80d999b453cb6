use crate::{Gender, TranslateMode, Vocabulary, VocabularyId, WordGroup};
use serde::{Deserialize, Serialize};

/// Grammatical metadata of a vocabulary entry.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GrammarInfo {
    pub word_group: WordGroup,
    pub endings: String,
    pub gender: Option<Gender>,
}

impl GrammarInfo {
    pub fn from_vocabulary(vocabulary: &Vocabulary) -> Self {
        Self {
            word_group: vocabulary.word_group,
            endings: vocabulary.ending.clone(),
            gender: vocabulary.gender,
        }
    }
}

/// Metadata attached to a question, gated by when it may be shown.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "show", content = "info", rename_all = "snake_case")]
pub enum AdditionalInfo {
    /// Visible together with the prompt.
    PromptInfo(GrammarInfo),
    /// Visible only once the answer has been checked.
    SolutionInfo(GrammarInfo),
}

impl AdditionalInfo {
    /// Places the metadata next to the prompt when the Swedish word is what the
    /// user sees, and behind the solution when the user has to produce it.
    ///
    /// `mode` must already be resolved; `Random` is treated like
    /// `NativeToSwedish` so nothing leaks.
    pub fn for_direction(vocabulary: &Vocabulary, mode: TranslateMode) -> Self {
        let info = GrammarInfo::from_vocabulary(vocabulary);
        match mode {
            TranslateMode::SwedishToNative => AdditionalInfo::PromptInfo(info),
            TranslateMode::NativeToSwedish | TranslateMode::Random => {
                AdditionalInfo::SolutionInfo(info)
            }
        }
    }

    pub fn info(&self) -> &GrammarInfo {
        match self {
            AdditionalInfo::PromptInfo(info) | AdditionalInfo::SolutionInfo(info) => info,
        }
    }

    pub fn visible_before_answer(&self) -> bool {
        matches!(self, AdditionalInfo::PromptInfo(_))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizQuestion<A> {
    pub vocabulary_id: VocabularyId,
    pub prompt: String,
    pub expected_answer: A,
    pub prompt_data: Option<AdditionalInfo>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslateWithoutEndingsAnswer {
    pub answer: String,
}

impl TranslateWithoutEndingsAnswer {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslateWithEndingsAnswer {
    pub answer: String,
    pub endings: Option<String>,
}

impl TranslateWithEndingsAnswer {
    pub fn new(answer: impl Into<String>, endings: Option<String>) -> Self {
        Self {
            answer: answer.into(),
            endings,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct OnlyEndingsAnswer {
    pub endings: String,
}

impl OnlyEndingsAnswer {
    pub fn new(endings: impl Into<String>) -> Self {
        Self {
            endings: endings.into(),
        }
    }
}

/// Outcome of grading one answer.
pub trait AnswerResult {
    /// Whether the answer counts as correct in the session statistics.
    fn is_fully_correct(&self) -> bool;
}

impl AnswerResult for bool {
    fn is_fully_correct(&self) -> bool {
        *self
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslateWithEndingsResult {
    pub translation_correct: bool,
    pub endings_correct: bool,
}

impl AnswerResult for TranslateWithEndingsResult {
    fn is_fully_correct(&self) -> bool {
        self.translation_correct && self.endings_correct
    }
}

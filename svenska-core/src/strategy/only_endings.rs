use super::QuizStrategy;
use crate::{
    compare_endings, AdditionalInfo, EndingsInput, GrammarInfo, OnlyEndingsAnswer, QuizQuestion,
    Vocabulary,
};

/// Asks for the endings of a Swedish word. The metadata is only revealed
/// after checking, since it contains the endings themselves.
#[derive(Debug, Default, Clone, Copy)]
pub struct OnlyEndingsStrategy;

impl QuizStrategy for OnlyEndingsStrategy {
    type Answer = OnlyEndingsAnswer;
    type Result = bool;
    type Input = EndingsInput;

    fn generate_question(&self, vocabulary: &Vocabulary) -> QuizQuestion<Self::Answer> {
        QuizQuestion {
            vocabulary_id: vocabulary.id,
            prompt: vocabulary.word.clone(),
            expected_answer: OnlyEndingsAnswer::new(vocabulary.ending.clone()),
            prompt_data: Some(AdditionalInfo::SolutionInfo(GrammarInfo::from_vocabulary(vocabulary))),
        }
    }

    fn validate_answer(&self, question: &QuizQuestion<Self::Answer>, answer: &Self::Answer) -> bool {
        compare_endings(&question.expected_answer.endings, &answer.endings)
    }
}

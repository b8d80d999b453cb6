use std::sync::Arc;

use super::{resolve_direction, QuizStrategy};
use crate::{
    answers_match, QuizQuestion, RandomSource, ThreadRandom, TranslateMode,
    TranslateWithoutEndingsAnswer, TranslationInput, Vocabulary,
};

/// Plain translation in either direction, without grammatical metadata.
pub struct TranslateWithoutEndingsStrategy {
    mode: TranslateMode,
    random: Arc<dyn RandomSource>,
}

impl TranslateWithoutEndingsStrategy {
    pub fn new(mode: TranslateMode) -> Self {
        Self::with_random(mode, Arc::new(ThreadRandom))
    }

    pub fn with_random(mode: TranslateMode, random: Arc<dyn RandomSource>) -> Self {
        Self { mode, random }
    }
}

impl QuizStrategy for TranslateWithoutEndingsStrategy {
    type Answer = TranslateWithoutEndingsAnswer;
    type Result = bool;
    type Input = TranslationInput;

    fn generate_question(&self, vocabulary: &Vocabulary) -> QuizQuestion<Self::Answer> {
        let (prompt, expected) = match resolve_direction(self.mode, self.random.as_ref()) {
            TranslateMode::NativeToSwedish => (&vocabulary.translation, &vocabulary.word),
            _ => (&vocabulary.word, &vocabulary.translation),
        };
        QuizQuestion {
            vocabulary_id: vocabulary.id,
            prompt: prompt.clone(),
            expected_answer: TranslateWithoutEndingsAnswer::new(expected.clone()),
            prompt_data: None,
        }
    }

    fn validate_answer(&self, question: &QuizQuestion<Self::Answer>, answer: &Self::Answer) -> bool {
        answers_match(&question.expected_answer.answer, &answer.answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::testing::FixedCoin;

    fn hund() -> Vocabulary {
        Vocabulary::new(1, 1, "hund", "dog")
    }

    #[test]
    fn swedish_to_native_asks_for_translation() {
        let s = TranslateWithoutEndingsStrategy::new(TranslateMode::SwedishToNative);
        let q = s.generate_question(&hund());
        assert_eq!(q.vocabulary_id, 1);
        assert_eq!(q.prompt, "hund");
        assert_eq!(q.expected_answer.answer, "dog");
        assert_eq!(q.prompt_data, None);
    }

    #[test]
    fn native_to_swedish_asks_for_word() {
        let s = TranslateWithoutEndingsStrategy::new(TranslateMode::NativeToSwedish);
        let q = s.generate_question(&hund());
        assert_eq!(q.prompt, "dog");
        assert_eq!(q.expected_answer.answer, "hund");
    }

    #[test]
    fn random_mode_follows_coin() {
        let heads = TranslateWithoutEndingsStrategy::with_random(
            TranslateMode::Random,
            Arc::new(FixedCoin::new(true)),
        );
        assert_eq!(heads.generate_question(&hund()).prompt, "hund");

        let tails = TranslateWithoutEndingsStrategy::with_random(
            TranslateMode::Random,
            Arc::new(FixedCoin::new(false)),
        );
        assert_eq!(tails.generate_question(&hund()).prompt, "dog");
    }

    #[test]
    fn validation_ignores_case_and_padding() {
        let s = TranslateWithoutEndingsStrategy::new(TranslateMode::SwedishToNative);
        let q = s.generate_question(&hund());
        assert!(s.validate_answer(&q, &TranslateWithoutEndingsAnswer::new(" DOG ")));
        assert!(!s.validate_answer(&q, &TranslateWithoutEndingsAnswer::new("cat")));
        assert!(s.is_correct(&true));
    }
}

use std::sync::Arc;

use super::{resolve_direction, QuizStrategy};
use crate::{
    answers_match, compare_endings, AdditionalInfo, QuizQuestion, RandomSource, ThreadRandom,
    TranslateMode, TranslateWithEndingsAnswer, TranslateWithEndingsResult,
    TranslationWithEndingsInput, Vocabulary,
};

/// Translation where the Swedish side also carries its endings.
///
/// Going from Swedish, the word and its metadata are already on screen, so
/// the endings are shown up front and not asked for. Going to Swedish, the
/// user has to produce word and endings from memory and the metadata is held
/// back until the answer is checked.
pub struct TranslateWithEndingsStrategy {
    mode: TranslateMode,
    random: Arc<dyn RandomSource>,
}

impl TranslateWithEndingsStrategy {
    pub fn new(mode: TranslateMode) -> Self {
        Self::with_random(mode, Arc::new(ThreadRandom))
    }

    pub fn with_random(mode: TranslateMode, random: Arc<dyn RandomSource>) -> Self {
        Self { mode, random }
    }
}

impl QuizStrategy for TranslateWithEndingsStrategy {
    type Answer = TranslateWithEndingsAnswer;
    type Result = TranslateWithEndingsResult;
    type Input = TranslationWithEndingsInput;

    fn generate_question(&self, vocabulary: &Vocabulary) -> QuizQuestion<Self::Answer> {
        let direction = resolve_direction(self.mode, self.random.as_ref());
        let prompt_data = Some(AdditionalInfo::for_direction(vocabulary, direction));

        match direction {
            TranslateMode::NativeToSwedish => {
                let endings = Some(vocabulary.ending.clone()).filter(|e| !e.trim().is_empty());
                QuizQuestion {
                    vocabulary_id: vocabulary.id,
                    prompt: vocabulary.translation.clone(),
                    expected_answer: TranslateWithEndingsAnswer::new(vocabulary.word.clone(), endings),
                    prompt_data,
                }
            }
            _ => QuizQuestion {
                vocabulary_id: vocabulary.id,
                prompt: vocabulary.word.clone(),
                expected_answer: TranslateWithEndingsAnswer::new(vocabulary.translation.clone(), None),
                prompt_data,
            },
        }
    }

    fn validate_answer(
        &self,
        question: &QuizQuestion<Self::Answer>,
        answer: &Self::Answer,
    ) -> TranslateWithEndingsResult {
        let expected = &question.expected_answer;
        TranslateWithEndingsResult {
            translation_correct: answers_match(&expected.answer, &answer.answer),
            endings_correct: compare_endings(
                expected.endings.as_deref().unwrap_or_default(),
                answer.endings.as_deref().unwrap_or_default(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::testing::FixedCoin;
    use crate::{Gender, GrammarInfo, NounSubgroup, WordGroup};

    fn flicka() -> Vocabulary {
        Vocabulary::new(3, 1, "flicka", "girl")
            .with_word_group(WordGroup::Noun(NounSubgroup::Or))
            .with_gender(Gender::Ultra)
            .with_ending("-n -or -orna")
    }

    fn info() -> GrammarInfo {
        GrammarInfo {
            word_group: WordGroup::Noun(NounSubgroup::Or),
            endings: "-n -or -orna".into(),
            gender: Some(Gender::Ultra),
        }
    }

    #[test]
    fn swedish_prompt_shows_metadata_and_skips_endings() {
        let s = TranslateWithEndingsStrategy::new(TranslateMode::SwedishToNative);
        let q = s.generate_question(&flicka());
        assert_eq!(q.prompt, "flicka");
        assert_eq!(q.expected_answer, TranslateWithEndingsAnswer::new("girl", None));
        assert_eq!(q.prompt_data, Some(AdditionalInfo::PromptInfo(info())));
    }

    #[test]
    fn native_prompt_hides_metadata_and_expects_endings() {
        let s = TranslateWithEndingsStrategy::new(TranslateMode::NativeToSwedish);
        let q = s.generate_question(&flicka());
        assert_eq!(q.prompt, "girl");
        assert_eq!(
            q.expected_answer,
            TranslateWithEndingsAnswer::new("flicka", Some("-n -or -orna".into()))
        );
        assert_eq!(q.prompt_data, Some(AdditionalInfo::SolutionInfo(info())));
    }

    #[test]
    fn blank_ending_is_not_expected() {
        let s = TranslateWithEndingsStrategy::new(TranslateMode::NativeToSwedish);
        let q = s.generate_question(&Vocabulary::new(4, 1, "och", "and").with_ending("  "));
        assert_eq!(q.expected_answer.endings, None);
        let r = s.validate_answer(&q, &TranslateWithEndingsAnswer::new("och", Some(String::new())));
        assert!(r.translation_correct && r.endings_correct);
    }

    #[test]
    fn random_tails_goes_to_swedish() {
        let s = TranslateWithEndingsStrategy::with_random(
            TranslateMode::Random,
            Arc::new(FixedCoin::new(false)),
        );
        let q = s.generate_question(&flicka());
        assert_eq!(q.prompt, "girl");
        assert!(matches!(q.prompt_data, Some(AdditionalInfo::SolutionInfo(_))));
    }

    #[test]
    fn random_heads_shows_swedish_with_metadata() {
        let s = TranslateWithEndingsStrategy::with_random(
            TranslateMode::Random,
            Arc::new(FixedCoin::new(true)),
        );
        let q = s.generate_question(&flicka());
        assert_eq!(q.prompt, "flicka");
        assert_eq!(q.expected_answer, TranslateWithEndingsAnswer::new("girl", None));
        assert_eq!(q.prompt_data, Some(AdditionalInfo::PromptInfo(info())));
    }

    #[test]
    fn grades_translation_and_endings_separately() {
        let s = TranslateWithEndingsStrategy::new(TranslateMode::NativeToSwedish);
        let q = s.generate_question(&flicka());

        let both = s.validate_answer(&q, &TranslateWithEndingsAnswer::new("Flicka ", Some("n or orna".into())));
        assert_eq!(both, TranslateWithEndingsResult { translation_correct: true, endings_correct: true });
        assert!(s.is_correct(&both));

        let word_only = s.validate_answer(&q, &TranslateWithEndingsAnswer::new("flicka", Some("-n -ar".into())));
        assert_eq!(word_only, TranslateWithEndingsResult { translation_correct: true, endings_correct: false });
        assert!(!s.is_correct(&word_only));

        let endings_only = s.validate_answer(&q, &TranslateWithEndingsAnswer::new("pojke", Some("-n-or-orna".into())));
        assert_eq!(endings_only, TranslateWithEndingsResult { translation_correct: false, endings_correct: true });

        let missing = s.validate_answer(&q, &TranslateWithEndingsAnswer::new("flicka", None));
        assert!(!missing.endings_correct);
    }
}

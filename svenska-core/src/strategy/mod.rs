//! Pluggable policies that turn a vocabulary entry into a question and grade
//! the answer given to it.

use std::fmt::Debug;

use crate::{AnswerInput, AnswerResult, QuizQuestion, RandomSource, TranslateMode, Vocabulary};

pub mod only_endings;
pub mod translate;
pub mod with_endings;

pub use only_endings::OnlyEndingsStrategy;
pub use translate::TranslateWithoutEndingsStrategy;
pub use with_endings::TranslateWithEndingsStrategy;

pub trait QuizStrategy: Send + Sync {
    type Answer: Clone + Debug + PartialEq + Send + Sync + 'static;
    type Result: AnswerResult + Clone + Debug + PartialEq + Send + Sync + 'static;
    /// Transient input the user edits before submitting an answer.
    type Input: AnswerInput<Answer = Self::Answer> + Default + Clone + Debug + PartialEq + Send + Sync + 'static;

    fn generate_question(&self, vocabulary: &Vocabulary) -> QuizQuestion<Self::Answer>;

    /// Grading is total: every answer yields a result.
    fn validate_answer(
        &self,
        question: &QuizQuestion<Self::Answer>,
        answer: &Self::Answer,
    ) -> Self::Result;

    /// Extracts full correctness from a result for the session statistics.
    fn is_correct(&self, result: &Self::Result) -> bool {
        result.is_fully_correct()
    }
}

/// Resolves `Random` into one of the fixed directions; heads is Swedish first.
pub(crate) fn resolve_direction(mode: TranslateMode, random: &dyn RandomSource) -> TranslateMode {
    match mode {
        TranslateMode::SwedishToNative | TranslateMode::NativeToSwedish => mode,
        TranslateMode::Random => {
            if random.next_bool() {
                TranslateMode::SwedishToNative
            } else {
                TranslateMode::NativeToSwedish
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::RandomSource;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Coin that always lands on the configured side.
    pub struct FixedCoin(pub AtomicBool);

    impl FixedCoin {
        pub fn new(side: bool) -> Self {
            Self(AtomicBool::new(side))
        }
    }

    impl RandomSource for FixedCoin {
        fn next_u64(&self) -> u64 {
            7
        }

        fn next_bool(&self) -> bool {
            self.0.load(Ordering::SeqCst)
        }
    }
}

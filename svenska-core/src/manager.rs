use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{QuizQuestion, QuizStrategy, Vocabulary, VocabularyId};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizStatistics {
    pub correct_answers: u32,
    pub total_questions: u32,
}

impl QuizStatistics {
    pub fn score(&self) -> f32 {
        if self.total_questions == 0 {
            0.0
        } else {
            self.correct_answers as f32 / self.total_questions as f32
        }
    }
}

/// Question sequence of one session and the position within it.
///
/// The index stays inside `0..len` once a non-empty sequence is loaded.
#[derive(Clone, Debug, Default)]
pub struct QuizManager {
    vocabularies: Vec<Vocabulary>,
    // Latest verdict per position.
    outcomes: Vec<Option<bool>>,
    current_index: usize,
}

impl QuizManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, vocabularies: Vec<Vocabulary>, shuffle: bool) {
        self.start_with_rng(vocabularies, shuffle, &mut rand::thread_rng());
    }

    pub fn start_with_rng<R: Rng + ?Sized>(
        &mut self,
        mut vocabularies: Vec<Vocabulary>,
        shuffle: bool,
        rng: &mut R,
    ) {
        if shuffle {
            vocabularies.shuffle(rng);
        }
        self.outcomes = vec![None; vocabularies.len()];
        self.vocabularies = vocabularies;
        self.current_index = 0;
    }

    pub fn vocabularies(&self) -> &[Vocabulary] {
        &self.vocabularies
    }

    pub fn len(&self) -> usize {
        self.vocabularies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabularies.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_vocabulary(&self) -> Option<&Vocabulary> {
        self.vocabularies.get(self.current_index)
    }

    pub fn current_vocabulary_is_favorite(&self) -> Option<bool> {
        self.current_vocabulary().map(|v| v.is_favorite)
    }

    pub fn current_question<S: QuizStrategy + ?Sized>(
        &self,
        strategy: &S,
    ) -> Option<QuizQuestion<S::Answer>> {
        self.current_vocabulary().map(|v| strategy.generate_question(v))
    }

    pub fn has_more_questions(&self) -> bool {
        self.current_index + 1 < self.vocabularies.len()
    }

    /// Returns `false` without moving when the current question is the last one.
    pub fn go_to_next_question(&mut self) -> bool {
        if self.has_more_questions() {
            self.current_index += 1;
            true
        } else {
            false
        }
    }

    pub fn has_previous_question(&self) -> bool {
        self.current_index > 0
    }

    pub fn go_to_previous_question(&mut self) {
        if self.current_index > 0 {
            self.current_index -= 1;
        }
    }

    pub fn record_answer(&mut self, correct: bool) {
        if let Some(slot) = self.outcomes.get_mut(self.current_index) {
            *slot = Some(correct);
        }
    }

    /// Keeps the session copy in sync after a favorite toggle.
    pub fn set_favorite(&mut self, id: VocabularyId, is_favorite: bool) {
        for v in self.vocabularies.iter_mut().filter(|v| v.id == id) {
            v.is_favorite = is_favorite;
        }
    }

    pub fn statistics(&self) -> QuizStatistics {
        QuizStatistics {
            correct_answers: self.outcomes.iter().filter(|o| **o == Some(true)).count() as u32,
            total_questions: self.vocabularies.len() as u32,
        }
    }
}

//! What the user has typed so far, before an answer is submitted.

use serde::{Deserialize, Serialize};

use crate::{OnlyEndingsAnswer, TranslateWithEndingsAnswer, TranslateWithoutEndingsAnswer};

pub trait AnswerInput {
    type Answer;

    fn to_user_answer(&self) -> Self::Answer;
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslationInput {
    pub translation: String,
}

impl AnswerInput for TranslationInput {
    type Answer = TranslateWithoutEndingsAnswer;

    fn to_user_answer(&self) -> TranslateWithoutEndingsAnswer {
        TranslateWithoutEndingsAnswer::new(self.translation.clone())
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslationWithEndingsInput {
    pub translation: String,
    pub endings: String,
}

impl AnswerInput for TranslationWithEndingsInput {
    type Answer = TranslateWithEndingsAnswer;

    fn to_user_answer(&self) -> TranslateWithEndingsAnswer {
        TranslateWithEndingsAnswer::new(self.translation.clone(), Some(self.endings.clone()))
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EndingsInput {
    pub endings: String,
}

impl AnswerInput for EndingsInput {
    type Answer = OnlyEndingsAnswer;

    fn to_user_answer(&self) -> OnlyEndingsAnswer {
        OnlyEndingsAnswer::new(self.endings.clone())
    }
}

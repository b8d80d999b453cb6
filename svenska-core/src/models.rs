use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type VocabularyId = u32;
pub type ContainerId = u32;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NounSubgroup {
    Or,
    Ar,
    Er,
    R,
    N,
    UnchangedEtt,
    UnchangedEn,
    Special,
    Undefined,
}

impl NounSubgroup {
    pub const ALL: [NounSubgroup; 9] = [
        NounSubgroup::Or,
        NounSubgroup::Ar,
        NounSubgroup::Er,
        NounSubgroup::R,
        NounSubgroup::N,
        NounSubgroup::UnchangedEtt,
        NounSubgroup::UnchangedEn,
        NounSubgroup::Special,
        NounSubgroup::Undefined,
    ];

    /// Special and undefined nouns share one "irregular" bucket.
    pub fn is_irregular(&self) -> bool {
        matches!(self, NounSubgroup::Special | NounSubgroup::Undefined)
    }

    pub fn label(&self) -> &'static str {
        match self {
            NounSubgroup::Or => "-or",
            NounSubgroup::Ar => "-ar",
            NounSubgroup::Er => "-er",
            NounSubgroup::R => "-r",
            NounSubgroup::N => "-n",
            NounSubgroup::UnchangedEtt => "unchanged (ett)",
            NounSubgroup::UnchangedEn => "unchanged (en)",
            NounSubgroup::Special => "special",
            NounSubgroup::Undefined => "undefined",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerbSubgroup {
    #[serde(rename = "GROUP_1")]
    Group1,
    #[serde(rename = "GROUP_2A")]
    Group2a,
    #[serde(rename = "GROUP_2B")]
    Group2b,
    #[serde(rename = "GROUP_3")]
    Group3,
    #[serde(rename = "GROUP_4_SPECIAL")]
    Group4Special,
    Undefined,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(tag = "type", content = "subgroup", rename_all = "snake_case")]
pub enum WordGroup {
    Noun(NounSubgroup),
    Verb(VerbSubgroup),
    Adjective,
    #[default]
    Other,
}

impl WordGroup {
    pub fn noun_subgroup(&self) -> Option<NounSubgroup> {
        match self {
            WordGroup::Noun(sub) => Some(*sub),
            _ => None,
        }
    }

    pub fn is_noun(&self) -> bool {
        matches!(self, WordGroup::Noun(_))
    }
}

/// Grammatical gender: `Ultra` is "en", `Neutra` is "ett".
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Ultra,
    Neutra,
}

impl Gender {
    pub fn article(&self) -> &'static str {
        match self {
            Gender::Ultra => "en",
            Gender::Neutra => "ett",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vocabulary {
    pub id: VocabularyId,
    pub container_id: ContainerId,
    pub word: String,
    pub translation: String,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub word_group: WordGroup,
    #[serde(default)]
    pub ending: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub irregular_pronunciation: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,

    pub created_at: DateTime<Utc>,
    pub last_edited: DateTime<Utc>,
}

impl Vocabulary {
    pub fn new(
        id: VocabularyId,
        container_id: ContainerId,
        word: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            container_id,
            word: word.into(),
            translation: translation.into(),
            gender: None,
            word_group: WordGroup::Other,
            ending: String::new(),
            notes: String::new(),
            irregular_pronunciation: None,
            is_favorite: false,
            created_at: now,
            last_edited: now,
        }
    }

    pub fn with_word_group(mut self, word_group: WordGroup) -> Self {
        self.word_group = word_group;
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_ending(mut self, ending: impl Into<String>) -> Self {
        self.ending = ending.into();
        self
    }

    pub fn favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = is_favorite;
        self
    }
}

/// Direction of a translation question.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TranslateMode {
    #[default]
    SwedishToNative,
    NativeToSwedish,
    /// Picks one of the two directions per question with the strategy's coin flip.
    Random,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "mode", rename_all = "snake_case")]
pub enum QuizMode {
    Translate(TranslateMode),
    TranslateWithEndings(TranslateMode),
    OnlyEndings,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionConfig {
    #[serde(default)]
    pub container_id: Option<ContainerId>,
    #[serde(default = "default_shuffle")]
    pub shuffle_words: bool,
}

fn default_shuffle() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            container_id: None,
            shuffle_words: default_shuffle(),
        }
    }
}

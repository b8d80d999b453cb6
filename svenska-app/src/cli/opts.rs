use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use svenska_core::{Gender, NounSubgroup, QuizMode, TranslateMode, VerbSubgroup};

#[derive(Debug, Parser, Clone)]
#[command(name = "svenska-quiz", version, about = "Swedish vocabulary quizzes in the terminal")]
pub struct Cli {
    /// Directory holding vocabulary and session files (defaults to app data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Only quiz words of this container
    #[arg(long, global = true)]
    pub container: Option<u32>,

    /// Keep the stored word order
    #[arg(long, global = true)]
    pub no_shuffle: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Translate words, optionally with their endings
    Translate(TranslateCmd),
    /// Give the endings of each word
    Endings,
    /// Sort nouns into their inflection subgroup (resumable)
    WordGroups {
        /// Throw away the saved progress first
        #[arg(long)]
        reset: bool,
    },
    /// List stored words
    List,
    /// Add a word
    Add(AddCmd),
}

#[derive(Debug, Args, Clone)]
pub struct TranslateCmd {
    #[arg(long, value_enum, default_value_t = Direction::SwedishToNative)]
    pub direction: Direction,
    #[arg(long)]
    pub with_endings: bool,
}

impl TranslateCmd {
    pub fn mode(&self) -> QuizMode {
        let direction = TranslateMode::from(self.direction);
        if self.with_endings {
            QuizMode::TranslateWithEndings(direction)
        } else {
            QuizMode::Translate(direction)
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct AddCmd {
    #[arg(long)]
    pub word: String,
    #[arg(long)]
    pub translation: String,
    #[arg(long, value_enum, conflicts_with_all = ["verb", "adjective"])]
    pub noun: Option<NounArg>,
    #[arg(long, value_enum, conflicts_with = "adjective")]
    pub verb: Option<VerbArg>,
    #[arg(long)]
    pub adjective: bool,
    #[arg(long, value_enum)]
    pub gender: Option<GenderArg>,
    /// e.g. "-en -ar -arna"
    #[arg(long, allow_hyphen_values = true)]
    pub ending: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Direction {
    SwedishToNative,
    NativeToSwedish,
    Random,
}

impl From<Direction> for TranslateMode {
    fn from(d: Direction) -> Self {
        match d {
            Direction::SwedishToNative => TranslateMode::SwedishToNative,
            Direction::NativeToSwedish => TranslateMode::NativeToSwedish,
            Direction::Random => TranslateMode::Random,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum NounArg {
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

impl From<NounArg> for NounSubgroup {
    fn from(n: NounArg) -> Self {
        match n {
            NounArg::Or => NounSubgroup::Or,
            NounArg::Ar => NounSubgroup::Ar,
            NounArg::Er => NounSubgroup::Er,
            NounArg::R => NounSubgroup::R,
            NounArg::N => NounSubgroup::N,
            NounArg::UnchangedEtt => NounSubgroup::UnchangedEtt,
            NounArg::UnchangedEn => NounSubgroup::UnchangedEn,
            NounArg::Special => NounSubgroup::Special,
            NounArg::Undefined => NounSubgroup::Undefined,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum VerbArg {
    #[value(name = "1")]
    Group1,
    #[value(name = "2a")]
    Group2a,
    #[value(name = "2b")]
    Group2b,
    #[value(name = "3")]
    Group3,
    #[value(name = "4")]
    Group4Special,
    Undefined,
}

impl From<VerbArg> for VerbSubgroup {
    fn from(v: VerbArg) -> Self {
        match v {
            VerbArg::Group1 => VerbSubgroup::Group1,
            VerbArg::Group2a => VerbSubgroup::Group2a,
            VerbArg::Group2b => VerbSubgroup::Group2b,
            VerbArg::Group3 => VerbSubgroup::Group3,
            VerbArg::Group4Special => VerbSubgroup::Group4Special,
            VerbArg::Undefined => VerbSubgroup::Undefined,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GenderArg {
    En,
    Ett,
}

impl From<GenderArg> for Gender {
    fn from(g: GenderArg) -> Self {
        match g {
            GenderArg::En => Gender::Ultra,
            GenderArg::Ett => Gender::Neutra,
        }
    }
}

use crate::cli::opts::*;

use anyhow::{bail, Result};
use std::io::{stdin, stdout, Write};
use std::sync::Arc;
use svenska_core::{
    ActiveQuiz, GrammarInfo, GroupClassificationController, GroupClassificationState, NounSubgroup,
    OnlyEndingsAnswer, OnlyEndingsStrategy, QuizMode, QuizSessionController, QuizSessionState,
    QuizStrategy, SessionConfig, ThreadRandom, TranslateMode, TranslateWithEndingsAnswer,
    TranslateWithEndingsResult, TranslateWithEndingsStrategy, TranslateWithoutEndingsAnswer,
    TranslateWithoutEndingsStrategy, Vocabulary, VerbSubgroup, WithEndingsOnly, WordGroup,
};
use svenska_core::{EndingsInput, TranslationInput, TranslationWithEndingsInput};
use svenska_json::paths::{default_store_files, StorePaths};
use svenska_json::{JsonSessionStore, JsonVocabularyStore};

const MAX_BACKUPS: usize = 10;
const DEFAULT_CONTAINER: u32 = 1;

pub async fn run_cli(args: Cli) -> Result<()> {
    let paths = match &args.data_dir {
        Some(dir) => StorePaths::in_dir(dir),
        None => default_store_files(),
    };
    tracing::debug!(file = %paths.vocabulary_file.display(), "opening vocabulary");
    let words = Arc::new(
        JsonVocabularyStore::open_with(
            paths.vocabulary_file.clone(),
            paths.backups_dir.clone(),
            MAX_BACKUPS,
        )
        .await?,
    );
    let config = SessionConfig {
        container_id: args.container,
        shuffle_words: !args.no_shuffle,
    };

    match args.cmd {
        Command::Translate(t) => run_quiz(t.mode(), words, config).await,
        Command::Endings => run_quiz(QuizMode::OnlyEndings, words, config).await,
        Command::WordGroups { reset } => word_groups(words, &paths, args.container, reset).await,
        Command::List => {
            list_cmd(&words, args.container);
            Ok(())
        }
        Command::Add(a) => add_cmd(&words, a, args.container).await,
    }
}

async fn run_quiz(mode: QuizMode, words: Arc<JsonVocabularyStore>, config: SessionConfig) -> Result<()> {
    tracing::debug!(?mode, "starting quiz");
    match mode {
        QuizMode::Translate(direction) => {
            let strategy = TranslateWithoutEndingsStrategy::new(direction);
            drill(QuizSessionController::new(strategy, words.clone(), words, config)).await
        }
        QuizMode::TranslateWithEndings(direction) => {
            let strategy = TranslateWithEndingsStrategy::new(direction);
            drill(QuizSessionController::new(strategy, words.clone(), words, config)).await
        }
        QuizMode::OnlyEndings => {
            // Words without endings have nothing to ask.
            let source = Arc::new(WithEndingsOnly::new(words.clone()));
            drill(QuizSessionController::new(OnlyEndingsStrategy, source, words, config)).await
        }
    }
}

/// How the terminal reads answers for a strategy and prints its results.
trait Drill: QuizStrategy {
    const ANSWER_HINT: &'static str;

    fn fill(input: &mut Self::Input, line: &str);
    fn verdict(result: &Self::Result) -> String;
    fn solution(expected: &Self::Answer) -> String;
}

impl Drill for TranslateWithoutEndingsStrategy {
    const ANSWER_HINT: &'static str = "type the translation";

    fn fill(input: &mut TranslationInput, line: &str) {
        input.translation = line.to_string();
    }

    fn verdict(result: &bool) -> String {
        right_or_wrong(*result).to_string()
    }

    fn solution(expected: &TranslateWithoutEndingsAnswer) -> String {
        expected.answer.clone()
    }
}

impl Drill for TranslateWithEndingsStrategy {
    const ANSWER_HINT: &'static str = "type `translation; endings`";

    fn fill(input: &mut TranslationWithEndingsInput, line: &str) {
        let (translation, endings) = split_answer(line);
        input.translation = translation.to_string();
        input.endings = endings.to_string();
    }

    fn verdict(result: &TranslateWithEndingsResult) -> String {
        format!(
            "translation {}, endings {}",
            right_or_wrong(result.translation_correct),
            right_or_wrong(result.endings_correct)
        )
    }

    fn solution(expected: &TranslateWithEndingsAnswer) -> String {
        match &expected.endings {
            Some(endings) => format!("{}; {}", expected.answer, endings),
            None => expected.answer.clone(),
        }
    }
}

impl Drill for OnlyEndingsStrategy {
    const ANSWER_HINT: &'static str = "type the endings, e.g. `-en -ar -arna`";

    fn fill(input: &mut EndingsInput, line: &str) {
        input.endings = line.to_string();
    }

    fn verdict(result: &bool) -> String {
        right_or_wrong(*result).to_string()
    }

    fn solution(expected: &OnlyEndingsAnswer) -> String {
        expected.endings.clone()
    }
}

async fn drill<S: Drill>(session: QuizSessionController<S>) -> Result<()> {
    session.start().await;
    println!("{}; n=next, p=previous, f=favorite, r=retry, q=quit", S::ANSWER_HINT);

    loop {
        match session.state() {
            QuizSessionState::Loading => bail!("quiz did not start"),
            QuizSessionState::Empty => {
                println!("no words to quiz");
                return Ok(());
            }
            QuizSessionState::Finished {
                correct_answers,
                total_questions,
                score,
            } => {
                println!(
                    "\ndone: {}/{} correct ({:.0}%)",
                    correct_answers,
                    total_questions,
                    score * 100.0
                );
                return Ok(());
            }
            QuizSessionState::Error { error, retry } => {
                println!("{} failed: {}", retry.name(), error);
                match read_line("[r=retry, q=quit]> ")?.trim() {
                    "r" => session.retry().await,
                    "q" => return Ok(()),
                    _ => {}
                }
            }
            QuizSessionState::Active(active) => {
                show_question::<S>(&active);
                let line = read_line("> ")?;
                match line.trim() {
                    "q" => return Ok(()),
                    "n" => session.next_word().await,
                    "p" => session.return_to_previous_question().await,
                    "f" => {
                        let favorite = active.vocabulary_is_favorite.unwrap_or(false);
                        session.toggle_favorite(!favorite).await;
                    }
                    "r" => session.retry().await,
                    "" => {}
                    answer => {
                        session.edit_input(|input| S::fill(input, answer));
                        session.check_input().await;
                    }
                }
            }
        }
    }
}

fn show_question<S: Drill>(active: &ActiveQuiz<S::Answer, S::Result>) {
    let star = if active.vocabulary_is_favorite == Some(true) { " *" } else { "" };
    let info = active.question.prompt_data.as_ref();

    match &active.user_answer_result {
        None => {
            println!("\nQ: {}{}", active.question.prompt, star);
            if let Some(info) = info.filter(|i| i.visible_before_answer()) {
                println!("   ({})", grammar_line(info.info()));
            }
        }
        Some(result) => {
            println!("{}", S::verdict(result));
            println!("A: {}", S::solution(&active.question.expected_answer));
            if let Some(info) = info.filter(|i| !i.visible_before_answer()) {
                println!("   ({})", grammar_line(info.info()));
            }
        }
    }
}

async fn word_groups(
    words: Arc<JsonVocabularyStore>,
    paths: &StorePaths,
    container: Option<u32>,
    reset: bool,
) -> Result<()> {
    let store = Arc::new(JsonSessionStore::open(paths.session_file.clone()).await?);
    if reset {
        store.clear().await?;
        tracing::info!(file = %paths.session_file.display(), "word group progress reset");
    }
    let quiz = GroupClassificationController::new(words, store, Arc::new(ThreadRandom), container);
    quiz.start().await;

    let menu: Vec<String> = NounSubgroup::ALL
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}={}", i + 1, s.label()))
        .collect();
    println!("{}", menu.join("  "));

    loop {
        match quiz.state() {
            GroupClassificationState::Loading => bail!("word group quiz did not start"),
            GroupClassificationState::Empty => {
                println!("no nouns to sort");
                return Ok(());
            }
            GroupClassificationState::Completed => {
                println!("all nouns sorted; run with --reset to start over");
                return Ok(());
            }
            GroupClassificationState::Error { error, retry } => {
                println!("{} failed: {}", retry.name(), error);
                match read_line("[r=retry, q=quit]> ")?.trim() {
                    "r" => quiz.retry().await,
                    "q" => return Ok(()),
                    _ => {}
                }
            }
            GroupClassificationState::QuizItem(item) => {
                println!("\n[{}/{}] {}", item.progress + 1, item.progress_goal, item.vocabulary.word);
                if let Some(selected) = item.selected_subgroup {
                    println!("selected: {}", selected.label());
                }
                match item.user_answer_correct {
                    Some(true) => println!("correct"),
                    Some(false) => println!("wrong, it is {}", item.correct_subgroup.label()),
                    None => {}
                }

                let line = read_line("[1-9=select, c=check, n=next, r=retry, q=quit]> ")?;
                match line.trim() {
                    "q" => return Ok(()),
                    "c" => quiz.check().await,
                    "n" => quiz.next().await,
                    "r" => quiz.retry().await,
                    other => match pick_subgroup(other) {
                        Some(subgroup) => quiz.select_subgroup(subgroup).await,
                        None => println!("pick 1-{}", NounSubgroup::ALL.len()),
                    },
                }
            }
        }
    }
}

fn list_cmd(words: &JsonVocabularyStore, container: Option<u32>) {
    for v in words.list() {
        if container.is_some_and(|c| c != v.container_id) {
            continue;
        }
        let fav = if v.is_favorite { "*" } else { "" };
        let ending = if v.ending.is_empty() { "-" } else { v.ending.as_str() };
        println!(
            "{}\t{}\t{}\t{}\t{}\tcontainer={}\t{}",
            v.id,
            v.word,
            v.translation,
            word_group_label(&v.word_group),
            ending,
            v.container_id,
            fav
        );
    }
}

async fn add_cmd(words: &JsonVocabularyStore, a: AddCmd, container: Option<u32>) -> Result<()> {
    let word_group = match (a.noun, a.verb, a.adjective) {
        (Some(n), _, _) => WordGroup::Noun(n.into()),
        (_, Some(v), _) => WordGroup::Verb(v.into()),
        (_, _, true) => WordGroup::Adjective,
        _ => WordGroup::Other,
    };
    let mut vocabulary = Vocabulary::new(0, container.unwrap_or(DEFAULT_CONTAINER), a.word, a.translation)
        .with_word_group(word_group);
    if let Some(g) = a.gender {
        vocabulary = vocabulary.with_gender(g.into());
    }
    if let Some(e) = a.ending {
        vocabulary = vocabulary.with_ending(e.trim());
    }
    let v = words.add_vocabulary(vocabulary).await?;
    println!("{}", v.id);
    Ok(())
}

// ===== Helpers =====
fn right_or_wrong(ok: bool) -> &'static str {
    if ok { "correct" } else { "wrong" }
}

fn split_answer(line: &str) -> (&str, &str) {
    match line.split_once(';') {
        Some((translation, endings)) => (translation.trim(), endings.trim()),
        None => (line.trim(), ""),
    }
}

fn pick_subgroup(line: &str) -> Option<NounSubgroup> {
    let n: usize = line.parse().ok()?;
    NounSubgroup::ALL.get(n.checked_sub(1)?).copied()
}

fn verb_label(v: VerbSubgroup) -> &'static str {
    match v {
        VerbSubgroup::Group1 => "group 1",
        VerbSubgroup::Group2a => "group 2a",
        VerbSubgroup::Group2b => "group 2b",
        VerbSubgroup::Group3 => "group 3",
        VerbSubgroup::Group4Special => "group 4",
        VerbSubgroup::Undefined => "undefined",
    }
}

fn word_group_label(group: &WordGroup) -> String {
    match group {
        WordGroup::Noun(s) => format!("noun {}", s.label()),
        WordGroup::Verb(v) => format!("verb {}", verb_label(*v)),
        WordGroup::Adjective => "adjective".to_string(),
        WordGroup::Other => "-".to_string(),
    }
}

fn grammar_line(info: &GrammarInfo) -> String {
    let mut parts = Vec::new();
    if let Some(g) = info.gender {
        parts.push(g.article().to_string());
    }
    if info.word_group != WordGroup::Other {
        parts.push(word_group_label(&info.word_group));
    }
    if !info.endings.trim().is_empty() {
        parts.push(info.endings.clone());
    }
    parts.join(", ")
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    stdout().flush().ok();
    let mut s = String::new();
    if stdin().read_line(&mut s)? == 0 {
        // EOF behaves like quitting.
        return Ok("q".to_string());
    }
    Ok(s)
}

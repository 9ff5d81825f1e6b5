//! Domain models: exercise categories, languages/directions, and the canonical
//! `ExerciseRecord` that every category file is normalised into at load time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Exercise families served by the engine. The wire id is the snake_case name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
  Vocabulary,
  Prepositions,
  PrepositionContrast,
  Verbs,
  Gustar,
  Future,
  Reflexive,
  Pronouns,
  Comparisons,
  ContextVocab,
}

impl Category {
  pub const ALL: [Category; 10] = [
    Category::Vocabulary,
    Category::Prepositions,
    Category::PrepositionContrast,
    Category::Verbs,
    Category::Gustar,
    Category::Future,
    Category::Reflexive,
    Category::Pronouns,
    Category::Comparisons,
    Category::ContextVocab,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Category::Vocabulary => "vocabulary",
      Category::Prepositions => "prepositions",
      Category::PrepositionContrast => "preposition_contrast",
      Category::Verbs => "verbs",
      Category::Gustar => "gustar",
      Category::Future => "future",
      Category::Reflexive => "reflexive",
      Category::Pronouns => "pronouns",
      Category::Comparisons => "comparisons",
      Category::ContextVocab => "context_vocab",
    }
  }

  /// File name the content producer writes for this category.
  pub fn default_file_name(self) -> &'static str {
    match self {
      Category::Vocabulary => "vocab.json",
      Category::Prepositions => "prepositions.json",
      Category::PrepositionContrast => "preposition_contrast.json",
      Category::Verbs => "verbs.json",
      Category::Gustar => "gustar.json",
      Category::Future => "future.json",
      Category::Reflexive => "reflexive.json",
      Category::Pronouns => "pronouns.json",
      Category::Comparisons => "comparisons.json",
      Category::ContextVocab => "context_vocab.json",
    }
  }

  /// Conjugation prompts are direct questions and carry no blank marker.
  pub fn allows_unmarked_prompt(self) -> bool {
    matches!(self, Category::Verbs)
  }

  /// Only comparisons accept several equally valid answers for one blank.
  pub fn allows_multiple_answers(self) -> bool {
    matches!(self, Category::Comparisons)
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Category {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let needle = s.trim().to_ascii_lowercase();
    // "vocab" is the producer's own key for the vocabulary collection.
    if needle == "vocab" {
      return Ok(Category::Vocabulary);
    }
    Category::ALL
      .iter()
      .copied()
      .find(|c| c.as_str() == needle)
      .ok_or_else(|| s.to_string())
  }
}

/// Languages present in vocabulary entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
  Es,
  En,
  Ru,
}

impl Lang {
  pub const ALL: [Lang; 3] = [Lang::Es, Lang::En, Lang::Ru];

  pub fn code(self) -> &'static str {
    match self {
      Lang::Es => "es",
      Lang::En => "en",
      Lang::Ru => "ru",
    }
  }

  pub fn display_name(self) -> &'static str {
    match self {
      Lang::Es => "Spanish",
      Lang::En => "English",
      Lang::Ru => "Russian",
    }
  }
}

/// Translation direction requested for vocabulary questions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Direction {
  EsEn,
  EsRu,
  EnEs,
  RuEs,
  #[default]
  Mixed,
}

impl Direction {
  /// Fixed (source, target) pair, or `None` for mixed.
  pub fn pair(self) -> Option<(Lang, Lang)> {
    match self {
      Direction::EsEn => Some((Lang::Es, Lang::En)),
      Direction::EsRu => Some((Lang::Es, Lang::Ru)),
      Direction::EnEs => Some((Lang::En, Lang::Es)),
      Direction::RuEs => Some((Lang::Ru, Lang::Es)),
      Direction::Mixed => None,
    }
  }

  /// Lenient parse used at the interface: unknown values mean "mixed".
  pub fn parse_lenient(s: Option<&str>) -> Self {
    match s.map(|v| v.trim().to_ascii_lowercase().replace('_', "-")).as_deref() {
      Some("es-en") => Direction::EsEn,
      Some("es-ru") => Direction::EsRu,
      Some("en-es") => Direction::EnEs,
      Some("ru-es") => Direction::RuEs,
      _ => Direction::Mixed,
    }
  }
}

/// A vocabulary entry: one gloss per language, at least two present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VocabEntry {
  pub es: Option<String>,
  pub en: Option<String>,
  pub ru: Option<String>,
}

impl VocabEntry {
  pub fn gloss(&self, lang: Lang) -> Option<&str> {
    match lang {
      Lang::Es => self.es.as_deref(),
      Lang::En => self.en.as_deref(),
      Lang::Ru => self.ru.as_deref(),
    }
  }

  pub fn available_langs(&self) -> Vec<Lang> {
    Lang::ALL.iter().copied().filter(|l| self.gloss(*l).is_some()).collect()
  }
}

/// One blank of a multi-blank record: its answer and its own option pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlankSpec {
  pub correct: String,
  pub pool: Vec<String>,
}

/// Canonical answer shape, fixed at load time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerSpec {
  /// One blank, one correct string.
  Single { correct: String, pool: Vec<String> },
  /// One blank, several equally acceptable strings.
  AnyOf { correct: Vec<String>, pool: Vec<String> },
  /// One spec per blank, left to right.
  PerBlank(Vec<BlankSpec>),
}

impl AnswerSpec {
  /// Number of blanks this answer shape declares.
  pub fn declared_blanks(&self) -> usize {
    match self {
      AnswerSpec::Single { .. } | AnswerSpec::AnyOf { .. } => 1,
      AnswerSpec::PerBlank(specs) => specs.len(),
    }
  }
}

/// A cloze-style (or direct prompt) record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClozeItem {
  pub prompt: String,
  /// Blank markers found in `prompt`.
  pub blank_count: usize,
  pub answer: AnswerSpec,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordBody {
  Vocab(VocabEntry),
  Cloze(ClozeItem),
}

/// One exercise entry after load-time normalisation. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExerciseRecord {
  pub category: Category,
  pub body: RecordBody,
  pub explanation: String,
  /// Auxiliary glosses as (label, text), e.g. ("EN", "...").
  pub translations: Vec<(String, String)>,
}

//! Vocabulary: translate one term between Spanish, English and Russian.
//!
//! The correct answer is the target-language gloss of the sampled entry.
//! Distractors are the same target-language gloss of other entries, topped up
//! from the target-language glosses of the whole corpus. Options never leave
//! the target language, so a tiny corpus yields fewer options instead.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::{Direction, ExerciseRecord, Lang, RecordBody, VocabEntry};
use crate::error::UnusableRecord;
use crate::question::Question;
use crate::sampling::{pick_distractors, shuffle_into_blank};
use crate::util::fill_template;

const PROMPT_TEMPLATE: &str = "Translate from {source} to {target}:\n   “{word}”";

pub fn build<R: Rng + ?Sized>(
  record: &ExerciseRecord,
  corpus: &[ExerciseRecord],
  direction: Direction,
  option_count: usize,
  rng: &mut R,
) -> Result<Question, UnusableRecord> {
  let entry = vocab_entry(record).ok_or_else(|| UnusableRecord::new("cloze record in vocabulary"))?;
  let (source, target) = resolve_direction(entry, direction, rng)
    .ok_or_else(|| UnusableRecord::new("entry has fewer than two languages"))?;
  let (word, answer) = match (entry.gloss(source), entry.gloss(target)) {
    (Some(w), Some(a)) => (w, a.to_string()),
    _ => return Err(UnusableRecord::new("resolved direction missing a gloss")),
  };

  let siblings = corpus
    .iter()
    .filter(|r| !std::ptr::eq(*r, record))
    .filter_map(vocab_entry)
    .filter_map(|e| e.gloss(target));
  let whole_corpus = corpus
    .iter()
    .filter_map(vocab_entry)
    .filter_map(|e| e.gloss(target));

  let correct = [answer];
  let distractors = pick_distractors(rng, &correct, siblings, whole_corpus, option_count.saturating_sub(1));
  let blank = shuffle_into_blank(rng, &correct, distractors)?;

  let prompt = fill_template(
    PROMPT_TEMPLATE,
    &[("source", source.display_name()), ("target", target.display_name()), ("word", word)],
  );
  Ok(Question::new(prompt, vec![blank], gloss_line(entry))?.with_langs(source, target))
}

/// Resolve a direction for this entry. A fixed direction the entry cannot
/// serve falls back to a random pair it can; `None` only when fewer than two
/// languages are present.
pub fn resolve_direction<R: Rng + ?Sized>(entry: &VocabEntry, direction: Direction, rng: &mut R) -> Option<(Lang, Lang)> {
  let langs = entry.available_langs();
  if langs.len() < 2 {
    return None;
  }
  if let Some((s, t)) = direction.pair() {
    if langs.contains(&s) && langs.contains(&t) {
      return Some((s, t));
    }
  }
  let pairs: Vec<(Lang, Lang)> = langs
    .iter()
    .flat_map(|s| langs.iter().filter(move |t| *t != s).map(move |t| (*s, *t)))
    .collect();
  pairs.choose(rng).copied()
}

fn vocab_entry(record: &ExerciseRecord) -> Option<&VocabEntry> {
  match &record.body {
    RecordBody::Vocab(e) => Some(e),
    RecordBody::Cloze(_) => None,
  }
}

fn gloss_line(entry: &VocabEntry) -> String {
  Lang::ALL
    .iter()
    .filter_map(|l| entry.gloss(*l).map(|g| format!("{}: {}", l.code(), g)))
    .collect::<Vec<_>>()
    .join(" · ")
}

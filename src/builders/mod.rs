//! Question synthesis: one builder per category plus the resampling dispatcher.
//!
//! | Module        | Categories |
//! |---------------|------------|
//! | `vocabulary`  | vocabulary (direction-aware translation) |
//! | `cloze`       | prepositions, verbs, gustar, future, reflexive, pronouns, context_vocab |
//! | `comparisons` | comparisons (single blank, possibly several correct forms) |
//! | `contrast`    | preposition_contrast (one or more blanks) |

pub mod cloze;
pub mod comparisons;
pub mod contrast;
pub mod vocabulary;

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, instrument, warn};

use crate::domain::{Category, Direction, ExerciseRecord};
use crate::error::{QuestionError, UnusableRecord};
use crate::question::Question;
use crate::store::ItemStore;

/// Project one record into a question. `corpus` is the record's own category
/// collection; only vocabulary draws distractors from it.
pub fn synthesize<R: Rng + ?Sized>(
    record: &ExerciseRecord,
    corpus: &[ExerciseRecord],
    direction: Direction,
    option_count: usize,
    rng: &mut R,
) -> Result<Question, UnusableRecord> {
    match record.category {
        Category::Vocabulary => vocabulary::build(record, corpus, direction, option_count, rng),
        Category::PrepositionContrast => contrast::build(record, rng),
        Category::Comparisons => comparisons::build(record, rng),
        Category::Prepositions
        | Category::Verbs
        | Category::Gustar
        | Category::Future
        | Category::Reflexive
        | Category::Pronouns
        | Category::ContextVocab => cloze::build(record, rng),
    }
}

/// Dispatcher over an immutable store. Holds no per-request state.
#[derive(Clone, Debug)]
pub struct Synthesizer {
    store: Arc<ItemStore>,
    option_count: usize,
    max_attempts: usize,
}

impl Synthesizer {
    pub fn new(store: Arc<ItemStore>, option_count: usize, max_attempts: usize) -> Self {
        Self { store, option_count, max_attempts: max_attempts.max(1) }
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    /// Sample records until one yields a valid question, at most `max_attempts` times.
    #[instrument(level = "debug", skip_all, fields(%category, ?direction))]
    pub fn next_question<R: Rng + ?Sized>(
        &self,
        category: Category,
        direction: Direction,
        rng: &mut R,
    ) -> Result<Question, QuestionError> {
        let records = self.store.records(category);
        if records.is_empty() {
            warn!(target: "question", %category, "Category has no records");
            return Err(QuestionError::NoUsableContent { category, attempts: 0 });
        }

        for attempt in 1..=self.max_attempts {
            let Some(record) = records.choose(rng) else { break };
            match synthesize(record, records, direction, self.option_count, rng) {
                Ok(q) => {
                    let shape: Vec<(usize, &[usize])> =
                        q.blanks().iter().map(|b| (b.options().len(), b.correct_indices())).collect();
                    debug!(target: "question", %category, attempt, blanks = ?shape, "Question synthesized");
                    return Ok(q);
                }
                Err(e) => {
                    debug!(target: "question", %category, attempt, reason = %e.reason, "Unusable record; resampling");
                }
            }
        }

        warn!(target: "question", %category, attempts = self.max_attempts, "Resampling bound exhausted");
        Err(QuestionError::NoUsableContent { category, attempts: self.max_attempts })
    }
}

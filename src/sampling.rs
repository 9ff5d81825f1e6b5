//! Distractor sampling shared by every builder.
//!
//! Given the correct answer(s) for one blank, pick distinct distractors:
//!   1. from the primary pool (sibling records' same-slot values, or the
//!      record's own declared pool), in random order;
//!   2. if that is not enough, from a wider fallback pool (the whole corpus),
//!      which may repeat values already seen in the primary pool.
//! A string equal to any correct answer is never selected, and no string is
//! selected twice. The correct answers plus distractors are then shuffled
//! uniformly and the post-shuffle indices recorded on the `Blank`.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::UnusableRecord;
use crate::question::Blank;

/// Pick up to `want` distractors. May return fewer when both pools run dry.
pub fn pick_distractors<'a, R: Rng + ?Sized>(
    rng: &mut R,
    correct: &[String],
    primary: impl IntoIterator<Item = &'a str>,
    fallback: impl IntoIterator<Item = &'a str>,
    want: usize,
) -> Vec<String> {
    let mut taken: HashSet<&str> = correct.iter().map(String::as_str).collect();
    let mut picked: Vec<String> = Vec::with_capacity(want);

    let primary = eligible(primary, &taken);
    draw_from(rng, primary, want, &mut taken, &mut picked);
    if picked.len() < want {
        let fallback = eligible(fallback, &taken);
        draw_from(rng, fallback, want, &mut taken, &mut picked);
    }

    picked
}

fn draw_from<'a, R: Rng + ?Sized>(
    rng: &mut R,
    mut pool: Vec<&'a str>,
    want: usize,
    taken: &mut HashSet<&'a str>,
    picked: &mut Vec<String>,
) {
    pool.shuffle(rng);
    for cand in pool {
        if picked.len() >= want {
            break;
        }
        if taken.insert(cand) {
            picked.push(cand.to_string());
        }
    }
}

/// Distinct candidates not already taken, in first-seen order.
fn eligible<'a>(pool: impl IntoIterator<Item = &'a str>, taken: &HashSet<&str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    pool.into_iter()
        .filter(|c| !c.is_empty() && !taken.contains(c) && seen.insert(*c))
        .collect()
}

/// Shuffle correct answers and distractors into one validated `Blank`.
pub fn shuffle_into_blank<R: Rng + ?Sized>(
    rng: &mut R,
    correct: &[String],
    distractors: Vec<String>,
) -> Result<Blank, UnusableRecord> {
    let mut options: Vec<String> = correct.iter().cloned().chain(distractors).collect();
    options.shuffle(rng);
    Blank::new(options, correct)
}

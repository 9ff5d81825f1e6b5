//! The canonical synthesized question and its invariants.
//!
//! A `Question` can only be built through `Blank::new` / `Question::new`, which
//! reject anything that would show the learner an ambiguous or broken item:
//! duplicate options, an empty or out-of-range answer set, or no blanks at all.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::Lang;
use crate::error::UnusableRecord;

/// One blank: its shuffled options and the indices of the correct ones.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Blank {
    options: Vec<String>,
    correct_indices: Vec<usize>,
}

impl Blank {
    /// Build a blank from final options and the set of correct strings.
    ///
    /// Every correct string must occur exactly once in `options`.
    pub fn new(options: Vec<String>, correct: &[String]) -> Result<Self, UnusableRecord> {
        if options.len() < 2 {
            return Err(UnusableRecord::new(format!("blank has {} option(s), need at least 2", options.len())));
        }
        let mut seen = HashSet::with_capacity(options.len());
        if let Some(dup) = options.iter().find(|o| !seen.insert(o.as_str())) {
            return Err(UnusableRecord::new(format!("duplicate option '{dup}'")));
        }
        if correct.is_empty() {
            return Err(UnusableRecord::new("blank has no correct answer"));
        }

        let mut correct_indices = Vec::with_capacity(correct.len());
        for answer in correct {
            let idx = options
                .iter()
                .position(|o| o == answer)
                .ok_or_else(|| UnusableRecord::new(format!("correct answer '{answer}' missing from options")))?;
            if correct_indices.contains(&idx) {
                return Err(UnusableRecord::new(format!("correct answer '{answer}' listed twice")));
            }
            correct_indices.push(idx);
        }
        if correct_indices.len() == options.len() {
            return Err(UnusableRecord::new("every option is marked correct"));
        }
        correct_indices.sort_unstable();

        Ok(Self { options, correct_indices })
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_indices(&self) -> &[usize] {
        &self.correct_indices
    }
}

/// Source/target languages of a vocabulary question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LangPair {
    pub source: Lang,
    pub target: Lang,
}

/// A synthesized multiple-choice question. Built fresh per request and never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Question {
    prompt: String,
    blanks: Vec<Blank>,
    explanation: String,
    #[serde(skip)]
    langs: Option<LangPair>,
}

impl Question {
    pub fn new(prompt: String, blanks: Vec<Blank>, explanation: String) -> Result<Self, UnusableRecord> {
        if prompt.trim().is_empty() {
            return Err(UnusableRecord::new("empty prompt"));
        }
        if blanks.is_empty() {
            return Err(UnusableRecord::new("question has no blanks"));
        }
        Ok(Self { prompt, blanks, explanation, langs: None })
    }

    pub fn with_langs(mut self, source: Lang, target: Lang) -> Self {
        self.langs = Some(LangPair { source, target });
        self
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn blanks(&self) -> &[Blank] {
        &self.blanks
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn langs(&self) -> Option<LangPair> {
        self.langs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn blank_records_sorted_unique_indices() {
        let b = Blank::new(s(&["tan", "más", "menos", "como"]), &s(&["menos", "más"])).unwrap();
        assert_eq!(b.correct_indices(), &[1, 2]);
        assert_eq!(b.options()[0], "tan");
    }

    #[test]
    fn blank_rejects_duplicates_and_missing_answers() {
        assert!(Blank::new(s(&["a", "en", "a"]), &s(&["a"])).is_err());
        assert!(Blank::new(s(&["a", "en", "de"]), &s(&["por"])).is_err());
        assert!(Blank::new(s(&["a", "en", "de"]), &[]).is_err());
        assert!(Blank::new(s(&["a", "en", "de"]), &s(&["a", "a"])).is_err());
        assert!(Blank::new(s(&["a"]), &s(&["a"])).is_err());
        assert!(Blank::new(s(&["a", "en"]), &s(&["a", "en"])).is_err());
    }

    #[test]
    fn question_requires_prompt_and_blanks() {
        let blank = Blank::new(s(&["a", "en", "de"]), &s(&["a"])).unwrap();
        assert!(Question::new("  ".into(), vec![blank.clone()], String::new()).is_err());
        assert!(Question::new("Voy ___ Madrid.".into(), vec![], String::new()).is_err());
        let q = Question::new("Voy ___ Madrid.".into(), vec![blank], String::new()).unwrap();
        assert_eq!(q.blanks().len(), 1);
        assert!(q.langs().is_none());
    }
}

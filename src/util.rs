//! Small utility helpers used across modules.

/// Minimum run of underscores that counts as a blank marker.
pub const BLANK_MIN_RUN: usize = 3;

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// Count blank markers in a sentence.
/// Each maximal run of `BLANK_MIN_RUN` or more underscores is one blank,
/// so "___" and "____" both count once and "__" never counts.
pub fn count_blanks(sentence: &str) -> usize {
  let mut count = 0;
  let mut run = 0;
  for ch in sentence.chars() {
    if ch == '_' {
      run += 1;
    } else {
      if run >= BLANK_MIN_RUN { count += 1; }
      run = 0;
    }
  }
  if run >= BLANK_MIN_RUN { count += 1; }
  count
}

/// Trim and drop empty strings.
pub fn non_empty(s: Option<&str>) -> Option<String> {
  s.map(str::trim).filter(|t| !t.is_empty()).map(str::to_string)
}

/// Log-safe truncation for large strings (char-boundary aware).
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.chars().count() <= max {
    s.to_string()
  } else {
    let head: String = s.chars().take(max).collect();
    format!("{}… ({} bytes total)", head, s.len())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn counts_underscore_runs_as_blanks() {
    assert_eq!(count_blanks("Voy ___ Madrid mañana."), 1);
    assert_eq!(count_blanks("Trabajo ____ la escuela ____ dos horas."), 2);
    assert_eq!(count_blanks("____ al final ____"), 2);
    assert_eq!(count_blanks("snake__case has no blank"), 0);
    assert_eq!(count_blanks("Conjuga 'pensar' para 'yo' en presente."), 0);
  }

  #[test]
  fn template_and_truncation() {
    assert_eq!(fill_template("from {a} to {b}", &[("a", "Spanish"), ("b", "English")]), "from Spanish to English");
    assert_eq!(trunc_for_log("собака", 10), "собака");
    assert!(trunc_for_log("собака", 2).starts_with("со…"));
    assert_eq!(non_empty(Some("  ")), None);
    assert_eq!(non_empty(Some(" perro ")), Some("perro".into()));
  }
}

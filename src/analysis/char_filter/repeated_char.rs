use super::CharFilter;

/// A char filter that collapses runs of the same character.
///
/// Informal reviews stretch words for emphasis ("borosss", "mantappp"). Any
/// run of at least `min_run` identical characters is replaced by a single
/// occurrence; shorter runs such as the double letters of regular words are
/// left alone.
#[derive(Clone, Debug)]
pub struct RepeatedCharFilter {
    min_run: usize,
}

impl RepeatedCharFilter {
    /// Create a filter collapsing runs of three or more characters.
    pub fn new() -> Self {
        Self::with_min_run(3)
    }

    /// Create a filter collapsing runs of at least `min_run` characters.
    ///
    /// Values below 2 are raised to 2.
    pub fn with_min_run(min_run: usize) -> Self {
        RepeatedCharFilter {
            min_run: min_run.max(2),
        }
    }

    fn flush(&self, output: &mut String, ch: char, run: usize) {
        let count = if run >= self.min_run { 1 } else { run };
        output.extend(std::iter::repeat_n(ch, count));
    }
}

impl Default for RepeatedCharFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl CharFilter for RepeatedCharFilter {
    fn filter(&self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        let mut current: Option<(char, usize)> = None;

        for ch in input.chars() {
            current = match current {
                Some((prev, run)) if prev == ch => Some((prev, run + 1)),
                Some((prev, run)) => {
                    self.flush(&mut output, prev, run);
                    Some((ch, 1))
                }
                None => Some((ch, 1)),
            };
        }

        if let Some((prev, run)) = current {
            self.flush(&mut output, prev, run);
        }

        output
    }

    fn name(&self) -> &'static str {
        "repeated_char"
    }
}

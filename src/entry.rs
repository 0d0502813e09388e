use itertools::Itertools;
use std::cmp::Ordering;
use unicode_normalization::{
    UnicodeNormalization,
    char::is_combining_mark,
};

/// Largest weight a `name:weight` line may carry.
pub const MAX_WEIGHT: u32 = 100;

/// Weight given to lines without a usable `:weight` suffix.
pub const DEFAULT_WEIGHT: u32 = 1;

/// One candidate on the wheel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub weight: u32,
    /// The source line exactly as typed, so edits survive a re-parse.
    pub raw_input: String,
}

impl Entry {
    pub fn new(name: impl Into<String>, weight: u32) -> Self {
        let name = name.into();
        Self {
            raw_input: name.clone(),
            name,
            weight,
        }
    }

    /// Builds an entry from one line of editor text.
    pub fn parse_line(line: &str, ratio_mode: bool) -> Self {
        if !ratio_mode {
            return Self {
                name: line.trim().to_owned(),
                weight: DEFAULT_WEIGHT,
                raw_input: line.to_owned(),
            };
        }
        let (name, weight) = match line.split_once(':') {
            Some((name, ratio)) => {
                let weight = match leading_number(ratio) {
                    Some(w) if w <= MAX_WEIGHT => w,
                    _ => {
                        tracing::debug!(line, "unusable ratio, falling back to default weight");
                        DEFAULT_WEIGHT
                    }
                };
                (name.trim(), weight)
            }
            None => (line.trim(), DEFAULT_WEIGHT),
        };
        Self {
            name: name.to_owned(),
            weight,
            raw_input: line.to_owned(),
        }
    }

    /// Only entries with a name and a positive weight take part in a spin.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && self.weight > 0
    }
}

/// The ordered entries currently configured, valid or not.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntrySet {
    entries: Vec<Entry>,
}

impl EntrySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits `raw_text` on newlines and parses every line, blank ones included.
    pub fn parse(raw_text: &str, ratio_mode: bool) -> Self {
        let entries = raw_text
            .split('\n')
            .map(|line| Entry::parse_line(line, ratio_mode))
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn valid_entries(&self) -> Vec<Entry> {
        self.entries.iter().filter(|e| e.is_valid()).cloned().collect()
    }

    pub fn valid_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_valid()).count()
    }

    /// Sum of the weights of valid entries.
    pub fn total_weight(&self) -> u32 {
        self.entries
            .iter()
            .filter(|e| e.is_valid())
            .map(|e| e.weight)
            .sum()
    }

    /// Joins the raw lines back together; `parse` followed by `to_text` is lossless.
    pub fn to_text(&self) -> String {
        self.entries.iter().map(|e| e.raw_input.as_str()).join("\n")
    }

    pub(crate) fn push(&mut self, entry: Entry) {
        // an empty editor parses to a single blank line; replace it
        if self.entries.len() == 1 && self.entries[0].raw_input.trim().is_empty() {
            self.entries.clear();
        }
        self.entries.push(entry);
    }

    pub(crate) fn remove(&mut self, index: usize) -> Option<Entry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Entry] {
        &mut self.entries
    }

    pub(crate) fn sort_by_name(&mut self) {
        self.entries.sort_by(|a, b| compare_names(&a.name, &b.name));
    }
}

impl FromIterator<Entry> for EntrySet {
    fn from_iter<T: IntoIterator<Item = Entry>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Reads the run of digits at the start of `text`, so `20%` and `30.5`
/// give 20 and 30. `None` when there are no leading digits.
fn leading_number(text: &str) -> Option<u32> {
    let text = text.trim();
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text[..end].parse().ok()
}

/// Base letters with accents stripped, lowercased.
fn base_letters(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Lowercased with accents kept as separate marks.
fn accented_letters(name: &str) -> String {
    name.nfd().flat_map(char::to_lowercase).collect()
}

/// Dictionary order: base letters first, so `éclair` sits among the `e`s.
/// Ties break on accents (plain before accented), then on case with the
/// lowercase spelling ahead.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| accented_letters(a).cmp(&accented_letters(b)))
        .then_with(|| b.cmp(a))
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn parse__plain_mode_gives_every_line_weight_one() {
        // given
        let text = "Apple\n  Banana  \nCherry";

        // when
        let set = EntrySet::parse(text, false);

        // then
        let names: Vec<_> = set.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Apple", "Banana", "Cherry"]);
        assert!(set.entries().iter().all(|e| e.weight == 1));
    }

    #[test]
    fn parse__keeps_blank_lines_as_invalid_entries() {
        let set = EntrySet::parse("A\n\n  \nB", false);

        assert_eq!(set.len(), 4);
        assert_eq!(set.valid_count(), 2);
        assert!(!set.entries()[1].is_valid());
        assert!(!set.entries()[2].is_valid());
    }

    #[test]
    fn parse__ratio_mode_reads_weight_after_first_colon() {
        let set = EntrySet::parse("Apple:20\nBanana : 80", true);

        let expected = vec![("Apple", 20), ("Banana", 80)];
        let actual: Vec<_> = set
            .entries()
            .iter()
            .map(|e| (e.name.as_str(), e.weight))
            .collect();
        assert_eq!(expected, actual);
    }

    #[test]
    fn parse__ratio_mode_defaults_unparseable_or_out_of_range_weight_to_one() {
        let set = EntrySet::parse("Foo:abc\nBar:101\nBaz:-3\nQux", true);

        assert!(set.entries().iter().all(|e| e.weight == DEFAULT_WEIGHT));
        assert_eq!(set.valid_count(), 4);
    }

    #[test]
    fn parse__ratio_mode_zero_weight_is_kept_but_not_valid() {
        let set = EntrySet::parse("Foo:0\nBar:100", true);

        assert_eq!(set.len(), 2);
        assert_eq!(set.entries()[0].weight, 0);
        assert_eq!(set.valid_entries(), vec![set.entries()[1].clone()]);
    }

    #[test]
    fn parse__ratio_mode_nested_colon_is_not_a_weight() {
        let set = EntrySet::parse("a:b:30", true);

        assert_eq!(set.entries()[0].name, "a");
        assert_eq!(set.entries()[0].weight, DEFAULT_WEIGHT);
    }

    #[test]
    fn to_text__round_trips_raw_input_including_invalid_ratio() {
        let text = "  Apple:20\nFoo:abc\n\nBanana:80  ";

        let set = EntrySet::parse(text, true);

        assert_eq!(set.to_text(), text);
        assert_eq!(set.entries()[1].raw_input, "Foo:abc");
        assert_eq!(set.entries()[1].weight, 1);
    }

    #[test]
    fn total_weight__ignores_invalid_entries() {
        let set = EntrySet::parse("A:40\n:30\nB:0\nC:59", true);

        assert_eq!(set.total_weight(), 99);
    }

    #[test]
    fn compare_names__is_case_insensitive_with_lowercase_first() {
        let mut names = vec!["banana", "Apple", "apple", "Cherry"];

        names.sort_by(|a, b| compare_names(a, b));

        assert_eq!(names, vec!["apple", "Apple", "banana", "Cherry"]);
    }

    #[test]
    fn compare_names__sorts_accented_names_by_base_letter() {
        let mut names = vec!["fig", "éclair", "apple", "Émile", "emile", "eclair"];

        names.sort_by(|a, b| compare_names(a, b));

        assert_eq!(
            names,
            vec!["apple", "eclair", "éclair", "emile", "Émile", "fig"]
        );
    }

    #[test]
    fn parse__ratio_mode_reads_leading_digits_of_weight() {
        // given
        let text = "Apple:20%\nBanana: 50 %\nCherry:30.5";

        // when
        let set = EntrySet::parse(text, true);

        // then
        let weights: Vec<_> = set
            .entries()
            .iter()
            .map(|e| (e.name.as_str(), e.weight))
            .collect();
        assert_eq!(weights, vec![("Apple", 20), ("Banana", 50), ("Cherry", 30)]);
        assert_eq!(set.total_weight(), 100);
        assert_eq!(set.entries()[0].raw_input, "Apple:20%");
        assert_eq!(set.to_text(), text);
    }
}

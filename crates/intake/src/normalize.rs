use std::fmt;
use unicode_segmentation::UnicodeSegmentation;

/// Lowercased, punctuation-free view of free text used for keyword rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedText {
    text: String,
    words: Vec<String>,
}

/// Normalize free text for matching.
///
/// Words are found on Unicode word boundaries and lowercased. Apostrophes and
/// digit-group commas are dropped inside a word (`won't` → `wont`,
/// `35,000` → `35000`); any other punctuation splits the word.
#[must_use]
pub fn normalize(text: &str) -> NormalizedText {
    let mut words = Vec::new();
    for raw in text.unicode_words() {
        let mut current = String::with_capacity(raw.len());
        for ch in raw.chars() {
            if ch.is_alphanumeric() {
                current.extend(ch.to_lowercase().filter(|c| c.is_alphanumeric()));
            } else if is_joiner(ch) {
                continue;
            } else if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            words.push(current);
        }
    }
    NormalizedText {
        text: words.join(" "),
        words,
    }
}

const fn is_joiner(ch: char) -> bool {
    matches!(ch, '\'' | '\u{2019}' | '\u{2018}' | ',')
}

impl NormalizedText {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Character count of the normalized text (spaces included)
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Does the text contain `term`?
    ///
    /// A term is one or more words that must appear consecutively. A trailing
    /// `*` turns the last word into a prefix (`evict*` matches `eviction`);
    /// otherwise words match whole (`rent` does not match `parent`).
    #[must_use]
    pub fn contains_term(&self, term: &str) -> bool {
        self.find_term(term).is_some()
    }

    /// First occurrence of `term`, as the words found in the text
    /// (`evict*` in "we were evicted" yields `"evicted"`)
    #[must_use]
    pub fn find_term(&self, term: &str) -> Option<String> {
        let trimmed = term.trim();
        let (body, stem) = match trimmed.strip_suffix('*') {
            Some(body) => (body, true),
            None => (trimmed, false),
        };
        let needle = normalize(body);
        let needle = needle.words();
        let (last, leading) = needle.split_last()?;
        if needle.len() > self.words.len() {
            return None;
        }

        let split = leading.len();
        self.words
            .windows(needle.len())
            .find(|window| {
                let (window_leading, window_last) = (&window[..split], &window[split]);
                window_leading == leading
                    && if stem {
                        window_last.starts_with(last.as_str())
                    } else {
                        window_last == last
                    }
            })
            .map(|window| window.join(" "))
    }

    /// "Contains any of" predicate over a keyword set
    #[must_use]
    pub fn contains_any<T: AsRef<str>>(&self, terms: &[T]) -> bool {
        terms.iter().any(|t| self.contains_term(t.as_ref()))
    }

    /// Terms from `terms` that occur in the text, in the given order
    #[must_use]
    pub fn matching_terms<'a, T: AsRef<str>>(&self, terms: &'a [T]) -> Vec<&'a str> {
        terms
            .iter()
            .map(AsRef::as_ref)
            .filter(|t| self.contains_term(t))
            .collect()
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

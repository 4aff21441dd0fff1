//! Taxon name normalization.

/// A whitespace-normalized taxon name split into words.
///
/// `"  Homo   sapiens "` becomes `["Homo", "sapiens"]`. An empty or blank
/// input yields no words.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaxonName {
    words: Vec<String>,
}

impl TaxonName {
    pub fn parse(raw: &str) -> Self {
        Self {
            words: raw.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words joined by single spaces.
    pub fn normalized(&self) -> String {
        self.words.join(" ")
    }

    /// First word with an upper-case initial and lower-case rest.
    pub fn genus(&self) -> String {
        self.words.first().map(|w| capitalize(w)).unwrap_or_default()
    }

    /// Words 2 and 3 (when present) joined and lower-cased.
    ///
    /// `"Cassida viridis ssp"` gives `"viridis ssp"`; a single word gives `""`.
    pub fn combined_epithet(&self) -> String {
        self.words
            .iter()
            .skip(1)
            .take(2)
            .map(|w| w.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

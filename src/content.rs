//! Label content derived from input records.
//!
//! The etiquette sheet prints one word of the taxon per label, so a record
//! may expand into more than one [`ContentSpec`]. The unit-tray sheet prints
//! the whole name on one label ([`TraySpec`]).

use crate::log;
use crate::records::TaxonRecord;
use crate::taxon::TaxonName;

/// Text styling flags of a label's primary text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Emphasis {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Emphasis {
    /// Bold, optionally underlined: the only two styles the etiquette sheet uses.
    pub fn bold(underline: bool) -> Self {
        Self {
            bold: true,
            italic: false,
            underline,
        }
    }
}

/// Render-ready content of exactly one etiquette label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSpec {
    pub text: String,
    pub emphasis: Emphasis,
    /// Author/year printed in the lower right corner; empty when absent.
    pub secondary_text: String,
    pub region_code: String,
}

/// How a name with a given number of words becomes labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRule {
    /// `Genus species`: the species epithet, underlined, with author.
    Binomial,
    /// `Genus species subspecies`: the species epithet underlined without
    /// author, then the subspecies epithet plain with author.
    Trinomial,
    /// Anything else: the whole normalized name, plain, with author.
    Verbatim,
}

impl NameRule {
    pub fn for_word_count(count: usize) -> Self {
        match count {
            2 => NameRule::Binomial,
            3 => NameRule::Trinomial,
            _ => NameRule::Verbatim,
        }
    }

    /// Expand one name into its labels.
    fn apply(self, name: &TaxonName, region: &str, author: &str) -> Vec<ContentSpec> {
        let spec = |text: &str, underline: bool, secondary: &str| ContentSpec {
            text: text.to_string(),
            emphasis: Emphasis::bold(underline),
            secondary_text: secondary.to_string(),
            region_code: region.to_string(),
        };
        let words = name.words();
        match self {
            NameRule::Binomial => vec![spec(&words[1], true, author)],
            NameRule::Trinomial => vec![spec(&words[1], true, ""), spec(&words[2], false, author)],
            NameRule::Verbatim => vec![spec(&name.normalized(), false, author)],
        }
    }
}

/// Specs for one record, in print order.
pub fn specs_for_record<R: TaxonRecord + ?Sized>(record: &R) -> Vec<ContentSpec> {
    let name = TaxonName::parse(record.name());
    NameRule::for_word_count(name.word_count()).apply(
        &name,
        record.region().trim(),
        record.author().trim(),
    )
}

/// Specs for all records, preserving input order.
///
/// Records with an empty name still yield a spec with empty text.
pub fn build_label_specs<R: TaxonRecord>(records: &[R]) -> Vec<ContentSpec> {
    let specs: Vec<ContentSpec> = records.iter().flat_map(specs_for_record).collect();
    log::info!(records = records.len(), labels = specs.len(), "built label specs");
    specs
}

/// Content of one unit-tray label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraySpec {
    pub genus: String,
    /// Lower-cased species (and subspecies) epithet.
    pub epithet: String,
    pub author: String,
    /// Upper-cased region code.
    pub region: String,
}

impl TraySpec {
    /// `None` when the record has no name.
    pub fn from_record<R: TaxonRecord + ?Sized>(record: &R) -> Option<Self> {
        let name = TaxonName::parse(record.name());
        if name.is_empty() {
            return None;
        }
        Some(Self {
            genus: name.genus(),
            epithet: name.combined_epithet(),
            author: record.author().trim().to_string(),
            region: record.region().trim().to_uppercase(),
        })
    }
}

/// Tray specs for all records; nameless records are skipped.
pub fn build_tray_specs<R: TaxonRecord>(records: &[R]) -> Vec<TraySpec> {
    let mut specs = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();
    for (row, record) in records.iter().enumerate() {
        match TraySpec::from_record(record) {
            Some(spec) => specs.push(spec),
            None => skipped.push(row),
        }
    }
    if !skipped.is_empty() {
        log::warn!(rows = ?skipped, "skipping rows without a taxon entry");
    }
    log::info!(labels = specs.len(), "built tray specs");
    specs
}

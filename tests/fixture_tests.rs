//! Renders every CSV under `tests/fixtures` to an in-memory PDF and checks
//! the document structure against the labels the pipeline planned.
//!
//! Fixtures whose name starts with `tray_` use the unit-tray template; all
//! others use the etiquette template.

use datatest_stable::Utf8Path;
use regex_lite::Regex;
use taxalabel::render::GridLayout;
use taxalabel::{Label, LabelConfig, PdfSurface, build_labels, generate, read_csv_for};

fn config_for(path: &Utf8Path) -> LabelConfig {
    let is_tray = path.file_name().is_some_and(|name| name.starts_with("tray_"));
    if is_tray {
        LabelConfig::tray()
    } else {
        LabelConfig::etiquette()
    }
}

/// Text runs a label draws: non-empty lines only.
fn text_runs(label: &Label) -> usize {
    let lines: Vec<&str> = match label {
        Label::Etiquette(l) => vec![&l.content.text, &l.content.secondary_text],
        Label::Tray(l) => vec![&l.content.genus, &l.content.epithet, &l.content.author],
    }
    .into_iter()
    .map(String::as_str)
    .collect();
    lines.iter().filter(|s| !s.is_empty()).count()
}

fn count(pattern: &str, haystack: &str) -> usize {
    Regex::new(pattern)
        .expect("valid pattern")
        .find_iter(haystack)
        .count()
}

fn render_fixture(path: &Utf8Path) -> datatest_stable::Result<()> {
    let config = config_for(path);
    let records = read_csv_for(path.as_std_path(), config.variant)?;
    let labels = build_labels(&records, &config);
    let expected_pages = GridLayout::new(config.grid()).page_count(labels.len());
    let expected_runs: usize = labels.iter().map(text_runs).sum();

    let mut surface = PdfSurface::in_memory(config.grid().page_size());
    let summary = generate(&records, &config, &mut surface)?;
    assert_eq!(summary.labels, labels.len(), "{path}: label count");
    assert_eq!(summary.pages, expected_pages, "{path}: planned pages");

    let bytes = surface.into_bytes().expect("finalized surface has bytes");
    assert!(bytes.starts_with(b"%PDF-"), "{path}: missing PDF header");

    let pdf = String::from_utf8_lossy(&bytes);
    assert_eq!(count(r"/Type\s*/Page\b", &pdf), expected_pages, "{path}: page objects");
    assert_eq!(count(r"\bTj\b", &pdf), expected_runs, "{path}: text runs");
    assert!(pdf.contains("/WinAnsiEncoding"), "{path}: font encoding");
    Ok(())
}

datatest_stable::harness! {
    { test = render_fixture, root = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"), pattern = r"\.csv$" },
}

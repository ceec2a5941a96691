//! BibTeX loader integration tests

use pubpage_bibtex::{decode_latex, parse};
use rstest::rstest;

const FIXTURE: &str = include_str!("fixtures/biblatex_export.bib");

#[test]
fn test_parse_biblatex_export() {
    let records = parse(FIXTURE).unwrap();
    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert_eq!(first.cite_key, "Li2023");
    assert_eq!(first.entry_type, "article");
    assert_eq!(first.get("date"), Some("2023-05-01"));
    assert_eq!(first.get("title"), Some("{FDTD} Modeling of Lightning {ELVES}"));
    assert_eq!(first.get("DOI"), Some("10.1029/2022JD037919"));

    let second = &records[1];
    assert_eq!(second.cite_key, "Smith2021");
    assert_eq!(second.get("year"), Some("2021"));
    assert_eq!(second.get("journaltitle"), Some("Physical Review Letters"));
    assert_eq!(second.get("pages"), None);
}

#[test]
fn test_records_keep_source_order() {
    let input = r#"
@article{C, title = {Third}}
@article{A, title = {First}}
@article{B, title = {Second}}
"#;
    let keys: Vec<_> = parse(input)
        .unwrap()
        .into_iter()
        .map(|r| r.cite_key)
        .collect();
    assert_eq!(keys, ["C", "A", "B"]);
}

#[rstest]
#[case::unclosed_brace("@article{Key, title = {Open}", 1)]
#[case::missing_equals("\n@article{Key, title {Value}}", 2)]
#[case::no_entry_type("@{Key, title = {Value}}", 1)]
#[case::bad_second_entry("@misc{Ok}\n\n\n@book{Broken, title = \"unterminated}", 4)]
fn test_malformed_source_reports_line(#[case] input: &str, #[case] line: u32) {
    let err = parse(input).unwrap_err();
    assert_eq!(err.line, line);
    assert_eq!(err.column, 1);
}

#[test]
fn test_decoded_author_from_fixture() {
    let records = parse(FIXTURE).unwrap();
    let author = records[1].get("author").unwrap();
    assert_eq!(decode_latex(author), "John Smith and Müller, Hans");
}

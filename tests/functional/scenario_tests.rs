//! End-to-end comparison scenarios through the library API

use confdiff::annotate::{annotate, DEFAULT_DESCRIPTION_COLUMN};
use confdiff::pipeline::{MemorySource, TableSource};
use confdiff::render::{derive_label, render};
use confdiff::{align::align, diff::diff, Comparator, CompareOptions, TableLoader};

const TABLE_A: &str = "Id,Name,Description\n1,Alice,first user\n2,Bob,second user\n";
const TABLE_B: &str = "Id,Name,Description\n1,Alice,first user\n3,Carl,third user\n";

#[test]
fn test_added_and_removed_rows() {
    let loader = TableLoader::new(0);
    let a = loader.load_bytes(TABLE_A.as_bytes(), "PROD.csv").unwrap();
    let b = loader.load_bytes(TABLE_B.as_bytes(), "QA.csv").unwrap();
    let requested = vec!["Name".to_string()];
    let report = render(&diff(&align(&a, &b, Some(&requested))), "PROD", "QA");

    assert_eq!(report.len(), 2);
    assert_eq!(report.cell("2", "Name"), Some("PROD: Bob / "));
    assert_eq!(report.cell("3", "Name"), Some(" / QA: Carl"));
    assert!(report.row("1").is_none());
}

#[test]
fn test_column_projection_tolerates_missing_column() {
    let loader = TableLoader::new(0);
    let a = loader
        .load_bytes(b"Id,Name,Status\n1,Alice,on\n2,Bob,off\n", "PROD.csv")
        .unwrap();
    let b = loader.load_bytes(b"Id,Name\n1,Alice\n2,Bob\n", "QA.csv").unwrap();
    let requested = vec!["Name".to_string()];
    let report = render(&diff(&align(&a, &b, Some(&requested))), "PROD", "QA");

    assert_eq!(report.columns, vec!["Name".to_string()]);
    assert!(report.is_empty());
}

#[test]
fn test_requested_column_absent_on_one_side() {
    let loader = TableLoader::new(0);
    let a = loader.load_bytes(b"Id,Name,Status\n1,Alice,on\n", "PROD.csv").unwrap();
    let b = loader.load_bytes(b"Id,Name\n1,Alice\n", "QA.csv").unwrap();
    let requested = vec!["Name".to_string(), "Status".to_string()];
    let report = render(&diff(&align(&a, &b, Some(&requested))), "PROD", "QA");

    assert_eq!(report.cell("1", "Status"), Some("PROD: on / "));
    assert_eq!(report.cell("1", "Name"), Some(""));
}

#[test]
fn test_description_annotation() {
    let loader = TableLoader::new(0);
    let a = loader.load_bytes(TABLE_A.as_bytes(), "PROD.csv").unwrap();
    let b = loader.load_bytes(TABLE_B.as_bytes(), "QA.csv").unwrap();
    let report = render(&diff(&align(&a, &b, None)), "PROD", "QA");
    let descriptions = annotate(&report, &a, DEFAULT_DESCRIPTION_COLUMN);

    assert_eq!(descriptions.get("2"), Some("second user"));
    assert_eq!(descriptions.get("1"), None);
    assert_eq!(descriptions.get("3"), None);
}

#[test]
fn test_labels_from_file_names() {
    assert_eq!(derive_label("Export-prod-2024.csv"), "PROD");
    assert_eq!(derive_label("export-Qa.csv"), "QA");
    assert_eq!(derive_label("export.csv"), "UNKNOWN");

    let a = MemorySource::new("settings_prod.csv", TABLE_A);
    let b = MemorySource::new("settings_uat.csv", TABLE_B);
    assert_eq!(a.identifier(), "settings_prod.csv");
    let outcome = Comparator::new(TableLoader::new(0), CompareOptions::default())
        .compare(&a, &b)
        .unwrap();
    assert_eq!(outcome.first_label, "PROD");
    assert_eq!(outcome.second_label, "UNKNOWN");
    assert_eq!(outcome.report.cell("3", "Name"), Some(" / UNKNOWN: Carl"));
}

#[test]
fn test_report_order_follows_alignment() {
    let loader = TableLoader::new(0);
    let a = loader.load_bytes(b"Id,V\n30,a\n10,b\n20,c\n", "PROD.csv").unwrap();
    let b = loader.load_bytes(b"Id,V\n5,z\n20,x\n10,y\n", "QA.csv").unwrap();
    let report = render(&diff(&align(&a, &b, None)), "PROD", "QA");

    assert_eq!(report.keys().collect::<Vec<_>>(), vec!["30", "10", "20", "5"]);
}

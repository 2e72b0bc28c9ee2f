use std::fs;
use std::path::PathBuf;

use morele_ingest::{ReadOptions, read_csv_table};
use tempfile::TempDir;

fn write_export(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn reads_vendor_export_in_column_order() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_export(
        &dir,
        "oferty.csv",
        "ID oferty,Cena PL,Marka\nA1,10,X\nA2,20,Y\n",
    );

    let (df, headers) = read_csv_table(&path, &ReadOptions::default()).expect("read csv");

    assert_eq!(headers.columns, vec!["ID oferty", "Cena PL", "Marka"]);
    let names: Vec<&str> = df.get_column_names().into_iter().map(|n| n.as_str()).collect();
    assert_eq!(names, vec!["ID oferty", "Cena PL", "Marka"]);
    assert_eq!(df.height(), 2);
    let brand = df.column("Marka").unwrap().str().unwrap();
    assert_eq!(brand.get(1), Some("Y"));
}

#[test]
fn quoted_fields_keep_separators_and_newlines() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_export(
        &dir,
        "opisy.csv",
        "ID oferty,Opis\nA1,\"Kabel, 2 m\"\nA2,\"Linia 1\nLinia 2\"\n",
    );

    let (df, _) = read_csv_table(&path, &ReadOptions::default()).expect("read csv");

    assert_eq!(df.height(), 2);
    let description = df.column("Opis").unwrap().str().unwrap();
    assert_eq!(description.get(0), Some("Kabel, 2 m"));
    assert_eq!(description.get(1), Some("Linia 1\nLinia 2"));
}

#[test]
fn duplicate_headers_stay_addressable() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_export(&dir, "dup.csv", "Marka,Marka,\nX,Y,Z\n");

    let (df, headers) = read_csv_table(&path, &ReadOptions::default()).expect("read csv");

    assert_eq!(headers.columns, vec!["Marka", "Marka.1", "column_3"]);
    assert_eq!(headers.raw, vec!["Marka", "Marka", ""]);
    let second = df.column("Marka.1").unwrap().str().unwrap();
    assert_eq!(second.get(0), Some("Y"));
}

#[test]
fn internal_header_spacing_is_preserved() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_export(&dir, "spacing.csv", " ID  oferty ,Cena PL\nA1,10\nA2,20\n");

    let (df, headers) = read_csv_table(&path, &ReadOptions::default()).expect("read csv");

    assert_eq!(headers.columns, vec!["ID  oferty", "Cena PL"]);
    assert!(headers.renamed().is_empty());
    let ids = df.column("ID  oferty").unwrap().str().unwrap();
    assert_eq!(ids.get(1), Some("A2"));
}

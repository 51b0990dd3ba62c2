mod common;

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use common::{FIXTURE_CATALOG, listed_ids};
use predicates::prelude::*;
use std::process::Command;

fn search(args: &[&str]) -> Vec<u32> {
    let output = Command::new(cargo_bin!("realty"))
        .args(["search", "--catalog", FIXTURE_CATALOG])
        .args(args)
        .output()
        .expect("Failed to execute command");
    assert!(
        output.status.success(),
        "search failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    listed_ids(&output.stdout)
}

#[test]
fn test_price_bracket_with_ascending_price() {
    // 500000 sits in the lower bracket; 1000000 closes the middle one.
    assert_eq!(search(&["--price", "500k-1m", "--sort", "price-asc"]), vec![2, 1, 5, 7]);
}

#[test]
fn test_top_bedroom_bucket() {
    assert_eq!(search(&["--bedrooms", "4", "--sort", "price-desc"]), vec![3, 5]);
}

#[test]
fn test_default_area_range_hides_small_units() {
    assert!(search(&["--type", "studio"]).is_empty());
    assert_eq!(search(&["--type", "studio", "--any-area"]), vec![4]);
}

#[test]
fn test_featured_first_keeps_catalog_order() {
    assert_eq!(search(&[]), vec![1, 3, 7, 2, 5, 6, 8]);
}

#[test]
fn test_area_bounds_and_amenities() {
    assert_eq!(search(&["--min-area", "200"]), vec![5]);
    assert_eq!(search(&["--pool", "--sort", "area-desc"]), vec![5, 3, 2]);
    assert_eq!(search(&["--furnished", "--balcony", "--location", "centro"]), vec![7]);
}

#[test]
fn test_newest_first() {
    assert_eq!(
        search(&["--location", "jardins", "--any-area", "--sort", "newest"]),
        vec![5, 4]
    );
}

#[test]
fn test_unknown_sort_key_falls_back_to_featured() {
    assert_eq!(search(&["--sort", "random"]), search(&["--sort", "featured"]));
}

#[test]
fn test_inverted_area_range_is_rejected() {
    let mut cmd = Command::new(cargo_bin!("realty"));
    cmd.args(["search", "--min-area", "300", "--max-area", "100"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("greater than maximum area"));
}

#[test]
fn test_unknown_price_bracket_is_rejected() {
    let mut cmd = Command::new(cargo_bin!("realty"));
    cmd.args(["search", "--price", "2000000+"]);
    cmd.assert().failure();
}

#[test]
fn test_malformed_catalog_rows_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.csv");
    common::write_catalog(
        &path,
        &[
            [
                "1", "Casa Boa", "400000", "centro", "casa", "2", "1", "90", "true", "false",
                "false", "false", "false", "2025-01-10",
            ],
            [
                "2", "Castelo", "400000", "centro", "castelo", "2", "1", "90", "true", "false",
                "false", "false", "false", "2025-01-10",
            ],
            [
                "3", "Casa Sem Preço", "", "centro", "casa", "2", "1", "90", "true", "false",
                "false", "false", "false", "2025-01-10",
            ],
            [
                "4", "Apartamento Bom", "300000", "centro", "apartamento", "1", "1", "60",
                "false", "false", "false", "false", "true", "2025-02-10",
            ],
        ],
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("realty"));
    cmd.args(["search", "--catalog"]).arg(&path);

    let assert = cmd
        .assert()
        .success()
        .stderr(predicate::str::contains("Error reading property"));
    assert_eq!(listed_ids(&assert.get_output().stdout), vec![4, 1]);
}

#[test]
fn test_duplicate_ids_in_catalog_fail() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.csv");
    let row = [
        "1", "Casa", "400000", "centro", "casa", "2", "1", "90", "true", "false", "false",
        "false", "false", "2025-01-10",
    ];
    common::write_catalog(&path, &[row, row]).unwrap();

    let mut cmd = Command::new(cargo_bin!("realty"));
    cmd.args(["search", "--catalog"]).arg(&path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate property id 1"));
}

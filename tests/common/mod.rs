#![allow(dead_code)]

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use realty_engine::domain::property::{LocationKey, Property, PropertyType};
use rust_decimal::Decimal;
use std::io::Error;
use std::path::Path;

pub const FIXTURE_CATALOG: &str = "tests/fixtures/catalog.csv";

pub const HEADER: [&str; 14] = [
    "id",
    "title",
    "price",
    "location",
    "type",
    "bedrooms",
    "bathrooms",
    "area",
    "garage",
    "pool",
    "furnished",
    "balcony",
    "featured",
    "created_at",
];

const LOCATIONS: [&str; 4] = ["praia-bela", "centro", "beira-mar", "jardins"];
const TYPES: [PropertyType; 4] = [
    PropertyType::Casa,
    PropertyType::Apartamento,
    PropertyType::Cobertura,
    PropertyType::Studio,
];

/// Deterministic pseudo-random catalog for property-style checks.
pub fn random_catalog(seed: u64, size: u32) -> Vec<Property> {
    let mut rng = StdRng::seed_from_u64(seed);
    (1..=size)
        .map(|id| {
            let day = rng.gen_range(1..=28);
            Property {
                id,
                title: format!("Imóvel {id}"),
                price: rng.gen_range(0..=2_000_000u64) / 10_000 * 10_000,
                location: LocationKey::new(LOCATIONS[rng.gen_range(0..LOCATIONS.len())]),
                r#type: TYPES[rng.gen_range(0..TYPES.len())],
                bedrooms: rng.gen_range(0..=6),
                bathrooms: rng.gen_range(1..=4),
                area: Decimal::from(rng.gen_range(20..=600u32)),
                garage: rng.gen_bool(0.5),
                pool: rng.gen_bool(0.3),
                furnished: rng.gen_bool(0.4),
                balcony: rng.gen_bool(0.5),
                featured: rng.gen_bool(0.3),
                created_at: NaiveDate::from_ymd_opt(2025, rng.gen_range(1..=12), day).unwrap(),
            }
        })
        .collect()
}

/// Writes `rows` under the catalog header.
pub fn write_catalog(path: &Path, rows: &[[&str; 14]]) -> Result<(), Error> {
    let mut wtr = csv::WriterBuilder::new().from_path(path)?;
    wtr.write_record(HEADER)?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// First column of every data row of a CSV listing output.
pub fn listed_ids(stdout: &[u8]) -> Vec<u32> {
    String::from_utf8_lossy(stdout)
        .lines()
        .skip(1)
        .filter_map(|line| line.split(',').next())
        .map(|id| id.parse().unwrap())
        .collect()
}

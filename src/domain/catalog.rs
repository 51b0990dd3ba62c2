//! The agency's built-in sample listings, used when no catalog file is supplied.

use crate::domain::property::{LocationKey, Property, PropertyType};
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

pub fn sample() -> Vec<Property> {
    vec![
        Property {
            id: 1,
            title: "Casa de Praia Moderna".to_string(),
            price: 850_000,
            location: LocationKey::new("praia-bela"),
            r#type: PropertyType::Casa,
            bedrooms: 3,
            bathrooms: 2,
            area: dec!(120),
            garage: true,
            pool: false,
            furnished: true,
            balcony: true,
            featured: true,
            created_at: date(2025, 6, 15),
        },
        Property {
            id: 2,
            title: "Apartamento Vista Mar".to_string(),
            price: 650_000,
            location: LocationKey::new("centro"),
            r#type: PropertyType::Apartamento,
            bedrooms: 2,
            bathrooms: 2,
            area: dec!(95),
            garage: true,
            pool: true,
            furnished: false,
            balcony: true,
            featured: false,
            created_at: date(2025, 6, 10),
        },
        Property {
            id: 3,
            title: "Cobertura Duplex Premium".to_string(),
            price: 1_200_000,
            location: LocationKey::new("beira-mar"),
            r#type: PropertyType::Cobertura,
            bedrooms: 4,
            bathrooms: 3,
            area: dec!(180),
            garage: true,
            pool: true,
            furnished: true,
            balcony: true,
            featured: true,
            created_at: date(2025, 6, 12),
        },
    ]
}

use crate::domain::property::{LocationKey, Property, PropertyType};
use crate::error::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ListingRow<'a> {
    id: u32,
    title: &'a str,
    price: u64,
    price_formatted: String,
    location: &'a LocationKey,
    r#type: PropertyType,
    bedrooms: u32,
    bathrooms: u32,
    area: Decimal,
    garage: bool,
    pool: bool,
    furnished: bool,
    balcony: bool,
    featured: bool,
    created_at: NaiveDate,
}

impl<'a> From<&'a Property> for ListingRow<'a> {
    fn from(property: &'a Property) -> Self {
        Self {
            id: property.id,
            title: &property.title,
            price: property.price,
            price_formatted: property.price_formatted(),
            location: &property.location,
            r#type: property.r#type,
            bedrooms: property.bedrooms,
            bathrooms: property.bathrooms,
            area: property.area,
            garage: property.garage,
            pool: property.pool,
            furnished: property.furnished,
            balcony: property.balcony,
            featured: property.featured,
            created_at: property.created_at,
        }
    }
}

/// Writes search results as CSV, one listing per row, in the given order.
pub struct ListingWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ListingWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_listings<'a, I>(&mut self, properties: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Property>,
    {
        for property in properties {
            self.writer.serialize(ListingRow::from(property))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

use crate::domain::property::Property;
use crate::error::{RealtyError, Result};
use std::io::Read;

/// Reads catalog listings from a CSV source.
///
/// Expected header:
/// `id,title,price,location,type,bedrooms,bathrooms,area,garage,pool,furnished,balcony,featured,created_at`
pub struct PropertyReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> PropertyReader<R> {
    /// Creates a new `PropertyReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads, deserializes and validates listings.
    pub fn properties(self) -> impl Iterator<Item = Result<Property>> {
        self.reader.into_deserialize().map(|result| -> Result<Property> {
            let property: Property = result.map_err(RealtyError::from)?;
            property.validate()?;
            Ok(property)
        })
    }
}

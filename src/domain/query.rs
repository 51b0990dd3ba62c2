use crate::domain::property::{LocationKey, Property, PropertyType};
use crate::error::RealtyError;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Fixed price brackets offered by the listing filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceRange {
    /// `ate-500k`: price <= 500 000
    UpTo500k,
    /// `500k-1m`: 500 000 < price <= 1 000 000
    From500kTo1m,
    /// `acima-1m`: price > 1 000 000
    Above1m,
}

impl PriceRange {
    pub fn contains(&self, price: u64) -> bool {
        match self {
            Self::UpTo500k => price <= 500_000,
            Self::From500kTo1m => price > 500_000 && price <= 1_000_000,
            Self::Above1m => price > 1_000_000,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UpTo500k => "ate-500k",
            Self::From500kTo1m => "500k-1m",
            Self::Above1m => "acima-1m",
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceRange {
    type Err = RealtyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ate-500k" => Ok(Self::UpTo500k),
            "500k-1m" => Ok(Self::From500kTo1m),
            "acima-1m" => Ok(Self::Above1m),
            other => Err(RealtyError::validation(format!(
                "Unknown price range '{other}'"
            ))),
        }
    }
}

/// Bedroom constraint. The top bucket of the form (`4`) means "four or more".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BedroomFilter {
    Exactly(u32),
    AtLeast(u32),
}

const TOP_BEDROOM_BUCKET: u32 = 4;

impl BedroomFilter {
    pub fn matches(&self, bedrooms: u32) -> bool {
        match *self {
            Self::Exactly(n) => bedrooms == n,
            Self::AtLeast(n) => bedrooms >= n,
        }
    }
}

impl FromStr for BedroomFilter {
    type Err = RealtyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let invalid = || RealtyError::validation(format!("Invalid bedroom filter '{token}'"));

        if let Some(base) = token.strip_suffix('+') {
            let n: u32 = base.parse().map_err(|_| invalid())?;
            return Ok(Self::AtLeast(n));
        }

        let n: u32 = token.parse().map_err(|_| invalid())?;
        if n == TOP_BEDROOM_BUCKET {
            Ok(Self::AtLeast(n))
        } else {
            Ok(Self::Exactly(n))
        }
    }
}

/// Closed area interval in square meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaRange {
    min: Decimal,
    max: Decimal,
}

impl AreaRange {
    pub fn new(min: Decimal, max: Decimal) -> Result<Self, RealtyError> {
        if min.is_sign_negative() && !min.is_zero() {
            return Err(RealtyError::validation("Minimum area must not be negative"));
        }
        if min > max {
            return Err(RealtyError::validation(format!(
                "Minimum area {min} is greater than maximum area {max}"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Decimal {
        self.min
    }

    pub fn max(&self) -> Decimal {
        self.max
    }

    pub fn contains(&self, area: Decimal) -> bool {
        area >= self.min && area <= self.max
    }
}

/// Optional predicates narrowing the catalog. `None` (or `false` for amenities)
/// imposes no constraint; amenity flags can only narrow the result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub location: Option<LocationKey>,
    pub property_type: Option<PropertyType>,
    pub price_range: Option<PriceRange>,
    pub bedrooms: Option<BedroomFilter>,
    pub area: Option<AreaRange>,
    pub garage: bool,
    pub pool: bool,
    pub furnished: bool,
    pub balcony: bool,
}

/// Partial update of [`FilterCriteria`]. Fields left as `None` keep their current value;
/// `Some(None)` clears an optional constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPatch {
    pub location: Option<Option<LocationKey>>,
    pub property_type: Option<Option<PropertyType>>,
    pub price_range: Option<Option<PriceRange>>,
    pub bedrooms: Option<Option<BedroomFilter>>,
    pub area: Option<Option<AreaRange>>,
    pub garage: Option<bool>,
    pub pool: Option<bool>,
    pub furnished: Option<bool>,
    pub balcony: Option<bool>,
}

impl FilterCriteria {
    pub fn matches(&self, property: &Property) -> bool {
        if let Some(location) = &self.location
            && property.location != *location
        {
            return false;
        }
        if let Some(property_type) = self.property_type
            && property.r#type != property_type
        {
            return false;
        }
        if let Some(range) = self.price_range
            && !range.contains(property.price)
        {
            return false;
        }
        if let Some(bedrooms) = self.bedrooms
            && !bedrooms.matches(property.bedrooms)
        {
            return false;
        }
        if let Some(area) = self.area
            && !area.contains(property.area)
        {
            return false;
        }

        (!self.garage || property.garage)
            && (!self.pool || property.pool)
            && (!self.furnished || property.furnished)
            && (!self.balcony || property.balcony)
    }

    /// Overlays the fields set in `patch`.
    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(property_type) = patch.property_type {
            self.property_type = property_type;
        }
        if let Some(price_range) = patch.price_range {
            self.price_range = price_range;
        }
        if let Some(bedrooms) = patch.bedrooms {
            self.bedrooms = bedrooms;
        }
        if let Some(area) = patch.area {
            self.area = area;
        }
        if let Some(garage) = patch.garage {
            self.garage = garage;
        }
        if let Some(pool) = patch.pool {
            self.pool = pool;
        }
        if let Some(furnished) = patch.furnished {
            self.furnished = furnished;
        }
        if let Some(balcony) = patch.balcony {
            self.balcony = balcony;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
    AreaDesc,
    Newest,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::AreaDesc => "area-desc",
            Self::Newest => "newest",
        }
    }

    fn compare(&self, a: &Property, b: &Property) -> Ordering {
        match self {
            Self::Featured => b.featured.cmp(&a.featured),
            Self::PriceAsc => a.price.cmp(&b.price),
            Self::PriceDesc => b.price.cmp(&a.price),
            Self::AreaDesc => b.area.cmp(&a.area),
            Self::Newest => b.created_at.cmp(&a.created_at),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for SortKey {
    /// Unrecognised keys fall back to the featured-first ordering.
    fn from(value: &str) -> Self {
        match value.trim() {
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            "area-desc" => Self::AreaDesc,
            "newest" => Self::Newest,
            _ => Self::Featured,
        }
    }
}

impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

/// Returns the properties satisfying every criterion, in their original order.
pub fn filter(properties: &[Property], criteria: &FilterCriteria) -> Vec<Property> {
    properties
        .iter()
        .filter(|property| criteria.matches(property))
        .cloned()
        .collect()
}

/// Returns a stably sorted copy; ties keep their relative order.
pub fn sort(properties: &[Property], key: SortKey) -> Vec<Property> {
    let mut sorted = properties.to_vec();
    sorted.sort_by(|a, b| key.compare(a, b));
    sorted
}

pub fn query(properties: &[Property], criteria: &FilterCriteria, key: SortKey) -> Vec<Property> {
    sort(&filter(properties, criteria), key)
}

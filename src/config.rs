//! Runtime settings shared by the CLI commands.
//!
//! Values come from command-line flags first, then environment variables (through
//! clap's `env` support), then the defaults below.

use crate::application::session::{COMPARISON_CAPACITY, SessionStore};
use crate::domain::ports::KeyValueStoreBox;
use crate::domain::query::{AreaRange, FilterCriteria};
use crate::error::{RealtyError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Number the agency answers leads on.
pub const DEFAULT_WHATSAPP_PHONE: &str = "5511999999999";
/// Environment variable overriding the lead phone number.
pub const WHATSAPP_PHONE_ENV: &str = "REALTY_WHATSAPP_PHONE";

pub const DEFAULT_MIN_AREA: Decimal = dec!(50);
pub const DEFAULT_MAX_AREA: Decimal = dec!(500);

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub whatsapp_phone: String,
    pub comparison_capacity: usize,
    /// Area range a fresh search starts from, as on the listings page.
    pub default_area: AreaRange,
}

impl Settings {
    pub fn new(whatsapp_phone: impl Into<String>) -> Result<Self> {
        let whatsapp_phone = whatsapp_phone.into();
        if !whatsapp_phone.chars().any(|c| c.is_ascii_digit()) {
            return Err(RealtyError::validation(format!(
                "{WHATSAPP_PHONE_ENV} must contain a phone number"
            )));
        }

        Ok(Self {
            whatsapp_phone,
            comparison_capacity: COMPARISON_CAPACITY,
            default_area: AreaRange::new(DEFAULT_MIN_AREA, DEFAULT_MAX_AREA)?,
        })
    }

    pub fn default_filters(&self) -> FilterCriteria {
        FilterCriteria {
            area: Some(self.default_area),
            ..Default::default()
        }
    }

    /// Builds a session over `store` using these settings.
    pub fn session(&self, store: KeyValueStoreBox) -> SessionStore {
        SessionStore::with_default_filters(store, self.default_filters())
            .with_comparison_capacity(self.comparison_capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::in_memory::InMemoryKeyValueStore;

    #[test]
    fn test_default_settings() {
        let settings = Settings::new(DEFAULT_WHATSAPP_PHONE).unwrap();
        assert_eq!(settings.whatsapp_phone, "5511999999999");
        assert_eq!(settings.comparison_capacity, 3);
        assert_eq!(settings.default_area.min(), dec!(50));
        assert_eq!(settings.default_area.max(), dec!(500));
    }

    #[test]
    fn test_phone_must_have_digits() {
        assert!(matches!(
            Settings::new("call us"),
            Err(RealtyError::ValidationError(_))
        ));
    }

    #[test]
    fn test_session_starts_from_default_area() {
        let settings = Settings::new(DEFAULT_WHATSAPP_PHONE).unwrap();
        let session = settings.session(Box::new(InMemoryKeyValueStore::new()));
        assert_eq!(session.filters().area, Some(settings.default_area));
    }
}

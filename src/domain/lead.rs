use crate::domain::property::Property;
use crate::error::{RealtyError, Result};

const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// Prefilled text for a WhatsApp conversation started from the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadMessage {
    /// Visitor asking about a specific listing.
    PropertyInterest { title: String, price: String },
    /// Visitor asking for general information.
    General,
    Custom(String),
}

impl LeadMessage {
    pub fn for_property(property: &Property) -> Self {
        Self::PropertyInterest {
            title: property.title.clone(),
            price: property.price_formatted(),
        }
    }

    pub fn text(&self) -> String {
        match self {
            Self::PropertyInterest { title, price } => format!(
                "Olá! Tenho interesse no imóvel \"{title}\" no valor de {price}. Poderia me dar mais informações?"
            ),
            Self::General => {
                "Olá! Vim do site e gostaria de mais informações sobre os imóveis.".to_string()
            }
            Self::Custom(text) if text.trim().is_empty() => Self::General.text(),
            Self::Custom(text) => text.clone(),
        }
    }
}

/// Builds a `wa.me` deep link with the message percent-encoded into `text`.
pub fn whatsapp_link(phone: &str, message: &LeadMessage) -> Result<String> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(RealtyError::validation("WhatsApp phone number has no digits"));
    }

    let text = message.text();
    Ok(format!(
        "{WHATSAPP_BASE_URL}/{digits}?text={}",
        urlencoding::encode(&text)
    ))
}

use crate::domain::money::Money;
use crate::error::{RealtyError, Result};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::Serialize;

/// Shortest term offered by the financing simulator, in years.
pub const MIN_TERM_YEARS: u32 = 10;
/// Longest term offered by the financing simulator, in years.
pub const MAX_TERM_YEARS: u32 = 35;

const MIN_DOWN_PAYMENT_SHARE: Decimal = dec!(0.1);
const MAX_DOWN_PAYMENT_SHARE: Decimal = dec!(0.8);

/// Validated parameters of a fixed-rate financing simulation.
///
/// Construction goes through [`AmortizationInput::new`], so every value that reaches
/// [`compute`] already satisfies `0 <= down_payment <= property_value`, a positive term
/// and a non-negative rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmortizationInput {
    property_value: Money,
    down_payment: Money,
    term_years: u32,
    annual_rate_percent: Decimal,
}

impl AmortizationInput {
    pub fn new(
        property_value: Money,
        down_payment: Money,
        term_years: u32,
        annual_rate_percent: Decimal,
    ) -> Result<Self> {
        if property_value.is_negative() {
            return Err(RealtyError::validation("Property value must not be negative"));
        }
        if down_payment.is_negative() {
            return Err(RealtyError::validation("Down payment must not be negative"));
        }
        if down_payment > property_value {
            return Err(RealtyError::validation(
                "Down payment must not exceed the property value",
            ));
        }
        if term_years == 0 {
            return Err(RealtyError::validation("Term must be at least one year"));
        }
        if term_years.checked_mul(12).is_none() {
            return Err(RealtyError::validation(format!(
                "Term of {term_years} years is too long"
            )));
        }
        if annual_rate_percent.is_sign_negative() && !annual_rate_percent.is_zero() {
            return Err(RealtyError::validation("Interest rate must not be negative"));
        }

        Ok(Self {
            property_value,
            down_payment,
            term_years,
            annual_rate_percent,
        })
    }

    pub fn property_value(&self) -> Money {
        self.property_value
    }

    pub fn down_payment(&self) -> Money {
        self.down_payment
    }

    pub fn term_years(&self) -> u32 {
        self.term_years
    }

    pub fn annual_rate_percent(&self) -> Decimal {
        self.annual_rate_percent
    }

    /// Number of monthly payments; `new` guarantees this does not overflow.
    pub fn num_payments(&self) -> u32 {
        self.term_years.saturating_mul(12)
    }

    pub fn monthly_rate(&self) -> Decimal {
        self.annual_rate_percent / dec!(100) / dec!(12)
    }

    /// Down payment range the simulator slider offers: 10% to 80% of the value.
    ///
    /// Advisory only; `new` accepts anything between zero and the full value.
    pub fn suggested_down_payment_bounds(property_value: Money) -> (Money, Money) {
        (
            Money::new(property_value.value() * MIN_DOWN_PAYMENT_SHARE),
            Money::new(property_value.value() * MAX_DOWN_PAYMENT_SHARE),
        )
    }
}

/// Outcome of a simulation. Every field is derived from the input; nothing is rounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmortizationResult {
    pub monthly_payment: Money,
    pub total_paid: Money,
    pub total_interest: Money,
    pub financed_amount: Money,
    pub down_payment: Money,
}

/// Shares of the total paid, in percent, each capped at 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaymentBreakdown {
    pub down_payment: Decimal,
    pub financed: Decimal,
    pub interest: Decimal,
}

impl AmortizationResult {
    pub fn breakdown(&self) -> PaymentBreakdown {
        let share = |part: Money| -> Decimal {
            let total = self.total_paid.value();
            if total.is_zero() {
                return Decimal::ZERO;
            }
            (part.value() / total * dec!(100)).min(dec!(100))
        };

        PaymentBreakdown {
            down_payment: share(self.down_payment),
            financed: share(self.financed_amount),
            interest: share(self.total_interest),
        }
    }
}

fn overflow(step: &str) -> RealtyError {
    RealtyError::validation(format!("Financing values are too large to compute ({step})"))
}

/// Computes the fixed monthly payment with the standard annuity formula.
///
/// A zero rate degenerates to an even split of the financed amount over the term.
pub fn compute(input: &AmortizationInput) -> Result<AmortizationResult> {
    let financed_amount = input.property_value - input.down_payment;
    let monthly_rate = input.monthly_rate();
    let num_payments = input.num_payments();
    let payments = Decimal::from(num_payments);

    let monthly_payment = if monthly_rate > Decimal::ZERO {
        let growth = (Decimal::ONE + monthly_rate)
            .checked_powi(i64::from(num_payments))
            .ok_or_else(|| overflow("compound growth"))?;
        let numerator = monthly_rate
            .checked_mul(growth)
            .ok_or_else(|| overflow("annuity numerator"))?;
        let denominator = growth - Decimal::ONE;
        financed_amount
            .value()
            .checked_mul(numerator)
            .and_then(|scaled| scaled.checked_div(denominator))
            .ok_or_else(|| overflow("monthly payment"))?
    } else {
        financed_amount
            .value()
            .checked_div(payments)
            .ok_or_else(|| overflow("monthly payment"))?
    };

    let total_paid = monthly_payment
        .checked_mul(payments)
        .and_then(|paid| paid.checked_add(input.down_payment.value()))
        .ok_or_else(|| overflow("total paid"))?;
    let total_interest = total_paid - input.property_value.value();

    Ok(AmortizationResult {
        monthly_payment: Money::new(monthly_payment),
        total_paid: Money::new(total_paid),
        total_interest: Money::new(total_interest),
        financed_amount,
        down_payment: input.down_payment,
    })
}

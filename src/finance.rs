//! General functions related to finance.
use crate::units::{Dimensionless, Money};

/// Calculates the present value factor for a given analysis year and discount rate.
///
/// A future amount is divided by this factor to obtain its present value. No discounting is
/// applied to the first year (or to any year before it), whatever the discount rate, which also
/// guards against degenerate rates such as `-1`.
pub fn present_value_factor(year: i32, discount_rate: Dimensionless) -> Dimensionless {
    if year <= 0 {
        return Dimensionless(1.0);
    }

    (Dimensionless(1.0) + discount_rate).powi(year)
}

/// Discounts an amount occurring in the given analysis year to its present value.
///
/// If the present value factor is zero (e.g. a discount rate of `-1`) or the result is not a
/// finite number, the term contributes nothing and zero is returned.
pub fn discount(amount: Money, year: i32, discount_rate: Dimensionless) -> Money {
    let factor = present_value_factor(year, discount_rate);
    if factor == Dimensionless(0.0) {
        return Money(0.0);
    }

    let value = amount / factor;
    if value.is_finite() { value } else { Money(0.0) }
}

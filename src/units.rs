//! This module defines various unit types and their conversions.
#![allow(missing_docs)]

use float_cmp::{ApproxEq, F64Margin};
use serde::{Deserialize, Serialize};
use std::iter::Sum;

/// Kilowatt-hours per joule, as used for converting EnergyPlus output
pub const KWH_PER_JOULE: f64 = 0.000_000_277_8;

/// Megawatt-hours per joule
pub const MWH_PER_JOULE: f64 = 0.000_000_000_277_8;

/// Therms per joule
pub const THERMS_PER_JOULE: f64 = 0.000_000_009_478_169_879;

/// Square feet per square metre
pub const FT2_PER_M2: f64 = 10.7639;

/// Represents a dimensionless quantity.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    PartialOrd,
    Default,
    Serialize,
    Deserialize,
    derive_more::Add,
    derive_more::Sub,
)]
pub struct Dimensionless(pub f64);

impl std::ops::Mul for Dimensionless {
    type Output = Dimensionless;

    fn mul(self, rhs: Dimensionless) -> Self::Output {
        Dimensionless(self.0 * rhs.0)
    }
}

impl std::ops::Div for Dimensionless {
    type Output = Dimensionless;

    fn div(self, rhs: Dimensionless) -> Self::Output {
        Dimensionless(self.0 / rhs.0)
    }
}

impl Dimensionless {
    pub fn powi(self, rhs: i32) -> Self {
        Dimensionless(self.0.powi(rhs))
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl From<f64> for Dimensionless {
    fn from(val: f64) -> Self {
        Self(val)
    }
}

impl From<Dimensionless> for f64 {
    fn from(val: Dimensionless) -> Self {
        val.0
    }
}

impl ApproxEq for Dimensionless {
    type Margin = F64Margin;

    fn approx_eq<T: Into<Self::Margin>>(self, other: Self, margin: T) -> bool {
        self.0.approx_eq(other.0, margin)
    }
}

macro_rules! unit_struct {
    ($name:ident) => {
        /// Represents a type of quantity.
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            PartialOrd,
            Default,
            Serialize,
            Deserialize,
            derive_more::Add,
            derive_more::Sub,
        )]
        pub struct $name(pub f64);

        impl $name {
            /// Creates a new instance of the unit type from a f64 value.
            pub fn new(val: f64) -> Self {
                Self(val)
            }

            /// Returns the value of the unit type as a f64.
            pub fn value(self) -> f64 {
                self.0
            }

            /// Whether the underlying value is finite
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }
        }

        impl std::ops::Mul<Dimensionless> for $name {
            type Output = $name;
            fn mul(self, rhs: Dimensionless) -> $name {
                $name(self.0 * rhs.0)
            }
        }

        impl std::ops::Mul<$name> for Dimensionless {
            type Output = $name;
            fn mul(self, rhs: $name) -> $name {
                $name(self.0 * rhs.0)
            }
        }

        impl std::ops::Div<Dimensionless> for $name {
            type Output = $name;
            fn div(self, rhs: Dimensionless) -> $name {
                $name(self.0 / rhs.0)
            }
        }

        impl Sum for $name {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                $name(iter.map(|x| x.0).sum())
            }
        }

        impl ApproxEq for $name {
            type Margin = F64Margin;

            fn approx_eq<T: Into<Self::Margin>>(self, other: Self, margin: T) -> bool {
                self.0.approx_eq(other.0, margin)
            }
        }
    };
}

macro_rules! impl_mul {
    ($Lhs:ty, $Rhs:ty, $Out:ty) => {
        impl std::ops::Mul<$Rhs> for $Lhs {
            type Output = $Out;
            fn mul(self, rhs: $Rhs) -> $Out {
                <$Out>::new(self.0 * rhs.0)
            }
        }
        impl std::ops::Mul<$Lhs> for $Rhs {
            type Output = $Out;
            fn mul(self, lhs: $Lhs) -> $Out {
                <$Out>::new(self.0 * lhs.0)
            }
        }
    };
}

// Base quantities
unit_struct!(Money);
unit_struct!(Joules);
unit_struct!(KilowattHours);
unit_struct!(MegawattHours);
unit_struct!(Therms);
unit_struct!(KgCO2);
unit_struct!(Watts);
unit_struct!(SquareMetres);

// Derived quantities
unit_struct!(MoneyPerKilowattHour);
unit_struct!(MoneyPerTherm);
unit_struct!(MoneyPerWatt);
unit_struct!(MoneyPerKgCO2);
unit_struct!(MoneyPerSquareMetre);
unit_struct!(KgCO2PerMoney);
unit_struct!(KgCO2PerMegawattHour);
unit_struct!(KgCO2PerTherm);
unit_struct!(KgCO2PerSquareMetre);

// Multiplication rules
impl_mul!(KilowattHours, MoneyPerKilowattHour, Money);
impl_mul!(Therms, MoneyPerTherm, Money);
impl_mul!(Watts, MoneyPerWatt, Money);
impl_mul!(KgCO2, MoneyPerKgCO2, Money);
impl_mul!(SquareMetres, MoneyPerSquareMetre, Money);
impl_mul!(Money, KgCO2PerMoney, KgCO2);
impl_mul!(MegawattHours, KgCO2PerMegawattHour, KgCO2);
impl_mul!(Therms, KgCO2PerTherm, KgCO2);
impl_mul!(SquareMetres, KgCO2PerSquareMetre, KgCO2);

impl Joules {
    /// Convert to kilowatt-hours
    pub fn to_kilowatt_hours(self) -> KilowattHours {
        KilowattHours(self.0 * KWH_PER_JOULE)
    }

    /// Convert to megawatt-hours
    pub fn to_megawatt_hours(self) -> MegawattHours {
        MegawattHours(self.0 * MWH_PER_JOULE)
    }

    /// Convert to therms (of natural gas)
    pub fn to_therms(self) -> Therms {
        Therms(self.0 * THERMS_PER_JOULE)
    }
}

impl SquareMetres {
    /// Create from an area in square feet
    pub fn from_square_feet(ft2: f64) -> Self {
        SquareMetres(ft2 / FT2_PER_M2)
    }

    /// The area in square feet
    pub fn to_square_feet(self) -> f64 {
        self.0 * FT2_PER_M2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_joule_conversions() {
        let energy = Joules(3_600_000.0);
        assert_approx_eq!(f64, energy.to_kilowatt_hours().0, 1.00008, epsilon = 1e-12);
        assert_approx_eq!(f64, energy.to_megawatt_hours().0, 0.00100008, epsilon = 1e-15);
        assert_approx_eq!(
            f64,
            Joules(105_505_585.257_6).to_therms().0,
            1.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_square_feet_round_trip() {
        let area = SquareMetres::from_square_feet(107.639);
        assert_approx_eq!(f64, area.0, 10.0, epsilon = 1e-12);
        assert_approx_eq!(f64, area.to_square_feet(), 107.639, epsilon = 1e-10);
    }

    #[test]
    fn test_unit_multiplication() {
        assert_eq!(KilowattHours(10.0) * MoneyPerKilowattHour(0.5), Money(5.0));
        assert_eq!(MoneyPerKgCO2(0.25) * KgCO2(4.0), Money(1.0));
        assert_eq!(Money(2.0) * KgCO2PerMoney(0.5), KgCO2(1.0));
        assert_eq!(
            [Money(1.0), Money(2.5)].into_iter().sum::<Money>(),
            Money(3.5)
        );
    }
}

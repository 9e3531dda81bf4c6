//! Special price parsing and line item total calculation.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{PricingError, PricingResult};

/// A parsed "N for M" bulk deal: buy `count` units for `bundle_price` total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SpecialPrice {
    /// Number of units in the bundle (at least 1)
    pub count: u32,
    /// Price for the whole bundle
    pub bundle_price: i64,
}

impl SpecialPrice {
    /// Parses a special price string of the form `"N for M"`.
    ///
    /// Both `N` and `M` must be plain non-negative decimal integers with no
    /// sign, whitespace padding, or fractional part, separated by exactly
    /// `" for "`. A bundle count of zero is rejected.
    pub fn parse(raw: &str) -> PricingResult<Self> {
        let Some((count_raw, bundle_raw)) = raw.split_once(" for ") else {
            return Err(PricingError::InvalidFormat(format!(
                "special price '{}' must look like '3 for 140'",
                raw
            )));
        };

        if !is_decimal(count_raw) || !is_decimal(bundle_raw) {
            return Err(PricingError::InvalidFormat(format!(
                "special price '{}' must look like '3 for 140'",
                raw
            )));
        }

        let count: u32 = count_raw.parse().map_err(|_| {
            PricingError::InvalidFormat(format!("special price count '{}' is too large", count_raw))
        })?;
        let bundle_price: i64 = bundle_raw.parse().map_err(|_| {
            PricingError::InvalidFormat(format!(
                "special price amount '{}' is too large",
                bundle_raw
            ))
        })?;

        if count == 0 {
            return Err(PricingError::InvalidFormat(format!(
                "special price '{}' must cover at least one unit",
                raw
            )));
        }

        Ok(Self {
            count,
            bundle_price,
        })
    }
}

impl fmt::Display for SpecialPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} for {}", self.count, self.bundle_price)
    }
}

/// Non-empty and ASCII digits only. Rejects signs, spaces, and unicode digits
/// that `str::parse` would otherwise let through via `+`.
fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Total for one line item: full bundles at the bundle price, the remainder
/// at the unit price.
///
/// Returns `None` when the total does not fit in an `i64`; stored prices are
/// not bounded, so the arithmetic must not wrap.
pub fn item_total(unit_price: i64, special: Option<&SpecialPrice>, quantity: u32) -> Option<i64> {
    match special {
        Some(sp) => {
            let bundles = i64::from(quantity / sp.count);
            let remainder = i64::from(quantity % sp.count);
            let bundled = bundles.checked_mul(sp.bundle_price)?;
            let loose = remainder.checked_mul(unit_price)?;
            bundled.checked_add(loose)
        }
        None => i64::from(quantity).checked_mul(unit_price),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_special_price() {
        let sp = SpecialPrice::parse("3 for 140").unwrap();
        assert_eq!(sp.count, 3);
        assert_eq!(sp.bundle_price, 140);

        let sp = SpecialPrice::parse("2 for 60").unwrap();
        assert_eq!(sp.count, 2);
        assert_eq!(sp.bundle_price, 60);
    }

    #[test]
    fn test_parse_rejects_malformed_strings() {
        for raw in [
            "",
            "3",
            "for 140",
            "3 for",
            "3for140",
            "3 for x",
            "x for 140",
            "3  for 140",
            " 3 for 140",
            "3 for 140 ",
            "3 for 140 for 2",
            "-3 for 140",
            "+3 for 140",
            "3.0 for 140",
            "3 For 140",
        ] {
            let err = SpecialPrice::parse(raw).unwrap_err();
            assert!(
                matches!(err, PricingError::InvalidFormat(_)),
                "expected InvalidFormat for '{}', got {:?}",
                raw,
                err
            );
        }
    }

    #[test]
    fn test_parse_rejects_zero_count() {
        let err = SpecialPrice::parse("0 for 10").unwrap_err();
        assert!(matches!(err, PricingError::InvalidFormat(_)));
    }

    #[test]
    fn test_parse_rejects_overflowing_numbers() {
        let err = SpecialPrice::parse("99999999999 for 10").unwrap_err();
        assert!(matches!(err, PricingError::InvalidFormat(_)));
    }

    #[test]
    fn test_display_round_trips() {
        let sp = SpecialPrice::parse("3 for 140").unwrap();
        assert_eq!(sp.to_string(), "3 for 140");
    }

    #[test]
    fn test_item_total_without_special() {
        assert_eq!(item_total(25, None, 4), Some(100));
        assert_eq!(item_total(25, None, 0), Some(0));
    }

    #[test]
    fn test_item_total_exact_bundles() {
        let sp = SpecialPrice::parse("3 for 140").unwrap();
        assert_eq!(item_total(50, Some(&sp), 3), Some(140));
        assert_eq!(item_total(50, Some(&sp), 6), Some(280));
    }

    #[test]
    fn test_item_total_with_remainder() {
        let sp = SpecialPrice::parse("3 for 140").unwrap();
        // One bundle plus one loose unit
        assert_eq!(item_total(50, Some(&sp), 4), Some(190));
        // Below the bundle threshold, only unit prices apply
        assert_eq!(item_total(50, Some(&sp), 2), Some(100));
    }

    #[test]
    fn test_item_total_zero_quantity_with_special() {
        let sp = SpecialPrice::parse("2 for 60").unwrap();
        assert_eq!(item_total(35, Some(&sp), 0), Some(0));
    }

    #[test]
    fn test_item_total_overflow_is_none() {
        assert_eq!(item_total(i64::MAX, None, 2), None);

        let sp = SpecialPrice {
            count: 1,
            bundle_price: i64::MAX,
        };
        assert_eq!(item_total(1, Some(&sp), 2), None);
    }
}

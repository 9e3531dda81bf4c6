use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::calculator::SpecialPrice;

/// A product row in the pricing table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Product code, e.g. "A"
    pub code: String,
    /// Price of a single unit
    pub unit_price: i64,
    /// Optional bulk deal in "N for M" notation, e.g. "3 for 140"
    pub special_price: Option<String>,
}

/// Input for creating or replacing a product
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    /// Product code (1-10 characters)
    #[validate(length(min = 1, max = 10))]
    pub code: String,
    /// Price of a single unit (must be positive)
    #[validate(range(min = 1))]
    pub unit_price: i64,
    /// Optional bulk deal in "N for M" notation
    #[validate(custom(function = validate_special_price))]
    pub special_price: Option<String>,
}

/// Partial update for an existing product; omitted fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    /// New unit price (must be positive)
    #[validate(range(min = 1))]
    pub unit_price: Option<i64>,
    /// New bulk deal in "N for M" notation
    #[validate(custom(function = validate_special_price))]
    pub special_price: Option<String>,
}

/// One entry of a bulk upsert: inserts the product when the code is new,
/// otherwise patches the listed fields. A new product requires `unit_price`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpsertProduct {
    /// Product code (1-10 characters)
    #[validate(length(min = 1, max = 10))]
    pub code: String,
    /// Unit price; required when the code does not exist yet
    #[validate(range(min = 1))]
    pub unit_price: Option<i64>,
    /// Bulk deal in "N for M" notation
    #[validate(custom(function = validate_special_price))]
    pub special_price: Option<String>,
}

/// One line of a checkout: a product code and how many units are bought
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LineItem {
    /// Product code
    pub code: String,
    /// Number of units
    pub quantity: u32,
}

/// Request body for bulk deletion
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteCodes {
    /// Product codes to delete
    pub codes: Vec<String>,
}

/// Codes that were actually removed by a bulk deletion
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeletedCodes {
    pub deleted: Vec<String>,
}

/// Computed checkout subtotal
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubtotalResponse {
    pub subtotal: i64,
}

/// Validator hook for special price fields on input DTOs.
fn validate_special_price(raw: &str) -> Result<(), ValidationError> {
    SpecialPrice::parse(raw)
        .map(|_| ())
        .map_err(|_| ValidationError::new("special_price").with_message("must look like '3 for 140'".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_product_accepts_valid_input() {
        let input = CreateProduct {
            code: "A".to_string(),
            unit_price: 50,
            special_price: Some("3 for 140".to_string()),
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_product_without_special_price() {
        let input = CreateProduct {
            code: "C".to_string(),
            unit_price: 25,
            special_price: None,
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_product_rejects_empty_code() {
        let input = CreateProduct {
            code: String::new(),
            unit_price: 50,
            special_price: None,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_create_product_rejects_long_code() {
        let input = CreateProduct {
            code: "ABCDEFGHIJK".to_string(),
            unit_price: 50,
            special_price: None,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_create_product_rejects_non_positive_unit_price() {
        for unit_price in [0, -5] {
            let input = CreateProduct {
                code: "A".to_string(),
                unit_price,
                special_price: None,
            };
            assert!(input.validate().is_err());
        }
    }

    #[test]
    fn test_create_product_rejects_malformed_special_price() {
        let input = CreateProduct {
            code: "A".to_string(),
            unit_price: 50,
            special_price: Some("3 for x".to_string()),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_update_product_allows_all_fields_absent() {
        let input = UpdateProduct::default();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_update_product_rejects_zero_bundle_count() {
        let input = UpdateProduct {
            unit_price: None,
            special_price: Some("0 for 10".to_string()),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_upsert_product_allows_missing_unit_price() {
        // The repository decides whether unit_price is required, based on
        // whether the code already exists.
        let input = UpsertProduct {
            code: "B".to_string(),
            unit_price: None,
            special_price: Some("2 for 60".to_string()),
        };
        assert!(input.validate().is_ok());
    }
}

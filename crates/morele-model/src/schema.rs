//! The Morele marketplace ingestion schema.
//!
//! The schema is a fixed, ordered list of 20 fields. Every output table
//! carries exactly these columns in exactly this order. Three of the fields
//! are never left empty: they receive a fallback literal when neither the
//! mapping nor an override produced a value.

pub const VENDOR_PART_NUMBER: &str = "vendorPartNumber";
pub const SALE_PRICE_BRUTTO: &str = "salePriceBrutto";
pub const CURRENCY: &str = "currency";
pub const VENDOR_PRODUCT_NAME: &str = "vendorProductName";
pub const BARCODES: &str = "barcodes";
pub const AVAILABILITY: &str = "availability";
pub const QUANTITY: &str = "quantity";
pub const VENDOR_BRAND_NAME: &str = "vendorBrandName";
pub const BRAND_CODE: &str = "brandCode";
pub const VAT: &str = "vat";
pub const IMAGES: &str = "images";
pub const VENDOR_DESCRIPTION: &str = "vendorDescription";
pub const WARRANTY: &str = "warranty";
pub const VENDOR_CHARACTERISTIC: &str = "vendorCharacteristic";
pub const VENDOR_CATEGORY_NAME: &str = "vendorCategoryName";
pub const DELIVERY_DAYS: &str = "deliveryDays";
pub const DELIVERY_PRICE: &str = "deliveryPrice";
pub const PRODUCT_PROMOTION_ACTIVE: &str = "productPromotionActive";
pub const PRODUCT_PROMOTION_CAMPAIGN_NAME: &str = "productPromotionCampaignName";
pub const PRODUCT_PROMOTION_PRICE: &str = "productPromotionPrice";

/// Target columns in output order.
pub const TARGET_SCHEMA: [&str; 20] = [
    VENDOR_PART_NUMBER,
    SALE_PRICE_BRUTTO,
    CURRENCY,
    VENDOR_PRODUCT_NAME,
    BARCODES,
    AVAILABILITY,
    QUANTITY,
    VENDOR_BRAND_NAME,
    BRAND_CODE,
    VAT,
    IMAGES,
    VENDOR_DESCRIPTION,
    WARRANTY,
    VENDOR_CHARACTERISTIC,
    VENDOR_CATEGORY_NAME,
    DELIVERY_DAYS,
    DELIVERY_PRICE,
    PRODUCT_PROMOTION_ACTIVE,
    PRODUCT_PROMOTION_CAMPAIGN_NAME,
    PRODUCT_PROMOTION_PRICE,
];

/// Sentinel written when a row has no part number.
pub const MISSING_SKU: &str = "MISSING_SKU";
/// Currency assumed when none is given.
pub const DEFAULT_CURRENCY: &str = "PLN";
/// Availability assumed when none is given.
pub const DEFAULT_AVAILABILITY: &str = "0";

/// Fallback literals for the fields that must never be empty.
pub const DEFAULT_FILLS: [(&str, &str); 3] = [
    (VENDOR_PART_NUMBER, MISSING_SKU),
    (CURRENCY, DEFAULT_CURRENCY),
    (AVAILABILITY, DEFAULT_AVAILABILITY),
];

/// Returns true if `name` is one of the 20 target fields (case-sensitive).
pub fn is_target_field(name: &str) -> bool {
    TARGET_SCHEMA.contains(&name)
}

/// Position of a target field in the output column order.
pub fn field_position(name: &str) -> Option<usize> {
    TARGET_SCHEMA.iter().position(|field| *field == name)
}

/// Fallback literal for a target field, if it has one.
pub fn default_for(name: &str) -> Option<&'static str> {
    DEFAULT_FILLS
        .iter()
        .find(|(field, _)| *field == name)
        .map(|(_, value)| *value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_has_twenty_unique_fields() {
        let mut names: Vec<&str> = TARGET_SCHEMA.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 20);
    }

    #[test]
    fn schema_order_is_fixed() {
        assert_eq!(TARGET_SCHEMA[0], "vendorPartNumber");
        assert_eq!(TARGET_SCHEMA[2], "currency");
        assert_eq!(TARGET_SCHEMA[5], "availability");
        assert_eq!(TARGET_SCHEMA[19], "productPromotionPrice");
        assert_eq!(field_position("vat"), Some(9));
        assert_eq!(field_position("VAT"), None);
    }

    #[test]
    fn defaults_cover_three_fields() {
        assert_eq!(default_for(VENDOR_PART_NUMBER), Some("MISSING_SKU"));
        assert_eq!(default_for(CURRENCY), Some("PLN"));
        assert_eq!(default_for(AVAILABILITY), Some("0"));
        assert_eq!(default_for(VAT), None);
        assert!(DEFAULT_FILLS.iter().all(|(field, _)| is_target_field(field)));
    }
}

//! # Seed Loading
//!
//! Reads the two comma-separated seed files the store starts from.
//!
//! ## Formats
//! ```text
//! products:    name,price,quantity,promotion[,description[,category]]
//!              promotion is a promotion name or the literal "null"
//!
//! promotions:  name,buy,get,start_date,end_date
//!              dates are YYYY-MM-DD, the range is inclusive
//! ```
//!
//! The first non-blank line of each file is a header and is skipped; blank
//! lines are ignored everywhere. Rows for the same product keep file order,
//! so listing a promotional row above its regular row is what makes
//! promotional stock take display priority.

use std::fs;
use std::path::Path;

use tracing::info;

use corner_core::catalog::{Catalog, PromotionCatalog};
use corner_core::error::ValidationError;
use corner_core::request::{parse_date, parse_price, validate_product_name, validate_promotion_values};
use corner_core::types::{Product, ProductCategory, Promotion};

use crate::error::SeedError;

// =============================================================================
// File Loading
// =============================================================================

/// Loads the product catalog from a seed file.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, SeedError> {
    let path = path.as_ref();
    let text = read_seed(path)?;
    let catalog = parse_catalog(&path.display().to_string(), &text)?;
    info!(
        path = %path.display(),
        products = catalog.names().len(),
        "catalog seeded"
    );
    Ok(catalog)
}

/// Loads promotion definitions from a seed file.
pub fn load_promotions(path: impl AsRef<Path>) -> Result<PromotionCatalog, SeedError> {
    let path = path.as_ref();
    let text = read_seed(path)?;
    let promotions = parse_promotions(&path.display().to_string(), &text)?;
    info!(
        path = %path.display(),
        promotions = promotions.all().len(),
        "promotions seeded"
    );
    Ok(promotions)
}

fn read_seed(path: &Path) -> Result<String, SeedError> {
    fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.display().to_string(),
        source,
    })
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses product rows. `file` only labels errors.
pub fn parse_catalog(file: &str, text: &str) -> Result<Catalog, SeedError> {
    let mut catalog = Catalog::new();
    for (line_number, line) in data_lines(text) {
        let product = parse_product_line(file, line_number, line)?;
        catalog.add_variant(product);
    }
    Ok(catalog)
}

fn parse_product_line(file: &str, line_number: usize, line: &str) -> Result<Product, SeedError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 4 {
        return Err(SeedError::MissingFields {
            file: file.to_string(),
            line: line_number,
            expected: 4,
            found: fields.len(),
        });
    }
    let invalid = |source: ValidationError| SeedError::InvalidField {
        file: file.to_string(),
        line: line_number,
        source,
    };

    let name = fields[0];
    validate_product_name(name).map_err(invalid)?;
    let price = parse_price(fields[1]).map_err(invalid)?;
    let stock: u32 = fields[2].parse().map_err(|_| {
        invalid(ValidationError::InvalidNumber {
            field: "quantity".to_string(),
        })
    })?;
    let promotion = match fields[3] {
        "null" => None,
        other => Some(other.to_string()),
    };
    let description = fields
        .get(4)
        .filter(|text| !text.is_empty())
        .map(|text| text.to_string());
    let category = fields
        .get(5)
        .and_then(|text| ProductCategory::from_display_name(text))
        .unwrap_or_else(|| ProductCategory::infer(name));

    Ok(Product {
        name: name.to_string(),
        price,
        stock,
        promotion,
        description,
        category,
    })
}

/// Parses promotion rows. `file` only labels errors.
pub fn parse_promotions(file: &str, text: &str) -> Result<PromotionCatalog, SeedError> {
    let mut promotions = PromotionCatalog::new();
    for (line_number, line) in data_lines(text) {
        let promotion = parse_promotion_line(file, line_number, line)?;
        promotions.insert(promotion).map_err(|source| SeedError::InvalidField {
            file: file.to_string(),
            line: line_number,
            source,
        })?;
    }
    Ok(promotions)
}

fn parse_promotion_line(
    file: &str,
    line_number: usize,
    line: &str,
) -> Result<Promotion, SeedError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 5 {
        return Err(SeedError::MissingFields {
            file: file.to_string(),
            line: line_number,
            expected: 5,
            found: fields.len(),
        });
    }
    let invalid = |source: ValidationError| SeedError::InvalidField {
        file: file.to_string(),
        line: line_number,
        source,
    };

    let parse_count = |text: &str, field: &str| -> Result<u32, SeedError> {
        text.parse().map_err(|_| {
            invalid(ValidationError::InvalidNumber {
                field: field.to_string(),
            })
        })
    };

    let name = fields[0].to_string();
    let buy = parse_count(fields[1], "buy count")?;
    let get = parse_count(fields[2], "get count")?;
    validate_promotion_values(buy, get).map_err(invalid)?;
    let starts_on = parse_date(fields[3]).map_err(invalid)?;
    let ends_on = parse_date(fields[4]).map_err(invalid)?;

    Ok(Promotion {
        name,
        buy,
        get,
        starts_on,
        ends_on,
    })
}

/// Non-blank lines with their 1-based file line numbers, header dropped.
fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .skip(1)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use corner_core::money::Money;

    const PRODUCTS: &str = "\
name,price,quantity,promotion,description,category
cola,1000,10,carbonated 2+1,zero sugar,Beverage
cola,1000,7,null
orange juice,1800,9,null,,Beverage
toothbrush,1200,5,null,soft bristles,Daily
mystery box,5000,2,null";

    const PROMOTIONS: &str = "\
name,buy,get,start_date,end_date
carbonated 2+1,2,1,2024-01-01,2024-12-31
flash 1+1,1,1,2024-06-01,2024-06-30";

    #[test]
    fn test_parse_catalog() {
        let catalog = parse_catalog("products.csv", PRODUCTS).unwrap();

        let promo = catalog.promotional_variant("cola").unwrap();
        assert_eq!(promo.price, Money::from_units(1_000));
        assert_eq!(promo.stock, 10);
        assert_eq!(promo.promotion.as_deref(), Some("carbonated 2+1"));
        assert_eq!(promo.description.as_deref(), Some("zero sugar"));

        let regular = catalog.regular_variant("cola").unwrap();
        assert_eq!(regular.stock, 7);
        assert!(regular.promotion.is_none());

        assert_eq!(catalog.total_stock("cola"), 17);
        assert_eq!(catalog.names().len(), 4);
    }

    #[test]
    fn test_null_promotion_sentinel() {
        let catalog = parse_catalog("products.csv", PRODUCTS).unwrap();
        assert!(catalog.promotional_variant("orange juice").is_none());
        assert!(catalog.regular_variant("orange juice").is_some());
    }

    #[test]
    fn test_blank_description_is_none() {
        let catalog = parse_catalog("products.csv", PRODUCTS).unwrap();
        let juice = catalog.regular_variant("orange juice").unwrap();
        assert!(juice.description.is_none());
    }

    #[test]
    fn test_category_column_and_fallback_inference() {
        let catalog = parse_catalog("products.csv", PRODUCTS).unwrap();
        assert_eq!(
            catalog.regular_variant("toothbrush").unwrap().category,
            ProductCategory::Daily
        );
        // no category column: inferred from the name, unknown words land in Etc
        assert_eq!(
            catalog.regular_variant("mystery box").unwrap().category,
            ProductCategory::Etc
        );
        assert_eq!(
            catalog.regular_variant("orange juice").unwrap().category,
            ProductCategory::Beverage
        );
    }

    #[test]
    fn test_missing_fields_reports_line() {
        let err = parse_catalog("products.csv", "header\ncola,1000\n").unwrap_err();
        assert!(matches!(
            err,
            SeedError::MissingFields {
                line: 2,
                expected: 4,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_bad_price_and_stock_rejected() {
        assert!(parse_catalog("p", "header\ncola,free,10,null").is_err());
        assert!(parse_catalog("p", "header\ncola,0,10,null").is_err());
        assert!(parse_catalog("p", "header\ncola,1000,lots,null").is_err());
        // zero stock is a valid sold-out row
        assert!(parse_catalog("p", "header\ncola,1000,0,null").is_ok());
    }

    #[test]
    fn test_blank_lines_and_header_skipped() {
        let text = "\n\nname,price,quantity,promotion\n\ncola,1000,3,null\n\n";
        let catalog = parse_catalog("products.csv", text).unwrap();
        assert_eq!(catalog.total_stock("cola"), 3);
    }

    #[test]
    fn test_parse_promotions() {
        let promotions = parse_promotions("promotions.csv", PROMOTIONS).unwrap();
        assert_eq!(promotions.all().len(), 2);

        let carbonated = promotions.find("carbonated 2+1").unwrap();
        assert_eq!((carbonated.buy, carbonated.get), (2, 1));
        assert_eq!(
            carbonated.starts_on,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );

        let flash = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert!(promotions.active("flash 1+1", flash).is_some());
        let after = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        assert!(promotions.active("flash 1+1", after).is_none());
    }

    #[test]
    fn test_promotion_rows_validated() {
        assert!(parse_promotions("p", "header\nbad,0,1,2024-01-01,2024-12-31").is_err());
        assert!(parse_promotions("p", "header\nbad,2,0,2024-01-01,2024-12-31").is_err());
        assert!(parse_promotions("p", "header\nbad,2,1,2024-13-01,2024-12-31").is_err());
        assert!(parse_promotions("p", "header\nbad,2,1,2024-01-01").is_err());
    }

    #[test]
    fn test_duplicate_promotion_name_rejected() {
        let text = "header\ntwin,2,1,2024-01-01,2024-12-31\ntwin,1,1,2024-01-01,2024-12-31";
        let err = parse_promotions("promotions.csv", text).unwrap_err();
        assert!(matches!(
            err,
            SeedError::InvalidField {
                line: 3,
                source: ValidationError::Duplicate { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_catalog("/nonexistent/products.csv").unwrap_err();
        assert!(matches!(err, SeedError::Io { .. }));
    }
}

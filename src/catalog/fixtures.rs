//! Catalog fixture files

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::iso::{Currency, EUR, GBP, USD};
use serde::Deserialize;

use crate::{areas::Area, catalog::CatalogError};

/// Wrapper for restaurants in YAML
#[derive(Debug, Deserialize)]
pub struct RestaurantsFixture {
    /// Map of restaurant id -> restaurant fixture
    pub restaurants: FxHashMap<String, RestaurantFixture>,
}

/// Restaurant Fixture
#[derive(Debug, Deserialize)]
pub struct RestaurantFixture {
    /// Restaurant name
    pub name: String,

    /// Restaurant description
    #[serde(default)]
    pub description: String,

    /// Street address
    #[serde(default)]
    pub address: String,

    /// Phone number
    #[serde(default)]
    pub phone: String,

    /// Delivery area
    pub area: Area,

    /// Image URL
    #[serde(default)]
    pub image: String,
}

/// Wrapper for menu dishes in YAML
#[derive(Debug, Deserialize)]
pub struct MenuFixture {
    /// Map of dish id -> dish fixture
    pub dishes: FxHashMap<String, DishFixture>,
}

/// Dish Fixture
#[derive(Debug, Deserialize)]
pub struct DishFixture {
    /// Id of the restaurant serving the dish
    pub restaurant: String,

    /// Dish name
    pub name: String,

    /// Dish description
    #[serde(default)]
    pub description: String,

    /// Dish price (e.g., "9.50 EUR")
    pub price: String,

    /// Prep time of one portion in minutes
    #[serde(default)]
    pub prep_time: u32,

    /// Whether the dish can be ordered
    #[serde(default = "available_by_default")]
    pub available: bool,
}

fn available_by_default() -> bool {
    true
}

/// Wrapper for customers in YAML
#[derive(Debug, Deserialize)]
pub struct CustomersFixture {
    /// Map of customer id -> customer fixture
    pub customers: FxHashMap<String, CustomerFixture>,
}

/// Customer Fixture
#[derive(Debug, Deserialize)]
pub struct CustomerFixture {
    /// First name
    pub name: String,

    /// Last name
    #[serde(default)]
    pub last_name: String,

    /// Delivery address
    #[serde(default)]
    pub address: String,

    /// Phone number
    #[serde(default)]
    pub phone: String,

    /// Home area
    pub area: Area,
}

/// Fixture entries ordered by id, so loading and its errors are reproducible.
pub fn sorted_by_id<T>(entries: FxHashMap<String, T>) -> Vec<(String, T)> {
    let mut entries: Vec<_> = entries.into_iter().collect();

    entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));

    entries
}

/// Parse price string (e.g., "9.99 EUR") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a non-negative decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), CatalogError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(currency_code), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(CatalogError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| CatalogError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(CatalogError::InvalidPrice(s.to_string()));
    }

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| CatalogError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency_from_code(currency_code)?))
}

/// Resolve a supported ISO currency code
///
/// # Errors
///
/// Returns [`CatalogError::UnknownCurrency`] for codes other than EUR, GBP and USD.
pub fn currency_from_code(code: &str) -> Result<&'static Currency, CatalogError> {
    match code {
        "EUR" => Ok(EUR),
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        other => Err(CatalogError::UnknownCurrency(other.to_string())),
    }
}

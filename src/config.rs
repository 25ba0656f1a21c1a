//! Configuration
//!
//! Command line arguments with environment variable fallbacks.

use std::{path::PathBuf, str::FromStr};

use clap::Args;
use thiserror::Error;

use crate::estimates::EstimateCalculator;

/// Where to load restaurants, menus and customers from.
#[derive(Debug, Args)]
pub struct CatalogConfig {
    /// Base directory holding fixture sets
    #[arg(long, env = "NOMNOM_FIXTURES", default_value = "./fixtures")]
    pub fixtures: PathBuf,

    /// Name of the fixture set to load
    #[arg(long, env = "NOMNOM_FIXTURE_SET", default_value = "demo")]
    pub fixture_set: String,
}

/// Pickup and delivery minutes used when estimating.
#[derive(Debug, Args)]
pub struct DeliveryPolicyConfig {
    /// Pickup stop at a restaurant in the customer's area
    #[arg(long, env = "NOMNOM_SAME_AREA_PICKUP_MINUTES", default_value_t = 5)]
    pub same_area_pickup_minutes: u32,

    /// Pickup stop at a restaurant outside the customer's area
    #[arg(long, env = "NOMNOM_DIFFERENT_AREA_PICKUP_MINUTES", default_value_t = 10)]
    pub different_area_pickup_minutes: u32,

    /// Final leg when every restaurant is in the customer's area
    #[arg(long, env = "NOMNOM_SAME_AREA_DELIVERY_MINUTES", default_value_t = 5)]
    pub same_area_delivery_minutes: u32,

    /// Final leg when any restaurant is outside the customer's area
    #[arg(long, env = "NOMNOM_DIFFERENT_AREA_DELIVERY_MINUTES", default_value_t = 10)]
    pub different_area_delivery_minutes: u32,
}

impl From<&DeliveryPolicyConfig> for EstimateCalculator {
    fn from(config: &DeliveryPolicyConfig) -> Self {
        Self {
            same_area_pickup_minutes: config.same_area_pickup_minutes,
            different_area_pickup_minutes: config.different_area_pickup_minutes,
            same_area_delivery_minutes: config.same_area_delivery_minutes,
            different_area_delivery_minutes: config.different_area_delivery_minutes,
        }
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Errors that can occur while parsing a dish argument.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DishArgError {
    /// The argument had no dish id.
    #[error("missing dish id in {0:?}")]
    MissingId(String),

    /// The quantity was not a positive whole number.
    #[error("invalid quantity in {0:?}")]
    InvalidQuantity(String),
}

/// A `DISH_ID[:QTY]` command line argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DishArg {
    /// Fixture id of the dish
    pub id: String,

    /// Portions to add, at least one
    pub quantity: u32,
}

impl FromStr for DishArg {
    type Err = DishArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, quantity) = match s.split_once(':') {
            Some((id, quantity)) => (
                id,
                quantity
                    .trim()
                    .parse::<u32>()
                    .map_err(|_err| DishArgError::InvalidQuantity(s.to_string()))?,
            ),
            None => (s, 1),
        };

        let id = id.trim();

        if id.is_empty() {
            return Err(DishArgError::MissingId(s.to_string()));
        }

        if quantity == 0 {
            return Err(DishArgError::InvalidQuantity(s.to_string()));
        }

        Ok(DishArg {
            id: id.to_string(),
            quantity,
        })
    }
}

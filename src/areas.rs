//! Areas

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while parsing an area.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AreaError {
    /// The name does not match any delivery zone.
    #[error("Unknown area: {0}")]
    Unknown(String),
}

/// A named delivery zone.
///
/// Customers and restaurants both live in exactly one area. There is no
/// distance between areas beyond "same" and "different".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Area {
    /// North
    North,

    /// East
    East,

    /// West
    West,
}

impl Area {
    /// Every delivery zone, in display order.
    pub const ALL: [Area; 3] = [Area::North, Area::East, Area::West];

    /// Capitalised zone name.
    pub fn as_str(self) -> &'static str {
        match self {
            Area::North => "North",
            Area::East => "East",
            Area::West => "West",
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Area {
    type Err = AreaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        Area::ALL
            .into_iter()
            .find(|area| area.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| AreaError::Unknown(s.to_string()))
    }
}

/// Area filter used when browsing restaurants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AreaFilter {
    /// Match every area.
    #[default]
    All,

    /// Match a single area.
    Only(Area),
}

impl AreaFilter {
    /// Returns true if the given area passes the filter.
    pub fn matches(self, area: Area) -> bool {
        match self {
            AreaFilter::All => true,
            AreaFilter::Only(only) => only == area,
        }
    }
}

impl FromStr for AreaFilter {
    type Err = AreaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(AreaFilter::All);
        }

        s.parse().map(AreaFilter::Only)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_case_insensitively() -> TestResult {
        assert_eq!("north".parse::<Area>()?, Area::North);
        assert_eq!(" EAST ".parse::<Area>()?, Area::East);
        assert_eq!("West".parse::<Area>()?, Area::West);

        Ok(())
    }

    #[test]
    fn rejects_unknown_area() {
        let result = "South".parse::<Area>();

        assert_eq!(result, Err(AreaError::Unknown("South".to_string())));
    }

    #[test]
    fn displays_capitalised_name() {
        assert_eq!(Area::North.to_string(), "North");
        assert_eq!(Area::West.to_string(), "West");
    }

    #[test]
    fn deserializes_from_yaml_name() -> TestResult {
        let area: Area = serde_norway::from_str("East")?;

        assert_eq!(area, Area::East);

        Ok(())
    }

    #[test]
    fn filter_all_matches_everything() {
        assert!(Area::ALL.into_iter().all(|area| AreaFilter::All.matches(area)));
    }

    #[test]
    fn filter_only_matches_single_area() -> TestResult {
        let filter: AreaFilter = "north".parse()?;

        assert!(filter.matches(Area::North));
        assert!(!filter.matches(Area::East));

        Ok(())
    }

    #[test]
    fn filter_parses_all() -> TestResult {
        assert_eq!("All".parse::<AreaFilter>()?, AreaFilter::All);

        Ok(())
    }
}

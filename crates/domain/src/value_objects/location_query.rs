//! Free-text location query
//!
//! Users type either a coordinate pair (`52.52,13.405`) or a place name,
//! optionally narrowed by a country or region after a comma
//! (`Paris, US`, `Springfield, Illinois`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::GeoLocation;
use crate::DomainError;

/// A parsed location query
///
/// # Examples
///
/// ```
/// use domain::value_objects::LocationQuery;
///
/// let query: LocationQuery = "Paris, US".parse().expect("valid query");
/// assert_eq!(
///     query,
///     LocationQuery::Name {
///         name: "Paris".to_string(),
///         qualifier: Some("US".to_string()),
///     }
/// );
///
/// let query: LocationQuery = "48.85,2.35".parse().expect("valid query");
/// assert!(matches!(query, LocationQuery::Coordinates(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationQuery {
    /// Explicit coordinates
    Coordinates(GeoLocation),
    /// Place name to be geocoded
    Name {
        /// Name searched for
        name: String,
        /// Country, country code or region used to pick among matches
        qualifier: Option<String>,
    },
}

impl LocationQuery {
    /// Parse a query string
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidLocationQuery` for empty input and
    /// `DomainError::InvalidCoordinates` for a numeric pair out of range.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(DomainError::InvalidLocationQuery(
                "location must not be empty".to_string(),
            ));
        }

        if let Some((lat, lon)) = input.split_once(',') {
            if let (Ok(latitude), Ok(longitude)) =
                (lat.trim().parse::<f64>(), lon.trim().parse::<f64>())
            {
                return GeoLocation::new(latitude, longitude).map(Self::Coordinates);
            }

            let name = lat.trim();
            if name.is_empty() {
                return Err(DomainError::InvalidLocationQuery(format!(
                    "missing place name in \"{input}\""
                )));
            }
            let qualifier = lon.trim();
            return Ok(Self::Name {
                name: name.to_string(),
                qualifier: (!qualifier.is_empty()).then(|| qualifier.to_string()),
            });
        }

        Ok(Self::Name {
            name: input.to_string(),
            qualifier: None,
        })
    }
}

impl FromStr for LocationQuery {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coordinates(location) => write!(f, "{location}"),
            Self::Name {
                name,
                qualifier: Some(qualifier),
            } => write!(f, "{name}, {qualifier}"),
            Self::Name {
                name,
                qualifier: None,
            } => write!(f, "{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn name(name: &str, qualifier: Option<&str>) -> LocationQuery {
        LocationQuery::Name {
            name: name.to_string(),
            qualifier: qualifier.map(str::to_string),
        }
    }

    #[test]
    fn parses_plain_name() {
        assert_eq!(LocationQuery::parse("Berlin").unwrap(), name("Berlin", None));
    }

    #[test]
    fn parses_multi_word_name() {
        assert_eq!(
            LocationQuery::parse("  New York  ").unwrap(),
            name("New York", None)
        );
    }

    #[test]
    fn parses_name_with_qualifier() {
        assert_eq!(
            LocationQuery::parse("Springfield, Illinois").unwrap(),
            name("Springfield", Some("Illinois"))
        );
    }

    #[test]
    fn only_first_comma_splits() {
        assert_eq!(
            LocationQuery::parse("Portland, Oregon, US").unwrap(),
            name("Portland", Some("Oregon, US"))
        );
    }

    #[test]
    fn trailing_comma_has_no_qualifier() {
        assert_eq!(LocationQuery::parse("Paris,").unwrap(), name("Paris", None));
    }

    #[test]
    fn parses_coordinates() {
        let query = LocationQuery::parse("52.52, 13.405").unwrap();
        let LocationQuery::Coordinates(location) = query else {
            unreachable!("expected coordinates");
        };
        assert!((location.latitude() - 52.52).abs() < f64::EPSILON);
        assert!((location.longitude() - 13.405).abs() < f64::EPSILON);
    }

    #[test]
    fn negative_coordinates() {
        assert!(matches!(
            LocationQuery::parse("-33.87,151.21").unwrap(),
            LocationQuery::Coordinates(_)
        ));
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        assert!(matches!(
            LocationQuery::parse("123.0,10.0"),
            Err(DomainError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            LocationQuery::parse(""),
            Err(DomainError::InvalidLocationQuery(_))
        ));
        assert!(matches!(
            LocationQuery::parse("   "),
            Err(DomainError::InvalidLocationQuery(_))
        ));
    }

    #[test]
    fn missing_name_is_rejected() {
        assert!(matches!(
            LocationQuery::parse(", Germany"),
            Err(DomainError::InvalidLocationQuery(_))
        ));
    }

    #[test]
    fn display_round_trips_names() {
        assert_eq!(name("Paris", Some("US")).to_string(), "Paris, US");
        assert_eq!(name("Oslo", None).to_string(), "Oslo");
    }

    proptest! {
        #[test]
        fn numeric_pairs_in_range_are_coordinates(
            lat in -90.0f64..=90.0,
            lon in -180.0f64..=180.0,
        ) {
            let query = LocationQuery::parse(&format!("{lat},{lon}")).unwrap();
            prop_assert!(matches!(query, LocationQuery::Coordinates(_)));
        }

        #[test]
        fn alphabetic_names_are_names(input in "[A-Za-z][A-Za-z ]{0,30}") {
            let query = LocationQuery::parse(&input).unwrap();
            let is_name = matches!(query, LocationQuery::Name { .. });
            prop_assert!(is_name);
        }
    }
}

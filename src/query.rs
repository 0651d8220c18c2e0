//! Parsing of the genotype query parameters.
//!
//! A genotype request names its coordinates in exactly one of two forms:
//!
//! - `locations=CHR:POS[,CHR:POS...]` - discrete 1-based positions
//! - `range=CHR:START-END` - one inclusive 1-based range
//!
//! Both are parsed into [`Location`] values; the form used is kept in the
//! [`Query`] variant because it changes how results may be rendered.

use crate::location::Location;
use crate::{Error, Result};

pub const BOTH_PARAMS_PRESENT: &str = "Invalid query param. Both locations and range params found.";
pub const NO_PARAMS_PRESENT: &str = "No valid query params found.";
pub const INVALID_LOCATIONS: &str = "Invalid locations";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Ordered single-base locations; order determines result alignment.
    LocationList(Vec<Location>),
    Range(Location),
}

impl Query {
    /// Parse the raw `locations` and `range` parameters. Empty strings are
    /// treated as absent.
    pub fn parse(locations: Option<&str>, range: Option<&str>) -> Result<Self> {
        let locations = locations.filter(|s| !s.is_empty());
        let range = range.filter(|s| !s.is_empty());

        match (locations, range) {
            (Some(_), Some(_)) => Err(Error::validation(BOTH_PARAMS_PRESENT)),
            (None, None) => Err(Error::validation(NO_PARAMS_PRESENT)),
            (Some(list), None) => parse_location_list(list).map(Query::LocationList),
            (None, Some(range)) => parse_range(range).map(Query::Range),
        }
    }

    pub fn locations(&self) -> &[Location] {
        match self {
            Query::LocationList(locations) => locations,
            Query::Range(location) => std::slice::from_ref(location),
        }
    }

    pub fn is_range(&self) -> bool {
        matches!(self, Query::Range(_))
    }
}

fn parse_location_list(param: &str) -> Result<Vec<Location>> {
    param
        .split(',')
        .map(|entry| {
            let (chromosome, position) =
                split_pair(entry, ':').ok_or_else(|| Error::validation(INVALID_LOCATIONS))?;
            Location::from_point(chromosome, parse_coordinate(position)?)
        })
        .collect()
}

fn parse_range(param: &str) -> Result<Location> {
    let (chromosome, span) =
        split_pair(param, ':').ok_or_else(|| Error::validation(INVALID_LOCATIONS))?;
    let (start, end) = split_pair(span, '-').ok_or_else(|| Error::validation(INVALID_LOCATIONS))?;

    let start = parse_coordinate(start)?;
    let end = parse_coordinate(end)?;
    Location::from_range(chromosome, start, end)
}

/// Split into exactly two fields; `None` if the separator count is not one.
fn split_pair(s: &str, sep: char) -> Option<(&str, &str)> {
    let mut fields = s.split(sep);
    match (fields.next(), fields.next(), fields.next()) {
        (Some(first), Some(second), None) => Some((first, second)),
        _ => None,
    }
}

fn parse_coordinate(value: &str) -> Result<u64> {
    value.parse::<u64>().map_err(|e| Error::parse(value, e))
}

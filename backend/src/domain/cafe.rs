//! Café listings and their amenity vocabulary.
//!
//! Amenity answers and seat buckets are closed sets. They are persisted as the
//! exact labels users pick in the form (`Yes`, `10-20`, ...) so stored rows
//! stay readable without the enum.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::user::UserId;

/// Validation errors for café attributes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CafeValidationError {
    /// Identifiers are positive database keys.
    #[error("cafe id must be positive, got {0}")]
    NonPositiveId(i32),
    /// A yes/no amenity held something else.
    #[error("'{0}' is not a valid choice; expected Yes or No")]
    UnknownAmenity(String),
    /// The seat bucket is not one of the offered ranges.
    #[error("'{0}' is not a valid choice; expected one of 0-10, 10-20, 20-30, 30-40, 50+")]
    UnknownSeatRange(String),
    /// A required text attribute was blank.
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
}

/// Stable numeric café identifier assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct CafeId(i32);

impl CafeId {
    /// Validate and wrap a raw key.
    pub fn new(raw: i32) -> Result<Self, CafeValidationError> {
        if raw <= 0 {
            return Err(CafeValidationError::NonPositiveId(raw));
        }
        Ok(Self(raw))
    }

    /// Raw key value.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for CafeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<i32> for CafeId {
    type Error = CafeValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CafeId> for i32 {
    fn from(value: CafeId) -> Self {
        value.0
    }
}

/// Answer to a yes/no amenity question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Amenity {
    Yes,
    No,
}

impl Amenity {
    /// Every allowed answer, in form order.
    pub const CHOICES: [Self; 2] = [Self::Yes, Self::No];

    /// Stored label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

impl FromStr for Amenity {
    type Err = CafeValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::CHOICES
            .into_iter()
            .find(|choice| choice.as_str() == s)
            .ok_or_else(|| CafeValidationError::UnknownAmenity(s.to_owned()))
    }
}

impl TryFrom<String> for Amenity {
    type Error = CafeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Amenity> for String {
    fn from(value: Amenity) -> Self {
        value.as_str().to_owned()
    }
}

/// Bucketed seat capacity.
///
/// The buckets skip 40-50; that gap is part of the established vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SeatRange {
    UpToTen,
    TenToTwenty,
    TwentyToThirty,
    ThirtyToForty,
    FiftyPlus,
}

impl SeatRange {
    /// Every allowed bucket, in form order.
    pub const CHOICES: [Self; 5] = [
        Self::UpToTen,
        Self::TenToTwenty,
        Self::TwentyToThirty,
        Self::ThirtyToForty,
        Self::FiftyPlus,
    ];

    /// Stored label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UpToTen => "0-10",
            Self::TenToTwenty => "10-20",
            Self::TwentyToThirty => "20-30",
            Self::ThirtyToForty => "30-40",
            Self::FiftyPlus => "50+",
        }
    }
}

impl FromStr for SeatRange {
    type Err = CafeValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::CHOICES
            .into_iter()
            .find(|choice| choice.as_str() == s)
            .ok_or_else(|| CafeValidationError::UnknownSeatRange(s.to_owned()))
    }
}

impl TryFrom<String> for SeatRange {
    type Error = CafeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SeatRange> for String {
    fn from(value: SeatRange) -> Self {
        value.as_str().to_owned()
    }
}

/// Every mutable attribute of a café.
///
/// Used both to create a café and to overwrite one on edit; an edit replaces
/// all fields at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CafeDraft {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub has_wifi: Amenity,
    pub has_toilets: Amenity,
    pub has_sockets: Amenity,
    pub can_take_calls: Amenity,
    pub seats: SeatRange,
    pub coffee_price: String,
}

impl CafeDraft {
    /// Check the free-text attributes are present.
    ///
    /// Enumerated attributes are already valid by construction.
    pub fn validate(&self) -> Result<(), CafeValidationError> {
        let fields = [
            ("name", &self.name),
            ("map_url", &self.map_url),
            ("img_url", &self.img_url),
            ("location", &self.location),
            ("coffee_price", &self.coffee_price),
        ];
        match fields.into_iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(CafeValidationError::EmptyField { field }),
            None => Ok(()),
        }
    }
}

/// A persisted café.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cafe {
    pub id: CafeId,
    pub author_id: UserId,
    pub details: CafeDraft,
}

impl Cafe {
    pub fn name(&self) -> &str {
        &self.details.name
    }
}

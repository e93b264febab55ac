//! Reviews attached to a café.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::cafe::CafeId;
use super::user::UserId;

/// Validation errors for review attributes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewValidationError {
    #[error("review id must be positive, got {0}")]
    NonPositiveId(i32),
    #[error("review text must not be empty")]
    EmptyText,
}

/// Stable numeric review identifier assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct ReviewId(i32);

impl ReviewId {
    pub fn new(raw: i32) -> Result<Self, ReviewValidationError> {
        if raw <= 0 {
            return Err(ReviewValidationError::NonPositiveId(raw));
        }
        Ok(Self(raw))
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<i32> for ReviewId {
    type Error = ReviewValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ReviewId> for i32 {
    fn from(value: ReviewId) -> Self {
        value.0
    }
}

/// Review body as submitted by the rich-text editor.
///
/// The markup is stored verbatim; only an all-whitespace body is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewText(String);

impl ReviewText {
    /// # Examples
    /// ```
    /// use cafe_directory::domain::ReviewText;
    ///
    /// let text = ReviewText::new("<p>Great <b>flat white</b></p>").unwrap();
    /// assert_eq!(text.as_str(), "<p>Great <b>flat white</b></p>");
    /// assert!(ReviewText::new(" \n").is_err());
    /// ```
    pub fn new(raw: impl Into<String>) -> Result<Self, ReviewValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ReviewValidationError::EmptyText);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A persisted review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: ReviewId,
    pub cafe_id: CafeId,
    pub author_id: UserId,
    pub text: ReviewText,
}

/// Insert payload for a review; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub cafe_id: CafeId,
    pub author_id: UserId,
    pub text: ReviewText,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn text_keeps_surrounding_markup_whitespace() {
        let text = ReviewText::new("  <p>cosy</p>\n").expect("valid text");
        assert_eq!(text.as_str(), "  <p>cosy</p>\n");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_text_is_rejected(#[case] raw: &str) {
        assert_eq!(ReviewText::new(raw), Err(ReviewValidationError::EmptyText));
    }
}

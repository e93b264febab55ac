//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer. Conversions into domain
//! records validate stored values, so a corrupt row surfaces as a query error
//! rather than a panic.

use diesel::prelude::*;

use crate::domain::{
    Cafe, CafeDraft, CafeId, CafeValidationError, EmailAddress, PasswordDigest, Review, ReviewId,
    ReviewText, ReviewValidationError, User, UserId, UserValidationError,
};

use super::schema::{cafe, reviews, users};

/// Failure converting a stored row into a domain record.
#[derive(Debug, thiserror::Error)]
pub(crate) enum RowConversionError {
    #[error("invalid user row: {0}")]
    User(#[from] UserValidationError),
    #[error("invalid cafe row: {0}")]
    Cafe(#[from] CafeValidationError),
    #[error("invalid review row: {0}")]
    Review(#[from] ReviewValidationError),
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub email: String,
    pub password: String,
    pub name: String,
    pub city: String,
}

impl TryFrom<UserRow> for User {
    type Error = RowConversionError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User::new(
            UserId::new(row.id)?,
            EmailAddress::new(&row.email)?,
            row.name,
            row.city,
            PasswordDigest::from_stored(row.password),
        )?)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub name: &'a str,
    pub city: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cafe)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CafeRow {
    pub id: i32,
    pub author_id: i32,
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub has_sockets: String,
    pub has_toilets: String,
    pub has_wifi: String,
    pub can_take_calls: String,
    pub seats: String,
    pub coffee_price: String,
}

impl TryFrom<CafeRow> for Cafe {
    type Error = RowConversionError;

    fn try_from(row: CafeRow) -> Result<Self, Self::Error> {
        Ok(Cafe {
            id: CafeId::new(row.id)?,
            author_id: UserId::new(row.author_id)?,
            details: CafeDraft {
                name: row.name,
                map_url: row.map_url,
                img_url: row.img_url,
                location: row.location,
                has_wifi: row.has_wifi.parse()?,
                has_toilets: row.has_toilets.parse()?,
                has_sockets: row.has_sockets.parse()?,
                can_take_calls: row.can_take_calls.parse()?,
                seats: row.seats.parse()?,
                coffee_price: row.coffee_price,
            },
        })
    }
}

/// Mutable café columns, shared by insert and full-overwrite update.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = cafe)]
pub(crate) struct CafeChanges<'a> {
    pub name: &'a str,
    pub map_url: &'a str,
    pub img_url: &'a str,
    pub location: &'a str,
    pub has_sockets: &'a str,
    pub has_toilets: &'a str,
    pub has_wifi: &'a str,
    pub can_take_calls: &'a str,
    pub seats: &'a str,
    pub coffee_price: &'a str,
}

impl<'a> From<&'a CafeDraft> for CafeChanges<'a> {
    fn from(draft: &'a CafeDraft) -> Self {
        Self {
            name: &draft.name,
            map_url: &draft.map_url,
            img_url: &draft.img_url,
            location: &draft.location,
            has_sockets: draft.has_sockets.as_str(),
            has_toilets: draft.has_toilets.as_str(),
            has_wifi: draft.has_wifi.as_str(),
            can_take_calls: draft.can_take_calls.as_str(),
            seats: draft.seats.as_str(),
            coffee_price: &draft.coffee_price,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = cafe)]
pub(crate) struct NewCafeRow<'a> {
    pub author_id: i32,
    #[diesel(embed)]
    pub changes: CafeChanges<'a>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReviewRow {
    pub id: i32,
    pub author_id: i32,
    pub cafe_id: i32,
    pub text: String,
}

impl TryFrom<ReviewRow> for Review {
    type Error = RowConversionError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        Ok(Review {
            id: ReviewId::new(row.id)?,
            cafe_id: CafeId::new(row.cafe_id)?,
            author_id: UserId::new(row.author_id)?,
            text: ReviewText::new(row.text)?,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reviews)]
pub(crate) struct NewReviewRow<'a> {
    pub author_id: i32,
    pub cafe_id: i32,
    pub text: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Amenity, SeatRange};
    use rstest::rstest;

    fn cafe_row(seats: &str) -> CafeRow {
        CafeRow {
            id: 3,
            author_id: 1,
            name: "Blue Cup".into(),
            map_url: "https://maps.example/3".into(),
            img_url: "https://img.example/3.jpg".into(),
            location: "Soho".into(),
            has_sockets: "No".into(),
            has_toilets: "Yes".into(),
            has_wifi: "Yes".into(),
            can_take_calls: "No".into(),
            seats: seats.into(),
            coffee_price: "£2.50".into(),
        }
    }

    #[rstest]
    fn cafe_row_maps_stored_labels() {
        let cafe = Cafe::try_from(cafe_row("50+")).expect("valid row");
        assert_eq!(cafe.details.has_wifi, Amenity::Yes);
        assert_eq!(cafe.details.has_sockets, Amenity::No);
        assert_eq!(cafe.details.seats, SeatRange::FiftyPlus);
    }

    #[rstest]
    fn unknown_stored_label_is_a_conversion_error() {
        let err = Cafe::try_from(cafe_row("lots")).expect_err("bad seats");
        assert!(matches!(err, RowConversionError::Cafe(_)));
    }

    #[rstest]
    fn changeset_uses_stored_labels() {
        let cafe = Cafe::try_from(cafe_row("0-10")).expect("valid row");
        let changes = CafeChanges::from(&cafe.details);
        assert_eq!(changes.seats, "0-10");
        assert_eq!(changes.has_toilets, "Yes");
    }
}

//! JSON view models handed to page templates.
//!
//! Every page carries the current user and the drained flash notices, with
//! page specific data flattened alongside.

use serde::Serialize;

use crate::domain::ports::{CafeDetail, ReviewEntry};
use crate::domain::{Amenity, Cafe, CafeDraft, Identity, SeatRange, User};

/// Logged-in user summary shown in page chrome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserView {
    pub id: i32,
    pub name: String,
    pub is_admin: bool,
}

impl From<&User> for CurrentUserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().get(),
            name: user.name().to_owned(),
            is_admin: crate::domain::is_admin_id(user.id()),
        }
    }
}

/// Envelope shared by every page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub current_user: Option<CurrentUserView>,
    pub notices: Vec<String>,
    #[serde(flatten)]
    pub body: T,
}

impl<T> Page<T> {
    pub fn new(identity: &Identity, notices: Vec<String>, body: T) -> Self {
        Self {
            current_user: identity.user().map(CurrentUserView::from),
            notices,
            body,
        }
    }
}

/// Body for pages with nothing beyond the shared envelope.
#[derive(Debug, Serialize)]
pub struct Empty {}

/// `/about` and `/contact`.
#[derive(Debug, Serialize)]
pub struct StaticPage {
    pub title: &'static str,
}

/// Café fields as shown in lists and forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CafeView {
    pub id: i32,
    #[serde(flatten)]
    pub details: CafeDraft,
}

impl From<&Cafe> for CafeView {
    fn from(cafe: &Cafe) -> Self {
        Self {
            id: cafe.id.get(),
            details: cafe.details.clone(),
        }
    }
}

/// `/` body.
#[derive(Debug, Serialize)]
pub struct CafeList {
    pub cafes: Vec<CafeView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailCafeView {
    #[serde(flatten)]
    pub cafe: CafeView,
    pub author_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    pub id: i32,
    pub text: String,
    pub author_name: String,
}

impl From<ReviewEntry> for ReviewView {
    fn from(entry: ReviewEntry) -> Self {
        Self {
            id: entry.review.id.get(),
            text: entry.review.text.as_str().to_owned(),
            author_name: entry.author_name,
        }
    }
}

/// `/cafe/{id}` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CafeDetailView {
    pub cafe: DetailCafeView,
    pub reviews: Vec<ReviewView>,
    pub can_edit: bool,
    pub can_delete: bool,
}

impl CafeDetailView {
    pub fn new(detail: CafeDetail, identity: &Identity) -> Self {
        Self {
            cafe: DetailCafeView {
                cafe: CafeView::from(&detail.cafe),
                author_name: detail.author_name,
            },
            reviews: detail.reviews.into_iter().map(ReviewView::from).collect(),
            can_edit: identity.is_authenticated(),
            can_delete: identity.is_admin(),
        }
    }
}

/// Allowed values for the enumerated café fields.
#[derive(Debug, Serialize)]
pub struct CafeChoices {
    pub amenity: Vec<&'static str>,
    pub seats: Vec<&'static str>,
}

impl Default for CafeChoices {
    fn default() -> Self {
        Self {
            amenity: Amenity::CHOICES.iter().map(|c| c.as_str()).collect(),
            seats: SeatRange::CHOICES.iter().map(|c| c.as_str()).collect(),
        }
    }
}

/// `/add` and `/edit-cafe/{id}` body.
#[derive(Debug, Serialize)]
pub struct CafeFormPage {
    /// Current values; `None` on the add page.
    pub form: Option<CafeView>,
    pub choices: CafeChoices,
}

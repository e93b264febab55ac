//! Urlencoded form bodies and their validation.
//!
//! Every field binds as optional text so a missing field is reported next to
//! the others instead of as an extractor rejection. Validation only checks
//! shape; uniqueness is left to the services.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    Amenity, CafeDraft, CafeValidationError, CredentialsValidationError, EmailAddress, Error,
    LoginCredentials, Registration, ReviewText, SeatRange, UserValidationError,
};

const USER_FIELD_MAX: usize = 100;
const CAFE_FIELD_MAX: usize = 250;

/// Per-field validation messages keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<&'static str, Vec<String>>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded against `field`.
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }

    /// Trimmed, non-blank text no longer than `max` characters.
    fn text(&mut self, field: &'static str, raw: Option<String>, max: usize) -> Option<String> {
        let value = raw.as_deref().map(str::trim).unwrap_or_default();
        if value.is_empty() {
            self.push(field, "This field is required.");
            return None;
        }
        if value.chars().count() > max {
            self.push(field, format!("Must be at most {max} characters."));
            return None;
        }
        Some(value.to_owned())
    }

    /// Non-empty secret kept exactly as typed.
    fn secret(&mut self, field: &'static str, raw: Option<String>) -> Option<String> {
        match raw {
            Some(value) if !value.is_empty() => Some(value),
            _ => {
                self.push(field, "This field is required.");
                None
            }
        }
    }

    fn email(&mut self, field: &'static str, raw: Option<String>) -> Option<String> {
        let value = self.text(field, raw, USER_FIELD_MAX)?;
        match EmailAddress::new(&value) {
            Ok(_) => Some(value),
            Err(err) => {
                self.push(field, err.to_string());
                None
            }
        }
    }

    fn choice<T>(&mut self, field: &'static str, raw: Option<String>) -> Option<T>
    where
        T: FromStr<Err = CafeValidationError>,
    {
        let value = self.text(field, raw, CAFE_FIELD_MAX)?;
        match value.parse() {
            Ok(choice) => Some(choice),
            Err(err) => {
                self.push(field, err.to_string());
                None
            }
        }
    }

    fn from_credentials(err: CredentialsValidationError) -> Self {
        let field = match &err {
            CredentialsValidationError::EmptyPassword => "password",
            CredentialsValidationError::User(user) => match user {
                UserValidationError::EmptyEmail | UserValidationError::MalformedEmail => "email",
                UserValidationError::EmptyName => "name",
                UserValidationError::EmptyCity => "city",
                UserValidationError::NonPositiveId(_) => "form",
            },
        };
        Self::single(field, err.to_string())
    }

    /// Convert into the `400 invalid_request` envelope.
    pub fn into_error(self) -> Error {
        Error::invalid_request("Please correct the highlighted fields.")
            .with_details(json!({ "fields": self }))
    }
}

impl From<FormErrors> for Error {
    fn from(value: FormErrors) -> Self {
        value.into_error()
    }
}

/// `POST /register` body.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterForm {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub city: Option<String>,
}

impl RegisterForm {
    pub fn validate(self) -> Result<Registration, FormErrors> {
        let mut errors = FormErrors::default();
        let email = errors.email("email", self.email);
        let password = errors.secret("password", self.password);
        let name = errors.text("name", self.name, USER_FIELD_MAX);
        let city = errors.text("city", self.city, USER_FIELD_MAX);
        let (Some(email), Some(password), Some(name), Some(city)) = (email, password, name, city)
        else {
            return Err(errors);
        };
        Registration::try_from_parts(&email, &password, &name, &city)
            .map_err(FormErrors::from_credentials)
    }
}

/// `POST /login` body.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginForm {
    pub fn validate(self) -> Result<LoginCredentials, FormErrors> {
        let mut errors = FormErrors::default();
        let email = errors.email("email", self.email);
        let password = errors.secret("password", self.password);
        let (Some(email), Some(password)) = (email, password) else {
            return Err(errors);
        };
        LoginCredentials::try_from_parts(&email, &password).map_err(FormErrors::from_credentials)
    }
}

/// `POST /add` and `POST /edit-cafe/{id}` body.
#[derive(Debug, Default, Deserialize)]
pub struct CafeForm {
    pub name: Option<String>,
    pub map_url: Option<String>,
    pub img_url: Option<String>,
    pub location: Option<String>,
    pub wifi: Option<String>,
    pub toilet: Option<String>,
    pub sockets: Option<String>,
    pub seats: Option<String>,
    pub calls: Option<String>,
    pub price: Option<String>,
}

impl CafeForm {
    pub fn validate(self) -> Result<CafeDraft, FormErrors> {
        let mut errors = FormErrors::default();
        let name = errors.text("name", self.name, CAFE_FIELD_MAX);
        let map_url = errors.text("map_url", self.map_url, CAFE_FIELD_MAX);
        let img_url = errors.text("img_url", self.img_url, CAFE_FIELD_MAX);
        let location = errors.text("location", self.location, CAFE_FIELD_MAX);
        let has_wifi = errors.choice::<Amenity>("wifi", self.wifi);
        let has_toilets = errors.choice::<Amenity>("toilet", self.toilet);
        let has_sockets = errors.choice::<Amenity>("sockets", self.sockets);
        let seats = errors.choice::<SeatRange>("seats", self.seats);
        let can_take_calls = errors.choice::<Amenity>("calls", self.calls);
        let coffee_price = errors.text("price", self.price, CAFE_FIELD_MAX);
        let (
            Some(name),
            Some(map_url),
            Some(img_url),
            Some(location),
            Some(has_wifi),
            Some(has_toilets),
            Some(has_sockets),
            Some(seats),
            Some(can_take_calls),
            Some(coffee_price),
        ) = (
            name,
            map_url,
            img_url,
            location,
            has_wifi,
            has_toilets,
            has_sockets,
            seats,
            can_take_calls,
            coffee_price,
        )
        else {
            return Err(errors);
        };
        Ok(CafeDraft {
            name,
            map_url,
            img_url,
            location,
            has_wifi,
            has_toilets,
            has_sockets,
            can_take_calls,
            seats,
            coffee_price,
        })
    }
}

/// `POST /cafe/{id}` body.
#[derive(Debug, Default, Deserialize)]
pub struct ReviewForm {
    pub review_text: Option<String>,
}

impl ReviewForm {
    /// The body is kept verbatim; only blank submissions are rejected.
    pub fn validate(self) -> Result<ReviewText, FormErrors> {
        let raw = self.review_text.unwrap_or_default();
        ReviewText::new(raw)
            .map_err(|_| FormErrors::single("review_text", "This field is required."))
    }
}

//! User - A platform participant
//!
//! User is an Entity: the same `UserId` is the same person even after the
//! profile is edited. Credentials are not part of the domain; registration
//! only checks that the password and its confirmation agree.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::UserId;
use crate::error::{DomainError, DomainResult};

pub const MAX_BIO_LEN: usize = 500;
pub const MAX_PHONE_LEN: usize = 15;
pub const MAX_LOCATION_LEN: usize = 100;

/// Registration form submitted by a new user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
}

impl Registration {
    /// Field-level validation of the form
    pub fn validate(&self, min_password_len: usize) -> DomainResult<()> {
        if self.username.trim().is_empty() {
            return Err(DomainError::validation("username", "This field is required."));
        }
        validate_email(&self.email)?;
        if self.first_name.trim().is_empty() {
            return Err(DomainError::validation("first_name", "This field is required."));
        }
        if self.last_name.trim().is_empty() {
            return Err(DomainError::validation("last_name", "This field is required."));
        }
        if self.password != self.password_confirmation {
            return Err(DomainError::validation(
                "password",
                "Password fields didn't match.",
            ));
        }
        if self.password.chars().count() < min_password_len {
            return Err(DomainError::validation(
                "password",
                format!(
                    "This password is too short. It must contain at least {} characters.",
                    min_password_len
                ),
            ));
        }
        validate_profile_text(&self.bio, &self.location, &self.phone_number)
    }
}

/// Partial profile edit; `None` leaves the field untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

/// A platform participant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    bio: String,
    location: String,
    phone_number: String,
    date_of_birth: Option<NaiveDate>,
    is_email_verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a user from an already validated registration
    pub fn register(form: Registration, now: DateTime<Utc>) -> Self {
        Self {
            id: UserId::generate(),
            username: form.username.trim().to_string(),
            email: form.email.trim().to_lowercase(),
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            bio: form.bio,
            location: form.location,
            phone_number: form.phone_number,
            date_of_birth: form.date_of_birth,
            is_email_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn bio(&self) -> &str {
        &self.bio
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn date_of_birth(&self) -> Option<NaiveDate> {
        self.date_of_birth
    }

    pub fn is_email_verified(&self) -> bool {
        self.is_email_verified
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // ========== Mutations ==========

    pub fn update_profile(&mut self, update: ProfileUpdate, now: DateTime<Utc>) -> DomainResult<()> {
        validate_profile_text(
            update.bio.as_deref().unwrap_or(&self.bio),
            update.location.as_deref().unwrap_or(&self.location),
            update.phone_number.as_deref().unwrap_or(&self.phone_number),
        )?;

        for (field, value) in [("first_name", &update.first_name), ("last_name", &update.last_name)] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(DomainError::validation(field, "This field may not be blank."));
            }
        }

        if let Some(first_name) = update.first_name {
            self.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name.trim().to_string();
        }
        if let Some(bio) = update.bio {
            self.bio = bio;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(phone_number) = update.phone_number {
            self.phone_number = phone_number;
        }
        if update.date_of_birth.is_some() {
            self.date_of_birth = update.date_of_birth;
        }
        self.updated_at = now;
        Ok(())
    }

    pub fn verify_email(&mut self, now: DateTime<Utc>) {
        self.is_email_verified = true;
        self.updated_at = now;
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        // Entity equality: same ID = same entity
        self.id == other.id
    }
}

impl Eq for User {}

fn validate_email(email: &str) -> DomainResult<()> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(DomainError::validation("email", "Enter a valid email address."))
    }
}

fn validate_profile_text(bio: &str, location: &str, phone_number: &str) -> DomainResult<()> {
    if bio.chars().count() > MAX_BIO_LEN {
        return Err(DomainError::validation(
            "bio",
            format!("Ensure this field has no more than {} characters.", MAX_BIO_LEN),
        ));
    }
    if location.chars().count() > MAX_LOCATION_LEN {
        return Err(DomainError::validation(
            "location",
            format!("Ensure this field has no more than {} characters.", MAX_LOCATION_LEN),
        ));
    }
    if phone_number.chars().count() > MAX_PHONE_LEN {
        return Err(DomainError::validation(
            "phone_number",
            format!("Ensure this field has no more than {} characters.", MAX_PHONE_LEN),
        ));
    }
    Ok(())
}

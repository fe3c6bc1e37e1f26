// ABOUTME: User profile service with get-or-create and partial updates
// ABOUTME: Updates merge supplied fields into the stored profile and upsert it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::database::{Collection, Document, DocumentStore};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::generation::Clock;
use crate::models::{DietaryPreference, FitnessGoal, UserProfile};

/// Fields a profile update may set; absent fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// Contact email
    pub email: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Avatar URL
    pub picture: Option<String>,
    /// Age in years
    pub age: Option<u32>,
    /// Height
    pub height: Option<f64>,
    /// Current weight
    pub weight: Option<f64>,
    /// Goal weight
    pub target_weight: Option<f64>,
    /// Preferred training goal
    pub fitness_goal: Option<FitnessGoal>,
    /// Preferred diet
    pub dietary_preference: Option<DietaryPreference>,
    /// Proteins offered first when generating meals
    pub preferred_proteins: Option<Vec<String>>,
}

impl ProfileUpdate {
    /// Reject malformed values
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the first offending field
    pub fn validate(&self) -> AppResult<()> {
        if let Some(email) = &self.email {
            let well_formed = email
                .split_once('@')
                .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
            if !well_formed {
                return Err(field_error("email", "email must be a valid address"));
            }
        }
        if let Some(picture) = &self.picture {
            if !(picture.starts_with("https://") || picture.starts_with("http://")) {
                return Err(field_error("picture", "picture must be an http(s) URL"));
            }
        }
        for (field, value) in [
            ("height", self.height),
            ("weight", self.weight),
            ("targetWeight", self.target_weight),
        ] {
            if let Some(value) = value {
                if !value.is_finite() || value <= 0.0 {
                    return Err(field_error(field, &format!("{field} must be positive")));
                }
            }
        }
        Ok(())
    }

    fn apply(self, profile: &mut UserProfile) {
        if let Some(email) = self.email {
            profile.email = email;
        }
        if self.name.is_some() {
            profile.name = self.name;
        }
        if self.picture.is_some() {
            profile.picture = self.picture;
        }
        if self.age.is_some() {
            profile.age = self.age;
        }
        if self.height.is_some() {
            profile.height = self.height;
        }
        if self.weight.is_some() {
            profile.weight = self.weight;
        }
        if self.target_weight.is_some() {
            profile.target_weight = self.target_weight;
        }
        if self.fitness_goal.is_some() {
            profile.fitness_goal = self.fitness_goal;
        }
        if self.dietary_preference.is_some() {
            profile.dietary_preference = self.dietary_preference;
        }
        if let Some(proteins) = self.preferred_proteins {
            profile.preferred_proteins = proteins;
        }
    }
}

fn field_error(field: &str, message: &str) -> AppError {
    AppError::invalid_input(message).with_details(serde_json::json!({ "field": field }))
}

/// User profile operations
#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
}

impl ProfileService {
    /// Create the service
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// The user's profile, created empty on first access
    ///
    /// # Errors
    ///
    /// Returns a database or serialization error
    pub async fn get_or_create(&self, user_id: &str) -> AppResult<UserProfile> {
        if let Some(document) = self.store.read(Collection::Users, user_id, user_id).await? {
            return document.into_entity();
        }

        let profile = UserProfile::new_default(user_id, self.clock.now());
        let document = Document::from_entity(
            Collection::Users,
            user_id,
            user_id,
            profile.created_at,
            &profile,
        )?;
        match self.store.create(document).await {
            Ok(_) => {
                info!(user_id, "Created default user profile");
                Ok(profile)
            }
            // Lost a race with a concurrent first access
            Err(e) if e.code == ErrorCode::ResourceAlreadyExists => {
                super::load(self.store.as_ref(), Collection::Users, user_id, user_id).await
            }
            Err(e) => Err(e),
        }
    }

    /// Merge the supplied fields into the profile
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for malformed fields, or a database error
    pub async fn update(&self, user_id: &str, update: ProfileUpdate) -> AppResult<UserProfile> {
        update.validate()?;

        let mut profile = self.get_or_create(user_id).await?;
        update.apply(&mut profile);
        profile.updated_at = self.clock.now();

        let document = Document::from_entity(
            Collection::Users,
            user_id,
            user_id,
            profile.created_at,
            &profile,
        )?;
        self.store.upsert(document).await?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_validation() {
        assert!(ProfileUpdate::default().validate().is_ok());
        let bad_email = ProfileUpdate {
            email: Some("nobody".to_owned()),
            ..ProfileUpdate::default()
        };
        assert!(bad_email.validate().is_err());
        let bad_weight = ProfileUpdate {
            weight: Some(-70.0),
            ..ProfileUpdate::default()
        };
        assert!(bad_weight.validate().is_err());
        let ok = ProfileUpdate {
            email: Some("runner@example.com".to_owned()),
            picture: Some("https://example.com/me.png".to_owned()),
            ..ProfileUpdate::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_apply_keeps_absent_fields() {
        let now = chrono::Utc::now();
        let mut profile = UserProfile::new_default("u", now);
        profile.name = Some("Sam".to_owned());
        ProfileUpdate {
            age: Some(31),
            ..ProfileUpdate::default()
        }
        .apply(&mut profile);
        assert_eq!(profile.name.as_deref(), Some("Sam"));
        assert_eq!(profile.age, Some(31));
    }
}

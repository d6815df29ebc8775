//! Submission form binding and validation.
//!
//! Validation runs entirely locally; no network call is attempted for a form
//! that fails here. Both consent flags must be explicitly true.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::constants::DEFAULT_AGE_RESTRICTION;
use crate::models::{parse_tags, Category, ContentType};

/// Current user as supplied by the authentication collaborator.
///
/// The core never verifies identity; it only carries the display name into
/// the `contributor` field when the form leaves it blank.
#[derive(Debug, Clone)]
pub struct Session {
    pub display_name: String,
}

impl Session {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
        }
    }
}

fn accepted(value: &bool) -> Result<(), ValidationError> {
    if *value {
        Ok(())
    } else {
        let mut err = ValidationError::new("accepted");
        err.message = Some("El consentimiento es obligatorio".into());
        Err(err)
    }
}

fn default_age_restriction() -> String {
    DEFAULT_AGE_RESTRICTION.to_string()
}

/// Raw contribution form as bound from the page.
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
pub struct SubmissionForm {
    #[validate(length(min = 1, message = "El título es obligatorio"))]
    pub title: String,
    #[serde(default)]
    pub shuar_title: String,
    #[validate(length(min = 1, message = "La descripción es obligatoria"))]
    pub description: String,
    #[serde(default)]
    pub shuar_description: String,
    #[validate(required(message = "La categoría es obligatoria"))]
    pub category: Option<Category>,
    pub content_type: ContentType,
    /// Comma-separated free text, parsed into ordered tags on submit.
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub contributor: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub cultural_importance: String,
    #[serde(default = "default_age_restriction")]
    pub age_restriction: String,
    /// The submitter confirms they have the right to share the material.
    #[validate(custom(function = accepted))]
    pub permissions: bool,
    /// The submitter confirms the material respects community norms.
    #[validate(custom(function = accepted))]
    pub respect: bool,
}

impl SubmissionForm {
    /// Validate the form and narrow it into its checked shape.
    pub fn into_validated(self) -> Result<ValidatedSubmission, ValidationErrors> {
        self.validate()?;
        let category = match self.category {
            Some(category) => category,
            // kept in sync with the `required` rule on the field
            None => {
                let mut errs = ValidationErrors::new();
                errs.add("category", ValidationError::new("required"));
                return Err(errs);
            }
        };

        Ok(ValidatedSubmission {
            title: self.title.trim().to_string(),
            shuar_title: none_if_blank(&self.shuar_title),
            description: self.description.trim().to_string(),
            shuar_description: none_if_blank(&self.shuar_description),
            category,
            content_type: self.content_type,
            tags: parse_tags(&self.tags),
            contributor: none_if_blank(&self.contributor),
            location: none_if_blank(&self.location),
            cultural_importance: none_if_blank(&self.cultural_importance),
            age_restriction: if self.age_restriction.trim().is_empty() {
                default_age_restriction()
            } else {
                self.age_restriction.trim().to_string()
            },
        })
    }
}

fn none_if_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// A submission form that passed validation: required fields populated,
/// consent flags confirmed, tags parsed.
#[derive(Debug, Clone)]
pub struct ValidatedSubmission {
    pub title: String,
    pub shuar_title: Option<String>,
    pub description: String,
    pub shuar_description: Option<String>,
    pub category: Category,
    pub content_type: ContentType,
    pub tags: Vec<String>,
    pub contributor: Option<String>,
    pub location: Option<String>,
    pub cultural_importance: Option<String>,
    pub age_restriction: String,
}

impl ValidatedSubmission {
    /// Resolve the contributor display name, falling back to the session.
    pub fn contributor_name(&self, session: &Session) -> String {
        self.contributor
            .clone()
            .unwrap_or_else(|| session.display_name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SubmissionForm {
        SubmissionForm {
            title: "El Origen del Fuego".to_string(),
            shuar_title: String::new(),
            description: "Cuento ancestral sobre el fuego.".to_string(),
            shuar_description: String::new(),
            category: Some(Category::History),
            content_type: ContentType::Audio,
            tags: "fuego, origen".to_string(),
            contributor: String::new(),
            location: String::new(),
            cultural_importance: String::new(),
            age_restriction: "all".to_string(),
            permissions: true,
            respect: true,
        }
    }

    #[test]
    fn test_valid_form_passes() {
        let validated = valid_form().into_validated().unwrap();
        assert_eq!(validated.tags, vec!["fuego", "origen"]);
        assert_eq!(validated.category, Category::History);
        assert_eq!(validated.shuar_title, None);
    }

    #[test]
    fn test_permissions_flag_must_be_true() {
        let mut form = valid_form();
        form.permissions = false;
        let errs = form.into_validated().unwrap_err();
        assert!(errs.field_errors().contains_key("permissions"));
    }

    #[test]
    fn test_respect_flag_must_be_true() {
        let mut form = valid_form();
        form.respect = false;
        assert!(form.into_validated().is_err());
    }

    #[test]
    fn test_missing_title_fails() {
        let mut form = valid_form();
        form.title = String::new();
        let errs = form.into_validated().unwrap_err();
        assert!(errs.field_errors().contains_key("title"));
    }

    #[test]
    fn test_missing_category_fails() {
        let mut form = valid_form();
        form.category = None;
        assert!(form.into_validated().is_err());
    }

    #[test]
    fn test_contributor_falls_back_to_session() {
        let validated = valid_form().into_validated().unwrap();
        let session = Session::new("Yawi Entsakua");
        assert_eq!(validated.contributor_name(&session), "Yawi Entsakua");
    }

    #[test]
    fn test_contributor_from_form_wins() {
        let mut form = valid_form();
        form.contributor = "Panki Kintia".to_string();
        let validated = form.into_validated().unwrap();
        let session = Session::new("Yawi Entsakua");
        assert_eq!(validated.contributor_name(&session), "Panki Kintia");
    }
}

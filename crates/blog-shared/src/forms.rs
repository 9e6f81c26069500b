//! Submitted forms and their validation rules.
//!
//! Every field defaults to an empty string so that a request missing a
//! field is reported through [`FormErrors`] instead of being rejected.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

pub const MAX_SENDER_NAME_LENGTH: u64 = 25;
pub const MAX_COMMENTER_NAME_LENGTH: u64 = 80;

const REQUIRED: &str = "This field is required.";

fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("required").with_message(REQUIRED.into()))
    } else {
        Ok(())
    }
}

/// "Email this post" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct EmailPostForm {
    #[serde(default)]
    #[validate(
        custom(function = "required"),
        length(max = MAX_SENDER_NAME_LENGTH, message = "Ensure this value has at most 25 characters.")
    )]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[serde(default)]
    #[validate(email(message = "Enter a valid email address."))]
    pub to: String,
    #[serde(default)]
    pub comments: String,
}

/// Comment submission form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CommentForm {
    #[serde(default)]
    #[validate(
        custom(function = "required"),
        length(max = MAX_COMMENTER_NAME_LENGTH, message = "Ensure this value has at most 80 characters.")
    )]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "required"))]
    pub body: String,
}

/// Error messages per form field, ready to be shown next to the inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    /// Run the form's validation rules.
    pub fn check<F: Validate>(form: &F) -> Result<(), FormErrors> {
        form.validate().map_err(FormErrors::from)
    }

    pub fn field(&self, name: &str) -> &[String] {
        self.0.get(name).map(Vec::as_slice).unwrap_or_default()
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = BTreeMap::new();
        for (field, errs) in errors.field_errors() {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            fields.insert(field.to_string(), messages);
        }
        Self(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn share(name: &str, email: &str, to: &str) -> EmailPostForm {
        EmailPostForm {
            name: name.to_string(),
            email: email.to_string(),
            to: to.to_string(),
            comments: String::new(),
        }
    }

    #[test]
    fn valid_share_form() {
        let form = share("Ann", "ann@example.com", "bob@example.com");
        assert!(FormErrors::check(&form).is_ok());
    }

    #[test]
    fn share_form_reports_each_bad_field() {
        let errors = FormErrors::check(&share("", "not-an-email", "bob@example.com")).unwrap_err();
        assert_eq!(errors.field("name"), [REQUIRED.to_string()]);
        assert_eq!(errors.field("email"), ["Enter a valid email address.".to_string()]);
        assert!(errors.field("to").is_empty());
        assert!(errors.field("comments").is_empty());
    }

    #[test]
    fn share_form_name_length() {
        let long = "a".repeat(MAX_SENDER_NAME_LENGTH as usize + 1);
        let errors = FormErrors::check(&share(&long, "a@b.com", "c@d.com")).unwrap_err();
        assert_eq!(errors.field("name").len(), 1);
    }

    #[test]
    fn comment_form_requires_body() {
        let form = CommentForm {
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            body: "   ".to_string(),
        };
        let errors = FormErrors::check(&form).unwrap_err();
        assert_eq!(errors.field("body"), [REQUIRED.to_string()]);
        assert!(errors.field("name").is_empty());
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let form: CommentForm = serde_json::from_str(r#"{"name":"Ann"}"#).unwrap();
        let errors = FormErrors::check(&form).unwrap_err();
        assert!(!errors.field("email").is_empty());
        assert!(!errors.field("body").is_empty());
    }
}

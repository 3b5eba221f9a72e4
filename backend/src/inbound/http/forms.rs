//! Product form payload and validation rule sets.
//!
//! The raw form deserialises with every field optional so a missing input
//! surfaces as a validation message instead of a deserialisation failure.
//! Unknown fields are ignored: only the allowlisted pair ever reaches a
//! [`ProductDraft`].

use serde::Deserialize;

use crate::domain::{ProductDetail, ProductDraft, ProductName, ProductValidationError};

pub(crate) const NAME_FIELD: &str = "name";
pub(crate) const DETAIL_FIELD: &str = "detail";

/// Raw `application/x-www-form-urlencoded` payload for create and update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductForm {
    /// Submitted name, if the input was present.
    pub name: Option<String>,
    /// Submitted detail, if the input was present.
    pub detail: Option<String>,
}

/// One message for one failing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    field: &'static str,
    message: String,
}

impl FieldError {
    /// The field the message belongs to.
    pub fn field(&self) -> &str {
        self.field
    }

    /// Human-readable message for the field.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Per-field validation messages collected for a form re-render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, error: &ProductValidationError) {
        self.errors.push(FieldError {
            field,
            message: error.to_string(),
        });
    }

    /// Whether any field failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// First message recorded for the named field, if any.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == name)
            .map(FieldError::message)
    }

    /// Iterate all collected messages in field order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }
}

fn check_name(raw: Option<&str>, errors: &mut ValidationErrors) -> Option<ProductName> {
    match ProductName::new(raw.unwrap_or_default()) {
        Ok(name) => Some(name),
        Err(error) => {
            errors.push(NAME_FIELD, &error);
            None
        }
    }
}

fn check_detail(raw: Option<&str>, errors: &mut ValidationErrors) -> Option<ProductDetail> {
    match ProductDetail::new(raw.unwrap_or_default()) {
        Ok(detail) => Some(detail),
        Err(error) => {
            errors.push(DETAIL_FIELD, &error);
            None
        }
    }
}

/// Rule set applied when creating a product: name required and at most 255
/// characters, detail required.
pub struct CreateProductRules;

impl CreateProductRules {
    /// Validate a raw form into a draft, or reject with per-field messages.
    pub fn validate(form: &ProductForm) -> Result<ProductDraft, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let name = check_name(form.name.as_deref(), &mut errors);
        let detail = check_detail(form.detail.as_deref(), &mut errors);
        match (name, detail) {
            (Some(name), Some(detail)) => Ok(ProductDraft { name, detail }),
            _ => Err(errors),
        }
    }
}

/// Rule set applied when updating a product.
///
/// Currently identical to [`CreateProductRules`]; kept as its own declaration
/// so update can diverge (e.g. partial field sets) without touching create.
pub struct UpdateProductRules;

impl UpdateProductRules {
    /// Validate a raw form into a full-replacement draft, or reject with
    /// per-field messages.
    pub fn validate(form: &ProductForm) -> Result<ProductDraft, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let name = check_name(form.name.as_deref(), &mut errors);
        let detail = check_detail(form.detail.as_deref(), &mut errors);
        match (name, detail) {
            (Some(name), Some(detail)) => Ok(ProductDraft { name, detail }),
            _ => Err(errors),
        }
    }
}

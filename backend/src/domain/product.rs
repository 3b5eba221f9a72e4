//! Product data model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum length accepted for a product name, in characters.
pub const NAME_MAX: usize = 255;

/// Validation errors returned by the product constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductValidationError {
    EmptyName,
    NameTooLong { max: usize },
    EmptyDetail,
    InvalidId,
}

impl fmt::Display for ProductValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "name must be at most {max} characters")
            }
            Self::EmptyDetail => write!(f, "detail must not be empty"),
            Self::InvalidId => write!(f, "product id must be a positive integer"),
        }
    }
}

impl std::error::Error for ProductValidationError {}

/// Stable product identifier assigned by the storage engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(i32);

impl ProductId {
    /// Wrap a storage-assigned identifier.
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Access the underlying integer.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = ProductValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i32>()
            .ok()
            .filter(|value| *value > 0)
            .map(Self)
            .ok_or(ProductValidationError::InvalidId)
    }
}

/// Validated product name: non-empty, at most [`NAME_MAX`] characters.
///
/// Surrounding whitespace is trimmed before validation so a whitespace-only
/// submission is rejected as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductName(String);

impl ProductName {
    /// Validate and construct a [`ProductName`].
    pub fn new(value: impl AsRef<str>) -> Result<Self, ProductValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ProductValidationError::EmptyName);
        }
        if trimmed.chars().count() > NAME_MAX {
            return Err(ProductValidationError::NameTooLong { max: NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the name as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ProductName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ProductName> for String {
    fn from(value: ProductName) -> Self {
        value.0
    }
}

impl TryFrom<String> for ProductName {
    type Error = ProductValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated product detail: non-empty free-form text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductDetail(String);

impl ProductDetail {
    /// Validate and construct a [`ProductDetail`].
    pub fn new(value: impl AsRef<str>) -> Result<Self, ProductValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ProductValidationError::EmptyDetail);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the detail as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ProductDetail {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProductDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ProductDetail> for String {
    fn from(value: ProductDetail) -> Self {
        value.0
    }
}

impl TryFrom<String> for ProductDetail {
    type Error = ProductValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// The validated field set accepted by create and update.
///
/// A draft can only ever hold the two allowlisted fields, so persisting one
/// is the field-projection step: anything else submitted with a form never
/// reaches the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    /// Product name shown in listings.
    pub name: ProductName,
    /// Free-form description shown on the detail page.
    pub detail: ProductDetail,
}

/// A stored product record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    name: ProductName,
    detail: ProductDetail,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Product {
    /// Assemble a product from its stored parts.
    pub fn new(
        id: ProductId,
        name: ProductName,
        detail: ProductDetail,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            detail,
            created_at,
            updated_at,
        }
    }

    /// Storage-assigned identifier.
    pub fn id(&self) -> ProductId {
        self.id
    }

    /// Product name.
    pub fn name(&self) -> &ProductName {
        &self.name
    }

    /// Product detail text.
    pub fn detail(&self) -> &ProductDetail {
        &self.detail
    }

    /// When the record was inserted.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the record was last mutated.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

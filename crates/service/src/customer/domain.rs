use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type CustomerId = i64;

/// A persisted customer row. Names are never blank once stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
}

/// A customer that has passed validation but has no identity yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
}

/// Externally visible shape of a customer, as exchanged over HTTP.
///
/// Every field is optional on the wire so that missing values surface as
/// validation errors instead of deserialization failures.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    #[serde(default)]
    pub id: Option<CustomerId>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl CustomerDto {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
        }
    }

    pub fn with_id(mut self, id: CustomerId) -> Self {
        self.id = Some(id);
        self
    }
}

impl From<Customer> for CustomerDto {
    fn from(c: Customer) -> Self {
        Self {
            id: Some(c.id),
            first_name: Some(c.first_name),
            last_name: Some(c.last_name),
        }
    }
}

impl From<models::customer::Model> for Customer {
    fn from(m: models::customer::Model) -> Self {
        Self { id: m.id, first_name: m.first_name, last_name: m.last_name }
    }
}

/// Constraint a field failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    NotNull,
    NotBlank,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::NotNull => f.write_str("must not be null"),
            Rule::NotBlank => f.write_str("must not be blank"),
        }
    }
}

/// A single input constraint violation, e.g. `firstName: must not be blank`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{field}: {rule}")]
pub struct Violation {
    pub field: &'static str,
    pub rule: Rule,
}

impl Violation {
    pub fn new(field: &'static str, rule: Rule) -> Self { Self { field, rule } }
}

pub fn require_present<T>(field: &'static str, value: Option<T>) -> Result<T, Violation> {
    value.ok_or(Violation::new(field, Rule::NotNull))
}

/// Absent, empty and whitespace-only values all count as blank.
pub fn require_not_blank<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, Violation> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Violation::new(field, Rule::NotBlank)),
    }
}

/// Name checks shared by create and update, in field order.
pub fn validate_names(dto: &CustomerDto) -> Result<NewCustomer, Violation> {
    let first_name = require_not_blank("firstName", dto.first_name.as_deref())?;
    let last_name = require_not_blank("lastName", dto.last_name.as_deref())?;
    Ok(NewCustomer { first_name: first_name.to_string(), last_name: last_name.to_string() })
}

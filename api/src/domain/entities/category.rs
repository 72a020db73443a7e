//! Category domain entity
//!
//! Categories are a flat, globally unique namespace of labels. Products
//! reference them by name only, so renaming a category does not rewrite the
//! products that carry the old label.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Violation;

/// Unique identifier for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub Uuid);

impl CategoryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CategoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for CategoryId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryStatus {
    Active,
    Inactive,
}

impl std::fmt::Display for CategoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryStatus::Active => write!(f, "active"),
            CategoryStatus::Inactive => write!(f, "inactive"),
        }
    }
}

impl std::str::FromStr for CategoryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(CategoryStatus::Active),
            "inactive" => Ok(CategoryStatus::Inactive),
            _ => Err(format!("Unknown category status: {}", s)),
        }
    }
}

/// A product grouping label
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub status: CategoryStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn is_active(&self) -> bool {
        self.status == CategoryStatus::Active
    }
}

/// Data needed to create a new category
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

impl NewCategory {
    /// Field constraint check, run before any store write.
    pub fn validate(&self) -> Vec<Violation> {
        category_field_violations(&self.name, self.description.as_deref())
    }
}

/// Mutable fields for a category update
#[derive(Debug, Clone)]
pub struct UpdateCategory {
    pub name: String,
    pub description: Option<String>,
    pub status: CategoryStatus,
}

impl UpdateCategory {
    pub fn validate(&self) -> Vec<Violation> {
        category_field_violations(&self.name, self.description.as_deref())
    }
}

fn category_field_violations(name: &str, description: Option<&str>) -> Vec<Violation> {
    let mut violations = Vec::new();

    let name_len = name.trim().chars().count();
    if name_len == 0 {
        violations.push(Violation::new("name", "Category name is required"));
    } else if name_len > 100 {
        violations.push(Violation::new(
            "name",
            "Category name cannot exceed 100 characters",
        ));
    }

    if let Some(description) = description {
        if description.chars().count() > 500 {
            violations.push(Violation::new(
                "description",
                "Description cannot exceed 500 characters",
            ));
        }
    }

    violations
}

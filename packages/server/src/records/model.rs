use sea_orm::FromQueryResult;

use super::error::RecordError;
use super::schema::DEFAULT_STATUS;

/// One row of a record table, with columns aliased to schema-independent
/// names.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct Record {
    pub id: i32,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub quantity: i32,
    pub unit_price: f64,
    pub image_filename: Option<String>,
    pub status: String,
}

impl Record {
    /// Whether writing `fields` and `image` would leave the row as it is.
    pub fn matches(&self, fields: &RecordFields, image: Option<&str>) -> bool {
        self.name == fields.name.trim()
            && self.category == fields.category
            && self.description == fields.description
            && self.quantity == fields.quantity
            && self.unit_price == fields.unit_price
            && self.image_filename.as_deref() == image
            && self.status == fields.status_or_default()
    }
}

/// Writable columns of a record. Create and update always write all of them.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFields {
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub quantity: i32,
    pub unit_price: f64,
    /// `None` or blank stores [`DEFAULT_STATUS`].
    pub status: Option<String>,
}

impl RecordFields {
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.name.trim().is_empty() {
            return Err(RecordError::Validation("Name is required".into()));
        }
        if self.quantity < 0 {
            return Err(RecordError::Validation("Quantity must be >= 0".into()));
        }
        if !self.unit_price.is_finite() || self.unit_price < 0.0 {
            return Err(RecordError::Validation(
                "Unit price must be a non-negative number".into(),
            ));
        }
        Ok(())
    }

    pub fn status_or_default(&self) -> &str {
        match self.status.as_deref().map(str::trim) {
            Some(status) if !status.is_empty() => status,
            _ => DEFAULT_STATUS,
        }
    }
}

/// A file part received with a create or update request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Name as sent by the client; may include directories.
    pub file_name: String,
    pub data: Vec<u8>,
}

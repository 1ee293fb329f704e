use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::error::AppError;
use crate::extractors::form::FormData;
use crate::records::{
    CATEGORY_COLUMN, DESCRIPTION_COLUMN, QUANTITY_COLUMN, Record, RecordFields, RecordSchema,
    STATUS_COLUMN, UNIT_PRICE_COLUMN,
};

/// Message for any missing or malformed record field.
pub const INVALID_INPUT: &str = "Invalid input data.";

/// Read the writable fields of a record from a submitted form.
///
/// The name must be non-blank, `qty` an integer >= 0 and `unit_price` a
/// finite number >= 0. Blank optional fields are stored as null, and a blank
/// status falls back to the default.
pub fn parse_fields(schema: &RecordSchema, form: &FormData) -> Result<RecordFields, AppError> {
    let invalid = || AppError::Validation(INVALID_INPUT.into());

    let name = non_blank(form, schema.name_column).ok_or_else(invalid)?;
    let quantity = non_blank(form, QUANTITY_COLUMN)
        .and_then(|v| v.parse::<i32>().ok())
        .filter(|q| *q >= 0)
        .ok_or_else(invalid)?;
    let unit_price = non_blank(form, UNIT_PRICE_COLUMN)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|p| p.is_finite() && *p >= 0.0)
        .ok_or_else(invalid)?;

    Ok(RecordFields {
        name: name.to_string(),
        category: non_blank(form, CATEGORY_COLUMN).map(str::to_string),
        description: non_blank(form, DESCRIPTION_COLUMN).map(str::to_string),
        quantity,
        unit_price,
        status: non_blank(form, STATUS_COLUMN).map(str::to_string),
    })
}

/// Positive record id from the schema's id field.
pub fn parse_id(schema: &RecordSchema, form: &FormData) -> Option<i32> {
    non_blank(form, schema.id_column)
        .and_then(|v| v.parse::<i32>().ok())
        .filter(|id| *id > 0)
}

/// Image filename the client says the record currently has.
pub fn current_image<'f>(schema: &RecordSchema, form: &'f FormData) -> Option<&'f str> {
    non_blank(form, schema.current_image_field)
}

fn non_blank<'f>(form: &'f FormData, name: &str) -> Option<&'f str> {
    form.text(name).map(str::trim).filter(|v| !v.is_empty())
}

/// A record keyed by its table's column names (`item_id`, `item_name`, ...).
pub struct RecordView {
    pub schema: &'static RecordSchema,
    pub record: Record,
}

impl Serialize for RecordView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (schema, record) = (self.schema, &self.record);
        let mut map = serializer.serialize_map(Some(8))?;
        map.serialize_entry(schema.id_column, &record.id)?;
        map.serialize_entry(schema.name_column, &record.name)?;
        map.serialize_entry(CATEGORY_COLUMN, &record.category)?;
        map.serialize_entry(DESCRIPTION_COLUMN, &record.description)?;
        map.serialize_entry(QUANTITY_COLUMN, &record.quantity)?;
        map.serialize_entry(UNIT_PRICE_COLUMN, &record.unit_price)?;
        map.serialize_entry(schema.image_column, &record.image_filename)?;
        map.serialize_entry(STATUS_COLUMN, &record.status)?;
        map.end()
    }
}

#[derive(Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Body of a successful insert. The id is sent both as `id` and under the
/// schema's id column.
pub struct CreatedResponse {
    pub schema: &'static RecordSchema,
    pub id: i32,
}

impl Serialize for CreatedResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("success", &true)?;
        map.serialize_entry(
            "message",
            &format!("{} added successfully", self.schema.label),
        )?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry(self.schema.id_column, &self.id)?;
        map.end()
    }
}

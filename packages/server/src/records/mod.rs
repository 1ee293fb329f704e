mod error;
mod model;
mod schema;
mod service;

pub use error::RecordError;
pub use model::{Record, RecordFields, UploadedFile};
pub use schema::{
    ALL_SCHEMAS, CATEGORY_COLUMN, DEFAULT_STATUS, DESCRIPTION_COLUMN, ITEMS, Item, PRODUCTS,
    Product, QUANTITY_COLUMN, RecordKind, RecordSchema, STATUS_COLUMN, UNIT_PRICE_COLUMN,
};
pub use service::RecordService;

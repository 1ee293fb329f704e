/// Columns shared by every record table.
pub const CATEGORY_COLUMN: &str = "category";
pub const DESCRIPTION_COLUMN: &str = "description";
pub const QUANTITY_COLUMN: &str = "qty";
pub const UNIT_PRICE_COLUMN: &str = "unit_price";
pub const STATUS_COLUMN: &str = "status";

/// Status stored when a create or update leaves it blank.
pub const DEFAULT_STATUS: &str = "active";

/// Describes how one record kind maps onto its table and form fields.
///
/// Items and products share a shape and differ only in these names, so the
/// service, handlers and wire format are written once against a schema.
#[derive(Debug)]
pub struct RecordSchema {
    pub table: &'static str,
    /// Primary key column, also the form field carrying the id.
    pub id_column: &'static str,
    /// Name column, also the form field carrying the name.
    pub name_column: &'static str,
    pub image_column: &'static str,
    /// Multipart part carrying a new image.
    pub upload_field: &'static str,
    /// Form field naming the image the client currently holds.
    pub current_image_field: &'static str,
    /// Capitalized singular used in messages ("Item").
    pub label: &'static str,
}

impl RecordSchema {
    /// Lowercase singular used mid-sentence ("item").
    pub fn noun(&self) -> String {
        self.label.to_lowercase()
    }
}

pub const ITEMS: RecordSchema = RecordSchema {
    table: "tblitems",
    id_column: "item_id",
    name_column: "item_name",
    image_column: "item_image",
    upload_field: "item_image",
    current_image_field: "current_item_image",
    label: "Item",
};

pub const PRODUCTS: RecordSchema = RecordSchema {
    table: "tblproduct",
    id_column: "product_id",
    name_column: "product_name",
    image_column: "product_image",
    upload_field: "product_image",
    current_image_field: "current_product_image",
    label: "Product",
};

/// Every schema the server manages, in bootstrap order.
pub const ALL_SCHEMAS: [&RecordSchema; 2] = [&ITEMS, &PRODUCTS];

/// Type-level handle on a schema so handlers can be generic over the record
/// kind they serve.
pub trait RecordKind: Send + Sync + 'static {
    const SCHEMA: &'static RecordSchema;
}

pub struct Item;

impl RecordKind for Item {
    const SCHEMA: &'static RecordSchema = &ITEMS;
}

pub struct Product;

impl RecordKind for Product {
    const SCHEMA: &'static RecordSchema = &PRODUCTS;
}

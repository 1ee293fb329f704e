use common::media::ImageIngestor;
use sea_orm::sea_query::{Alias, Expr, ExprTrait, Order, Query, SelectStatement};
use sea_orm::{ConnectionTrait, DbBackend, DbErr, FromQueryResult};
use tracing::{info, warn};

use super::error::RecordError;
use super::model::{Record, RecordFields, UploadedFile};
use super::schema::{
    CATEGORY_COLUMN, DESCRIPTION_COLUMN, QUANTITY_COLUMN, RecordSchema, STATUS_COLUMN,
    UNIT_PRICE_COLUMN,
};

/// CRUD over one record table, with the image file kept in step with the row.
///
/// Row and file writes are not atomic. Files written for a row that never
/// lands are removed again; a crash in between can still leave an orphan.
pub struct RecordService<'a, C: ConnectionTrait> {
    conn: &'a C,
    schema: &'static RecordSchema,
    images: &'a ImageIngestor,
}

impl<'a, C: ConnectionTrait> RecordService<'a, C> {
    pub fn new(conn: &'a C, schema: &'static RecordSchema, images: &'a ImageIngestor) -> Self {
        Self {
            conn,
            schema,
            images,
        }
    }

    /// All records ordered by id.
    pub async fn list(&self) -> Result<Vec<Record>, DbErr> {
        let stmt = self
            .select()
            .order_by(Alias::new(self.schema.id_column), Order::Asc)
            .to_owned();
        Record::find_by_statement(self.backend().build(&stmt))
            .all(self.conn)
            .await
    }

    pub async fn get(&self, id: i32) -> Result<Option<Record>, DbErr> {
        let stmt = self
            .select()
            .and_where(Expr::col(Alias::new(self.schema.id_column)).eq(id))
            .to_owned();
        Record::find_by_statement(self.backend().build(&stmt))
            .one(self.conn)
            .await
    }

    /// Insert a record, storing `upload` first when one is given.
    ///
    /// A rejected image writes nothing. If the insert fails the stored image
    /// is removed again.
    pub async fn create(
        &self,
        fields: &RecordFields,
        upload: Option<&UploadedFile>,
    ) -> Result<i32, RecordError> {
        fields.validate()?;

        let image = match upload {
            Some(file) => Some(self.images.ingest(&file.file_name, &file.data).await?),
            None => None,
        };

        match self.insert_row(fields, image.as_deref()).await {
            Ok(id) => {
                info!(table = self.schema.table, id, image = ?image, "Created record");
                Ok(id)
            }
            Err(e) => {
                if let Some(image) = image.as_deref() {
                    self.discard_image(image).await;
                }
                Err(e.into())
            }
        }
    }

    /// Overwrite every writable column of a record.
    ///
    /// With an upload, the new image is stored before the row is written and
    /// `current_image` is deleted only after the row points at the new one.
    /// Without an upload, `current_image` is kept, and a missing one clears
    /// the image column. Returns the number of rows changed, which is 0 when
    /// the record is missing or already holds exactly these values.
    pub async fn update(
        &self,
        id: i32,
        fields: &RecordFields,
        upload: Option<&UploadedFile>,
        current_image: Option<&str>,
    ) -> Result<u64, RecordError> {
        fields.validate()?;

        let current_image = current_image.map(str::trim).filter(|name| !name.is_empty());
        let uploaded = match upload {
            Some(file) => Some(self.images.ingest(&file.file_name, &file.data).await?),
            None => None,
        };
        let image = uploaded.as_deref().or(current_image);

        let rows = match self.update_row(id, fields, image).await {
            Ok(rows) => rows,
            Err(e) => {
                if let Some(new) = uploaded.as_deref() {
                    self.discard_image(new).await;
                }
                return Err(e.into());
            }
        };

        if let Some(new) = uploaded.as_deref() {
            if rows == 0 {
                self.discard_image(new).await;
            } else if let Some(old) = current_image
                && old != new
            {
                self.discard_image(old).await;
            }
        }

        info!(table = self.schema.table, id, rows, image = ?image, "Updated record");
        Ok(rows)
    }

    /// Delete a record and its image file. Returns whether a row was removed.
    pub async fn delete(&self, id: i32) -> Result<bool, RecordError> {
        if let Some(record) = self.get(id).await?
            && let Some(image) = record.image_filename.as_deref()
        {
            self.discard_image(image).await;
        }

        let stmt = Query::delete()
            .from_table(Alias::new(self.schema.table))
            .and_where(Expr::col(Alias::new(self.schema.id_column)).eq(id))
            .to_owned();
        let rows = self
            .conn
            .execute_raw(self.backend().build(&stmt))
            .await?
            .rows_affected();

        info!(table = self.schema.table, id, rows, "Deleted record");
        Ok(rows > 0)
    }

    fn backend(&self) -> DbBackend {
        self.conn.get_database_backend()
    }

    /// Select with columns aliased to the field names of [`Record`].
    fn select(&self) -> SelectStatement {
        let schema = self.schema;
        Query::select()
            .expr_as(Expr::col(Alias::new(schema.id_column)), Alias::new("id"))
            .expr_as(Expr::col(Alias::new(schema.name_column)), Alias::new("name"))
            .column(Alias::new(CATEGORY_COLUMN))
            .column(Alias::new(DESCRIPTION_COLUMN))
            .expr_as(Expr::col(Alias::new(QUANTITY_COLUMN)), Alias::new("quantity"))
            .column(Alias::new(UNIT_PRICE_COLUMN))
            .expr_as(
                Expr::col(Alias::new(schema.image_column)),
                Alias::new("image_filename"),
            )
            .column(Alias::new(STATUS_COLUMN))
            .from(Alias::new(schema.table))
            .to_owned()
    }

    async fn insert_row(&self, fields: &RecordFields, image: Option<&str>) -> Result<i32, DbErr> {
        let schema = self.schema;
        let stmt = Query::insert()
            .into_table(Alias::new(schema.table))
            .columns([
                Alias::new(schema.name_column),
                Alias::new(CATEGORY_COLUMN),
                Alias::new(DESCRIPTION_COLUMN),
                Alias::new(QUANTITY_COLUMN),
                Alias::new(UNIT_PRICE_COLUMN),
                Alias::new(schema.image_column),
                Alias::new(STATUS_COLUMN),
            ])
            .values_panic([
                fields.name.trim().into(),
                fields.category.clone().into(),
                fields.description.clone().into(),
                fields.quantity.into(),
                fields.unit_price.into(),
                image.map(str::to_string).into(),
                fields.status_or_default().into(),
            ])
            .returning_col(Alias::new(schema.id_column))
            .to_owned();

        let row = self
            .conn
            .query_one_raw(self.backend().build(&stmt))
            .await?
            .ok_or(DbErr::RecordNotInserted)?;
        row.try_get("", schema.id_column)
    }

    async fn update_row(
        &self,
        id: i32,
        fields: &RecordFields,
        image: Option<&str>,
    ) -> Result<u64, DbErr> {
        match self.get(id).await? {
            Some(existing) if !existing.matches(fields, image) => {}
            _ => return Ok(0),
        }

        let schema = self.schema;
        let stmt = Query::update()
            .table(Alias::new(schema.table))
            .value(Alias::new(schema.name_column), fields.name.trim())
            .value(Alias::new(CATEGORY_COLUMN), fields.category.clone())
            .value(Alias::new(DESCRIPTION_COLUMN), fields.description.clone())
            .value(Alias::new(QUANTITY_COLUMN), fields.quantity)
            .value(Alias::new(UNIT_PRICE_COLUMN), fields.unit_price)
            .value(Alias::new(schema.image_column), image.map(str::to_string))
            .value(Alias::new(STATUS_COLUMN), fields.status_or_default())
            .and_where(Expr::col(Alias::new(schema.id_column)).eq(id))
            .to_owned();

        Ok(self
            .conn
            .execute_raw(self.backend().build(&stmt))
            .await?
            .rows_affected())
    }

    /// Best-effort removal; failures are logged and swallowed.
    async fn discard_image(&self, filename: &str) {
        if let Err(e) = self.images.remove(filename).await {
            warn!(table = self.schema.table, filename, error = %e, "Failed to remove image");
        }
    }
}

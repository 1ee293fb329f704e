use std::io::Cursor;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use ::common::media::{DEFAULT_MAX_IMAGE_BYTES, ImageIngestor};
use ::common::storage::FilesystemBlobStore;
use image::{DynamicImage, ImageFormat};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tempfile::TempDir;

use stockroom::config::{AppConfig, CorsConfig, DatabaseConfig, ServerConfig, StorageConfig};
use stockroom::database::{ensure_schema, init_db};
use stockroom::state::AppState;

pub mod routes {
    pub const ITEMS: &str = "/api/items";
    pub const ITEMS_INSERT: &str = "/api/items/insert";
    pub const ITEMS_UPDATE: &str = "/api/items/update";
    pub const ITEMS_DELETE: &str = "/api/items/delete";

    pub const PRODUCTS: &str = "/api/products";
    pub const PRODUCTS_INSERT: &str = "/api/products/insert";
    pub const PRODUCTS_UPDATE: &str = "/api/products/update";
    pub const PRODUCTS_DELETE: &str = "/api/products/delete";

    pub const HEALTH: &str = "/api/health";

    pub fn item(id: i32) -> String {
        format!("/api/items/{id}")
    }

    pub fn product(id: i32) -> String {
        format!("/api/products/{id}")
    }

    pub fn image(file: &str) -> String {
        format!("/api/images?file={file}")
    }
}

/// A running test server backed by a throwaway SQLite file and upload
/// directory.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
    pub upload_dir: PathBuf,
    _dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let upload_dir = dir.path().join("uploads");

        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                max_body_bytes: 16 * 1024 * 1024,
                cors: CorsConfig::default(),
            },
            database: DatabaseConfig {
                url: format!(
                    "sqlite://{}?mode=rwc",
                    dir.path().join("stockroom.db").display()
                ),
                max_connections: 5,
                min_connections: 1,
                sqlx_logging: false,
            },
            storage: StorageConfig {
                upload_dir: upload_dir.clone(),
                max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            },
        };

        let db = init_db(&config.database)
            .await
            .expect("Failed to connect to test database");
        ensure_schema(&db)
            .await
            .expect("Failed to create record tables");

        let store = FilesystemBlobStore::new(upload_dir.clone())
            .await
            .expect("Failed to create upload directory");
        let images = Arc::new(ImageIngestor::new(
            Arc::new(store),
            config.storage.max_image_bytes,
        ));

        let state = AppState {
            db: db.clone(),
            config: Arc::new(config),
            images,
        };
        let app = stockroom::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            db,
            upload_dir,
            _dir: dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    /// GET without consuming the body, for binary responses and headers.
    pub async fn get_raw(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request")
    }

    pub async fn request(&self, method: Method, path: &str) -> TestResponse {
        let res = self
            .client
            .request(method, self.url(path))
            .send()
            .await
            .expect("Failed to send request");

        TestResponse::from_response(res).await
    }

    pub async fn post_multipart(&self, path: &str, form: Form) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send multipart request");

        TestResponse::from_response(res).await
    }

    pub async fn post_urlencoded(&self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .form(fields)
            .send()
            .await
            .expect("Failed to send form request");

        TestResponse::from_response(res).await
    }

    /// Create an item via the API and return its `item_id`.
    pub async fn create_item(&self, name: &str, image: Option<Part>) -> i32 {
        let mut form = text_form(&[("item_name", name), ("qty", "10"), ("unit_price", "1.5")]);
        if let Some(part) = image {
            form = form.part("item_image", part);
        }
        let res = self.post_multipart(routes::ITEMS_INSERT, form).await;
        assert_eq!(res.status, 200, "create_item failed: {}", res.text);
        res.id()
    }

    /// Create a product via the API and return its `product_id`.
    pub async fn create_product(&self, name: &str, image: Option<Part>) -> i32 {
        let mut form = text_form(&[("product_name", name), ("qty", "3"), ("unit_price", "19.99")]);
        if let Some(part) = image {
            form = form.part("product_image", part);
        }
        let res = self.post_multipart(routes::PRODUCTS_INSERT, form).await;
        assert_eq!(res.status, 200, "create_product failed: {}", res.text);
        res.id()
    }

    /// Stored image filenames, ignoring the staging directory.
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.upload_dir)
            .expect("upload dir should exist")
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name != ".tmp")
            .collect();
        names.sort();
        names
    }

    /// Whether the read path serves `file`.
    pub async fn image_resolves(&self, file: &str) -> bool {
        self.get_raw(&routes::image(file)).await.status() == 200
    }
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }

    pub fn id(&self) -> i32 {
        self.body["id"]
            .as_i64()
            .expect("response body should contain 'id'") as i32
    }

    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}

pub fn text_form(fields: &[(&str, &str)]) -> Form {
    fields.iter().fold(Form::new(), |form, (name, value)| {
        form.text(name.to_string(), value.to_string())
    })
}

pub fn file_part(file_name: &str, bytes: Vec<u8>) -> Part {
    Part::bytes(bytes).file_name(file_name.to_string())
}

pub fn encode(format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::new_rgb8(16, 16)
        .write_to(&mut Cursor::new(&mut buf), format)
        .expect("Failed to encode test image");
    buf
}

pub fn png_part(file_name: &str) -> Part {
    file_part(file_name, encode(ImageFormat::Png))
}

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers::{
    health::health,
    image::serve_image,
    method_not_allowed,
    record::{create_record, delete_record, get_record, list_records, update_record},
};
use crate::records::{Item, Product, RecordKind};
use crate::state::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(record_routes::<Item>("/items"))
        .merge(record_routes::<Product>("/products"))
        .route(
            "/images",
            get(serve_image).fallback(method_not_allowed),
        )
        .route("/health", get(health).fallback(method_not_allowed))
}

/// List, get, insert, update and delete for one record kind under `base`.
fn record_routes<K: RecordKind>(base: &str) -> Router<AppState> {
    Router::new()
        .route(
            base,
            get(list_records::<K>).fallback(method_not_allowed),
        )
        .route(
            &format!("{base}/insert"),
            post(create_record::<K>).fallback(method_not_allowed),
        )
        .route(
            &format!("{base}/update"),
            post(update_record::<K>).fallback(method_not_allowed),
        )
        .route(
            &format!("{base}/delete"),
            post(delete_record::<K>).fallback(method_not_allowed),
        )
        .route(
            &format!("{base}/{{id}}"),
            get(get_record::<K>).fallback(method_not_allowed),
        )
}

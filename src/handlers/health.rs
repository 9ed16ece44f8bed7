use crate::notify::DeliveryStats;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
struct Health<'a> {
    status: &'static str,
    notifications: &'a DeliveryStats,
}

pub async fn health(State(stats): State<Arc<DeliveryStats>>) -> Response {
    Json(Health {
        status: "ok",
        notifications: &stats,
    })
    .into_response()
}

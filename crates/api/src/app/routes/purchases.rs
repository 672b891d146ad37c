//! Purchase agreement and purchase order endpoints.
//!
//! All endpoints are `POST` with a JSON body; successful writes answer `201`,
//! lookups `200`.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/create_purchase_agreement", post(create_purchase_agreement))
        .route("/create_purchase_order", post(create_purchase_order))
        .route("/receive_purchase_order", post(receive_purchase_order))
        .route("/get_purchase_agreement", post(get_purchase_agreement))
        .route("/get_purchase_order", post(get_purchase_order))
}

pub async fn create_purchase_agreement(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreatePurchaseAgreementRequest>,
) -> Response {
    match services.procurement.create_purchase_agreement(body.into()) {
        Ok(agreement) => (StatusCode::CREATED, Json(agreement)).into_response(),
        Err(e) => errors::procurement_error_to_response(e),
    }
}

pub async fn create_purchase_order(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreatePurchaseOrderRequest>,
) -> Response {
    match services.procurement.create_purchase_order(body.into()) {
        Ok(order) => (StatusCode::CREATED, Json(order)).into_response(),
        Err(e) => errors::procurement_error_to_response(e),
    }
}

pub async fn receive_purchase_order(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::ReceivePurchaseOrderRequest>,
) -> Response {
    match services.procurement.receive_purchase_order(body.into()) {
        Ok(order) => (StatusCode::CREATED, Json(order)).into_response(),
        Err(e) => errors::procurement_error_to_response(e),
    }
}

pub async fn get_purchase_agreement(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::GetPurchaseAgreementRequest>,
) -> Response {
    match services.procurement.get_purchase_agreement(body.agreement_id) {
        Ok(agreement) => (StatusCode::OK, Json(agreement)).into_response(),
        Err(e) => errors::procurement_error_to_response(e),
    }
}

pub async fn get_purchase_order(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::GetPurchaseOrderRequest>,
) -> Response {
    let result = match (body.order_id, body.plant_id) {
        (Some(order_id), _) => services.procurement.get_purchase_order(order_id),
        (None, Some(plant_id)) => services.procurement.get_earliest_plant_order(plant_id),
        (None, None) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "missing_lookup_key",
                "either order_id or plant_id needs to be provided",
            );
        }
    };

    match result {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e) => errors::procurement_error_to_response(e),
    }
}

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use supplyline_procurement::ProcurementError;

pub fn procurement_error_status(err: &ProcurementError) -> StatusCode {
    match err {
        ProcurementError::MissingReference
        | ProcurementError::StandaloneReferenceIncomplete
        | ProcurementError::InvalidQuantity(_)
        | ProcurementError::InvalidAgreementWindow { .. }
        | ProcurementError::Validation(_) => StatusCode::BAD_REQUEST,
        ProcurementError::AgreementVendorMismatch { .. }
        | ProcurementError::QuantityExceedsAgreement { .. }
        | ProcurementError::OrderDateOutsideAgreementWindow { .. }
        | ProcurementError::DeliveryBeforeOrderDate { .. }
        | ProcurementError::DeliveryOutsideAgreementWindow { .. }
        | ProcurementError::OrderAlreadyReceived { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ProcurementError::OrderNotFound(_)
        | ProcurementError::AgreementNotFound(_)
        | ProcurementError::PlantNotFound(_)
        | ProcurementError::VendorNotFound(_)
        | ProcurementError::PlantHasNoReceivedOrders(_) => StatusCode::NOT_FOUND,
        ProcurementError::Conflict(_) => StatusCode::CONFLICT,
        ProcurementError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn procurement_error_to_response(err: ProcurementError) -> axum::response::Response {
    json_error(procurement_error_status(&err), err.code(), err.to_string())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/slots", post(handlers::slots::list_slots))
        .route("/api/slots/defaults", get(handlers::slots::clinic_defaults))
        .route("/api/slots/select", post(handlers::slots::select_slot))
}

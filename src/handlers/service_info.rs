use super::AppState;
use crate::types::ServiceInfo;
use axum::{Json, extract::State};

pub async fn service_info(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: state.name,
        version: state.version,
    })
}

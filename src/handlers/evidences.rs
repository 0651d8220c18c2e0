use super::AppState;
use crate::{Result, dispatch::parse_id};
use axum::extract::{Path, State};

/// Evidence payloads are returned as-is in a plain-text body.
pub async fn get_evidence(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<String> {
    let id = parse_id(&id)?;
    let evidence = state.store.get_evidence(id).await?;
    Ok(String::from_utf8_lossy(&evidence).into_owned())
}

use super::AppState;
use crate::{
    Error, Result,
    dispatch::{GenotypesResult, dispatch_genotypes, resolve_genome},
    query::Query as LocationQuery,
    types::GenotypesParams,
};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};

/// `GET /v1/genomes/{id}/genotypes?locations=1:1,1:2` or `?range=1:1-100[&fmt=seq]`
pub async fn get_genotypes(
    State(state): State<AppState>,
    Path(id): Path<String>,
    params: std::result::Result<Query<GenotypesParams>, QueryRejection>,
) -> Result<Json<GenotypesResult>> {
    let Query(params) = params.map_err(|e| Error::validation(e.body_text()))?;

    // Parameters are checked before the genome is looked up
    let query = LocationQuery::parse(params.locations.as_deref(), params.range.as_deref())?;
    let genome = resolve_genome(state.store.as_ref(), &id).await?;

    tracing::debug!(
        genome = genome.id,
        locations = query.locations().len(),
        range = query.is_range(),
        "dispatching genotype query"
    );

    let result =
        dispatch_genotypes(state.store.as_ref(), &genome, &query, params.wants_sequence()).await?;
    Ok(Json(result))
}

use super::{AppState, FormOrJson};
use crate::{
    Result,
    dispatch::resolve_genome,
    types::{CreateGenomesBody, Genome},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

pub async fn post_genomes(
    State(state): State<AppState>,
    FormOrJson(body): FormOrJson<CreateGenomesBody>,
) -> Result<(StatusCode, Json<Vec<Genome>>)> {
    let genomes = state.store.create_genomes(&body.file_path).await?;
    Ok((StatusCode::CREATED, Json(genomes)))
}

pub async fn list_genomes(State(state): State<AppState>) -> Result<Json<Vec<Genome>>> {
    let genomes = state.store.list_genomes().await?;
    Ok(Json(genomes))
}

pub async fn get_genome(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Genome>> {
    let genome = resolve_genome(state.store.as_ref(), &id).await?;
    Ok(Json(genome))
}

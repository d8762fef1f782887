use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use memopad_db::models::NoteRow;
use memopad_db::tags;
use memopad_types::api::{Claims, CreateMemoRequest, DeleteResponse, UpdateMemoRequest};
use memopad_types::models::{DEFAULT_COLOR, DEFAULT_TITLE, Note};

use crate::auth::AppState;
use crate::convert::note_from_row;
use crate::error::ApiError;

pub async fn list_memos(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    // Run blocking DB work off the async runtime
    let db = state.clone();
    let uid = claims.sub.to_string();
    let rows = tokio::task::spawn_blocking(move || db.db.list_notes(&uid))
        .await
        .map_err(|e| anyhow::anyhow!("spawn_blocking join error: {}", e))??;

    let notes: Vec<Note> = rows.into_iter().map(note_from_row).collect();
    Ok(Json(notes))
}

pub async fn create_memo(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateMemoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let note_id = Uuid::new_v4();
    let now = chrono::Utc::now();

    // Field defaults: empty title gets the placeholder, empty color the
    // default token, absent content the empty string.
    let title = match req.title {
        Some(t) if !t.is_empty() => t,
        _ => DEFAULT_TITLE.to_string(),
    };
    let content = req.content.unwrap_or_default();
    let color = match req.color {
        Some(c) if !c.is_empty() => c,
        _ => DEFAULT_COLOR.to_string(),
    };
    let tags_json = tags::encode(req.tags.as_deref());
    let tag_list = req.tags.unwrap_or_default();

    let row = NoteRow {
        id: note_id.to_string(),
        user_id: claims.sub.to_string(),
        title: title.clone(),
        content: content.clone(),
        tags: tags_json,
        color: color.clone(),
        created_at: now.to_rfc3339(),
        updated_at: now.to_rfc3339(),
    };

    let db = state.clone();
    tokio::task::spawn_blocking(move || db.db.insert_note(&row))
        .await
        .map_err(|e| anyhow::anyhow!("spawn_blocking join error: {}", e))??;

    Ok((
        StatusCode::CREATED,
        Json(Note {
            id: note_id,
            user_id: claims.sub,
            title,
            content,
            tags: tag_list,
            color,
            created_at: now,
            updated_at: now,
        }),
    ))
}

pub async fn update_memo(
    State(state): State<AppState>,
    Path(memo_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateMemoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let nid = memo_id.to_string();
    let uid = claims.sub.to_string();
    let updated_at = chrono::Utc::now().to_rfc3339();

    // Ownership check precedes mutation; two queries, one lock scope each.
    let row = tokio::task::spawn_blocking(move || -> anyhow::Result<Option<NoteRow>> {
        let Some(existing) = db.db.get_note_owned(&nid, &uid)? else {
            return Ok(None);
        };

        // Partial replacement: only provided fields change.
        let title = match req.title {
            Some(t) if !t.is_empty() => t,
            Some(_) => DEFAULT_TITLE.to_string(),
            None => existing.title,
        };
        let content = req.content.unwrap_or(existing.content);
        let color = match req.color {
            Some(c) if !c.is_empty() => c,
            Some(_) => DEFAULT_COLOR.to_string(),
            None => existing.color,
        };
        let tags_json = match req.tags {
            Some(list) => tags::encode(Some(&list)),
            None => existing.tags,
        };

        db.db.update_note(
            &nid,
            &title,
            &content,
            tags_json.as_deref(),
            &color,
            &updated_at,
        )?;

        Ok(Some(NoteRow {
            id: nid,
            user_id: uid,
            title,
            content,
            tags: tags_json,
            color,
            created_at: existing.created_at,
            updated_at,
        }))
    })
    .await
    .map_err(|e| anyhow::anyhow!("spawn_blocking join error: {}", e))??
    .ok_or_else(|| ApiError::NotFound("memo not found".into()))?;

    Ok(Json(note_from_row(row)))
}

pub async fn delete_memo(
    State(state): State<AppState>,
    Path(memo_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let nid = memo_id.to_string();
    let uid = claims.sub.to_string();

    // Same ownership precondition as update.
    let deleted = tokio::task::spawn_blocking(move || -> anyhow::Result<bool> {
        if db.db.get_note_owned(&nid, &uid)?.is_none() {
            return Ok(false);
        }
        db.db.delete_note(&nid)?;
        Ok(true)
    })
    .await
    .map_err(|e| anyhow::anyhow!("spawn_blocking join error: {}", e))??;

    if !deleted {
        return Err(ApiError::NotFound("memo not found".into()));
    }

    Ok(Json(DeleteResponse { deleted: true }))
}

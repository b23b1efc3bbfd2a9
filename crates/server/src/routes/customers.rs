use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    Json,
};
use tracing::{info, warn};

use service::customer::domain::{CustomerDto, CustomerId};

use crate::{errors::JsonApiError, state::AppState};

type Body = Result<Json<Option<CustomerDto>>, JsonRejection>;
type IdParam = Result<Path<CustomerId>, PathRejection>;

fn not_found(id: CustomerId) -> JsonApiError {
    JsonApiError::not_found(format!("Customer(id={id}) not found"))
}

/// No body and no `Content-Type` means no customer; any other media type is refused.
fn payload(headers: &HeaderMap, body: Body) -> Result<Option<CustomerDto>, JsonApiError> {
    match body {
        Ok(Json(dto)) => Ok(dto),
        Err(JsonRejection::MissingJsonContentType(_)) => match headers.get(CONTENT_TYPE) {
            None => Ok(None),
            Some(ct) => {
                let ct = String::from_utf8_lossy(ct.as_bytes());
                warn!(content_type = %ct, "customer payload with unsupported media type");
                Err(JsonApiError::from_status(
                    StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    format!("Content-Type '{ct}' is not supported; expected application/json"),
                ))
            }
        },
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "unreadable customer payload");
            Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Malformed Request", Some(rejection.body_text())))
        }
    }
}

fn path_id(id: IdParam) -> Result<CustomerId, JsonApiError> {
    id.map(|Path(id)| id).map_err(|r| JsonApiError::bad_request(r.body_text()))
}

pub async fn create(State(state): State<AppState>, headers: HeaderMap, body: Body) -> Result<(StatusCode, Json<CustomerDto>), JsonApiError> {
    let created = state.customers.create(payload(&headers, body)?).await?;
    info!(id = ?created.id, "customer created via api");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CustomerDto>>, JsonApiError> {
    let all = state.customers.get_all().await?;
    info!(count = all.len(), "list customers");
    Ok(Json(all))
}

pub async fn get_one(State(state): State<AppState>, id: IdParam) -> Result<Json<CustomerDto>, JsonApiError> {
    let id = path_id(id)?;
    match state.customers.get_by_id(id).await? {
        Some(dto) => Ok(Json(dto)),
        None => Err(not_found(id)),
    }
}

/// The path id always wins over any id in the body.
pub async fn update(
    State(state): State<AppState>,
    id: IdParam,
    headers: HeaderMap,
    body: Body,
) -> Result<Json<CustomerDto>, JsonApiError> {
    let id = path_id(id)?;
    let dto = payload(&headers, body)?.map(|dto| dto.with_id(id));
    match state.customers.update(dto).await? {
        Some(updated) => {
            info!(id, "customer updated via api");
            Ok(Json(updated))
        }
        None => Err(not_found(id)),
    }
}

pub async fn remove(State(state): State<AppState>, id: IdParam) -> Result<StatusCode, JsonApiError> {
    let id = path_id(id)?;
    if state.customers.get_by_id(id).await?.is_none() {
        return Err(not_found(id));
    }
    state.customers.delete_by_id(id).await?;
    info!(id, "customer deleted via api");
    Ok(StatusCode::NO_CONTENT)
}

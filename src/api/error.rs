use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// A store error translated for the client.
///
/// Persistence and internal failures are logged in full here; the client only
/// sees a generic message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => {
                tracing::debug!("{}", e);
                Self {
                    status: StatusCode::NOT_FOUND,
                    message: "Turma/Alocação não encontrada.".to_string(),
                }
            }
            StoreError::InvalidInput(detail) => {
                tracing::warn!("Validation error: {}", detail);
                Self {
                    status: StatusCode::BAD_REQUEST,
                    message: format!("Requisição inválida: {detail}"),
                }
            }
            StoreError::Persistence { .. } => {
                tracing::error!("Persistence error: {}", e);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Não foi possível salvar os dados.".to_string(),
                }
            }
            StoreError::Internal(_) => {
                tracing::error!("Internal error: {}", e);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Erro ao processar sua solicitação.".to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                message: self.message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AllocationRef;

    #[test]
    fn maps_taxonomy_to_statuses() {
        let cases = [
            (StoreError::NotFound(AllocationRef::from(9)), StatusCode::NOT_FOUND),
            (StoreError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (
                StoreError::persistence("data.json", "disk full"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (StoreError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status(), status);
        }
    }

    #[test]
    fn internal_details_are_not_exposed() {
        let error = ApiError::from(StoreError::persistence("/secret/path.json", "disk full"));
        assert!(!error.message.contains("/secret"));
    }
}

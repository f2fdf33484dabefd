// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Usuário bloqueado")]
    UserLocked,

    #[error("Sem acesso ao prédio")]
    BuildingAccessDenied,

    #[error("Prédio não encontrado")]
    BuildingNotFound,

    #[error("{0} não encontrado")]
    NotFound(&'static str),

    // Violação de constraint do banco, já com a mensagem amigável.
    #[error("{message}")]
    ConstraintViolation {
        constraint: String,
        message: String,
        unique: bool,
    },

    #[error("Campo de ordenação desconhecido: {0}")]
    InvalidSortKey(String),

    #[error("Direção de ordenação inválida: {0}")]
    InvalidSortDirection(String),

    #[error("Campo de filtro desconhecido: {0}")]
    InvalidFilterField(String),

    #[error("Modo de filtro inválido: {0}")]
    InvalidFilterMode(String),

    #[error("Cabeçalho inválido: {0}")]
    InvalidHeader(&'static str),

    #[error("Nome de schema inválido: {0}")]
    InvalidSchemaName(String),

    #[error("Valor inválido para {field}: {value}")]
    InvalidEnumValue { field: &'static str, value: String },

    #[error("Valor do pagamento insuficiente para quitar as contas selecionadas")]
    InsufficientPayment,

    #[error("Conta {0} não pertence ao apartamento ou já está paga")]
    BillNotPayable(uuid::Uuid),

    // A string de conexão não pôde ser obtida ou interpretada.
    #[error("Configuração inválida: {0}")]
    Configuration(String),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidSortKey(_)
            | AppError::InvalidSortDirection(_)
            | AppError::InvalidFilterField(_)
            | AppError::InvalidFilterMode(_)
            | AppError::InvalidSchemaName(_)
            | AppError::InvalidHeader(_)
            | AppError::InvalidEnumValue { .. }
            | AppError::InsufficientPayment
            | AppError::BillNotPayable(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::UserLocked | AppError::BuildingAccessDenied => StatusCode::FORBIDDEN,
            AppError::UserNotFound | AppError::BuildingNotFound | AppError::NotFound(_) => {
                StatusCode::NOT_FOUND
            }
            AppError::ConstraintViolation { unique: true, .. } => StatusCode::CONFLICT,
            AppError::ConstraintViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let AppError::ValidationError(errors) = &self {
            let mut details = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors.iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                details.insert(field.to_string(), messages);
            }
            let body = Json(json!({
                "error": "Um ou mais campos são inválidos.",
                "details": details,
            }));
            return (status, body).into_response();
        }

        let error_message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            // O detalhe fica no log; o cliente recebe uma mensagem genérica.
            tracing::error!("Erro Interno do Servidor: {:?}", self);
            "Ocorreu um erro inesperado.".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_violations_map_to_client_errors() {
        let check = AppError::ConstraintViolation {
            constraint: "apartments_floor_check".into(),
            message: "Andar fora do intervalo".into(),
            unique: false,
        };
        assert_eq!(check.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(check.to_string(), "Andar fora do intervalo");

        let unique = AppError::ConstraintViolation {
            constraint: "apartments_pkey".into(),
            message: "Duplicado".into(),
            unique: true,
        };
        assert_eq!(unique.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn argument_errors_are_bad_requests() {
        assert_eq!(AppError::InvalidSortKey("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidSchemaName("x".into()).status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn configuration_errors_are_internal() {
        let err = AppError::Configuration("DATABASE_URL ausente".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

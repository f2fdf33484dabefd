// src/middleware/building.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::building::Building,
    services::BuildingServices,
};

// O nome do nosso cabeçalho HTTP customizado
pub const BUILDING_ID_HEADER: &str = "x-building-id";

/// Prédio da requisição e os serviços amarrados ao schema dele.
///
/// Cada requisição resolve o próprio contexto: trocar o prédio ativo
/// não afeta requisições que já estão em andamento.
#[derive(Clone)]
pub struct BuildingContext {
    pub building: Building,
    pub services: BuildingServices,
}

/// Lê o `x-building-id`. Ausente ou vazio vira `None`.
pub fn building_id_from_parts(parts: &Parts) -> Result<Option<Uuid>, AppError> {
    let Some(value) = parts.headers.get(BUILDING_ID_HEADER) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| AppError::InvalidHeader(BUILDING_ID_HEADER))?
        .trim();
    if value.is_empty() {
        return Ok(None);
    }

    Uuid::parse_str(value)
        .map(Some)
        .map_err(|_| AppError::InvalidHeader(BUILDING_ID_HEADER))
}

impl FromRequestParts<AppState> for BuildingContext {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(user) = AuthenticatedUser::from_request_parts(parts, state).await?;
        let building_id = building_id_from_parts(parts)?;
        let selector = state.selectors.for_user(user.id);

        let (building, ctx) = state
            .building_service
            .resolve_context(&user, building_id, &selector)
            .await?;

        tracing::debug!("Requisição de '{}' no schema '{}'", user.username, ctx.schema());
        Ok(BuildingContext {
            building,
            services: BuildingServices::new(ctx),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/apartments");
        if let Some(value) = header {
            builder = builder.header(BUILDING_ID_HEADER, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn missing_header_means_active_building() {
        assert_eq!(building_id_from_parts(&parts_with(None)).unwrap(), None);
        assert_eq!(building_id_from_parts(&parts_with(Some("  "))).unwrap(), None);
    }

    #[test]
    fn header_is_parsed_as_uuid() {
        let id = Uuid::new_v4();
        let parsed = building_id_from_parts(&parts_with(Some(&id.to_string()))).unwrap();
        assert_eq!(parsed, Some(id));
    }

    #[test]
    fn malformed_header_is_rejected() {
        assert!(matches!(
            building_id_from_parts(&parts_with(Some("building_b"))),
            Err(AppError::InvalidHeader(_))
        ));
    }
}

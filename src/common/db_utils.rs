// src/common/db_utils.rs

use crate::common::error::AppError;

// ---
// Tradução de erros do banco
// ---
// As constraints nomeadas do schema de cada prédio (ver db/provision.rs)
// ganham mensagens específicas; o resto vira DatabaseError.

/// Mensagem amigável para uma constraint conhecida.
pub fn constraint_message(constraint: &str) -> Option<&'static str> {
    let message = match constraint {
        "apartments_pkey" => "Já existe um apartamento com este código.",
        "apartments_id_format_check" => {
            "Código do apartamento inválido. Use o formato A0101 (bloco, andar com 2 dígitos, unidade com 2 dígitos)."
        }
        "apartments_floor_check" => "Andar fora do intervalo permitido (1 a 40).",
        "apartments_room_check" => "Número da unidade fora do intervalo permitido (1 a 30).",
        "apartments_population_check" => "A lotação do apartamento foi excedida.",
        "apartments_owner_id_fkey" => "O proprietário informado não é um morador cadastrado.",
        "residents_id_number_key" => "Já existe um morador com este documento.",
        "residents_apartment_id_fkey" => "O apartamento informado não existe.",
        "residents_owner_id_fkey" => "O responsável informado não é um morador cadastrado.",
        "bills_amount_check" => "O valor da conta deve ser positivo.",
        "bills_apartment_id_fkey" => "O apartamento informado não existe.",
        "payments_amount_check" => "O valor do pagamento deve ser positivo.",
        "payments_apartment_id_fkey" => "O apartamento informado não existe.",
        "service_requests_amount_check" => "O valor do serviço não pode ser negativo.",
        "service_requests_apartment_id_fkey" => "O apartamento informado não existe.",
        "service_requests_resident_id_fkey" => "O morador informado não existe.",
        "buildings_schema_name_key" => "Já existe um prédio com este schema.",
        "users_username_key" => "Este nome de usuário já está em uso.",
        _ => return None,
    };
    Some(message)
}

/// Converte um erro do sqlx em AppError, reconhecendo violações de constraint.
pub fn map_db_error(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        let is_constraint = db_err.is_unique_violation()
            || db_err.is_check_violation()
            || db_err.is_foreign_key_violation();

        if is_constraint {
            let constraint = db_err.constraint().unwrap_or_default().to_string();
            let message = constraint_message(&constraint)
                .map(str::to_string)
                .unwrap_or_else(|| "Os dados informados violam uma regra do banco.".to_string());

            tracing::warn!("Violação de constraint '{}': {}", constraint, db_err.message());

            return AppError::ConstraintViolation {
                unique: db_err.is_unique_violation(),
                constraint,
                message,
            };
        }
    }
    AppError::DatabaseError(e)
}

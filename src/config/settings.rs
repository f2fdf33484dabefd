// src/config/settings.rs

use std::{env, fs, path::Path};

use anyhow::Context;
use serde::Deserialize;

use crate::db::SchemaName;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_SETTINGS_PATH: &str = "appsettings.json";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

// Formato do appsettings.json:
// { "ConnectionStrings": { "DefaultConnection": "postgres://..." } }
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SettingsFile {
    #[serde(default)]
    connection_strings: ConnectionStrings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ConnectionStrings {
    default_connection: Option<String>,
}

/// Lê `ConnectionStrings.DefaultConnection` de um JSON de configuração.
pub fn connection_string_from_json(contents: &str) -> anyhow::Result<Option<String>> {
    let file: SettingsFile = serde_json::from_str(contents)
        .context("arquivo de configuração não é um JSON válido")?;
    Ok(file
        .connection_strings
        .default_connection
        .filter(|s| !s.trim().is_empty()))
}

#[derive(Debug, Clone)]
pub struct Settings {
    // `None` só sobrevive até o AppState: sem ela a aplicação não inicia.
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub default_schema: SchemaName,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

impl Settings {
    /// Carrega `.env` (se existir) e as variáveis de ambiente.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let jwt_secret = get("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let database_url = match get("DATABASE_URL") {
            Some(url) => Some(url),
            None => {
                let path = get("APP_SETTINGS_PATH").unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());
                read_settings_file(Path::new(&path))?
            }
        };

        let default_schema = match get("DEFAULT_SCHEMA") {
            Some(raw) => SchemaName::parse(&raw).context("DEFAULT_SCHEMA inválido")?,
            None => SchemaName::default_schema(),
        };

        let db_max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS inválido: {}", raw))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            default_schema,
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            db_max_connections,
            admin_username: get("ADMIN_USERNAME"),
            admin_password: get("ADMIN_PASSWORD"),
        })
    }
}

fn read_settings_file(path: &Path) -> anyhow::Result<Option<String>> {
    if !path.exists() {
        tracing::warn!("DATABASE_URL ausente e '{}' não encontrado", path.display());
        return Ok(None);
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("falha ao ler '{}'", path.display()))?;
    connection_string_from_json(&contents)
}

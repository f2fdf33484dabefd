//src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use condo_backend::{
    config::{AppState, Settings},
    routes,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG manda; sem ele, info
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let settings = Settings::load()?;

    // Se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new(&settings)?;

    // Tabelas compartilhadas (usuários, prédios) ficam no schema public
    sqlx::migrate!().run(&app_state.db_pool).await?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    if let (Some(username), Some(password)) = (&settings.admin_username, &settings.admin_password) {
        app_state.auth_service.ensure_admin(username, password).await?;
    }

    // Quem ainda não escolheu um prédio cai no padrão: schema e registro precisam existir
    app_state
        .building_service
        .ensure_default_building(&settings.default_schema)
        .await?;

    let app = routes::app(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

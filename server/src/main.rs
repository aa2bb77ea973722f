mod config;
mod error;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt::init();
    if let Err(e) = dotenv {
        tracing::debug!(error = %e, "no .env loaded");
    }

    let config = config::Config::from_env();
    if !config.projects_root.is_dir() {
        tracing::warn!(root = %config.projects_root.display(), "projects root does not exist");
    }

    let port = config.port;
    let state = state::AppState::new(&config);
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    tracing::info!(
        %port,
        root = %config.projects_root.display(),
        page = %config.project_page,
        id_attribute = %config.id_attribute,
        "enigma listening"
    );
    axum::serve(listener, app).await
}

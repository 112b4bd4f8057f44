// Product quick-search web server
//
// This binary starts the web server with:
// - Actix-web for HTTP serving
// - The products API route
// - A shared upstream REST database client

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    use actix_web::{web, App, HttpServer};
    use product_quicksearch::web_app::api::{handlers, upstream::UpstreamClient};
    use product_quicksearch::web_app::config::AppConfig;
    use tracing_subscriber::EnvFilter;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded: {:?}", config);

    let upstream = web::Data::new(UpstreamClient::new(config.upstream.clone())?);

    tracing::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            // Share the upstream client (and its connection pool) across workers
            .app_data(upstream.clone())
            .configure(handlers::configure)
    })
    .bind(&config.bind_addr)?
    .run()
    .await?;

    Ok(())
}

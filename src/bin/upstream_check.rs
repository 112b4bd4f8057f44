use anyhow::Result;
use product_quicksearch::web_app::api::queries::to_upstream_query;
use product_quicksearch::web_app::api::upstream::UpstreamClient;
use product_quicksearch::web_app::config::AppConfig;
use product_quicksearch::web_app::model::Product;
use product_quicksearch::web_app::pages::SearchState;

fn main() -> Result<()> {
    // Create a Tokio runtime explicitly, no server needed
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async_main())
}

async fn async_main() -> Result<()> {
    println!("Testing upstream product database...");

    let config = AppConfig::from_env()?;
    let client = UpstreamClient::new(config.upstream.clone())?;

    // Same request a fresh page session sends, optionally filtered
    let mut request = SearchState::default().request();
    if let Some(filter) = std::env::args().nth(1) {
        request.filter = Some(filter);
    }

    let query = to_upstream_query(&request);
    println!("Upstream: {}", config.upstream.base_url);
    println!("Query:    {}", query.encode());

    let body = client.fetch_products(&request).await?;
    let products: Vec<Product> = serde_json::from_value(body)?;
    println!("✓ Received {} products", products.len());

    for product in products.iter().take(10) {
        println!(
            "  - #{} {} (abv {}, vintage {})",
            product.numeric_id, product.name, product.abv, product.vintage_year
        );
    }

    Ok(())
}

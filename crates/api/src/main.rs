use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockroom_observability::init();

    let po_base = match std::env::var("STOCKROOM_PO_BASE") {
        Ok(v) => v
            .parse::<u64>()
            .context("STOCKROOM_PO_BASE must be an integer")?,
        Err(_) => stockroom_store::order_store::DEFAULT_PO_BASE,
    };
    let addr = std::env::var("STOCKROOM_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let app = stockroom_api::app::build_app(po_base);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

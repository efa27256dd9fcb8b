//! Binary entrypoint for the LabelForge API server.
use labelforge_api::run;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Default listen address can be overridden with LABELFORGE_ADDR
    let addr = std::env::var("LABELFORGE_ADDR").unwrap_or_else(|_| "0.0.0.0:8790".to_string());
    run(&addr).await;
}

use breadth_renderer::TableRenderer;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080/api/breadth_data";

/// One-shot entry point: fetch the breadth dataset once and print the
/// rendered table container fragment to stdout. Diagnostics go to stderr
/// so the fragment stays clean for piping.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let endpoint =
        std::env::var("BREADTH_API_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_owned());
    info!(%endpoint, "rendering breadth table");

    let renderer = TableRenderer::new(endpoint);
    println!("{}", renderer.run().await);

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,breadth_renderer=debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

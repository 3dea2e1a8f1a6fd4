use breadth_services::collector::Collector;
use breadth_services::polygon::PolygonClient;
use breadth_services::{config::Config, database, routes, universe};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

const BUILD_DATE: &str = env!("BUILD_DATE");
const BUILD_COMMIT: &str = env!("BUILD_COMMIT");
const BUILD_BRANCH: &str = env!("BUILD_BRANCH");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    print_build_info();

    let config = Config::init()?;
    info!(
        environment = %config.environment(),
        server_addr = %config.server_addr(),
        port = %config.port(),
        "Configuration loaded"
    );

    let pool = database::create_pool(&config).await?;
    let storage = database::SqliteStorage::new(pool);
    storage.init_schema().await?;

    let universes = universe::load_universes(Path::new(config.data_dir()));
    info!(count = universes.len(), "Ticker universes loaded");

    // Collection runs in the background for the life of the server.
    let collector = Collector::new(
        storage.clone(),
        PolygonClient::new(config.polygon_api_key()),
        universes,
        config.collect_interval(),
    );
    tokio::spawn(collector.run());

    let route = routes(storage);

    let addr = SocketAddr::from((config.server_addr().parse::<IpAddr>()?, config.port()));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, route).await?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,breadth_services=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn print_build_info() {
    info!("===========================================");
    info!("  Breadth Services");
    info!("===========================================");
    info!("Build Date:   {}", BUILD_DATE);
    info!("Build Commit: {}", BUILD_COMMIT);
    info!("Build Branch: {}", BUILD_BRANCH);
    info!("===========================================");
}

use pdre_server::config::ServerConfig;
use pdre_server::logging;
use pdre_server::store::MemoryStore;
use pdre_server::web::{AppState, create_router};
use tracing::info;

#[tokio::main]
async fn main() {
    logging::init();

    let config = ServerConfig::from_env();

    // Seed the store, or start empty
    let store = match &config.data_path {
        Some(path) => {
            let store = MemoryStore::from_json_file(path).expect("Failed to load dataset");
            info!(path = %path.display(), "loaded dataset");
            store
        }
        None => MemoryStore::default(),
    };

    let addr = config.bind_addr;
    let state = AppState::new(store, config);
    let app = create_router(state);

    info!(%addr, "capacity server listening");
    info!("  GET  /health                     - Health check");
    info!("  POST /capacity/object            - Compute one object");
    info!("  POST /capacity/area              - Aggregate a list of objects");
    info!("  GET  /areas                      - List protected areas");
    info!("  PUT  /areas/:id                  - Create or update an area");
    info!("  GET  /areas/:id/objects          - Active objects of an area");
    info!("  POST /areas/:id/calculate        - Run and store an area calculation");
    info!("  GET  /areas/:id/calculations     - Calculation history");
    info!("  PUT  /objects/:id                - Create or replace an object");
    info!("  POST /objects/:id/recalculate    - Recalculate one object");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

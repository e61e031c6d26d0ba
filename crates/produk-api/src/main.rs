use produk_api::{setup, telemetry};
use produk_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    telemetry::init_telemetry();

    // Initialize the application (state, routes)
    let (state, router) = setup::initialize_app(config)?;

    // Start the server
    setup::server::start_server(&state.config, router).await?;

    Ok(())
}

use filefacts_core::Config;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (telemetry, access provider, clients, routes)
    let (state, router) = filefacts_api::setup::initialize_app(config.clone())?;

    // Start the server
    filefacts_api::setup::server::start_server(&config, state, router).await?;

    Ok(())
}

use web_server::StorageBackend;

// This main function is the entry point when running `cargo run -p web-server`.
// It serves against MySQL using settings alone; the `storefront` binary offers more options.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let settings = configuration::load_settings()?;
    let _log_guard = configuration::init_tracing(&settings.logging)?;
    web_server::run_server(settings, StorageBackend::MySql).await
}

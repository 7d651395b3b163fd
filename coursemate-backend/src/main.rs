use coursemate_backend::{AiBridge, Config, DataStore, LoadOutcome, OllamaClient};
use dotenv::dotenv;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    log::info!("CourseMate backend v{}", env!("CARGO_PKG_VERSION"));
    let config = Config::from_env();
    log::info!("Using data file: {}", config.data_file.display());

    let mut store = DataStore::load(&config.data_file);
    if let LoadOutcome::Fallback { reason } = store.load_outcome() {
        log::warn!("[STORE] Started with default data: {}", reason);
    }
    let data = store.data();
    log::info!(
        "[STORE] {} notebooks, {} notes, {} study + {} planner templates, {} tasks",
        data.notebooks.len(),
        data.note_count(),
        data.templates.len(),
        data.planner_templates.len(),
        data.tasks.len()
    );

    let bridge = OllamaClient::from_config(&config);
    if bridge.is_available().await {
        let models = bridge.list_models().await;
        log::info!("[AI] Ollama at {} is up, models: {:?}", bridge.base_url(), models);
        let configured = &store.settings().ai_model;
        if !models.is_empty() && !models.iter().any(|m| m == configured || m.starts_with(&format!("{}:", configured))) {
            log::warn!("[AI] Configured model {} is not installed", configured);
        }
    } else {
        log::warn!("[AI] Ollama is not reachable at {}, AI features disabled", bridge.base_url());
    }

    if let Err(e) = store.flush_if_dirty() {
        log::error!("[STORE] Initial save failed: {}", e);
    }

    log::info!("Ready. Press Ctrl+C to exit.");
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }

    match store.flush_if_dirty() {
        Ok(true) => log::info!("[STORE] Saved pending changes on exit"),
        Ok(false) => {}
        Err(e) => log::error!("[STORE] Final save failed: {}", e),
    }
}

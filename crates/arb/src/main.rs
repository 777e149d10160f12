use std::sync::Arc;

use arb_azure::AzureOpenAiClient;

use arb_core::{config::Config, model::profiles::ModelId, store::ConfigStore, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    arb_core::logging::init("arb")?;

    let cfg = match Config::load() {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            tracing::error!("refusing to start: {e}");
            return Err(e);
        }
    };

    // Lives for the whole process; nothing is persisted.
    let store = Arc::new(ConfigStore::new());
    let completion = Arc::new(AzureOpenAiClient::new(cfg.request_timeout)?);

    tracing::info!(
        models = ?ModelId::all().map(ModelId::as_str).collect::<Vec<_>>(),
        timeout_secs = cfg.request_timeout.as_secs(),
        "starting Azure OpenAI relay bot"
    );

    arb_telegram::router::run_polling(cfg, store, completion)
        .await
        .map_err(|e| Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}

//! Static and templated user-facing texts.

use chrono::Local;

use crate::{
    model::profiles::{ModelId, MODEL_PROFILES},
    store::UserConfig,
};

const COMMAND_LIST: &str = "/config - Configure API credentials\n\
/model - Pick or switch the model\n\
/status - Show current configuration\n\
/clear - Clear conversation history\n\
/help - Show help";

fn model_lines() -> String {
    MODEL_PROFILES
        .iter()
        .map(|p| format!("{} ({})", p.display_label, p.id))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn welcome() -> String {
    format!(
        "🤖 Azure OpenAI Telegram Bot\n\n\
Supported models:\n{models}\n\n\
Getting started:\n\
1️⃣ /config - configure your Azure OpenAI API\n\
2️⃣ /model - choose a model\n\
3️⃣ send any message to start chatting\n\n\
Commands:\n{COMMAND_LIST}\n\n\
🔒 Each user's configuration is kept separately, in memory only.",
        models = model_lines()
    )
}

pub fn help() -> String {
    format!(
        "🆘 Azure OpenAI Bot guide\n\n\
🚀 Supported models:\n{models}\n\n\
📋 Commands:\n\
/start - Welcome message\n\
/config <API_KEY> <ENDPOINT> - Configure Azure API\n\
/model [MODEL] - Pick or switch the model\n\
/status - Show current configuration\n\
/clear - Clear conversation history\n\
/help - Show this guide\n\n\
🔧 Steps:\n\
1️⃣ Get an Azure OpenAI API key and endpoint\n\
2️⃣ Run /config with them\n\
3️⃣ Run /model to choose a deployment\n\
4️⃣ Send a message\n\n\
⚠️ Security:\n\
• Configure your key in a private chat\n\
• Delete the message containing the key afterwards\n\
• Rotate your API key regularly\n\n\
Configuration lives in memory only and is lost when the bot restarts.",
        models = model_lines()
    )
}

pub fn config_usage() -> String {
    let deployments = MODEL_PROFILES
        .iter()
        .map(|p| format!("• {}", p.id))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "🔧 Configure Azure OpenAI API\n\n\
Usage:\n\
/config <API_KEY> <ENDPOINT>\n\n\
Example:\n\
/config sk-abcd1234... https://your-resource.openai.azure.com\n\n\
• API_KEY: your Azure OpenAI key\n\
• ENDPOINT: your Azure OpenAI endpoint URL (https://)\n\n\
⚠️ Configure in a private chat and delete the message afterwards.\n\n\
Supported deployment names:\n{deployments}\n\n\
Make sure these models are deployed in your Azure resource!"
    )
}

pub fn config_saved(config: &UserConfig) -> String {
    let endpoint = config
        .credentials
        .as_ref()
        .map(|c| c.endpoint_base.as_str())
        .unwrap_or_default();
    format!(
        "✅ API configuration saved!\n\n\
🌐 Endpoint: {endpoint}\n\
🤖 Current model: {model}\n\
🕒 Configured at: {at}\n\n\
⚠️ Please delete the message containing your API key now!\n\n\
💡 Next: use /model to pick a model, then start chatting.",
        model = config.model.profile().display_label,
        at = local_time(config),
    )
}

pub fn model_menu(current: ModelId, configured: bool) -> String {
    let mut out = format!(
        "🔄 Choose the AI model\n\nCurrent model: {}\n\nTap a button to switch:",
        current.profile().display_label
    );
    if !configured {
        out.push_str("\n\n⚠️ No API credentials yet: /config <API_KEY> <ENDPOINT>");
    }
    out
}

pub fn model_switched(old: Option<ModelId>, new: ModelId) -> String {
    let old = old.map(|m| m.profile().display_label).unwrap_or("none");
    format!(
        "✅ Model switched!\n\n\
From: {old}\n\
To: {new}\n\n\
🚀 Send a message to try it.",
        new = new.profile().display_label
    )
}

pub const MODEL_SELECTION_CANCELLED: &str = "❌ Model selection cancelled";

pub fn model_comparison() -> String {
    let rows = MODEL_PROFILES
        .iter()
        .map(|p| {
            format!(
                "{}\n• max output: {} tokens\n• temperature: {}",
                p.display_label, p.max_output_tokens, p.temperature
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    format!(
        "📊 Model comparison\n\n{rows}\n\n\
Suggestions:\n\
• Complex tasks → GPT-4 / GPT-4.1\n\
• Everyday chat → GPT-4o / GPT-3.5 Turbo 0125\n\
• Something different → Grok-3"
    )
}

pub fn status(config: Option<&UserConfig>) -> String {
    let Some(config) = config else {
        return "❌ Not configured yet\n\nUse /config to set up your Azure OpenAI API".to_string();
    };

    let key = if config.credentials.is_some() {
        "✅ configured"
    } else {
        "❌ not configured"
    };
    let endpoint = config
        .credentials
        .as_ref()
        .map(|c| c.endpoint_base.as_str())
        .unwrap_or("❌ not configured");
    let complete = if config.is_complete() {
        "✅ complete"
    } else {
        "⚠️ incomplete"
    };

    format!(
        "📊 Current configuration\n\n\
🔑 API key: {key}\n\
🌐 Endpoint: {endpoint}\n\
🤖 Model: {model}\n\
🕒 Updated at: {at}\n\n\
📈 Available models: {count}\n\
🛡️ Status: {complete}\n\n\
💡 /model to switch, /config to reconfigure",
        model = config.model.profile().display_label,
        at = local_time(config),
        count = MODEL_PROFILES.len(),
    )
}

pub const HISTORY_CLEARED: &str =
    "🗑️ Conversation history cleared!\n\nEvery message is already handled on its own, so you can just keep chatting.";

pub fn unknown_command(name: &str) -> String {
    format!("Unknown command /{name}. Send /help for the command list.")
}

pub fn thinking(label: &str) -> String {
    format!("🤔 {label} is thinking...")
}

fn local_time(config: &UserConfig) -> String {
    config
        .updated_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

use crate::api::BotConfigInputs;
use crate::cache::{CacheKey, Payload};
use crate::operations::Operation;

/// Top-level pages of the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    BotConfig,
    #[default]
    Salesforce,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::BotConfig, Page::Salesforce];

    /// Name used in the configuration file
    pub fn name(&self) -> &'static str {
        match self {
            Page::BotConfig => "bot-config",
            Page::Salesforce => "salesforce",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|page| page.name() == name)
    }

    pub fn next(&self) -> Self {
        match self {
            Page::BotConfig => Page::Salesforce,
            Page::Salesforce => Page::BotConfig,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Navigation
    SwitchPage(Page),

    // Cache lifecycle
    Fetch(CacheKey),
    Fetched {
        key: CacheKey,
        result: Result<Payload, String>,
    },
    Invalidate(CacheKey),
    RevalidateAll,
    LoadBotConfigInputs,
    BotConfigInputsLoaded(Result<BotConfigInputs, String>),

    // Mutations
    Run(Operation),

    // UI operations
    ShowDialog(DialogType),
    HideDialog,

    // App control
    Quit,
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogType {
    Error(String),
    Info(String),
    ConfirmDeleteCredential { credential_id: i64 },
    Help,
    Logs,
}

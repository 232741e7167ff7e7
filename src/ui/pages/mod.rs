//! Admin pages. Each page owns the data it reads and derives what it shows
//! from that data alone; side effects leave the page as actions.

pub mod bot_config;
pub mod salesforce;

pub use bot_config::{BotConfigPage, BotConfigView};
pub use salesforce::{SalesforcePage, SalesforceView};

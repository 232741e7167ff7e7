//! Reusable UI components

pub mod badge;
pub mod card_section;
pub mod connector_table;
pub mod form;
pub mod status_bar;
pub mod tooltip;

// Component architecture
pub mod dialog_component;
pub mod dialogs;

// Component exports
pub use card_section::CardSection;
pub use connector_table::{ConnectorRow, ConnectorTable};
pub use dialog_component::DialogComponent;
pub use form::{FieldKind, Form, FormEvent, FormField, FormValue, FormValues};
pub use status_bar::StatusBar;
pub use tooltip::{TooltipContent, TooltipProvider, TooltipTrigger};

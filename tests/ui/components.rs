
#[path = "components/dialog_component.rs"]
mod dialog_component;

#[path = "components/form.rs"]
mod form;

#[path = "components/tooltip.rs"]
mod tooltip;

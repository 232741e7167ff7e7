use crate::{api::AdminApi, config::Config, logger::Logger};
use std::sync::Arc;

/// Services shared by the application shell
#[derive(Clone)]
pub struct AppContext {
    pub api: Arc<dyn AdminApi>,
    pub config: Config,
    pub logger: Logger,
}

impl AppContext {
    pub fn new(api: Arc<dyn AdminApi>, config: Config, logger: Logger) -> Self {
        Self { api, config, logger }
    }
}

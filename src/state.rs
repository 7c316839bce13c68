use std::sync::Arc;

use crate::auth::IdentityProvider;
use crate::config::Config;
use crate::notify::Notifier;
use crate::store::SharedStore;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub config: Config,
    pub notifier: Arc<dyn Notifier>,
    pub identity: Arc<dyn IdentityProvider>,
}

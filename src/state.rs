use std::sync::Arc;

use crate::database::{Repository, RowStore};
use crate::models::{Item, User};

/// Shared handles every request handler needs. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub app_name: Arc<str>,
    pub items: Repository<Item>,
    pub users: Repository<User>,
}

impl AppState {
    pub fn new(store: Arc<dyn RowStore>, app_name: impl Into<String>) -> Self {
        Self {
            app_name: Arc::from(app_name.into()),
            items: Repository::new(Arc::clone(&store)),
            users: Repository::new(store),
        }
    }
}

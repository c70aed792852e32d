pub mod books;
pub mod hello;
pub mod items;

use folio_kernel::settings::{Deployment, Settings};
use folio_kernel::ModuleRegistry;
use serde::Serialize;

/// Body of the message-only endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Register the modules served by the configured deployment
pub fn register_all(registry: &mut ModuleRegistry, settings: &Settings) {
    match settings.deployment {
        Deployment::BooksV1 | Deployment::BooksV2 => {
            if let Some(latest) = settings.deployment.latest_books_version() {
                registry.register(books::create_module(&settings.store.data_dir, latest));
            }
        }
        Deployment::Header => registry.register(items::create_module()),
        Deployment::Url => registry.register(hello::create_module()),
    }
}

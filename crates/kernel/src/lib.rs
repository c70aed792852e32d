pub mod module;
pub mod registry;
pub mod settings;
pub mod version;

pub use module::{InitCtx, Module};
pub use registry::ModuleRegistry;
pub use version::{ApiVersion, UnsupportedVersion};

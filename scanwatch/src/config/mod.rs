mod loader;
mod types;
mod validator;

pub use loader::load_from_path;
pub use types::{Config, LoggingConfig, XdpConfig, XdpMode};
pub use validator::validate;

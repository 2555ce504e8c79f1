pub mod rules;
pub mod user;

pub use rules::{TemplateRule, TemplateType, DEFAULT_API_VERSION};
pub use user::{load_user_config, load_user_config_from, UserConfig};

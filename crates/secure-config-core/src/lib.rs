pub mod error;
pub mod render;
pub mod source;
pub mod types;
pub mod view;

pub use error::{ConfigError, Result};
pub use render::{
    render_config, render_details, render_error, render_json, render_view, PLACEHOLDER,
};
pub use source::ConfigSource;
pub use types::{ProtectedConfig, PublicConfig, API_KEY_HEADER};
pub use view::{ViewState, ViewStateHolder};

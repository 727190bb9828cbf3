mod load;
mod types;

pub use load::{apply_overrides, load, load_default, CONFIG_ENV, CONFIG_FILE_NAME};
pub use types::*;

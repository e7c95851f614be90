pub mod logging;
pub mod manifest;
pub mod output;
pub mod progress;
pub mod types;
pub mod utils;

pub use logging::*;
pub use manifest::read_manifest;
pub use output::{default_output_path, write_records};
pub use progress::create_count_progress_bar;
pub use types::*;
pub use utils::*;

pub mod extract;
pub mod locate;

pub use extract::run_extract;
pub use locate::run_locate;

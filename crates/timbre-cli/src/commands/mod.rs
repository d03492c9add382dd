pub mod config;
pub mod descriptors;
pub mod search;
pub mod status;

pub use descriptors::show_descriptors;
pub use search::run_search;
pub use status::show_status;

pub mod pages;
pub mod rows;
pub mod steps;
pub mod summary;

pub use rows::{counts_label, flatten_elements, page_interactions, ElementRow, InteractionRow};
pub use steps::{capture_steps, derive_steps, report_steps};
pub use summary::{run_header, RunHeader};

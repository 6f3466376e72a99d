pub mod record;
pub mod submission;

pub use record::{Record, RecordRef};
pub use submission::Submission;

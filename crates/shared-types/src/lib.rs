pub mod types;

pub use types::{AlertRecord, DocumentRef, SeenSet};

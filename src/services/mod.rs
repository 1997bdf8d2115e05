//! Services orchestrating the client and entity models.

mod timeline;

pub use timeline::{TimelineOutcome, TimelineService, NO_DATES_MESSAGE};

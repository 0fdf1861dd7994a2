//! Bucket/object lifecycle: ensure the bucket, round-trip one object through
//! it, then remove what was created.

pub mod key;
mod sequencer;
pub mod state;
pub mod wait;

pub use key::{DOWNLOAD_SUFFIX, KeyMode, download_path, object_key};
pub use sequencer::{Lifecycle, LifecycleOptions};
pub use state::{LifecycleState, Stage};
pub use wait::{WaitPolicy, poll_until};

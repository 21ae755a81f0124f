//! Audio slicing and clip serialization.

mod recording;
mod writer;

pub use recording::{ClipBuffer, Recording, Samples, slice_file};
pub use writer::{ClipWriter, write_wav};

//! Transcript text cleaning.

mod normalize;

pub use normalize::normalize;

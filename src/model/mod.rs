mod sample;
mod timestamp;

pub use sample::*;
pub use timestamp::*;

pub mod encoder;
mod sink;
pub mod writer;

pub use encoder::{Encoder, JsonEncoder};
pub use sink::{open_store, OpenMode, Sink};
pub use writer::{Durable, LineWriter, Writer};

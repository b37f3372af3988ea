use crate::error::Result;
use crate::model::MetricSample;

pub trait Encoder {
    /// Encodes a sample as a single line, without the trailing delimiter.
    fn encode(&self, sample: &MetricSample) -> Result<Vec<u8>>;
}

use serde_json;

use super::encoder::Encoder;
use crate::error::{Error, ErrorKind, Result};
use crate::model::MetricSample;

// {"cpu":71.3,"memory":84.1,"disk":55.0,"network":1012.7,"time":"2021-01-01T00:00:00.250+01:00"}
pub struct JsonEncoder {}

impl JsonEncoder {
    pub fn new() -> Self {
        Self {}
    }
}

impl Encoder for JsonEncoder {
    fn encode(&self, sample: &MetricSample) -> Result<Vec<u8>> {
        // serde_json quietly turns NaN and infinities into null.
        if let Some((name, _)) = sample.values().iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::new(
                ErrorKind::Serialization,
                &format!("field '{}' is not a finite number", name),
            ));
        }

        serde_json::to_vec(sample)
            .map_err(|e| (ErrorKind::Serialization, "JSON serialization failed", e).into())
    }
}

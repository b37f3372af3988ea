use serde::{Deserialize, Serialize};

use super::timestamp::{self, Timestamp};

pub type SampleValue = f64;

/// One synthetic reading of a host's resource utilization.
///
/// Field order is the order of the keys in the encoded JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    cpu: SampleValue,
    memory: SampleValue,
    disk: SampleValue,
    network: SampleValue,
    #[serde(with = "timestamp::rfc3339")]
    time: Timestamp,
}

impl MetricSample {
    pub fn new(
        cpu: SampleValue,
        memory: SampleValue,
        disk: SampleValue,
        network: SampleValue,
        time: Timestamp,
    ) -> Self {
        Self {
            cpu,
            memory,
            disk,
            network,
            time,
        }
    }

    #[inline]
    pub fn cpu(&self) -> SampleValue {
        self.cpu
    }

    #[inline]
    pub fn memory(&self) -> SampleValue {
        self.memory
    }

    #[inline]
    pub fn disk(&self) -> SampleValue {
        self.disk
    }

    #[inline]
    pub fn network(&self) -> SampleValue {
        self.network
    }

    #[inline]
    pub fn time(&self) -> Timestamp {
        self.time
    }

    pub fn values(&self) -> [(&'static str, SampleValue); 4] {
        [
            ("cpu", self.cpu),
            ("memory", self.memory),
            ("disk", self.disk),
            ("network", self.network),
        ]
    }
}

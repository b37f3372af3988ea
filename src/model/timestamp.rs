use chrono::{DateTime, FixedOffset, Local, SecondsFormat};

/// Wall-clock capture time of a sample, keeping the local offset it was taken in.
pub type Timestamp = DateTime<FixedOffset>;

#[inline]
pub fn now() -> Timestamp {
    Local::now().into()
}

// RFC 3339 with as many fractional digits as needed and `Z` for UTC, e.g.
// 2021-01-01T00:00:00.250+01:00
pub fn to_rfc3339(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub mod rfc3339 {
    use chrono::DateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::{to_rfc3339, Timestamp};

    pub fn serialize<S: Serializer>(ts: &Timestamp, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&to_rfc3339(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Timestamp, D::Error> {
        let s = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&s).map_err(de::Error::custom)
    }
}

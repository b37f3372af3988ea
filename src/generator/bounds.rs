use crate::model::SampleValue;

const PERCENT_MIN: SampleValue = 0.0;
const PERCENT_MAX: SampleValue = 100.0;

/// What to do with draws that fall outside a field's meaningful range.
///
/// The distributions have unbounded support (normal) or sit close to the
/// edge of it, so `cpu` can exceed 100 or go negative. `Unbounded` keeps
/// the raw draws; `Clamped` pins the percentage fields to `[0, 100]` and
/// throughput to `>= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bounds {
    Unbounded,
    Clamped,
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::Unbounded
    }
}

impl Bounds {
    #[inline]
    pub fn percent(&self, value: SampleValue) -> SampleValue {
        match self {
            Bounds::Unbounded => value,
            Bounds::Clamped => value.max(PERCENT_MIN).min(PERCENT_MAX),
        }
    }

    #[inline]
    pub fn throughput(&self, value: SampleValue) -> SampleValue {
        match self {
            Bounds::Unbounded => value,
            Bounds::Clamped => value.max(0.0),
        }
    }
}

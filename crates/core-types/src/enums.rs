use serde::{Deserialize, Serialize};

/// How a period-over-period change is derived from a level series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeConvention {
    /// `value[t] / value[t-1] - 1`, expressed as a fraction. Used for book
    /// equity (QoQ growth).
    Relative,
    /// `value[t] - value[t-1]`, in the units of the input. Used for rate
    /// levels (percentage points).
    Absolute,
}

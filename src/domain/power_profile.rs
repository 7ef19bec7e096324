use std::str::FromStr;

/// Power profile requested for an edge device through its desired properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerProfile {
    LowPower,
    Balanced,
    Performance,
}

impl FromStr for PowerProfile {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lowPower" => Ok(PowerProfile::LowPower),
            "balanced" => Ok(PowerProfile::Balanced),
            "performance" => Ok(PowerProfile::Performance),
            _ => Err(()),
        }
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a number is not one of the projected fiscal years.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("fiscal year {0} is outside the 2025-2028 phase-in")]
pub struct UnknownFiscalYear(pub u16);

/// One of the four fiscal years covered by the phase-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum FiscalYear {
    Y2025,
    Y2026,
    Y2027,
    Y2028,
}

impl FiscalYear {
    /// All years in chronological order.
    pub const ALL: [FiscalYear; 4] = [Self::Y2025, Self::Y2026, Self::Y2027, Self::Y2028];

    pub fn as_u16(&self) -> u16 {
        match self {
            Self::Y2025 => 2025,
            Self::Y2026 => 2026,
            Self::Y2027 => 2027,
            Self::Y2028 => 2028,
        }
    }

    /// Position of the year inside [`FiscalYear::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Self::Y2025 => 0,
            Self::Y2026 => 1,
            Self::Y2027 => 2,
            Self::Y2028 => 3,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        s.trim()
            .parse::<u16>()
            .ok()
            .and_then(|n| Self::try_from(n).ok())
    }

    /// True only for 2025, the year whose price is the untaxed base.
    pub fn is_base(&self) -> bool {
        matches!(self, Self::Y2025)
    }
}

impl TryFrom<u16> for FiscalYear {
    type Error = UnknownFiscalYear;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2025 => Ok(Self::Y2025),
            2026 => Ok(Self::Y2026),
            2027 => Ok(Self::Y2027),
            2028 => Ok(Self::Y2028),
            other => Err(UnknownFiscalYear(other)),
        }
    }
}

impl From<FiscalYear> for u16 {
    fn from(year: FiscalYear) -> Self {
        year.as_u16()
    }
}

impl fmt::Display for FiscalYear {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

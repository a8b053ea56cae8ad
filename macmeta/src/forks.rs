// SPDX-License-Identifier: MIT

//! Fork sizes and the data/rsrc/both selector.

use core::str::FromStr;

use crate::error::MetaError;

/// Allocation quantum assumed for attribute-backed resource forks, which
/// have no block count of their own.
pub const ALLOCATION_QUANTUM: u64 = 4096;

/// Rounds a logical size up to the allocation quantum. Empty stays empty.
pub const fn physical_size(logical: u64) -> u64 {
    if logical == 0 {
        0
    } else {
        logical.div_ceil(ALLOCATION_QUANTUM) * ALLOCATION_QUANTUM
    }
}

/// Logical and physical sizes of both forks of one item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForkSizes {
    pub data_logical: u64,
    pub data_physical: u64,
    pub rsrc_logical: u64,
    pub rsrc_physical: u64,
}

impl ForkSizes {
    pub const fn logical(&self, fork: ForkSelect) -> u64 {
        match fork {
            ForkSelect::Both => self.data_logical + self.rsrc_logical,
            ForkSelect::Data => self.data_logical,
            ForkSelect::Rsrc => self.rsrc_logical,
        }
    }

    pub const fn physical(&self, fork: ForkSelect) -> u64 {
        match fork {
            ForkSelect::Both => self.data_physical + self.rsrc_physical,
            ForkSelect::Data => self.data_physical,
            ForkSelect::Rsrc => self.rsrc_physical,
        }
    }

    pub const fn total_logical(&self) -> u64 {
        self.logical(ForkSelect::Both)
    }

    pub const fn total_physical(&self) -> u64 {
        self.physical(ForkSelect::Both)
    }
}

/// Which fork a size column reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForkSelect {
    #[default]
    Both,
    Data,
    Rsrc,
}

impl FromStr for ForkSelect {
    type Err = MetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "both" => Ok(ForkSelect::Both),
            "data" => Ok(ForkSelect::Data),
            "rsrc" => Ok(ForkSelect::Rsrc),
            _ => Err(MetaError::BadForkSelector(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physical_rounding() {
        assert_eq!(physical_size(0), 0);
        assert_eq!(physical_size(1), 4096);
        assert_eq!(physical_size(4096), 4096);
        assert_eq!(physical_size(4097), 8192);
    }

    #[test]
    fn test_selector_totals() {
        let sizes = ForkSizes {
            data_logical: 100,
            data_physical: 4096,
            rsrc_logical: 50,
            rsrc_physical: 4096,
        };
        assert_eq!(sizes.logical(ForkSelect::Both), 150);
        assert_eq!(sizes.logical(ForkSelect::Data), 100);
        assert_eq!(sizes.logical(ForkSelect::Rsrc), 50);
        assert_eq!(sizes.physical(ForkSelect::Both), 8192);
    }

    #[test]
    fn test_selector_parsing() {
        assert_eq!("both".parse::<ForkSelect>().unwrap(), ForkSelect::Both);
        assert_eq!("data".parse::<ForkSelect>().unwrap(), ForkSelect::Data);
        assert_eq!("rsrc".parse::<ForkSelect>().unwrap(), ForkSelect::Rsrc);
        assert!("resource".parse::<ForkSelect>().is_err());
        assert!("DATA".parse::<ForkSelect>().is_err());
    }
}

// SPDX-License-Identifier: MIT

bitflags::bitflags! {
    /// The 16-bit Finder flag word (`fdFlags` for files, `frFlags` for
    /// folders). Bits 1-3 are the color-label field, see [`crate::Label`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FinderFlags: u16 {
        const IS_ON_DESK       = 0x0001;
        const COLOR            = 0x000E;
        const IS_SHARED        = 0x0040;
        const HAS_NO_INITS     = 0x0080;
        const HAS_BEEN_INITED  = 0x0100;
        const HAS_CUSTOM_ICON  = 0x0400;
        const IS_STATIONERY    = 0x0800;
        const NAME_LOCKED      = 0x1000;
        const HAS_BUNDLE       = 0x2000;
        const IS_INVISIBLE     = 0x4000;
        const IS_ALIAS         = 0x8000;
    }
}

bitflags::bitflags! {
    /// The extended Finder flag word (`fdXFlags`/`frXFlags`), stored in the
    /// second half of the finder-info blob.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ExtendedFlags: u16 {
        const ROUTING_INFO     = 0x0004;
        const EXTENSION_HIDDEN = 0x0010;
        const CUSTOM_BADGE     = 0x0100;
        const INVALID          = 0x8000;
    }
}

/// The six flags the tools expose for setting, with their display name and
/// whether folders accept them. Order matches the tool option order.
pub const SETTABLE_FLAGS: [(FinderFlags, &str, bool); 6] = [
    (FinderFlags::HAS_CUSTOM_ICON, "HasCustomIcon", true),
    (FinderFlags::IS_STATIONERY, "Stationery", false),
    (FinderFlags::NAME_LOCKED, "NameLocked", true),
    (FinderFlags::HAS_BUNDLE, "HasBundle", false),
    (FinderFlags::IS_INVISIBLE, "Invisible", true),
    (FinderFlags::IS_ALIAS, "Alias", false),
];

impl FinderFlags {
    /// Six-character listing column: one letter per flag, `-` when clear.
    /// Positions are invisible, custom icon, locked, bundle, alias,
    /// stationery.
    pub fn short_string(self) -> String {
        let cols = [
            (FinderFlags::IS_INVISIBLE, 'I'),
            (FinderFlags::HAS_CUSTOM_ICON, 'C'),
            (FinderFlags::NAME_LOCKED, 'L'),
            (FinderFlags::HAS_BUNDLE, 'B'),
            (FinderFlags::IS_ALIAS, 'A'),
            (FinderFlags::IS_STATIONERY, 'S'),
        ];
        cols.iter()
            .map(|&(flag, c)| if self.contains(flag) { c } else { '-' })
            .collect()
    }

    /// Names of the set flags, in listing-column order. Empty when none of
    /// the six are set.
    pub fn describe(self) -> Vec<&'static str> {
        let names = [
            (FinderFlags::IS_INVISIBLE, "Invisible"),
            (FinderFlags::HAS_CUSTOM_ICON, "CustomIcon"),
            (FinderFlags::NAME_LOCKED, "NameLocked"),
            (FinderFlags::HAS_BUNDLE, "BundleBit"),
            (FinderFlags::IS_ALIAS, "Alias"),
            (FinderFlags::IS_STATIONERY, "Stationery"),
        ];
        names
            .iter()
            .filter(|&&(flag, _)| self.contains(flag))
            .map(|&(_, name)| name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_string_positions() {
        assert_eq!(FinderFlags::empty().short_string(), "------");
        assert_eq!(FinderFlags::IS_INVISIBLE.short_string(), "I-----");
        assert_eq!(FinderFlags::IS_STATIONERY.short_string(), "-----S");

        let all = FinderFlags::IS_INVISIBLE
            | FinderFlags::HAS_CUSTOM_ICON
            | FinderFlags::NAME_LOCKED
            | FinderFlags::HAS_BUNDLE
            | FinderFlags::IS_ALIAS
            | FinderFlags::IS_STATIONERY;
        assert_eq!(all.short_string(), "ICLBAS");
    }

    #[test]
    fn test_describe() {
        let flags = FinderFlags::IS_ALIAS | FinderFlags::HAS_CUSTOM_ICON;
        assert_eq!(flags.describe(), vec!["CustomIcon", "Alias"]);
        assert!(FinderFlags::empty().describe().is_empty());
        // The label field is not one of the six display flags.
        assert!(FinderFlags::COLOR.describe().is_empty());
    }

    #[test]
    fn test_known_bit_values() {
        assert_eq!(FinderFlags::IS_ALIAS.bits(), 0x8000);
        assert_eq!(FinderFlags::IS_INVISIBLE.bits(), 0x4000);
        assert_eq!(FinderFlags::COLOR.bits(), 0x000E);
        assert_eq!(ExtendedFlags::EXTENSION_HIDDEN.bits(), 0x0010);
    }
}

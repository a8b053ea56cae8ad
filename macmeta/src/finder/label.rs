// SPDX-License-Identifier: MIT

//! Finder color labels.
//!
//! A label is a 3-bit field packed into bits 1-3 of the Finder flag word.
//! The on-disk field value and the label numbering the tools expose are two
//! different orderings; both are fixed by history and encoded in the tables
//! below.

use core::fmt;
use core::str::FromStr;

use crate::error::MetaError;
use crate::finder::flags::FinderFlags;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Label {
    #[default]
    None = 0,
    Red = 1,
    Orange = 2,
    Yellow = 3,
    Green = 4,
    Blue = 5,
    Purple = 6,
    Gray = 7,
}

/// On-disk color-field value (0-7) to label.
const FIELD_TO_LABEL: [Label; 8] = [
    Label::None,
    Label::Gray,
    Label::Green,
    Label::Purple,
    Label::Blue,
    Label::Yellow,
    Label::Red,
    Label::Orange,
];

impl Label {
    pub const ALL: [Label; 8] = [
        Label::None,
        Label::Red,
        Label::Orange,
        Label::Yellow,
        Label::Green,
        Label::Blue,
        Label::Purple,
        Label::Gray,
    ];

    /// Tool-facing label number (index into [`Label::ALL`]).
    pub const fn number(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Label::None => "None",
            Label::Red => "Red",
            Label::Orange => "Orange",
            Label::Yellow => "Yellow",
            Label::Green => "Green",
            Label::Blue => "Blue",
            Label::Purple => "Purple",
            Label::Gray => "Gray",
        }
    }

    /// On-disk value of the 3-bit color field.
    const fn field(self) -> u16 {
        match self {
            Label::None => 0,
            Label::Gray => 1,
            Label::Green => 2,
            Label::Purple => 3,
            Label::Blue => 4,
            Label::Yellow => 5,
            Label::Red => 6,
            Label::Orange => 7,
        }
    }

    pub fn from_flags(flags: FinderFlags) -> Label {
        let field = (flags.bits() & FinderFlags::COLOR.bits()) >> 1;
        FIELD_TO_LABEL[field as usize]
    }

    /// Replaces the color field in `flags`, leaving every other bit alone.
    pub fn apply(self, flags: FinderFlags) -> FinderFlags {
        let bits = (flags.bits() & !FinderFlags::COLOR.bits()) | (self.field() << 1);
        FinderFlags::from_bits_retain(bits)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Label {
    type Err = MetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Label::ALL
            .into_iter()
            .find(|l| l.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| MetaError::UnknownLabel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_decoding_table() {
        // Every on-disk field value maps to the documented label.
        let expected = [
            (0b000, Label::None),
            (0b001, Label::Gray),
            (0b010, Label::Green),
            (0b011, Label::Purple),
            (0b100, Label::Blue),
            (0b101, Label::Yellow),
            (0b110, Label::Red),
            (0b111, Label::Orange),
        ];
        for (field, label) in expected {
            let flags = FinderFlags::from_bits_retain(field << 1);
            assert_eq!(Label::from_flags(flags), label, "field {field:#05b}");
        }
    }

    #[test]
    fn test_apply_round_trips_all_labels() {
        for label in Label::ALL {
            let flags = label.apply(FinderFlags::empty());
            assert_eq!(Label::from_flags(flags), label);
        }
    }

    #[test]
    fn test_apply_preserves_other_bits() {
        let base = FinderFlags::IS_INVISIBLE | FinderFlags::HAS_CUSTOM_ICON;
        let with_red = Label::Red.apply(base);
        assert!(with_red.contains(FinderFlags::IS_INVISIBLE));
        assert!(with_red.contains(FinderFlags::HAS_CUSTOM_ICON));
        assert_eq!(Label::from_flags(with_red), Label::Red);

        // Re-labeling replaces the field instead of accumulating bits.
        let with_blue = Label::Blue.apply(with_red);
        assert_eq!(Label::from_flags(with_blue), Label::Blue);
        assert!(with_blue.contains(FinderFlags::IS_INVISIBLE));

        let cleared = Label::None.apply(with_blue);
        assert_eq!(cleared.bits() & FinderFlags::COLOR.bits(), 0);
    }

    #[test]
    fn test_numbering_matches_names() {
        assert_eq!(Label::Red.number(), 1);
        assert_eq!(Label::Gray.number(), 7);
        for (i, label) in Label::ALL.into_iter().enumerate() {
            assert_eq!(label.number() as usize, i);
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!("Red".parse::<Label>().unwrap(), Label::Red);
        assert_eq!("orange".parse::<Label>().unwrap(), Label::Orange);
        assert_eq!("NONE".parse::<Label>().unwrap(), Label::None);
        assert!("Chartreuse".parse::<Label>().is_err());
    }
}

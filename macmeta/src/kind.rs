// SPDX-License-Identifier: MIT

//! Finder-style kind strings and the creator registry.

use crate::finder::{FinderData, FinderFlags};
use crate::ostype::OsType;
use crate::store::ItemKind;

/// Well-known classic creator codes. The old launch-services lookup is
/// gone; this table is the portable stand-in for "which application owns
/// this creator".
const CREATOR_APPS: &[(OsType, &str)] = &[
    (OsType(*b"MACS"), "Finder"),
    (OsType(*b"ttxt"), "SimpleText"),
    (OsType(*b"R*ch"), "BBEdit"),
    (OsType(*b"8BIM"), "Adobe Photoshop"),
    (OsType(*b"MSWD"), "Microsoft Word"),
    (OsType(*b"XCEL"), "Microsoft Excel"),
    (OsType(*b"CARO"), "Acrobat Reader"),
    (OsType(*b"MOSS"), "Netscape"),
    (OsType(*b"sfri"), "Safari"),
    (OsType(*b"hook"), "iTunes"),
];

/// Application name registered for a creator code, if any.
pub fn application_for(creator: OsType) -> Option<&'static str> {
    CREATOR_APPS
        .iter()
        .find(|&&(code, _)| code == creator)
        .map(|&(_, name)| name)
}

/// The kind string the Finder would show for an item.
pub fn kind_string(kind: ItemKind, data: &FinderData) -> String {
    if kind == ItemKind::File && data.flags().contains(FinderFlags::IS_ALIAS) {
        return "Alias".to_string();
    }
    if kind != ItemKind::File {
        return kind.name().to_string();
    }
    match data.file_type() {
        Some(t) if t == OsType::APPLICATION => "Application".to_string(),
        Some(t) if t == OsType::TEXT => "Plain Text Document".to_string(),
        Some(t) if !t.is_zero() => format!("{t} Document"),
        _ => "File".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creator_lookup() {
        assert_eq!(application_for(OsType::FINDER), Some("Finder"));
        assert_eq!(application_for(OsType(*b"ttxt")), Some("SimpleText"));
        assert_eq!(application_for(OsType(*b"zzzz")), None);
        assert_eq!(application_for(OsType::ZERO), None);
    }

    #[test]
    fn test_kind_strings() {
        let mut data = FinderData::empty(false);
        assert_eq!(kind_string(ItemKind::File, &data), "File");
        assert_eq!(kind_string(ItemKind::Symlink, &data), "Symbolic Link");

        data.set_file_type(OsType::TEXT);
        assert_eq!(kind_string(ItemKind::File, &data), "Plain Text Document");

        data.set_file_type(OsType::APPLICATION);
        assert_eq!(kind_string(ItemKind::File, &data), "Application");

        data.set_file_type("MooV".parse().unwrap());
        assert_eq!(kind_string(ItemKind::File, &data), "MooV Document");

        data.set_flags(FinderFlags::IS_ALIAS);
        assert_eq!(kind_string(ItemKind::File, &data), "Alias");

        let folder = FinderData::empty(true);
        assert_eq!(kind_string(ItemKind::Folder, &folder), "Folder");
    }
}

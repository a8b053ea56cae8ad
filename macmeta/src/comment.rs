// SPDX-License-Identifier: MIT

//! Finder comments.
//!
//! Stored as UTF-8 in the comment attribute. The Finder's own limit of 200
//! characters is kept so anything written here stays displayable.

/// Longest comment the tools will write, in characters.
pub const MAX_COMMENT_LEN: usize = 200;

pub fn encode(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

pub fn decode(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        assert_eq!(decode(&encode("needs review")), "needs review");
        assert_eq!(decode(&encode("")), "");
        assert_eq!(decode(&encode("þetta er íslenska")), "þetta er íslenska");
    }

    #[test]
    fn test_decode_tolerates_bad_utf8() {
        assert_eq!(decode(&[0x66, 0xFF, 0x6F]), "f\u{FFFD}o");
    }
}

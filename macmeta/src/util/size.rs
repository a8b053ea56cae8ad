// SPDX-License-Identifier: MIT

//! Byte-count formatting for the size columns.
//!
//! Two human-readable scales: base-2 (1024) and SI (1000), both printing one
//! decimal from kilobytes up. Column widths are fixed so listings line up.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeFormat {
    Bytes,
    #[default]
    Human,
    HumanSi,
}

impl SizeFormat {
    pub fn format(self, size: u64) -> String {
        match self {
            SizeFormat::Bytes => bytes_exact(size),
            SizeFormat::Human => human(size, 1024),
            SizeFormat::HumanSi => human(size, 1000),
        }
    }
}

/// Exact byte count, right-aligned to the widest column the tools print.
pub fn bytes_exact(size: u64) -> String {
    format!("{size:>15} B")
}

fn human(size: u64, base: u64) -> String {
    let kb = base;
    let mb = base * base;
    let gb = base * base * base;
    if size < kb {
        format!("{size:>5}  B")
    } else if size < mb {
        format!("{:>5.1} KB", size as f64 / kb as f64)
    } else if size < gb {
        format!("{:>5.1} MB", size as f64 / mb as f64)
    } else {
        format!("{:>5.1} GB", size as f64 / gb as f64)
    }
}

/// Placeholder printed in the size column for folders.
pub fn folder_placeholder(format: SizeFormat) -> &'static str {
    match format {
        SizeFormat::Bytes => "              -  ",
        SizeFormat::Human | SizeFormat::HumanSi => "    -   ",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base2_thresholds() {
        assert_eq!(SizeFormat::Human.format(0), "    0  B");
        assert_eq!(SizeFormat::Human.format(1023), " 1023  B");
        assert_eq!(SizeFormat::Human.format(1024), "  1.0 KB");
        assert_eq!(SizeFormat::Human.format(1_048_575), "1024.0 KB");
        assert_eq!(SizeFormat::Human.format(1_048_576), "  1.0 MB");
        assert_eq!(SizeFormat::Human.format(1_073_741_824), "  1.0 GB");
    }

    #[test]
    fn test_si_thresholds() {
        assert_eq!(SizeFormat::HumanSi.format(999), "  999  B");
        assert_eq!(SizeFormat::HumanSi.format(1000), "  1.0 KB");
        assert_eq!(SizeFormat::HumanSi.format(1_000_000), "  1.0 MB");
        assert_eq!(SizeFormat::HumanSi.format(1_000_000_000), "  1.0 GB");
    }

    #[test]
    fn test_exact_bytes() {
        assert_eq!(SizeFormat::Bytes.format(42), "             42 B");
        assert_eq!(bytes_exact(0), "              0 B");
    }

    #[test]
    fn test_rounding_shows_one_decimal() {
        assert_eq!(SizeFormat::Human.format(1536), "  1.5 KB");
        assert_eq!(SizeFormat::Human.format(2_621_440), "  2.5 MB");
    }
}

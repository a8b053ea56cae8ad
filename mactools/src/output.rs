use colored::{ColoredString, Colorize};
use macmeta::Label;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Quiet,
    Normal,
    Verbose,
}

static mut LOG_LEVEL: LogLevel = LogLevel::Normal;

pub fn set_log_level(level: LogLevel) {
    unsafe {
        LOG_LEVEL = level;
    }
}

pub fn log_level() -> LogLevel {
    unsafe { LOG_LEVEL }
}

/// Maps the tools' silent flag onto the log level.
pub fn set_silent(silent: bool) {
    if silent {
        set_log_level(LogLevel::Quiet);
    }
}

/// Status output for mutating tools; suppressed in silent mode.
#[macro_export]
macro_rules! status {
    ($($arg:tt)*) => {
        if $crate::output::log_level() != $crate::output::LogLevel::Quiet {
            println!("{}", format_args!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::output::log_level() == $crate::output::LogLevel::Verbose {
            println!("{}", format_args!($($arg)*));
        }
    };
}

/// Paints `text` in a label's color. Color the already-padded string, not
/// the other way around, or the escape codes break column alignment.
pub fn label_color(label: Label, text: &str) -> ColoredString {
    match label {
        Label::None => text.normal(),
        Label::Red => text.red(),
        Label::Orange => text.truecolor(0xff, 0xa5, 0x00),
        Label::Yellow => text.yellow(),
        Label::Green => text.green(),
        Label::Blue => text.blue(),
        Label::Purple => text.magenta(),
        Label::Gray => text.bright_black(),
    }
}

/// A label name in its own color.
pub fn paint_label(label: Label) -> ColoredString {
    label_color(label, label.name())
}

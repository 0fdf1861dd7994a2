//! Logging utilities for the application

/// Log levels for controlling verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Progress markers, always shown
    Normal = 0,
    /// Info level, one verbose flag (-v)
    Info = 1,
    /// Debug level, two verbose flags (-v -v)
    Debug = 2,
}

/// Where formatted log lines end up.
pub type Printer = Box<dyn Fn(&str)>;

/// Print a line to stdout
pub fn default_print(line: &str) {
    println!("{line}");
}

/// Logger for application messages
pub struct Logger {
    verbosity: u8,
    printer: Printer,
}

impl Logger {
    /// Create a new logger with the specified verbosity, printing to stdout
    #[must_use]
    pub fn new(verbosity: u8) -> Self {
        Self::with_printer(verbosity, Box::new(default_print))
    }

    /// Create a logger that hands every line to `printer` instead of stdout
    #[must_use]
    pub fn with_printer(verbosity: u8, printer: Printer) -> Self {
        Self { verbosity, printer }
    }

    /// Log a message if the current verbosity level is at least the specified level
    pub fn log(&self, msg: &str, level: LogLevel) {
        if let Some(line) = format_line(msg, self.verbosity, level) {
            (self.printer)(&line);
        }
    }

    /// Log at normal level (always displayed)
    pub fn normal(&self, msg: &str) {
        self.log(msg, LogLevel::Normal);
    }

    /// Log at info level (verbose >= 1)
    pub fn info(&self, msg: &str) {
        self.log(msg, LogLevel::Info);
    }

    /// Log at debug level (verbose >= 2)
    pub fn debug(&self, msg: &str) {
        self.log(msg, LogLevel::Debug);
    }
}

fn format_line(msg: &str, verbosity: u8, level: LogLevel) -> Option<String> {
    if verbosity < level as u8 {
        return None;
    }
    Some(match level {
        LogLevel::Normal => msg.to_string(),
        LogLevel::Info => format!("info: {msg}"),
        LogLevel::Debug => format!("dbg: {msg}"),
    })
}

// Module-level functions for when a Logger instance isn't available

/// Log a message to stdout if the verbosity level is at least the specified level
///
/// # Arguments
///
/// * `msg` - The message to log
/// * `verbosity` - The current verbosity level (0 = normal, 1 = info, 2+ = debug)
/// * `level` - The minimum level required for this message to be logged
pub fn log(msg: &str, verbosity: u8, level: LogLevel) {
    if let Some(line) = format_line(msg, verbosity, level) {
        default_print(&line);
    }
}

/// Log at info level (verbose >= 1)
pub fn info(msg: &str, verbosity: u8) {
    log(msg, verbosity, LogLevel::Info);
}

/// Log at debug level (verbose >= 2)
pub fn debug(msg: &str, verbosity: u8) {
    log(msg, verbosity, LogLevel::Debug);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn capturing(verbosity: u8) -> (Logger, Rc<RefCell<Vec<String>>>) {
        let lines = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&lines);
        let logger = Logger::with_printer(
            verbosity,
            Box::new(move |line| sink.borrow_mut().push(line.to_string())),
        );
        (logger, lines)
    }

    #[test]
    fn quiet_logger_only_prints_normal() {
        let (logger, lines) = capturing(0);
        logger.normal("DONE");
        logger.info("region us-west-2");
        logger.debug("request");
        assert_eq!(*lines.borrow(), vec!["DONE".to_string()]);
    }

    #[test]
    fn debug_logger_prefixes_levels() {
        let (logger, lines) = capturing(2);
        logger.info("a");
        logger.debug("b");
        assert_eq!(*lines.borrow(), vec!["info: a".to_string(), "dbg: b".to_string()]);
    }
}

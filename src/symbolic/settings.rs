//! # Settings
//!
//! Parser options and logging configuration. Settings are built in code with the
//! setters below or read from a small TOML document:
//! ```toml
//! case_sensitive = false
//! log_level = "debug"      # off | error | warn | info | debug | trace
//! log_to_console = true
//! log_file = "calculus.log"
//! ```
use crate::symbolic::error::{ExprError, Result};
use crate::symbolic::expression::Expr;
use crate::symbolic::numeric_domain::Domain;
use crate::symbolic::parser::parse;
use log::{LevelFilter, warn};
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::File;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub case_sensitive: bool,
    pub log_level: LevelFilter,
    pub log_to_console: bool,
    pub log_file: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            case_sensitive: false,
            log_level: LevelFilter::Info,
            log_to_console: true,
            log_file: None,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads settings from a TOML document; missing keys keep their defaults.
    ///
    /// # Errors
    /// `InvalidSettings` for malformed TOML, unknown keys or values of the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table = text
            .parse::<toml::Table>()
            .map_err(|e| ExprError::InvalidSettings(e.to_string()))?;
        let mut settings = Settings::default();
        for (key, value) in table.iter() {
            match key.as_str() {
                "case_sensitive" => settings.case_sensitive = expect_bool(key, value)?,
                "log_to_console" => settings.log_to_console = expect_bool(key, value)?,
                "log_level" => {
                    let level = expect_str(key, value)?;
                    settings.log_level = LevelFilter::from_str(level).map_err(|_| {
                        ExprError::InvalidSettings(format!("unknown log level \"{}\"", level))
                    })?;
                }
                "log_file" => settings.log_file = Some(expect_str(key, value)?.to_string()),
                _ => {
                    warn!("unknown settings key \"{}\"", key);
                    return Err(ExprError::InvalidSettings(format!(
                        "unknown key \"{}\"",
                        key
                    )));
                }
            }
        }
        Ok(settings)
    }

    pub fn set_case_sensitive(&mut self, case_sensitive: bool) -> &mut Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn set_log_level(&mut self, level: LevelFilter) -> &mut Self {
        self.log_level = level;
        self
    }

    pub fn set_console_logging(&mut self, enabled: bool) -> &mut Self {
        self.log_to_console = enabled;
        self
    }

    pub fn set_log_file(&mut self, filename: &str) -> &mut Self {
        self.log_file = Some(filename.to_string());
        self
    }

    /// parses `input` honouring the configured case sensitivity
    pub fn parse<T: Domain>(&self, input: &str) -> Result<Expr<T>> {
        parse(input, self.case_sensitive)
    }

    /// Initialize the global logger. Only the first successful call in a process
    /// installs a logger, later calls are ignored. A log file that can not be created
    /// is reported with `warn!` once the remaining loggers are installed.
    pub fn init_logger(&self) {
        if self.log_level == LevelFilter::Off {
            return;
        }
        let (loggers, file_error) = self.loggers();
        if !loggers.is_empty() {
            let _ = CombinedLogger::init(loggers);
        }
        if let Some(e) = file_error {
            warn!("{}", e);
        }
    }

    /// loggers requested by the settings and the reason the file logger was skipped, if it was
    fn loggers(&self) -> (Vec<Box<dyn SharedLogger>>, Option<String>) {
        let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
        let mut file_error = None;

        // Console logger
        if self.log_to_console {
            loggers.push(TermLogger::new(
                self.log_level,
                Config::default(),
                TerminalMode::Mixed,
                ColorChoice::Auto,
            ));
        }

        // File logger
        if let Some(ref filename) = self.log_file {
            match File::create(filename) {
                Ok(file) => {
                    loggers.push(WriteLogger::new(self.log_level, Config::default(), file))
                }
                Err(e) => {
                    file_error = Some(format!("can not create log file \"{}\": {}", filename, e))
                }
            }
        }

        (loggers, file_error)
    }
}

fn expect_bool(key: &str, value: &toml::Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| ExprError::InvalidSettings(format!("\"{}\" must be a boolean", key)))
}

fn expect_str<'a>(key: &str, value: &'a toml::Value) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| ExprError::InvalidSettings(format!("\"{}\" must be a string", key)))
}

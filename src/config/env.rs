//! Environment variable configuration
//!
//! The runner takes no config file; the few knobs it has come from the
//! environment.

use std::env;

use crate::utils::LogLevel;

/// Environment variable prefix
const ENV_PREFIX: &str = "VERDICT";

/// When to emit ANSI colors on the console
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// Color only when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(ColorChoice::Auto),
            "always" | "on" | "true" => Some(ColorChoice::Always),
            "never" | "off" | "false" => Some(ColorChoice::Never),
            _ => None,
        }
    }
}

/// Configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Log level from VERDICT_LOG
    pub log_level: Option<LogLevel>,
    /// Color choice from VERDICT_COLOR
    pub color: Option<ColorChoice>,
    /// Whether NO_COLOR is set
    pub no_color: bool,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            log_level: get_env("LOG").and_then(|v| LogLevel::from_str(&v)),
            color: get_env("COLOR").and_then(|v| ColorChoice::from_str(&v)),
            no_color: env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()),
        }
    }

    pub fn log_level_or_default(&self) -> LogLevel {
        self.log_level.unwrap_or_default()
    }

    /// Effective color choice; an explicit VERDICT_COLOR beats NO_COLOR
    pub fn color_choice(&self) -> ColorChoice {
        match self.color {
            Some(choice) => choice,
            None if self.no_color => ColorChoice::Never,
            None => ColorChoice::Auto,
        }
    }
}

/// Get environment variable with prefix
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

/// Builder for setting environment variables in tests
#[cfg(test)]
pub struct EnvBuilder {
    vars: Vec<(String, String)>,
}

#[cfg(test)]
impl EnvBuilder {
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    pub fn log(mut self, level: impl Into<String>) -> Self {
        self.vars.push((format!("{ENV_PREFIX}_LOG"), level.into()));
        self
    }

    pub fn color(mut self, choice: impl Into<String>) -> Self {
        self.vars.push((format!("{ENV_PREFIX}_COLOR"), choice.into()));
        self
    }

    /// Apply and return guard that restores on drop
    pub fn apply_scoped(self) -> EnvGuard {
        let previous: Vec<_> = self
            .vars
            .iter()
            .map(|(k, _)| (k.clone(), env::var(k).ok()))
            .collect();

        for (key, value) in self.vars {
            env::set_var(key, value);
        }

        EnvGuard { previous }
    }
}

/// Guard that restores environment variables on drop
#[cfg(test)]
pub struct EnvGuard {
    previous: Vec<(String, Option<String>)>,
}

#[cfg(test)]
impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.previous {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }
}

/// Usage lines describing the recognised variables
pub fn env_help() -> String {
    format!(
        "Environment Variables:\n  \
         {ENV_PREFIX}_LOG     Log level (trace, debug, info, warn, error)\n  \
         {ENV_PREFIX}_COLOR   Console colors (auto, always, never)\n  \
         NO_COLOR         Disable colors unless {ENV_PREFIX}_COLOR is set\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_config_default() {
        let config = EnvConfig::default();
        assert_eq!(config.log_level_or_default(), LogLevel::Warn);
        assert_eq!(config.color_choice(), ColorChoice::Auto);
    }

    #[test]
    fn test_color_choice_precedence() {
        let no_color = EnvConfig {
            no_color: true,
            ..Default::default()
        };
        assert_eq!(no_color.color_choice(), ColorChoice::Never);

        let forced = EnvConfig {
            color: Some(ColorChoice::Always),
            no_color: true,
            ..Default::default()
        };
        assert_eq!(forced.color_choice(), ColorChoice::Always);
    }

    #[test]
    fn test_color_choice_from_str() {
        assert_eq!(ColorChoice::from_str("NEVER"), Some(ColorChoice::Never));
        assert_eq!(ColorChoice::from_str("always"), Some(ColorChoice::Always));
        assert_eq!(ColorChoice::from_str("sometimes"), None);
    }

    #[test]
    fn test_env_builder() {
        let _guard = EnvBuilder::new().log("debug").color("never").apply_scoped();

        let config = EnvConfig::load();
        assert_eq!(config.log_level, Some(LogLevel::Debug));
        assert_eq!(config.color, Some(ColorChoice::Never));
    }

    #[test]
    fn test_env_help_mentions_variables() {
        let help = env_help();
        assert!(help.contains("VERDICT_LOG"));
        assert!(help.contains("VERDICT_COLOR"));
    }
}

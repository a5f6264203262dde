//! Errors raised while reading or checking a configuration.

/// Why a configuration could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    /// The file could not be read
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    /// The YAML did not match the config schema
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A value parsed but is outside its usable range
    #[error("invalid `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending setting
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

impl ConfigLoadError {
    /// Reject values that are not finite and strictly positive.
    pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<(), Self> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(Self::Invalid {
                field,
                reason: format!("expected a finite value above zero, got {value}"),
            })
        }
    }
}

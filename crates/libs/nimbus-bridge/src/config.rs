use serde::{Deserialize, Serialize};

/// What happens when a caller cancels before the collaborator has produced
/// its cancellation handle.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CancelPolicy {
    /// Remember the request and cancel the handle as soon as it is installed.
    #[default]
    Deferred,
    /// Discard the request; a handle installed later is left running.
    DropEarly,
}

/// How many published values a broadcast stream retains for subscribers
/// that have not read them yet.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReplayPolicy {
    /// Keep only the newest value (conflated).
    #[default]
    Latest,
    /// Keep the newest `n` values.
    Window(usize),
    /// Keep every value for the lifetime of the stream.
    Full,
}

impl ReplayPolicy {
    /// Maximum retained values, `None` when unbounded.
    pub fn capacity(self) -> Option<usize> {
        match self {
            Self::Latest => Some(1),
            Self::Window(n) => Some(n),
            Self::Full => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BridgeConfig {
    pub cancel_policy: CancelPolicy,
    pub event_replay: ReplayPolicy,
    pub progress_replay: ReplayPolicy,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("bridge config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("bridge config invalid: {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl BridgeConfig {
    /// Parses and validates a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, replay) in [
            ("event_replay", self.event_replay),
            ("progress_replay", self.progress_replay),
        ] {
            if replay == ReplayPolicy::Window(0) {
                return Err(ConfigError::Invalid {
                    field,
                    message: "replay window must retain at least one value".to_owned(),
                });
            }
        }
        Ok(())
    }

    pub fn with_cancel_policy(mut self, cancel_policy: CancelPolicy) -> Self {
        self.cancel_policy = cancel_policy;
        self
    }

    pub fn with_event_replay(mut self, event_replay: ReplayPolicy) -> Self {
        self.event_replay = event_replay;
        self
    }

    pub fn with_progress_replay(mut self, progress_replay: ReplayPolicy) -> Self {
        self.progress_replay = progress_replay;
        self
    }
}

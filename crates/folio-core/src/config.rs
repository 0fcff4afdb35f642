use crate::error::{AgentError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variables the worker cannot start without.
pub const REQUIRED_ENV: [&str; 4] = [
    "LIVEKIT_URL",
    "LIVEKIT_API_KEY",
    "LIVEKIT_API_SECRET",
    "DEEPGRAM_API_KEY",
];

/// Full worker configuration: credentials from the environment, tunables
/// from an optional TOML settings file (environment wins on overlap).
#[derive(Clone)]
pub struct AgentConfig {
    pub livekit: LiveKitConfig,
    /// Speech vendor credential (STT and TTS).
    pub deepgram_api_key: String,
    pub settings: Settings,
}

impl AgentConfig {
    /// Resolve configuration from the process environment and the default
    /// settings file.
    pub fn from_env() -> Result<Self> {
        Self::resolve(|key| std::env::var(key).ok(), None)
    }

    /// Same as [`AgentConfig::from_env`] but with an explicit settings file.
    pub fn from_env_with_settings(settings_path: Option<&Path>) -> Result<Self> {
        Self::resolve(|key| std::env::var(key).ok(), settings_path)
    }

    /// Resolve from an arbitrary variable lookup.
    ///
    /// Collects every absent required key and fails with a single aggregate
    /// error rather than stopping at the first. An empty value counts as
    /// absent.
    pub fn resolve<F>(lookup: F, settings_path: Option<&Path>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = match settings_path {
            Some(path) => Settings::load_from(path)?,
            None => Settings::load()?,
        };
        settings.apply_env_overrides(&lookup);

        let mut missing = Vec::new();
        let url = required(&lookup, "LIVEKIT_URL", &mut missing);
        let api_key = required(&lookup, "LIVEKIT_API_KEY", &mut missing);
        let api_secret = required(&lookup, "LIVEKIT_API_SECRET", &mut missing);
        let deepgram_api_key = required(&lookup, "DEEPGRAM_API_KEY", &mut missing);
        if !missing.is_empty() {
            return Err(AgentError::MissingConfig(missing));
        }

        Ok(Self {
            livekit: LiveKitConfig {
                url,
                api_key,
                api_secret,
            },
            deepgram_api_key,
            settings,
        })
    }
}

impl fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentConfig")
            .field("livekit", &self.livekit)
            .field("deepgram_api_key", &"[REDACTED]")
            .field("settings", &self.settings)
            .finish()
    }
}

fn required<F>(lookup: &F, key: &str, missing: &mut Vec<String>) -> String
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.is_empty() => value,
        _ => {
            missing.push(key.to_string());
            String::new()
        }
    }
}

/// Real-time transport credentials.
#[derive(Clone)]
pub struct LiveKitConfig {
    pub url: String,
    pub api_key: String,
    pub api_secret: String,
}

impl fmt::Debug for LiveKitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveKitConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Optional tunables, loaded from TOML and overridable per-key from the
/// environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Language model identifier (`GEMINI_MODEL`).
    pub llm_model: String,
    /// Speech-to-text model identifier (`STT_MODEL`).
    pub stt_model: String,
    /// Text-to-speech voice identifier (`TTS_VOICE`).
    pub tts_voice: String,
    /// Default log verbosity when `RUST_LOG` is unset (`LOG_LEVEL`).
    pub log_level: String,
    /// Live portfolio API endpoint (`PORTFOLIO_API_URL`); unset disables
    /// the live loader stage.
    pub portfolio_api_url: Option<String>,
    /// Shared portfolio JSON file (`PORTFOLIO_DATA_PATH`); unset disables
    /// the file loader stage.
    pub portfolio_data_path: Option<PathBuf>,
    pub pricing: PricingConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            llm_model: "google/gemini-2.0-flash-lite".into(),
            stt_model: "flux-general-en".into(),
            tts_voice: "aura-asteria-en".into(),
            log_level: "info".into(),
            portfolio_api_url: None,
            portfolio_data_path: None,
            pricing: PricingConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from the default path, falling back to defaults if the
    /// file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load settings from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| {
            AgentError::Config(format!("invalid settings file {}: {}", path.display(), e))
        })
    }

    /// Load settings and apply environment overrides, without requiring
    /// any credentials to be present.
    pub fn resolve_env(settings_path: Option<&Path>) -> Result<Self> {
        let mut settings = match settings_path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        settings.apply_env_overrides(&|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Default settings file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("folio-agent")
            .join("config.toml")
    }

    fn apply_env_overrides<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("GEMINI_MODEL").filter(|v| !v.is_empty()) {
            self.llm_model = v;
        }
        if let Some(v) = lookup("STT_MODEL").filter(|v| !v.is_empty()) {
            self.stt_model = v;
        }
        if let Some(v) = lookup("TTS_VOICE").filter(|v| !v.is_empty()) {
            self.tts_voice = v;
        }
        if let Some(v) = lookup("LOG_LEVEL").filter(|v| !v.is_empty()) {
            self.log_level = v;
        }
        if let Some(v) = lookup("PORTFOLIO_API_URL").filter(|v| !v.is_empty()) {
            self.portfolio_api_url = Some(v);
        }
        if let Some(v) = lookup("PORTFOLIO_DATA_PATH").filter(|v| !v.is_empty()) {
            self.portfolio_data_path = Some(PathBuf::from(v));
        }
    }
}

/// Per-service price table for usage-cost estimation. Rates live in
/// configuration so vendor price changes never require a rebuild.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub stt: SttPricing,
    pub llm: LlmPricing,
    pub tts: TtsPricing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SttPricing {
    /// Dollars per second of transcribed audio.
    pub per_audio_second: f64,
}

impl Default for SttPricing {
    fn default() -> Self {
        Self {
            per_audio_second: 0.000_25,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmPricing {
    /// Dollars per million prompt tokens.
    pub per_million_input_tokens: f64,
    /// Dollars per million completion tokens.
    pub per_million_output_tokens: f64,
}

impl Default for LlmPricing {
    fn default() -> Self {
        Self {
            per_million_input_tokens: 0.15,
            per_million_output_tokens: 0.60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TtsPricing {
    /// Dollars per thousand synthesized characters.
    pub per_thousand_characters: f64,
}

impl Default for TtsPricing {
    fn default() -> Self {
        Self {
            per_thousand_characters: 0.015,
        }
    }
}

impl PricingConfig {
    /// Incremental cost of one transcription call.
    pub fn stt_cost(&self, audio_seconds: f64) -> f64 {
        audio_seconds * self.stt.per_audio_second
    }

    /// Incremental cost of one language-model call.
    pub fn llm_cost(&self, input_tokens: u64, output_tokens: u64) -> f64 {
        (input_tokens as f64 / 1_000_000.0) * self.llm.per_million_input_tokens
            + (output_tokens as f64 / 1_000_000.0) * self.llm.per_million_output_tokens
    }

    /// Incremental cost of one synthesis call.
    pub fn tts_cost(&self, characters: u64) -> f64 {
        (characters as f64 / 1000.0) * self.tts.per_thousand_characters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("LIVEKIT_URL", "wss://rooms.example.dev"),
            ("LIVEKIT_API_KEY", "lk-key"),
            ("LIVEKIT_API_SECRET", "lk-secret"),
            ("DEEPGRAM_API_KEY", "dg-key"),
        ])
    }

    fn lookup_in(
        env: HashMap<&'static str, &'static str>,
    ) -> impl Fn(&str) -> Option<String> {
        move |key| env.get(key).map(|v| v.to_string())
    }

    // Pins resolve() to a throwaway settings file so tests never pick up a
    // real config from the host.
    fn default_settings_file(tmp: &tempfile::TempDir) -> PathBuf {
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, toml::to_string(&Settings::default()).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_resolve_with_full_environment() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = default_settings_file(&tmp);
        let config = AgentConfig::resolve(lookup_in(full_env()), Some(&path)).unwrap();
        assert_eq!(config.livekit.url, "wss://rooms.example.dev");
        assert_eq!(config.deepgram_api_key, "dg-key");
        assert_eq!(config.settings.llm_model, "google/gemini-2.0-flash-lite");
        assert_eq!(config.settings.stt_model, "flux-general-en");
        assert_eq!(config.settings.tts_voice, "aura-asteria-en");
        assert_eq!(config.settings.log_level, "info");
    }

    #[test]
    fn test_resolve_collects_all_missing_keys() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = default_settings_file(&tmp);
        let err = AgentConfig::resolve(|_| None, Some(&path)).unwrap_err();
        match err {
            AgentError::MissingConfig(keys) => {
                assert_eq!(keys, REQUIRED_ENV.map(String::from).to_vec());
            }
            other => panic!("expected MissingConfig, got: {other}"),
        }
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = default_settings_file(&tmp);
        let mut env = full_env();
        env.insert("DEEPGRAM_API_KEY", "");
        let err = AgentConfig::resolve(lookup_in(env), Some(&path)).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("DEEPGRAM_API_KEY"), "got: {msg}");
        assert!(!msg.contains("LIVEKIT_URL"), "got: {msg}");
    }

    #[test]
    fn test_env_overrides_optional_settings() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = default_settings_file(&tmp);
        let mut env = full_env();
        env.insert("GEMINI_MODEL", "google/gemini-2.5-pro");
        env.insert("LOG_LEVEL", "debug");
        let config = AgentConfig::resolve(lookup_in(env), Some(&path)).unwrap();
        assert_eq!(config.settings.llm_model, "google/gemini-2.5-pro");
        assert_eq!(config.settings.log_level, "debug");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = default_settings_file(&tmp);
        let config = AgentConfig::resolve(lookup_in(full_env()), Some(&path)).unwrap();
        let shown = format!("{:?}", config);
        assert!(shown.contains("[REDACTED]"), "got: {shown}");
        assert!(!shown.contains("lk-secret"), "got: {shown}");
        assert!(!shown.contains("dg-key"), "got: {shown}");
    }

    #[test]
    fn test_settings_file_overrides_pricing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "llm_model = \"google/gemini-2.0-flash\"\n\n\
             [pricing.llm]\n\
             per_million_input_tokens = 0.30\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.llm_model, "google/gemini-2.0-flash");
        assert!((settings.pricing.llm.per_million_input_tokens - 0.30).abs() < 1e-12);
        // Unmentioned rates keep their defaults.
        assert!((settings.pricing.llm.per_million_output_tokens - 0.60).abs() < 1e-12);
        assert!((settings.pricing.stt.per_audio_second - 0.000_25).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_settings_file_is_a_config_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "pricing = \"not a table\"").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("Configuration error:"), "got: {msg}");
    }

    #[test]
    fn test_default_settings_roundtrip() {
        let settings = Settings::default();
        let toml_str = toml::to_string_pretty(&settings).unwrap();
        assert!(toml_str.contains("gemini-2.0-flash-lite"));
        assert!(toml_str.contains("per_audio_second"));
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.llm_model, settings.llm_model);
    }

    #[test]
    fn test_default_rates() {
        let pricing = PricingConfig::default();
        assert!((pricing.stt_cost(10.0) - 0.0025).abs() < 1e-12);
        assert!((pricing.llm_cost(1000, 500) - 0.00045).abs() < 1e-12);
        assert!((pricing.tts_cost(1000) - 0.015).abs() < 1e-12);
    }

    #[test]
    fn test_zero_quantities_cost_nothing() {
        let pricing = PricingConfig::default();
        assert_eq!(pricing.stt_cost(0.0), 0.0);
        assert_eq!(pricing.llm_cost(0, 0), 0.0);
        assert_eq!(pricing.tts_cost(0), 0.0);
    }
}

use std::fs;
use std::path::Path;

use anyhow::{
  Context,
  anyhow,
  bail
};
use serde::Deserialize;
use tracing::{
  debug,
  info
};

use crate::locale::Locale;

#[derive(
  Debug,
  Clone,
  PartialEq,
  Default,
  Deserialize,
)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
  pub api:     ApiConfig,
  pub timing:  TimingConfig,
  pub display: DisplayConfig
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Default,
  Deserialize,
)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
  /// Empty means "same origin as the
  /// page".
  pub base_url: String
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
  pub search_debounce_ms:    u64,
  pub delete_animation_ms:   u64,
  pub complete_animation_ms: u64,
  pub toast_duration_ms:     u64
}

impl Default for TimingConfig {
  fn default() -> Self {
    Self {
      search_debounce_ms:    300,
      delete_animation_ms:   500,
      complete_animation_ms: 300,
      toast_duration_ms:     3_000
    }
  }
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
  pub locale:     Locale,
  pub max_toasts: usize
}

impl Default for DisplayConfig {
  fn default() -> Self {
    Self {
      locale:     Locale::ArEg,
      max_toasts: 4
    }
  }
}

impl ClientConfig {
  pub fn from_toml_str(
    text: &str
  ) -> anyhow::Result<Self> {
    toml::from_str(text).context(
      "failed to parse client config"
    )
  }

  #[tracing::instrument]
  pub fn load_file(
    path: &Path
  ) -> anyhow::Result<Self> {
    let text =
      fs::read_to_string(path)
        .with_context(|| {
          format!(
            "failed to read {}",
            path.display()
          )
        })?;
    let cfg = Self::from_toml_str(&text)
      .with_context(|| {
        format!(
          "invalid config file {}",
          path.display()
        )
      })?;
    info!(path = %path.display(), "loaded client config");
    Ok(cfg)
  }

  /// Applies dotted `section.key`
  /// overrides such as
  /// `timing.search_debounce_ms=150`.
  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) -> anyhow::Result<()>
  where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (key, value) in overrides {
      let key = key.trim();
      let value = value.trim();
      debug!(key = %key, value = %value, "applying override");
      self.apply_override(key, value)?;
    }
    Ok(())
  }

  fn apply_override(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    match key {
      | "api.base_url" => {
        self.api.base_url =
          value.to_string();
      }
      | "timing.search_debounce_ms" => {
        self.timing.search_debounce_ms =
          parse_millis(key, value)?;
      }
      | "timing.delete_animation_ms" => {
        self.timing.delete_animation_ms =
          parse_millis(key, value)?;
      }
      | "timing.complete_animation_ms" => {
        self
          .timing
          .complete_animation_ms =
          parse_millis(key, value)?;
      }
      | "timing.toast_duration_ms" => {
        self.timing.toast_duration_ms =
          parse_millis(key, value)?;
      }
      | "display.locale" => {
        self.display.locale =
          Locale::parse(value)
            .ok_or_else(|| {
              anyhow!(
                "unsupported locale: \
                 {value}"
              )
            })?;
      }
      | "display.max_toasts" => {
        self.display.max_toasts = value
          .parse()
          .with_context(|| {
            format!(
              "{key} expects a number, \
               got {value}"
            )
          })?;
      }
      | other => {
        bail!("unknown config key: {other}")
      }
    }
    Ok(())
  }
}

fn parse_millis(
  key: &str,
  value: &str
) -> anyhow::Result<u64> {
  value.parse().with_context(|| {
    format!(
      "{key} expects milliseconds, got \
       {value}"
    )
  })
}

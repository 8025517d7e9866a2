#![deny(unsafe_code)]

//! Settings for the pmqtt protocol handler
//!
//! Values are merged, later sources winning, from:
//! - `/etc/pmqtt/pmqtt.{toml,json,...}` (optional)
//! - `./pmqtt.{toml,json,...}` (optional)
//! - the file named by the caller (optional)
//! - `PMQTT_*` environment variables, nested keys separated by `__`,
//!   e.g. `PMQTT_CLIENT_ID__MAX_LEN=16`

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use anyhow::anyhow;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use once_cell::sync::OnceCell;
use serde::Deserialize;

use pmqtt_codec::types::MAX_CLIENT_ID_LEN;

use self::logging::Log;

pub mod logging;

pub type Result<T> = anyhow::Result<T>;

static SETTINGS: OnceCell<Settings> = OnceCell::new();

#[derive(Clone)]
pub struct Settings(Arc<Inner>);

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Inner {
    #[serde(default)]
    pub log: Log,
    #[serde(default)]
    pub client_id: ClientIdSettings,
}

impl Deref for Settings {
    type Target = Inner;
    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl Settings {
    pub fn new(cfg_name: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder()
            .add_source(File::with_name("/etc/pmqtt/pmqtt").required(false))
            .add_source(File::with_name("pmqtt").required(false));

        if let Some(cfg) = cfg_name {
            builder = builder.add_source(File::with_name(cfg).required(false));
        }

        Self::build(builder)
    }

    /// Parses settings from inline TOML text, environment variables still apply.
    pub fn from_toml(text: &str) -> Result<Self> {
        Self::build(Config::builder().add_source(File::from_str(text, FileFormat::Toml)))
    }

    fn build(builder: ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        let builder = builder.add_source(Environment::with_prefix("pmqtt").prefix_separator("_").separator("__").try_parsing(true));
        let inner: Inner = builder.build()?.try_deserialize()?;
        inner.client_id.check()?;
        Ok(Self(Arc::new(inner)))
    }

    #[inline]
    pub fn instance() -> &'static Self {
        match SETTINGS.get() {
            Some(c) => c,
            None => {
                unreachable!("Settings not initialized");
            }
        }
    }

    #[inline]
    pub fn try_instance() -> Option<&'static Self> {
        SETTINGS.get()
    }

    #[inline]
    pub fn init(cfg_name: Option<&str>) -> Result<&'static Self> {
        SETTINGS.set(Settings::new(cfg_name)?).map_err(|_| anyhow!("Settings init failed"))?;
        SETTINGS.get().ok_or_else(|| anyhow!("Settings init failed"))
    }

    #[inline]
    pub fn logs(&self) {
        log::debug!("Config info is {:?}", self.0);
        log::info!("log to {:?}, level {:?}, file {}", self.log.to, self.log.level.inner(), self.log.filename());
        log::info!("client_id.max_len is {}", self.client_id.max_len);
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Settings ...")?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientIdSettings {
    //Upper bound for server-generated client identifiers, at most 23.
    #[serde(default = "ClientIdSettings::max_len_default")]
    pub max_len: usize,
}

impl Default for ClientIdSettings {
    #[inline]
    fn default() -> Self {
        Self { max_len: Self::max_len_default() }
    }
}

impl ClientIdSettings {
    fn max_len_default() -> usize {
        MAX_CLIENT_ID_LEN
    }

    fn check(&self) -> Result<()> {
        if self.max_len == 0 || self.max_len > MAX_CLIENT_ID_LEN {
            return Err(anyhow!(
                "client_id.max_len must be between 1 and {}, got {}",
                MAX_CLIENT_ID_LEN,
                self.max_len
            ));
        }
        Ok(())
    }
}

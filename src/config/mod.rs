pub mod keys;
pub mod options;
pub mod theme;

use self::{
    keys::{KeyBindings, UserKeyBindings},
    options::{Options, UserOptions},
};
use crate::{cli::CLAP_ARGS, utils};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    io::ErrorKind,
    path::PathBuf,
    sync::{LazyLock, Once},
};
use theme::{Theme, UserTheme};

static CONFIG: LazyLock<Config> = LazyLock::new(|| match Config::new() {
    Ok(config) => config,
    Err(e) => {
        eprintln!("{e:?}");
        std::process::exit(1);
    }
});
pub static OPTIONS: LazyLock<&Options> = LazyLock::new(|| &CONFIG.options);
pub static KEY_BINDINGS: LazyLock<&KeyBindings> = LazyLock::new(|| &CONFIG.key_bindings);
pub static THEME: LazyLock<&Theme> = LazyLock::new(|| &CONFIG.theme);
pub static SKIP_CONFIG: Once = Once::new();
const CONFIG_FILE: &str = "config.toml";

pub trait MergeConfig {
    type Other;

    fn merge(&mut self, other: Self::Other) -> Result<()>;
}

#[derive(Deserialize)]
pub(crate) struct UserConfig {
    #[serde(flatten)]
    options: UserOptions,
    theme: Option<UserTheme>,
    key_bindings: Option<UserKeyBindings>,
}

#[derive(Default)]
pub struct Config {
    pub options: Options,
    pub theme: Theme,
    pub key_bindings: KeyBindings,
}

impl Config {
    pub fn new() -> Result<Self> {
        if SKIP_CONFIG.is_completed() {
            return Ok(Self::default());
        }

        let mut config = if CLAP_ARGS.get_flag("no_config") {
            Self::default()
        } else {
            let explicit = CLAP_ARGS.get_one::<PathBuf>("config");
            let config_file = match explicit {
                Some(path) => path.to_owned(),
                None => utils::get_config_dir()?.join(CONFIG_FILE),
            };

            match fs::read_to_string(&config_file) {
                Ok(config_str) => Self::try_from(
                    toml::from_str::<UserConfig>(&config_str)
                        .with_context(|| format!("Error: {} is malformed", config_file.display()))?,
                )?,
                // a missing default file is fine, a missing explicit one isn't
                Err(e) if e.kind() == ErrorKind::NotFound && explicit.is_none() => Self::default(),
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("Error: couldn't read {}", config_file.display()));
                }
            }
        };

        config.options.override_with_clap_args()?;

        Ok(config)
    }
}

impl TryFrom<UserConfig> for Config {
    type Error = anyhow::Error;

    fn try_from(user_config: UserConfig) -> Result<Self, Self::Error> {
        let mut config = Self::default();

        config.options.merge(user_config.options)?;

        if let Some(theme) = user_config.theme {
            config.theme = theme.try_into()?;
        }

        if let Some(key_bindings) = user_config.key_bindings {
            config.key_bindings = key_bindings.try_into()?;
        }

        Ok(config)
    }
}

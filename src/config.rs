use color_eyre::eyre::{
    Result,
    eyre,
};
use std::path::PathBuf;

pub const DEFAULT_STORE_PATH: &str = "~/.spin-decide/store.json";
pub const DEFAULT_LOG_DIR: &str = "~/.spin-decide/logs";

/// Limits enforced by [`crate::registry::EntryRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegistryConfig {
    pub min_entries: usize,
    pub max_entries: usize,
    /// Weights must add up to this in ratio mode.
    pub ratio_total: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            min_entries: 2,
            max_entries: 10,
            ratio_total: 100,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StartTab {
    #[default]
    Wheel,
    Coin,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub store_path: PathBuf,
    pub log_dir: PathBuf,
    pub registry: RegistryConfig,
    pub ratio_mode: bool,
    pub single_entry_mode: bool,
    pub start_tab: StartTab,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_path: expand_path(DEFAULT_STORE_PATH),
            log_dir: expand_path(DEFAULT_LOG_DIR),
            registry: RegistryConfig::default(),
            ratio_mode: false,
            single_entry_mode: false,
            start_tab: StartTab::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CliAction {
    Run(AppConfig),
    Help,
}

pub fn usage() -> String {
    format!(
        "Usage: spin-decide [--store <path>] [--log-dir <path>] [--max-entries <n>]\n\
         [--ratio | --single] [--coin]\n\
         \n\
         Flags:\n\
           --store <path>      Key/value file holding spin history and preferences (default {})\n\
           --log-dir <path>    Directory for rolling log files (default {})\n\
           --max-entries <n>   Upper bound on wheel entries (default 10)\n\
           --ratio             Start with name:percentage entries\n\
           --single            Start in single entry mode\n\
           --coin              Open the coin flip tab first",
        DEFAULT_STORE_PATH, DEFAULT_LOG_DIR,
    )
}

pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

/// Parses command line flags, excluding the program name.
pub fn parse_cli_args<I>(args: I) -> Result<CliAction>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut config = AppConfig::default();
    let mut store_path: Option<String> = None;
    let mut log_dir: Option<String> = None;
    let mut max_entries: Option<usize> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--store" => {
                let path = args
                    .next()
                    .ok_or_else(|| eyre!("--store requires a path argument"))?;
                if store_path.is_some() {
                    return Err(eyre!("--store may only be specified once"));
                }
                store_path = Some(path);
            }
            "--log-dir" => {
                let dir = args
                    .next()
                    .ok_or_else(|| eyre!("--log-dir requires a path argument"))?;
                if log_dir.is_some() {
                    return Err(eyre!("--log-dir may only be specified once"));
                }
                log_dir = Some(dir);
            }
            "--max-entries" => {
                let raw = args
                    .next()
                    .ok_or_else(|| eyre!("--max-entries requires a number"))?;
                let n = raw
                    .parse::<usize>()
                    .map_err(|_| eyre!("--max-entries expects a number, got '{raw}'"))?;
                if n < config.registry.min_entries {
                    return Err(eyre!(
                        "--max-entries must be at least {}",
                        config.registry.min_entries
                    ));
                }
                max_entries = Some(n);
            }
            "--ratio" => config.ratio_mode = true,
            "--single" => config.single_entry_mode = true,
            "--coin" => config.start_tab = StartTab::Coin,
            "--help" | "-h" => return Ok(CliAction::Help),
            other => return Err(eyre!("Unknown argument: {other}")),
        }
    }

    if config.ratio_mode && config.single_entry_mode {
        return Err(eyre!("--ratio cannot be combined with --single"));
    }
    if let Some(path) = store_path {
        config.store_path = expand_path(&path);
    }
    if let Some(dir) = log_dir {
        config.log_dir = expand_path(&dir);
    }
    if let Some(n) = max_entries {
        config.registry.max_entries = n;
    }
    Ok(CliAction::Run(config))
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_cli_args__defaults_without_flags() {
        let action = parse_cli_args(args(&[])).unwrap();

        assert_eq!(action, CliAction::Run(AppConfig::default()));
    }

    #[test]
    fn parse_cli_args__reads_paths_and_limits() {
        // when
        let action = parse_cli_args(args(&[
            "--store",
            "/tmp/spin.json",
            "--max-entries",
            "12",
            "--ratio",
            "--coin",
        ]))
        .unwrap();

        // then
        let CliAction::Run(config) = action else {
            panic!("expected run action");
        };
        assert_eq!(config.store_path, PathBuf::from("/tmp/spin.json"));
        assert_eq!(config.registry.max_entries, 12);
        assert!(config.ratio_mode);
        assert_eq!(config.start_tab, StartTab::Coin);
    }

    #[test]
    fn parse_cli_args__rejects_conflicting_modes() {
        assert!(parse_cli_args(args(&["--ratio", "--single"])).is_err());
    }

    #[test]
    fn parse_cli_args__rejects_unknown_and_incomplete_flags() {
        assert!(parse_cli_args(args(&["--bogus"])).is_err());
        assert!(parse_cli_args(args(&["--store"])).is_err());
        assert!(parse_cli_args(args(&["--max-entries", "1"])).is_err());
        assert!(parse_cli_args(args(&["--max-entries", "ten"])).is_err());
    }

    #[test]
    fn parse_cli_args__help() {
        assert_eq!(parse_cli_args(args(&["-h"])).unwrap(), CliAction::Help);
    }
}

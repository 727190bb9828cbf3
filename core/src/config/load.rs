use std::path::{Path, PathBuf};

use super::types::ContextConfig;
use crate::error::ConfigError;

pub const CONFIG_ENV: &str = "SCANCTX_CONFIG";
pub const CONFIG_FILE_NAME: &str = "scanctx.toml";

/// Loads the config from `path`, or discovers one when `path` is `None`.
///
/// Discovery order: `$SCANCTX_CONFIG`, `./scanctx.toml`,
/// `<config dir>/scanctx/config.toml`, then built-in defaults. An explicitly
/// named file that does not exist is an error; discovered ones are optional.
/// Environment overrides are applied last.
pub fn load(path: Option<&Path>) -> Result<ContextConfig, ConfigError> {
    let explicit = path
        .map(Path::to_path_buf)
        .or_else(|| non_blank_env(CONFIG_ENV).map(PathBuf::from));

    let mut cfg = match explicit {
        Some(p) => {
            if !p.exists() {
                return Err(ConfigError::NotFound(p));
            }
            read_file(&p)?
        }
        None => match discover() {
            Some(p) => read_file(&p)?,
            None => {
                tracing::debug!(target: "scanctx.config", "no config file found, using defaults");
                ContextConfig::default()
            }
        },
    };

    apply_overrides(&mut cfg, non_blank_env);
    Ok(cfg)
}

pub fn load_default() -> Result<ContextConfig, ConfigError> {
    load(None)
}

fn discover() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|d| d.join("scanctx").join("config.toml"))
        .filter(|p| p.exists())
}

fn read_file(path: &Path) -> Result<ContextConfig, ConfigError> {
    let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parse_err = |source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    };
    let table = toml::from_str::<toml::Table>(&s).map_err(parse_err)?;
    for warning in defaulted_tables(&table) {
        tracing::warn!(target: "scanctx.config", path = %path.display(), "{warning}");
    }
    let cfg = toml::from_str::<ContextConfig>(&s).map_err(parse_err)?;
    tracing::info!(target: "scanctx.config", path = %path.display(), "config loaded");
    Ok(cfg)
}

const TOP_LEVEL_KEYS: &[&str] = &[
    "context_name",
    "scope",
    "auth",
    "session",
    "policy",
    "topology",
    "handoff",
];

/// Problems worth a warning in a loaded file: unknown top-level keys (usually
/// a misspelt table) and a missing `[scope]`, which silently falls back to
/// the built-in localhost scope.
fn defaulted_tables(table: &toml::Table) -> Vec<String> {
    let mut warnings: Vec<String> = table
        .keys()
        .filter(|k| !TOP_LEVEL_KEYS.contains(&k.as_str()))
        .map(|k| format!("unknown config key `{k}` ignored"))
        .collect();
    if !table.contains_key("scope") {
        warnings.push("no [scope] table, using the built-in localhost scope".to_string());
    }
    warnings
}

fn non_blank_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Applies `SCANCTX_*` overrides. `lookup` returns a value only for keys that
/// are set to something non-blank.
pub fn apply_overrides<F>(cfg: &mut ContextConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("SCANCTX_CONTEXT_NAME") {
        cfg.context_name = v;
    }
    if let Some(v) = lookup("SCANCTX_LOGIN_URL") {
        cfg.auth.login_url = Some(v);
    }

    let username = lookup("SCANCTX_AUTH_USERNAME");
    let password = lookup("SCANCTX_AUTH_PASSWORD");
    if username.is_none() && password.is_none() {
        return;
    }

    let user_key = cfg
        .auth
        .username_field
        .clone()
        .unwrap_or_else(|| "username".to_string());
    let pass_key = cfg
        .auth
        .password_field
        .clone()
        .unwrap_or_else(|| "password".to_string());
    let creds = cfg.auth.credentials.get_or_insert_with(Default::default);
    if let Some(v) = username {
        creds.insert(user_key, v);
    }
    if let Some(v) = password {
        creds.insert(pass_key, v);
    }
}

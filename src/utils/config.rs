/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use std::env;
use std::fmt::Debug;
use std::str::FromStr;
use tracing::error;

/// Reads and parses an environment variable, falling back to `default`
///
/// A variable that is set but cannot be parsed is logged and replaced by the default.
///
/// # Arguments
///
/// * `env_var` - The name of the environment variable
/// * `default` - Value used when the variable is missing or invalid
pub fn get_env_or_default<T: FromStr>(env_var: &str, default: T) -> T
where
    <T as FromStr>::Err: Debug,
{
    match env::var(env_var) {
        Ok(val) => val.trim().parse::<T>().unwrap_or_else(|_| {
            error!("Failed to parse {}: {}, using default", env_var, val);
            default
        }),
        Err(_) => default,
    }
}

/// Reads and parses an environment variable, returning `None` if missing or invalid
pub fn get_env_or_none<T: FromStr>(env_var: &str) -> Option<T>
where
    <T as FromStr>::Err: Debug,
{
    env::var(env_var)
        .ok()
        .and_then(|val| val.trim().parse::<T>().ok())
}

/// Reads a comma separated list from an environment variable
///
/// Entries are trimmed and empty entries dropped. Returns `None` when the
/// variable is missing or holds no entries.
pub fn get_env_list(env_var: &str) -> Option<Vec<String>> {
    let raw = env::var(env_var).ok()?;
    let items: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect();
    if items.is_empty() { None } else { Some(items) }
}

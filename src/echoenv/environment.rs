use std::{collections::HashMap, env, sync::Arc};

/// Environment variable reported on the first line of the hello-world
/// response.
pub const ENVIRONMENT_VAR: &str = "Environment";

/// Lookup over the process environment, handed to handlers as an axum
/// `Extension` so tests can pin the variables a handler sees.
///
/// The process-backed variant calls `std::env::var` on every lookup: the
/// reported value follows the live environment and is never cached.
#[derive(Clone, Debug)]
pub enum EnvSource {
    Process,
    Fixed(Arc<HashMap<String, String>>),
}

impl EnvSource {
    /// Lookup backed by the live process environment.
    #[must_use]
    pub const fn process() -> Self {
        Self::Process
    }

    /// Lookup backed by a fixed set of variables.
    pub fn fixed<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Fixed(Arc::new(
            vars.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        ))
    }

    /// Value of `key`, `None` when unset or not Unicode.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match self {
            Self::Process => env::var(key).ok(),
            Self::Fixed(vars) => vars.get(key).cloned(),
        }
    }
}

impl Default for EnvSource {
    fn default() -> Self {
        Self::process()
    }
}

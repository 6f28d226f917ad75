use std::str::FromStr;

#[cfg(test)]
use std::collections::HashMap;

/// Source of environment variables
///
/// Settings are always read through this trait so tests can hand in a fixed
/// set of variables instead of mutating the process environment.
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;

    /// Read a variable, treating blank values as unset
    fn get_non_empty(&self, key: &str) -> Option<String> {
        self.get_var(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    /// Read and parse a variable, falling back to `default` when unset or unparsable
    fn get_parsed_or<T: FromStr>(&self, key: &str, default: T) -> T
    where
        Self: Sized,
    {
        self.get_non_empty(key)
            .and_then(|value| value.parse().ok())
            .unwrap_or(default)
    }
}

/// Reads from the process environment
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Fixed variable set for tests
#[cfg(test)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

#[cfg(test)]
impl MockEnvironment {
    pub fn new(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    pub fn empty() -> Self {
        Self { vars: HashMap::new() }
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }
}

#[cfg(test)]
impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

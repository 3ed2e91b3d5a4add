use std::{collections::HashMap, path::Path};

use anyhow::{bail, Context, Result};
use hocon::{Hocon, HoconLoader};

/// Scoped view over a hocon config file.
///
/// Lookups check the process environment first, then the configured scope, then the root of the file.
#[derive(Debug)]
pub struct ConfigLoader {
    hocon: Hocon,
    env: HashMap<String, String>,
    scope: String,
}

impl ConfigLoader {
    pub fn new(path: impl AsRef<Path>, scope: String) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            bail!("The config file {:?} was not found", path);
        }

        let hocon = HoconLoader::new()
            .load_file(path)
            .with_context(|| format!("Failed to find or load config file at: {:?}", path))?
            .hocon()?;

        Ok(Self {
            hocon,
            env: std::env::vars().collect(),
            scope,
        })
    }

    /// Builds a loader from an in-memory hocon document. No environment overrides are applied.
    pub fn from_hocon_str(contents: &str, scope: String) -> Result<Self> {
        let hocon = HoconLoader::new()
            .load_str(contents)
            .context("Failed to parse config")?
            .hocon()?;

        Ok(Self {
            hocon,
            env: HashMap::new(),
            scope,
        })
    }

    /// A loader with no entries; every `Config` falls back to its defaults.
    pub fn empty(scope: String) -> Result<Self> {
        Self::from_hocon_str("{}", scope)
    }

    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = env;
        self
    }

    /// Returns a loader over the same document with a different scope.
    pub fn scoped(&self, scope: &str) -> Self {
        Self {
            hocon: self.hocon.clone(),
            env: self.env.clone(),
            scope: scope.to_string(),
        }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.env.get(name) {
            return Some(Value::String(value.clone()));
        }

        let scope = &self.hocon[self.scope.as_str()];
        if matches!(scope, Hocon::Hash(_)) {
            if let Some(value) = Self::map_hocon(scope, name) {
                return Some(value);
            }
        }

        Self::map_hocon(&self.hocon, name)
    }

    pub fn load<T: Config>(&self) -> Result<T> {
        T::load(self).with_context(|| format!("Failed to load config scope '{}'", self.scope))
    }

    fn map_hocon(hocon: &Hocon, name: &str) -> Option<Value> {
        match &hocon[name] {
            Hocon::Real(val) => Some(Value::Float(*val as f32)),
            Hocon::Integer(val) if *val >= 0 => Some(Value::Integer(*val as usize)),
            Hocon::Integer(val) => Some(Value::Float(*val as f32)),
            Hocon::String(val) => Some(Value::String(val.clone())),
            Hocon::Boolean(val) => Some(Value::Boolean(*val)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(usize),
    Float(f32),
    Boolean(bool),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(val) => Some(*val),
            Value::String(val) => Hocon::String(val.clone()).as_bool(),
            _ => None,
        }
    }

    pub fn as_usize(&self) -> Option<usize> {
        match self {
            Value::Integer(val) => Some(*val),
            Value::String(val) => val.trim().parse::<usize>().ok(),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Float(val) => Some(*val),
            Value::Integer(val) => Some(*val as f32),
            Value::String(val) => val.trim().parse::<f32>().ok(),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<String> {
        match self {
            Value::String(val) => Some(val.clone()),
            Value::Boolean(val) => Some(val.to_string()),
            Value::Float(val) => Some(val.to_string()),
            Value::Integer(val) => Some(val.to_string()),
        }
    }
}

pub trait Config {
    fn load(config: &ConfigLoader) -> Result<Self>
    where
        Self: Sized;
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONF: &str = r#"
        grid_size = 7
        engine {
            path_cache_capacity = 500
        }
        bot {
            difficulty = "hard"
            oscillation_penalty = 4.5
            grid_size = 5
        }
    "#;

    #[test]
    fn test_scope_takes_precedence_over_root() {
        let config = ConfigLoader::from_hocon_str(CONF, "bot".to_string()).unwrap();

        assert_eq!(config.get("grid_size").and_then(|v| v.as_usize()), Some(5));
    }

    #[test]
    fn test_falls_back_to_root() {
        let config = ConfigLoader::from_hocon_str(CONF, "engine".to_string()).unwrap();

        assert_eq!(config.get("grid_size").and_then(|v| v.as_usize()), Some(7));
        assert_eq!(
            config.get("path_cache_capacity").and_then(|v| v.as_usize()),
            Some(500)
        );
    }

    #[test]
    fn test_missing_value() {
        let config = ConfigLoader::from_hocon_str(CONF, "engine".to_string()).unwrap();

        assert_eq!(config.get("difficulty"), None);
    }

    #[test]
    fn test_env_overrides_file() {
        let env = [("difficulty".to_string(), "easy".to_string())]
            .into_iter()
            .collect();
        let config = ConfigLoader::from_hocon_str(CONF, "bot".to_string())
            .unwrap()
            .with_env(env);

        assert_eq!(
            config.get("difficulty").and_then(|v| v.as_string()),
            Some("easy".to_string())
        );
    }

    #[test]
    fn test_value_conversions() {
        let config = ConfigLoader::from_hocon_str(CONF, "bot".to_string()).unwrap();

        assert_eq!(
            config.get("oscillation_penalty").and_then(|v| v.as_f32()),
            Some(4.5)
        );
        assert_eq!(config.get("grid_size").and_then(|v| v.as_f32()), Some(5.0));
        assert_eq!(Value::String(" 12 ".to_string()).as_usize(), Some(12));
        assert_eq!(Value::String("true".to_string()).as_bool(), Some(true));
    }

    #[test]
    fn test_scoped_shares_document() {
        let config = ConfigLoader::from_hocon_str(CONF, "bot".to_string()).unwrap();
        let engine = config.scoped("engine");

        assert_eq!(engine.get("grid_size").and_then(|v| v.as_usize()), Some(7));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(ConfigLoader::new("./does-not-exist.conf", "bot".to_string()).is_err());
    }
}

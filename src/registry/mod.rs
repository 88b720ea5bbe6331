pub mod builtin;

use crate::constants::limits::SUGGESTION_LIMIT;
use crate::errors::OptionError;
use crate::utils::suggest::similar_names;
use serde::Serialize;
use std::collections::HashMap;

pub type OptionValue = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionDescriptor {
    pub subsystem: String,
    pub name: String,
    pub default: OptionValue,
    pub min: OptionValue,
    pub max: OptionValue,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl OptionDescriptor {
    pub fn contains(&self, value: OptionValue) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn key(&self) -> String {
        format!("{}.{}", self.subsystem, self.name)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Subsystem {
    pub name: String,
    pub options: Vec<OptionDescriptor>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Subsystem {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            options: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn option(&self, name: &str) -> Option<&OptionDescriptor> {
        self.index.get(name).map(|&idx| &self.options[idx])
    }

    pub fn option_names(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|opt| opt.name.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Registry {
    subsystems: Vec<Subsystem>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        subsystem: &str,
        name: &str,
        default: OptionValue,
        min: OptionValue,
        max: OptionValue,
    ) -> Result<&OptionDescriptor, OptionError> {
        self.register_described(subsystem, name, default, min, max, "")
    }

    pub fn register_described(
        &mut self,
        subsystem: &str,
        name: &str,
        default: OptionValue,
        min: OptionValue,
        max: OptionValue,
        description: &str,
    ) -> Result<&OptionDescriptor, OptionError> {
        if subsystem.trim().is_empty() || name.trim().is_empty() {
            return Err(OptionError::defect(
                subsystem,
                name,
                "subsystem and option names must be non-empty",
            ));
        }
        if min > max {
            return Err(OptionError::defect(
                subsystem,
                name,
                format!("min {} is greater than max {}", min, max),
            ));
        }
        if default < min || default > max {
            return Err(OptionError::defect(
                subsystem,
                name,
                format!("default {} is outside [{}, {}]", default, min, max),
            ));
        }

        let slot = match self.index.get(subsystem) {
            Some(&idx) => idx,
            None => {
                self.subsystems.push(Subsystem::new(subsystem));
                let idx = self.subsystems.len() - 1;
                self.index.insert(subsystem.to_string(), idx);
                idx
            }
        };
        let entry = &mut self.subsystems[slot];
        if entry.index.contains_key(name) {
            return Err(OptionError::defect(subsystem, name, "registered twice"));
        }
        entry.options.push(OptionDescriptor {
            subsystem: subsystem.to_string(),
            name: name.to_string(),
            default,
            min,
            max,
            description: description.to_string(),
        });
        let pos = entry.options.len() - 1;
        entry.index.insert(name.to_string(), pos);
        Ok(&entry.options[pos])
    }

    pub fn lookup(&self, subsystem: &str, name: &str) -> Result<&OptionDescriptor, OptionError> {
        let entry = self.subsystem(subsystem)?;
        entry.option(name).ok_or_else(|| {
            OptionError::unknown(
                subsystem,
                name,
                similar_names(name, entry.option_names(), SUGGESTION_LIMIT),
            )
        })
    }

    pub fn subsystem(&self, name: &str) -> Result<&Subsystem, OptionError> {
        self.index
            .get(name)
            .map(|&idx| &self.subsystems[idx])
            .ok_or_else(|| {
                OptionError::unknown(
                    name,
                    "*",
                    similar_names(name, self.subsystem_names(), SUGGESTION_LIMIT),
                )
            })
    }

    pub fn subsystems(&self) -> &[Subsystem] {
        &self.subsystems
    }

    pub fn subsystem_names(&self) -> impl Iterator<Item = &str> {
        self.subsystems.iter().map(|s| s.name.as_str())
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &OptionDescriptor> {
        self.subsystems.iter().flat_map(|s| s.options.iter())
    }

    pub fn len(&self) -> usize {
        self.subsystems.iter().map(|s| s.options.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::Registry;

    #[test]
    fn register_then_lookup() {
        let mut registry = Registry::new();
        registry.register("remote", "sender_pool", 8, 1, 64).unwrap();
        let desc = registry.lookup("remote", "sender_pool").unwrap();
        assert_eq!((desc.default, desc.min, desc.max), (8, 1, 64));
        assert_eq!(desc.key(), "remote.sender_pool");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn rejects_inverted_range() {
        let mut registry = Registry::new();
        let err = registry.register("syscheck", "sleep", 1, 10, 5).unwrap_err();
        assert!(err.is_defect());
        assert!(registry.is_empty());
    }

    #[test]
    fn rejects_default_outside_range() {
        let mut registry = Registry::new();
        assert!(registry
            .register("syscheck", "sleep", 65, 0, 64)
            .unwrap_err()
            .is_defect());
        assert!(registry
            .register("syscheck", "sleep", -1, 0, 64)
            .unwrap_err()
            .is_defect());
    }

    #[test]
    fn rejects_duplicate_option() {
        let mut registry = Registry::new();
        registry.register("mail", "geoip", 1, 0, 1).unwrap();
        let err = registry.register("mail", "geoip", 0, 0, 1).unwrap_err();
        assert!(err.is_defect());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn same_name_in_different_subsystems_is_fine() {
        let mut registry = Registry::new();
        registry.register("remote", "logging", 0, 0, 2).unwrap();
        registry.register("auth", "logging", 0, 0, 2).unwrap();
        assert_eq!(registry.subsystems().len(), 2);
    }

    #[test]
    fn rejects_empty_names() {
        let mut registry = Registry::new();
        assert!(registry.register("", "x", 0, 0, 1).unwrap_err().is_defect());
        assert!(registry.register("x", " ", 0, 0, 1).unwrap_err().is_defect());
    }

    #[test]
    fn preserves_declaration_order() {
        let mut registry = Registry::new();
        registry.register("b", "z", 0, 0, 1).unwrap();
        registry.register("a", "y", 0, 0, 1).unwrap();
        registry.register("b", "x", 0, 0, 1).unwrap();
        let keys: Vec<String> = registry.descriptors().map(|d| d.key()).collect();
        assert_eq!(keys, vec!["b.z", "b.x", "a.y"]);
    }

    #[test]
    fn unknown_lookups_fail() {
        let mut registry = Registry::new();
        registry.register("remote", "sender_pool", 8, 1, 64).unwrap();
        assert!(registry.lookup("remote", "nope").unwrap_err().is_unknown());
        assert!(registry.lookup("nope", "sender_pool").unwrap_err().is_unknown());
    }
}

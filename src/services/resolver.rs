use crate::errors::OptionError;
use crate::registry::{builtin, OptionDescriptor, OptionValue, Registry};
use crate::services::logger::Logger;
use crate::services::validation::{Candidate, RawValue, Validation};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    UsedDefault,
    UsedSuppliedValue,
    ClampedToMin,
    ClampedToMax,
    RejectedInvalidType,
}

impl Outcome {
    pub fn altered(self) -> bool {
        matches!(
            self,
            Outcome::ClampedToMin | Outcome::ClampedToMax | Outcome::RejectedInvalidType
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub subsystem: String,
    pub name: String,
    pub value: OptionValue,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplied: Option<String>,
}

pub fn resolve(descriptor: &OptionDescriptor, raw: Option<&RawValue>) -> Resolution {
    let raw = raw.filter(|r| !r.is_null());
    let (value, outcome) = match raw {
        None => (descriptor.default, Outcome::UsedDefault),
        Some(raw) => match Validation::new().candidate(raw) {
            Candidate::Invalid => (descriptor.default, Outcome::RejectedInvalidType),
            Candidate::Overflow { negative: true } => (descriptor.min, Outcome::ClampedToMin),
            Candidate::Overflow { negative: false } => (descriptor.max, Outcome::ClampedToMax),
            Candidate::Number(v) if v < descriptor.min => (descriptor.min, Outcome::ClampedToMin),
            Candidate::Number(v) if v > descriptor.max => (descriptor.max, Outcome::ClampedToMax),
            Candidate::Number(v) => (v, Outcome::UsedSuppliedValue),
        },
    };
    Resolution {
        subsystem: descriptor.subsystem.clone(),
        name: descriptor.name.clone(),
        value,
        outcome,
        supplied: raw.map(|r| r.to_string()),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionReport {
    pub subsystem: String,
    pub options: Vec<Resolution>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unknown: Vec<OptionError>,
}

impl SectionReport {
    pub fn value(&self, name: &str) -> Option<OptionValue> {
        self.options
            .iter()
            .find(|res| res.name == name)
            .map(|res| res.value)
    }

    pub fn altered(&self) -> impl Iterator<Item = &Resolution> {
        self.options.iter().filter(|res| res.outcome.altered())
    }
}

#[derive(Debug, Clone)]
pub struct Resolver<'a> {
    registry: &'a Registry,
    logger: Logger,
}

impl Resolver<'static> {
    pub fn builtin(logger: Logger) -> Self {
        Resolver::new(builtin::registry(), logger)
    }
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a Registry, logger: Logger) -> Self {
        Self {
            registry,
            logger: logger.child("resolver"),
        }
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    pub fn resolve(
        &self,
        subsystem: &str,
        name: &str,
        raw: Option<RawValue>,
    ) -> Result<Resolution, OptionError> {
        let descriptor = self.registry.lookup(subsystem, name)?;
        Ok(self.resolve_descriptor(descriptor, raw.as_ref()))
    }

    pub fn resolve_descriptor(
        &self,
        descriptor: &OptionDescriptor,
        raw: Option<&RawValue>,
    ) -> Resolution {
        let resolution = resolve(descriptor, raw);
        self.report(descriptor, &resolution);
        resolution
    }

    // Undeclared keys land in `unknown` without failing the declared ones.
    pub fn resolve_section(
        &self,
        subsystem: &str,
        section: &Map<String, Value>,
    ) -> Result<SectionReport, OptionError> {
        let entry = self.registry.subsystem(subsystem)?;
        let options = entry
            .options
            .iter()
            .map(|desc| {
                let raw = section.get(&desc.name).and_then(RawValue::from_json);
                self.resolve_descriptor(desc, raw.as_ref())
            })
            .collect();
        let unknown: Vec<OptionError> = section
            .keys()
            .filter_map(|key| self.registry.lookup(subsystem, key).err())
            .collect();
        for err in &unknown {
            self.logger.warn(&err.to_string(), None);
        }
        Ok(SectionReport {
            subsystem: entry.name.clone(),
            options,
            unknown,
        })
    }

    fn report(&self, descriptor: &OptionDescriptor, resolution: &Resolution) {
        let meta = serde_json::json!({
            "option": descriptor.key(),
            "supplied": resolution.supplied,
            "effective": resolution.value,
            "min": descriptor.min,
            "max": descriptor.max,
        });
        match resolution.outcome {
            Outcome::UsedSuppliedValue | Outcome::UsedDefault => {
                self.logger.debug("option resolved", Some(&meta));
            }
            Outcome::ClampedToMin => {
                self.logger.warn("value below minimum, using minimum", Some(&meta));
            }
            Outcome::ClampedToMax => {
                self.logger.warn("value above maximum, using maximum", Some(&meta));
            }
            Outcome::RejectedInvalidType => {
                self.logger.warn("value is not an integer, using default", Some(&meta));
            }
        }
    }
}

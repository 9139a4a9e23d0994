//! Test Registry
//!
//! An append-only, ordered list of descriptors. Explicit registration keeps
//! call order; discovery orders `#[unittest]` items by source file and line so
//! that a file's tests run in the order they were written.

use crate::{Descriptor, ExpectedError, TestDef, TestFn, TypeInstance, TypedTestDef};
use std::collections::HashSet;
use thiserror::Error;
use ulpcheck_report::Location;

/// Registry consistency errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two descriptors share a display name
    #[error("Test name registered more than once: {0}")]
    DuplicateName(String),
}

/// Ordered collection of runnable tests
#[derive(Debug, Clone, Default)]
pub struct Registry {
    descriptors: Vec<Descriptor>,
}

impl Registry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every `#[unittest]` item linked into the binary
    pub fn discover() -> Self {
        let mut registry = Self::new();
        registry.extend_discovered();
        registry
    }

    /// Append every `#[unittest]` item, ordered by (file, line)
    pub fn extend_discovered(&mut self) {
        enum Item {
            Plain(&'static TestDef),
            Typed(&'static TypedTestDef),
        }

        let mut items: Vec<(&'static str, u32, Item)> = Vec::new();
        for def in inventory::iter::<TestDef> {
            items.push((def.file, def.line, Item::Plain(def)));
        }
        for def in inventory::iter::<TypedTestDef> {
            items.push((def.file, def.line, Item::Typed(def)));
        }
        items.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

        for (_, _, item) in items {
            match item {
                Item::Plain(def) => {
                    self.push(Descriptor::from(def));
                }
                Item::Typed(def) => {
                    let location = Location::new(def.file, def.line);
                    for instance in def.instances {
                        let mut d = typed_descriptor(def.name, instance).at(location);
                        if let Some(expected) = def.expected {
                            d = d.expecting(expected);
                        }
                        self.push(d);
                    }
                }
            }
        }
        tracing::debug!("discovered {} tests", self.len());
    }

    /// Register a plain test
    pub fn register(&mut self, name: impl Into<String>, entry: TestFn) -> &mut Self {
        self.push(Descriptor::new(name, entry))
    }

    /// Register a test that passes only if an error of type `E` escapes it
    pub fn register_raising<E: ?Sized + 'static>(
        &mut self,
        name: impl Into<String>,
        entry: TestFn,
    ) -> &mut Self {
        self.push(Descriptor::new(name, entry).expecting(ExpectedError::of::<E>()))
    }

    /// Register one instance per type, named `base<type>`, in the given order
    pub fn register_typed(&mut self, base: &str, instances: &[TypeInstance]) -> &mut Self {
        for instance in instances {
            self.push(typed_descriptor(base, instance));
        }
        self
    }

    /// Append a fully built descriptor
    pub fn push(&mut self, descriptor: Descriptor) -> &mut Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Descriptors in registration order
    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    /// Iterate in registration order
    pub fn iter(&self) -> std::slice::Iter<'_, Descriptor> {
        self.descriptors.iter()
    }

    /// Number of registered tests
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// First descriptor with the given name
    pub fn find(&self, name: &str) -> Option<&Descriptor> {
        self.descriptors.iter().find(|d| d.name() == name)
    }

    /// Check that display names are unique
    pub fn validate(&self) -> Result<(), RegistryError> {
        let mut seen = HashSet::new();
        for d in &self.descriptors {
            if !seen.insert(d.name()) {
                return Err(RegistryError::DuplicateName(d.name().to_string()));
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Descriptor;
    type IntoIter = std::slice::Iter<'a, Descriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn typed_descriptor(base: &str, instance: &TypeInstance) -> Descriptor {
    Descriptor::new(
        format!("{}<{}>", base, (instance.type_name)()),
        instance.entry,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TestContext, TestResult};

    fn pass(_: &mut TestContext) -> TestResult {
        Ok(())
    }

    fn generic<T>(_: &mut TestContext) -> TestResult {
        Ok(())
    }

    #[test]
    fn test_registration_order_preserved() {
        let mut registry = Registry::new();
        registry.register("b", pass).register("a", pass).register("c", pass);

        let names: Vec<_> = registry.iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(registry.len(), 3);
        assert!(registry.find("a").is_some());
        assert!(registry.find("z").is_none());
    }

    #[test]
    fn test_register_typed_names() {
        let mut registry = Registry::new();
        registry.register_typed(
            "sqrt",
            &[
                TypeInstance::of::<f32>(generic::<f32>),
                TypeInstance::of::<f64>(generic::<f64>),
                TypeInstance::of::<[f32; 4]>(generic::<[f32; 4]>),
            ],
        );

        let names: Vec<_> = registry.iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["sqrt<f32>", "sqrt<f64>", "sqrt<[f32; 4]>"]);
    }

    #[test]
    fn test_register_raising() {
        struct Overflow;

        let mut registry = Registry::new();
        registry.register_raising::<Overflow>("overflows", pass);

        let d = registry.find("overflows").unwrap();
        let expected = d.expected().unwrap();
        assert!(expected.matches(std::any::TypeId::of::<Overflow>()));
    }

    #[test]
    fn test_validate_duplicates() {
        let mut registry = Registry::new();
        registry.register("once", pass);
        assert!(registry.validate().is_ok());

        registry.register("once", pass);
        assert_eq!(
            registry.validate(),
            Err(RegistryError::DuplicateName("once".to_string()))
        );
    }
}

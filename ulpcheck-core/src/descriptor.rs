//! Test Descriptors
//!
//! `TestDef` and `TypedTestDef` are the `'static` records emitted by the
//! `#[unittest]` attribute. `Descriptor` is the owned, runnable form the
//! registry hands to the runner.

use crate::{TestContext, TestResult};
use std::any::TypeId;
use ulpcheck_report::Location;

/// Signature of every test entry point
pub type TestFn = fn(&mut TestContext) -> TestResult;

/// Marker for "this test passes only if an error of type `E` escapes"
#[derive(Debug, Clone, Copy)]
pub struct ExpectedError {
    type_name: fn() -> &'static str,
    type_id: fn() -> TypeId,
}

impl ExpectedError {
    /// Marker for type `E`
    pub const fn of<E: ?Sized + 'static>() -> Self {
        Self {
            type_name: std::any::type_name::<E>,
            type_id: TypeId::of::<E>,
        }
    }

    /// Full path of the expected type
    pub fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Whether an escaping value of type `id` satisfies the expectation
    pub fn matches(&self, id: TypeId) -> bool {
        (self.type_id)() == id
    }
}

/// Test registered via `#[ulpcheck::unittest]`
#[derive(Debug, Clone)]
pub struct TestDef {
    /// Display name
    pub name: &'static str,
    /// Function pointer to the test body
    pub entry: TestFn,
    /// Error type the test must raise, if any
    pub expected: Option<ExpectedError>,
    /// Source file path
    pub file: &'static str,
    /// Source line number
    pub line: u32,
    /// Module path
    pub module_path: &'static str,
}

/// One monomorphised instance of a type-parameterised test
#[derive(Debug, Clone, Copy)]
pub struct TypeInstance {
    /// Renders the type argument for the display name
    pub type_name: fn() -> String,
    /// The test body instantiated for that type
    pub entry: TestFn,
}

impl TypeInstance {
    /// Instance of a generic test body for type `T`
    pub const fn of<T: ?Sized + 'static>(entry: TestFn) -> Self {
        Self {
            type_name: crate::type_name_of::<T>,
            entry,
        }
    }
}

/// Type-parameterised test registered via `#[ulpcheck::unittest(types(...))]`
#[derive(Debug, Clone)]
pub struct TypedTestDef {
    /// Base name; each instance is shown as `base<type>`
    pub name: &'static str,
    /// One entry per type argument, in declaration order
    pub instances: &'static [TypeInstance],
    /// Error type every instance must raise, if any
    pub expected: Option<ExpectedError>,
    /// Source file path
    pub file: &'static str,
    /// Source line number
    pub line: u32,
    /// Module path
    pub module_path: &'static str,
}

/// A runnable test
#[derive(Debug, Clone)]
pub struct Descriptor {
    name: String,
    entry: TestFn,
    expected: Option<ExpectedError>,
    location: Option<Location>,
}

impl Descriptor {
    /// Build a descriptor
    pub fn new(name: impl Into<String>, entry: TestFn) -> Self {
        Self {
            name: name.into(),
            entry,
            expected: None,
            location: None,
        }
    }

    /// Require an error of the given type to escape
    pub fn expecting(mut self, expected: ExpectedError) -> Self {
        self.expected = Some(expected);
        self
    }

    /// Attach the declaring source position
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entry point
    pub fn entry(&self) -> TestFn {
        self.entry
    }

    /// Expected error marker, if any
    pub fn expected(&self) -> Option<&ExpectedError> {
        self.expected.as_ref()
    }

    /// Declaring source position, if known
    pub fn location(&self) -> Option<Location> {
        self.location
    }
}

impl From<&TestDef> for Descriptor {
    fn from(def: &TestDef) -> Self {
        Self {
            name: def.name.to_string(),
            entry: def.entry,
            expected: def.expected,
            location: Some(Location::new(def.file, def.line)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(_: &mut TestContext) -> TestResult {
        Ok(())
    }

    #[derive(Debug)]
    struct Overflow;

    #[test]
    fn test_expected_error_matches_by_type() {
        let expected = ExpectedError::of::<Overflow>();
        assert!(expected.matches(TypeId::of::<Overflow>()));
        assert!(!expected.matches(TypeId::of::<String>()));
        assert!(expected.type_name().ends_with("Overflow"));
    }

    #[test]
    fn test_descriptor_from_def() {
        let def = TestDef {
            name: "sqrt_of_four",
            entry: body,
            expected: None,
            file: "tests/sqrt.rs",
            line: 12,
            module_path: "sqrt",
        };
        let d = Descriptor::from(&def);
        assert_eq!(d.name(), "sqrt_of_four");
        assert_eq!(d.location(), Some(Location::new("tests/sqrt.rs", 12)));
        assert!(d.expected().is_none());
    }

    #[test]
    fn test_type_instance_name() {
        let inst = TypeInstance::of::<f32>(body);
        assert_eq!((inst.type_name)(), "f32");
    }
}

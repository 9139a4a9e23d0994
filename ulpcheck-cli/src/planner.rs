//! Test Planner
//!
//! Builds the execution plan from the registry. The only filter is an exact
//! display-name match; selected tests keep registration order.

use ulpcheck_core::{Descriptor, Registry};

/// Execution plan for a run
pub struct ExecutionPlan<'a> {
    /// Ordered list of tests to run
    pub descriptors: Vec<&'a Descriptor>,
}

impl ExecutionPlan<'_> {
    /// Number of planned tests
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether nothing was selected
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// Build the execution plan from registered tests
///
/// With `only`, the plan holds exactly the tests whose name equals it, which
/// may be none.
pub fn build_plan<'a>(registry: &'a Registry, only: Option<&str>) -> ExecutionPlan<'a> {
    let descriptors = registry
        .iter()
        .filter(|d| only.is_none_or(|name| d.name() == name))
        .collect();
    ExecutionPlan { descriptors }
}

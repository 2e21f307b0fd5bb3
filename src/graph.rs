//! Component graph model and loader
//!
//! Builds a validated in-memory graph from raw component records and
//! fails fast on the first dangling dependency reference. The graph is
//! build-once: after construction the only mutation is the metric
//! annotation pass in [`crate::metrics`].

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::metrics::ComponentMetrics;

/// Raw module record as it appears in the input document
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleRecord {
    /// Module name, unique within its component
    pub name: String,
    /// Kind tag; anything other than `"normal"` counts as abstract
    pub kind: String,
    /// Outbound references in `"component.module"` form
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Raw component record as it appears in the input document
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentRecord {
    /// Component name, unique within the graph
    pub name: String,
    #[serde(default)]
    pub modules: Vec<ModuleRecord>,
}

/// Errors that can occur while building a graph
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("component '{component}' does not exist")]
    MissingComponent { component: String },

    #[error("module '{module}' does not exist in component '{component}'")]
    MissingModule { module: String, component: String },

    #[error("dependency '{dependency}' is not of the form 'component.module'")]
    MalformedDependency { dependency: String },

    #[error("component '{component}' is declared more than once")]
    DuplicateComponent { component: String },

    #[error("module '{module}' is declared more than once in component '{component}'")]
    DuplicateModule { module: String, component: String },
}

/// All references from one module into a single target component
///
/// Multiple `"Target.x"` strings on the same module collapse into one
/// group with the target module names kept in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Name of the target component
    pub component: String,
    /// Referenced module names within the target component
    pub modules: Vec<String>,
}

/// A named module inside a component
#[derive(Debug, Clone)]
pub struct Module {
    pub name: String,
    pub kind: String,
    /// Dependency groups in declaration order of their first reference
    pub dependencies: Vec<Dependency>,
}

impl Module {
    fn from_record(record: ModuleRecord) -> Result<Self, GraphError> {
        let mut dependencies: Vec<Dependency> = Vec::new();
        for raw in &record.dependencies {
            let (component, module) = parse_dependency(raw)?;
            match dependencies.iter_mut().find(|d| d.component == component) {
                Some(group) => group.modules.push(module),
                None => dependencies.push(Dependency {
                    component,
                    modules: vec![module],
                }),
            }
        }

        Ok(Self {
            name: record.name,
            kind: record.kind,
            dependencies,
        })
    }

    /// Check if this module declares at least one outbound dependency
    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty()
    }
}

/// Split a `"component.module"` reference on the first `.`
///
/// Identifiers containing the separator are out of contract; a string
/// without it (or with an empty half) is rejected as malformed.
fn parse_dependency(raw: &str) -> Result<(String, String), GraphError> {
    match raw.split_once('.') {
        Some((component, module)) if !component.is_empty() && !module.is_empty() => {
            Ok((component.to_string(), module.to_string()))
        }
        _ => Err(GraphError::MalformedDependency {
            dependency: raw.to_string(),
        }),
    }
}

/// A named group of modules, the unit metrics are reported over
#[derive(Debug, Clone)]
pub struct Component {
    pub name: String,
    /// Modules in declaration order
    pub modules: Vec<Module>,
    /// Populated by [`crate::metrics::annotate`]; `None` until then
    pub metrics: Option<ComponentMetrics>,
}

impl Component {
    fn from_record(record: ComponentRecord) -> Result<Self, GraphError> {
        let mut modules: Vec<Module> = Vec::with_capacity(record.modules.len());
        for module_record in record.modules {
            if modules.iter().any(|m| m.name == module_record.name) {
                return Err(GraphError::DuplicateModule {
                    module: module_record.name,
                    component: record.name,
                });
            }
            modules.push(Module::from_record(module_record)?);
        }

        Ok(Self {
            name: record.name,
            modules,
            metrics: None,
        })
    }

    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name == name)
    }

    pub fn has_module(&self, name: &str) -> bool {
        self.module(name).is_some()
    }
}

/// The validated architecture graph, sole owner of all components
///
/// Components are stored in declaration order with a name index on the
/// side, so report iteration is deterministic while dependency lookups
/// stay O(1). Forward references are legal: every component is stored
/// before any validation runs.
#[derive(Debug, Clone)]
pub struct ComponentGraph {
    components: Vec<Component>,
    index: HashMap<String, usize>,
}

impl ComponentGraph {
    /// Build a graph with referential validation enabled
    pub fn new(records: Vec<ComponentRecord>) -> Result<Self, GraphError> {
        Self::from_records(records, true)
    }

    /// Build a graph, optionally skipping validation for trusted inputs
    ///
    /// With `validate` on, the first dangling reference aborts
    /// construction: either a complete valid graph is returned or none.
    pub fn from_records(records: Vec<ComponentRecord>, validate: bool) -> Result<Self, GraphError> {
        let mut components: Vec<Component> = Vec::with_capacity(records.len());
        let mut index = HashMap::with_capacity(records.len());

        for record in records {
            if index.contains_key(&record.name) {
                return Err(GraphError::DuplicateComponent {
                    component: record.name,
                });
            }
            let component = Component::from_record(record)?;
            index.insert(component.name.clone(), components.len());
            components.push(component);
        }

        let graph = Self { components, index };
        if validate {
            graph.check_validity()?;
        }

        Ok(graph)
    }

    /// Components in declaration order
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub(crate) fn components_mut(&mut self) -> &mut [Component] {
        &mut self.components
    }

    pub fn get(&self, name: &str) -> Option<&Component> {
        self.index.get(name).map(|&i| &self.components[i])
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Check every dependency reference, stopping at the first violation
    fn check_validity(&self) -> Result<(), GraphError> {
        for component in &self.components {
            for module in &component.modules {
                for dependency in &module.dependencies {
                    self.check_dependency(dependency)?;
                }
            }
        }
        Ok(())
    }

    fn check_dependency(&self, dependency: &Dependency) -> Result<(), GraphError> {
        let Some(target) = self.get(&dependency.component) else {
            return Err(GraphError::MissingComponent {
                component: dependency.component.clone(),
            });
        };

        for module in &dependency.modules {
            if !target.has_module(module) {
                return Err(GraphError::MissingModule {
                    module: module.clone(),
                    component: dependency.component.clone(),
                });
            }
        }

        Ok(())
    }
}

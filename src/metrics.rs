//! Metric derivation over a validated component graph
//!
//! Two independent derivations annotate every component: abstractness
//! (a purely local ratio) and instability (derived from graph-wide
//! fan-in/fan-out counters). Both read the original modules and
//! dependencies and write disjoint output fields, so their relative
//! order does not matter; [`annotate`] runs them both.

use crate::graph::ComponentGraph;

/// Per-component metrics populated by the annotation pass
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ComponentMetrics {
    /// Fraction of modules whose kind is not `"normal"`, in [0, 1]
    pub abstractness: f64,
    /// Number of this component's modules with at least one dependency
    pub fan_out_dependencies: usize,
    /// Number of (module, this component) references landing here
    pub fan_in_dependencies: usize,
    /// fan-out / (fan-in + fan-out), or 0.0 when both are zero
    pub instability: f64,
}

impl ComponentMetrics {
    /// Distance from the main sequence, `|A + I - 1|`
    ///
    /// 0 means the component sits on the ideal abstractness/instability
    /// trade-off line; 1 is maximally far from it.
    pub fn distance(&self) -> f64 {
        (self.abstractness + self.instability - 1.0).abs()
    }
}

/// Annotate every component of a validated graph with its metrics
///
/// Assumes the graph passed referential validation: a dependency whose
/// target component is absent is a caller contract violation and panics.
/// Re-validation is the loader's job, not this pass's.
pub fn annotate(graph: &mut ComponentGraph) {
    let abstractness: Vec<f64> = graph
        .components()
        .iter()
        .map(|component| {
            if component.modules.is_empty() {
                return 0.0;
            }
            let abnormal = component
                .modules
                .iter()
                .filter(|m| m.kind != "normal")
                .count();
            abnormal as f64 / component.modules.len() as f64
        })
        .collect();

    // Fan-out counts dependent modules, not edges: five dependencies on
    // one module still contribute exactly 1.
    let fan_out: Vec<usize> = graph
        .components()
        .iter()
        .map(|component| {
            component
                .modules
                .iter()
                .filter(|m| m.has_dependencies())
                .count()
        })
        .collect();

    // Fan-in increments once per (source module, target component) pair,
    // however many target modules the pair references.
    let mut fan_in = vec![0usize; graph.len()];
    for component in graph.components() {
        for module in &component.modules {
            for dependency in &module.dependencies {
                let target = graph.index_of(&dependency.component).unwrap_or_else(|| {
                    panic!(
                        "unvalidated graph: component '{}' does not exist",
                        dependency.component
                    )
                });
                fan_in[target] += 1;
            }
        }
    }

    for (i, component) in graph.components_mut().iter_mut().enumerate() {
        let divisor = fan_in[i] + fan_out[i];
        let instability = if divisor == 0 {
            0.0
        } else {
            fan_out[i] as f64 / divisor as f64
        };

        component.metrics = Some(ComponentMetrics {
            abstractness: abstractness[i],
            fan_out_dependencies: fan_out[i],
            fan_in_dependencies: fan_in[i],
            instability,
        });
    }
}

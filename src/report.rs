//! Text report generation
//!
//! Emits a deterministic, human-readable report of an annotated graph:
//! one block per component in declaration order, with metrics to three
//! decimal places, then its modules and their resolved dependency edges.

use std::io::{self, Write};

use crate::graph::ComponentGraph;

/// Write the full per-component report
///
/// Components and modules appear in declaration order. A graph that has
/// not been annotated reports zeroed metrics.
pub fn write_report<W: Write>(graph: &ComponentGraph, writer: &mut W) -> io::Result<()> {
    for component in graph.components() {
        let metrics = component.metrics.unwrap_or_default();

        writeln!(writer, "Component '{}'", component.name)?;
        writeln!(
            writer,
            "Abstractness: {:.3}, Instability: {:.3}, Distance: {:.3}",
            metrics.abstractness,
            metrics.instability,
            metrics.distance()
        )?;

        for module in &component.modules {
            writeln!(writer, "    Module '{}'", module.name)?;
            for dependency in &module.dependencies {
                for target_module in &dependency.modules {
                    writeln!(
                        writer,
                        "        Dependency '{}.{}'",
                        dependency.component, target_module
                    )?;
                }
            }
        }

        writeln!(writer)?;
    }

    Ok(())
}

/// Write a one-line-per-component summary
pub fn write_summary<W: Write>(graph: &ComponentGraph, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "Architecture metrics: {} component(s)", graph.len())?;
    writeln!(writer)?;

    for component in graph.components() {
        let metrics = component.metrics.unwrap_or_default();
        writeln!(
            writer,
            "{}: A={:.3} I={:.3} D={:.3} (fan-in {}, fan-out {}, {} module(s))",
            component.name,
            metrics.abstractness,
            metrics.instability,
            metrics.distance(),
            metrics.fan_in_dependencies,
            metrics.fan_out_dependencies,
            component.modules.len()
        )?;
    }

    Ok(())
}

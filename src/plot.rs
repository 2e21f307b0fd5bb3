//! Plot data export for the A/I chart
//!
//! The scatter-plot frontend consumes one `(instability, abstractness)`
//! coordinate pair per component; this module converts an annotated
//! graph into that JSON-serializable point set.

use std::io::{self, Write};

use serde::Serialize;

use crate::graph::ComponentGraph;

/// A single point on the abstractness/instability chart
#[derive(Debug, Clone, Serialize)]
pub struct PlotPoint {
    pub component: String,
    /// x coordinate
    pub instability: f64,
    /// y coordinate
    pub abstractness: f64,
}

/// Collect one plot point per component, in declaration order
///
/// Components of an unannotated graph plot at the origin.
pub fn plot_points(graph: &ComponentGraph) -> Vec<PlotPoint> {
    graph
        .components()
        .iter()
        .map(|component| {
            let metrics = component.metrics.unwrap_or_default();
            PlotPoint {
                component: component.name.clone(),
                instability: metrics.instability,
                abstractness: metrics.abstractness,
            }
        })
        .collect()
}

/// Write the point set as pretty-printed JSON for an external plotter
pub fn write_points_json<W: Write>(graph: &ComponentGraph, writer: &mut W) -> io::Result<()> {
    let points = plot_points(graph);
    serde_json::to_writer_pretty(&mut *writer, &points)?;
    writeln!(writer)?;
    Ok(())
}

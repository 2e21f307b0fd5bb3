//! # dmv - Dependency Metrics Visualizer
//!
//! Analyzes a declarative JSON description of a software architecture
//! and derives two per-component metrics for plotting on an
//! abstractness/instability (A/I) chart:
//!
//! 1. **Abstractness** - fraction of a component's modules not tagged `"normal"`
//! 2. **Instability** - fan-out / (fan-in + fan-out) over inter-component references
//!
//! ## Usage
//!
//! ```bash
//! # Report to stdout
//! dmv architecture.json
//!
//! # Write the report and the plot point JSON to files
//! dmv -o report.txt --points points.json architecture.json
//!
//! # Skip referential validation for trusted inputs
//! dmv --no-validate architecture.json
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! records -> ComponentGraph::new (validates) -> metrics::annotate -> report / plot
//! ```
//!
//! Construction either returns a complete, valid graph or fails on the
//! first dangling reference; metric annotation assumes a validated graph.

pub mod config;
pub mod graph;
pub mod metrics;
pub mod plot;
pub mod report;

pub use config::{CONFIG_FILE_NAME, ConfigError, DmvConfig, LoadConfig, OutputConfig, find_config, load_config};
pub use graph::{Component, ComponentGraph, ComponentRecord, Dependency, GraphError, Module, ModuleRecord};
pub use metrics::{ComponentMetrics, annotate};
pub use plot::{PlotPoint, plot_points, write_points_json};
pub use report::{write_report, write_summary};

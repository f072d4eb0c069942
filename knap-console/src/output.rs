//! Console table output for the list routes
//!
//! The list routes mirror their result to the process console as a
//! formatted table, one row per engine.

use colored::Colorize;
use kube::ResourceExt;
use tabled::{Table, Tabled};

use knap_common::Appengine;

/// One console-table row per engine
#[derive(Debug, Tabled)]
pub struct EngineRow {
    #[tabled(rename = "ENGINE NAME")]
    pub name: String,
    #[tabled(rename = "APPLICATION")]
    pub application: String,
    #[tabled(rename = "READY")]
    pub ready: String,
    #[tabled(rename = "INSTANCE")]
    pub instance: String,
    #[tabled(rename = "DOMAIN")]
    pub domain: String,
}

impl EngineRow {
    /// Build a row from an engine, current/desired counts folded into one column
    pub fn from_engine(engine: &Appengine) -> Self {
        let status = engine.status.clone().unwrap_or_default();

        Self {
            name: engine.name_any(),
            application: engine.spec.app_name.clone(),
            ready: placeholder_if_empty(status.ready),
            instance: format!("{}/{}", status.instance, engine.spec.size),
            domain: placeholder_if_empty(status.domain),
        }
    }
}

fn placeholder_if_empty(value: String) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value
    }
}

/// Print the engine summary table to the process console
pub fn print_engine_table(engines: &[Appengine]) {
    if engines.is_empty() {
        println!("{}", "No engines found".yellow());
        return;
    }

    let rows: Vec<EngineRow> = engines.iter().map(EngineRow::from_engine).collect();
    let table = Table::new(rows);
    println!("{}", table);
}

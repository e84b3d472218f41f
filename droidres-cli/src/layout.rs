use droidres::{BuiltinLayout, SymbolTable, render_layout};
use serde::Serialize;

use crate::output::emit;

/// Parse a `--layout` value, listing the built-in names on failure.
pub fn parse_layout(value: &str) -> Result<BuiltinLayout, String> {
    value.parse().map_err(|_| {
        let names: Vec<&str> = BuiltinLayout::ALL.iter().map(|l| l.name()).collect();
        format!("unknown layout `{}` (expected one of: {})", value, names.join(", "))
    })
}

#[derive(Serialize)]
struct LayoutReport {
    layout: &'static str,
    keys: usize,
    xml: String,
}

/// Run the gen-layout command: print the layout's `<Row>` blocks on stdout.
pub fn run_gen_layout_command(builtin: BuiltinLayout, json: bool) -> Result<(), String> {
    let keyboard = builtin.layout();
    let xml = render_layout(&keyboard, &SymbolTable::default()).map_err(|e| e.to_string())?;

    let report = LayoutReport {
        layout: builtin.name(),
        keys: keyboard.key_count(),
        xml,
    };
    emit(&report, json, |report| print!("{}", report.xml))
}

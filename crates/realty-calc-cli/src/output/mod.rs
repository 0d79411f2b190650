pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::commands::CommandOutput;
use crate::OutputFormat;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, out: &CommandOutput) {
    match format {
        OutputFormat::Json => json::print_json(&out.value),
        OutputFormat::Table => table::print_table(&out.value),
        OutputFormat::Csv => csv_out::print_csv(&out.value),
        OutputFormat::Minimal => minimal::print_minimal(&out.value),
        OutputFormat::Text => println!("{}", out.report),
    }
}

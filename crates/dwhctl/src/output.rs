//! Structured output rendering

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::Result;

/// Print `data` as JSON or YAML; `Auto` falls back to pretty JSON.
///
/// Human-readable `Auto` output is composed by the individual command
/// handlers, which call this only for structured formats.
pub fn print_output<T: Serialize>(data: T, format: OutputFormat) -> Result<()> {
    let value = serde_json::to_value(data)?;
    match format {
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&value)?),
        OutputFormat::Json | OutputFormat::Auto => {
            println!("{}", serde_json::to_string_pretty(&value)?)
        }
    }
    Ok(())
}

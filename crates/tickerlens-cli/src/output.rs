use std::io::{self, Write};

use serde_json::Value;
use tickerlens_core::Envelope;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(envelope: &Envelope<Value>, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_envelope(&mut out, envelope, format, pretty)?;
    out.flush()?;
    Ok(())
}

pub fn write_envelope<W: Write>(
    out: &mut W,
    envelope: &Envelope<Value>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Ndjson => write_ndjson(out, envelope)?,
        OutputFormat::Table => write_table(out, envelope)?,
    }
    Ok(())
}

/// One line for `meta`, one per data record, one per error.
///
/// Array-valued data fields are split into records; other data is a single line.
fn write_ndjson<W: Write>(out: &mut W, envelope: &Envelope<Value>) -> Result<(), CliError> {
    writeln!(
        out,
        "{}",
        serde_json::json!({ "type": "meta", "meta": envelope.meta })
    )?;

    match record_array(&envelope.data) {
        Some((field, records)) => {
            for record in records {
                writeln!(
                    out,
                    "{}",
                    serde_json::json!({ "type": "record", "field": field, "record": record })
                )?;
            }
        }
        None => writeln!(
            out,
            "{}",
            serde_json::json!({ "type": "data", "data": envelope.data })
        )?,
    }

    for error in &envelope.errors {
        writeln!(
            out,
            "{}",
            serde_json::json!({ "type": "error", "error": error })
        )?;
    }
    Ok(())
}

/// The data's only array field, when the payload is an object with exactly one.
fn record_array(data: &Value) -> Option<(&str, &Vec<Value>)> {
    let object = data.as_object()?;
    let mut arrays = object
        .iter()
        .filter_map(|(key, value)| value.as_array().map(|items| (key.as_str(), items)));
    let first = arrays.next()?;
    if arrays.next().is_some() {
        return None;
    }
    Some(first)
}

fn write_table<W: Write>(out: &mut W, envelope: &Envelope<Value>) -> Result<(), CliError> {
    writeln!(out, "request_id  : {}", envelope.meta.request_id)?;
    writeln!(out, "schema      : {}", envelope.meta.schema_version)?;
    writeln!(out, "generated_at: {}", envelope.meta.generated_at)?;
    writeln!(
        out,
        "sources     : {}",
        envelope
            .meta
            .source_chain
            .iter()
            .map(|source| source.as_str())
            .collect::<Vec<_>>()
            .join(",")
    )?;
    writeln!(out, "latency_ms  : {}", envelope.meta.latency_ms)?;

    if !envelope.meta.warnings.is_empty() {
        writeln!(out, "warnings:")?;
        for warning in &envelope.meta.warnings {
            writeln!(out, "  - {warning}")?;
        }
    }

    writeln!(out, "data:")?;
    match envelope.data.as_object() {
        Some(object) => {
            let width = object.keys().map(String::len).max().unwrap_or(0);
            for (key, value) in object {
                match value {
                    Value::Array(_) | Value::Object(_) => {
                        writeln!(out, "  {key}:")?;
                        for line in serde_json::to_string_pretty(value)?.lines() {
                            writeln!(out, "    {line}")?;
                        }
                    }
                    scalar => writeln!(out, "  {key:<width$} : {}", scalar_text(scalar))?,
                }
            }
        }
        None => writeln!(out, "  {}", scalar_text(&envelope.data))?,
    }

    if !envelope.errors.is_empty() {
        writeln!(out, "errors:")?;
        for error in &envelope.errors {
            writeln!(out, "  - {}: {}", error.code, error.message)?;
        }
    }
    Ok(())
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => match number.as_f64() {
            Some(float) if number.is_f64() => format!("{float:.4}"),
            _ => number.to_string(),
        },
        other => other.to_string(),
    }
}

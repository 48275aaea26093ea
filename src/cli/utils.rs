use serde::Serialize;

use crate::cli::OutputFormat;

/// Print `records` as pretty JSON or as one text line per record
pub fn output_records<T, F>(
    output_format: OutputFormat,
    records: &[T],
    empty_message: &str,
    line: F,
) -> anyhow::Result<()>
where
    T: Serialize,
    F: Fn(&T) -> String,
{
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(records)?);
        }
        OutputFormat::Text => {
            if records.is_empty() {
                println!("{}", empty_message);
            }
            for record in records {
                println!("{}", line(record));
            }
        }
    }
    Ok(())
}

/// Print a freshly created record
pub fn output_created<T, F>(output_format: OutputFormat, record: &T, line: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: Fn(&T) -> String,
{
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(record)?);
        }
        OutputFormat::Text => {
            println!("✓ Created {}", line(record));
        }
    }
    Ok(())
}

/// Value parser for amounts; NaN and infinities have no JSON form
pub fn parse_finite(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.trim().parse().map_err(|e| format!("{}", e))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("'{}' is not a finite number", raw))
    }
}

/// `#12` for stored records, `#?` otherwise
pub fn format_id(id: Option<i64>) -> String {
    id.map(|id| format!("#{}", id)).unwrap_or_else(|| "#?".to_string())
}

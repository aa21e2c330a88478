use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::server::error::AppError;

/// Serializes a header row plus records into a CSV document.
pub fn write_csv<I, R>(headers: &[&str], records: I) -> Result<String, AppError>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = String>,
{
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(headers)?;

    for record in records {
        writer.write_record(record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::InternalError(format!("Failed to flush CSV writer: {}", e)))?;

    String::from_utf8(bytes)
        .map_err(|e| AppError::InternalError(format!("CSV output was not UTF-8: {}", e)))
}

/// Wraps a CSV document in a download response.
pub fn csv_attachment(filename: &str, body: String) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", filename),
            ),
        ],
        body,
    )
        .into_response()
}

/// Formats cents as a decimal amount, e.g. `12345` → `123.45`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

use crate::database::models::AttendanceEntry;
use crate::database::queries;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
};
use chrono::Utc;
use csv::{QuoteStyle, WriterBuilder};
use std::sync::Arc;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const CSV_HEADERS: [&str; 7] = [
    "ID",
    "Nom du travailleur",
    "Nom d'utilisateur",
    "Date",
    "Période",
    "Admin qui a pointé",
    "Date et heure de pointage",
];

/// GET /export-attendance — all attendance rows as a CSV attachment. The BOM
/// keeps accented column names readable when the file is opened in Excel.
pub async fn export_attendance(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let attendance = queries::get_all_attendance(&state.pool).await?;
    let body = build_csv(&attendance)?;

    let filename = format!("presences_{}.csv", Utc::now().date_naive());

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    ))
}

fn build_csv(attendance: &[AttendanceEntry]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;

    for entry in attendance {
        let period = match entry.period.as_str() {
            "morning" => "Matin",
            _ => "Après-midi",
        };

        writer.write_record([
            entry.id.to_string(),
            entry.worker_name.clone(),
            entry.worker_username.clone(),
            entry.date.to_string(),
            period.to_string(),
            entry.admin_name.clone(),
            entry.created_at.format("%d/%m/%Y %H:%M:%S").to_string(),
        ])?;
    }

    let csv_bytes = writer.into_inner().map_err(|err| err.into_error())?;

    let mut body = Vec::with_capacity(UTF8_BOM.len() + csv_bytes.len());
    body.extend_from_slice(UTF8_BOM);
    body.extend_from_slice(&csv_bytes);
    Ok(body)
}

// src/export/logic.rs

use crate::core::{ReportClock, compute_daily_breakdown, compute_utilization_report};
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{LoadExport, ScheduleExport, schedule_rows};
use crate::export::{ExportFormat, ReportKind};
use crate::models::{ResourceKind, ResourceRef};
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;
use serde::Serialize;
use std::path::Path;

/// What to export and where.
pub struct ExportRequest<'a> {
    pub report: ReportKind,
    pub format: ExportFormat,
    pub file: &'a str,
    pub resource: Option<ResourceRef>,
    pub day_count: u32,
    pub force: bool,
}

pub struct ExportLogic;

impl ExportLogic {
    /// Compute the requested report and write it. Returns the number of rows.
    pub fn export(pool: &DbPool, req: &ExportRequest, clock: &ReportClock) -> AppResult<usize> {
        let path = expand_tilde(req.file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {}",
                req.file
            )));
        }

        // rows are computed before any overwrite prompt
        match req.report {
            ReportKind::Load => {
                let rows = load_rows(pool, clock)?;
                write(&rows, req, &path)
            }
            ReportKind::Schedule => {
                let rows = schedule_export(pool, req, clock)?;
                write(&rows, req, &path)
            }
        }
    }
}

/// Load rows for every machine, then every work unit.
pub fn load_rows(pool: &DbPool, clock: &ReportClock) -> AppResult<Vec<LoadExport>> {
    let mut out = Vec::new();

    for kind in [ResourceKind::Machine, ResourceKind::WorkUnit] {
        let resources = queries::list_resources(&pool.conn, kind).map_err(AppError::unavailable)?;
        let rows = compute_utilization_report(pool, &resources, clock)?;
        out.extend(rows.iter().map(LoadExport::from));
    }

    Ok(out)
}

fn schedule_export(
    pool: &DbPool,
    req: &ExportRequest,
    clock: &ReportClock,
) -> AppResult<Vec<ScheduleExport>> {
    let reference = req.resource.ok_or_else(|| {
        AppError::Export("--report schedule needs --resource kind:id".into())
    })?;
    if req.day_count == 0 {
        return Err(AppError::Export("--days must be at least 1".into()));
    }

    let resource = queries::get_resource(&pool.conn, reference)?;
    let days = compute_daily_breakdown(pool, &resource, clock, req.day_count)?;

    Ok(schedule_rows(&reference.to_string(), &days, clock.tz))
}

fn write<T: Serialize>(rows: &[T], req: &ExportRequest, path: &Path) -> AppResult<usize> {
    if rows.is_empty() {
        warning("Nothing to export.");
        return Ok(0);
    }

    ensure_writable(path, req.force)?;

    match req.format {
        ExportFormat::Csv => export_csv(rows, path)?,
        ExportFormat::Json => export_json(rows, path)?,
    }

    Ok(rows.len())
}

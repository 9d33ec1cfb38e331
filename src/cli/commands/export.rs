use crate::cli::commands::{open_db, report_clock};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::audit_or_warn;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::export::logic::ExportRequest;
use crate::models::ResourceRef;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        report,
        format,
        file,
        resource,
        days,
        today,
        force,
    } = cmd
    {
        let resource = resource
            .as_deref()
            .map(str::parse::<ResourceRef>)
            .transpose()?;

        let pool = open_db(cfg)?;
        let clock = report_clock(cfg, today.as_ref())?;

        let req = ExportRequest {
            report: *report,
            format: *format,
            file: file.as_str(),
            resource,
            day_count: days.unwrap_or(cfg.report_days),
            force: *force,
        };

        let n = ExportLogic::export(&pool, &req, &clock)?;
        if n > 0 {
            audit_or_warn(
                &pool.conn,
                "export",
                format.as_str(),
                &format!("{} rows exported to {}", n, file),
            );
        }
    }
    Ok(())
}

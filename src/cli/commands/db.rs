use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::audit_or_warn;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats::{self, SlotHealth};
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success, warning};

/// Maintenance flags run in a fixed order: migrate, info, check, vacuum.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    else {
        return Ok(());
    };

    if !(*migrate || *check || *vacuum || *show_info) {
        info("Nothing to do. Use --migrate, --check, --vacuum or --info.");
        return Ok(());
    }

    let pool = DbPool::new(&cfg.database)?;

    if *migrate {
        run_pending_migrations(&pool.conn)?;
        success("Schema is up to date.");
    }

    if *show_info {
        stats::print_db_info(&pool, &cfg.database)?;
    }

    if *check {
        check_database(&pool)?;
    }

    if *vacuum {
        pool.conn.execute_batch("VACUUM;")?;
        audit_or_warn(&pool.conn, "vacuum", "", "Database vacuumed");
        success("Vacuum completed.");
    }

    Ok(())
}

fn check_database(pool: &DbPool) -> AppResult<()> {
    let integrity: String = pool
        .conn
        .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

    if integrity == "ok" {
        success("Integrity check passed.");
    } else {
        error(format!("Integrity check failed: {integrity}"));
    }

    let health = stats::slot_health(&pool.conn)?;
    report_slot_health(&health);
    Ok(())
}

fn report_slot_health(health: &SlotHealth) {
    if health.is_clean() {
        success("All slots are assigned and well formed.");
        return;
    }

    let findings = [
        (health.detached, "without a machine or work unit"),
        (health.half_bounded, "with only one of start/end set"),
        (health.inverted, "ending at or before their start"),
    ];
    for (n, what) in findings.into_iter().filter(|(n, _)| *n > 0) {
        warning(format!("{n} slot(s) {what}."));
    }
}

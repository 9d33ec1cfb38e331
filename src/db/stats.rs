use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::Connection;
use std::fs;

fn count(conn: &Connection, table: &str) -> rusqlite::Result<i64> {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TOTALS
    //
    for (label, table) in [
        ("Machines", "machines"),
        ("Work units", "work_units"),
        ("Orders", "orders"),
        ("Slots", "slots"),
    ] {
        let n = count(&pool.conn, table)?;
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, n, RESET);
    }

    let unscheduled: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM slots WHERE start_at IS NULL OR end_at IS NULL",
        [],
        |row| row.get(0),
    )?;
    if unscheduled > 0 {
        println!("{}• Unscheduled slots:{} {}", CYAN, RESET, unscheduled);
    }

    //
    // 3) BOOKED RANGE (UTC)
    //
    let (first, last): (Option<String>, Option<String>) = pool.conn.query_row(
        "SELECT MIN(start_at), MAX(end_at) FROM slots",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    let dash = || format!("{GREY}--{RESET}");
    println!("{}• Booked range (UTC):{}", CYAN, RESET);
    println!("    from: {}", first.unwrap_or_else(dash));
    println!("    to:   {}", last.unwrap_or_else(dash));

    println!();
    Ok(())
}

/// Slots the reports silently skip or cannot place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotHealth {
    /// Neither a machine nor a work unit (owner deleted).
    pub detached: i64,
    /// Exactly one of start/end set.
    pub half_bounded: i64,
    /// Both bounds set, end not after start.
    pub inverted: i64,
}

impl SlotHealth {
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

pub fn slot_health(conn: &Connection) -> rusqlite::Result<SlotHealth> {
    conn.query_row(
        "SELECT
           COALESCE(SUM(machine_id IS NULL AND work_unit_id IS NULL), 0),
           COALESCE(SUM((start_at IS NULL) <> (end_at IS NULL)), 0),
           COALESCE(SUM(start_at IS NOT NULL AND end_at IS NOT NULL AND end_at <= start_at), 0)
         FROM slots",
        [],
        |row| {
            Ok(SlotHealth {
                detached: row.get(0)?,
                half_bounded: row.get(1)?,
                inverted: row.get(2)?,
            })
        },
    )
}

use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. Applied migrations are recorded there.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

fn create_resource_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS machines (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            name           TEXT NOT NULL,
            type           TEXT NOT NULL DEFAULT 'other',
            workday_start  TEXT,
            workday_end    TEXT,
            comment        TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS work_units (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            name           TEXT NOT NULL,
            type           TEXT NOT NULL DEFAULT 'other',
            workday_start  TEXT,
            workday_end    TEXT,
            comment        TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_machines_type_name ON machines(type, name);
        CREATE INDEX IF NOT EXISTS idx_work_units_type_name ON work_units(type, name);
        "#,
    )
}

fn create_order_and_slot_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            title       TEXT NOT NULL DEFAULT '',
            deadline    TEXT,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS slots (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            order_id      INTEGER NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
            machine_id    INTEGER REFERENCES machines(id) ON DELETE SET NULL,
            work_unit_id  INTEGER REFERENCES work_units(id) ON DELETE SET NULL,
            start_at      TEXT,
            end_at        TEXT,
            comment       TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_slots_machine ON slots(machine_id, start_at);
        CREATE INDEX IF NOT EXISTS idx_slots_work_unit ON slots(work_unit_id, start_at);
        "#,
    )
}

type Step = fn(&Connection) -> Result<()>;

/// Ordered list of schema migrations: (version, description, step).
const MIGRATIONS: &[(&str, &str, Step)] = &[
    (
        "20260302_0001_create_resources",
        "Created machines and work_units tables",
        create_resource_tables,
    ),
    (
        "20260302_0002_create_orders_slots",
        "Created orders and slots tables",
        create_order_and_slot_tables,
    ),
];

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for (version, message, step) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        step(conn)?;
        mark_applied(conn, version, message)?;

        success(format!("Migration applied: {} → {}", version, message));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();

        let applied: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(applied as usize, MIGRATIONS.len());

        // every table the queries touch is there, with its working hours
        for table in ["machines", "work_units"] {
            conn.execute(
                &format!("INSERT INTO {table} (name, workday_start, workday_end) VALUES ('x', '08:00', '16:00')"),
                [],
            )
            .unwrap();
        }
        conn.execute(
            "INSERT INTO orders (title, created_at) VALUES ('o', '2026-10-18')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO slots (order_id, work_unit_id, start_at, end_at) VALUES (1, 1, NULL, NULL)",
            [],
        )
        .unwrap();
    }
}

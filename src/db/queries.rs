use crate::errors::{AppError, AppResult};
use crate::models::{Order, Resource, ResourceKind, ResourceRef, Slot, Span, Stamp};
use crate::utils::time::format_time;
use chrono::{DateTime, Local, NaiveDate, NaiveTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

// ---------------------------
// Column codecs
// ---------------------------

/// Timestamps are stored in UTC with a fixed width, so that text
/// comparison in SQL matches chronological order.
pub fn stamp_to_db(ts: &Stamp) -> String {
    ts.with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn stamp_from_db(row: &Row, col: &str) -> Result<Option<Stamp>> {
    let raw: Option<String> = row.get(col)?;
    raw.map(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map_err(|_| conversion_error(0, AppError::InvalidTimestamp(s.clone())))
    })
    .transpose()
}

fn time_from_db(row: &Row, col: &str) -> Result<Option<NaiveTime>> {
    let raw: Option<String> = row.get(col)?;
    raw.map(|s| {
        NaiveTime::parse_from_str(&s, "%H:%M")
            .map_err(|_| conversion_error(0, AppError::InvalidTime(s.clone())))
    })
    .transpose()
}

fn date_from_db(row: &Row, col: &str) -> Result<Option<NaiveDate>> {
    let raw: Option<String> = row.get(col)?;
    raw.map(|s| {
        NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map_err(|_| conversion_error(0, AppError::InvalidDate(s.clone())))
    })
    .transpose()
}

// ---------------------------
// Resources
// ---------------------------

fn map_resource(row: &Row, kind: ResourceKind) -> Result<Resource> {
    Ok(Resource {
        id: row.get("id")?,
        kind,
        name: row.get("name")?,
        category: row.get("type")?,
        workday_start: time_from_db(row, "workday_start")?,
        workday_end: time_from_db(row, "workday_end")?,
        comment: row.get("comment")?,
    })
}

/// Insert a machine or work unit; `resource.id` is ignored.
pub fn insert_resource(conn: &Connection, resource: &Resource) -> AppResult<i64> {
    let sql = format!(
        "INSERT INTO {} (name, type, workday_start, workday_end, comment)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        resource.kind.table()
    );

    conn.execute(
        &sql,
        params![
            resource.name,
            resource.category,
            resource.workday_start.map(format_time),
            resource.workday_end.map(format_time),
            resource.comment,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All resources of one kind, ordered by category then name.
pub fn list_resources(conn: &Connection, kind: ResourceKind) -> AppResult<Vec<Resource>> {
    let sql = format!(
        "SELECT id, name, type, workday_start, workday_end, comment
         FROM {}
         ORDER BY type ASC, name ASC, id ASC",
        kind.table()
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| map_resource(row, kind))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_resource(conn: &Connection, resource: ResourceRef) -> AppResult<Resource> {
    let sql = format!(
        "SELECT id, name, type, workday_start, workday_end, comment
         FROM {} WHERE id = ?1",
        resource.kind.table()
    );

    conn.query_row(&sql, [resource.id], |row| map_resource(row, resource.kind))
        .optional()?
        .ok_or(AppError::NotFound {
            what: resource.kind.label(),
            id: resource.id,
        })
}

/// Delete a resource. Its slots stay, detached from it.
pub fn delete_resource(conn: &Connection, resource: ResourceRef) -> AppResult<()> {
    let sql = format!("DELETE FROM {} WHERE id = ?1", resource.kind.table());
    let n = conn.execute(&sql, [resource.id])?;
    if n == 0 {
        return Err(AppError::NotFound {
            what: resource.kind.label(),
            id: resource.id,
        });
    }
    Ok(())
}

// ---------------------------
// Orders
// ---------------------------

fn map_order(row: &Row) -> Result<Order> {
    Ok(Order {
        id: row.get("id")?,
        title: row.get("title")?,
        deadline: date_from_db(row, "deadline")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_order(
    conn: &Connection,
    title: &str,
    deadline: Option<NaiveDate>,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO orders (title, deadline, created_at) VALUES (?1, ?2, ?3)",
        params![
            title,
            deadline.map(|d| d.format("%Y-%m-%d").to_string()),
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_orders(conn: &Connection) -> AppResult<Vec<Order>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, deadline, created_at FROM orders ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], map_order)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_order(conn: &Connection, id: i64) -> AppResult<Order> {
    conn.query_row(
        "SELECT id, title, deadline, created_at FROM orders WHERE id = ?1",
        [id],
        map_order,
    )
    .optional()?
    .ok_or(AppError::NotFound { what: "Order", id })
}

// ---------------------------
// Slots
// ---------------------------

const SLOT_COLUMNS: &str = "s.id, s.order_id, o.title AS order_title, s.machine_id, s.work_unit_id,
     s.start_at, s.end_at, s.comment";

pub fn map_slot(row: &Row) -> Result<Slot> {
    Ok(Slot {
        id: row.get("id")?,
        order_id: row.get("order_id")?,
        order_title: row.get("order_title")?,
        machine_id: row.get("machine_id")?,
        work_unit_id: row.get("work_unit_id")?,
        start: stamp_from_db(row, "start_at")?,
        end: stamp_from_db(row, "end_at")?,
        comment: row.get("comment")?,
    })
}

/// Insert a slot; `slot.id` and `slot.order_title` are ignored.
pub fn insert_slot(conn: &Connection, slot: &Slot) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO slots (order_id, machine_id, work_unit_id, start_at, end_at, comment)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            slot.order_id,
            slot.machine_id,
            slot.work_unit_id,
            slot.start.as_ref().map(stamp_to_db),
            slot.end.as_ref().map(stamp_to_db),
            slot.comment,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_slot(conn: &Connection, id: i64) -> AppResult<()> {
    let n = conn.execute("DELETE FROM slots WHERE id = ?1", [id])?;
    if n == 0 {
        return Err(AppError::NotFound { what: "Slot", id });
    }
    Ok(())
}

/// Slots ordered by start then id; unscheduled slots come last.
/// With `resource`, only the slots assigned to it.
pub fn list_slots(conn: &Connection, resource: Option<ResourceRef>) -> AppResult<Vec<Slot>> {
    let filter = match resource {
        Some(r) => format!("WHERE s.{} = ?1", r.kind.slot_column()),
        None => "WHERE ?1 IS NULL".to_string(),
    };
    let sql = format!(
        "SELECT {SLOT_COLUMNS}
         FROM slots s LEFT JOIN orders o ON o.id = s.order_id
         {filter}
         ORDER BY s.start_at IS NULL, s.start_at ASC, s.id ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([resource.map(|r| r.id)], map_slot)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn slots_for_resource(conn: &Connection, resource: ResourceRef) -> AppResult<Vec<Slot>> {
    list_slots(conn, Some(resource))
}

/// Slots of `resource` with both bounds set that strictly overlap `range`.
pub fn slots_overlapping(
    conn: &Connection,
    resource: ResourceRef,
    range: &Span,
) -> AppResult<Vec<Slot>> {
    let sql = format!(
        "SELECT {SLOT_COLUMNS}
         FROM slots s LEFT JOIN orders o ON o.id = s.order_id
         WHERE s.{} = ?1
           AND s.start_at IS NOT NULL
           AND s.end_at IS NOT NULL
           AND s.start_at < ?3
           AND s.end_at > ?2
         ORDER BY s.start_at ASC, s.id ASC",
        resource.kind.slot_column()
    );

    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map(
        params![resource.id, stamp_to_db(&range.start), stamp_to_db(&range.end)],
        map_slot,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::run_pending_migrations;
    use chrono::FixedOffset;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        run_pending_migrations(&conn).unwrap();
        conn
    }

    fn at(s: &str) -> Stamp {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn stamps_are_stored_as_fixed_width_utc() {
        let ts = at("2026-10-19T09:00:00+02:00");
        assert_eq!(stamp_to_db(&ts), "2026-10-19T07:00:00.000000Z");
    }

    #[test]
    fn resource_round_trip_keeps_hours() {
        let c = conn();
        let r = Resource::new(ResourceKind::Machine, 0, "Laser").with_workday(
            NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
        );
        let id = insert_resource(&c, &r).unwrap();

        let back = get_resource(&c, ResourceRef::machine(id)).unwrap();
        assert_eq!(back.name, "Laser");
        assert_eq!(back.workday().hours(), 8.0);

        let err = get_resource(&c, ResourceRef::work_unit(id)).unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[test]
    fn overlap_query_is_strict_and_per_resource() {
        let c = conn();
        let m = insert_resource(&c, &Resource::new(ResourceKind::Machine, 0, "Laser")).unwrap();
        let u = insert_resource(&c, &Resource::new(ResourceKind::WorkUnit, 0, "Paint")).unwrap();
        let order = insert_order(&c, "Gate", None).unwrap();

        let plus2 = FixedOffset::east_opt(7200).unwrap();
        let range = Span::new(
            at("2026-10-19T08:00:00+02:00").with_timezone(&plus2),
            at("2026-10-19T17:00:00+02:00").with_timezone(&plus2),
        );

        let inside = Slot::new(0, order)
            .on_machine(m)
            .between(at("2026-10-19T09:00:00+02:00"), at("2026-10-19T11:00:00+02:00"));
        let touching = Slot::new(0, order)
            .on_machine(m)
            .between(at("2026-10-19T17:00:00+02:00"), at("2026-10-19T18:00:00+02:00"));
        let unit_only = Slot::new(0, order)
            .on_work_unit(u)
            .between(at("2026-10-19T09:00:00+02:00"), at("2026-10-19T11:00:00+02:00"));
        let open = Slot::new(0, order).on_machine(m);

        let first = insert_slot(&c, &inside).unwrap();
        insert_slot(&c, &touching).unwrap();
        insert_slot(&c, &unit_only).unwrap();
        insert_slot(&c, &open).unwrap();

        let hits = slots_overlapping(&c, ResourceRef::machine(m), &range).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, first);
        assert_eq!(hits[0].order_title.as_deref(), Some("Gate"));
        assert_eq!(hits[0].start, inside.start);

        assert_eq!(slots_for_resource(&c, ResourceRef::machine(m)).unwrap().len(), 3);
        assert_eq!(list_slots(&c, None).unwrap().len(), 4);
    }

    #[test]
    fn deleting_a_machine_detaches_its_slots() {
        let c = conn();
        let m = insert_resource(&c, &Resource::new(ResourceKind::Machine, 0, "Press")).unwrap();
        let order = insert_order(&c, "Rack", None).unwrap();
        let id = insert_slot(&c, &Slot::new(0, order).on_machine(m)).unwrap();

        delete_resource(&c, ResourceRef::machine(m)).unwrap();

        let slots = list_slots(&c, None).unwrap();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].id, id);
        assert_eq!(slots[0].machine_id, None);
    }
}

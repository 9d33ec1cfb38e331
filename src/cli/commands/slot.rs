use crate::cli::commands::open_db;
use crate::cli::parser::{Commands, SlotAction};
use crate::config::Config;
use crate::core::placement::check_placement;
use crate::db::log::audit_or_warn;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::{ResourceRef, Slot, Span, Stamp};
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::colorize_optional;
use crate::utils::formatting::truncate;
use crate::utils::table::{Column, Table};
use crate::utils::time::{clock, parse_optional_timestamp};
use chrono::FixedOffset;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Slot { action } = cmd {
        let pool = open_db(cfg)?;
        let tz = cfg.tz()?;

        match action {
            SlotAction::Add {
                order,
                machine,
                unit,
                start,
                end,
                comment,
                allow_overlap,
            } => {
                let start = parse_optional_timestamp(start.as_ref(), tz)?;
                let end = parse_optional_timestamp(end.as_ref(), tz)?;

                let targets: Vec<ResourceRef> = machine
                    .map(ResourceRef::machine)
                    .into_iter()
                    .chain(unit.map(ResourceRef::work_unit))
                    .collect();

                let mut slot = Slot::new(0, *order);
                slot.comment = comment.clone();
                for r in &targets {
                    slot = slot.on(*r);
                }
                slot.start = start;
                slot.end = end;

                add_slot(&pool, &slot, &targets, *allow_overlap, tz)?;
            }

            SlotAction::List { machine, unit } => {
                let filter = machine
                    .map(ResourceRef::machine)
                    .or(unit.map(ResourceRef::work_unit));

                let slots = match filter {
                    Some(r) => queries::slots_for_resource(&pool.conn, r)?,
                    None => queries::list_slots(&pool.conn, None)?,
                };

                if slots.is_empty() {
                    info("No slots found.");
                    return Ok(());
                }
                print!("{}", slot_table(&slots, tz).render(&cfg.separator_char));
            }

            SlotAction::Del { id } => {
                queries::delete_slot(&pool.conn, *id)?;
                audit_or_warn(&pool.conn, "del", &format!("slot:{id}"), "Slot deleted");
                success(format!("Slot #{id} deleted."));
            }
        }
    }

    Ok(())
}

fn add_slot(
    pool: &DbPool,
    slot: &Slot,
    targets: &[ResourceRef],
    allow_overlap: bool,
    tz: FixedOffset,
) -> AppResult<()> {
    let order = queries::get_order(&pool.conn, slot.order_id)?;

    let resources = targets
        .iter()
        .map(|r| queries::get_resource(&pool.conn, *r))
        .collect::<AppResult<Vec<_>>>()?;

    match slot.bounds() {
        Some((start, end)) => {
            if start >= end {
                return Err(AppError::InvalidTimestamp(
                    "slot end must be after its start".into(),
                ));
            }

            let candidate = Span::new(start, end);
            for resource in &resources {
                let placement = check_placement(pool, resource, &candidate, tz)?;

                if !placement.conflicts.is_empty() {
                    let busy = placement
                        .conflicts
                        .iter()
                        .map(|c| {
                            format!(
                                "slot #{} ({}-{})",
                                c.slot_id,
                                clock(&c.span.start, tz),
                                clock(&c.span.end, tz)
                            )
                        })
                        .collect::<Vec<_>>()
                        .join(", ");
                    let msg = format!(
                        "{} '{}' is already booked: {}",
                        resource.kind.label(),
                        resource.name,
                        busy
                    );

                    if !allow_overlap {
                        return Err(AppError::SlotConflict(msg));
                    }
                    warning(msg);
                }

                if placement.outside_workday {
                    warning(format!(
                        "Slot falls outside the working hours of {} '{}'.",
                        resource.kind.label().to_lowercase(),
                        resource.name
                    ));
                }
            }
        }
        None => {
            if slot.start.is_some() || slot.end.is_some() {
                warning("Slot has only one bound: it will not count towards any load.");
            }
        }
    }

    let id = queries::insert_slot(&pool.conn, slot)?;

    audit_or_warn(
        &pool.conn,
        "add",
        &format!("slot:{id}"),
        &format!("Order #{} booked on {}", order.id, slot.location()),
    );
    success(format!(
        "Slot #{id} added: order #{} '{}' on {}",
        order.id,
        order.title,
        slot.location()
    ));
    Ok(())
}

fn when(ts: Option<Stamp>, tz: FixedOffset) -> String {
    ts.map(|t| t.with_timezone(&tz).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| colorize_optional("--"))
}

fn slot_table(slots: &[Slot], tz: FixedOffset) -> Table {
    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::left("Order"),
        Column::left("Where"),
        Column::left("Start"),
        Column::left("End"),
        Column::left("Comment"),
    ]);

    for s in slots {
        let order = match &s.order_title {
            Some(t) => format!("#{} {}", s.order_id, truncate(t, 32)),
            None => format!("#{}", s.order_id),
        };
        table.add_row(vec![
            s.id.to_string(),
            order,
            s.location(),
            when(s.start, tz),
            when(s.end, tz),
            s.comment.clone(),
        ]);
    }

    table
}

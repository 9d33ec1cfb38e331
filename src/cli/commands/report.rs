use crate::cli::commands::{open_db, report_clock};
use crate::cli::parser::{Commands, ReportAction};
use crate::config::Config;
use crate::core::{compute_daily_breakdown, compute_utilization_report};
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::{DayReport, LoadRow, ResourceKind, ResourceRef};
use crate::ui::messages::{header, info};
use crate::utils::colors::{CYAN, GREEN, GREY, RED, RESET, color_for_status, colorize_load};
use crate::utils::formatting::{bold, mins2readable, truncate};
use crate::utils::table::{Column, Table};
use crate::utils::time::clock;
use chrono::FixedOffset;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report { action } = cmd {
        let pool = open_db(cfg)?;

        match action {
            ReportAction::Load { units, today } => {
                let clock = report_clock(cfg, today.as_ref())?;

                let mut kinds = vec![ResourceKind::Machine];
                if *units {
                    kinds.push(ResourceKind::WorkUnit);
                }

                for kind in kinds {
                    let resources =
                        queries::list_resources(&pool.conn, kind).map_err(AppError::unavailable)?;
                    let rows = compute_utilization_report(&pool, &resources, &clock)?;

                    header(format!(
                        "{} load from {} ({})",
                        kind.label(),
                        clock.today.format("%Y-%m-%d"),
                        clock.tz
                    ));
                    if rows.is_empty() {
                        info(format!("No {}s defined.", kind.label().to_lowercase()));
                        println!();
                        continue;
                    }
                    print!("{}", load_table(&rows).render(&cfg.separator_char));
                    println!();
                }
            }

            ReportAction::Schedule {
                kind,
                id,
                days,
                today,
            } => {
                let clock = report_clock(cfg, today.as_ref())?;
                let day_count = days.unwrap_or(cfg.report_days);
                if day_count == 0 {
                    return Err(AppError::Other("--days must be at least 1".into()));
                }

                let resource = queries::get_resource(&pool.conn, ResourceRef::new(*kind, *id))?;
                let report = compute_daily_breakdown(&pool, &resource, &clock, day_count)?;

                header(format!(
                    "Schedule of {} '{}' ({})",
                    kind.label().to_lowercase(),
                    resource.name,
                    resource.reference()
                ));
                if !resource.workday().configured {
                    info("No working hours configured: using 08:00-17:00.");
                }

                for day in &report {
                    print_day(day, clock.tz);
                }
            }
        }
    }

    Ok(())
}

fn load_table(rows: &[LoadRow]) -> Table {
    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::left("Name"),
        Column::left("Category"),
        Column::right("Today"),
        Column::right("3 days"),
        Column::right("Week"),
        Column::left("Status"),
    ]);

    for r in rows {
        let color = color_for_status(r.status);
        table.add_row(vec![
            r.resource.id.to_string(),
            r.name.clone(),
            r.category.clone(),
            colorize_load(r.today),
            colorize_load(r.three_days),
            colorize_load(r.week),
            format!("{color}{}{RESET}", r.status.as_str()),
        ]);
    }

    table
}

fn print_day(day: &DayReport, tz: FixedOffset) {
    println!(
        "{}  {}{}-{}{}  busy {}  free {}",
        bold(&day.date.format("%Y-%m-%d %a").to_string()),
        CYAN,
        clock(&day.window.start, tz),
        clock(&day.window.end, tz),
        RESET,
        mins2readable(day.busy_minutes(), false, true),
        mins2readable(day.free_minutes(), false, true),
    );

    if day.window.is_empty() {
        println!("    {GREY}no working time{RESET}");
        println!();
        return;
    }

    // stable sort: free stretches stay ahead of bookings with the same start
    let mut lines: Vec<(_, String)> = day
        .free
        .iter()
        .map(|f| {
            (
                f.start,
                format!("    {GREEN}free{RESET}  {}-{}", clock(&f.start, tz), clock(&f.end, tz)),
            )
        })
        .collect();

    lines.extend(day.busy.iter().map(|b| {
        let order = match &b.order_title {
            Some(t) => format!("order #{} {}", b.order_id, truncate(t, 40)),
            None => format!("order #{}", b.order_id),
        };
        (
            b.span.start,
            format!(
                "    {RED}busy{RESET}  {}-{}  {} {GREY}(slot #{}){RESET}",
                clock(&b.span.start, tz),
                clock(&b.span.end, tz),
                order,
                b.slot_id
            ),
        )
    }));

    lines.sort_by(|a, b| a.0.cmp(&b.0));
    for (_, line) in lines {
        println!("{line}");
    }
    println!();
}

use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::formatting::truncate;
use crate::utils::table::{strip_ansi, visible_width};
use ansi_term::Colour;

const OP_WIDTH: usize = 40;

fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "export" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

pub struct LogLogic;

impl LogLogic {
    pub fn load(pool: &DbPool) -> AppResult<Vec<LogEntry>> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let raw_date: String = row.get(1)?;
            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            Ok(LogEntry {
                id: row.get(0)?,
                date,
                operation: row.get(2)?,
                target: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                message: row.get(4)?,
            })
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }
        Ok(entries)
    }

    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = Self::load(pool)?;

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for e in &entries {
            let op = color_for_operation(&e.operation).paint(e.operation.as_str());
            let mut op_target = op.to_string();
            if !e.target.is_empty() {
                op_target.push_str(&format!(" ({})", e.target));
            }

            // truncate on the visible text, then colour the operation again
            if visible_width(&op_target) > OP_WIDTH {
                let cut = truncate(&strip_ansi(&op_target), OP_WIDTH);
                let rest = cut.strip_prefix(e.operation.as_str()).unwrap_or(&cut).to_string();
                op_target = format!("{op}{rest}");
            }

            let padding = " ".repeat(OP_WIDTH.saturating_sub(visible_width(&op_target)));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id,
                e.date,
                op_target,
                padding,
                e.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}

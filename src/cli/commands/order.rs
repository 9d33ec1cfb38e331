use crate::cli::commands::{open_db, parse_date};
use crate::cli::parser::{Commands, OrderAction};
use crate::config::Config;
use crate::db::log::audit_or_warn;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::colors::colorize_optional;
use crate::utils::formatting::truncate;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Order { action } = cmd {
        let pool = open_db(cfg)?;

        match action {
            OrderAction::Add { title, deadline } => {
                let title = title.trim();
                if title.is_empty() {
                    return Err(AppError::Other("order title cannot be empty".into()));
                }
                let deadline = deadline.as_deref().map(parse_date).transpose()?;

                let id = queries::insert_order(&pool.conn, title, deadline)?;

                audit_or_warn(
                    &pool.conn,
                    "add",
                    &format!("order:{id}"),
                    &format!("Order '{title}' added"),
                );
                success(format!("Order #{id} '{title}' added"));
            }

            OrderAction::List => {
                let orders = queries::list_orders(&pool.conn)?;
                if orders.is_empty() {
                    info("No orders found.");
                    return Ok(());
                }

                let mut table = Table::new(vec![
                    Column::right("ID"),
                    Column::left("Title"),
                    Column::left("Deadline"),
                ]);
                for o in &orders {
                    let deadline = o
                        .deadline
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| colorize_optional("--"));
                    table.add_row(vec![o.id.to_string(), truncate(&o.title, 48), deadline]);
                }
                print!("{}", table.render(&cfg.separator_char));
            }
        }
    }

    Ok(())
}

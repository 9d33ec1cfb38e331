use crate::cli::commands::open_db;
use crate::cli::parser::{Commands, ResourceAction};
use crate::config::Config;
use crate::db::log::audit_or_warn;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::{Resource, ResourceKind, ResourceRef};
use crate::ui::messages::{header, info, success, warning};
use crate::utils::colors::colorize_optional;
use crate::utils::table::{Column, Table};
use crate::utils::time::{format_time, parse_optional_time};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Resource { action } = cmd {
        let pool = open_db(cfg)?;

        match action {
            ResourceAction::Add {
                kind,
                name,
                category,
                start,
                end,
                comment,
            } => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(AppError::InvalidResource("name cannot be empty".into()));
                }

                let start = parse_optional_time(start.as_ref())?;
                let end = parse_optional_time(end.as_ref())?;
                if start.is_some() != end.is_some() {
                    warning("Only one workday bound given: the 08:00-17:00 default will be used.");
                }

                let resource = Resource {
                    category: category.trim().to_lowercase(),
                    workday_start: start,
                    workday_end: end,
                    comment: comment.clone(),
                    ..Resource::new(*kind, 0, name)
                };
                let id = queries::insert_resource(&pool.conn, &resource)?;
                let reference = ResourceRef::new(*kind, id);

                audit_or_warn(
                    &pool.conn,
                    "add",
                    &reference.to_string(),
                    &format!("{} '{}' added", kind.label(), name),
                );
                success(format!("{} '{}' added as {}", kind.label(), name, reference));
            }

            ResourceAction::List { kind } => {
                let kinds = match kind {
                    Some(k) => vec![*k],
                    None => vec![ResourceKind::Machine, ResourceKind::WorkUnit],
                };

                for k in kinds {
                    let resources = queries::list_resources(&pool.conn, k)?;
                    header(format!("{}s", k.label()));

                    if resources.is_empty() {
                        info(format!("No {}s defined.", k.label().to_lowercase()));
                        println!();
                        continue;
                    }
                    print!("{}", resource_table(&resources).render(&cfg.separator_char));
                    println!();
                }
            }

            ResourceAction::Del { kind, id } => {
                let reference = ResourceRef::new(*kind, *id);
                let resource = queries::get_resource(&pool.conn, reference)?;
                queries::delete_resource(&pool.conn, reference)?;

                audit_or_warn(
                    &pool.conn,
                    "del",
                    &reference.to_string(),
                    &format!("{} '{}' deleted", kind.label(), resource.name),
                );
                success(format!("{} '{}' deleted.", kind.label(), resource.name));
            }
        }
    }

    Ok(())
}

fn resource_table(resources: &[Resource]) -> Table {
    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::left("Name"),
        Column::left("Category"),
        Column::left("Workday"),
        Column::right("Hours"),
        Column::left("Comment"),
    ]);

    for r in resources {
        let workday = r.workday();
        let window = if workday.configured {
            format!("{}-{}", format_time(workday.start), format_time(workday.end))
        } else {
            colorize_optional("--")
        };

        table.add_row(vec![
            r.id.to_string(),
            r.name.clone(),
            r.category.clone(),
            window,
            format!("{:.1}", workday.hours()),
            r.comment.clone(),
        ]);
    }

    table
}

use crate::export::{ExportFormat, ReportKind};
use crate::models::ResourceKind;
use clap::{ArgGroup, Parser, Subcommand};

/// Command-line interface definition for shopload
/// Production scheduling CLI: machines, work units, orders and slots in SQLite
#[derive(Parser)]
#[command(
    name = "shopload",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track production slots on machines and work units, and report their load",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the report time zone (local, Z, +HH:MM)
    #[arg(global = true, long = "tz", value_name = "OFFSET")]
    pub tz: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage machines and work units
    Resource {
        #[command(subcommand)]
        action: ResourceAction,
    },

    /// Manage orders
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },

    /// Manage production slots
    Slot {
        #[command(subcommand)]
        action: SlotAction,
    },

    /// Show the load report or a resource's schedule
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },

    /// Export a report to CSV or JSON
    Export {
        #[arg(long = "report", value_enum, default_value = "load")]
        report: ReportKind,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "KIND:ID",
            help = "Resource to export (required for --report schedule), e.g. machine:1"
        )]
        resource: Option<String>,

        #[arg(long, help = "Number of days for --report schedule")]
        days: Option<u32>,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Compute as if today were this date")]
        today: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },
}

#[derive(Subcommand)]
pub enum ResourceAction {
    /// Add a machine or a work unit
    Add {
        #[arg(value_enum)]
        kind: ResourceKind,

        name: String,

        #[arg(long, default_value = "other", help = "Category, e.g. laser, bending, welding")]
        category: String,

        #[arg(long = "start", value_name = "HH:MM", help = "Start of the working day")]
        start: Option<String>,

        #[arg(long = "end", value_name = "HH:MM", help = "End of the working day")]
        end: Option<String>,

        #[arg(long, default_value = "")]
        comment: String,
    },

    /// List resources (all kinds when none is given)
    List {
        #[arg(value_enum)]
        kind: Option<ResourceKind>,
    },

    /// Delete a resource; its slots are kept but detached
    Del {
        #[arg(value_enum)]
        kind: ResourceKind,

        id: i64,
    },
}

#[derive(Subcommand)]
pub enum OrderAction {
    /// Add an order
    Add {
        title: String,

        #[arg(long, value_name = "YYYY-MM-DD")]
        deadline: Option<String>,
    },

    /// List orders
    List,
}

#[derive(Subcommand)]
pub enum SlotAction {
    /// Book an order on a machine and/or a work unit
    #[command(group(ArgGroup::new("where").args(["machine", "unit"]).multiple(true).required(true)))]
    Add {
        #[arg(long)]
        order: i64,

        #[arg(long)]
        machine: Option<i64>,

        #[arg(long)]
        unit: Option<i64>,

        #[arg(long, value_name = "TS", help = "Start, e.g. \"2026-10-20 09:00\"")]
        start: Option<String>,

        #[arg(long, value_name = "TS", help = "End, e.g. \"2026-10-20 11:30\"")]
        end: Option<String>,

        #[arg(long, default_value = "")]
        comment: String,

        #[arg(long = "allow-overlap", help = "Book even if the resource is already busy")]
        allow_overlap: bool,
    },

    /// List slots, optionally for one resource
    List {
        #[arg(long, conflicts_with = "unit")]
        machine: Option<i64>,

        #[arg(long)]
        unit: Option<i64>,
    },

    /// Delete a slot
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum ReportAction {
    /// Load of every machine for today, three days and the week
    Load {
        #[arg(long, help = "Also report work units")]
        units: bool,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Compute as if today were this date")]
        today: Option<String>,
    },

    /// Free and busy stretches of one resource, day by day
    Schedule {
        #[arg(value_enum)]
        kind: ResourceKind,

        id: i64,

        #[arg(long, help = "Number of days (default from config)")]
        days: Option<u32>,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Compute as if today were this date")]
        today: Option<String>,
    },
}

use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rAttendance
/// CLI application to take class attendance with SQLite
#[derive(Parser)]
#[command(
    name = "rattendance",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple attendance CLI: take the daily register of a class and keep statistics using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

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
        #[arg(long = "print", help = "Print the current configuration file")]
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

    /// Add or list groups (classes)
    Group {
        #[arg(long = "add", value_name = "NAME", help = "Create a new group")]
        add: Option<String>,

        #[arg(long = "list", help = "List all groups")]
        list: bool,
    },

    /// Add or list the students of a group
    Student {
        /// Last name of the student to add
        #[arg(long = "add", value_name = "LAST_NAME", requires_all = ["first", "group"])]
        add: Option<String>,

        #[arg(long = "first", value_name = "FIRST_NAME", help = "First name of the new student")]
        first: Option<String>,

        #[arg(long = "group", value_name = "GROUP_ID", help = "Group id")]
        group: Option<i64>,

        #[arg(long = "list", requires = "group", help = "List the students of --group")]
        list: bool,
    },

    /// Show the attendance statuses and their codes
    Status,

    /// Take the attendance of a group for one day
    Take {
        /// Group id
        group: i64,

        /// Date of the register (YYYY-MM-DD, default today)
        #[arg(long = "date")]
        date: Option<String>,

        /// Toggle event as ROW:ACTION, repeatable
        #[arg(
            long = "mark",
            value_name = "ROW:ACTION",
            help = "ROW is a student id or sheet position; ACTION is present, -present, absent, -absent, reason=LABEL, in=HH:MM or out=HH:MM"
        )]
        marks: Vec<String>,

        /// Read the sheet from a CSV file instead of the group roster
        #[arg(long = "sheet", value_name = "FILE")]
        sheet: Option<String>,

        #[arg(long = "dry-run", help = "Collect and show the register without saving it")]
        dry_run: bool,
    },

    /// Show a month of attendance for a group
    List {
        /// Group id
        group: i64,

        #[arg(long = "month", value_name = "YYYY-MM", help = "Month to show (default current)")]
        month: Option<String>,
    },

    /// Attendance statistics per student
    Stats {
        #[arg(long = "student", value_name = "ID", conflicts_with = "group")]
        student: Option<i64>,

        #[arg(long = "group", value_name = "ID")]
        group: Option<i64>,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Export attendance entries
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long = "group", value_name = "ID", help = "Export only one group")]
        group: Option<i64>,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

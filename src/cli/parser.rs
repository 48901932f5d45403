use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for punchclock
/// Employee time clock: PIN clock-in/out, admin sessions, schedules and
/// payroll reports over SQLite
#[derive(Parser)]
#[command(
    name = "punchclock",
    version = env!("CARGO_PKG_VERSION"),
    about = "A small-team employee time clock: PIN punches, schedules and payroll over SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override session file path (useful for tests)
    #[arg(global = true, long = "session-file")]
    pub session_file: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init {
        /// Seed the first admin code (required before anyone can log in)
        #[arg(long = "admin-code", value_name = "CODE")]
        admin_code: Option<String>,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
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

    /// Manage employees (requires an admin session)
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },

    /// Punch the clock with an employee PIN
    Clock {
        #[command(subcommand)]
        action: ClockAction,
    },

    /// Show an employee's current shift and totals
    Status {
        /// Employee PIN
        pin: String,
    },

    /// Manage weekly schedules (requires an admin session)
    Schedule {
        #[command(subcommand)]
        action: ScheduleAction,
    },

    /// Open an admin session with a shared admin code
    Login {
        /// Shared admin code
        code: String,

        /// Origin address recorded with the attempt (kiosk/terminal id)
        #[arg(long = "ip", default_value = "local")]
        ip: String,
    },

    /// End the current admin session
    Logout,

    /// Show the current admin session, if any
    Session,

    /// Manage admin codes (requires an admin session)
    Code {
        #[command(subcommand)]
        action: CodeAction,
    },

    /// Inspect the audit trail (requires an admin session)
    Audit {
        #[arg(long, default_value_t = 50, help = "Maximum rows to print")]
        limit: i64,

        #[arg(long, help = "Show recent login attempt counters instead")]
        attempts: bool,
    },

    /// Reports: payroll, staff roll-up, daily and weekly stats
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },

    /// Export time entries or payroll data
    Export {
        /// What to export
        #[arg(long, value_enum, default_value = "entries")]
        kind: ExportKindArg,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Live feed of clock activity (polls the database)
    Watch {
        #[arg(long, default_value_t = 2, help = "Poll interval in seconds")]
        interval: u64,

        #[arg(
            long,
            hide = true,
            help = "Stop after this many polls (used by tests)"
        )]
        polls: Option<u64>,
    },
}

#[derive(Subcommand)]
pub enum EmployeeAction {
    /// Add a new employee
    Add {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "", help = "Job title")]
        position: String,

        #[arg(long, help = "Kiosk PIN (4-8 digits, unique)")]
        pin: String,

        #[arg(long, default_value = "employee", help = "Role: admin or employee")]
        role: String,

        #[arg(long, help = "Hourly rate for payroll")]
        rate: Option<f64>,
    },

    /// Update an existing employee
    Update {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        position: Option<String>,

        #[arg(long)]
        pin: Option<String>,

        #[arg(long)]
        role: Option<String>,

        #[arg(long)]
        rate: Option<f64>,
    },

    /// List all employees
    List,
}

#[derive(Subcommand)]
pub enum ClockAction {
    /// Clock in (opens a shift; harmless if one is already open)
    In {
        /// Employee PIN
        pin: String,

        #[arg(long, help = "Latitude of the punch", requires = "lon")]
        lat: Option<f64>,

        #[arg(long, help = "Longitude of the punch", requires = "lat")]
        lon: Option<f64>,
    },

    /// Clock out (closes the open shift)
    Out {
        /// Employee PIN
        pin: String,

        #[arg(long, requires = "lon")]
        lat: Option<f64>,

        #[arg(long, requires = "lat")]
        lon: Option<f64>,
    },
}

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Add a weekly slot
    Add {
        #[arg(long, value_name = "ID")]
        employee: i64,

        #[arg(long, help = "Day of week: 0 = Sunday .. 6 = Saturday")]
        day: u8,

        #[arg(long, value_name = "HH:MM")]
        start: String,

        #[arg(long, value_name = "HH:MM")]
        end: String,
    },

    /// Update a slot's day or times
    Update {
        id: i64,

        #[arg(long, help = "Day of week: 0 = Sunday .. 6 = Saturday")]
        day: Option<u8>,

        #[arg(long, value_name = "HH:MM")]
        start: Option<String>,

        #[arg(long, value_name = "HH:MM")]
        end: Option<String>,
    },

    /// Delete a slot by id
    Del { id: i64 },

    /// List slots, optionally for one employee
    List {
        #[arg(long, value_name = "ID")]
        employee: Option<i64>,
    },
}

#[derive(Subcommand)]
pub enum CodeAction {
    /// Register a new admin code
    Add { code: String },

    /// Show how many admin codes are registered
    Count,
}

#[derive(Subcommand)]
pub enum ReportAction {
    /// Payroll report for one employee over a date range
    Payroll {
        #[arg(long, value_name = "ID")]
        employee: i64,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Year/month/day or a custom range (default: current month)"
        )]
        range: Option<String>,
    },

    /// Per-employee totals across the whole history
    Staff,

    /// Today's totals and who is on shift
    Daily,

    /// This week's totals with a per-day breakdown
    Weekly,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum ExportKindArg {
    Entries,
    Payroll,
}

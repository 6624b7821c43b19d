use crate::export::{ExportFormat, ReportKind};
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Command-line interface definition for rclockmarks
#[derive(Parser)]
#[command(
    name = "rclockmarks",
    version = env!("CARGO_PKG_VERSION"),
    about = "Clock in/out from the terminal and build weekly hour reports from the clock-mark portal",
    long_about = None
)]
pub struct Cli {
    /// Use this configuration file instead of the standard one
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Override the API base URL
    #[arg(global = true, long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ClockKind {
    In,
    Out,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum SourceArg {
    /// Aggregated by the server
    #[default]
    Server,
    /// Aggregated locally from your own marks
    Local,
}

/// Period selection shared by report, summary and export.
#[derive(Args, Debug, Clone, Default)]
pub struct PeriodArgs {
    /// Period: YYYY, YYYY-MM, YYYY-MM-DD, or a range like
    /// 2024-01-06:2024-01-12. Defaults to the current report week.
    #[arg(long, short = 'p', conflicts_with_all = ["start", "end"])]
    pub period: Option<String>,

    /// First day (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// Last day (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,

    /// Viewer zone as minutes east of UTC (UTC-5 → -300). Defaults to the
    /// configured offset or the local one.
    #[arg(long = "tz-offset", allow_hyphen_values = true, value_name = "MINUTES")]
    pub tz_offset: Option<i32>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    /// Employee id (admin). Defaults to the logged-in user.
    #[arg(long)]
    pub user: Option<String>,

    #[command(flatten)]
    pub period: PeriodArgs,

    /// Where the report is aggregated
    #[arg(long, value_enum, default_value = "server")]
    pub source: SourceArg,

    /// Build the report from a JSON file of marks instead of the API
    #[arg(long = "marks-file", value_name = "FILE")]
    pub marks_file: Option<String>,

    /// Include days without sessions
    #[arg(long = "all-days")]
    pub all_days: bool,
}

#[derive(Subcommand)]
pub enum UsersCommand {
    /// List employees (default)
    List,

    /// Show one employee's profile
    Show { id: String },

    /// Change an employee's first and/or last name
    Update {
        id: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum MarksCommand {
    /// List your marks (newest first)
    List {
        /// Show reconstructed sessions instead of raw marks
        #[arg(long)]
        sessions: bool,
    },

    /// Create a single mark for an employee (admin)
    Create {
        #[arg(long)]
        user: String,
        /// in | out
        #[arg(long = "type", value_enum)]
        kind: ClockKind,
        /// Timestamp; without offset it is read as UTC
        #[arg(long)]
        at: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(long)]
        po: Option<String>,
    },

    /// Create a clock-in and its clock-out in one go (admin)
    AddSession {
        #[arg(long)]
        user: String,
        /// Clock-in timestamp; without offset it is read as UTC
        #[arg(long = "in")]
        clock_in: String,
        /// Clock-out timestamp; must be after the clock-in
        #[arg(long = "out")]
        clock_out: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(long)]
        po: Option<String>,
    },

    /// Edit a mark (admin)
    Update {
        id: String,
        #[arg(long = "type", value_enum)]
        kind: Option<ClockKind>,
        #[arg(long)]
        at: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,
        #[arg(long)]
        po: Option<String>,
    },

    /// Delete a mark (admin)
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the access token
    Login {
        #[arg(long)]
        email: String,
        /// Password (read from stdin when omitted)
        #[arg(long, env = "RCLOCKMARKS_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored access token
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Record a clock-in or clock-out at the given position
    Clock {
        #[arg(value_enum)]
        kind: ClockKind,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Purchase-order number (clock-out reuses the open clock-in's PO)
        #[arg(long)]
        po: Option<String>,
    },

    /// Show whether you are clocked in
    Status,

    /// List or edit marks
    Marks {
        #[command(subcommand)]
        command: MarksCommand,
    },

    /// List, inspect or rename employees (admin)
    Users {
        #[command(subcommand)]
        command: Option<UsersCommand>,
    },

    /// Weekly hours report for one employee
    Report {
        #[command(flatten)]
        args: ReportArgs,
    },

    /// Hours of every active employee over a period (admin)
    Summary {
        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Export a report to CSV, JSON, XLSX or PDF
    Export {
        /// Report to export
        #[arg(long, value_enum, default_value = "weekly")]
        report: ReportKind,

        /// Output format (defaults to the configured one)
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,

        /// Output file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,

        #[command(flatten)]
        args: ReportArgs,
    },

    /// Manage the configuration file
    Config {
        #[arg(long = "init", help = "Write a default configuration file")]
        init: bool,

        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing or unknown fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use")]
        editor: Option<String>,
    },
}

use clap::{Parser, Subcommand};

/// Command-line interface definition for rTimecard
#[derive(Parser)]
#[command(
    name = "rtimecard",
    version = env!("CARGO_PKG_VERSION"),
    about = "Timecards for production crews: hours, pay, break checks and submission using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (config file neither read nor written)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show the configuration
    Config {
        /// Print the current configuration to stdout
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,
    },

    /// Create or update a project
    Project {
        /// Project identifier
        id: String,

        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// First show day (YYYY-MM-DD); submissions are blocked before it
        #[arg(long = "start")]
        start: Option<String>,
    },

    /// Create a draft timecard and compute its totals
    Add {
        /// Date (YYYY-MM-DD)
        date: String,

        #[arg(long)]
        user: String,

        #[arg(long)]
        project: String,

        /// Check-in (HH:MM or "YYYY-MM-DD HH:MM")
        #[arg(long = "in")]
        check_in: Option<String>,

        /// Check-out (HH:MM or "YYYY-MM-DD HH:MM")
        #[arg(long = "out")]
        check_out: Option<String>,

        /// Break start (HH:MM or "YYYY-MM-DD HH:MM")
        #[arg(long = "break-start")]
        break_start: Option<String>,

        /// Break end (HH:MM or "YYYY-MM-DD HH:MM")
        #[arg(long = "break-end")]
        break_end: Option<String>,

        /// Pay rate per hour
        #[arg(long, default_value_t = 0.0)]
        rate: f64,
    },

    /// Recalculate a draft timecard
    Calc {
        id: i64,

        #[arg(long, default_value = "cli")]
        actor: String,

        /// Print the calculation result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve missing or ambiguous breaks on one or more drafts
    Resolve {
        /// Timecard ids
        #[arg(required = true)]
        ids: Vec<i64>,

        /// Break taken, as HH:MM-HH:MM
        #[arg(long = "break", conflicts_with = "no_break", required_unless_present = "no_break")]
        break_interval: Option<String>,

        /// Worked through, no break taken
        #[arg(long = "no-break")]
        no_break: bool,

        #[arg(long, default_value = "cli")]
        actor: String,

        #[arg(long)]
        json: bool,
    },

    /// Validate and submit all drafts of a user on a project
    Submit {
        #[arg(long)]
        user: String,

        #[arg(long)]
        project: String,

        /// Who performs the submission (defaults to the user)
        #[arg(long)]
        actor: Option<String>,

        /// Print the validation outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manually override totals or write admin notes
    Edit {
        id: i64,

        /// Role of the editor: talent, in_house, admin
        #[arg(long = "as", default_value = "talent")]
        role: String,

        #[arg(long, default_value = "cli")]
        actor: String,

        /// Override total hours
        #[arg(long)]
        hours: Option<f64>,

        /// Override total pay
        #[arg(long)]
        pay: Option<f64>,

        /// Admin notes (in_house/admin only)
        #[arg(long)]
        notes: Option<String>,
    },

    /// List timecards
    List {
        #[arg(long)]
        user: Option<String>,

        #[arg(long)]
        project: Option<String>,

        /// draft, submitted, approved, rejected
        #[arg(long)]
        status: Option<String>,

        /// Filter by period.
        ///
        /// Supported formats: YYYY, YYYY-MM, YYYY-MM-DD and ranges
        /// start:end in the same formats (e.g. "2025-06-01:2025-06-10").
        #[arg(long, short)]
        period: Option<String>,
    },

    /// Show the audit trail of a timecard
    Audit { id: i64 },

    /// Print the internal operation log
    Log {
        /// Print rows from the internal `log` table
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Export timecards for payroll
    Export {
        /// Export format: csv, json
        #[arg(long, value_name = "FORMAT", default_value = "csv")]
        format: String,

        /// Output file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        user: Option<String>,

        #[arg(long)]
        project: Option<String>,

        /// Period filter, same formats as `list --period`
        #[arg(long)]
        period: Option<String>,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },
}

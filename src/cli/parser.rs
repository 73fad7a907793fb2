use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for shiftlog
/// Time-tracking backend: shifts, analytics and screenshots over SQLite
#[derive(Parser)]
#[command(
    name = "shiftlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Employee time tracking: shifts, project-time analytics and screenshot pagination using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Employee id of the acting user
    #[arg(global = true, long = "as", value_name = "EMPLOYEE_ID")]
    pub actor: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show the configuration in use
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Start, end and inspect time-tracking shifts
    Shift {
        #[command(subcommand)]
        action: ShiftAction,
    },

    /// Admin analytics
    Analytics {
        #[command(subcommand)]
        action: AnalyticsAction,
    },

    /// Record, list, page through and delete screenshots
    Screenshot {
        #[command(subcommand)]
        action: ScreenshotAction,
    },

    /// Manage employees of the acting admin's organization
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },
}

/// Optional employee/team/project/task/shift filters.
#[derive(Args, Debug, Clone, Default)]
pub struct ScopeArgs {
    #[arg(long = "employee")]
    pub employee: Option<String>,

    #[arg(long = "team")]
    pub team: Option<String>,

    #[arg(long = "project")]
    pub project: Option<String>,

    #[arg(long = "task")]
    pub task: Option<String>,

    #[arg(long = "shift")]
    pub shift: Option<String>,
}

#[derive(Subcommand)]
pub enum ShiftAction {
    /// Start a new shift for the acting user
    Start {
        #[arg(long = "project")]
        project: Option<String>,

        #[arg(long = "task")]
        task: Option<String>,

        #[arg(long = "name")]
        name: Option<String>,

        /// Timezone offset in milliseconds
        #[arg(long = "tz-offset", allow_hyphen_values = true, default_value_t = 0)]
        tz_offset: i64,
    },

    /// End a shift (default: the active one)
    End {
        #[arg(long = "id", help = "Shift id to end")]
        id: Option<String>,
    },

    /// Show the active shift
    Active,

    /// Shift history, most recent first
    History {
        #[arg(long = "employee", help = "Employee id (admins only)")]
        employee: Option<String>,

        #[arg(long = "project")]
        project: Option<String>,

        #[arg(long = "task")]
        task: Option<String>,

        #[arg(long = "from", help = "Start time (epoch ms or RFC 3339)")]
        from: Option<String>,

        #[arg(long = "to", help = "End time (epoch ms or RFC 3339)")]
        to: Option<String>,

        #[arg(long = "skip", default_value_t = 0)]
        skip: i64,

        #[arg(long = "limit")]
        limit: Option<i64>,
    },
}

#[derive(Subcommand)]
pub enum AnalyticsAction {
    /// Completed-shift time by project and task
    ProjectTime {
        #[arg(long = "from", help = "Start time (epoch ms or RFC 3339)")]
        from: String,

        #[arg(long = "to", help = "End time (epoch ms or RFC 3339)")]
        to: String,

        #[command(flatten)]
        scope: ScopeArgs,
    },
}

#[derive(Subcommand)]
pub enum ScreenshotAction {
    /// Cursor-paginated organization screenshots (admin)
    Page {
        #[arg(long = "from")]
        from: String,

        #[arg(long = "to")]
        to: String,

        #[command(flatten)]
        scope: ScopeArgs,

        #[arg(long = "limit")]
        limit: Option<i64>,

        #[arg(long = "next", help = "Cursor returned by the previous page")]
        next: Option<String>,
    },

    /// The acting user's screenshots, or the whole organization's with --all (admin)
    List {
        #[arg(long = "from")]
        from: String,

        #[arg(long = "to")]
        to: String,

        #[command(flatten)]
        scope: ScopeArgs,

        #[arg(long = "all", help = "List every screenshot of the organization (admins only)")]
        all: bool,

        #[arg(long = "limit")]
        limit: Option<i64>,
    },

    /// Record a captured screenshot
    Add {
        #[arg(long = "timestamp")]
        timestamp: String,

        #[arg(long = "site")]
        site: Option<String>,

        #[arg(long = "productivity", default_value_t = 0.0)]
        productivity: f64,

        #[arg(long = "project")]
        project: Option<String>,

        #[arg(long = "task")]
        task: Option<String>,

        #[arg(long = "shift")]
        shift: Option<String>,

        #[arg(long = "image-url")]
        image_url: Option<String>,
    },

    /// Delete a screenshot (admin)
    Del { id: String },
}

#[derive(Subcommand)]
pub enum EmployeeAction {
    /// Create an employee and send the verification mail
    Add {
        #[arg(long = "name")]
        name: String,

        #[arg(long = "email")]
        email: String,

        #[arg(long = "team")]
        team: Option<String>,

        #[arg(long = "admin")]
        admin: bool,

        /// Organization to bootstrap (only when it has no employees yet)
        #[arg(long = "org")]
        org: Option<String>,
    },

    /// Mark an employee's e-mail as verified
    Verify { id: String },

    /// Deactivate an employee
    Deactivate { id: String },

    /// Reactivate a deactivated employee
    Activate { id: String },

    /// Time and activity counters (default: the acting user)
    Stats {
        #[arg(help = "Employee id (admins only)")]
        id: Option<String>,
    },

    /// Assign an employee to a project and/or task
    Assign {
        id: String,

        #[arg(long = "project")]
        project: Option<String>,

        #[arg(long = "task")]
        task: Option<String>,
    },

    /// Send a password reset mail
    ResetPassword { id: String },
}

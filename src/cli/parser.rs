use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for PodGuard
/// Access-control administration console backed by SQLite
#[derive(Parser)]
#[command(
    name = "podguard",
    version = env!("CARGO_PKG_VERSION"),
    about = "Access-control console: manage the employee roster, review check-in/check-out logs and analytics",
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

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create an account and sign in with it
    Signup {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Sign in (email/password, Google, or request a password reset)
    Signin {
        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        password: Option<String>,

        #[arg(long, help = "Sign in with a Google identity for --email")]
        google: bool,

        #[arg(long, help = "Display name of the Google identity")]
        name: Option<String>,

        #[arg(long = "first-name")]
        first_name: Option<String>,

        #[arg(long = "last-name")]
        last_name: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        address: Option<String>,

        #[arg(long)]
        gender: Option<String>,

        #[arg(long, help = "Date of birth (YYYY-MM-DD)")]
        dob: Option<String>,

        #[arg(long)]
        country: Option<String>,

        #[arg(long, help = "Send a password reset email to --email")]
        forgot: bool,
    },

    /// Sign out of the current session
    Signout,

    /// Show the signed-in account
    Whoami,

    /// Manage the signed-in account
    Account {
        #[command(subcommand)]
        action: AccountCmd,
    },

    /// Manage the employee roster
    Users {
        #[command(subcommand)]
        action: UsersCmd,
    },

    /// Review check-in/check-out access logs
    Logs {
        #[command(subcommand)]
        action: LogsCmd,
    },

    /// Check-in/check-out series and averages
    Analytics,

    /// Latest entry and check-in summary
    Dashboard,

    /// Resolve a console path (e.g. /podguard/users) and show that page
    Open { path: String },

    /// Show the local outbox (verification, reset and welcome mails)
    Mail {
        #[arg(long = "print", help = "Print queued mails")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum AccountCmd {
    /// Change the password of the signed-in account
    Password {
        #[arg(long = "new")]
        new_password: String,
    },

    /// Resend the verification email, or apply a verification code
    Verify {
        #[arg(long)]
        code: Option<String>,
    },

    /// Complete a password reset with the emailed code
    Reset {
        #[arg(long)]
        code: String,

        #[arg(long = "new")]
        new_password: String,
    },

    /// Delete the signed-in account
    Delete {
        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum UsersCmd {
    /// List employees
    List {
        #[arg(long, short, help = "Filter by name or email")]
        search: Option<String>,

        #[arg(long, help = "Page to show, starting at 1")]
        page: Option<usize>,

        #[arg(long, help = "Rows per page")]
        rows: Option<usize>,
    },

    /// Add an employee
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long, help = "manager, support, programmer, intern, innovator or member")]
        position: Option<String>,

        #[arg(long, help = "Male or Female")]
        gender: Option<String>,
    },

    /// Edit an employee
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        position: Option<String>,

        #[arg(long)]
        gender: Option<String>,
    },

    /// Switch an employee between active and inactive
    Toggle { id: String },

    /// Delete one or more employees
    Delete {
        ids: Vec<String>,

        #[arg(long, help = "Select every employee")]
        all: bool,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum LogsCmd {
    /// List access logs, newest check-in first
    List {
        #[arg(long, short, help = "Filter by name or position")]
        search: Option<String>,

        #[arg(long, help = "Page to show, starting at 1")]
        page: Option<usize>,

        #[arg(long, help = "Rows per page")]
        rows: Option<usize>,
    },

    /// Delete access logs
    Delete {
        ids: Vec<String>,

        #[arg(long, help = "Select every access log")]
        all: bool,

        #[arg(long, short = 'y', help = "Do not ask for confirmation (bulk delete)")]
        yes: bool,
    },

    /// Export every access log
    Export {
        #[arg(long, value_enum, default_value = "xlsx")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Defaults to <export_dir>/AccessLog.<ext>")]
        file: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

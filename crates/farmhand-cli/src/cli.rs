use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use farmhand_core::auth::SecurityQuestion;

#[derive(Parser)]
#[command(name = "farmhand")]
#[command(about = "Manage farm records from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// CLI profile name (backend URL, weather key and stored session)
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in, register or reset a password
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Worker attendance
    Attendance {
        #[command(subcommand)]
        command: AttendanceCommands,
    },
    /// Fertilizer inventory
    #[command(alias = "fertilizers")]
    Medicines {
        #[command(subcommand)]
        command: MedicineCommands,
    },
    /// Seed inventory
    Seeds {
        #[command(subcommand)]
        command: SeedCommands,
    },
    /// Expenses and settlement
    Expenses {
        #[command(subcommand)]
        command: ExpenseCommands,
    },
    /// Contact book
    Contacts {
        #[command(subcommand)]
        command: ContactCommands,
    },
    /// Calendar events
    Calendar {
        #[command(subcommand)]
        command: CalendarCommands,
    },
    /// Today's weather forecast for a location
    Weather {
        /// City name, e.g. "Pune"
        location: Vec<String>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SecurityQuestionArg {
    /// What is your pet's name?
    Pet,
    /// What is your mother's maiden name?
    MaidenName,
    /// What was your first school?
    School,
}

impl From<SecurityQuestionArg> for SecurityQuestion {
    fn from(value: SecurityQuestionArg) -> Self {
        match value {
            SecurityQuestionArg::Pet => Self::Pet,
            SecurityQuestionArg::MaidenName => Self::MaidenName,
            SecurityQuestionArg::School => Self::School,
        }
    }
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Sign in and store the session token in the keychain
    Login {
        #[arg(long, value_name = "USERNAME")]
        username: String,
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long, value_name = "USERNAME")]
        username: String,
        #[arg(long, value_name = "PASSWORD")]
        password: String,
        /// Must repeat --password
        #[arg(long, value_name = "PASSWORD")]
        confirm_password: String,
        #[arg(long, value_enum)]
        security_question: SecurityQuestionArg,
        #[arg(long, value_name = "ANSWER")]
        security_answer: String,
    },
    /// Reset a password with the security answer
    ForgotPassword {
        #[arg(long, value_name = "USERNAME")]
        username: String,
        #[arg(long, value_name = "ANSWER")]
        security_answer: String,
        #[arg(long, value_name = "PASSWORD")]
        new_password: String,
    },
    /// Show whether the profile holds a session token
    Status,
    /// Sign out and clear the stored session token
    Logout,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update profile config
    Init {
        /// Farm backend base URL
        #[arg(long, value_name = "URL")]
        api_base_url: Option<String>,
        /// OpenWeatherMap API key
        #[arg(long, value_name = "KEY")]
        weather_api_key: Option<String>,
        /// Weather provider base URL
        #[arg(long, value_name = "URL")]
        weather_base_url: Option<String>,
        /// Per-request timeout in seconds (0 disables)
        #[arg(long, value_name = "SECONDS")]
        request_timeout_secs: Option<u64>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
    /// Print the resolved profile
    Show,
}

#[derive(Args)]
pub struct IdArg {
    /// Item id as shown by `list`
    pub id: String,
}

#[derive(Subcommand)]
pub enum AttendanceCommands {
    /// List attendance records
    List,
    /// Mark a worker present today
    Add {
        /// Worker name
        worker_name: Vec<String>,
    },
    /// Remove an attendance record
    Delete(IdArg),
    /// Search by worker name
    Search { query: Vec<String> },
    /// Count days on record for a worker
    Days { worker: Vec<String> },
}

#[derive(Subcommand)]
pub enum MedicineCommands {
    /// List fertilizers
    List,
    /// Add a fertilizer
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        quantity: String,
        #[arg(long)]
        vendor: String,
        #[arg(long, value_name = "URL")]
        vendor_url: Option<String>,
    },
    /// Delete a fertilizer
    Delete(IdArg),
    /// Search by name
    Search { query: Vec<String> },
}

#[derive(Subcommand)]
pub enum SeedCommands {
    /// List seeds
    List,
    /// Add a seed
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        quality: String,
        #[arg(long)]
        vendor: String,
        #[arg(long, value_name = "URL")]
        vendor_url: Option<String>,
    },
    /// Delete a seed
    Delete(IdArg),
    /// Search by name or vendor
    Search { query: Vec<String> },
}

#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// List expenses with totals
    List,
    /// Record an expense
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        category: Option<String>,
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete an expense
    Delete(IdArg),
    /// Mark an expense as settled
    Settle(IdArg),
    /// Search by name
    Search { query: Vec<String> },
    /// Show total, settled and unsettled sums
    Totals,
}

#[derive(Subcommand)]
pub enum ContactCommands {
    /// List contacts
    List,
    /// Add a contact
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete a contact
    Delete(IdArg),
    /// Search by name or phone number
    Search { query: Vec<String> },
}

#[derive(Subcommand)]
pub enum CalendarCommands {
    /// List events, optionally for one date
    List {
        /// YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
    },
    /// Add an event
    Add {
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,
        description: Vec<String>,
    },
    /// Change an event's date and description
    Update {
        id: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Keeps the current description when omitted
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an event
    Delete(IdArg),
    /// Search by description or date
    Search { query: Vec<String> },
    /// Dates that carry events
    Dates {
        /// Date to highlight, YYYY-MM-DD
        #[arg(long)]
        selected: Option<String>,
    },
}

use clap::{Args, Parser, Subcommand};
use kbqs_core::models::user::Role;

#[derive(Parser, Debug)]
#[command(name = "kbqs", version, about = "KBQS admin console")]
pub struct Cli {
    /// Backend origin; the admin API path is appended.
    #[arg(
        long,
        global = true,
        env = "KBQS_API_BASE_URL",
        default_value = kbqs_core::config::DEFAULT_API_BASE_URL
    )]
    pub base_url: String,

    /// Bearer token for the admin API.
    #[arg(long, global = true, env = "KBQS_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the version.
    Version,
    /// Manage console users.
    #[command(subcommand)]
    Users(UsersCommand),
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List active, pending and suspended users.
    List,
    /// Add a user.
    Add(AddArgs),
    /// Update a user's profile fields.
    Edit(EditArgs),
    /// Disable a user (status -1). Users are never hard-deleted.
    Disable {
        /// User id.
        id: String,
    },
    /// Set a new password for a user.
    Password(PasswordArgs),
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    /// Defaults to `--password`.
    #[arg(long)]
    pub confirm_password: Option<String>,
    /// `admin` or `staff`/`employee`.
    #[arg(long, default_value = "staff", value_parser = parse_role)]
    pub role: Role,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// User id.
    pub id: String,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub username: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long, value_parser = parse_role)]
    pub role: Option<Role>,
}

#[derive(Args, Debug)]
pub struct PasswordArgs {
    /// User id.
    pub id: String,
    #[arg(long)]
    pub password: String,
    /// Defaults to `--password`.
    #[arg(long)]
    pub confirm_password: Option<String>,
}

fn parse_role(s: &str) -> Result<Role, String> {
    s.parse()
}

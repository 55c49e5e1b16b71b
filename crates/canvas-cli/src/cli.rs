//! Command-line interface definition.

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "canvas",
    version,
    about = "Canvas LMS from the command line",
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Institution subdomain, i.e. `{domain}.instructure.com`.
    #[arg(long, global = true, env = "CANVAS_DOMAIN")]
    pub domain: Option<String>,

    /// API access token.
    #[arg(long, global = true, env = "CANVAS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub output: OutputFormat,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show a user's profile.
    Profile {
        /// Canvas user id.
        user_id: i64,
    },

    /// Show a user's dashboard course ordering.
    Dashboard {
        /// Canvas user id.
        user_id: i64,
    },

    /// List users in the account the token is scoped to.
    Users(UsersArgs),

    /// Show the authenticated user's activity stream.
    Stream(StreamArgs),
}

#[derive(Debug, Args)]
pub struct UsersArgs {
    /// Partial name or SIS id to search for.
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by enrollment type (e.g. student, teacher).
    #[arg(long)]
    pub enrollment_type: Option<String>,

    /// Sort key: username, email, sis_id, last_login.
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort order: asc, desc.
    #[arg(long)]
    pub order: Option<String>,
}

#[derive(Debug, Args)]
pub struct StreamArgs {
    /// Restrict the stream to currently active courses.
    #[arg(long)]
    pub only_active_courses: bool,
}

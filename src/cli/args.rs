use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

/// CLI arguments for coursegen.
#[derive(Parser, Debug)]
#[command(
    name = "coursegen",
    about = "Generate AI courses and administer the course backend"
)]
pub struct Args {
    /// Base URL of the course backend
    #[arg(long, env = "COURSEGEN_API_URL")]
    pub api_url: Option<String>,

    /// Session file path
    #[arg(long, env = "COURSEGEN_SESSION_PATH")]
    pub session: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and remember the account in the session file
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the signed-in account
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Generate a course outline, optionally saving it
    Generate(GenerateArgs),
    /// Manage users
    #[command(subcommand)]
    Users(UsersCommand),
    /// Manage courses
    #[command(subcommand)]
    Courses(CoursesCommand),
    /// Manage blog posts
    #[command(subcommand)]
    Blogs(BlogsCommand),
    /// Inspect payments
    #[command(subcommand)]
    Payments(PaymentsCommand),
    /// Review refund requests
    #[command(subcommand)]
    Refunds(RefundsCommand),
    /// Manage subscriptions
    #[command(subcommand)]
    Subscriptions(SubscriptionsCommand),
    /// Read or edit policy pages
    #[command(subcommand)]
    Policy(PolicyCommand),
    /// Show admin dashboard aggregates
    Dashboard,
}

#[derive(ClapArgs, Debug)]
pub struct GenerateArgs {
    /// Main topic of the course
    #[arg(long)]
    pub topic: String,
    /// Subtopic to include (repeatable, at most 5)
    #[arg(long = "subtopic")]
    pub subtopics: Vec<String>,
    /// Number of main topics (4 or 8)
    #[arg(long, default_value = "4")]
    pub count: String,
    /// Course type (text-image or video-text)
    #[arg(long = "type", default_value = "text-image")]
    pub course_type: String,
    /// Language of the course
    #[arg(long, default_value = "English")]
    pub language: String,
    /// Only print the prompt that would be sent
    #[arg(long)]
    pub dry_run: bool,
    /// Save the generated course without asking
    #[arg(long)]
    pub confirm: bool,
}

impl Command {
    /// Name of the view a command stands for, used to label its scope.
    pub fn view_name(&self) -> &'static str {
        match self {
            Command::Login { .. } | Command::Logout | Command::Whoami => "session",
            Command::Generate(_) => "generate",
            Command::Users(_) => "users",
            Command::Courses(_) => "courses",
            Command::Blogs(_) => "blogs",
            Command::Payments(_) => "payments",
            Command::Refunds(_) => "refunds",
            Command::Subscriptions(_) => "subscriptions",
            Command::Policy(_) => "policy",
            Command::Dashboard => "dashboard",
        }
    }
}

/// Shared list options.
#[derive(ClapArgs, Debug, Default)]
pub struct ListArgs {
    /// Case-insensitive search text
    #[arg(long, default_value = "")]
    pub search: String,
    /// Facet filter as name=value (repeatable)
    #[arg(long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,
    /// Zero-based page
    #[arg(long, default_value_t = 0)]
    pub page: usize,
    /// Rows per page
    #[arg(long, default_value_t = 10)]
    pub page_size: usize,
}

/// Rows a bulk command acts on: explicit ids, or every matching row.
#[derive(ClapArgs, Debug, Default)]
pub struct Targets {
    /// Ids to act on
    pub ids: Vec<String>,
    /// Act on every row matching --search and --filter
    #[arg(long, conflicts_with = "ids")]
    pub all: bool,
    /// Narrow --all by case-insensitive search text
    #[arg(long, default_value = "", requires = "all")]
    pub search: String,
    /// Narrow --all by a name=value facet (repeatable)
    #[arg(long = "filter", value_parser = parse_filter, requires = "all")]
    pub filters: Vec<(String, String)>,
}

impl Targets {
    /// The id when exactly one row was named.
    pub fn single(&self) -> Option<&str> {
        match self.ids.as_slice() {
            [id] if !self.all => Some(id.as_str()),
            _ => None,
        }
    }
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected name=value, got {}", raw))
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    List(ListArgs),
    /// Change one user's name, email, or plan
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// free, monthly, or yearly
        #[arg(long)]
        plan: Option<String>,
    },
    /// Delete one or more users
    Delete(Targets),
    /// Move users to a plan (free, monthly, yearly)
    SetPlan {
        plan: String,
        #[command(flatten)]
        targets: Targets,
    },
}

#[derive(Subcommand, Debug)]
pub enum CoursesCommand {
    List(ListArgs),
    /// Rename a course or change its type
    Update {
        id: String,
        #[arg(long)]
        topic: Option<String>,
        /// text-image or video-text
        #[arg(long = "type")]
        course_type: Option<String>,
    },
    Approve(Targets),
    Delete(Targets),
}

#[derive(Subcommand, Debug)]
pub enum BlogsCommand {
    List(ListArgs),
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        excerpt: String,
        /// File with the HTML content
        #[arg(long)]
        content: PathBuf,
        #[arg(long, default_value = "General")]
        category: String,
        #[arg(long, default_value = "")]
        tags: String,
        /// Cover image file
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Flip the popular or featured flag
    Toggle { id: String, flag: String },
    /// Print the cover image as a data URL
    Image { id: String },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum PaymentsCommand {
    List {
        #[command(flatten)]
        list: ListArgs,
        /// Earliest date (RFC 3339)
        #[arg(long)]
        from: Option<String>,
        /// Latest date (RFC 3339)
        #[arg(long)]
        to: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum RefundsCommand {
    List(ListArgs),
    /// Approve or reject refunds
    Process {
        decision: String,
        #[command(flatten)]
        targets: Targets,
    },
}

#[derive(Subcommand, Debug)]
pub enum SubscriptionsCommand {
    List(ListArgs),
    Cancel(Targets),
    Renew { id: String },
}

#[derive(Subcommand, Debug)]
pub enum PolicyCommand {
    /// Print one policy page
    Show { kind: String },
    /// Replace one policy page with the contents of a file
    Set { kind: String, file: PathBuf },
}

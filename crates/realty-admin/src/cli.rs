//! CLI argument definitions using clap derive

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Command line arguments for the admin console
#[derive(Debug, Parser)]
#[command(name = "realty-admin")]
#[command(author, version, about = "Admin console for the realty marketplace")]
#[command(propagate_version = true)]
pub struct Cli {
    /// API base URL
    #[arg(long, global = true, env = "REALTY_API_URL")]
    pub api_url: Option<String>,

    /// Bearer token for authenticated requests
    #[arg(long, global = true, env = "REALTY_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Accept-Language sent with every request
    #[arg(long, global = true)]
    pub lang: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Configuration file
    #[arg(long, global = true, default_value = "conf/application.yml")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Property listings
    #[command(subcommand)]
    Listings(SortableCommand),

    /// Listing categories
    #[command(subcommand)]
    Categories(CategoryCommand),

    /// Registered users
    #[command(subcommand)]
    Users(ListCommand),

    /// Home page sliders
    #[command(subcommand)]
    Sliders(SortableCommand),

    /// Listing reviews
    #[command(subcommand)]
    Reviews(ListCommand),

    /// Dashboard counters
    Dashboard,
}

#[derive(Debug, Subcommand)]
pub enum ListCommand {
    /// List one page of rows
    List(ListArgs),
}

#[derive(Debug, Subcommand)]
pub enum SortableCommand {
    /// List one page of rows
    List(ListArgs),

    /// Move a row within the current page
    Reorder(ReorderArgs),
}

#[derive(Debug, Subcommand)]
pub enum CategoryCommand {
    /// List one page of categories
    List(ListArgs),

    /// Move a category within the current page
    Reorder(ReorderArgs),

    /// Show the category tree
    Tree(TreeArgs),
}

#[derive(Args, Clone, Debug, Default)]
pub struct ListArgs {
    /// Free-text search
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Filter as key=value (repeatable)
    #[arg(long = "filter", value_parser = parse_key_val)]
    pub filters: Vec<(String, String)>,

    /// Click a column header (repeat to cycle asc, desc, none)
    #[arg(long = "sort")]
    pub sort: Vec<String>,

    /// 1-based page number
    #[arg(long, short = 'p')]
    pub page: Option<u32>,

    /// Start of the date range (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// End of the date range (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Use the `sort`/`order` parameter names
    #[arg(long)]
    pub legacy_sort_keys: bool,
}

#[derive(Args, Clone, Debug)]
pub struct ReorderArgs {
    /// Index of the dragged row (0-based)
    #[arg(id = "from_index", value_name = "FROM")]
    pub from: usize,

    /// Index of the drop target (0-based)
    #[arg(id = "to_index", value_name = "TO")]
    pub to: usize,

    #[command(flatten)]
    pub list: ListArgs,
}

#[derive(Args, Clone, Debug)]
pub struct TreeArgs {
    /// Build the tree locally from the flat category list
    #[arg(long)]
    pub from_list: bool,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid filter `{}`: expected key=value", s))?;
    if key.is_empty() {
        return Err(format!("invalid filter `{}`: empty key", s));
    }
    Ok((key.to_string(), value.to_string()))
}

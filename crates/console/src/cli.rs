//! Command line definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use domain::models::{EditableField, FilterState, StatusFilter, UserId};

#[derive(Debug, Parser)]
#[command(name = "internet-users")]
#[command(version, about = "Manage internet user accounts", long_about = None)]
pub struct Cli {
    /// Base route of the API; overrides api.base_url
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Session file holding the bearer token; overrides session.path
    #[arg(long, global = true)]
    pub session: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Configuration overrides taken from global flags.
    pub fn config_overrides(&self) -> Vec<(&'static str, String)> {
        let mut overrides = Vec::new();
        if let Some(url) = &self.base_url {
            overrides.push(("api.base_url", url.clone()));
        }
        if let Some(path) = &self.session {
            overrides.push(("session.path", path.display().to_string()));
        }
        if let Command::List(args) = &self.command {
            if args.legacy_search {
                overrides.push(("filter.legacy_search_precedence", "true".to_string()));
            }
        }
        overrides
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show statistics and the filtered users table
    List(ListArgs),
    /// Show statistics only
    Stats,
    /// Show filter options
    Options,
    /// Show a single user
    Show {
        /// User id
        id: UserId,
    },
    /// Edit a user and save the changes
    Edit(EditArgs),
    /// Delete a user
    Delete {
        /// User id
        id: UserId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Default, Args)]
pub struct ListArgs {
    /// Only users of this deputy ministry (exact name)
    #[arg(long)]
    pub deputy: Option<String>,

    /// Only users of this directorate (exact name)
    #[arg(long)]
    pub directorate: Option<String>,

    /// Only active or deactive users
    #[arg(long)]
    pub status: Option<StatusFilter>,

    /// Case-insensitive search text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Show all columns
    #[arg(short, long)]
    pub expanded: bool,

    /// Let search matches outside name, username and phone bypass the filters
    #[arg(long)]
    pub legacy_search: bool,
}

impl ListArgs {
    pub fn filter_state(&self) -> FilterState {
        FilterState {
            deputy: self.deputy.clone().unwrap_or_default(),
            directorate: self.directorate.clone().unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            search: self.search.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// User id
    pub id: UserId,

    /// Field assignment, e.g. --set name=Ana --set status=deactive
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    pub assignments: Vec<(EditableField, String)>,

    /// Select the directorate whose name matches this query
    #[arg(long, value_name = "QUERY", conflicts_with = "clear_directorate")]
    pub directorate: Option<String>,

    /// Select the deputy ministry whose name matches this query
    #[arg(long, value_name = "QUERY", conflicts_with = "clear_deputy")]
    pub deputy: Option<String>,

    /// Clear the directorate
    #[arg(long)]
    pub clear_directorate: bool,

    /// Clear the deputy ministry
    #[arg(long)]
    pub clear_deputy: bool,

    /// Pick among several matching lookup entries with a prompt
    #[arg(short, long)]
    pub interactive: bool,
}

fn parse_assignment(raw: &str) -> Result<(EditableField, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", raw))?;
    let field = key.trim().parse::<EditableField>().map_err(|e| {
        let known: Vec<&str> = EditableField::ALL.iter().map(|f| f.key()).collect();
        format!("{} (known fields: {})", e, known.join(", "))
    })?;
    Ok((field, value.to_string()))
}

use civic_desk_api::{ComplaintChanges, ComplaintPriority, ComplaintStatus, NewComplaintRequest, Role};
use civic_desk_db::views::ComplaintFilter;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;
use uuid::Uuid;

/// Municipal complaint desk
#[derive(Parser, Debug)]
#[command(name = "civic-desk")]
#[command(version, about = "Municipal complaint tracker", long_about = None)]
pub struct Cli {
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create or upgrade the database schema
    Migrate {
        /// Drop every table before recreating the schema
        #[arg(long)]
        reset: bool,
    },

    /// File a new complaint
    Submit {
        #[command(flatten)]
        actor: ActorArgs,

        #[command(flatten)]
        form: SubmitArgs,
    },

    /// List the complaints visible to the user, newest first
    List {
        #[command(flatten)]
        actor: ActorArgs,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show one complaint with its status history
    Show {
        #[command(flatten)]
        actor: ActorArgs,

        /// Complaint ID
        id: Uuid,
    },

    /// Change status, priority or assignment of a complaint
    Update {
        #[command(flatten)]
        actor: ActorArgs,

        #[command(flatten)]
        changes: UpdateArgs,
    },

    /// Write visible complaints as CSV
    Export {
        #[command(flatten)]
        actor: ActorArgs,

        #[command(flatten)]
        filter: FilterArgs,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Counts by category, city and status plus the daily trend
    Report {
        #[command(flatten)]
        actor: ActorArgs,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List departments available for assignment
    Departments,

    /// Create a department
    AddDepartment {
        #[command(flatten)]
        actor: ActorArgs,

        #[arg(long)]
        name: String,
    },

    /// Give a user a role, replacing the previous one
    Grant {
        #[command(flatten)]
        actor: ActorArgs,

        /// User receiving the role
        #[arg(long)]
        target: Uuid,

        /// citizen, officer or admin
        #[arg(long)]
        role: Role,

        /// Department of an officer
        #[arg(long)]
        department: Option<Uuid>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ActorArgs {
    /// Acting user; the role is resolved from the role assignments
    #[arg(long, env = "CIVIC_DESK_USER")]
    pub user: Uuid,
}

#[derive(Args, Debug, Clone)]
pub struct SubmitArgs {
    #[arg(long)]
    pub category: String,

    #[arg(long)]
    pub sub_category: String,

    #[arg(long)]
    pub description: String,

    #[arg(long)]
    pub city: String,

    #[arg(long)]
    pub area: String,

    /// Public URL of an already uploaded photo
    #[arg(long)]
    pub image_url: Option<String>,
}

impl SubmitArgs {
    pub fn into_request(self) -> NewComplaintRequest {
        NewComplaintRequest {
            category: self.category,
            sub_category: self.sub_category,
            description: self.description,
            city: self.city,
            area: self.area,
            image_url: self.image_url,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Substring of the description or sub-category, case-insensitive
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub status: Option<ComplaintStatus>,

    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub priority: Option<ComplaintPriority>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> ComplaintFilter {
        let mut filter = ComplaintFilter::new();
        if let Some(search) = &self.search {
            filter = filter.search(search.clone());
        }
        if let Some(category) = &self.category {
            filter = filter.category(category.clone());
        }
        if let Some(status) = self.status {
            filter = filter.status(status);
        }
        if let Some(city) = &self.city {
            filter = filter.city(city.clone());
        }
        if let Some(priority) = self.priority {
            filter = filter.priority(priority);
        }
        filter
    }
}

#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    /// Complaint ID
    pub id: Uuid,

    #[arg(long)]
    pub status: Option<ComplaintStatus>,

    #[arg(long)]
    pub priority: Option<ComplaintPriority>,

    /// Department ID, or `none` to clear
    #[arg(long)]
    pub department: Option<Assignment>,

    /// Officer user ID, or `none` to clear
    #[arg(long)]
    pub officer: Option<Assignment>,

    /// Recorded with the status change
    #[arg(long)]
    pub note: Option<String>,
}

impl UpdateArgs {
    pub fn to_changes(&self) -> ComplaintChanges {
        ComplaintChanges {
            status: self.status,
            priority: self.priority,
            assigned_department_id: self.department.map(|a| a.0),
            assigned_officer_id: self.officer.map(|a| a.0),
            note: self.note.clone(),
        }
    }
}

/// Assignment target given on the command line; `none` clears it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment(pub Option<Uuid>);

impl FromStr for Assignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("none") {
            return Ok(Assignment(None));
        }
        Uuid::parse_str(s)
            .map(|id| Assignment(Some(id)))
            .map_err(|e| format!("expected a UUID or `none`: {e}"))
    }
}

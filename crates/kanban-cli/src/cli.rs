use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use kanban_domain::{BoardColor, SortKey};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kanban")]
#[command(about = "Kanban boards, lists and cards from the command line", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding the board documents (or set KANBAN_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR", env = "KANBAN_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// User whose boards are read and written (or set KANBAN_USER)
    #[arg(long, global = true, env = "KANBAN_USER")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Board operations
    Board(BoardCommand),
    /// List operations
    List(ListCommand),
    /// Card operations
    Card(CardCommand),
    /// Card attachment operations
    Attachment(AttachmentCommand),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// Board commands
#[derive(Args)]
pub struct BoardCommand {
    #[command(subcommand)]
    pub action: BoardAction,
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// Create a new board
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value_t = BoardColor::default())]
        color: BoardColor,
    },
    /// List all boards
    List,
    /// Get a board's settings
    Get {
        #[arg(long)]
        id: String,
    },
    /// Update a board's settings
    Update(BoardUpdateArgs),
    /// Show a board with its lists and cards in order
    Show {
        #[arg(long)]
        id: String,
    },
}

#[derive(Args)]
pub struct BoardUpdateArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, conflicts_with = "clear_description")]
    pub description: Option<String>,
    #[arg(long)]
    pub clear_description: bool,
    #[arg(long)]
    pub color: Option<BoardColor>,
}

// List commands
#[derive(Args)]
pub struct ListCommand {
    #[command(subcommand)]
    pub action: ListAction,
}

#[derive(Subcommand)]
pub enum ListAction {
    /// Append a new list to a board
    Create {
        #[arg(long)]
        board_id: String,
        #[arg(long)]
        title: String,
    },
    /// Rename a list
    Rename {
        #[arg(long)]
        board_id: String,
        #[arg(long)]
        id: String,
        #[arg(long)]
        title: String,
    },
    /// Delete a list and every card in it
    Delete {
        #[arg(long)]
        board_id: String,
        #[arg(long)]
        id: String,
    },
    /// Sort a list's cards
    Sort {
        #[arg(long)]
        board_id: String,
        #[arg(long)]
        id: String,
        /// title, dueDate or assignee
        #[arg(long)]
        by: SortKey,
    },
    /// Move a list to another position on its board
    Move {
        #[arg(long)]
        board_id: String,
        #[arg(long)]
        id: String,
        #[arg(long)]
        position: usize,
    },
}

// Card commands
#[derive(Args)]
pub struct CardCommand {
    #[command(subcommand)]
    pub action: CardAction,
}

#[derive(Subcommand)]
pub enum CardAction {
    /// Create a card at the end of a list
    Create(CardCreateArgs),
    /// Get a specific card
    Get {
        #[arg(long)]
        board_id: String,
        #[arg(long)]
        id: String,
    },
    /// List the cards of a list in order
    List {
        #[arg(long)]
        board_id: String,
        #[arg(long)]
        list_id: String,
    },
    /// Update a card
    Update(CardUpdateArgs),
    /// Delete a card
    Delete {
        #[arg(long)]
        board_id: String,
        #[arg(long)]
        id: String,
    },
    /// Move a card within its list or to another list
    Move(CardMoveArgs),
}

#[derive(Args)]
pub struct CardCreateArgs {
    #[arg(long)]
    pub board_id: String,
    #[arg(long)]
    pub list_id: String,
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    /// Comma-separated labels
    #[arg(long, value_delimiter = ',')]
    pub labels: Vec<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due_date: Option<NaiveDate>,
    #[arg(long)]
    pub assignee: Option<String>,
}

#[derive(Args)]
pub struct CardUpdateArgs {
    #[arg(long)]
    pub board_id: String,
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Replace the labels (comma-separated)
    #[arg(long, value_delimiter = ',', conflicts_with = "clear_labels")]
    pub labels: Option<Vec<String>>,
    #[arg(long)]
    pub clear_labels: bool,
    /// Due date (YYYY-MM-DD)
    #[arg(long, conflicts_with = "clear_due_date")]
    pub due_date: Option<NaiveDate>,
    #[arg(long)]
    pub clear_due_date: bool,
    #[arg(long, conflicts_with = "clear_assignee")]
    pub assignee: Option<String>,
    #[arg(long)]
    pub clear_assignee: bool,
}

#[derive(Args)]
pub struct CardMoveArgs {
    #[arg(long)]
    pub board_id: String,
    #[arg(long)]
    pub id: String,
    /// Target list; defaults to the card's current list
    #[arg(long, conflicts_with_all = ["before", "after"])]
    pub list_id: Option<String>,
    /// Index in the target list, counted without the moved card; omit to append
    #[arg(long, conflicts_with_all = ["before", "after"])]
    pub position: Option<usize>,
    /// Drop the card just above this card
    #[arg(long, conflicts_with = "after")]
    pub before: Option<String>,
    /// Drop the card just below this card
    #[arg(long)]
    pub after: Option<String>,
}

// Attachment commands
#[derive(Args)]
pub struct AttachmentCommand {
    #[command(subcommand)]
    pub action: AttachmentAction,
}

#[derive(Subcommand)]
pub enum AttachmentAction {
    /// Record an attachment on a card
    Add {
        #[arg(long)]
        board_id: String,
        #[arg(long)]
        card_id: String,
        #[arg(long)]
        name: String,
        /// Size in bytes
        #[arg(long)]
        size: u64,
        #[arg(long, default_value = "application/octet-stream")]
        mime_type: String,
        #[arg(long, default_value = "")]
        url: String,
    },
    /// Remove an attachment from a card
    Remove {
        #[arg(long)]
        board_id: String,
        #[arg(long)]
        card_id: String,
        #[arg(long)]
        id: String,
    },
}

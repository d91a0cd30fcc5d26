use clap::{Args, Parser, Subcommand};
use loreline::calendar::{Granularity, Relative};
use loreline::timeline::ExportGroupBy;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "loreline", bin_name = "loreline", version)]
#[command(about = "Timeline notes for invented worlds, on a calendar you define", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Core(CoreCommands),

    #[command(flatten)]
    Note(NoteCommands),

    #[command(flatten)]
    Data(DataCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

/// Date fields shared by `create` and `edit`.
#[derive(Args, Debug, Default, Clone)]
pub struct DateArgs {
    /// Era name
    #[arg(long)]
    pub era: Option<String>,

    #[arg(long)]
    pub millennium: Option<i64>,

    #[arg(long)]
    pub century: Option<i64>,

    #[arg(long)]
    pub decade: Option<i64>,

    /// Year; a negative value means before the union
    #[arg(long, allow_negative_numbers = true)]
    pub year: Option<i64>,

    /// Month number (1-based, as in the calendar)
    #[arg(long)]
    pub month: Option<u32>,

    #[arg(long)]
    pub day: Option<u32>,

    /// Count the year before or after the union
    #[arg(long, value_name = "before|after")]
    pub relative: Option<Relative>,
}

/// Filters shared by `list`, `timeline` and `export`.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Search term (title, description, era and tags)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only notes carrying this tag (repeatable; all must match)
    #[arg(short, long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Only notes recorded at this granularity
    #[arg(long = "only-level", value_name = "LEVEL")]
    pub only_level: Option<Granularity>,

    /// Only pinned notes
    #[arg(long)]
    pub pinned: bool,
}

#[derive(Subcommand, Debug)]
pub enum CoreCommands {
    /// Create a new note
    #[command(alias = "n", display_order = 1)]
    Create {
        /// Granularity of the note (defaults to the finest date field given)
        #[arg(short, long)]
        level: Option<Granularity>,

        #[command(flatten)]
        date: DateArgs,

        #[arg(short, long)]
        description: Option<String>,

        /// Tag (repeatable)
        #[arg(short, long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Marker weight; heavier notes come first within a year
        #[arg(short, long)]
        weight: Option<f64>,

        /// Image reference stored with the note (repeatable)
        #[arg(long = "image", value_name = "IMAGE")]
        images: Vec<String>,

        /// Title words (joined with spaces)
        #[arg(required = true, trailing_var_arg = true)]
        title: Vec<String>,
    },

    /// List notes in chronological order
    #[command(alias = "ls", display_order = 2)]
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show notes grouped into nested periods
    #[command(alias = "tl", display_order = 3)]
    Timeline {
        /// Top level of the tree (defaults to the configured level)
        level: Option<Granularity>,

        #[command(flatten)]
        filter: FilterArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum NoteCommands {
    /// View one or more notes
    #[command(alias = "v", display_order = 10)]
    View {
        /// Indexes of the notes (e.g. 1 p1 2-4) or title words
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Change fields of one or more notes
    #[command(alias = "e", display_order = 11)]
    Edit {
        #[arg(long)]
        title: Option<String>,

        /// New description (empty string clears it)
        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        level: Option<Granularity>,

        #[command(flatten)]
        date: DateArgs,

        /// Drop every date field before applying the given ones
        #[arg(long)]
        clear_date: bool,

        /// Replace the tags (repeatable)
        #[arg(short, long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Remove every tag
        #[arg(long, conflicts_with = "tags")]
        clear_tags: bool,

        #[arg(short, long)]
        weight: Option<f64>,

        /// Indexes of the notes (e.g. 1 p1 2-4) or title words
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Delete one or more notes
    #[command(alias = "rm", display_order = 12)]
    Delete {
        /// Indexes of the notes (e.g. 1 3 5)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Pin one or more notes
    #[command(alias = "p", display_order = 13)]
    Pin {
        /// Indexes of the notes (e.g. 1 3 5)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Unpin one or more notes
    #[command(alias = "u", display_order = 14)]
    Unpin {
        /// Indexes of the notes (e.g. p1 p2)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Export notes as text (stdout, a .txt file, or a .tar.gz archive)
    #[command(display_order = 20)]
    Export {
        /// Output path; `.tar.gz`/`.tgz` writes an archive
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Group the text under headers of this level (or `none`)
        #[arg(short, long)]
        group_by: Option<ExportGroupBy>,

        /// Include tags
        #[arg(long)]
        with_tags: bool,

        /// Leave descriptions out
        #[arg(long)]
        no_description: bool,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List tags with usage counts
    #[command(display_order = 21)]
    Tags,

    /// Show or change the calendar
    #[command(display_order = 22)]
    Calendar {
        #[command(subcommand)]
        action: Option<CalendarCommands>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CalendarCommands {
    /// Print the calendar
    Show,

    /// Replace the whole calendar with a JSON file
    Set { path: PathBuf },

    /// Append a month
    AddMonth { name: String, days: u32 },

    /// Remove a month by name
    RemoveMonth { name: String },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Get or set configuration
    #[command(display_order = 30)]
    Config {
        /// Configuration key (e.g. default-level)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Initialize the data directory
    #[command(display_order = 31)]
    Init,
}

//! # CLI Layer
//!
//! This module is **one possible UI client** for loreline. It is the only
//! place that parses arguments, touches stdout/stderr, picks exit codes and
//! installs logging. Everything else goes through [`LorelineApi`].
//!
//! - `run()`: parse, set up logging and context, dispatch
//! - `handle_*()`: per-command handlers that call the API and print
//! - rendering lives in `print.rs`

use super::print::{
    print_messages, render_calendar, render_config, render_full_notes, render_note_list,
    render_tags, render_timeline,
};
use super::setup::{
    CalendarCommands, Cli, Commands, CoreCommands, DataCommands, DateArgs, FilterArgs,
    MiscCommands, NoteCommands,
};
use clap::Parser;
use loreline::api::{
    parse_selectors, CalendarAction, ConfigAction, DateInput, ExportTarget, LorelineApi, NewNote,
    NoteFilter, NoteUpdate,
};
use loreline::calendar::Granularity;
use loreline::error::Result;
use loreline::init::initialize;
use loreline::store::fs::FileStore;
use loreline::timeline::ExportGroupBy;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Log filter variable; overrides `--verbose`.
const LOG_ENV: &str = "LORELINE_LOG";

struct AppContext {
    api: LorelineApi<FileStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::Core(cmd)) => match cmd {
            CoreCommands::Create {
                level,
                date,
                description,
                tags,
                weight,
                images,
                title,
            } => {
                let date = date_input(date);
                let level = level
                    .or_else(|| date.finest_level())
                    .unwrap_or(Granularity::Year);
                let mut input = NewNote::new(title.join(" "), level).with_date(date);
                input.description = description;
                input.tags = tags;
                input.weight = weight;
                input.images = images;
                handle_create(&mut ctx, input)
            }
            CoreCommands::List { filter } => handle_list(&mut ctx, note_filter(filter)),
            CoreCommands::Timeline { level, filter } => {
                handle_timeline(&mut ctx, level, note_filter(filter))
            }
        },
        Some(Commands::Note(cmd)) => match cmd {
            NoteCommands::View { indexes } => handle_view(&mut ctx, indexes),
            NoteCommands::Edit {
                title,
                description,
                level,
                date,
                clear_date,
                tags,
                clear_tags,
                weight,
                indexes,
            } => {
                let template = EditTemplate {
                    title,
                    description,
                    level,
                    date: date_input(date),
                    clear_date,
                    tags: if clear_tags {
                        Some(Vec::new())
                    } else if tags.is_empty() {
                        None
                    } else {
                        Some(tags)
                    },
                    weight,
                };
                handle_edit(&mut ctx, indexes, template)
            }
            NoteCommands::Delete { indexes } => handle_delete(&mut ctx, indexes),
            NoteCommands::Pin { indexes } => handle_pin(&mut ctx, indexes),
            NoteCommands::Unpin { indexes } => handle_unpin(&mut ctx, indexes),
        },
        Some(Commands::Data(cmd)) => match cmd {
            DataCommands::Export {
                output,
                group_by,
                with_tags,
                no_description,
                filter,
            } => handle_export(
                &mut ctx,
                note_filter(filter),
                ExportFlags {
                    output,
                    group_by,
                    with_tags,
                    no_description,
                },
            ),
            DataCommands::Tags => handle_tags(&mut ctx),
            DataCommands::Calendar { action } => handle_calendar(&mut ctx, action),
        },
        Some(Commands::Misc(cmd)) => match cmd {
            MiscCommands::Config { key, value } => handle_config(&mut ctx, key, value),
            MiscCommands::Init => handle_init(&ctx),
        },
        None => handle_list(&mut ctx, NoteFilter::default()),
    }
}

fn init_logging(verbose: bool) {
    let fallback = if verbose {
        "loreline=debug"
    } else {
        "loreline=warn"
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    // Keep any subscriber that is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context() -> Result<AppContext> {
    let ctx = initialize()?;
    Ok(AppContext { api: ctx.api })
}

fn date_input(args: DateArgs) -> DateInput {
    DateInput {
        era: args.era,
        millennium: args.millennium,
        century: args.century,
        decade: args.decade,
        year: args.year,
        month: args.month,
        day: args.day,
        relative: args.relative,
    }
}

fn note_filter(args: FilterArgs) -> NoteFilter {
    NoteFilter {
        search_term: args.search,
        tags: args.tags,
        level: args.only_level,
        pinned_only: args.pinned,
    }
}

/// Edit fields applied to every selected note.
struct EditTemplate {
    title: Option<String>,
    description: Option<String>,
    level: Option<Granularity>,
    date: DateInput,
    clear_date: bool,
    tags: Option<Vec<String>>,
    weight: Option<f64>,
}

struct ExportFlags {
    output: Option<PathBuf>,
    group_by: Option<ExportGroupBy>,
    with_tags: bool,
    no_description: bool,
}

fn handle_create(ctx: &mut AppContext, input: NewNote) -> Result<()> {
    let result = ctx.api.create_note(input)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &mut AppContext, filter: NoteFilter) -> Result<()> {
    let result = ctx.api.get_notes(&filter)?;
    let calendar = result.calendar.clone().unwrap_or_default();
    print!("{}", render_note_list(&result.listed_notes, &calendar));
    print_messages(&result.messages);
    Ok(())
}

fn handle_timeline(
    ctx: &mut AppContext,
    level: Option<Granularity>,
    filter: NoteFilter,
) -> Result<()> {
    let result = ctx.api.timeline(level, &filter)?;
    if let Some(view) = &result.timeline {
        print!("{}", render_timeline(view));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.view_notes(&indexes)?;
    let calendar = result.calendar.clone().unwrap_or_default();
    print!("{}", render_full_notes(&result.listed_notes, &calendar));
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, indexes: Vec<String>, template: EditTemplate) -> Result<()> {
    let updates: Vec<NoteUpdate> = parse_selectors(&indexes)?
        .into_iter()
        .map(|selector| {
            let mut update = NoteUpdate::new(selector);
            update.title = template.title.clone();
            update.description = template.description.clone();
            update.level = template.level;
            update.date = template.date.clone();
            update.clear_date = template.clear_date;
            update.tags = template.tags.clone();
            update.weight = template.weight;
            update
        })
        .collect();

    let result = ctx.api.update_notes(&updates)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.delete_notes(&indexes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_pin(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.pin_notes(&indexes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_unpin(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.unpin_notes(&indexes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &mut AppContext, filter: NoteFilter, flags: ExportFlags) -> Result<()> {
    let mut options = ctx.api.load_config()?.export_options();
    if let Some(group_by) = flags.group_by {
        options.group_by = group_by;
    }
    if flags.with_tags {
        options.include_tags = true;
    }
    if flags.no_description {
        options.include_description = false;
    }

    let target = ExportTarget::from_path(flags.output);
    let result = ctx.api.export(&filter, Some(options), target)?;
    if let Some(text) = &result.export_text {
        println!("{}", text);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_tags(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.tags()?;
    print!("{}", render_tags(&result.tags));
    print_messages(&result.messages);
    Ok(())
}

fn handle_calendar(ctx: &mut AppContext, action: Option<CalendarCommands>) -> Result<()> {
    let action = match action {
        None | Some(CalendarCommands::Show) => CalendarAction::Show,
        Some(CalendarCommands::Set { path }) => CalendarAction::Replace(path),
        Some(CalendarCommands::AddMonth { name, days }) => CalendarAction::AddMonth { name, days },
        Some(CalendarCommands::RemoveMonth { name }) => CalendarAction::RemoveMonth(name),
    };
    let show = matches!(action, CalendarAction::Show);

    let result = ctx.api.calendar(action)?;
    if show {
        if let Some(calendar) = &result.calendar {
            print!("{}", render_calendar(calendar));
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let show_all = key.is_none();
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.init()?;
    print_messages(&result.messages);
    Ok(())
}

//! text_clipper: a terminal clipboard-history manager. Snippets ("clips") live
//! in a local SQLite database and can be archived, restored, duplicated and
//! copied back to the system clipboard.

pub mod args;
pub mod clip;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod formatting;
pub mod logging;
pub mod repository;
pub mod service;
pub mod shared;
pub mod text;

use std::env;
use std::error::Error;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::args::{CommonFlags, parse_id};
use crate::clip::{CONTENT_MAX_CHARS, Clip, ClipId, TITLE_MAX_CHARS, UNSET_ID};
use crate::config::Settings;
use crate::formatting::{FormatContext, TimeFormatter};
use crate::repository::{SortField, SortKey, SqliteClipRepository};
use crate::service::ClipService;
use crate::shared::table::{render_table, truncate_with_ellipsis};
use crate::text::{ClipTruncator, TextWrapper};

pub use crate::error::ClipError;

/// Columns kept free around a preview for borders and padding.
pub const PREVIEW_MARGIN: usize = 8;
const DEFAULT_PREVIEW_LINES: usize = 10;
const FALLBACK_COLUMNS: usize = 80;

type Service = ClipService<SqliteClipRepository>;

pub fn entry() -> Result<(), Box<dyn Error>> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    let mut debug_flag = false;
    args.retain(|a| {
        let is_debug = a == "-D" || a == "--debug";
        debug_flag |= is_debug;
        !is_debug
    });
    if args.is_empty() {
        print_help();
        return Ok(());
    }

    let cmd = args.remove(0);
    match cmd.as_str() {
        "help" | "-h" | "--help" => {
            print_help();
            return Ok(());
        }
        "version" | "-v" | "--version" => {
            println!("text-clipper version {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    let mut settings = Settings::from_env()?;
    settings.debug |= debug_flag;
    let _log_guard = logging::init(&settings);
    debug!(?args, command = %cmd, "starting");

    if cmd == "path" {
        println!("{}", settings.db_path.display());
        return Ok(());
    }

    let mut svc = open_service(&settings)?;

    match cmd.as_str() {
        "add" => add_clip(args, &mut svc)?,
        "edit" => edit_clip(args, &mut svc)?,
        "list" | "ls" => list_clips(args, &svc, &settings)?,
        "archived" => {
            let mut args = args;
            args.push("--archived".to_string());
            list_clips(args, &svc, &settings)?
        }
        "show" | "view" => show_clip(args, &svc, &settings)?,
        "copy" | "use" => copy_clip(args, &mut svc, &settings)?,
        "archive" => for_each_id(args, "archive", |id| svc.deactivate(id), "Archived")?,
        "restore" => for_each_id(args, "restore", |id| svc.activate(id), "Restored")?,
        "delete" | "rm" => for_each_id(args, "delete", |id| svc.delete(id), "Deleted")?,
        "duplicate" | "dup" => duplicate_clip(args, &mut svc)?,
        other => {
            eprintln!("Unknown command: {other}");
            print_help();
        }
    }

    Ok(())
}

fn print_help() {
    let keys: Vec<&str> = SortKey::names().collect();
    println!(
        "\
Text Clipper CLI
Usage:
  tc add <title> <content...>     Save a new clip (use - as content to read stdin)
  tc edit <id> [--title T] [--content C]
                                  Edit a clip; without flags opens $EDITOR on the content
  tc list [--archived] [--sort <key>] [-r|--relative] [--plain]
                                  List active (or archived) clips
  tc archived                     Same as: tc list --archived
  tc show <id> [-n|--lines N] [--full] [--plain]
                                  Show a clip with a preview fitted to the terminal
  tc copy <id>                    Copy a clip to the clipboard and mark it used
  tc archive <ids...>             Move clips to the archive
  tc restore <ids...>             Bring archived clips back to the list
  tc delete <ids...>              Delete clips permanently
  tc duplicate <id>               Copy a clip into a new one
  tc path                         Show the database path
  tc help                         Show this message

Options:
  -D, --debug                     Write a debug log next to the database
  -v, --version                   Show the version

Sort keys:
  {}

Environment:
  TEXT_CLIPPER_DB_PATH            Database file (default: ~/.text-clipper/text-clipper.db)
  TEXT_CLIPPER_SORT               Default sort key (default: createdAtDesc)
  TEXT_CLIPPER_NO_CLIPBOARD       Disable clipboard writes
  TEXT_CLIPPER_LOG                Log filter used with --debug (default: text_clipper=debug)
  NO_COLOR                        Disable colors
",
        keys.join(", ")
    );
}

fn add_clip(args: Vec<String>, svc: &mut Service) -> Result<(), Box<dyn Error>> {
    if args.is_empty() {
        return Err("Usage: tc add <title> <content...>".into());
    }
    let title = args[0].clone();
    let content = if args.len() == 2 && args[1] == "-" {
        read_stdin()?
    } else {
        args[1..].join(" ")
    };
    check_limits(&title, &content)?;
    let id = svc.register_or_update(UNSET_ID, &title, &content)?;
    println!("Added clip {id} ({title})");
    Ok(())
}

fn edit_clip(args: Vec<String>, svc: &mut Service) -> Result<(), Box<dyn Error>> {
    let mut parser = args::ArgParser::new(args, "edit");
    let id = parse_id(&parser.next().ok_or("Usage: tc edit <id> [--title T] [--content C]")?)?;
    let mut title: Option<String> = None;
    let mut content: Option<String> = None;
    while let Some(arg) = parser.next() {
        match arg.as_str() {
            "--title" => title = Some(parser.extract_value("--title")?),
            "--content" => content = Some(parser.extract_value("--content")?),
            other => return Err(format!("Unknown flag for edit: {other}").into()),
        }
    }

    let current = svc.find(id).map_err(|e| e.context("edit", id))?;
    let content = match (&title, content) {
        (_, Some(c)) => c,
        (Some(_), None) => current.content.clone(),
        (None, None) => match edit_in_editor(&current)? {
            Some(edited) => edited,
            None => {
                println!("Edit canceled.");
                return Ok(());
            }
        },
    };
    let title = title.unwrap_or(current.title);
    check_limits(&title, &content)?;
    svc.register_or_update(id, &title, &content)?;
    println!("Updated clip {id}");
    Ok(())
}

/// Opens `$EDITOR` on the clip content. `None` when the editor exits with failure.
fn edit_in_editor(clip: &Clip) -> Result<Option<String>, Box<dyn Error>> {
    let editor = env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    let path = env::temp_dir().join(format!(
        "text-clipper-{}-{}.txt",
        std::process::id(),
        clip.id
    ));
    fs::write(&path, &clip.content)?;
    let status = Command::new(&editor)
        .arg(&path)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status();
    let edited = fs::read_to_string(&path);
    let _ = fs::remove_file(&path);
    if !status?.success() {
        return Ok(None);
    }
    Ok(Some(edited?.trim_end_matches('\n').to_string()))
}

fn check_limits(title: &str, content: &str) -> Result<(), Box<dyn Error>> {
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(format!("Title is limited to {TITLE_MAX_CHARS} characters").into());
    }
    if content.chars().count() > CONTENT_MAX_CHARS {
        return Err(format!("Content is limited to {CONTENT_MAX_CHARS} characters").into());
    }
    Ok(())
}

fn read_stdin() -> io::Result<String> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf.trim_end_matches('\n').to_string())
}

fn list_clips(args: Vec<String>, svc: &Service, settings: &Settings) -> Result<(), Box<dyn Error>> {
    let flags = CommonFlags::parse(args, "list")?;
    if !flags.positional.is_empty() {
        return Err(format!("Unexpected argument for list: {}", flags.positional[0]).into());
    }
    let sort_key = flags.sort_key.as_deref().unwrap_or(svc.sort_key());
    let clips = if flags.archived {
        svc.list_archived_by(sort_key)?
    } else {
        svc.list_active_by(sort_key)?
    };

    if clips.is_empty() {
        if flags.archived {
            println!("No archived clips.");
        } else {
            println!("No clips yet. Try `tc add <title> <content>`.");
        }
        return Ok(());
    }

    let ctx = FormatContext::new(settings.use_color && !flags.plain);
    let field = SortKey::parse(sort_key).map_or(SortField::CreatedAt, |k| k.field);
    let times = TimeFormatter::new(flags.relative_time, clip::now());
    let headers = vec![
        ctx.format_header("ID"),
        ctx.format_header("Title"),
        ctx.format_header(&times.format_label(field.label())),
        ctx.format_header("Preview"),
    ];

    // Preview column takes whatever the other columns leave over.
    let id_w = clips.iter().map(|c| c.id.to_string().len()).max().unwrap_or(2).max(2);
    let used = id_w + TITLE_MAX_CHARS + 16 + 3 * 3;
    let preview_w = terminal_columns().saturating_sub(used).max(12);

    let rows: Vec<Vec<String>> = clips
        .iter()
        .map(|c| {
            let ts = match field {
                SortField::CreatedAt => &c.created_at,
                SortField::UpdatedAt => &c.updated_at,
                SortField::LastUsedAt => &c.last_used_at,
            };
            vec![
                ctx.format_id(&c.id.to_string()),
                truncate_with_ellipsis(&c.title, TITLE_MAX_CHARS),
                ctx.format_timestamp(&times.format(ts)),
                truncate_with_ellipsis(c.first_line(), preview_w),
            ]
        })
        .collect();
    println!("{}", render_table(&headers, &rows));
    Ok(())
}

fn show_clip(args: Vec<String>, svc: &Service, settings: &Settings) -> Result<(), Box<dyn Error>> {
    let flags = CommonFlags::parse(args, "show")?;
    let raw = flags
        .positional
        .first()
        .ok_or("Usage: tc show <id> [-n|--lines N] [--full] [--plain]")?;
    let id = parse_id(raw)?;
    let times = TimeFormatter::new(flags.relative_time, clip::now());
    let clip = svc.find(id).map_err(|e| e.context("show", id))?;

    let ctx = FormatContext::new(settings.use_color && !flags.plain);
    println!("{} ({})", ctx.format_header(&clip.title), ctx.format_id(&id.to_string()));
    println!("Status: {}", ctx.format_status(clip.is_active));
    println!("Created: {}", ctx.format_timestamp(&times.format(&clip.created_at)));
    println!("Updated: {}", ctx.format_timestamp(&times.format(&clip.updated_at)));
    println!("Last used: {}", ctx.format_timestamp(&times.format(&clip.last_used_at)));
    println!();

    if flags.full {
        println!("{}", clip.content);
    } else {
        let truncator = ClipTruncator::new(TextWrapper::new(PREVIEW_MARGIN));
        let lines = flags.lines.unwrap_or(DEFAULT_PREVIEW_LINES);
        println!("{}", clip.preview(&truncator, lines, terminal_columns()));
    }
    Ok(())
}

fn copy_clip(args: Vec<String>, svc: &mut Service, settings: &Settings) -> Result<(), Box<dyn Error>> {
    let raw = args.first().ok_or("Usage: tc copy <id>")?;
    let id = parse_id(raw)?;
    let mut clipboard = clipboard::open(settings.clipboard_enabled);
    let report = svc.copy_to_clipboard(id, clipboard.as_mut())?;
    match report.clipboard {
        Ok(()) => println!("Copied clip {id} ({})", report.clip.title),
        Err(err) => {
            let ctx = FormatContext::new(settings.use_color && io::stderr().is_terminal());
            eprintln!("{}", ctx.format_warning(&format!("Could not copy clip {id}: {err}")));
            println!("Marked clip {id} as used ({})", report.clip.title);
        }
    }
    Ok(())
}

fn duplicate_clip(args: Vec<String>, svc: &mut Service) -> Result<(), Box<dyn Error>> {
    let raw = args.first().ok_or("Usage: tc duplicate <id>")?;
    let id = parse_id(raw)?;
    let new_id = svc.duplicate(id)?;
    println!("Duplicated clip {id} as {new_id}");
    Ok(())
}

/// Runs `op` on every id given. Missing clips are reported and skipped; any
/// other failure stops the command.
fn for_each_id(
    args: Vec<String>,
    command: &str,
    mut op: impl FnMut(ClipId) -> Result<(), ClipError>,
    done: &str,
) -> Result<(), Box<dyn Error>> {
    if args.is_empty() {
        return Err(format!("Usage: tc {command} <ids...>").into());
    }
    let mut changed = 0;
    for raw in args {
        let id = parse_id(&raw)?;
        match op(id) {
            Ok(()) => {
                println!("{done} {id}");
                changed += 1;
            }
            Err(err) if err.is_not_found() => println!("Clip {id} not found"),
            Err(err) => return Err(err.into()),
        }
    }
    if changed == 0 {
        println!("No clips changed.");
    }
    Ok(())
}

fn terminal_columns() -> usize {
    if let Some(cols) = env::var("COLUMNS").ok().and_then(|c| c.parse::<usize>().ok()) {
        return cols;
    }
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(FALLBACK_COLUMNS)
}

/// Opens the configured store as a ready-to-use service.
pub fn open_service(settings: &Settings) -> Result<Service, ClipError> {
    let repo = SqliteClipRepository::open(&settings.db_path)?;
    Ok(ClipService::new(repo).with_sort_key(settings.sort_key.clone()))
}

use crate::{
    app::App,
    config::Config,
    controller::DeleteOutcome,
    display::{format_detail, format_toast, format_user_table},
    forms::{Field, FormError, UserForm},
    model::UserId,
    notify::{Notifier, Toast},
    routes::Route,
    transcript::Transcript,
};
use anyhow::Result;
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use serde_json::Value;
use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "userdesk", version, about = "Browse and edit users on a REST user service")]
pub struct Args {
    /// Remote user service root URL
    #[arg(long, env = "USERDESK_BASE_URL")]
    pub base_url: Option<String>,

    /// Config file (default: ~/.userdesk/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Run a single command after loading, then exit
    #[arg(short = 'e', long)]
    pub exec: Option<String>,

    /// Answer delete confirmations with yes
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Echo every logged event to stderr
    #[arg(long)]
    pub trace: bool,

    /// Directory for session transcripts
    #[arg(long)]
    pub transcripts_dir: Option<PathBuf>,
}

/// Prints toasts to stderr and writes events to the session transcript.
pub struct ConsoleNotifier {
    transcript: Option<Mutex<Transcript>>,
    trace: AtomicBool,
}

impl ConsoleNotifier {
    pub fn new(transcript: Option<Transcript>, trace: bool) -> Self {
        Self {
            transcript: transcript.map(Mutex::new),
            trace: AtomicBool::new(trace),
        }
    }

    /// Flip tracing, returning the new state.
    pub fn toggle_trace(&self) -> bool {
        !self.trace.fetch_xor(true, Ordering::Relaxed)
    }

    pub fn transcript_path(&self) -> Option<PathBuf> {
        let transcript = self.transcript.as_ref()?.lock().ok()?;
        Some(transcript.path.clone())
    }

    pub fn log_command(&self, line: &str) {
        self.with_transcript(|t| t.command(line));
    }

    fn with_transcript(&self, write: impl FnOnce(&mut Transcript) -> Result<()>) {
        if let Some(transcript) = &self.transcript {
            match transcript.lock() {
                Ok(mut t) => {
                    if let Err(e) = write(&mut t) {
                        eprintln!("[userdesk] Failed to write transcript: {}", e);
                    }
                }
                Err(_) => eprintln!("[userdesk] Transcript lock poisoned"),
            }
        }
    }
}

/// Where interactive answers come from.
pub trait LineReader {
    /// Read one line with `initial` pre-filled. `Ok(None)` means the operator
    /// interrupted input.
    fn read_line(&mut self, prompt: &str, initial: &str) -> Result<Option<String>>;
}

impl LineReader for DefaultEditor {
    fn read_line(&mut self, prompt: &str, initial: &str) -> Result<Option<String>> {
        match self.readline_with_initial(prompt, (initial, "")) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn toast(&self, toast: Toast) {
        eprintln!("{}", format_toast(&toast));
    }

    fn event(&self, event_type: &str, data: Value) {
        if self.trace.load(Ordering::Relaxed) {
            eprintln!("[userdesk] {} {}", event_type, data);
        }
        self.with_transcript(|t| t.log(event_type, data));
    }
}

pub struct Context {
    pub args: Args,
    pub config: Config,
    pub base_url: String,
    pub session_id: String,
    pub notifier: Arc<ConsoleNotifier>,
    pub runtime: Runtime,
    pub app: RefCell<App>,
}

impl Context {
    fn auto_confirm(&self) -> bool {
        self.args.yes || self.config.auto_confirm
    }
}

/// Load the list, run one command, exit.
pub fn run_once(ctx: &Context, command: &str) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    ctx.runtime.block_on(ctx.app.borrow_mut().mount());
    ctx.notifier.log_command(command);
    dispatch(ctx, &mut rl, command)?;
    Ok(())
}

pub fn run_repl(ctx: Context) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    // Load command history
    let history_file = ctx.config.history_path();
    let _ = rl.load_history(&history_file);

    println!("userdesk - type /help for commands, /exit to quit");
    ctx.runtime.block_on(ctx.app.borrow_mut().mount());
    print_list(&ctx);

    loop {
        match rl.readline(">>> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line)?;
                ctx.notifier.log_command(line);

                match dispatch(&ctx, &mut rl, line) {
                    Ok(true) => break,
                    Ok(false) => {}
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Input error: {}", e);
                break;
            }
        }
    }

    // Save command history (create parent directory if needed)
    if let Some(parent) = history_file.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let _ = rl.save_history(&history_file);

    Ok(())
}

/// Returns true when the session should end.
fn dispatch(ctx: &Context, input: &mut dyn LineReader, line: &str) -> Result<bool> {
    if !line.starts_with('/') {
        // Bare text goes to the search box
        ctx.app.borrow_mut().search(line);
        print_list(ctx);
        return Ok(false);
    }

    let words = match shell_words::split(line) {
        Ok(w) => w,
        Err(e) => {
            println!("Invalid quoting: {}", e);
            return Ok(false);
        }
    };
    let (cmd, args) = match words.split_first() {
        Some((cmd, args)) => (cmd.as_str(), args),
        None => return Ok(false),
    };

    match cmd {
        "/exit" | "/quit" => return Ok(true),
        "/help" => print_help(),
        "/list" => print_list(ctx),
        "/search" => {
            ctx.app.borrow_mut().search(&args.join(" "));
            print_list(ctx);
        }
        "/view" => match parse_id(args) {
            Some(id) => {
                if ctx.app.borrow_mut().view(id) {
                    println!("{}", format_detail(&ctx.app.borrow().detail()));
                } else {
                    println!("No user with id {} in the list", id);
                }
            }
            None => println!("Usage: /view <id>"),
        },
        "/open" => match args.first() {
            Some(path) => {
                let moved = ctx.app.borrow_mut().navigate(path);
                if !moved {
                    println!("Unknown route: {}", path);
                } else if ctx.app.borrow().navigation().route == Route::List {
                    print_list(ctx);
                } else {
                    println!("{}", format_detail(&ctx.app.borrow().detail()));
                }
            }
            None => println!("Usage: /open <path>"),
        },
        "/add" => run_add_form(ctx, input)?,
        "/edit" => match parse_id(args) {
            Some(id) => run_edit_form(ctx, input, id)?,
            None => println!("Usage: /edit <id>"),
        },
        "/delete" => match parse_id(args) {
            Some(id) => run_delete(ctx, input, id)?,
            None => println!("Usage: /delete <id>"),
        },
        "/trace" => {
            let on = ctx.notifier.toggle_trace();
            println!("Tracing: {}", if on { "on" } else { "off" });
        }
        "/session" => {
            println!("Session: {}", ctx.session_id);
            println!("Service: {}", ctx.base_url);
            if let Some(path) = ctx.notifier.transcript_path() {
                println!("Transcript: {}", path.display());
            }
        }
        _ => println!("Unknown command: {}", cmd),
    }
    Ok(false)
}

fn print_help() {
    println!("Commands:");
    println!("  /list              - show users matching the current search");
    println!("  /search [text]     - search name, email, username or phone (empty clears)");
    println!("  <text>             - same as /search <text>");
    println!("  /view <id>         - show a user's details");
    println!("  /open <path>       - go to a route (/ or /users/<id>)");
    println!("  /add               - add a new user");
    println!("  /edit <id>         - edit a user");
    println!("  /delete <id>       - delete a user");
    println!("  /trace             - toggle event tracing");
    println!("  /session           - show session info");
    println!("  /exit              - quit");
}

fn print_list(ctx: &Context) {
    let app = ctx.app.borrow();
    let rows = app.visible();
    if !app.query().is_empty() {
        println!("Search: {:?} ({} matching)", app.query(), rows.len());
    }
    println!("{}", format_user_table(&rows, app.list.is_loading()));
}

fn parse_id(args: &[String]) -> Option<UserId> {
    args.first().and_then(|a| a.parse().ok())
}

enum SubmitChoice {
    Submit,
    Revise,
    Cancel,
}

/// Prompt every field in order, pre-filled with the current value.
/// Returns false if input was interrupted.
fn fill_fields(input: &mut dyn LineReader, form: &mut dyn UserForm) -> Result<bool> {
    for field in Field::ALL {
        let marker = if field.is_required() { " *" } else { "" };
        let prompt = format!("{}{}: ", field.label(), marker);
        let current = form.value(field).to_string();

        let Some(line) = input.read_line(&prompt, &current)? else {
            return Ok(false);
        };
        // Only changed values are applied
        if line != current {
            form.set_field(field, &line);
        }

        if let Some(error) = form.field_error(field) {
            eprintln!("  ! {}", error);
        }
    }
    println!("Username: {}", form.username());
    Ok(true)
}

fn ask_submit(input: &mut dyn LineReader, action: &str, enabled: bool) -> SubmitChoice {
    let prompt = if enabled {
        format!("{}? [Y]es / [r]evise / [c]ancel: ", action)
    } else {
        "Fix the errors above. [r]evise / [c]ancel: ".to_string()
    };
    let answer = match input.read_line(&prompt, "") {
        Ok(Some(a)) => a.trim().to_lowercase(),
        _ => return SubmitChoice::Cancel,
    };
    match answer.as_str() {
        "" | "y" | "yes" if enabled => SubmitChoice::Submit,
        "c" | "cancel" => SubmitChoice::Cancel,
        _ => SubmitChoice::Revise,
    }
}

fn run_add_form(ctx: &Context, input: &mut dyn LineReader) -> Result<()> {
    let mut app = ctx.app.borrow_mut();
    app.open_add();
    println!("Add New User");

    loop {
        if !fill_fields(input, &mut app.add_form)? {
            app.add_form.cancel();
            println!("Cancelled");
            return Ok(());
        }

        match ask_submit(input, "Add User", app.add_form.can_submit()) {
            SubmitChoice::Submit => {}
            SubmitChoice::Revise => continue,
            SubmitChoice::Cancel => {
                app.add_form.cancel();
                return Ok(());
            }
        }

        match ctx.runtime.block_on(app.submit_add()) {
            Ok(id) => {
                println!("Added user {}", id);
                return Ok(());
            }
            // The form stays open; the toast already explained why
            Err(FormError::Validation(_)) | Err(FormError::Remote(_)) => continue,
            Err(FormError::NotOpen) => return Ok(()),
        }
    }
}

fn run_edit_form(ctx: &Context, input: &mut dyn LineReader, id: UserId) -> Result<()> {
    let mut app = ctx.app.borrow_mut();
    if !app.open_edit(id) {
        println!("No user with id {} in the list", id);
        return Ok(());
    }
    println!("Edit User (username {} is read-only)", app.edit_form.username());

    loop {
        if !fill_fields(input, &mut app.edit_form)? {
            app.edit_form.cancel();
            println!("Cancelled");
            return Ok(());
        }

        match ask_submit(input, "Update User", true) {
            SubmitChoice::Submit => {}
            SubmitChoice::Revise => continue,
            SubmitChoice::Cancel => {
                app.edit_form.cancel();
                return Ok(());
            }
        }

        match ctx.runtime.block_on(app.submit_edit()) {
            Ok(_) => return Ok(()),
            Err(FormError::NotOpen) => return Ok(()),
            // Failed after the form closed: nothing left to revise
            Err(_) if !app.edit_form.is_open() => return Ok(()),
            Err(_) => continue,
        }
    }
}

fn run_delete(ctx: &Context, input: &mut dyn LineReader, id: UserId) -> Result<()> {
    let auto = ctx.auto_confirm();
    let mut confirm = |prompt: &str| -> bool {
        if auto {
            eprintln!("{} [auto: yes]", prompt);
            return true;
        }
        match input.read_line(&format!("{} [y/N] ", prompt), "") {
            Ok(Some(answer)) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    };

    let outcome = ctx
        .runtime
        .block_on(ctx.app.borrow_mut().delete(id, &mut confirm));
    if outcome == DeleteOutcome::Cancelled {
        println!("Delete cancelled");
    }
    Ok(())
}

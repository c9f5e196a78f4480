//! tabset - terminal settings screen
//!
//! Shows the General, Performance and Advanced pages and writes every
//! change straight back to the settings file.

mod config;
mod pages;
mod settings;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use config::AppConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use settings::{DemoSettings, SharedSettings};
use std::cell::RefCell;
use std::fs::{self, OpenOptions};
use std::io::stdout;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use tabset_core::{
    load_settings, save_settings, CoreResult, JsonFileStore, Logger, LoggerRegistry, Message,
    MessageBus, SettingsStore, Theme,
};
use tabset_ui::{Notice, SettingsApp, SettingsTabManager};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing_subscriber::EnvFilter;

/// Terminal settings screen
#[derive(Parser)]
#[command(name = "tabset")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Settings file to edit
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Page to open first, by id (general, performance, advanced)
    #[arg(short, long)]
    tab: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.update_from_cli(cli.data.clone(), cli.verbose);
    init_tracing(&config)?;

    let store = JsonFileStore::new(config.data_file()?);
    let loaded: DemoSettings = load_settings(&store)
        .wrap_err_with(|| format!("Failed to load settings from {:?}", store.path()))?;
    tracing::info!("editing {:?}", store.path());

    let registry = LoggerRegistry::new(loaded.logger_level());
    let theme = Theme::from_name(loaded.theme_name());
    let settings: SharedSettings = Rc::new(RefCell::new(loaded));
    let bus = MessageBus::default();
    let mut changes = bus.subscribe();

    let mut manager = SettingsTabManager::new();
    manager.add_tabs(pages::all_pages(&settings, &bus, &registry))?;
    let mut app = SettingsApp::new(manager)
        .with_theme(theme)
        .with_message_bus(bus.clone());
    app.open(cli.tab.as_deref())?;
    app.set_notice(Notice::info("Ctrl-R resets every setting"));

    let session = Session::new(settings, store, registry, bus);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &session, &mut changes);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Sends tracing output to the log file; the terminal belongs to the UI.
fn init_tracing(config: &AppConfig) -> Result<()> {
    let path = config.log_file()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("Failed to create log directory: {:?}", parent))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("Failed to open log file {:?}", path))?;

    let level = config.log_level;
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("tabset={level}").parse()?)
        .add_directive(format!("tabset_core={level}").parse()?)
        .add_directive(format!("tabset_ui={level}").parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn run_app<B>(
    terminal: &mut Terminal<B>,
    app: &mut SettingsApp,
    session: &Session<JsonFileStore>,
    changes: &mut broadcast::Receiver<Message>,
) -> Result<()>
where
    B: Backend,
    <B as Backend>::Error: std::error::Error + Send + Sync + 'static,
{
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match (key.modifiers, key.code) {
                        (KeyModifiers::CONTROL, KeyCode::Char('r')) => session.reset(app),
                        _ => app.dispatch(Message::Key(key)),
                    }
                }
                Event::Mouse(mouse) => app.dispatch(Message::Mouse(mouse)),
                Event::Resize(w, h) => app.dispatch(Message::Resize(w, h)),
                _ => {}
            }
        }

        let changed = drain_changes(changes);
        session.persist(app, &changed);

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// Names of the settings changed since the last call, in order.
fn drain_changes(rx: &mut broadcast::Receiver<Message>) -> Vec<String> {
    let mut changed = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(Message::SettingsChanged { setting }) => changed.push(setting),
            Ok(_) => {}
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!("missed {} bus messages", skipped);
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
    changed
}

/// Settings, where they are stored and what depends on them
struct Session<St> {
    settings: SharedSettings,
    store: St,
    registry: LoggerRegistry,
    bus: MessageBus,
    log: Logger,
}

impl<St: SettingsStore> Session<St> {
    fn new(settings: SharedSettings, store: St, registry: LoggerRegistry, bus: MessageBus) -> Self {
        let log = registry.get_or_create("settings");
        Session {
            settings,
            store,
            registry,
            bus,
            log,
        }
    }

    /// Saves after `changed` settings were edited and applies the ones
    /// that affect the running screen.
    fn persist(&self, app: &mut SettingsApp, changed: &[String]) {
        if changed.is_empty() {
            return;
        }
        let snapshot = self.settings.borrow().clone();
        let theme = snapshot.theme_name();
        if app.theme().name != theme {
            app.set_theme(Theme::from_name(theme));
        }
        let level = snapshot.logger_level();
        if self.registry.global_level() != level {
            self.registry.set_global_level(level);
        }

        match save_settings(&self.store, &snapshot) {
            Ok(()) => {
                self.log.info(format_args!("saved {}", changed.join(", ")));
                app.set_notice(Notice::success(saved_message(changed)));
            }
            Err(err) => {
                self.log.error(format_args!("save failed: {}", err));
                app.set_notice(Notice::error(format!("Could not save settings: {err}")));
            }
        }
    }

    /// Restores every default and redraws the active page.
    fn reset(&self, app: &mut SettingsApp) {
        if let Err(err) = self.reset_all(app) {
            self.log.error(format_args!("reset failed: {}", err));
            app.set_notice(Notice::error(format!("Reset failed: {err}")));
        }
    }

    fn reset_all(&self, app: &mut SettingsApp) -> CoreResult<()> {
        settings::reset_all(&self.settings, &self.bus)?;
        app.refresh()
    }
}

fn saved_message(changed: &[String]) -> String {
    match changed {
        [one] => format!("Saved {one}"),
        many => format!("Saved {} settings", many.len()),
    }
}

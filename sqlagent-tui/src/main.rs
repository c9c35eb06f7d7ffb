//! sqlagent TUI entry point.

use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use sqlagent_tui::api_client::RestClient;
use sqlagent_tui::config::TuiConfig;
use sqlagent_tui::error::TuiError;
use sqlagent_tui::events::{dispatch, Command, TuiEvent};
use sqlagent_tui::keys::map_key;
use sqlagent_tui::notifications::NotificationLevel;
use sqlagent_tui::persistence::{self, PersistedState};
use sqlagent_tui::state::App;
use sqlagent_tui::views::render_view;
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

const TICK_RATE: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    let api = RestClient::new(&config)?;

    let (restore, restore_error) = match persistence::load(&config.persistence_path) {
        Ok(state) => (state, None),
        Err(err) => (PersistedState::default(), Some(err)),
    };
    let mut app = App::new(config, restore);
    if let Some(err) = restore_error {
        app.notify(
            NotificationLevel::Warning,
            format!("Ignoring saved selection: {}", err),
        );
    }

    let mut terminal = setup_terminal()?;
    let guard = TerminalGuard;

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    spawn_input_reader(event_tx.clone());
    dispatch(api.clone(), Command::LoadDatabases, event_tx.clone());

    let mut ticker = tokio::time::interval(TICK_RATE);

    while !app.should_quit {
        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => {}
            Some(event) = event_rx.recv() => {
                if let Some(command) = handle_event(&mut app, event) {
                    dispatch(api.clone(), command, event_tx.clone());
                }
            }
        }
    }

    drop(guard);
    persistence::save(&app.config.persistence_path, &app.persisted())?;
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            let sent = match event::read() {
                Ok(CrosstermEvent::Key(key)) => sender.blocking_send(TuiEvent::Input(key)),
                Ok(CrosstermEvent::Resize(width, height)) => {
                    sender.blocking_send(TuiEvent::Resize { width, height })
                }
                _ => Ok(()),
            };
            if sent.is_err() {
                break;
            }
        }
    });
}

fn handle_event(app: &mut App, event: TuiEvent) -> Option<Command> {
    match event {
        TuiEvent::Input(key) => {
            let action = map_key(key, app.focus)?;
            app.handle_action(action)
        }
        TuiEvent::Loaded(outcome) => app.apply(outcome),
        TuiEvent::Resize { .. } => None,
    }
}

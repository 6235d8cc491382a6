//! helpline-tui: Terminal UI for the helpline chat client
//!
//! This crate provides the TUI layer for helpline, including:
//! - Transcript pane with follow mode and scrollback
//! - Multi-line input bar with draft history
//! - Status bar with endpoint and in-flight indicators

pub mod app;
pub mod event;
pub mod theme;
pub mod transcript;
pub mod widgets;

pub use app::App;
pub use event::{Action, Event, EventHandler};
pub use theme::Theme;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use helpline_core::{ChatClient, ChatReply, ClientError, Config};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Frame, Terminal,
};
use std::io::{self, stdout};

type ExchangeHandle = tokio::task::JoinHandle<Result<ChatReply, ClientError>>;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// This is the main entry point for the TUI. It sets up the terminal,
/// runs the event loop, and restores the terminal on exit.
pub async fn run_tui(config: &Config, endpoint: String) -> Result<(), Box<dyn std::error::Error>> {
    let client = ChatClient::new(&endpoint)?;

    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, endpoint);

    // Create event handler (4 Hz tick rate = 250ms)
    let mut events = EventHandler::new(250);

    let result = run_loop(&mut terminal, &mut app, &mut events, &client).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    client: &ChatClient,
) -> Result<(), Box<dyn std::error::Error>> {
    let theme = Theme::default();

    // In-flight exchange handles. Settled results are applied in the order
    // the exchanges finish, not the order they were started.
    let mut exchange_handles: Vec<ExchangeHandle> = Vec::new();

    loop {
        terminal.draw(|frame| draw(frame, app, &theme))?;

        // Handle events
        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    if !handle_input_key(app, key, client, &mut exchange_handles) {
                        let action = event::key_to_action(key);
                        app.handle_action(action);
                    }
                }
                Event::Mouse(mouse) => {
                    use crossterm::event::MouseEventKind;
                    match mouse.kind {
                        MouseEventKind::ScrollUp => {
                            app.handle_action(Action::ScrollUp);
                        }
                        MouseEventKind::ScrollDown => {
                            app.handle_action(Action::ScrollDown);
                        }
                        _ => {}
                    }
                }
                Event::Tick => {
                    app.tick();
                }
                Event::Resize(_, _) => {
                    // Terminal will handle resize automatically
                }
            }
        }

        // Check for settled exchanges (non-blocking)
        let mut settled = Vec::new();
        for (i, handle) in exchange_handles.iter().enumerate() {
            if handle.is_finished() {
                settled.push(i);
            }
        }
        for i in settled.into_iter().rev() {
            match exchange_handles.remove(i).await {
                Ok(result) => app.apply_reply(result),
                // Aborted or panicked task; nothing to append.
                Err(_) => app.settle_lost_exchange(),
            }
        }

        if app.should_quit {
            // Any still-running exchange dies with the session.
            for handle in exchange_handles {
                handle.abort();
            }
            break;
        }
    }

    Ok(())
}

/// Handle key input for the message draft.
/// Returns true if the key was handled (should not be processed as action).
fn handle_input_key(
    app: &mut App,
    key: KeyEvent,
    client: &ChatClient,
    exchange_handles: &mut Vec<ExchangeHandle>,
) -> bool {
    // Modifier+Enter (and Ctrl+J, for terminals that eat the modifier)
    // inserts a line break instead of sending.
    if key.code == KeyCode::Enter
        && key
            .modifiers
            .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT | KeyModifiers::CONTROL)
    {
        app.input.insert('\n');
        return true;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('j') {
            app.input.insert('\n');
            return true;
        }
        return false; // Let the action handler deal with Ctrl+C etc.
    }

    match key.code {
        KeyCode::Esc | KeyCode::PageUp | KeyCode::PageDown => false,

        // Enter sends the draft
        KeyCode::Enter => {
            if let Some(text) = app.submit_draft() {
                if app.begin_send(&text) {
                    let client = client.clone();
                    let handle = tokio::spawn(async move { client.send(&text).await });
                    exchange_handles.push(handle);
                }
            }
            true
        }

        // Text input
        KeyCode::Char(c) => {
            app.input.insert(c);
            true
        }
        KeyCode::Backspace => {
            app.input.backspace();
            true
        }
        KeyCode::Delete => {
            app.input.delete();
            true
        }
        KeyCode::Left => {
            app.input.move_left();
            true
        }
        KeyCode::Right => {
            app.input.move_right();
            true
        }
        KeyCode::Home => {
            app.input.move_home();
            true
        }
        KeyCode::End => {
            app.input.move_end();
            true
        }
        KeyCode::Up => {
            // History navigation when the draft is empty
            if app.input.is_empty() {
                app.input.history_prev();
                true
            } else {
                false
            }
        }
        KeyCode::Down => {
            if app.input.is_empty() {
                app.input.history_next();
                true
            } else {
                false
            }
        }

        _ => false,
    }
}

/// Draw one frame: transcript, input bar, status line, top to bottom.
fn draw(frame: &mut Frame, app: &mut App, theme: &Theme) {
    let area = frame.area();
    let input_height = widgets::InputBar::required_height(&app.input, area.height / 2);

    let [transcript_area, input_area, status_area] = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(input_height),
        Constraint::Length(1),
    ])
    .areas(area);

    let transcript = transcript::TranscriptWidget::new(app.conversation.turns(), theme)
        .show_timestamps(app.show_timestamps);
    frame.render_stateful_widget(transcript, transcript_area, &mut app.transcript);

    frame.render_widget(widgets::InputBar::new(&app.input, theme), input_area);

    let status = widgets::StatusBar::new(theme, &app.endpoint)
        .pending(app.pending, app.tick)
        .following(app.transcript.is_following());
    frame.render_widget(status, status_area);
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! Terminal setup, teardown, and main event loop.

use std::io;
use std::time::Instant;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use momentos_core::TabId;

use crate::app::TuiApp;
use crate::tabs::{self, tab_bar_hit_test};

/// Volume change per key press.
const VOLUME_STEP: f32 = 0.05;

/// Launch the TUI application.
pub fn run(mut app: TuiApp) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("terminal error: {e}"))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| format!("terminal error: {e}"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| format!("terminal error: {e}"))?;

    let result = run_loop(&mut terminal, &mut app);
    app.session.teardown();

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    result
}

/// Main event loop. Polls with a timeout so settle windows close and
/// animations advance without input.
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut TuiApp,
) -> Result<(), String> {
    loop {
        let now = Instant::now();
        app.tick(now);
        terminal
            .draw(|frame| draw(frame, app, now))
            .map_err(|e| format!("draw error: {e}"))?;

        if app.should_quit {
            return Ok(());
        }

        let ready = event::poll(app.poll_timeout(Instant::now()))
            .map_err(|e| format!("event error: {e}"))?;
        if ready {
            let event = event::read().map_err(|e| format!("event error: {e}"))?;
            handle_event(app, event, Instant::now());
        }
    }
}

/// Handle a crossterm event.
pub fn handle_event(app: &mut TuiApp, event: Event, now: Instant) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key, now),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        _ => {}
    }
}

/// Handle keyboard input: global bindings first, then the active tab.
fn handle_key(app: &mut TuiApp, key: KeyEvent, now: Instant) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('?') => app.show_help = !app.show_help,
        KeyCode::Esc if app.show_help => app.show_help = false,
        KeyCode::Tab => app.session.next_tab(),
        KeyCode::BackTab => app.session.prev_tab(),
        KeyCode::Char(c @ '1'..='3') => {
            let idx = c as usize - '1' as usize;
            app.session.select_tab(TabId::ALL[idx]);
        }
        KeyCode::Char('p') => app.session.toggle_play(),
        KeyCode::Char('n') => app.session.next_track(),
        KeyCode::Char('b') => {
            app.session.prev_track();
        }
        KeyCode::Char('m') => app.session.toggle_mute(),
        KeyCode::Char('[') => app.session.nudge_volume(-VOLUME_STEP),
        KeyCode::Char(']') => app.session.nudge_volume(VOLUME_STEP),
        // The help popup covers the tab, so its keys go nowhere
        _ if app.show_help => {}
        _ => app.forward_key(key, now),
    }
}

/// Handle mouse events: clicks on the tab bar switch tabs.
fn handle_mouse(app: &mut TuiApp, mouse: MouseEvent) {
    // Row 1 holds the tab bar
    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind
        && mouse.row == 1
        && let Some(tab) = tab_bar_hit_test(mouse.column)
    {
        app.session.select_tab(tab);
    }
}

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &TuiApp, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Music header
            Constraint::Length(1), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    crate::shared::draw_header(frame, app.session.playback(), chunks[0]);
    tabs::draw_tab_bar(frame, app.session.tab(), chunks[1]);
    app.active_tab_ref()
        .draw(frame, chunks[2], &app.session, now);

    let hint = app.active_tab_ref().status_hint();
    let status = match app.cue_caption(now) {
        Some(caption) => format!("{caption}   {hint}"),
        None => hint.to_string(),
    };
    let status = Paragraph::new(status).style(Style::default().fg(Color::Black).bg(Color::White));
    frame.render_widget(status, chunks[3]);

    if app.show_help {
        crate::shared::draw_help_popup(frame);
    }
}

//! Score counters tab.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use momentos_core::{CounterKind, Delta, Player, Session};

use super::Tab;

/// Score tab state: which of the four counters is selected.
#[derive(Debug)]
pub struct ScoreTab {
    player: Player,
    kind: CounterKind,
}

impl Default for ScoreTab {
    fn default() -> Self {
        Self {
            player: Player::One,
            kind: CounterKind::Yellow,
        }
    }
}

impl ScoreTab {
    /// Create the tab with the cursor on player one's yellow counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected counter.
    pub fn cursor(&self) -> (Player, CounterKind) {
        (self.player, self.kind)
    }

    fn counter_color(kind: CounterKind) -> Color {
        match kind {
            CounterKind::Yellow => Color::Yellow,
            CounterKind::Green => Color::Green,
        }
    }

    fn draw_player(&self, frame: &mut Frame, area: Rect, session: &Session, player: Player) {
        let block = Block::default()
            .title(format!(" {} ", player.label()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta));

        let mut lines: Vec<Line<'static>> = vec![Line::from("")];
        for kind in CounterKind::ALL {
            let value = session.scores().get(player, kind);
            let selected = (player, kind) == self.cursor();
            let color = Self::counter_color(kind);
            let marker = if selected { "\u{25b6} " } else { "  " };
            let mut value_style = Style::default().fg(color).bold();
            if selected {
                value_style = value_style.reversed();
            }
            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Magenta)),
                Span::styled(format!("{:<8}", kind.label()), Style::default().fg(color)),
                Span::styled(" [-] ", Style::default().fg(Color::DarkGray)),
                Span::styled(format!(" {value:>3} "), value_style),
                Span::styled(" [+]", Style::default().fg(Color::DarkGray)),
            ]));
            lines.push(Line::from(""));
        }
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

impl Tab for ScoreTab {
    fn handle_key(&mut self, key: KeyEvent, session: &mut Session, _now: Instant) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.player = Player::One,
            KeyCode::Right | KeyCode::Char('l') => self.player = Player::Two,
            KeyCode::Up | KeyCode::Char('k') => self.kind = CounterKind::Yellow,
            KeyCode::Down | KeyCode::Char('j') => self.kind = CounterKind::Green,
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Enter => {
                session.adjust_score(self.player, self.kind, Delta::Up);
            }
            KeyCode::Char('-') | KeyCode::Backspace => {
                session.adjust_score(self.player, self.kind, Delta::Down);
            }
            _ => {}
        }
    }

    fn draw(&self, frame: &mut Frame, area: Rect, session: &Session, _now: Instant) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        for (player, chunk) in Player::ALL.into_iter().zip(chunks.iter()) {
            self.draw_player(frame, *chunk, session, player);
        }
    }

    fn status_hint(&self) -> &str {
        "\u{2190}/\u{2192}:jogador  \u{2191}/\u{2193}:cor  +/-:pontos  1-3/Tab:aba  p:play  m:mudo  ?:ajuda  q:sair"
    }
}

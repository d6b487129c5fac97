//! Tab trait and tab bar rendering.

pub mod dice;
pub mod roulette;
pub mod score;

use std::time::Instant;

use crossterm::event::KeyEvent;
use ratatui::prelude::*;

use momentos_core::{Session, TabId};

/// Trait that each tab screen implements.
///
/// Tabs keep only view state (cursors, animation start times); game state
/// lives in the [`Session`].
pub trait Tab {
    /// Handle a key event not consumed by the global bindings.
    fn handle_key(&mut self, key: KeyEvent, session: &mut Session, now: Instant);

    /// Draw the tab content into the given area.
    fn draw(&self, frame: &mut Frame, area: Rect, session: &Session, now: Instant);

    /// Return context-sensitive status bar text.
    fn status_hint(&self) -> &str;
}

/// Tab bar label for a tab.
pub fn tab_label(tab: TabId) -> String {
    format!("[{}]{}", tab.index() + 1, tab.title())
}

const DIVIDER: &str = " | ";

/// Draw the tab bar.
pub fn draw_tab_bar(frame: &mut Frame, active: TabId, area: Rect) {
    let mut spans = Vec::new();
    for (i, tab) in TabId::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(DIVIDER, Style::default().fg(Color::DarkGray)));
        }
        let style = if *tab == active {
            Style::default().fg(Color::Magenta).bold()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(tab_label(*tab), style));
    }
    frame.render_widget(ratatui::widgets::Paragraph::new(Line::from(spans)), area);
}

/// Hit-test the tab bar for mouse clicks.
pub fn tab_bar_hit_test(col: u16) -> Option<TabId> {
    let mut x = 0u16;
    for tab in TabId::ALL {
        let width = tab_label(tab).chars().count() as u16;
        if col >= x && col < x + width {
            return Some(tab);
        }
        x += width + DIVIDER.len() as u16;
    }
    None
}

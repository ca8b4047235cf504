use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Clear, Paragraph},
    Frame,
};

use crate::config::KeyBindings;

const CARD_TITLE: &str = " Coin Dash ";
// Border plus one blank column/row on each side
const CARD_PAD_X: u16 = 6;
const CARD_PAD_Y: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    /// Shown for the first seconds after a (re)start
    Intro,
    /// Every coin collected, arena frozen
    Complete,
}

/// Centred card drawn over the arena
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayMessage {
    pub kind: CardKind,
    /// First line, drawn bold
    pub headline: String,
    pub details: Vec<String>,
}

impl OverlayMessage {
    pub fn intro(coins_total: usize) -> Self {
        Self {
            kind: CardKind::Intro,
            headline: format!("Collect all {} coins", coins_total),
            details: vec!["Jump twice in the air, hold jump to go higher".to_string()],
        }
    }

    pub fn complete(score: u32, time: f32, keys: &KeyBindings) -> Self {
        Self {
            kind: CardKind::Complete,
            headline: "ALL COINS COLLECTED".to_string(),
            details: vec![
                format!("Score: {}   Time: {:.1}s", score, time),
                format!("{} to Restart  |  {} to Quit", keys.restart, keys.quit),
            ],
        }
    }

    fn accent(&self) -> Color {
        match self.kind {
            CardKind::Intro => Color::Cyan,
            CardKind::Complete => Color::Green,
        }
    }

    /// Card size in cells, before clamping to the screen
    fn size(&self) -> (u16, u16) {
        let widest = self
            .details
            .iter()
            .map(|line| line.chars().count())
            .chain(std::iter::once(self.headline.chars().count()))
            .max()
            .unwrap_or(0) as u16;
        // Headline, blank spacer, details
        let rows = 2 + self.details.len() as u16;
        (widest + CARD_PAD_X, rows + CARD_PAD_Y)
    }
}

pub fn render_overlay(frame: &mut Frame, message: &OverlayMessage, area: Rect) {
    let (width, height) = message.size();
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [card] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);

    let accent = message.accent();
    let mut lines = vec![
        Line::styled(
            message.headline.clone(),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ),
        Line::default(),
    ];
    lines.extend(
        message
            .details
            .iter()
            .map(|line| Line::styled(line.clone(), Style::default().fg(Color::White))),
    );

    let block = Block::bordered()
        .title(CARD_TITLE)
        .title_alignment(Alignment::Center)
        .border_style(Style::default().fg(accent))
        .style(Style::default().bg(Color::Rgb(20, 20, 20)));

    frame.render_widget(Clear, card);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        card,
    );
}

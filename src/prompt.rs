//! Interactive terminal form for collecting credentials.
//!
//! This module provides a ratatui-based form that asks, in order, for the
//! GitHub username, the token, the webhook signing secret and the webhook
//! URL. Each field is validated on Enter. Esc or Ctrl+C cancels the whole
//! form and nothing is returned, so the caller writes no changes.
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io;

use crate::credentials::Credentials;
use crate::errors::ValidationError;
use crate::validation;

/// Trait representing an event source (so tests can inject fake events).
pub trait EventSource {
    fn read_event(&mut self) -> anyhow::Result<Event>;
}

/// One input of the setup form, in the order it is asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Owner,
    Token,
    Secret,
    WebhookUrl,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Owner, Field::Token, Field::Secret, Field::WebhookUrl];

    pub fn label(self) -> &'static str {
        match self {
            Field::Owner => "Your GitHub username",
            Field::Token => "Your GitHub Token",
            Field::Secret => "Your webhook signing secret",
            Field::WebhookUrl => "Your webhook URL",
        }
    }

    /// Whether typed characters are hidden.
    pub fn masked(self) -> bool {
        matches!(self, Field::Token | Field::Secret)
    }

    fn index(self) -> usize {
        match self {
            Field::Owner => 0,
            Field::Token => 1,
            Field::Secret => 2,
            Field::WebhookUrl => 3,
        }
    }

    fn validate(self, value: &str) -> Result<(), ValidationError> {
        match self {
            Field::Owner => validation::validate_repo_owner(value),
            Field::Token => validation::validate_token(value),
            Field::Secret if value.trim().is_empty() => Err(ValidationError::Secret(
                "secret cannot be empty".to_string(),
            )),
            Field::Secret => Ok(()),
            Field::WebhookUrl => validation::validate_webhook_url(value),
        }
    }
}

/// Run the setup form on the real terminal.
pub fn collect_credentials(current: &Credentials) -> anyhow::Result<Option<Credentials>> {
    // Real event source that delegates to `crossterm::event::read`
    struct CrosstermEventSource;
    impl EventSource for CrosstermEventSource {
        fn read_event(&mut self) -> anyhow::Result<Event> {
            Ok(event::read()?)
        }
    }

    terminal::enable_raw_mode()?;
    let res = run_form(current, &mut CrosstermEventSource);

    // Restore terminal in all cases, including a failed terminal setup
    terminal::disable_raw_mode()?;
    res
}

fn run_form<E: EventSource>(
    current: &Credentials,
    events: &mut E,
) -> anyhow::Result<Option<Credentials>> {
    let mut stdout = io::stdout();
    execute!(stdout, Clear(ClearType::All))?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = collect_credentials_with(&mut terminal, events, current);
    terminal.clear()?;
    res
}

/// Run the setup form with an injected terminal backend and event source.
///
/// Fields start with the values from `current`. Returns `None` when the user
/// cancels.
pub fn collect_credentials_with<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    events: &mut E,
    current: &Credentials,
) -> anyhow::Result<Option<Credentials>> {
    let mut values = [
        current.owner.clone(),
        current.token.clone(),
        current.secret.clone(),
        current.webhook_url.clone(),
    ];
    let mut field = Field::Owner;
    let mut message = String::new();

    loop {
        terminal.draw(|frame| render_setup_ui(frame, &values, field, &message))?;

        let Event::Key(key) = events.read_event()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(None);
        }

        let value = &mut values[field.index()];
        match key.code {
            KeyCode::Esc => return Ok(None),
            KeyCode::Enter => {
                let trimmed = value.trim().to_string();
                if let Err(e) = field.validate(&trimmed) {
                    message = format!("⚠️  {}", e);
                    continue;
                }
                *value = trimmed;
                message.clear();
                match Field::ALL.get(field.index() + 1) {
                    Some(next) => field = *next,
                    None => break,
                }
            }
            KeyCode::Up | KeyCode::BackTab => {
                if let Some(prev) = field.index().checked_sub(1) {
                    field = Field::ALL[prev];
                }
                message.clear();
            }
            KeyCode::Char(c) => {
                value.push(c);
                message.clear();
            }
            KeyCode::Backspace => {
                value.pop();
                message.clear();
            }
            _ => {}
        }
    }

    let [owner, token, secret, webhook_url] = values;
    Ok(Some(Credentials {
        token,
        secret,
        webhook_url,
        owner,
    }))
}

/// Render the setup form.
pub fn render_setup_ui(f: &mut Frame, values: &[String; 4], active: Field, message: &str) {
    let chunks = Layout::default()
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1), // Message
            Constraint::Min(0),    // Instructions
        ])
        .split(f.size());

    let title = Paragraph::new(crate::constants::messages::SETUP_INTRO)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("talerts setup"));
    f.render_widget(title, chunks[0]);

    for (idx, field) in Field::ALL.iter().enumerate() {
        let is_active = *field == active;
        let shown = if field.masked() {
            "•".repeat(values[idx].chars().count())
        } else {
            values[idx].clone()
        };
        let border_color = if is_active { Color::Cyan } else { Color::DarkGray };
        let mut spans = vec![Span::raw(shown)];
        if is_active {
            spans.push(Span::raw("│"));
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(field.label());
        f.render_widget(Paragraph::new(Line::from(spans)).block(block), chunks[idx + 1]);
    }

    f.render_widget(
        Paragraph::new(if message.is_empty() { " " } else { message })
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center),
        chunks[5],
    );

    f.render_widget(
        Paragraph::new("Enter: confirm field | ↑: previous field | ESC / Ctrl+C: cancel")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        chunks[6],
    );
}

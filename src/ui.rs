use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
    Terminal,
};

use crate::challenge::GuessOutcome;
use crate::error::GameError;
use crate::game::{GameOverReason, Notice, Screen, ViewModel};
use crate::runtime::Display;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;
const FULL_HEART: &str = "♥";
const EMPTY_HEART: &str = "♡";

/// Display backed by a ratatui terminal
pub struct TerminalDisplay<B: Backend> {
    terminal: Terminal<B>,
}

impl<B: Backend> TerminalDisplay<B> {
    pub fn new(backend: B) -> Result<Self, GameError> {
        Ok(Self {
            terminal: Terminal::new(backend)?,
        })
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

impl<B: Backend> Display for TerminalDisplay<B> {
    fn render(&mut self, view: &ViewModel) -> Result<(), GameError> {
        self.terminal.draw(|f| f.render_widget(view, f.area()))?;
        Ok(())
    }
}

impl Widget for &ViewModel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = match self.screen {
            Screen::Title => title_lines(self),
            Screen::Playing => playing_lines(self),
            Screen::GameOver => game_over_lines(self),
        };
        let legend = match self.screen {
            Screen::Title => "(p)lay / (q)uit",
            Screen::Playing => "type a letter to guess / (esc)ape",
            Screen::GameOver => "(r)estart / (q)uit",
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);

        // vertically center the body inside its chunk
        let body_height = (lines.len() as u16 + 2).min(chunks[0].height);
        let top = chunks[0].y + (chunks[0].height - body_height) / 2;
        let body_area = Rect::new(chunks[0].x, top, chunks[0].width, body_height);

        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" WordCrusader "))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(body_area, buf);

        Paragraph::new(Span::styled(
            legend,
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn title_lines(view: &ViewModel) -> Vec<Line<'static>> {
    let banner = Style::default().patch(bold()).fg(Color::Yellow);
    vec![
        Line::from(Span::styled("WELCOME TO WORDCRUSADER", banner)),
        Line::from(Span::styled(
            "A MEDIEVAL WORD GAME",
            Style::default().add_modifier(Modifier::DIM),
        )),
        Line::default(),
        Line::from("Decipher words to defeat monsters!"),
        Line::from(format!(
            "You have {} seconds and {} hearts per monster.",
            view.time_limit_secs, view.max_hearts
        )),
        Line::from("Each wrong letter costs a heart."),
    ]
}

fn hearts_bar(hearts: u32, max_hearts: u32) -> String {
    let lost = max_hearts.saturating_sub(hearts);
    format!(
        "{}{}  {}/{}",
        FULL_HEART.repeat(hearts as usize),
        EMPTY_HEART.repeat(lost as usize),
        hearts,
        max_hearts
    )
}

fn playing_lines(view: &ViewModel) -> Vec<Line<'static>> {
    let label = Style::default().add_modifier(Modifier::DIM);
    let time_style = if view.time_left <= 10 {
        Style::default().patch(bold()).fg(Color::Red)
    } else {
        bold()
    };

    let masked = view
        .masked_word
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_default();
    let guessed = view
        .guessed_letters
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ");

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Monster: ", label),
            Span::styled(
                view.monster.clone().unwrap_or_default(),
                Style::default().patch(bold()).fg(Color::Magenta),
            ),
        ]),
        Line::from(vec![
            Span::styled("Hearts: ", label),
            Span::styled(
                hearts_bar(view.hearts, view.max_hearts),
                Style::default().fg(Color::Red),
            ),
        ]),
        Line::from(vec![
            Span::styled("Time Left: ", label),
            Span::styled(format!("{}s", view.time_left), time_style),
        ]),
        Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(view.score.to_string(), bold()),
        ]),
        Line::default(),
        Line::from(Span::styled(
            masked,
            Style::default().patch(bold()).fg(Color::Cyan),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("Guessed Letters: ", label),
            Span::raw(guessed),
        ]),
    ];

    if let Some(notice) = &view.notice {
        lines.push(Line::default());
        lines.extend(notice_lines(notice));
    }
    lines
}

fn notice_lines(notice: &Notice) -> Vec<Line<'static>> {
    let green = Style::default().patch(bold()).fg(Color::Green);
    let red = Style::default().patch(bold()).fg(Color::Red);
    let gray = Style::default().fg(Color::Gray);

    match notice {
        Notice::Guess(GuessOutcome::InvalidInput) => {
            vec![Line::from(Span::styled("Please enter a letter (A-Z).", gray))]
        }
        Notice::Guess(GuessOutcome::AlreadyGuessed) => vec![Line::from(Span::styled(
            "You already guessed that letter!",
            gray,
        ))],
        Notice::Guess(GuessOutcome::Miss { .. }) => {
            vec![Line::from(Span::styled("Incorrect guess!", red))]
        }
        Notice::Guess(GuessOutcome::Hit | GuessOutcome::Solved) => {
            vec![Line::from(Span::styled("Correct guess!", green))]
        }
        Notice::MonsterDefeated {
            monster,
            word,
            next,
        } => {
            let mut lines = vec![
                Line::from(Span::styled(
                    format!("You completed the word: {word}!"),
                    green,
                )),
                Line::from(format!("CONGRATULATIONS! You defeated the {monster}!")),
            ];
            if let Some(next) = next {
                lines.push(Line::from(format!("Next Monster: {next}")));
            }
            lines
        }
    }
}

fn game_over_headline(view: &ViewModel) -> String {
    let monster = view.monster.as_deref().unwrap_or("monster");
    match view.game_over {
        Some(GameOverReason::TimedOut) => format!("TIME'S UP! The {monster} overwhelmed you!"),
        Some(GameOverReason::Defeated) => {
            format!("You ran out of hearts! The {monster} defeats you!")
        }
        Some(GameOverReason::Victory) => {
            "You have defeated all the monsters! You are the ultimate WordCrusader!".to_string()
        }
        Some(GameOverReason::PoolExhausted) => "No more words available!".to_string(),
        None => String::new(),
    }
}

fn game_over_lines(view: &ViewModel) -> Vec<Line<'static>> {
    let headline_style = match view.game_over {
        Some(GameOverReason::Victory) => Style::default().patch(bold()).fg(Color::Green),
        _ => Style::default().patch(bold()).fg(Color::Red),
    };

    let mut lines = Vec::new();
    if let Some(notice @ Notice::MonsterDefeated { .. }) = &view.notice {
        lines.extend(notice_lines(notice));
        lines.push(Line::default());
    }
    lines.extend([
        Line::from(Span::styled(game_over_headline(view), headline_style)),
        Line::default(),
        Line::from(Span::styled("GAME OVER", bold())),
        Line::from(format!("Final Score: {}", view.score)),
    ]);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challenge::MaskedWord;
    use ratatui::backend::TestBackend;

    fn view(screen: Screen) -> ViewModel {
        ViewModel {
            screen,
            game_over: None,
            monster: None,
            hearts: 7,
            max_hearts: 7,
            time_left: 60,
            time_limit_secs: 60,
            score: 0,
            masked_word: None,
            guessed_letters: Vec::new(),
            notice: None,
        }
    }

    fn draw(view: &ViewModel) -> String {
        let mut display = TerminalDisplay::new(TestBackend::new(100, 30)).unwrap();
        display.render(view).unwrap();
        let buffer = display.terminal().backend().buffer();
        buffer.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_title_screen() {
        let content = draw(&view(Screen::Title));
        assert!(content.contains("WELCOME TO WORDCRUSADER"));
        assert!(content.contains("You have 60 seconds and 7 hearts per monster."));
        assert!(content.contains("(p)lay / (q)uit"));
    }

    #[test]
    fn test_playing_screen() {
        let mut v = view(Screen::Playing);
        v.monster = Some("Goblin".into());
        v.hearts = 5;
        v.time_left = 42;
        v.score = 435;
        v.masked_word = Some(MaskedWord {
            cells: vec![Some('o'), None, Some('c')],
        });
        v.guessed_letters = vec!['c', 'o', 'x'];
        v.notice = Some(Notice::Guess(GuessOutcome::Miss {
            hearts_remaining: 5,
        }));

        let content = draw(&v);
        assert!(content.contains("Goblin"));
        assert!(content.contains("♥♥♥♥♥♡♡  5/7"));
        assert!(content.contains("42s"));
        assert!(content.contains("435"));
        assert!(content.contains("o _ c"));
        assert!(content.contains("c o x"));
        assert!(content.contains("Incorrect guess!"));
    }

    #[test]
    fn test_monster_defeated_notice() {
        let mut v = view(Screen::Playing);
        v.notice = Some(Notice::MonsterDefeated {
            monster: "Bat".into(),
            word: "bat".into(),
            next: Some("Goblin".into()),
        });
        let content = draw(&v);
        assert!(content.contains("You completed the word: bat!"));
        assert!(content.contains("You defeated the Bat!"));
        assert!(content.contains("Next Monster: Goblin"));
    }

    #[test]
    fn test_game_over_screens() {
        let mut v = view(Screen::GameOver);
        v.monster = Some("Imp".into());
        v.score = 940;

        v.game_over = Some(GameOverReason::TimedOut);
        let content = draw(&v);
        assert!(content.contains("TIME'S UP! The Imp overwhelmed you!"));
        assert!(content.contains("Final Score: 940"));
        assert!(content.contains("(r)estart / (q)uit"));

        v.game_over = Some(GameOverReason::Defeated);
        assert!(draw(&v).contains("The Imp defeats you!"));

        v.game_over = Some(GameOverReason::Victory);
        assert!(draw(&v).contains("You are the ultimate WordCrusader!"));

        v.game_over = Some(GameOverReason::PoolExhausted);
        assert!(draw(&v).contains("No more words available!"));
    }

    #[test]
    fn test_hearts_bar() {
        assert_eq!(hearts_bar(7, 7), "♥♥♥♥♥♥♥  7/7");
        assert_eq!(hearts_bar(0, 3), "♡♡♡  0/3");
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut display = TerminalDisplay::new(TestBackend::new(12, 4)).unwrap();
        display.render(&view(Screen::Title)).unwrap();
        display.render(&view(Screen::Playing)).unwrap();
    }
}

mod clock;
mod palette;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use kuromi::{display::format_total_time, inputs::Field};

use crate::App;
use clock::AnalogClock;
use palette::Palette;

const HORIZONTAL_MARGIN: u16 = 2;
const NOTIFICATION_WIDTH: u16 = 44;
const SETTINGS_WIDTH: u16 = 40;

const FIELDS: [Field; 3] = [Field::Hours, Field::Minutes, Field::Seconds];

/// `width` x `height` rectangle centred in `area`, clipped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let view = self.view();
        let settings = self.session.settings();
        let palette = Palette::for_mode(settings.dark_mode);

        let base = Style::default().fg(palette.fg).bg(palette.bg);
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let muted = Style::default().fg(palette.muted);

        let frame = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.accent))
            .title(" Kuromi Focus Timer ")
            .title_alignment(Alignment::Center)
            .style(base);
        let inner = frame.inner(area);
        frame.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(1), // status
                Constraint::Length(3), // countdown
                Constraint::Length(1), // progress
                Constraint::Length(1), // motivation
                Constraint::Length(3), // duration fields
                Constraint::Min(6),    // clock + stats
                Constraint::Length(1), // legend
            ])
            .split(inner);

        let status_color = palette.status(view.status);
        Paragraph::new(Span::styled(
            view.status_text(),
            Style::default().fg(status_color).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        Paragraph::new(Span::styled(
            view.countdown.as_str(),
            bold.fg(status_color),
        ))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(muted),
        )
        .render(chunks[1], buf);

        Gauge::default()
            .gauge_style(Style::default().fg(palette.gauge).bg(palette.bg))
            .ratio(view.progress.clamp(0.0, 1.0))
            .label(format!("{:.0}%", view.progress * 100.0))
            .render(chunks[2], buf);

        Paragraph::new(Span::styled(
            view.motivation.as_str(),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[3], buf);

        self.render_fields(chunks[4], buf, &palette);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[5]);

        if let Some(face) = &view.clock {
            AnalogClock {
                face,
                block: Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(muted)
                    .title(format!(" {} ", face.digital))
                    .title_alignment(Alignment::Center),
                rim: palette.muted,
                hands: palette.fg,
                second_hand: palette.accent,
            }
            .render(bottom[0], buf);
        } else {
            Paragraph::new(Span::styled("focus in progress", muted))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(muted),
                )
                .render(bottom[0], buf);
        }

        let stats_lines = vec![
            Line::from(vec![
                Span::styled("Total focus  ", muted),
                Span::styled(view.stats.total_time.as_str(), bold),
            ]),
            Line::from(vec![
                Span::styled("Sessions     ", muted),
                Span::styled(view.stats.completed.to_string(), bold),
            ]),
            Line::from(vec![
                Span::styled("Streak       ", muted),
                Span::styled(format!("{} day(s)", view.stats.streak), bold),
            ]),
        ];
        Paragraph::new(stats_lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(muted)
                    .title(" Stats "),
            )
            .render(bottom[1], buf);

        let legend = if view.inputs_enabled {
            "(space) start  (tab) edit  (1-9) preset  (ctrl+s) settings  (q) quit"
        } else {
            "(space) pause/resume  (esc) stop  (ctrl+s) settings  (ctrl+c) quit"
        };
        Paragraph::new(Span::styled(legend, muted.add_modifier(Modifier::ITALIC)))
            .alignment(Alignment::Center)
            .render(chunks[6], buf);

        if let Some(note) = &view.notification {
            let width = (note.message.width() as u16 + 4)
                .max(NOTIFICATION_WIDTH / 2)
                .min(NOTIFICATION_WIDTH)
                .min(area.width);
            let popup = Rect::new(area.x + area.width - width, area.y + 1, width, 3).intersection(area);
            Clear.render(popup, buf);
            let color = palette.notification(note.kind);
            Paragraph::new(Span::styled(note.message.as_str(), bold.fg(color)))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(color))
                        .style(base),
                )
                .render(popup, buf);
        }

        if self.settings_open {
            self.render_settings(area, buf, &palette);
        }
    }
}

impl App {
    fn render_fields(&self, area: Rect, buf: &mut Buffer, palette: &Palette) {
        let inputs = self.session.inputs();
        let enabled = self.view().inputs_enabled;
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(area);

        for (field, col) in FIELDS.iter().zip(cols.iter()) {
            let focused = self.focus == Some(*field);
            let border = if focused {
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.muted)
            };
            let mut text = Style::default().fg(palette.fg);
            if !enabled {
                text = text.add_modifier(Modifier::DIM);
            }
            let value = if focused {
                format!("{}_", inputs.get(*field))
            } else {
                inputs.get(*field).to_string()
            };

            Paragraph::new(Span::styled(value, text))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(border)
                        .title(format!(" {} ", field.label())),
                )
                .render(*col, buf);
        }
    }

    fn render_settings(&self, area: Rect, buf: &mut Buffer, palette: &Palette) {
        let settings = self.session.settings();
        let on_off = |on: bool| if on { "On" } else { "Off" };
        let key = Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD);

        let mut lines = vec![
            Line::from(vec![
                Span::styled("(s) ", key),
                Span::raw(format!("Sound: {}", on_off(settings.sound_enabled))),
            ]),
            Line::from(vec![
                Span::styled("(d) ", key),
                Span::raw(format!("Dark mode: {}", on_off(settings.dark_mode))),
            ]),
            Line::from(Span::styled(
                format!(
                    "    Tick bell: {} (config only)",
                    on_off(self.tick_bell)
                ),
                Style::default().fg(palette.muted),
            )),
            Line::from(""),
        ];
        lines.extend(self.presets.iter().take(9).enumerate().map(|(idx, &secs)| {
            Line::from(vec![
                Span::styled(format!("({}) ", idx + 1), key),
                Span::raw(format!("Preset {}", format_total_time(secs))),
            ])
        }));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "(ctrl+s) close  (esc) stop",
            Style::default()
                .fg(palette.muted)
                .add_modifier(Modifier::ITALIC),
        )));

        let popup = centered(area, SETTINGS_WIDTH, lines.len() as u16 + 2);
        Clear.render(popup, buf);
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(palette.accent))
                    .title(" Settings ")
                    .style(Style::default().fg(palette.fg).bg(palette.bg)),
            )
            .render(popup, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuromi::{
        config::Config,
        surface::{NotificationKind, Presentation},
    };
    use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Terminal};
    use std::time::Instant;

    fn create_test_app(minutes: u64) -> App {
        let config = Config {
            minutes,
            ..Config::default()
        };
        App::new(&config, Instant::now())
    }

    fn rendered(app: &App, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_ui_shows_countdown_and_status() {
        let app = create_test_app(25);
        let text = rendered(&app, 80, 30);
        assert!(text.contains("25:00"));
        assert!(text.contains("Ready to focus!"));
        assert!(text.contains("Stats"));
        assert!(text.contains("hours"));
    }

    #[test]
    fn test_ui_settings_panel() {
        let mut app = create_test_app(25);
        assert!(!rendered(&app, 80, 30).contains("Dark mode"));
        app.settings_open = true;
        let text = rendered(&app, 80, 30);
        assert!(text.contains("Sound: On"));
        assert!(text.contains("Dark mode: Off"));
        assert!(text.contains("Preset 5m"));
        assert!(text.contains("Tick bell: Off"));
    }

    #[test]
    fn test_ui_notification_popup() {
        let mut app = create_test_app(25);
        app.session
            .presentation_mut()
            .on_notification(7, "Please set a time", NotificationKind::Error);
        assert!(rendered(&app, 80, 30).contains("Please set a time"));
        app.session.presentation_mut().on_notification_dismissed(7);
        assert!(!rendered(&app, 80, 30).contains("Please set a time"));
    }

    #[test]
    fn test_ui_running_replaces_clock_panel() {
        let mut app = create_test_app(25);
        assert!(!rendered(&app, 80, 30).contains("focus in progress"));
        app.session.start(Instant::now());
        assert!(rendered(&app, 80, 30).contains("focus in progress"));
    }

    #[test]
    fn test_ui_focused_field_has_cursor() {
        let mut app = create_test_app(25);
        app.focus = Some(Field::Minutes);
        assert!(rendered(&app, 80, 30).contains("25_"));
    }

    #[test]
    fn test_ui_small_area_does_not_panic() {
        let mut app = create_test_app(25);
        app.settings_open = true;
        app.session
            .presentation_mut()
            .on_notification(1, "Session Complete! Great job studying!", NotificationKind::Success);
        let _ = rendered(&app, 20, 5);
    }

    #[test]
    fn test_ui_draws_through_terminal() {
        let app = create_test_app(1);
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| f.render_widget(&app, f.area())).unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("01:00"));
    }
}

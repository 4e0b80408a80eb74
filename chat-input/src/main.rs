mod cmdline;
mod configure;

use chatline::{ActivationHandler, DatagramSender, Dispatch, EditRequest, SendButton, TextArea};
use configure::Config;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use eyre::WrapErr;
use log::{error, info, LevelFilter};
use std::{
    fs::File,
    io::{self, Write},
    path::Path,
};
use tui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

// Inner size of the text area, in cells. The window never resizes.
const TEXT_WIDTH: u16 = 50;
const TEXT_HEIGHT: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Text,
    Button,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Edit(EditRequest),
    ToggleFocus,
    Activate,
    Quit,
}

struct App {
    button: SendButton<DatagramSender>,
    text_area: TextArea,
    focus: Focus,
    should_quit: bool,
}

/// Cuts `area` down to what fits on screen. Empty when it starts off screen.
fn clip(area: Rect, size: Rect) -> Rect {
    if area.x >= size.right() || area.y >= size.bottom() {
        return Rect::default();
    }
    Rect {
        width: area.width.min(size.right().saturating_sub(area.x)),
        height: area.height.min(size.bottom().saturating_sub(area.y)),
        ..area
    }
}

/// Text area and button rectangles, anchored top-left and clipped to the terminal.
fn window_layout(size: Rect) -> (Rect, Rect) {
    let text = Rect::new(1, 1, TEXT_WIDTH + 2, TEXT_HEIGHT + 2);
    let button = Rect::new(1, text.y + text.height, TEXT_WIDTH + 2, 3);
    (clip(text, size), clip(button, size))
}

/// Bordered widgets need at least one cell inside the border.
fn has_interior(area: Rect) -> bool {
    area.width > 2 && area.height > 2
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn draw<B: Backend>(app: &App, f: &mut Frame<B>) {
    let (text_rect, button_rect) = window_layout(f.size());

    // Message box, scrolled so the cursor stays visible
    let (row, col) = app.text_area.cursor();
    let scroll_y = (row as u16).saturating_sub(TEXT_HEIGHT - 1);
    let scroll_x = (col as u16).saturating_sub(TEXT_WIDTH - 1);
    let text = app.text_area.lines().join("\n");
    let input = Paragraph::new(text.as_str())
        .style(focus_style(app.focus == Focus::Text))
        .scroll((scroll_y, scroll_x))
        .block(Block::default().borders(Borders::ALL).title("Message"));
    if has_interior(text_rect) {
        f.render_widget(input, text_rect);
    }

    // Send button
    let label = SendButton::<DatagramSender>::LABEL;
    let pad = (button_rect.width.saturating_sub(2) as usize).saturating_sub(label.len()) / 2;
    let button = Paragraph::new(format!("{:pad$}{}", "", label, pad = pad))
        .style(focus_style(app.focus == Focus::Button))
        .block(Block::default().borders(Borders::ALL));
    if has_interior(button_rect) {
        f.render_widget(button, button_rect);
    }

    if app.focus == Focus::Text && has_interior(text_rect) {
        f.set_cursor(
            (text_rect.x + 1 + col as u16 - scroll_x).min(text_rect.right() - 2),
            (text_rect.y + 1 + row as u16 - scroll_y).min(text_rect.bottom() - 2),
        );
    }
}

fn to_action(event: Event, focus: Focus, button: Rect) -> Option<Action> {
    match event {
        Event::Key(KeyEvent {
            code, modifiers, ..
        }) => {
            let ctrl = modifiers.contains(KeyModifiers::CONTROL);
            match (code, focus) {
                (KeyCode::Esc, _) => Some(Action::Quit),
                (KeyCode::Char('c'), _) if ctrl => Some(Action::Quit),
                (KeyCode::Char('s'), _) if ctrl => Some(Action::Activate),
                (KeyCode::Tab | KeyCode::BackTab, _) => Some(Action::ToggleFocus),
                (KeyCode::Enter | KeyCode::Char(' '), Focus::Button) => Some(Action::Activate),
                (_, Focus::Button) => None,
                (KeyCode::Char(_), Focus::Text) if ctrl => None,
                (KeyCode::Char(c), Focus::Text) => Some(Action::Edit(EditRequest::Insert(c))),
                (KeyCode::Enter, Focus::Text) => Some(Action::Edit(EditRequest::Newline)),
                (KeyCode::Backspace, Focus::Text) => Some(Action::Edit(EditRequest::DeletePrev)),
                (KeyCode::Delete, Focus::Text) => Some(Action::Edit(EditRequest::DeleteNext)),
                (KeyCode::Left, Focus::Text) => Some(Action::Edit(EditRequest::Left)),
                (KeyCode::Right, Focus::Text) => Some(Action::Edit(EditRequest::Right)),
                (KeyCode::Up, Focus::Text) => Some(Action::Edit(EditRequest::Up)),
                (KeyCode::Down, Focus::Text) => Some(Action::Edit(EditRequest::Down)),
                (KeyCode::Home, Focus::Text) => Some(Action::Edit(EditRequest::Home)),
                (KeyCode::End, Focus::Text) => Some(Action::Edit(EditRequest::End)),
                _ => None,
            }
        }
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) if contains(button, column, row) => Some(Action::Activate),
        _ => None,
    }
}

impl App {
    fn apply(&mut self, action: Action) {
        match action {
            Action::Edit(req) => {
                self.text_area.handle(req);
            }
            Action::ToggleFocus => {
                self.focus = match self.focus {
                    Focus::Text => Focus::Button,
                    Focus::Button => Focus::Text,
                }
            }
            Action::Activate => match self.button.activate(&mut self.text_area) {
                Ok(Dispatch::Sent(len)) => info!("sent {} byte message", len),
                Ok(Dispatch::Empty) => {}
                Err(err) => error!("{:#}", eyre::Report::new(err)),
            },
            Action::Quit => self.should_quit = true,
        }
    }
}

fn restore_terminal(out: &mut impl Write) -> Result<(), io::Error> {
    execute!(out, LeaveAlternateScreen, DisableMouseCapture, cursor::Show)
}

/// Raw mode and the alternate screen, undone on drop. Also runs while unwinding a panic.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self, io::Error> {
        enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = disable_raw_mode() {
            error!("cannot leave raw mode: {}", err);
        }
        if let Err(err) = restore_terminal(&mut io::stdout()) {
            error!("cannot restore terminal: {}", err);
        }
    }
}

fn run(app: &mut App) -> Result<(), io::Error> {
    let _guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    run_draw_loop(&mut terminal, app)
}

fn run_draw_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), io::Error> {
    loop {
        terminal.draw(|f| draw(app, f))?;

        let (_, button_rect) = window_layout(terminal.size()?);
        if let Some(action) = to_action(event::read()?, app.focus, button_rect) {
            app.apply(action);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn init_logging(log_file: Option<&Path>) -> eyre::Result<()> {
    let mut builder = env_logger::Builder::new();
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .wrap_err_with(|| format!("Cannot create log file {}", path.display()))?;
            builder
                .filter_level(LevelFilter::Info)
                .parse_default_env()
                .target(env_logger::Target::Pipe(Box::new(file)));
        }
        // The terminal belongs to the UI; stay quiet unless asked.
        None => {
            builder.filter_level(LevelFilter::Off).parse_default_env();
        }
    }
    builder.try_init()?;
    Ok(())
}

fn main() -> eyre::Result<()> {
    let command = cmdline::register_args();
    let config = Config::try_from(command.get_matches())?;

    init_logging(config.log_file.as_deref())?;

    let sender = DatagramSender::bind(&config.sender).wrap_err("Cannot open UDP socket")?;
    info!("sending to {}", sender.destination());

    let mut app = App {
        button: SendButton::new(sender),
        text_area: TextArea::default(),
        focus: Focus::Text,
        should_quit: false,
    };

    run(&mut app).wrap_err("Terminal failure")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatline::{DatagramListener, SenderConfig, TextSurface};
    use std::net::{Ipv4Addr, SocketAddr};
    use std::time::Duration;
    use tui::backend::TestBackend;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn app_sending_to(destination: SocketAddr) -> App {
        let sender = DatagramSender::bind(&SenderConfig {
            destination,
            ..SenderConfig::default()
        })
        .unwrap();
        App {
            button: SendButton::new(sender),
            text_area: TextArea::default(),
            focus: Focus::Text,
            should_quit: false,
        }
    }

    fn render(app: &App, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(app, f)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer.get(x, y).symbol.as_str())
                    .collect()
            })
            .collect()
    }

    fn button_rect() -> Rect {
        window_layout(Rect::new(0, 0, 80, 24)).1
    }

    #[test]
    fn layout_is_fixed_size() {
        let (text, button) = window_layout(Rect::new(0, 0, 200, 60));
        assert_eq!(text, Rect::new(1, 1, 52, 12));
        assert_eq!(button, Rect::new(1, 13, 52, 3));
        assert_eq!(window_layout(Rect::new(0, 0, 80, 24)), (text, button));
    }

    #[test]
    fn layout_clips_to_small_terminals() {
        let (text, button) = window_layout(Rect::new(0, 0, 80, 10));
        assert_eq!(text, Rect::new(1, 1, 52, 9));
        assert_eq!(button.area(), 0);

        let (text, button) = window_layout(Rect::new(0, 0, 30, 14));
        assert_eq!(text, Rect::new(1, 1, 29, 12));
        assert_eq!(button, Rect::new(1, 13, 29, 1));
        assert!(!has_interior(button));

        let (text, button) = window_layout(Rect::new(0, 0, 1, 1));
        assert_eq!((text.area(), button.area()), (0, 0));
    }

    #[test]
    fn draws_message_box_and_send_button() {
        let mut app = app_sending_to(SocketAddr::from((Ipv4Addr::LOCALHOST, 12888)));
        app.text_area = TextArea::from("hello");

        let lines = render(&app, 80, 24);
        assert!(lines[1].contains("Message"));
        assert!(lines[2].contains("hello"));
        assert!(lines[14].contains("Send"));
    }

    #[test]
    fn draws_in_terminals_smaller_than_the_window() {
        let mut app = app_sending_to(SocketAddr::from((Ipv4Addr::LOCALHOST, 12888)));
        app.text_area = TextArea::from("a\nb\nc\nd\ne\nf\ng\nh\ni\nj\nk\nl");

        let lines = render(&app, 80, 10);
        assert!(lines[1].contains("Message"));
        assert!(lines.iter().all(|line| !line.contains("Send")));

        render(&app, 1, 1);
        render(&app, 20, 15);
    }

    #[test]
    fn restore_leaves_alternate_screen() {
        let mut out = Vec::new();
        restore_terminal(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("\x1b[?1049l"), "{out:?}");
        assert!(out.contains("\x1b[?25h"), "{out:?}");
    }

    #[test]
    fn enter_means_newline_in_text_and_send_on_button() {
        let button = button_rect();
        assert_eq!(
            to_action(key(KeyCode::Enter), Focus::Text, button),
            Some(Action::Edit(EditRequest::Newline))
        );
        assert_eq!(
            to_action(key(KeyCode::Enter), Focus::Button, button),
            Some(Action::Activate)
        );
    }

    #[test]
    fn shortcuts_work_from_anywhere() {
        let button = button_rect();
        for focus in [Focus::Text, Focus::Button] {
            assert_eq!(to_action(ctrl('s'), focus, button), Some(Action::Activate));
            assert_eq!(to_action(ctrl('c'), focus, button), Some(Action::Quit));
            assert_eq!(to_action(key(KeyCode::Esc), focus, button), Some(Action::Quit));
            assert_eq!(
                to_action(key(KeyCode::Tab), focus, button),
                Some(Action::ToggleFocus)
            );
        }
        assert_eq!(to_action(ctrl('x'), Focus::Text, button), None);
    }

    #[test]
    fn typing_is_ignored_while_button_has_focus() {
        assert_eq!(
            to_action(key(KeyCode::Char('a')), Focus::Button, button_rect()),
            None
        );
    }

    #[test]
    fn clicking_the_button_sends() {
        let button = button_rect();
        assert_eq!(
            to_action(click(button.x + 3, button.y + 1), Focus::Text, button),
            Some(Action::Activate)
        );
        assert_eq!(to_action(click(3, 3), Focus::Text, button), None);
    }

    #[test]
    fn typed_message_is_sent_and_cleared() {
        let mut listener =
            DatagramListener::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, 0))).unwrap();
        listener
            .set_read_timeout(Some(Duration::from_secs(2)))
            .unwrap();
        let mut app = app_sending_to(listener.local_addr().unwrap());

        let button = button_rect();
        for event in [
            key(KeyCode::Char('h')),
            key(KeyCode::Char('i')),
            key(KeyCode::Enter),
            key(KeyCode::Tab),
            key(KeyCode::Enter),
        ] {
            let action = to_action(event, app.focus, button).unwrap();
            app.apply(action);
        }

        assert_eq!(listener.recv().unwrap().text, "hi");
        assert_eq!(app.text_area.text(), "");
        assert_eq!(app.focus, Focus::Button);
    }
}

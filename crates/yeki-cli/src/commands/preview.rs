use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::info;

use yeki_core::scroll::ScrollConfigExt;
use yeki_core::{AppConfig, StaticPage};
use yeki_tui::{
    event::{AppEvent, EventHandler},
    input::{handle_key_event, Action},
    widgets::{NavBarWidget, PageViewWidget, StatusBarWidget},
    App,
};

/// Rows taken by the nav bar and the status bar
const CHROME_ROWS: u16 = 2;

pub async fn run(config: Arc<AppConfig>, path: &Path) -> Result<()> {
    let page = super::load_page(path)?;
    info!(page = %path.display(), elements = page.elements.len(), "starting preview");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Yeki preview"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &config, page).await;

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

async fn run_loop<B: Backend>(terminal: &mut Terminal<B>, config: &AppConfig, page: StaticPage) -> Result<()> {
    let mut app = App::new(page, config);
    let size = terminal.size()?;
    app.set_viewport_rows(size.height.saturating_sub(CHROME_ROWS));
    app.install();

    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();
    let reader = EventHandler::new(config.preview.tick_rate_ms).spawn(tx);

    let origin = Instant::now();
    let mut frames = frame_interval(config);

    loop {
        terminal.draw(|frame| draw(frame, &app))?;

        tokio::select! {
            event = rx.recv() => match event {
                Some(AppEvent::Key(key)) => {
                    let action = handle_key_event(key);
                    apply_action(&mut app, action, origin);
                }
                Some(AppEvent::Wheel(rows)) => app.scroll_rows(rows),
                Some(AppEvent::Resize(_, height)) => {
                    app.set_viewport_rows(height.saturating_sub(CHROME_ROWS));
                }
                Some(AppEvent::Tick) => {}
                None => break,
            },
            _ = frames.tick(), if app.needs_fast_update() => {
                app.tick(origin.elapsed());
            }
        }

        if app.should_quit {
            break;
        }
    }

    drop(rx);
    reader.shutdown().await;
    info!("preview closed");
    Ok(())
}

/// Clock for animation frames; late frames are skipped, not replayed
fn frame_interval(config: &AppConfig) -> Interval {
    let mut frames = tokio::time::interval(config.scroll.animation_tick_duration());
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    frames
}

fn apply_action(app: &mut App, action: Action, origin: Instant) {
    match action {
        Action::Quit => app.quit(),
        Action::ScrollDown => app.scroll_rows(1),
        Action::ScrollUp => app.scroll_rows(-1),
        Action::ScrollHalfPageDown => app.scroll_half_page(true),
        Action::ScrollHalfPageUp => app.scroll_half_page(false),
        Action::ScrollPageDown => app.scroll_page(true),
        Action::ScrollPageUp => app.scroll_page(false),
        Action::JumpToTop => app.jump_to_top(),
        Action::JumpToBottom => app.jump_to_bottom(),
        Action::NextLink => app.next_link(),
        Action::PrevLink => app.prev_link(),
        Action::SelectLink(index) => {
            app.select_link(index);
            app.click_selected(origin.elapsed());
        }
        Action::Click => app.click_selected(origin.elapsed()),
        Action::None => {}
    }
}

fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    NavBarWidget::render(frame, chunks[0], app);
    PageViewWidget::render(frame, chunks[1], app);
    StatusBarWidget::render(frame, chunks[2], app);
}

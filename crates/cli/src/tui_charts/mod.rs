mod screens;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use retvol_analytics::ChartSpec;
use std::io;

/// Chart viewer state
pub struct App {
    pub charts: Vec<ChartSpec>,
    pub selected: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(charts: Vec<ChartSpec>) -> Self {
        Self {
            charts,
            selected: 0,
            should_quit: false,
        }
    }

    pub fn current(&self) -> Option<&ChartSpec> {
        self.charts.get(self.selected)
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyCode) {
        let count = self.charts.len();
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') if count > 0 => {
                self.selected = (self.selected + 1) % count;
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') if count > 0 => {
                self.selected = (self.selected + count - 1) % count;
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                if index < count {
                    self.selected = index;
                }
            }
            _ => {}
        }
    }
}

/// Shows the charts until the user quits.
///
/// # Errors
/// Returns an error if the terminal cannot be set up, drawn to, or restored.
pub fn run(charts: Vec<ChartSpec>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(charts);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| screens::render(f, app))?;

        if event::poll(std::time::Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

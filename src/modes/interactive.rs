use std::io::Error;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyCode, KeyModifiers};
use crossterm::style::Stylize;

use crate::libs::config::Settings;
use crate::libs::terminal::{
    clear_line, clear_screen, disable_bracketed_paste, disable_raw_mode, draw_lock,
    enable_bracketed_paste, enable_raw_mode, enter_alternate_screen, get_screen_size, hide_cursor,
    leave_alternate_screen, print_at, screen_height, screen_width, set_screen_size, show_cursor,
};
use crate::libs::watcher::InputWatcher;
use crate::libs::windows::results::ResultsPane;

const PROMPT: &str = "search> ";
const INPUT_ROW: u16 = 1;

fn init() -> Result<(), Error> {
    hide_cursor()?;
    enter_alternate_screen()?;
    clear_screen()?;
    enable_raw_mode()?;
    enable_bracketed_paste()?;
    get_screen_size()?;
    Ok(())
}

fn restore() -> Result<(), Error> {
    disable_bracketed_paste()?;
    disable_raw_mode()?;
    show_cursor()?;
    leave_alternate_screen()
}

pub async fn interactive_mode(settings: &Settings) -> anyhow::Result<()> {
    tracing::info!("starting interactive mode against {}", settings.base_url);
    init()?;
    let result = run(settings).await;
    restore()?;
    println!("Exiting...");
    result
}

async fn run(settings: &Settings) -> anyhow::Result<()> {
    let pane = Arc::new(ResultsPane::new());
    let mut watcher = InputWatcher::new(settings, pane.clone())?;

    let min_chars = settings.min_chars;
    redraw(&pane, watcher.text(), min_chars)?;
    loop {
        if !poll(Duration::from_millis(500))? {
            continue;
        }
        match read()? {
            Event::Key(event)
                if event.code == KeyCode::Esc
                    || event.code == KeyCode::Char('c') && event.modifiers == KeyModifiers::CONTROL =>
            {
                if watcher.cancel().await {
                    tracing::debug!("dropped pending query {:?}", watcher.text());
                }
                return Ok(());
            }
            Event::Key(event) if event.code == KeyCode::Down && event.modifiers == KeyModifiers::CONTROL => {
                pane.scroll_by(5);
                draw_input(watcher.text())?;
            }
            Event::Key(event) if event.code == KeyCode::Up && event.modifiers == KeyModifiers::CONTROL => {
                pane.scroll_by(-5);
                draw_input(watcher.text())?;
            }
            Event::Key(event) if event.code == KeyCode::Down => {
                pane.scroll_by(1);
                draw_input(watcher.text())?;
            }
            Event::Key(event) if event.code == KeyCode::Up => {
                pane.scroll_by(-1);
                draw_input(watcher.text())?;
            }
            Event::Key(event) => {
                if watcher.handle_key(event).await {
                    draw_input(watcher.text())?;
                }
            }
            Event::Paste(text) => {
                let text = format!("{}{}", watcher.text(), text.replace(['\r', '\n'], " "));
                watcher.set_text(&text).await;
                draw_input(watcher.text())?;
            }
            Event::Resize(width, height) => {
                set_screen_size(width as usize, height as usize);
                pane.fit_to_screen();
                redraw(&pane, watcher.text(), min_chars)?;
            }
            _ => (),
        }
    }
}

fn redraw(pane: &ResultsPane, text: &str, min_chars: usize) -> Result<(), Error> {
    clear_screen()?;
    print_help(min_chars)?;
    pane.redraw();
    draw_input(text)
}

/// Redraws the edit line with a caret at its end. Only the tail of the text
/// is shown when it does not fit.
fn draw_input(text: &str) -> Result<(), Error> {
    let room = screen_width().saturating_sub(PROMPT.len() + 1);
    let count = text.chars().count();
    let visible: String = text.chars().skip(count.saturating_sub(room)).collect();

    let _drawing = draw_lock();
    clear_line(INPUT_ROW)?;
    print_at(
        0,
        INPUT_ROW,
        &format!("{}{}{}", PROMPT.bold().blue(), visible, "_".slow_blink()),
    )
}

fn print_help(min_chars: usize) -> Result<(), Error> {
    let help = format!(
        "Type at least {} to search, {} to clear",
        format!("{} characters", min_chars).stylize().yellow().bold(),
        "CTRL+U".stylize().green().bold()
    );
    let _drawing = draw_lock();
    print_at(0, 0, &help)?;
    let scroll_help = "↑/↓ scroll, CTRL+↑/↓ scroll faster, ESC or CTRL+C to exit";
    print_at(
        screen_width().saturating_sub(scroll_help.chars().count()) as u16,
        screen_height().saturating_sub(1) as u16,
        scroll_help,
    )
}

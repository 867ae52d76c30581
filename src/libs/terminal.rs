use std::io::{stdout, Error, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::{execute, queue};
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};

static SCREEN_WIDTH: AtomicUsize = AtomicUsize::new(80);
static SCREEN_HEIGHT: AtomicUsize = AtomicUsize::new(24);
static DRAW_LOCK: Mutex<()> = Mutex::new(());

/// Held for a whole pane or edit line redraw, so a render finishing on
/// another task cannot move the cursor halfway through.
pub fn draw_lock() -> MutexGuard<'static, ()> {
    DRAW_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

pub fn write_at<W: Write>(out: &mut W, x: u16, y: u16, text: &str) -> Result<(), Error> {
    queue!(out, MoveTo(x, y), Print(text))?;
    out.flush()
}

pub fn print_at(x: u16, y: u16, text: &str) -> Result<(), Error> {
    let mut out = stdout().lock();
    write_at(&mut out, x, y, text)
}

pub fn clear_line(y: u16) -> Result<(), Error> {
    let mut out = stdout().lock();
    queue!(out, MoveTo(0, y), Clear(ClearType::CurrentLine))?;
    out.flush()
}

pub fn clear_screen() -> Result<(), Error> {
    execute!(stdout(), Clear(ClearType::All))
}

pub fn enter_alternate_screen() -> Result<(), Error> {
    execute!(stdout(), EnterAlternateScreen)
}

pub fn leave_alternate_screen() -> Result<(), Error> {
    execute!(stdout(), LeaveAlternateScreen)
}

pub fn hide_cursor() -> Result<(), Error> {
    execute!(stdout(), Hide)
}

pub fn show_cursor() -> Result<(), Error> {
    execute!(stdout(), Show)
}

pub fn enable_bracketed_paste() -> Result<(), Error> {
    execute!(stdout(), EnableBracketedPaste)
}

pub fn disable_bracketed_paste() -> Result<(), Error> {
    execute!(stdout(), DisableBracketedPaste)
}

pub fn enable_raw_mode() -> Result<(), Error> {
    crossterm::terminal::enable_raw_mode()
}

pub fn disable_raw_mode() -> Result<(), Error> {
    crossterm::terminal::disable_raw_mode()
}

pub fn get_screen_size() -> Result<(), Error> {
    let (width, height) = crossterm::terminal::size()?;
    set_screen_size(width as usize, height as usize);
    Ok(())
}

pub fn set_screen_size(width: usize, height: usize) {
    SCREEN_WIDTH.store(width, Ordering::SeqCst);
    SCREEN_HEIGHT.store(height, Ordering::SeqCst);
}

pub fn screen_width() -> usize {
    SCREEN_WIDTH.load(Ordering::SeqCst)
}

pub fn screen_height() -> usize {
    SCREEN_HEIGHT.load(Ordering::SeqCst)
}

#[test]
fn move_and_text_are_written_together() {
    let mut out = Vec::new();
    write_at(&mut out, 2, 3, "hi").unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "\x1b[4;3Hhi");
}

#[test]
fn draw_lock_excludes_other_threads() {
    let guard = draw_lock();
    let blocked = std::thread::spawn(|| DRAW_LOCK.try_lock().is_err())
        .join()
        .unwrap();
    assert!(blocked);
    drop(guard);
    assert!(std::thread::spawn(|| DRAW_LOCK.try_lock().is_ok()).join().unwrap());
}

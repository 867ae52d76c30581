use std::sync::{Mutex, MutexGuard};

use chrono::Local;
use serde_json::Value;

use crate::libs::payload::{describe, render_rows};
use crate::libs::terminal::{screen_height, screen_width};
use crate::libs::ui::window::{Window, WindowAttr};
use crate::libs::view::ResultView;

pub const RESULTS_TOP: usize = 3;

/// The output container of the interactive mode.
pub struct ResultsPane {
    window: Mutex<Window>,
}

impl ResultsPane {
    pub fn new() -> Self {
        let window = Window::with_attrs(vec![
            WindowAttr::Title(Some("results".to_string())),
            WindowAttr::Highlight(true),
        ]);
        let pane = ResultsPane {
            window: Mutex::new(window),
        };
        pane.fit_to_screen();
        pane
    }

    fn window(&self) -> MutexGuard<'_, Window> {
        self.window.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn fit_to_screen(&self) {
        let mut window = self.window();
        window
            .update_attribute(WindowAttr::Top(RESULTS_TOP))
            .update_attribute(WindowAttr::Left(0))
            .update_attribute(WindowAttr::Width(screen_width()))
            .update_attribute(WindowAttr::Height(
                screen_height().saturating_sub(RESULTS_TOP + 1),
            ));
    }

    pub fn redraw(&self) {
        if let Err(e) = self.window().draw() {
            tracing::warn!("could not draw results: {}", e);
        }
    }

    pub fn scroll_by(&self, offset: isize) {
        let mut window = self.window();
        window.scroll_by(offset);
        if let Err(e) = window.draw() {
            tracing::warn!("could not draw results: {}", e);
        }
    }

    fn replace(&self, rows: Vec<String>, footer: Option<String>) {
        let mut window = self.window();
        window
            .update_attribute(WindowAttr::Content(rows))
            .update_attribute(WindowAttr::Footer(footer));
        if let Err(e) = window.draw() {
            tracing::warn!("could not draw results: {}", e);
        }
    }
}

impl ResultView for ResultsPane {
    fn show(&self, payload: &Value) {
        let footer = format!("{} at {}", describe(payload), Local::now().format("%H:%M:%S"));
        self.replace(render_rows(payload), Some(footer));
    }

    fn clear(&self) {
        self.replace(Vec::new(), None);
    }
}

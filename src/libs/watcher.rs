use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::config::Settings;
use super::debounce::Debouncer;
use super::dispatch::{DispatchError, Dispatcher};
use super::view::ResultView;

/// Owns the edited text and forwards every change to the debounced dispatcher.
pub struct InputWatcher {
    text: String,
    debouncer: Debouncer,
    dispatcher: Arc<Dispatcher>,
    view: Arc<dyn ResultView>,
}

impl InputWatcher {
    pub fn new(settings: &Settings, view: Arc<dyn ResultView>) -> Result<Self, DispatchError> {
        Ok(InputWatcher {
            text: String::new(),
            debouncer: Debouncer::new(settings.delay),
            dispatcher: Arc::new(Dispatcher::new(settings)?),
            view,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the whole value, as a paste or a line read from stdin would.
    pub async fn set_text(&mut self, value: &str) {
        if self.text == value {
            return;
        }
        self.text = value.to_string();
        self.forward().await;
    }

    /// Applies a key press to the text. Returns whether the text changed.
    pub async fn handle_key(&mut self, event: KeyEvent) -> bool {
        match edit(&self.text, event) {
            Some(text) => {
                self.text = text;
                self.forward().await;
                true
            }
            None => false,
        }
    }

    /// Lets the last change fire and its request complete.
    pub async fn settle(&self) {
        self.debouncer.settle().await;
    }

    /// Drops a change that has not fired yet. Requests already sent still land.
    pub async fn cancel(&self) -> bool {
        self.debouncer.cancel().await
    }

    async fn forward(&self) {
        let dispatcher = self.dispatcher.clone();
        let view = self.view.clone();
        let text = self.text.clone();
        self.debouncer
            .schedule(async move { dispatcher.dispatch(text, view).await })
            .await;
    }
}

pub fn edit(text: &str, event: KeyEvent) -> Option<String> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    let mut text = text.to_string();
    match event.code {
        KeyCode::Char('u') if event.modifiers == KeyModifiers::CONTROL => {
            if text.is_empty() {
                return None;
            }
            text.clear();
        }
        KeyCode::Char(_) if event.modifiers.contains(KeyModifiers::CONTROL) => return None,
        KeyCode::Char(c) => text.push(c),
        KeyCode::Backspace => {
            text.pop()?;
        }
        _ => return None,
    }
    Some(text)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::http::StatusCode;
    use crossterm::event::KeyEventState;

    use super::*;
    use crate::libs::test_server::TestServer;
    use crate::libs::view::testing::{RecordingView, Rendered};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn typing_appends() {
        assert_eq!(edit("ab", press(KeyCode::Char('c'))), Some("abc".to_string()));
    }

    #[test]
    fn backspace_removes_last_char() {
        assert_eq!(edit("café", press(KeyCode::Backspace)), Some("caf".to_string()));
        assert_eq!(edit("", press(KeyCode::Backspace)), None);
    }

    #[test]
    fn ctrl_u_clears_line() {
        assert_eq!(edit("abc", ctrl('u')), Some(String::new()));
        assert_eq!(edit("", ctrl('u')), None);
    }

    #[test]
    fn other_keys_do_nothing() {
        assert_eq!(edit("abc", press(KeyCode::Left)), None);
        assert_eq!(edit("abc", ctrl('x')), None);
        let release = KeyEvent {
            code: KeyCode::Char('d'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(edit("abc", release), None);
    }

    #[tokio::test]
    async fn burst_of_keys_sends_one_request_with_last_value() {
        let server = TestServer::spawn(StatusCode::OK, r#"{"items":[1,2]}"#).await;
        let view = Arc::new(RecordingView::default());
        let settings = Settings::new(&server.base_url, 300, 3).unwrap();
        let mut watcher = InputWatcher::new(&settings, view.clone()).unwrap();

        for c in ['a', 'b', 'c', 'd'] {
            assert!(watcher.handle_key(press(KeyCode::Char(c))).await);
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        watcher.settle().await;

        assert_eq!(watcher.text(), "abcd");
        assert_eq!(server.queries(), vec!["query=abcd"]);
        assert_eq!(
            view.events(),
            vec![Rendered::Rows(vec!["1".to_string(), "2".to_string()])]
        );
    }

    #[tokio::test]
    async fn settling_on_short_text_only_clears() {
        let server = TestServer::spawn(StatusCode::OK, r#"{"items":[]}"#).await;
        let view = Arc::new(RecordingView::default());
        let settings = Settings::new(&server.base_url, 300, 3).unwrap();
        let mut watcher = InputWatcher::new(&settings, view.clone()).unwrap();

        watcher.set_text("abc").await;
        watcher.handle_key(press(KeyCode::Backspace)).await;
        watcher.settle().await;

        assert!(server.queries().is_empty());
        assert_eq!(view.events(), vec![Rendered::Cleared]);
    }

    #[tokio::test]
    async fn unchanged_value_is_not_forwarded() {
        let server = TestServer::spawn(StatusCode::OK, r#"{"items":[]}"#).await;
        let view = Arc::new(RecordingView::default());
        let settings = Settings::new(&server.base_url, 300, 3).unwrap();
        let mut watcher = InputWatcher::new(&settings, view.clone()).unwrap();

        watcher.set_text("apple").await;
        watcher.settle().await;
        watcher.set_text("apple").await;
        watcher.settle().await;

        assert_eq!(server.queries(), vec!["query=apple"]);
    }
}

use std::io::{stdout, Write};
use std::sync::Mutex;

use serde_json::Value;

use super::payload::render_rows;

/// Where dispatch results land. `show` replaces whatever was rendered before,
/// `clear` leaves the output empty.
pub trait ResultView: Send + Sync {
    fn show(&self, payload: &Value);
    fn clear(&self);
}

/// Line mode output: rows go to stdout, a clear prints a separator.
pub struct PrintView {
    separator: String,
    lock: Mutex<()>,
}

impl PrintView {
    pub fn new(separator: &str) -> Self {
        PrintView {
            separator: separator.to_string(),
            lock: Mutex::new(()),
        }
    }

    fn write_rows(&self, rows: &[String]) {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut out = stdout().lock();
        let result = rows
            .iter()
            .try_for_each(|row| writeln!(out, "{}", row))
            .and_then(|_| out.flush());
        if let Err(e) = result {
            tracing::warn!("could not write results: {}", e);
        }
    }
}

impl ResultView for PrintView {
    fn show(&self, payload: &Value) {
        let mut rows = vec![self.separator.clone()];
        rows.extend(render_rows(payload));
        self.write_rows(&rows);
    }

    fn clear(&self) {
        self.write_rows(&[self.separator.clone()]);
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use serde_json::Value;

    use super::ResultView;
    use crate::libs::payload::render_rows;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Rendered {
        Rows(Vec<String>),
        Cleared,
    }

    /// Keeps every callback invocation in order.
    #[derive(Default)]
    pub struct RecordingView {
        pub events: Mutex<Vec<Rendered>>,
    }

    impl RecordingView {
        pub fn events(&self) -> Vec<Rendered> {
            self.events.lock().unwrap().clone()
        }
    }

    impl ResultView for RecordingView {
        fn show(&self, payload: &Value) {
            self.events
                .lock()
                .unwrap()
                .push(Rendered::Rows(render_rows(payload)));
        }

        fn clear(&self) {
            self.events.lock().unwrap().push(Rendered::Cleared);
        }
    }
}

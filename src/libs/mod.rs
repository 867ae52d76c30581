pub mod config;
pub mod debounce;
pub mod dispatch;
pub mod logging;
pub mod payload;
pub mod syntax_highlight;
pub mod terminal;
pub mod ui;
pub mod view;
pub mod watcher;
pub mod windows;

#[cfg(test)]
pub mod test_server;

use std::sync::Arc;

use tokio::io::{stdin, AsyncBufReadExt, BufReader};

use crate::libs::config::Settings;
use crate::libs::view::PrintView;
use crate::libs::watcher::InputWatcher;

/// Each stdin line replaces the input value. Results go to stdout, one row
/// per line, after a `---` separator.
pub(crate) async fn classic_mode(settings: &Settings) -> anyhow::Result<()> {
    tracing::info!("starting line mode against {}", settings.base_url);
    let view = Arc::new(PrintView::new("---"));
    let mut watcher = InputWatcher::new(settings, view)?;

    let mut lines = BufReader::new(stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        watcher.set_text(line.trim_end_matches('\r')).await;
    }

    watcher.settle().await;
    Ok(())
}

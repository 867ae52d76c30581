#[macro_use]
extern crate lazy_static;

pub(crate) mod libs;
mod modes;
mod server;

use std::path::PathBuf;

use clap::Parser;

use self::libs::config::{ServerSettings, Settings, DEFAULT_DELAY_MS, DEFAULT_MIN_CHARS, DEFAULT_URL};
use self::libs::logging;
use self::modes::classic::classic_mode;
use self::modes::interactive::interactive_mode;
use self::modes::serve::serve_mode;

#[derive(Parser, Debug)]
#[command(version, about = "Search as you type against an HTTP endpoint", long_about = None)]
struct Opts {
    #[arg(short, long, default_value = DEFAULT_URL, help = "Endpoint queried with ?query=<text>")]
    url: String,

    #[arg(long, default_value_t = DEFAULT_DELAY_MS, help = "Quiet period before a query is sent")]
    delay_ms: u64,

    #[arg(long, default_value_t = DEFAULT_MIN_CHARS, help = "Shorter input clears the results")]
    min_chars: usize,

    #[arg(short, long, help = "Read queries from stdin, one per line")]
    classic: bool,

    #[arg(short, long, conflicts_with = "classic", help = "Serve the product search endpoint")]
    serve: bool,

    #[arg(long, default_value = "products.json", help = "Product catalog for --serve")]
    data: PathBuf,

    #[arg(short, long, env = "PORT", default_value_t = 1234, help = "Port for --serve")]
    port: u16,

    #[arg(long, default_value = "typeahead.log", help = "Log file of the interactive mode")]
    log_file: PathBuf,

    #[arg(long, default_value = "info", help = "Log level, RUST_LOG takes precedence")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opts: Opts = Opts::parse();

    if opts.serve {
        logging::init_stderr(&opts.log_level);
        let settings = ServerSettings {
            data_file: opts.data.clone(),
            port: opts.port,
        };
        return serve_mode(&settings).await;
    }

    let settings = Settings::new(&opts.url, opts.delay_ms, opts.min_chars)?;
    if opts.classic {
        logging::init_stderr(&opts.log_level);
        return classic_mode(&settings).await;
    }

    let _guard = logging::init_file(&opts.log_file, &opts.log_level);
    interactive_mode(&settings).await
}

#![forbid(unsafe_code)]

//! # Widget Gallery
//!
//! Browse the widget demos interactively, or print them without a terminal
//! session.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p gallery
//! cargo run -p gallery -- --seed 7 render heatmap
//! ```

use std::time::Duration;

use anyhow::Context;
use gallery::app::{self, App};
use gallery::cli::{Cli, Command};
use gallery::config::Config;
use gallery::messages::Page;
use gallery::{logging, program};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    let config = Config::from_cli(&cli)?;
    config.validate()?;
    logging::init(&config, cli.is_headless())?;

    match cli.command {
        Some(Command::List) => println!("{}", app::page_list()),
        Some(Command::Diagnostics) => println!("{}", config.to_diagnostic_string()),
        Some(Command::Render(args)) => {
            let pages = match args.page.as_deref() {
                Some(name) => vec![name.parse::<Page>()?],
                None => Page::ALL.to_vec(),
            };
            let rendered = pages
                .into_iter()
                .map(|page| {
                    app::render_page(page, &config, args.width, args.height)
                        .with_context(|| format!("rendering {page}"))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            println!("{}", rendered.join("\n\n"));
        }
        None => {
            let mut app = App::new(&config).context("building pages")?;
            program::run(
                &mut app,
                Duration::from_millis(config.tick_ms),
                config.alt_screen,
            )?;
        }
    }

    Ok(())
}

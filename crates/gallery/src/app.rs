//! Application state and routing for `gallery`.
//!
//! The [`App`] owns every page, the navigation cursor and the page that is
//! currently open. It knows nothing about the terminal: keys come in as
//! [`Key`] values and frames go out as strings.

use std::time::Duration;

use tracing::{debug, info};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;
use crate::messages::{Key, Page};
use crate::pages::Pages;
use crate::theme::Theme;

/// Width of the navigation column, in cells.
pub const SIDEBAR_WIDTH: usize = 20;

/// App title shown in the header.
pub const TITLE: &str = "Widget Gallery";

/// Navigation list plus the open page.
pub struct App {
    pages: Pages,
    theme: Theme,
    selected: usize,
    open: Option<Page>,
    quit: bool,
}

impl App {
    /// Creates the app from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a page cannot be built from `config`.
    pub fn new(config: &Config) -> gallery_core::Result<Self> {
        Ok(Self {
            pages: Pages::new(config)?,
            theme: Theme::new(config.use_color()),
            selected: 0,
            open: None,
            quit: false,
        })
    }

    /// Replaces the theme.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Page under the navigation cursor.
    #[must_use]
    pub const fn selected(&self) -> Page {
        Page::ALL[self.selected]
    }

    /// Page currently open, if any.
    #[must_use]
    pub const fn open_page(&self) -> Option<Page> {
        self.open
    }

    /// Whether the user asked to leave.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handles one key press.
    pub fn handle_key(&mut self, key: Key) {
        if key == Key::Interrupt {
            self.quit = true;
            return;
        }

        if let Some(page) = self.open {
            if self.pages.get_mut(page).update(key) {
                return;
            }
            match key {
                Key::Esc | Key::Backspace => self.close(),
                Key::Char('q') => self.quit = true,
                _ => {}
            }
            return;
        }

        let count = Page::ALL.len();
        match key {
            Key::Down | Key::Char('j') | Key::Tab => self.selected = (self.selected + 1) % count,
            Key::Up | Key::Char('k') | Key::BackTab => {
                self.selected = (self.selected + count - 1) % count;
            }
            Key::Enter | Key::Right | Key::Char('l') => self.open(self.selected()),
            Key::Esc | Key::Char('q') => self.quit = true,
            _ => {}
        }
    }

    /// Opens `page` and moves the cursor to it.
    pub fn open(&mut self, page: Page) {
        if let Some(current) = self.open.take() {
            self.pages.get_mut(current).on_leave();
        }
        self.selected = page.index();
        self.open = Some(page);
        self.pages.get_mut(page).on_enter();
        info!(page = page.slug(), "page opened");
    }

    fn close(&mut self) {
        if let Some(page) = self.open.take() {
            self.pages.get_mut(page).on_leave();
            debug!(page = page.slug(), "page closed");
        }
    }

    /// Advances the open page's clock.
    pub fn tick(&mut self, elapsed: Duration) {
        if let Some(page) = self.open {
            self.pages.get_mut(page).tick(elapsed);
        }
    }

    /// The navigation list, one page per line, cursor marked with `>`.
    #[must_use]
    pub fn sidebar(&self) -> Vec<String> {
        Page::ALL
            .iter()
            .enumerate()
            .map(|(i, page)| {
                let marker = if i == self.selected { '>' } else { ' ' };
                let text = format!("{marker} {}", page.title());
                let pad = SIDEBAR_WIDTH.saturating_sub(text.width());
                let padded = format!("{text}{}", " ".repeat(pad));
                if i == self.selected {
                    self.theme.accent(&padded)
                } else {
                    padded
                }
            })
            .collect()
    }

    /// Renders a full frame.
    #[must_use]
    pub fn view(&self, width: usize, height: usize) -> String {
        let detail_width = width.saturating_sub(SIDEBAR_WIDTH + 2);
        let detail_height = height.saturating_sub(4);
        let (detail, hints) = match self.open {
            Some(page) => {
                let model = self.pages.get(page);
                (model.view(detail_width, detail_height, &self.theme), model.hints())
            }
            None => (
                self.theme
                    .muted(&format!("Press enter to open {}", self.selected().title())),
                "j/k move  enter open  q quit",
            ),
        };

        let sidebar = self.sidebar();
        let detail: Vec<&str> = detail.split('\n').collect();
        let rows = sidebar.len().max(detail.len());
        let blank = " ".repeat(SIDEBAR_WIDTH);

        let mut lines = Vec::with_capacity(rows + 3);
        lines.push(self.theme.title(TITLE));
        lines.push("─".repeat(width));
        for row in 0..rows {
            let left = sidebar.get(row).map_or(blank.as_str(), String::as_str);
            let right = detail.get(row).copied().unwrap_or("");
            lines.push(format!("{left}│ {right}").trim_end().to_string());
        }
        lines.push(self.theme.muted(hints));
        lines.join("\n")
    }
}

/// Renders one page without app chrome, for headless output.
///
/// # Errors
///
/// Returns an error if the pages cannot be built from `config`.
pub fn render_page(
    page: Page,
    config: &Config,
    width: usize,
    height: usize,
) -> gallery_core::Result<String> {
    let pages = Pages::new(config)?;
    let theme = Theme::new(config.use_color());
    Ok(pages.get(page).view(width, height, &theme))
}

/// Plain navigation list for the `list` subcommand.
#[must_use]
pub fn page_list() -> String {
    Page::ALL
        .iter()
        .map(|page| format!("{:<12} {}", page.slug(), page.title()))
        .collect::<Vec<_>>()
        .join("\n")
}

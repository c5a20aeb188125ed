//! Activity heat map page.

use chrono::{NaiveDate, Weekday};
use gallery_core::heatmap::{DayActivity, GridFiller, HeatMap, Intensity};
use tracing::info;

use super::{PageModel, heading};
use crate::config::Config;
use crate::data;
use crate::messages::{Key, Page};
use crate::theme::Theme;

/// Seven weeks of activity, one column per week.
pub struct HeatMapPage {
    filler: GridFiller,
    week_start: Weekday,
    today: NaiveDate,
    seed: u64,
    history: Vec<DayActivity>,
    map: HeatMap,
}

impl HeatMapPage {
    /// Creates the page with seeded history ending at the configured today.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid cannot be filled.
    pub fn new(config: &Config, seed: u64) -> gallery_core::Result<Self> {
        let filler = GridFiller::new(config.heatmap.columns, config.heatmap.rows)
            .week_start(config.week_start);
        let today = config.effective_today();
        let history = data::demo_activity(today, seed);
        let map = HeatMap::new(filler.fill(&history)?, filler.columns(), filler.rows());
        Ok(Self {
            filler,
            week_start: config.week_start,
            today,
            seed,
            history,
            map,
        })
    }

    /// The rendered grid model.
    #[must_use]
    pub const fn map(&self) -> &HeatMap {
        &self.map
    }

    /// The unpadded activity history.
    #[must_use]
    pub fn history(&self) -> &[DayActivity] {
        &self.history
    }

    fn reseed(&mut self) {
        self.seed = self.seed.wrapping_add(1);
        let history = data::demo_activity(self.today, self.seed);
        match self.filler.fill(&history) {
            Ok(filled) => {
                self.map = HeatMap::new(filled, self.filler.columns(), self.filler.rows());
                self.history = history;
                info!(seed = self.seed, "heat map reseeded");
            }
            Err(err) => tracing::error!(%err, "couldn't refill heat map"),
        }
    }
}

impl PageModel for HeatMapPage {
    fn update(&mut self, key: Key) -> bool {
        match key {
            Key::Char('r') => {
                self.reseed();
                true
            }
            _ => false,
        }
    }

    fn view(&self, _width: usize, _height: usize, theme: &Theme) -> String {
        let mut out = heading(theme, Page::HeatMap.title());
        out.push('\n');
        out.push_str(&self.map.render_with(|intensity, glyph| theme.intensity(intensity, glyph)));
        out.push_str("\n\n");

        let legend: Vec<String> = [
            Intensity::Empty,
            Intensity::Low,
            Intensity::Medium,
            Intensity::High,
            Intensity::Max,
        ]
        .into_iter()
        .map(|i| theme.intensity(i, i.glyph()))
        .collect();
        out.push_str(&format!(
            "{} {} {}\n",
            theme.muted("Less"),
            legend.join(" "),
            theme.muted("More")
        ));

        let total: u32 = self.history.iter().map(|d| d.count).sum();
        if let (Some(first), Some(last)) = (self.map.data().first(), self.map.data().last()) {
            out.push_str(&format!(
                "{} to {}, weeks start {}\n",
                first.date,
                last.date,
                self.week_start
            ));
        }
        out.push_str(&format!(
            "{} contributions in the last {} days",
            total,
            self.history.len()
        ));
        out
    }

    fn page(&self) -> Page {
        Page::HeatMap
    }

    fn hints(&self) -> &'static str {
        "r reseed  esc back  q quit"
    }
}

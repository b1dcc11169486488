//! Decorative banners shown on the home page

pub mod marquee;
pub mod rotating;

use ratatui::text::Line;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use self::marquee::{MarqueeBanner, TimedMarquee};
use self::rotating::RotatingBanner;
use crate::catalog::Catalog;
use crate::config::AppConfig;

/// A single banner message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerMessage {
    pub text: String,
    #[serde(default)]
    pub highlight: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl BannerMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlight: false,
            link: None,
        }
    }

    pub fn highlighted(mut self) -> Self {
        self.highlight = true;
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

/// Messages for the rotating banner when the config doesn't provide any
pub fn default_rotating_messages() -> Vec<BannerMessage> {
    vec![
        BannerMessage::new("New: Mortgage calculator with full amortization schedule")
            .highlighted()
            .with_link("calculator:mortgage"),
        BannerMessage::new("Popular this week: BMI and body fat calculators")
            .with_link("category:health"),
        BannerMessage::new("Browse every calculator from the (a)ll listing"),
        BannerMessage::new("Try the (d)ate range demo to count days between dates"),
    ]
}

/// Messages for the width-timed marquee
pub fn default_marquee_messages() -> Vec<String> {
    vec![
        "Tax season is here: estimate your refund with the Income Tax calculator".to_string(),
        "Planning a trip? The date range demo counts nights and weekdays for you".to_string(),
        "Compound interest, loans and savings goals live under Finance".to_string(),
    ]
}

/// Rendered width of a line of text in terminal cells
pub fn text_width(text: &str) -> u16 {
    Line::raw(text).width().min(u16::MAX as usize) as u16
}

/// Banners owned by the home page. They are created when the page is shown
/// and dropped (timers included) when the user navigates away.
#[derive(Debug)]
pub struct HomeBanners {
    pub rotating: RotatingBanner,
    pub featured: MarqueeBanner,
    pub ticker: TimedMarquee,
}

impl HomeBanners {
    pub fn mount(config: &AppConfig, catalog: &Catalog, now: Instant) -> Self {
        let messages = if config.banner_messages.is_empty() {
            default_rotating_messages()
        } else {
            config.banner_messages.clone()
        };

        let ticker_messages = if config.marquee_messages.is_empty() {
            default_marquee_messages()
        } else {
            config.marquee_messages.clone()
        };

        let popular: Vec<&str> = catalog.popular().iter().map(|c| c.name.as_str()).collect();
        let featured_text = if popular.is_empty() {
            String::new()
        } else {
            format!("Popular right now: {}", popular.join("  ·  "))
        };

        tracing::debug!("Mounting home banners ({} rotating messages)", messages.len());

        Self {
            rotating: RotatingBanner::new(
                messages,
                Duration::from_millis(config.rotation_period_ms),
                now,
            ),
            featured: MarqueeBanner::new(featured_text, config.marquee_speed),
            ticker: TimedMarquee::new(ticker_messages),
        }
    }

    /// Measure both marquees against the viewport. The featured marquee sits
    /// inside a bordered box, the ticker spans the full width.
    pub fn measure(&mut self, viewport_width: u16, now: Instant) {
        let featured_width = text_width(self.featured.text());
        self.featured
            .measure(viewport_width.saturating_sub(2), featured_width, now);

        let ticker_width = self.ticker.current().map(text_width).unwrap_or(0);
        self.ticker.measure(viewport_width, ticker_width, now);
    }

    pub fn tick(&mut self, viewport_width: u16, now: Instant) {
        self.rotating.tick(now);
        self.measure(viewport_width, now);
        self.featured.advance(now);

        let index = self.ticker.index();
        self.ticker.advance(now);
        if self.ticker.index() != index {
            tracing::trace!("Ticker moved to message {}", self.ticker.index());
        }
    }
}

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::path::PathBuf;
use std::time::Instant;

use crate::banner::HomeBanners;
use crate::catalog::{Calculator, Catalog};
use crate::config::AppConfig;
use crate::daterange::DateRangeDemo;
use crate::error::CatalogError;
use crate::theme::{Theme, ThemeMode};
use crate::widgets::clock::Clock;
use crate::widgets::Deferred;

/// Status messages clear after this many seconds
const STATUS_SECONDS: u64 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Home,
    Categories,
    Category(String),
    AllCalculators,
    Calculator(String),
    DateRange,
    NotFound { kind: &'static str, id: String },
}

impl Page {
    /// Resolve a route such as `home`, `all`, `category:finance` or
    /// `calculator:loan`. Lookups against the catalog happen on navigation.
    pub fn from_route(route: &str) -> Self {
        let route = route.trim();
        match route.split_once(':') {
            Some(("category", id)) => Page::Category(id.to_string()),
            Some(("calculator", id)) => Page::Calculator(id.to_string()),
            _ => match route {
                "" | "home" => Page::Home,
                "categories" => Page::Categories,
                "all" => Page::AllCalculators,
                "dates" | "date-range" => Page::DateRange,
                other => Page::NotFound {
                    kind: "page",
                    id: other.to_string(),
                },
            },
        }
    }

    pub fn title(&self) -> String {
        match self {
            Page::Home => "Home".to_string(),
            Page::Categories => "Categories".to_string(),
            Page::Category(id) => format!("Category: {}", id),
            Page::AllCalculators => "All Calculators".to_string(),
            Page::Calculator(id) => format!("Calculator: {}", id),
            Page::DateRange => "Date Range".to_string(),
            Page::NotFound { .. } => "Not Found".to_string(),
        }
    }
}

impl From<CatalogError> for Page {
    fn from(err: CatalogError) -> Self {
        match err.missing() {
            Some((kind, id)) => Page::NotFound {
                kind,
                id: id.to_string(),
            },
            None => Page::NotFound {
                kind: "page",
                id: err.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
}

/// Something selectable on a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Category(String),
    Calculator(String),
}

pub struct App {
    pub catalog: Catalog,
    pub config: AppConfig,

    pub page: Page,
    pub popup: Popup,
    history: Vec<(Page, usize)>,
    pub selected: usize,

    // Home page banners, mounted only while the home page is shown
    pub home: Option<HomeBanners>,
    pub clock: Clock,
    pub date_demo: DateRangeDemo,

    // Theme
    pub theme_mode: Deferred<ThemeMode>,
    pub theme: Theme,

    // Status message (shown in the header, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,

    pub viewport_width: u16,
    persist_config: bool,
}

impl App {
    pub async fn new(
        catalog_path: Option<PathBuf>,
        theme_override: Option<ThemeMode>,
        start: Option<&str>,
    ) -> Result<Self> {
        let config = AppConfig::load().await.unwrap_or_default();

        let catalog = match catalog_path.or_else(|| config.catalog.clone()) {
            Some(path) => Catalog::load(&path).await?,
            None => Catalog::builtin(),
        };

        let mut app = Self::with_parts(config, catalog, Instant::now());
        app.persist_config = theme_override.is_none();
        if let Some(mode) = theme_override {
            app.apply_theme(mode);
        }
        if let Some(route) = start {
            app.navigate(Page::from_route(route));
            app.history.clear();
        }
        Ok(app)
    }

    /// Build an app from already loaded parts. Nothing is written back to disk.
    pub fn with_parts(config: AppConfig, catalog: Catalog, now: Instant) -> Self {
        let mut app = Self {
            clock: Clock::new(config.show_clock, now),
            home: Some(HomeBanners::mount(&config, &catalog, now)),
            date_demo: DateRangeDemo::new(chrono::Local::now().date_naive()),
            theme_mode: Deferred::Uninitialized,
            theme: Theme::default(),
            catalog,
            config,
            page: Page::Home,
            popup: Popup::None,
            history: Vec::new(),
            selected: 0,
            status_message: None,
            status_message_time: None,
            viewport_width: 0,
            persist_config: false,
        };
        app.load_theme_preference();
        app
    }

    fn load_theme_preference(&mut self) {
        let mode = self.config.theme.unwrap_or_default();
        self.apply_theme(mode);
    }

    fn apply_theme(&mut self, mode: ThemeMode) {
        self.theme_mode = Deferred::Ready(mode);
        self.theme = Theme::resolve(&self.theme_mode, self.config.accent.as_deref());
    }

    /// Set a status message (auto-clears after 3 seconds)
    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.popup == Popup::Help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter | KeyCode::Char('q')) {
                self.popup = Popup::None;
            }
            return Ok(());
        }

        if self.page == Page::DateRange && self.handle_date_key(key) {
            return Ok(());
        }

        match key.code {
            // Page switching
            KeyCode::Char('h') => self.navigate(Page::Home),
            KeyCode::Char('c') => self.navigate(Page::Categories),
            KeyCode::Char('a') => self.navigate(Page::AllCalculators),
            KeyCode::Char('d') => self.navigate(Page::DateRange),
            KeyCode::Esc | KeyCode::Backspace => self.back(),

            // Vertical navigation
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),
            KeyCode::Enter => self.open_selected(),

            // Widgets
            KeyCode::Char('t') => self.toggle_theme()?,
            KeyCode::Char('w') => self.clock.toggle(Instant::now()),
            KeyCode::Char('x') => self.dismiss_banner(),
            KeyCode::Char('l') => self.follow_banner_link(),

            KeyCode::Char('?') => self.popup = Popup::Help,

            _ => {}
        }
        Ok(())
    }

    /// Keys owned by the date range page. Returns true when consumed.
    fn handle_date_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Left => self.date_demo.shift(-1),
            KeyCode::Right => self.date_demo.shift(1),
            KeyCode::Up => self.date_demo.shift(-7),
            KeyCode::Down => self.date_demo.shift(7),
            KeyCode::Tab | KeyCode::BackTab => self.date_demo.toggle_focus(),
            _ => return false,
        }
        true
    }

    /// Show a page. Catalog lookups that miss turn into the not-found page.
    pub fn navigate(&mut self, page: Page) {
        let page = match page {
            Page::Category(id) => match self.catalog.category(&id) {
                Ok(_) => Page::Category(id),
                Err(e) => e.into(),
            },
            Page::Calculator(id) => match self.catalog.calculator(&id) {
                Ok(_) => Page::Calculator(id),
                Err(e) => e.into(),
            },
            other => other,
        };

        if page == self.page {
            return;
        }

        if let Page::NotFound { kind, id } = &page {
            tracing::info!("Lookup miss: {} '{}'", kind, id);
        }

        let previous = std::mem::replace(&mut self.page, page);
        self.history.push((previous, self.selected));
        self.selected = 0;
        self.sync_home(Instant::now());
    }

    pub fn back(&mut self) {
        if let Some((page, selected)) = self.history.pop() {
            self.page = page;
            self.selected = selected;
            self.sync_home(Instant::now());
        }
    }

    /// Mount the home banners when the home page is shown, drop them otherwise
    fn sync_home(&mut self, now: Instant) {
        match (&self.page, self.home.is_some()) {
            (Page::Home, false) => {
                let mut banners = HomeBanners::mount(&self.config, &self.catalog, now);
                banners.measure(self.viewport_width, now);
                self.home = Some(banners);
            }
            (Page::Home, true) => {}
            (_, true) => self.home = None,
            (_, false) => {}
        }
    }

    /// Entries the cursor can select on the current page
    pub fn entries(&self) -> Vec<Entry> {
        let calculators = |list: Vec<&Calculator>| -> Vec<Entry> {
            list.into_iter().map(|c| Entry::Calculator(c.id.clone())).collect()
        };

        match &self.page {
            Page::Home => {
                let mut featured = self.catalog.popular();
                featured.extend(self.catalog.newest());
                calculators(featured)
            }
            Page::Categories => self
                .catalog
                .categories()
                .iter()
                .map(|c| Entry::Category(c.id.clone()))
                .collect(),
            Page::Category(id) => match self.catalog.category(id) {
                Ok(view) => calculators(view.calculators),
                Err(_) => Vec::new(),
            },
            Page::AllCalculators => calculators(self.catalog.calculators().iter().collect()),
            Page::Calculator(_) | Page::DateRange | Page::NotFound { .. } => Vec::new(),
        }
    }

    fn move_down(&mut self) {
        let len = self.entries().len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn open_selected(&mut self) {
        match self.entries().get(self.selected).cloned() {
            Some(Entry::Category(id)) => self.navigate(Page::Category(id)),
            Some(Entry::Calculator(id)) => self.navigate(Page::Calculator(id)),
            None => {}
        }
    }

    fn toggle_theme(&mut self) -> Result<()> {
        let mode = self.theme_mode.or(ThemeMode::default()).toggled();
        self.apply_theme(mode);
        self.config.theme = Some(mode);

        if self.persist_config {
            if let Err(e) = self.config.save() {
                tracing::warn!("Failed to save theme preference: {}", e);
                self.set_status(format!("Theme not saved: {}", e));
                return Ok(());
            }
        }
        self.set_status(format!("Theme → {}", mode.label()));
        Ok(())
    }

    fn dismiss_banner(&mut self) {
        if let Some(home) = self.home.as_mut() {
            if home.rotating.current().is_some() {
                home.rotating.dismiss();
                self.set_status("Banner dismissed");
            }
        }
    }

    fn follow_banner_link(&mut self) {
        let link = self
            .home
            .as_ref()
            .and_then(|home| home.rotating.current())
            .and_then(|message| message.link.clone());

        if let Some(link) = link {
            self.navigate(Page::from_route(&link));
        }
    }

    /// Viewport-resize notification
    pub fn on_resize(&mut self, width: u16) {
        self.viewport_width = width;
        if let Some(home) = self.home.as_mut() {
            home.measure(width, Instant::now());
        }
    }

    pub fn tick(&mut self, now: Instant) {
        if let Some(home) = self.home.as_mut() {
            home.tick(self.viewport_width, now);
        }

        self.clock.tick(now, chrono::Local::now);

        // Clear status message after 3 seconds
        if let Some(time) = self.status_message_time {
            if now.saturating_duration_since(time).as_secs() >= STATUS_SECONDS {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::timer::TimerState;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn calc(id: &str, category: &str, is_popular: bool) -> Calculator {
        Calculator {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            category: category.to_string(),
            icon: String::new(),
            is_new: false,
            is_popular,
        }
    }

    fn app() -> App {
        let catalog = Catalog::new(
            vec![
                Category {
                    id: "finance".to_string(),
                    name: "Finance".to_string(),
                    description: String::new(),
                    icon: String::new(),
                },
                Category {
                    id: "math".to_string(),
                    name: "Math".to_string(),
                    description: String::new(),
                    icon: String::new(),
                },
            ],
            vec![calc("loan", "finance", true), calc("factorial", "math", false)],
        );
        App::with_parts(AppConfig::default(), catalog, Instant::now())
    }

    #[test]
    fn test_route_parsing() {
        assert_eq!(Page::from_route("home"), Page::Home);
        assert_eq!(Page::from_route("all"), Page::AllCalculators);
        assert_eq!(Page::from_route("category:finance"), Page::Category("finance".to_string()));
        assert_eq!(Page::from_route("calculator:loan"), Page::Calculator("loan".to_string()));
        assert_eq!(
            Page::from_route("pricing"),
            Page::NotFound { kind: "page", id: "pricing".to_string() }
        );
    }

    #[test]
    fn test_category_miss_shows_not_found() {
        let mut app = app();
        app.navigate(Page::Category("geometry".to_string()));
        assert_eq!(
            app.page,
            Page::NotFound { kind: "category", id: "geometry".to_string() }
        );
        assert!(app.entries().is_empty());

        app.back();
        assert_eq!(app.page, Page::Home);
    }

    #[test]
    fn test_open_category_from_listing() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('c'))).unwrap();
        assert_eq!(app.page, Page::Categories);

        app.handle_key(key(KeyCode::Down)).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.page, Page::Category("math".to_string()));
        assert_eq!(app.entries(), vec![Entry::Calculator("factorial".to_string())]);

        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.page, Page::Calculator("factorial".to_string()));

        app.handle_key(key(KeyCode::Esc)).unwrap();
        app.handle_key(key(KeyCode::Esc)).unwrap();
        assert_eq!(app.page, Page::Categories);
        assert_eq!(app.selected, 1, "Selection restored on back");
    }

    #[test]
    fn test_all_listing_is_full_catalog_in_order() {
        let mut app = app();
        app.navigate(Page::AllCalculators);
        assert_eq!(
            app.entries(),
            vec![
                Entry::Calculator("loan".to_string()),
                Entry::Calculator("factorial".to_string()),
            ]
        );
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut app = app();
        app.navigate(Page::AllCalculators);
        for _ in 0..5 {
            app.handle_key(key(KeyCode::Down)).unwrap();
        }
        assert_eq!(app.selected, 1);
        for _ in 0..5 {
            app.handle_key(key(KeyCode::Up)).unwrap();
        }
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_leaving_home_unmounts_banners() {
        let mut app = app();
        app.on_resize(80);
        assert!(app.home.is_some());

        app.handle_key(key(KeyCode::Char('x'))).unwrap();
        let home = app.home.as_ref().unwrap();
        assert!(home.rotating.current().is_none());
        assert_eq!(home.rotating.state(), TimerState::Stopped);

        app.navigate(Page::AllCalculators);
        assert!(app.home.is_none(), "Banners dropped with the page");

        app.navigate(Page::Home);
        let home = app.home.as_ref().unwrap();
        assert!(home.rotating.current().is_some(), "Remount shows the banner again");
        assert_eq!(home.featured.state(), TimerState::Running, "Remount measures immediately");
    }

    #[test]
    fn test_banner_link_navigates() {
        let mut app = app();
        // First default message links to a calculator missing from this catalog
        app.handle_key(key(KeyCode::Char('l'))).unwrap();
        assert_eq!(
            app.page,
            Page::NotFound { kind: "calculator", id: "mortgage".to_string() }
        );
    }

    #[test]
    fn test_theme_toggle() {
        let mut app = app();
        assert_eq!(app.theme_mode, Deferred::Ready(ThemeMode::Dark));

        app.handle_key(key(KeyCode::Char('t'))).unwrap();
        assert_eq!(app.theme_mode, Deferred::Ready(ThemeMode::Light));
        assert_eq!(app.config.theme, Some(ThemeMode::Light));
        assert_eq!(app.theme, Theme::for_mode(ThemeMode::Light));
    }

    #[test]
    fn test_date_page_keys() {
        let mut app = app();
        app.navigate(Page::DateRange);
        let before = app.date_demo.range();

        app.handle_key(key(KeyCode::Down)).unwrap();
        // Start moves a week forward and drags the end with it
        assert_eq!(app.date_demo.range().start(), before.start() + chrono::Duration::days(7));
        assert_eq!(app.date_demo.range().days(), 1);

        app.handle_key(key(KeyCode::Char('h'))).unwrap();
        assert_eq!(app.page, Page::Home, "Global keys still work");
    }
}

use std::sync::Arc;
use std::time::{Duration, Instant};

use classy_core::{Config, LocalStorage, LOCATION_KEY};
use classy_weather::WeatherClient;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::keys::{enter_clears_query, KeyAction, KeySubscription, Keyboard};
use crate::model::{FetchRequest, WeatherModel};
use crate::services::{request_fetch, WeatherServiceMessage};

const SPINNER_INTERVAL: Duration = Duration::from_millis(120);

/// Top-level component: owns the model, the search input and the
/// window-wide Enter subscription.
pub struct App {
    pub title: String,
    pub model: WeatherModel,

    /// Whether typed characters go into the search input
    pub input_focused: bool,

    /// Set by Ctrl+C
    pub should_exit: bool,

    pub spinner_frame: usize,
    last_spinner_update: Instant,

    storage: LocalStorage,
    client: Arc<WeatherClient>,
    keyboard: Keyboard,
    enter_subscription: Option<KeySubscription>,
    in_flight: Option<CancellationToken>,
    tx: mpsc::UnboundedSender<WeatherServiceMessage>,
    rx: mpsc::UnboundedReceiver<WeatherServiceMessage>,
}

impl App {
    /// Build the app with the query restored from storage. Nothing is
    /// fetched until [`App::mount`].
    pub fn new(config: &Config, storage: LocalStorage, client: Arc<WeatherClient>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut model = WeatherModel::new(config.weather.min_query_len);
        model.restore_query(storage.get_item(LOCATION_KEY).unwrap_or_default());

        Self {
            title: config.ui.title.clone(),
            model,
            input_focused: true,
            should_exit: false,
            spinner_frame: 0,
            last_spinner_update: Instant::now(),
            storage,
            client,
            keyboard: Keyboard::new(),
            enter_subscription: None,
            in_flight: None,
            tx,
            rx,
        }
    }

    /// Install the Enter subscription and search for the restored query.
    /// Must run inside a tokio runtime.
    pub fn mount(&mut self) {
        self.enter_subscription = Some(self.keyboard.subscribe(enter_clears_query));
        self.persist_query();
        if let Some(request) = self.model.initial_request() {
            self.start(request);
        }
    }

    /// Remove the Enter subscription and abandon any lookup in flight.
    pub fn unmount(&mut self) {
        self.enter_subscription = None;
        self.cancel_in_flight();
    }

    pub fn is_mounted(&self) -> bool {
        self.enter_subscription.is_some()
    }

    /// The on-query-change hook: cancel, persist, refocus, then maybe search.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.model.query() {
            return;
        }

        self.cancel_in_flight();
        let request = self.model.set_query(query);
        self.persist_query();
        self.input_focused = true;

        if let Some(request) = request {
            self.start(request);
        }
    }

    fn start(&mut self, request: FetchRequest) {
        tracing::info!("Searching for {:?}", request.query);
        let cancel = CancellationToken::new();
        request_fetch(&self.tx, self.client.clone(), request, cancel.clone());
        self.in_flight = Some(cancel);
    }

    fn cancel_in_flight(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
    }

    fn persist_query(&mut self) {
        if let Err(e) = self.storage.set_item(LOCATION_KEY, self.model.query()) {
            tracing::warn!("{} ({})", e.user_message(), e);
        }
    }

    /// Handle a key press. Window-wide listeners run first; the input only
    /// sees keys they did not act on.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let actions = self.keyboard.dispatch(&key);
        if !actions.is_empty() {
            for action in actions {
                match action {
                    KeyAction::ClearQuery => self.set_query(""),
                }
            }
            return;
        }

        if !self.input_focused {
            if key.code == KeyCode::Tab {
                self.input_focused = true;
            }
            return;
        }

        match key.code {
            KeyCode::Char(_)
                if key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {}
            KeyCode::Char(c) => {
                let mut query = self.model.query().to_string();
                query.push(c);
                self.set_query(query);
            }
            KeyCode::Backspace => {
                let mut query = self.model.query().to_string();
                if query.pop().is_some() {
                    self.set_query(query);
                }
            }
            KeyCode::Esc => self.input_focused = false,
            _ => {}
        }
    }

    pub fn handle_exit_request(&mut self) {
        self.should_exit = true;
    }

    /// Drain finished lookups into the model and advance the spinner.
    pub fn tick(&mut self) {
        while let Ok(message) = self.rx.try_recv() {
            self.model.apply(message);
        }

        if self.model.is_loading() && self.last_spinner_update.elapsed() >= SPINNER_INTERVAL {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
            self.last_spinner_update = Instant::now();
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app(dir: &std::path::Path) -> App {
        let config = Config {
            config_dir: dir.to_path_buf(),
            ..Config::default()
        };
        // Unroutable endpoints: these tests never reach the network.
        let client = Arc::new(
            WeatherClient::new("http://127.0.0.1:9/search", "http://127.0.0.1:9/forecast")
                .unwrap(),
        );
        App::new(&config, LocalStorage::open(dir), client)
    }

    #[test]
    fn restores_query_from_storage() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = LocalStorage::open(dir.path());
        storage.set_item(LOCATION_KEY, "Lisbon").unwrap();

        let app = test_app(dir.path());
        assert_eq!(app.model.query(), "Lisbon");
        assert!(!app.model.is_loading());
    }

    #[test]
    fn typing_short_query_persists_without_fetching() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());

        app.handle_key(press(KeyCode::Char('B')));
        assert_eq!(app.model.query(), "B");
        assert!(!app.model.is_loading());
        assert!(app.in_flight.is_none());

        let reopened = LocalStorage::open(dir.path());
        assert_eq!(reopened.get_item(LOCATION_KEY), Some("B"));
    }

    #[test]
    fn enter_is_ignored_before_mount() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        app.handle_key(press(KeyCode::Char('X')));

        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.model.query(), "X");
    }

    #[tokio::test]
    async fn enter_clears_query_even_when_blurred() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        app.mount();

        app.set_query("Berlin");
        assert!(app.model.is_loading());
        let token = app.in_flight.clone().unwrap();

        app.handle_key(press(KeyCode::Esc));
        assert!(!app.input_focused);

        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.model.query(), "");
        assert!(!app.model.is_loading());
        assert!(token.is_cancelled());
        assert!(app.input_focused, "query change refocuses the input");
    }

    #[tokio::test]
    async fn blurred_input_ignores_characters_until_tab() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        app.mount();

        app.handle_key(press(KeyCode::Esc));
        app.handle_key(press(KeyCode::Char('a')));
        assert_eq!(app.model.query(), "");

        app.handle_key(press(KeyCode::Tab));
        app.handle_key(press(KeyCode::Char('a')));
        assert_eq!(app.model.query(), "a");
    }

    #[tokio::test]
    async fn new_query_cancels_previous_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        app.mount();

        app.set_query("Berlin");
        let first = app.in_flight.clone().unwrap();
        app.set_query("Berlin ");
        assert!(first.is_cancelled());
        assert!(!app.in_flight.as_ref().unwrap().is_cancelled());
    }

    #[tokio::test]
    async fn unmount_removes_subscription_and_cancels() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        app.mount();
        assert!(app.is_mounted());
        assert_eq!(app.keyboard.listener_count(), 1);

        app.set_query("Berlin");
        let token = app.in_flight.clone().unwrap();
        app.unmount();

        assert!(!app.is_mounted());
        assert_eq!(app.keyboard.listener_count(), 0);
        assert!(token.is_cancelled());
    }

    #[test]
    fn chords_do_not_type_into_query() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());

        app.handle_key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));
        app.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT));
        assert_eq!(app.model.query(), "");

        app.handle_key(KeyEvent::new(KeyCode::Char('O'), KeyModifiers::SHIFT));
        assert_eq!(app.model.query(), "O");
    }

    #[test]
    fn backspace_edits_query() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        app.handle_key(press(KeyCode::Char('a')));
        app.handle_key(press(KeyCode::Backspace));
        app.handle_key(press(KeyCode::Backspace));
        assert_eq!(app.model.query(), "");
    }
}

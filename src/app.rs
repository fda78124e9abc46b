//! Application state and core logic

use crate::config::QuoteConfig;
use crate::geo::Coordinate;
use crate::geocoding::{resolve_pair, GeocodeError, Geocoder, HttpGeocoder};
use crate::platform::has_shortcut_modifier;
use crate::pricing::format_price;
use crate::state::{
    Advance, FieldId, LookupRequest, LookupResolution, WizardState, WizardStep,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Finished address lookup, tagged with the ticket it was started for
#[derive(Debug)]
pub struct LookupOutcome {
    pub ticket: u64,
    pub result: Result<(Coordinate, Coordinate), GeocodeError>,
}

/// Main application struct
pub struct App {
    /// Wizard being filled in
    pub state: WizardState,
    /// Postal code resolver shared with lookup tasks
    geocoder: Arc<dyn Geocoder>,
    lookup_tx: UnboundedSender<LookupOutcome>,
    lookup_rx: UnboundedReceiver<LookupOutcome>,
    /// Whether the app should quit
    quit: bool,
    /// Feedback shown in the status bar
    pub status_message: Option<String>,
}

impl App {
    /// Create a new App instance talking to the configured services
    pub fn new(config: &QuoteConfig) -> Result<Self> {
        let geocoder = HttpGeocoder::new(config)?;
        Ok(Self::with_geocoder(Arc::new(geocoder)))
    }

    /// Create an App around any geocoder
    pub fn with_geocoder(geocoder: Arc<dyn Geocoder>) -> Self {
        let (lookup_tx, lookup_rx) = unbounded_channel();
        Self {
            state: WizardState::new(),
            geocoder,
            lookup_tx,
            lookup_rx,
            quit: false,
            status_message: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Close the wizard; any lookup still running is abandoned
    pub fn quit(&mut self) {
        self.state.reset();
        self.quit = true;
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Lookup error dialog is modal
        if self.state.lookup_error().is_some() {
            match key.code {
                KeyCode::Enter => self.advance(),
                KeyCode::Esc => self.state.dismiss_lookup_error(),
                _ => {}
            }
            return;
        }

        let shortcut = has_shortcut_modifier(key.modifiers);
        match key.code {
            KeyCode::Char('r') if shortcut => self.restart(),
            KeyCode::Char('s') if shortcut => self.advance(),
            _ if shortcut => {}
            KeyCode::Esc => self.retreat(),
            KeyCode::Enter => self.handle_enter(),
            KeyCode::Tab | KeyCode::Down => self.state.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.prev_field(),
            KeyCode::Right => self.state.select_next(),
            KeyCode::Left => self.state.select_prev(),
            KeyCode::Backspace => self.state.backspace(),
            KeyCode::Char(' ') if self.on_selector() => self.state.select_next(),
            KeyCode::Char(c) => self.state.input_char(c),
            _ => {}
        }
    }

    fn handle_enter(&mut self) {
        match self.state.step {
            WizardStep::Confirmation => self.restart(),
            _ if self.on_multiline() => self.state.input_char('\n'),
            _ => self.advance(),
        }
    }

    fn on_selector(&self) -> bool {
        self.state.active_field() == Some(FieldId::MoveType)
    }

    fn on_multiline(&self) -> bool {
        self.state
            .active_field()
            .is_some_and(|id| self.state.form.field(id).is_multiline)
    }

    /// Leave the current step, starting the address lookup when needed
    pub fn advance(&mut self) {
        match self.state.advance() {
            Advance::LookupStarted(request) => {
                self.status_message = Some("Looking up addresses...".to_string());
                self.spawn_lookup(request);
            }
            Advance::Moved(WizardStep::Confirmation) => {
                self.status_message = Some("Quote request sent!".to_string());
            }
            Advance::Moved(_) => self.status_message = None,
            Advance::Invalid => {
                self.status_message = Some("Please fix the highlighted fields".to_string());
            }
            Advance::LookupInFlight | Advance::Finished => {}
        }
    }

    /// Go back one step
    pub fn retreat(&mut self) {
        if self.state.is_pending() {
            tracing::debug!("Lookup cancelled");
        }
        self.state.retreat();
        self.status_message = None;
    }

    /// Throw the current quote away and start over
    pub fn restart(&mut self) {
        self.state.reset();
        self.status_message = Some("Started a new quote".to_string());
    }

    /// Run both postal code lookups in the background
    fn spawn_lookup(&self, request: LookupRequest) {
        let geocoder = Arc::clone(&self.geocoder);
        let tx = self.lookup_tx.clone();
        tracing::debug!(
            ticket = request.ticket,
            origin = %request.origin_postal_code,
            destination = %request.destination_postal_code,
            "Starting address lookup"
        );

        tokio::spawn(async move {
            let result = resolve_pair(
                geocoder.as_ref(),
                &request.origin_postal_code,
                &request.destination_postal_code,
            )
            .await;
            // Receiver only disappears when the app is gone
            let _ = tx.send(LookupOutcome {
                ticket: request.ticket,
                result,
            });
        });
    }

    /// Apply every lookup that finished since the last tick
    pub fn poll_lookups(&mut self) {
        while let Ok(outcome) = self.lookup_rx.try_recv() {
            self.apply_lookup(outcome);
        }
    }

    /// Feed a finished lookup into the wizard
    pub fn apply_lookup(&mut self, outcome: LookupOutcome) {
        match self.state.complete_lookup(outcome.ticket, outcome.result) {
            LookupResolution::Estimated(estimate) => {
                self.status_message =
                    Some(format!("Estimate ready: {}", format_price(estimate.price)));
            }
            LookupResolution::Failed(_) => {
                self.status_message = Some("Address lookup failed".to_string());
            }
            LookupResolution::Stale => {}
        }
    }

    /// Wait for the next finished lookup
    #[cfg(test)]
    async fn next_lookup(&mut self) -> LookupOutcome {
        self.lookup_rx.recv().await.expect("lookup channel open")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocoding::MockGeocoder;
    use crate::pricing::{ItemVolume, PropertyType, BASE_FEE};
    use crate::state::{LookupStatus, MoveType};
    use crossterm::event::KeyModifiers;
    use mockall::predicate::eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn idle_app() -> App {
        App::with_geocoder(Arc::new(MockGeocoder::new()))
    }

    fn sao_paulo_geocoder() -> MockGeocoder {
        let mut mock = MockGeocoder::new();
        mock.expect_resolve()
            .with(eq("01001000"))
            .returning(|_| Ok(Coordinate::new(-23.5503, -46.6339)));
        mock.expect_resolve()
            .with(eq("04538133"))
            .returning(|_| Ok(Coordinate::new(-23.5874, -46.6821)));
        mock
    }

    /// Fill steps 1-3 through the keyboard and press Enter on the address step
    fn drive_to_lookup(app: &mut App, description: &str) {
        type_text(app, "Ana Souza");
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "ana@example.com");
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "11912345678");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state.step, WizardStep::MoveDetails);

        type_text(app, "2026-11-20");
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Right));
        assert_eq!(
            app.state.form.selected_move_type(),
            Some(MoveType::Residential)
        );
        app.handle_key(key(KeyCode::Tab));
        type_text(app, description);
        app.handle_key(ctrl('s'));
        assert_eq!(app.state.step, WizardStep::Addresses);

        type_text(app, "Praça da Sé");
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "São Paulo");
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "01001-000");
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "Rua Funchal");
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "04538133");
        app.handle_key(key(KeyCode::Enter));
    }

    #[test]
    fn test_should_quit_initially_false() {
        let app = idle_app();
        assert!(!app.should_quit());
    }

    #[test]
    fn test_quit_resets_wizard() {
        let mut app = idle_app();
        type_text(&mut app, "Ana");
        app.quit();
        assert!(app.should_quit());
        assert!(app.state.form.name.is_blank());
    }

    #[test]
    fn test_enter_with_missing_fields_stays() {
        let mut app = idle_app();
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state.step, WizardStep::Contact);
        assert_eq!(app.state.errors.len(), 3);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_escape_goes_back_without_validation() {
        let mut app = idle_app();
        app.state.step = WizardStep::Addresses;
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.state.step, WizardStep::MoveDetails);
        app.handle_key(key(KeyCode::Esc));
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.state.step, WizardStep::Contact);
    }

    #[test]
    fn test_enter_in_description_adds_newline() {
        let mut app = idle_app();
        app.state.step = WizardStep::MoveDetails;
        app.state.active_field_index = 2;
        type_text(&mut app, "Piano");
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "Sofa");
        assert_eq!(app.state.form.description.as_text(), "Piano\nSofa");
        assert_eq!(app.state.step, WizardStep::MoveDetails);
    }

    #[test]
    fn test_space_cycles_move_type() {
        let mut app = idle_app();
        app.state.step = WizardStep::MoveDetails;
        app.state.active_field_index = 1;
        app.handle_key(key(KeyCode::Char(' ')));
        app.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(
            app.state.form.selected_move_type(),
            Some(MoveType::Commercial)
        );
    }

    #[test]
    fn test_space_types_into_text_fields() {
        let mut app = idle_app();
        type_text(&mut app, "Ana Souza");
        assert_eq!(app.state.form.name.as_text(), "Ana Souza");
    }

    #[test]
    fn test_ctrl_characters_are_not_typed() {
        let mut app = idle_app();
        app.handle_key(ctrl('x'));
        assert!(app.state.form.name.is_blank());
    }

    #[test]
    fn test_restart_shortcut() {
        let mut app = idle_app();
        type_text(&mut app, "Ana");
        app.state.step = WizardStep::Review;
        app.handle_key(ctrl('r'));
        assert_eq!(app.state.step, WizardStep::Contact);
        assert!(app.state.form.name.is_blank());
    }

    #[test]
    fn test_review_confirms_and_confirmation_restarts() {
        let mut app = idle_app();
        app.state.step = WizardStep::Review;
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state.step, WizardStep::Confirmation);
        assert!(app.state.submission.is_some());

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state.step, WizardStep::Contact);
        assert!(app.state.submission.is_none());
    }

    #[tokio::test]
    async fn test_end_to_end_quote() {
        let mut app = App::with_geocoder(Arc::new(sao_paulo_geocoder()));
        drive_to_lookup(&mut app, "Two bedrooms, fridge and washing machine");

        assert!(app.state.is_pending());
        assert_eq!(app.state.step, WizardStep::Addresses);

        let outcome = app.next_lookup().await;
        app.apply_lookup(outcome);

        assert_eq!(app.state.step, WizardStep::Review);
        let estimate = app.state.estimate.clone().expect("estimate");
        assert_eq!(estimate.inputs.property_type, PropertyType::Apartment);
        assert_eq!(estimate.inputs.item_volume, ItemVolume::Medium);
        assert!(estimate.price as f64 >= BASE_FEE);
        assert!(app
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Estimate ready: R$ ")));

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state.step, WizardStep::Confirmation);
        let submission = app.state.submission.as_ref().expect("submission");
        assert_eq!(submission.estimate.as_ref(), Some(&estimate));
    }

    #[tokio::test]
    async fn test_poll_lookups_applies_finished_outcome() {
        let mut app = App::with_geocoder(Arc::new(sao_paulo_geocoder()));
        drive_to_lookup(&mut app, "");

        for _ in 0..100 {
            app.poll_lookups();
            if !app.state.is_pending() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert_eq!(app.state.step, WizardStep::Review);
    }

    #[tokio::test]
    async fn test_lookup_failure_shows_error_and_retries() {
        let destination_calls = Arc::new(AtomicUsize::new(0));
        let calls = Arc::clone(&destination_calls);
        let mut mock = MockGeocoder::new();
        mock.expect_resolve()
            .with(eq("01001000"))
            .times(2)
            .returning(|_| Ok(Coordinate::new(-23.5503, -46.6339)));
        mock.expect_resolve()
            .with(eq("04538133"))
            .times(2)
            .returning(move |_| {
                // First attempt fails, the retry succeeds
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(GeocodeError::Network("connection reset".to_string()))
                } else {
                    Ok(Coordinate::new(-23.5874, -46.6821))
                }
            });

        let mut app = App::with_geocoder(Arc::new(mock));
        drive_to_lookup(&mut app, "");
        let outcome = app.next_lookup().await;
        app.apply_lookup(outcome);

        assert_eq!(app.state.step, WizardStep::Addresses);
        assert!(app.state.estimate.is_none());
        assert!(app
            .state
            .lookup_error()
            .is_some_and(|m| m.contains("connection reset")));

        // Typing is swallowed by the modal error
        app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(app.state.form.destination_postal_code.as_text(), "04538133");

        app.handle_key(key(KeyCode::Enter));
        assert!(app.state.is_pending());
        let outcome = app.next_lookup().await;
        app.apply_lookup(outcome);
        assert_eq!(app.state.step, WizardStep::Review);
    }

    #[tokio::test]
    async fn test_dismissed_error_allows_editing() {
        let mut mock = MockGeocoder::new();
        mock.expect_resolve()
            .returning(|code| Err(GeocodeError::PostalCodeNotFound(code.to_string())));

        let mut app = App::with_geocoder(Arc::new(mock));
        drive_to_lookup(&mut app, "");
        let outcome = app.next_lookup().await;
        app.apply_lookup(outcome);
        assert!(app.state.lookup_error().is_some());

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.state.lookup, LookupStatus::Idle);
        assert_eq!(app.state.step, WizardStep::Addresses);
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.state.form.destination_postal_code.as_text(), "0453813");
    }

    #[tokio::test]
    async fn test_restart_during_lookup_discards_result() {
        let mut app = App::with_geocoder(Arc::new(sao_paulo_geocoder()));
        drive_to_lookup(&mut app, "");
        assert!(app.state.is_pending());

        app.handle_key(ctrl('r'));
        let outcome = app.next_lookup().await;
        app.apply_lookup(outcome);

        assert_eq!(app.state.step, WizardStep::Contact);
        assert!(app.state.estimate.is_none());
        assert_eq!(app.state.lookup, LookupStatus::Idle);
        assert!(app.state.form.field(FieldId::OriginStreet).is_blank());
    }

    #[tokio::test]
    async fn test_back_during_lookup_discards_result() {
        let mut app = App::with_geocoder(Arc::new(sao_paulo_geocoder()));
        drive_to_lookup(&mut app, "");

        app.handle_key(key(KeyCode::Esc));
        let outcome = app.next_lookup().await;
        app.apply_lookup(outcome);

        assert_eq!(app.state.step, WizardStep::MoveDetails);
        assert!(app.state.estimate.is_none());
    }
}

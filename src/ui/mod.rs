//! UI module for rendering the TUI

mod components;
mod confirmation;
mod forms;
mod layout;
mod review;

use crate::app::App;
use crate::state::WizardStep;
use components::render_lookup_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, body_area, footer_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, app);

    match app.state.step {
        WizardStep::Contact | WizardStep::MoveDetails | WizardStep::Addresses => {
            forms::draw_step_form(frame, body_area, app);
        }
        WizardStep::Review => review::draw(frame, body_area, app),
        WizardStep::Confirmation => confirmation::draw(frame, body_area, app),
    }

    layout::draw_footer(frame, footer_area, app);
    layout::draw_status_bar(frame, app);

    // Modal overlay last so it sits on top
    if let Some(message) = app.state.lookup_error() {
        render_lookup_error_dialog(frame, message);
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::screen_contains;
    use crate::app::App;
    use crate::geocoding::MockGeocoder;
    use crate::state::{LookupStatus, WizardStep};
    use std::sync::Arc;

    fn app() -> App {
        App::with_geocoder(Arc::new(MockGeocoder::new()))
    }

    #[test]
    fn test_header_shows_step_progress() {
        let app = app();
        assert!(screen_contains(&app, "Step 1 of 5: Contact information"));
    }

    #[test]
    fn test_each_step_has_its_label() {
        let mut app = app();
        for step in WizardStep::ALL {
            app.state.step = step;
            let header = format!("Step {} of 5: {}", step.number(), step.label());
            assert!(screen_contains(&app, &header), "missing {header}");
        }
    }

    #[test]
    fn test_lookup_error_dialog_is_drawn() {
        let mut app = app();
        app.state.step = WizardStep::Addresses;
        app.state.lookup = LookupStatus::Failed("Postal code 99999999 not found".to_string());
        assert!(screen_contains(&app, "Address lookup failed"));
        assert!(screen_contains(&app, "Postal code 99999999 not found"));
        assert!(screen_contains(&app, "to retry"));
    }

    #[test]
    fn test_pending_lookup_is_announced() {
        let mut app = app();
        app.state.step = WizardStep::Addresses;
        app.state.lookup = LookupStatus::Pending { ticket: 1 };
        assert!(screen_contains(&app, "Looking up addresses"));
    }
}

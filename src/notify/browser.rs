use crate::config::{InquiryConfig, WebdriverConfig};
use crate::error::ScoutError;
use crate::models::Listing;
use crate::notify::message;
use crate::notify::traits::Notifier;
use headless_chrome::protocol::cdp::Network::CookieParam;
use headless_chrome::{Browser, Element, LaunchOptions, Tab};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

const SITE_URL: &str = "https://www.daft.ie";

const CONSENT_BUTTON: &str = "button[data-tracking='cc-accept']";
const EMAIL_BUTTON: &str = "button[aria-label='EMAIL']";
const EMAIL_BUTTON_FALLBACK: &str = "button[data-tracking='email-btn']";
const NAME_INPUT: &str = "input[aria-label='name']";
const EMAIL_INPUT: &str = "input[aria-label='email']";
const PHONE_INPUT: &str = "input[aria-label='phone']";
const MESSAGE_INPUT: &str = "textarea#message";
const SEND_BUTTON: &str = "button[aria-label='Send']";

/// How long to wait for a form control to appear.
const ELEMENT_TIMEOUT: Duration = Duration::from_secs(10);
/// How long to wait for the form to close after sending.
const SUBMIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Drives a headless Chrome session to submit listing contact forms.
///
/// The session is launched once, authenticated with the configured site
/// cookies, and reused for every listing in the run. Dropping the notifier
/// closes the browser, on every exit path.
pub struct BrowserNotifier {
    // Held for ownership; Chrome shuts down when this drops.
    _browser: Browser,
    tab: Arc<Tab>,
    inquiry: InquiryConfig,
}

impl BrowserNotifier {
    /// Launch the browser and prepare an authenticated session.
    pub fn new(webdriver: &WebdriverConfig, inquiry: InquiryConfig) -> Result<Self, ScoutError> {
        info!("Launching headless Chrome...");

        let options = LaunchOptions::default_builder()
            .headless(true)
            .path(webdriver.driver_location.clone())
            .build()
            .map_err(|e| ScoutError::Session(format!("failed to build launch options: {e}")))?;
        let browser = Browser::new(options)
            .map_err(|e| ScoutError::Session(format!("failed to launch Chrome: {e}")))?;
        let tab = browser
            .new_tab()
            .map_err(|e| ScoutError::Session(format!("failed to open tab: {e}")))?;

        // The site authenticates through a pair of session cookies.
        tab.navigate_to(SITE_URL)
            .and_then(|t| t.wait_until_navigated())
            .map_err(|e| ScoutError::Session(format!("failed to open {SITE_URL}: {e}")))?;
        tab.set_cookies(vec![
            session_cookie("session", &webdriver.session_token),
            session_cookie("session.sig", &webdriver.session_signature),
        ])
        .map_err(|e| ScoutError::Session(format!("failed to install session cookies: {e}")))?;

        // Reload with the cookies in place, then get the consent prompt out
        // of the way; it is absent for returning sessions.
        tab.navigate_to(SITE_URL)
            .and_then(|t| t.wait_until_navigated())
            .map_err(|e| ScoutError::Session(format!("failed to reload {SITE_URL}: {e}")))?;
        if let Ok(consent) = tab.find_element(CONSENT_BUTTON) {
            let _ = consent.click();
        }

        Ok(Self {
            _browser: browser,
            tab,
            inquiry,
        })
    }

    /// Wait for a selector to appear within the element timeout.
    fn wait_for(&self, selector: &str) -> Result<Element<'_>, ScoutError> {
        self.tab
            .wait_for_element_with_custom_timeout(selector, ELEMENT_TIMEOUT)
            .map_err(|e| ScoutError::Interaction(format!("timed out waiting for {selector}: {e}")))
    }

    fn fill(&self, selector: &str, text: &str) -> Result<(), ScoutError> {
        self.wait_for(selector)?
            .type_into(text)
            .map_err(|e| ScoutError::Interaction(format!("failed to fill {selector}: {e}")))?;
        Ok(())
    }

    /// Open the contact form on the current listing page.
    fn open_contact_form(&self) -> Result<(), ScoutError> {
        let button = self.wait_for(EMAIL_BUTTON)?;
        if button.click().is_err() {
            // Some listing layouts render the labelled button unclickable;
            // the tracking variant is the one working fallback.
            let fallback = self
                .tab
                .find_element(EMAIL_BUTTON_FALLBACK)
                .map_err(|e| ScoutError::Interaction(format!("no clickable contact button: {e}")))?;
            fallback
                .click()
                .map_err(|e| ScoutError::Interaction(format!("failed to click contact button: {e}")))?;
        }
        Ok(())
    }

    /// Fill the contact form and send it.
    fn submit_form(&self, msg: &str) -> Result<(), ScoutError> {
        self.fill(NAME_INPUT, &self.inquiry.fullname)?;
        self.fill(EMAIL_INPUT, &self.inquiry.email)?;
        self.fill(PHONE_INPUT, &self.inquiry.phone)?;
        self.fill(MESSAGE_INPUT, msg)?;

        self.wait_for(SEND_BUTTON)?
            .click()
            .map_err(|e| ScoutError::Interaction(format!("failed to click send: {e}")))?;

        self.wait_for_submission()
    }

    /// The form pop-up closes once the site has accepted the message; poll
    /// for that instead of sleeping a fixed interval.
    fn wait_for_submission(&self) -> Result<(), ScoutError> {
        let deadline = Instant::now() + SUBMIT_TIMEOUT;
        while Instant::now() < deadline {
            if self.tab.find_element(SEND_BUTTON).is_err() {
                return Ok(());
            }
            thread::sleep(Duration::from_millis(250));
        }
        Err(ScoutError::Interaction(
            "no submission acknowledgment before timeout".to_string(),
        ))
    }
}

impl Notifier for BrowserNotifier {
    fn notify(&self, listing: &Listing) -> Result<(), ScoutError> {
        let msg = message::render(&self.inquiry.template, listing, &self.inquiry);

        debug!("Opening listing page {}", listing.url);
        self.tab
            .navigate_to(&listing.url)
            .and_then(|t| t.wait_until_navigated())
            .map_err(|e| {
                ScoutError::Interaction(format!("failed to open {}: {e}", listing.url))
            })?;

        self.open_contact_form()?;
        self.submit_form(&msg)?;

        info!(
            "Sent inquiry for '{}' to {}",
            listing.title,
            message::title_case(&listing.agent_name)
        );
        Ok(())
    }
}

fn session_cookie(name: &str, value: &str) -> CookieParam {
    CookieParam {
        name: name.to_string(),
        value: value.to_string(),
        url: Some(SITE_URL.to_string()),
        domain: None,
        path: None,
        secure: None,
        http_only: None,
        same_site: None,
        expires: None,
        priority: None,
        same_party: None,
        source_scheme: None,
        source_port: None,
        partition_key: None,
    }
}

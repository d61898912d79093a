//! The fixed battery of contact-modal scenarios.
//!
//! Each scenario is independent and idempotent: it navigates to the page at
//! its own start, so scenarios run in any order and never depend on modal
//! state left behind by a predecessor. Assertions go through
//! [`check`]/[`check_eq`] so the runner can tell expectation violations
//! apart from unexpected errors.

use crate::config::SuiteConfig;
use modal_harness::wait::wait_for_result;
use modal_harness::{Page, Result, check, check_eq};

/// Element contract of the page under test.
pub mod elements {
    /// Button that opens the modal.
    pub const TRIGGER: &str = "#test-trigger";
    /// The modal dialog container.
    pub const MODAL: &str = "#contact-modal";
    /// The modal's close button.
    pub const MODAL_CLOSE: &str = "#modal-close";
    /// Email input inside the form.
    pub const EMAIL: &str = "#contact-email";
    /// Message text area inside the form.
    pub const MESSAGE: &str = "#contact-message";
    /// Form submit button.
    pub const SUBMIT: &str = "button[type='submit']";
    /// The contact form element.
    pub const FORM: &str = "#contact-form";
    /// Class marking the modal's content panel, used for size queries.
    pub const MODAL_CONTAINER: &str = ".modal-container";
    /// Class marking the dimmed backdrop, used for outside-click targeting.
    pub const MODAL_OVERLAY: &str = ".modal-overlay";
}

/// The endpoint the contact form must post to.
pub const FORM_ACTION_URL: &str = "https://formspree.io/f/xzzvkzkg";

/// Viewport presets for the responsive check: width, height, device name.
pub const VIEWPORTS: [(u32, u32, &str); 3] = [
    (1920, 1080, "Desktop"),
    (768, 1024, "Tablet"),
    (375, 667, "Mobile"),
];

/// One scenario of the fixed battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Trigger opens the modal; the close button hides it.
    OpenCloseButton,
    /// Trigger opens the modal; Escape hides it.
    OpenCloseEscape,
    /// Trigger opens the modal; clicking the overlay outside the content
    /// panel hides it.
    OpenCloseOverlay,
    /// Native form validation: required email, malformed vs well-formed.
    FormValidation,
    /// Opening moves focus to the email input; Tab reaches the textarea.
    FocusManagement,
    /// The modal fits strictly inside each viewport preset.
    ResponsiveLayout,
    /// The form's action attribute equals the submission endpoint.
    FormspreeAction,
    /// ARIA role, hidden flag, and labelling relationship before opening.
    AriaAttributes,
}

impl Scenario {
    /// The whole battery, in execution order.
    pub const ALL: [Scenario; 8] = [
        Scenario::OpenCloseButton,
        Scenario::OpenCloseEscape,
        Scenario::OpenCloseOverlay,
        Scenario::FormValidation,
        Scenario::FocusManagement,
        Scenario::ResponsiveLayout,
        Scenario::FormspreeAction,
        Scenario::AriaAttributes,
    ];

    /// Name used in the report.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Scenario::OpenCloseButton => "open_close_button",
            Scenario::OpenCloseEscape => "open_close_escape",
            Scenario::OpenCloseOverlay => "open_close_overlay",
            Scenario::FormValidation => "form_validation",
            Scenario::FocusManagement => "focus_management",
            Scenario::ResponsiveLayout => "responsive_layout",
            Scenario::FormspreeAction => "formspree_action",
            Scenario::AriaAttributes => "aria_attributes",
        }
    }

    /// Runs this scenario's body against an already-live page.
    ///
    /// # Errors
    ///
    /// Returns `AssertionFailed`/`WaitTimeout` for expectation violations
    /// and any other `HarnessError` for unexpected breakage.
    pub async fn run(self, page: &Page, config: &SuiteConfig) -> Result<()> {
        match self {
            Scenario::OpenCloseButton => open_close_button(page, config).await,
            Scenario::OpenCloseEscape => open_close_escape(page, config).await,
            Scenario::OpenCloseOverlay => open_close_overlay(page, config).await,
            Scenario::FormValidation => form_validation(page, config).await,
            Scenario::FocusManagement => focus_management(page, config).await,
            Scenario::ResponsiveLayout => responsive_layout(page, config).await,
            Scenario::FormspreeAction => formspree_action(page, config).await,
            Scenario::AriaAttributes => aria_attributes(page, config).await,
        }
    }
}

/// Navigates to the page and opens the modal through its trigger.
///
/// The shared first half of every interaction scenario.
async fn open_modal(page: &Page, config: &SuiteConfig) -> Result<()> {
    page.navigate_to(&config.site, crate::config::PAGE_PATH).await?;
    page.wait_for_clickable(elements::TRIGGER, config.wait).await?;
    page.click(elements::TRIGGER).await?;
    page.wait_for_visible(elements::MODAL, config.wait).await?;
    Ok(())
}

async fn open_close_button(page: &Page, config: &SuiteConfig) -> Result<()> {
    open_modal(page, config).await?;
    check(
        page.is_displayed(elements::MODAL).await?,
        "modal should be visible after clicking trigger",
    )?;

    page.click(elements::MODAL_CLOSE).await?;
    page.wait_for_hidden(elements::MODAL, config.wait).await?;
    check(
        !page.is_displayed(elements::MODAL).await?,
        "modal should be hidden after clicking close",
    )
}

async fn open_close_escape(page: &Page, config: &SuiteConfig) -> Result<()> {
    open_modal(page, config).await?;

    page.press_key("Escape").await?;
    page.wait_for_hidden(elements::MODAL, config.wait).await?;
    check(
        !page.is_displayed(elements::MODAL).await?,
        "modal should be hidden after pressing Escape",
    )
}

async fn open_close_overlay(page: &Page, config: &SuiteConfig) -> Result<()> {
    open_modal(page, config).await?;

    // Click inside the overlay but outside the content panel.
    let overlay = page.element_rect(elements::MODAL_OVERLAY).await?;
    page.click_at(overlay.left + 10.0, overlay.top + 10.0).await?;

    page.wait_for_hidden(elements::MODAL, config.wait).await?;
    check(
        !page.is_displayed(elements::MODAL).await?,
        "modal should close when clicking outside its content",
    )
}

async fn form_validation(page: &Page, config: &SuiteConfig) -> Result<()> {
    open_modal(page, config).await?;

    // Empty submission must be blocked by the required email field.
    page.wait_for_clickable(elements::SUBMIT, config.wait).await?;
    page.click(elements::SUBMIT).await?;
    check(
        page.bool_property(elements::EMAIL, "required").await?,
        "email field should be required",
    )?;

    page.type_text(elements::EMAIL, "invalid-email").await?;
    page.type_text(elements::MESSAGE, "Test message").await?;
    check(
        !page.check_validity(elements::EMAIL).await?,
        "invalid email should fail validation",
    )?;

    page.clear_value(elements::EMAIL).await?;
    page.type_text(elements::EMAIL, "test@example.com").await?;
    check(
        page.check_validity(elements::EMAIL).await?,
        "valid email should pass validation",
    )
}

async fn focus_management(page: &Page, config: &SuiteConfig) -> Result<()> {
    open_modal(page, config).await?;

    wait_for_result(
        || async move { Ok(page.focused_id().await? == "contact-email") },
        config.wait,
        "focus on contact-email after opening modal",
    )
    .await?;

    page.press_key("Tab").await?;
    let tag = page.focused_tag().await?;
    check_eq(tag.as_str(), "TEXTAREA", "Tab should move focus to the textarea")
}

async fn responsive_layout(page: &Page, config: &SuiteConfig) -> Result<()> {
    let result = responsive_layout_body(page, config).await;
    // Always restore the real window metrics for the scenarios that follow.
    let _ = page.clear_viewport_override().await;
    result
}

async fn responsive_layout_body(page: &Page, config: &SuiteConfig) -> Result<()> {
    for (width, height, device) in VIEWPORTS {
        page.set_viewport(width, height).await?;
        open_modal(page, config).await?;

        let modal = page.element_rect(elements::MODAL_CONTAINER).await?;
        let (viewport_width, viewport_height) = page.viewport_size().await?;

        check(
            modal.width < viewport_width,
            format!(
                "modal should fit within {device} viewport width \
                 ({} >= {viewport_width})",
                modal.width
            ),
        )?;
        check(
            modal.height < viewport_height,
            format!(
                "modal should fit within {device} viewport height \
                 ({} >= {viewport_height})",
                modal.height
            ),
        )?;
    }
    Ok(())
}

async fn formspree_action(page: &Page, config: &SuiteConfig) -> Result<()> {
    page.navigate_to(&config.site, crate::config::PAGE_PATH).await?;

    let action = page.attribute(elements::FORM, "action").await?;
    check_eq(
        action.as_deref(),
        Some(FORM_ACTION_URL),
        "form action should point to the submission endpoint",
    )
}

async fn aria_attributes(page: &Page, config: &SuiteConfig) -> Result<()> {
    page.navigate_to(&config.site, crate::config::PAGE_PATH).await?;

    let role = page.attribute(elements::MODAL, "role").await?;
    check_eq(role.as_deref(), Some("dialog"), "modal should have role='dialog'")?;

    let aria_hidden = page.attribute(elements::MODAL, "aria-hidden").await?;
    check_eq(
        aria_hidden.as_deref(),
        Some("true"),
        "modal should initially have aria-hidden='true'",
    )?;

    let labelled_by = page.attribute(elements::MODAL, "aria-labelledby").await?;
    check_eq(
        labelled_by.as_deref(),
        Some("contact-modal-title"),
        "modal should reference its title via aria-labelledby",
    )
}

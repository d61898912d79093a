//! Integration tests for modal-harness
//!
//! These tests require Chrome/Chromium to be installed and are marked
//! #[ignore] by default. Run with:
//! cargo test --package modal-harness -- --ignored

use modal_harness::{HarnessError, TestBrowser, TestBrowserConfig, WaitConfig};
use std::time::Duration;

/// A minimal page with a dialog that mirrors the modal interactions the
/// suite exercises: a trigger, a close button, Escape handling, and a form
/// with native validation.
fn dialog_fixture() -> String {
    r##"
    <!DOCTYPE html>
    <html>
    <head><title>Dialog Fixture</title></head>
    <body>
        <button id="open">Open</button>
        <div id="dialog" style="display: none">
            <button id="close">Close</button>
            <form id="form" action="https://example.com/post">
                <input id="email" type="email" required>
                <textarea id="message"></textarea>
            </form>
        </div>
        <script>
            const dialog = document.getElementById('dialog');
            document.getElementById('open').addEventListener('click', () => {
                dialog.style.display = 'block';
                document.getElementById('email').focus();
            });
            document.getElementById('close').addEventListener('click', () => {
                dialog.style.display = 'none';
            });
            document.addEventListener('keydown', (e) => {
                if (e.key === 'Escape') dialog.style.display = 'none';
            });
        </script>
    </body>
    </html>
    "##
    .to_string()
}

fn fixture_url() -> String {
    format!("data:text/html,{}", urlencoding::encode(&dialog_fixture()))
}

async fn launch() -> TestBrowser {
    TestBrowser::launch(TestBrowserConfig::default())
        .await
        .expect("failed to launch browser")
}

#[tokio::test]
#[ignore] // Requires Chrome to be installed
async fn browser_launch_and_close() {
    let browser = launch().await;

    assert!(!browser.is_closed().await, "Browser should not be closed");

    browser.close().await.expect("failed to close browser");
}

#[tokio::test]
#[ignore]
async fn navigation_waits_for_ready_document() {
    let browser = launch().await;
    let page = browser.new_page().await.expect("failed to create page");

    page.navigate(&fixture_url()).await.expect("failed to navigate");

    let title: String = page.evaluate("document.title").await.expect("eval failed");
    assert_eq!(title, "Dialog Fixture");

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn click_toggles_dialog_visibility() {
    let browser = launch().await;
    let page = browser.new_page().await.expect("failed to create page");
    page.navigate(&fixture_url()).await.expect("failed to navigate");

    assert!(!page.is_displayed("#dialog").await.expect("query failed"));

    page.click("#open").await.expect("failed to click trigger");
    page.wait_for_visible("#dialog", WaitConfig::default())
        .await
        .expect("dialog should open");

    page.click("#close").await.expect("failed to click close");
    page.wait_for_hidden("#dialog", WaitConfig::default())
        .await
        .expect("dialog should close");

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn escape_key_closes_dialog() {
    let browser = launch().await;
    let page = browser.new_page().await.expect("failed to create page");
    page.navigate(&fixture_url()).await.expect("failed to navigate");

    page.click("#open").await.expect("failed to click trigger");
    page.wait_for_visible("#dialog", WaitConfig::default())
        .await
        .expect("dialog should open");

    page.press_key("Escape").await.expect("failed to press Escape");
    page.wait_for_hidden("#dialog", WaitConfig::default())
        .await
        .expect("Escape should close the dialog");

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn focus_moves_on_open_and_tab() {
    let browser = launch().await;
    let page = browser.new_page().await.expect("failed to create page");
    page.navigate(&fixture_url()).await.expect("failed to navigate");

    page.click("#open").await.expect("failed to click trigger");
    page.wait_for_visible("#dialog", WaitConfig::default())
        .await
        .expect("dialog should open");

    let focused = page.focused_id().await.expect("failed to read focus");
    assert_eq!(focused, "email", "opening should focus the email input");

    page.press_key("Tab").await.expect("failed to press Tab");
    let tag = page.focused_tag().await.expect("failed to read focus");
    assert_eq!(tag, "TEXTAREA", "Tab should move focus to the textarea");

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn native_validity_checks() {
    let browser = launch().await;
    let page = browser.new_page().await.expect("failed to create page");
    page.navigate(&fixture_url()).await.expect("failed to navigate");

    page.click("#open").await.expect("failed to open dialog");

    assert!(
        page.bool_property("#email", "required")
            .await
            .expect("property query failed"),
        "email input should be required"
    );

    page.type_text("#email", "invalid-email").await.expect("type failed");
    assert!(
        !page.check_validity("#email").await.expect("validity failed"),
        "malformed email should fail validation"
    );

    page.clear_value("#email").await.expect("clear failed");
    page.type_text("#email", "test@example.com").await.expect("type failed");
    assert!(
        page.check_validity("#email").await.expect("validity failed"),
        "well-formed email should pass validation"
    );

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn attribute_reads_distinguish_absent() {
    let browser = launch().await;
    let page = browser.new_page().await.expect("failed to create page");
    page.navigate(&fixture_url()).await.expect("failed to navigate");

    let action = page
        .attribute("#form", "action")
        .await
        .expect("attribute query failed");
    assert_eq!(action.as_deref(), Some("https://example.com/post"));

    let missing = page
        .attribute("#form", "aria-hidden")
        .await
        .expect("attribute query failed");
    assert_eq!(missing, None);

    let err = page.attribute("#nope", "action").await.unwrap_err();
    assert!(matches!(err, HarnessError::ElementNotFound(_)));

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn viewport_override_changes_inner_size() {
    let browser = launch().await;
    let page = browser.new_page().await.expect("failed to create page");
    page.navigate(&fixture_url()).await.expect("failed to navigate");

    page.set_viewport(375, 667).await.expect("override failed");
    let (width, height) = page.viewport_size().await.expect("size query failed");
    assert_eq!(width as u32, 375);
    assert_eq!(height as u32, 667);

    page.clear_viewport_override().await.expect("clear failed");

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn wait_for_visible_times_out_on_missing_element() {
    let browser = launch().await;
    let page = browser.new_page().await.expect("failed to create page");
    page.navigate(&fixture_url()).await.expect("failed to navigate");

    let config = WaitConfig::new(Duration::from_millis(500), Duration::from_millis(50));
    let result = page.wait_for_visible("#non-existent", config).await;

    assert!(
        matches!(result, Err(HarnessError::WaitTimeout { .. })),
        "waiting on a missing element should time out"
    );

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn element_rect_reports_rendered_box() {
    let browser = launch().await;
    let page = browser.new_page().await.expect("failed to create page");
    page.navigate(&fixture_url()).await.expect("failed to navigate");

    let rect = page.element_rect("#open").await.expect("rect query failed");
    assert!(rect.width > 0.0, "button should have rendered width");
    assert!(rect.height > 0.0, "button should have rendered height");

    let (vw, vh) = page.viewport_size().await.expect("size query failed");
    assert!(rect.width < vw && rect.height < vh);

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn screenshot_produces_png() {
    let browser = launch().await;
    let page = browser.new_page().await.expect("failed to create page");
    page.navigate(&fixture_url()).await.expect("failed to navigate");

    let screenshot = page.screenshot().await.expect("failed to take screenshot");

    assert!(!screenshot.is_empty(), "Screenshot should not be empty");
    assert_eq!(
        &screenshot[0..4],
        &[0x89, 0x50, 0x4E, 0x47],
        "Screenshot should be PNG format"
    );

    browser.close().await.expect("failed to close");
}

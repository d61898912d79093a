//! Page-level browser operations.
//!
//! `Page` wraps a chromiumoxide tab and exposes the operations the modal
//! scenarios need: navigation with a readiness wait, element queries and
//! clicks, raw keyboard/mouse input, native validity checks, viewport
//! emulation, and bounding-box measurement.
//!
//! Every selector interpolated into JavaScript goes through JSON encoding,
//! so selectors can never break out of the string literal they land in.

use crate::console::{ConsoleCapture, parse_console_event};
use crate::error::{HarnessError, Result};
use crate::server::ExternalServer;
use crate::wait::{WaitConfig, wait_for_result};
use chromiumoxide::cdp::browser_protocol::emulation::{
    ClearDeviceMetricsOverrideParams, SetDeviceMetricsOverrideParams,
};
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchKeyEventParams, DispatchKeyEventType, DispatchMouseEventParams,
    DispatchMouseEventType, MouseButton,
};
use chromiumoxide::cdp::js_protocol::runtime::EventConsoleApiCalled;
use chromiumoxide::page::Page as ChromePage;
use futures::StreamExt;
use serde::Deserialize;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::warn;

/// An element's rendered bounding box, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Rect {
    /// Distance from the viewport's left edge.
    pub left: f64,
    /// Distance from the viewport's top edge.
    pub top: f64,
    /// Rendered width.
    pub width: f64,
    /// Rendered height.
    pub height: f64,
}

/// Represents a browser page (tab) with testing capabilities.
///
/// Element handles are never cached: every operation re-queries the DOM by
/// selector, so a page stays usable across re-navigations.
#[derive(Debug)]
pub struct Page {
    inner: Arc<ChromePage>,
    console: ConsoleCapture,
    _console_task: JoinHandle<()>,
}

impl Page {
    /// Creates a new Page wrapper and starts console capture.
    ///
    /// Called internally by `TestBrowser`.
    pub(crate) fn new(page: ChromePage) -> Self {
        let console = ConsoleCapture::new();
        let console_clone = console.clone();
        let page_arc = Arc::new(page);

        let page_for_task = page_arc.clone();
        let console_task = tokio::spawn(async move {
            if let Ok(mut events) = page_for_task
                .event_listener::<EventConsoleApiCalled>()
                .await
            {
                while let Some(event) = events.next().await {
                    console_clone.push(parse_console_event(&event));
                }
            }
        });

        Self {
            inner: page_arc,
            console,
            _console_task: console_task,
        }
    }

    /// Returns a handle to the console message capture.
    #[must_use]
    pub fn console(&self) -> &ConsoleCapture {
        &self.console
    }

    /// Navigates to an absolute URL and waits for the document to be ready.
    ///
    /// The readiness wait applies to every navigation, so attribute-only
    /// checks read a fully loaded DOM too.
    ///
    /// # Errors
    ///
    /// Returns `NavigationFailed` if the page fails to load or times out.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        self.inner
            .goto(url)
            .await
            .map_err(|e| HarnessError::NavigationFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        self.wait_for_load(WaitConfig::default()).await?;
        Ok(())
    }

    /// Navigates to a server-relative path.
    ///
    /// Performs the server's health check first to fail fast when the
    /// fixture server is down.
    ///
    /// # Errors
    ///
    /// Returns an error if the health check or navigation fails.
    pub async fn navigate_to(&self, server: &dyn ExternalServer, path: &str) -> Result<()> {
        server.health_check().await?;

        let url = server.url(path);
        self.navigate(&url).await
    }

    /// Waits for `document.readyState` to reach `complete`.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if the document never becomes ready.
    pub async fn wait_for_load(&self, config: WaitConfig) -> Result<()> {
        wait_for_result(
            || {
                let page = self.inner.clone();
                async move {
                    let result = page
                        .evaluate("document.readyState")
                        .await
                        .map_err(|e| HarnessError::ScriptFailed(e.to_string()))?;

                    let ready = result
                        .value()
                        .and_then(|v| v.as_str())
                        .is_some_and(|s| s == "complete");

                    Ok(ready)
                }
            },
            config,
            "document ready",
        )
        .await
    }

    /// Executes JavaScript in the page context and returns the result.
    ///
    /// # Errors
    ///
    /// Returns `ScriptFailed` if execution fails or the result cannot be
    /// deserialized.
    pub async fn evaluate<T>(&self, script: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let result = self
            .inner
            .evaluate(script)
            .await
            .map_err(|e| HarnessError::ScriptFailed(e.to_string()))?;

        result
            .into_value()
            .map_err(|e| HarnessError::ScriptFailed(e.to_string()))
    }

    /// Returns true if any element matches the selector.
    ///
    /// # Errors
    ///
    /// Returns `ScriptFailed` if the query cannot be executed.
    pub async fn exists(&self, selector: &str) -> Result<bool> {
        let sel = js_string(selector)?;
        self.evaluate(&format!("!!document.querySelector({sel})"))
            .await
    }

    /// Returns true if the element matching the selector is rendered.
    ///
    /// An element counts as displayed when it exists, has a non-empty
    /// bounding box, and is not hidden via `display` or `visibility`.
    /// A missing element is simply not displayed.
    ///
    /// # Errors
    ///
    /// Returns `ScriptFailed` if the query cannot be executed.
    pub async fn is_displayed(&self, selector: &str) -> Result<bool> {
        let sel = js_string(selector)?;
        let script = format!(
            "(() => {{ \
                const el = document.querySelector({sel}); \
                if (!el) return false; \
                const r = el.getBoundingClientRect(); \
                const s = window.getComputedStyle(el); \
                return r.width > 0 && r.height > 0 \
                    && s.display !== 'none' && s.visibility !== 'hidden'; \
            }})()"
        );
        self.evaluate(&script).await
    }

    /// Waits until the element is rendered.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if the element never becomes visible.
    pub async fn wait_for_visible(&self, selector: &str, config: WaitConfig) -> Result<()> {
        let selector_owned = selector.to_string();

        wait_for_result(
            || {
                let sel = selector_owned.clone();
                async move { self.is_displayed(&sel).await }
            },
            config,
            &format!("'{selector}' visible"),
        )
        .await
    }

    /// Waits until the element is hidden or absent.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if the element stays visible.
    pub async fn wait_for_hidden(&self, selector: &str, config: WaitConfig) -> Result<()> {
        let selector_owned = selector.to_string();

        wait_for_result(
            || {
                let sel = selector_owned.clone();
                async move { Ok(!self.is_displayed(&sel).await?) }
            },
            config,
            &format!("'{selector}' hidden"),
        )
        .await
    }

    /// Waits until the element is rendered and not disabled.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if the element never becomes interactable.
    pub async fn wait_for_clickable(&self, selector: &str, config: WaitConfig) -> Result<()> {
        let selector_owned = selector.to_string();

        wait_for_result(
            || {
                let sel = selector_owned.clone();
                async move {
                    if !self.is_displayed(&sel).await? {
                        return Ok(false);
                    }
                    let esc = js_string(&sel)?;
                    let enabled: bool = self
                        .evaluate(&format!(
                            "!document.querySelector({esc}).disabled"
                        ))
                        .await?;
                    Ok(enabled)
                }
            },
            config,
            &format!("'{selector}' clickable"),
        )
        .await
    }

    /// Clicks the element matching the selector with a real mouse click.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if no element matches, or a CDP error if
    /// the click cannot be dispatched.
    pub async fn click(&self, selector: &str) -> Result<()> {
        let element = self
            .inner
            .find_element(selector)
            .await
            .map_err(|_| HarnessError::ElementNotFound(selector.to_string()))?;

        element.click().await?;
        Ok(())
    }

    /// Dispatches a raw mouse click at viewport coordinates.
    ///
    /// Used for clicks that must land on a point rather than an element's
    /// center, such as hitting a modal's overlay outside its content panel.
    ///
    /// # Errors
    ///
    /// Returns a CDP error if the events cannot be dispatched.
    pub async fn click_at(&self, x: f64, y: f64) -> Result<()> {
        let press = DispatchMouseEventParams::builder()
            .r#type(DispatchMouseEventType::MousePressed)
            .x(x)
            .y(y)
            .button(MouseButton::Left)
            .click_count(1)
            .build()
            .map_err(|e| HarnessError::ScriptFailed(format!("invalid mouse event: {e}")))?;
        self.inner.execute(press).await?;

        let release = DispatchMouseEventParams::builder()
            .r#type(DispatchMouseEventType::MouseReleased)
            .x(x)
            .y(y)
            .button(MouseButton::Left)
            .click_count(1)
            .build()
            .map_err(|e| HarnessError::ScriptFailed(format!("invalid mouse event: {e}")))?;
        self.inner.execute(release).await?;

        Ok(())
    }

    /// Dispatches a key press (down then up) to the focused element.
    ///
    /// Supports the named keys the scenarios use (`Escape`, `Tab`, `Enter`);
    /// other values are sent with a zero virtual key code.
    ///
    /// # Errors
    ///
    /// Returns a CDP error if the events cannot be dispatched.
    pub async fn press_key(&self, key: &str) -> Result<()> {
        let (code, virtual_key) = match key {
            "Escape" => ("Escape", 27),
            "Tab" => ("Tab", 9),
            "Enter" => ("Enter", 13),
            other => (other, 0),
        };

        for event_type in [DispatchKeyEventType::KeyDown, DispatchKeyEventType::KeyUp] {
            let event = DispatchKeyEventParams::builder()
                .r#type(event_type)
                .key(key)
                .code(code)
                .windows_virtual_key_code(virtual_key)
                .build()
                .map_err(|e| HarnessError::ScriptFailed(format!("invalid key event: {e}")))?;
            self.inner.execute(event).await?;
        }

        Ok(())
    }

    /// Focuses the element and types the given text into it.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if no element matches.
    pub async fn type_text(&self, selector: &str, text: &str) -> Result<()> {
        let element = self
            .inner
            .find_element(selector)
            .await
            .map_err(|_| HarnessError::ElementNotFound(selector.to_string()))?;

        element.click().await?;
        element.type_str(text).await?;
        Ok(())
    }

    /// Clears an input's value and fires an `input` event.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if no element matches.
    pub async fn clear_value(&self, selector: &str) -> Result<()> {
        if !self.exists(selector).await? {
            return Err(HarnessError::ElementNotFound(selector.to_string()));
        }

        let sel = js_string(selector)?;
        let script = format!(
            "(() => {{ \
                const el = document.querySelector({sel}); \
                el.value = ''; \
                el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
                return true; \
            }})()"
        );
        self.evaluate::<bool>(&script).await?;
        Ok(())
    }

    /// Returns an attribute's value, or `None` when the attribute is absent.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if no element matches.
    pub async fn attribute(&self, selector: &str, name: &str) -> Result<Option<String>> {
        if !self.exists(selector).await? {
            return Err(HarnessError::ElementNotFound(selector.to_string()));
        }

        let sel = js_string(selector)?;
        let attr = js_string(name)?;
        // Serialize in the page so null round-trips unambiguously.
        let script =
            format!("JSON.stringify(document.querySelector({sel}).getAttribute({attr}))");
        let raw: String = self.evaluate(&script).await?;

        serde_json::from_str(&raw).map_err(|e| HarnessError::ScriptFailed(e.to_string()))
    }

    /// Returns a boolean DOM property, such as `required` or `disabled`.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if no element matches.
    pub async fn bool_property(&self, selector: &str, property: &str) -> Result<bool> {
        if !self.exists(selector).await? {
            return Err(HarnessError::ElementNotFound(selector.to_string()));
        }

        let sel = js_string(selector)?;
        let prop = js_string(property)?;
        self.evaluate(&format!("!!document.querySelector({sel})[{prop}]"))
            .await
    }

    /// Runs the element's native constraint validation.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if no element matches.
    pub async fn check_validity(&self, selector: &str) -> Result<bool> {
        if !self.exists(selector).await? {
            return Err(HarnessError::ElementNotFound(selector.to_string()));
        }

        let sel = js_string(selector)?;
        self.evaluate(&format!("document.querySelector({sel}).checkValidity()"))
            .await
    }

    /// Returns the id of the currently focused element ("" when none).
    ///
    /// # Errors
    ///
    /// Returns `ScriptFailed` if the query cannot be executed.
    pub async fn focused_id(&self) -> Result<String> {
        self.evaluate("document.activeElement ? document.activeElement.id : ''")
            .await
    }

    /// Returns the tag name of the currently focused element ("" when none).
    ///
    /// # Errors
    ///
    /// Returns `ScriptFailed` if the query cannot be executed.
    pub async fn focused_tag(&self) -> Result<String> {
        self.evaluate("document.activeElement ? document.activeElement.tagName : ''")
            .await
    }

    /// Returns the element's rendered bounding box.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if no element matches.
    pub async fn element_rect(&self, selector: &str) -> Result<Rect> {
        if !self.exists(selector).await? {
            return Err(HarnessError::ElementNotFound(selector.to_string()));
        }

        let sel = js_string(selector)?;
        let script = format!(
            "(() => {{ \
                const r = document.querySelector({sel}).getBoundingClientRect(); \
                return JSON.stringify({{ left: r.left, top: r.top, width: r.width, height: r.height }}); \
            }})()"
        );
        let raw: String = self.evaluate(&script).await?;

        serde_json::from_str(&raw).map_err(|e| HarnessError::ScriptFailed(e.to_string()))
    }

    /// Returns the viewport size as `(width, height)` in CSS pixels.
    ///
    /// # Errors
    ///
    /// Returns `ScriptFailed` if the query cannot be executed.
    pub async fn viewport_size(&self) -> Result<(f64, f64)> {
        let width: f64 = self.evaluate("window.innerWidth").await?;
        let height: f64 = self.evaluate("window.innerHeight").await?;
        Ok((width, height))
    }

    /// Overrides the viewport with device metrics emulation.
    ///
    /// # Errors
    ///
    /// Returns a CDP error if the override cannot be applied.
    pub async fn set_viewport(&self, width: u32, height: u32) -> Result<()> {
        let params = SetDeviceMetricsOverrideParams::builder()
            .width(i64::from(width))
            .height(i64::from(height))
            .device_scale_factor(1.0)
            .mobile(false)
            .build()
            .map_err(|e| HarnessError::ScriptFailed(format!("invalid viewport override: {e}")))?;

        self.inner.execute(params).await?;
        Ok(())
    }

    /// Removes any viewport override, restoring the window size.
    ///
    /// # Errors
    ///
    /// Returns a CDP error if the override cannot be cleared.
    pub async fn clear_viewport_override(&self) -> Result<()> {
        self.inner
            .execute(ClearDeviceMetricsOverrideParams::default())
            .await?;
        Ok(())
    }

    /// Takes a screenshot of the page and returns PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if screenshot capture fails.
    pub async fn screenshot(&self) -> Result<Vec<u8>> {
        self.inner
            .screenshot(chromiumoxide::page::ScreenshotParams::default())
            .await
            .map_err(|e| HarnessError::ScriptFailed(e.to_string()))
    }

    /// Closes the page.
    ///
    /// The console event task holds an Arc clone of the inner page; when it
    /// is still running, the page is closed by the browser at teardown
    /// instead.
    ///
    /// # Errors
    ///
    /// Returns an error if closing the page fails.
    pub async fn close(self) -> Result<()> {
        match Arc::try_unwrap(self.inner) {
            Ok(page) => {
                page.close().await.map_err(HarnessError::ChromiumOxide)?;
                Ok(())
            }
            Err(_arc) => {
                warn!("Page::close() called with outstanding references - relying on Drop");
                Ok(())
            }
        }
    }
}

/// Encodes a string as a JavaScript string literal via JSON.
///
/// Prevents injection through backticks, quotes, and newlines in selectors.
fn js_string(value: &str) -> Result<String> {
    serde_json::to_string(value).map_err(|e| HarnessError::ScriptFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn js_string_escapes_injection_attempts() {
        let cases = vec![
            ("div", r#""div""#),
            (r#"'injected'"#, r#""'injected'""#),
            (r#"`injected`"#, r#""`injected`""#),
        ];

        for (input, expected) in cases {
            assert_eq!(js_string(input).unwrap(), expected);
        }
    }

    #[test]
    fn js_string_wraps_dangerous_input_in_quotes() {
        let dangerous = r#"'); alert('xss');//"#;
        let escaped = js_string(dangerous).unwrap();

        assert!(escaped.starts_with('"') && escaped.ends_with('"'));
        assert!(escaped.len() > dangerous.len());
    }

    #[test]
    fn rect_deserializes_from_page_json() {
        let rect: Rect =
            serde_json::from_str(r#"{"left":10.5,"top":20.0,"width":600.0,"height":400.0}"#)
                .unwrap();
        assert_eq!(rect.width, 600.0);
        assert_eq!(rect.left, 10.5);
    }
}

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-flight-ui]";

/// Default CSS for the tracker page along with easy-to-override design tokens.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --flight-font-family: 'Inter', system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
  --flight-bg: #ffffff;
  --flight-surface: #f8fafc;
  --flight-border: rgba(148, 163, 184, 0.28);
  --flight-radius: 14px;
  --flight-text: #1f2933;
  --flight-muted: #52606d;
  --flight-brand: #c41e3a;
  --flight-active: #28a745;
  --flight-progress: #007bff;
  --flight-badge-default: #6c757d;
}

.flight-root {
  font-family: var(--flight-font-family);
  background: var(--flight-bg);
  color: var(--flight-text);
  max-width: 880px;
  margin: 0 auto;
  padding: 28px;
  display: flex;
  flex-direction: column;
  gap: 22px;
}

.flight-header h1 {
  margin: 4px 0;
  color: var(--flight-brand);
}

.flight-eyebrow {
  text-transform: uppercase;
  letter-spacing: 0.08em;
  font-size: 0.78rem;
  color: var(--flight-muted);
}

.flight-route,
.flight-updated {
  margin: 0;
  color: var(--flight-muted);
}

.booking-card {
  display: grid;
  grid-template-columns: repeat(3, minmax(0, 1fr));
  gap: 16px;
  background: var(--flight-surface);
  border: 1px solid var(--flight-border);
  border-radius: var(--flight-radius);
  padding: 18px;
}

.booking-field {
  display: flex;
  flex-direction: column;
  gap: 4px;
}

.booking-label {
  font-size: 0.78rem;
  color: var(--flight-muted);
}

.booking-value {
  font-family: 'Courier New', monospace;
  font-weight: 600;
  letter-spacing: 0.08em;
}

.status-list {
  display: grid;
  gap: 12px;
}

.status-item {
  display: flex;
  justify-content: space-between;
  border: 1px solid var(--flight-border);
  border-left: 4px solid var(--flight-border);
  border-radius: var(--flight-radius);
  padding: 14px 18px;
  transition: transform 0.2s ease, box-shadow 0.2s ease;
}

.status-item:hover {
  transform: translateY(-2px);
  box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
}

.status-item.active {
  border-left-color: var(--flight-active);
}

.flight-actions {
  display: flex;
  flex-wrap: wrap;
  gap: 12px;
}

.btn {
  border: 1px solid var(--flight-border);
  border-radius: 999px;
  background: var(--flight-surface);
  padding: 10px 18px;
  font-weight: 600;
  cursor: pointer;
  transition: transform 0.15s ease;
}

.btn:active {
  transform: scale(0.95);
}

.btn-primary {
  background: var(--flight-brand);
  border-color: var(--flight-brand);
  color: #ffffff;
}

.tracking-modal {
  display: none;
  position: fixed;
  inset: 0;
  background: rgba(15, 23, 42, 0.55);
  align-items: center;
  justify-content: center;
  z-index: 9000;
}

.tracking-modal.active {
  display: flex;
}

.tracking-dialog {
  background: var(--flight-bg);
  border-radius: var(--flight-radius);
  padding: 24px;
  width: min(520px, 92vw);
  display: flex;
  flex-direction: column;
  gap: 14px;
}

.tracking-header {
  display: flex;
  justify-content: space-between;
  align-items: center;
}

.tracking-close {
  border: none;
  background: transparent;
  font-size: 1.6rem;
  cursor: pointer;
}

.status-badge {
  align-self: flex-start;
  background: var(--flight-badge-default);
  color: #ffffff;
  border-radius: 999px;
  padding: 4px 12px;
  font-weight: 600;
}

.progress-bar {
  height: 10px;
  background: var(--flight-surface);
  border-radius: 999px;
  overflow: hidden;
}

.progress-fill {
  height: 100%;
  background: var(--flight-progress);
  transition: width 0.6s ease;
}

.tracking-message,
.tracking-gate {
  margin: 0;
}

.toast-stack {
  position: fixed;
  top: 20px;
  right: 20px;
  display: flex;
  flex-direction: column;
  gap: 10px;
  z-index: 10000;
}

.toast {
  padding: 15px 20px;
  border-radius: 8px;
  color: #ffffff;
  font-weight: 500;
  animation: slideIn 0.3s ease;
}

.toast.toast-leaving {
  animation: slideIn 0.3s ease reverse forwards;
}

@keyframes slideIn {
  from { transform: translateX(100%); opacity: 0; }
  to { transform: translateX(0); opacity: 1; }
}

@media (max-width: 640px) {
  .booking-card {
    grid-template-columns: 1fr;
  }
}
"#;

pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document không có thẻ <head>"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-flight-ui", "v1")?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el.clone().dyn_into::<Node>()?)?;

    Ok(())
}

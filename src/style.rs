//! Inline style assembly and state color resolution.
//!
//! Two concerns live here. [`StyleAttr`] collects the CSS declarations for
//! the container's `style` attribute; only options the caller explicitly
//! supplied end up in it, because the defaults live in the shipped
//! stylesheet. [`Palette`] holds the resolved color triple for each of the
//! three semantic states the client script toggles between.

use crate::color::{contrast_text, Color};

/// Fraction by which a state background is darkened to derive its border.
const BORDER_DARKEN: f64 = 0.1;

/// Default state backgrounds, matching the shipped stylesheet's palette.
const DEFAULT_RUNNING_BACKGROUND: &str = "#43ac6a";
const DEFAULT_FINISHED_BACKGROUND: &str = "#f04124";
const DEFAULT_WARNING_BACKGROUND: &str = "#e6c229";

/// The visual states the client script toggles via CSS classes.
///
/// This crate only supplies each state's colors and the warn threshold;
/// the toggling itself happens in the shipped script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Counting down, above the warn threshold.
    Running,
    /// Reached zero.
    Finished,
    /// Counting down, at or below the warn threshold.
    Warning,
}

impl TimerState {
    pub(crate) fn default_background(self) -> &'static str {
        match self {
            TimerState::Running => DEFAULT_RUNNING_BACKGROUND,
            TimerState::Finished => DEFAULT_FINISHED_BACKGROUND,
            TimerState::Warning => DEFAULT_WARNING_BACKGROUND,
        }
    }
}

/// The resolved border/background/text colors for one state.
///
/// Values are kept as CSS strings: recognized colors are normalized to
/// lowercase hex, everything else passes through exactly as supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateColors {
    /// Background color of the widget in this state.
    pub background: String,
    /// Border color; darkened background unless explicitly overridden.
    pub border: String,
    /// Text color; black or white by luminance unless overridden.
    pub text: String,
}

/// Per-state caller overrides, prior to resolution.
#[derive(Debug, Clone, Default)]
pub(crate) struct StateOverrides {
    pub background: Option<String>,
    pub border: Option<String>,
    pub text: Option<String>,
}

/// Resolve one state's color triple from its overrides.
///
/// The background defaults per state. The border is the background
/// darkened by a fixed fraction in OKLab; the text is black or white by
/// the background's relative luminance. Both derivations are skipped when
/// the caller supplied an explicit value. A background this crate cannot
/// parse (arbitrary CSS is allowed through) falls back to reusing the
/// background string for the border and to white text.
pub(crate) fn resolve_state(state: TimerState, overrides: &StateOverrides) -> StateColors {
    let background = overrides
        .background
        .clone()
        .unwrap_or_else(|| state.default_background().to_string());
    let parsed = Color::parse(&background);

    let border = overrides.border.clone().unwrap_or_else(|| match parsed {
        Some(color) => color.darken(BORDER_DARKEN).to_hex(),
        None => background.clone(),
    });
    let text = overrides.text.clone().unwrap_or_else(|| match parsed {
        Some(color) => contrast_text(color).to_hex(),
        None => "#ffffff".to_string(),
    });

    let background = match parsed {
        Some(color) => color.to_hex(),
        None => background,
    };

    StateColors {
        background,
        border,
        text,
    }
}

/// Resolved colors for all three states, ready for stylesheet templating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Colors applied while the timer is running.
    pub running: StateColors,
    /// Colors applied once the timer reaches zero.
    pub finished: StateColors,
    /// Colors applied inside the warn threshold.
    pub warning: StateColors,
}

impl Palette {
    pub(crate) fn resolve(
        running: &StateOverrides,
        finished: &StateOverrides,
        warning: &StateOverrides,
    ) -> Palette {
        Palette {
            running: resolve_state(TimerState::Running, running),
            finished: resolve_state(TimerState::Finished, finished),
            warning: resolve_state(TimerState::Warning, warning),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::resolve(
            &StateOverrides::default(),
            &StateOverrides::default(),
            &StateOverrides::default(),
        )
    }
}

/// Ordered CSS declarations for the container's `style` attribute.
///
/// Declarations keep insertion order so the rendered attribute is
/// deterministic. Setting a property twice keeps the later value, which is
/// how the fullscreen preset overrides caller positioning.
#[derive(Debug, Clone, Default)]
pub struct StyleAttr {
    declarations: Vec<(String, String)>,
    raw: Option<String>,
}

impl StyleAttr {
    /// Add or replace one declaration.
    pub fn put(&mut self, property: &str, value: &str) {
        if let Some(slot) = self
            .declarations
            .iter_mut()
            .find(|(existing, _)| existing == property)
        {
            slot.1 = value.to_string();
        } else {
            self.declarations
                .push((property.to_string(), value.to_string()));
        }
    }

    /// Add a declaration only when a value was supplied.
    pub fn put_opt(&mut self, property: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.put(property, value);
        }
    }

    /// Append a raw caller-supplied style tail, rendered verbatim after
    /// the structured declarations.
    pub fn set_raw(&mut self, raw: &str) {
        self.raw = Some(raw.to_string());
    }

    /// Look up a declaration by property name.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(existing, _)| existing == property)
            .map(|(_, value)| value.as_str())
    }

    /// Whether nothing would be rendered.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty() && self.raw.is_none()
    }

    /// Render as the value of a `style` attribute.
    pub fn render(&self) -> String {
        let mut parts: Vec<String> = self
            .declarations
            .iter()
            .map(|(property, value)| format!("{property}: {value};"))
            .collect();
        if let Some(raw) = &self.raw {
            parts.push(raw.trim().to_string());
        }
        parts.join(" ")
    }
}

//! Countdown widget builder.
//!
//! This module turns a duration plus presentation/behavior options into a
//! self-contained widget: an HTML fragment annotated with data attributes,
//! plus a per-widget asset bundle (templated stylesheet and the fixed
//! client script) that a host document embeds alongside it.
//!
//! The builder is a pure request-to-artifact transform. All validation and
//! normalization happens in [`new`]; the returned [`Model`] is never
//! mutated afterwards and holds no state beyond what rendering needs.
//!
//! # Basic Usage
//!
//! ```rust
//! use countdown_widget::countdown::{new, with_warn_when, with_class};
//!
//! // A five minute timer that turns amber for the last 30 seconds.
//! let timer = new(5, 0, &[with_warn_when(30), with_class("top-right")]).unwrap();
//! let html = timer.view();
//! assert!(html.contains("data-warn-when=\"30\""));
//! assert!(html.contains("class=\"countdown top-right\""));
//! ```
//!
//! # Emitted markup
//!
//! The fragment is a container `<div>` carrying the widget identifier,
//! the `countdown` class plus any extras, the data attributes the client
//! script reads, and an inline style assembled only from options the
//! caller actually supplied. Nested inside are a small control region
//! (bump-down / bump-up buttons) and the time display: zero-padded
//! two-digit minutes and seconds around a colon marker.

use crate::assets::{self, AssetBundle};
use crate::error::CountdownError;
use crate::ident;
use crate::style::{Palette, StateOverrides, StyleAttr, TimerState};

/// Offset applied to `right` and `bottom` when no positioning is given.
const DEFAULT_OFFSET: &str = "0";

/// Sound behavior when the timer finishes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Sound {
    /// Stay silent (the default).
    #[default]
    Off,
    /// Play the client script's built-in sound.
    On,
    /// Play a caller-supplied audio URL.
    Source(String),
}

/// Configuration options for the countdown builder.
///
/// Options are applied in order; when the same scalar option appears twice
/// the later occurrence wins. This is also how [`new_fullscreen`] forces
/// its preset over caller options.
///
/// # Examples
///
/// ```rust
/// use countdown_widget::countdown::{new, with_update_every, with_top, with_font_size};
///
/// let timer = new(10, 0, &[
///     with_update_every(15),
///     with_top("1em"),
///     with_font_size("4rem"),
/// ]).unwrap();
/// assert_eq!(timer.update_every(), 15);
/// ```
#[derive(Debug, Clone)]
pub enum CountdownOption {
    /// Use a caller-supplied identifier instead of generating one.
    /// Must start with a letter and contain only letters, digits,
    /// `_`, `:`, `.` or `-`.
    WithId(String),
    /// Add extra CSS classes next to the base `countdown` class.
    /// Duplicates are dropped, keeping encounter order.
    WithClasses(Vec<String>),
    /// Append a raw style tail after the structured declarations.
    WithInlineStyle(String),
    /// Sound played when the timer finishes.
    WithPlaySound(Sound),
    /// Seconds remaining at which the warning state engages. Zero means
    /// no warning state.
    WithWarnWhen(u64),
    /// Seconds between display updates. Values above one also enable
    /// colon blinking unless overridden.
    WithUpdateEvery(u64),
    /// Explicitly enable or disable colon blinking while running.
    WithBlinkColon(bool),
    /// Start counting down as soon as the document loads.
    WithStartImmediately(bool),
    /// `top` offset of the container.
    WithTop(String),
    /// `right` offset of the container.
    WithRight(String),
    /// `bottom` offset of the container.
    WithBottom(String),
    /// `left` offset of the container.
    WithLeft(String),
    /// `font-size` of the time display.
    WithFontSize(String),
    /// `margin` around the container.
    WithMargin(String),
    /// `padding` inside the container.
    WithPadding(String),
    /// `box-shadow` of the container.
    WithBoxShadow(String),
    /// `border-width` of the container.
    WithBorderWidth(String),
    /// `border-radius` of the container.
    WithBorderRadius(String),
    /// `line-height` of the time display.
    WithLineHeight(String),
    /// Background color of the idle widget.
    WithBackground(String),
    /// Text color of the idle widget.
    WithTextColor(String),
    /// Border color of the idle widget.
    WithBorderColor(String),
    /// Background color for one semantic state.
    WithStateBackground(TimerState, String),
    /// Border color for one semantic state, suppressing derivation.
    WithStateBorder(TimerState, String),
    /// Text color for one semantic state, suppressing derivation.
    WithStateText(TimerState, String),
}

/// Collected option values, tri-state where defaults are conditional.
///
/// `Option` fields distinguish "not supplied" from "supplied" so the
/// defaulting pass can resolve interdependent defaults (`right` defaults
/// only when `left` was never set, and vice versa for `bottom`/`top`).
#[derive(Debug, Clone, Default)]
struct Options {
    id: Option<String>,
    classes: Vec<String>,
    raw_style: Option<String>,
    play_sound: Sound,
    warn_when: Option<u64>,
    update_every: Option<u64>,
    blink_colon: Option<bool>,
    start_immediately: Option<bool>,
    top: Option<String>,
    right: Option<String>,
    bottom: Option<String>,
    left: Option<String>,
    font_size: Option<String>,
    margin: Option<String>,
    padding: Option<String>,
    box_shadow: Option<String>,
    border_width: Option<String>,
    border_radius: Option<String>,
    line_height: Option<String>,
    background: Option<String>,
    text_color: Option<String>,
    border_color: Option<String>,
    running: StateOverrides,
    finished: StateOverrides,
    warning: StateOverrides,
}

impl CountdownOption {
    fn apply(&self, options: &mut Options) {
        match self {
            CountdownOption::WithId(id) => options.id = Some(id.clone()),
            CountdownOption::WithClasses(classes) => {
                options.classes.extend(classes.iter().cloned());
            }
            CountdownOption::WithInlineStyle(style) => options.raw_style = Some(style.clone()),
            CountdownOption::WithPlaySound(sound) => options.play_sound = sound.clone(),
            CountdownOption::WithWarnWhen(seconds) => options.warn_when = Some(*seconds),
            CountdownOption::WithUpdateEvery(seconds) => options.update_every = Some(*seconds),
            CountdownOption::WithBlinkColon(blink) => options.blink_colon = Some(*blink),
            CountdownOption::WithStartImmediately(start) => {
                options.start_immediately = Some(*start);
            }
            CountdownOption::WithTop(v) => options.top = Some(v.clone()),
            CountdownOption::WithRight(v) => options.right = Some(v.clone()),
            CountdownOption::WithBottom(v) => options.bottom = Some(v.clone()),
            CountdownOption::WithLeft(v) => options.left = Some(v.clone()),
            CountdownOption::WithFontSize(v) => options.font_size = Some(v.clone()),
            CountdownOption::WithMargin(v) => options.margin = Some(v.clone()),
            CountdownOption::WithPadding(v) => options.padding = Some(v.clone()),
            CountdownOption::WithBoxShadow(v) => options.box_shadow = Some(v.clone()),
            CountdownOption::WithBorderWidth(v) => options.border_width = Some(v.clone()),
            CountdownOption::WithBorderRadius(v) => options.border_radius = Some(v.clone()),
            CountdownOption::WithLineHeight(v) => options.line_height = Some(v.clone()),
            CountdownOption::WithBackground(v) => options.background = Some(v.clone()),
            CountdownOption::WithTextColor(v) => options.text_color = Some(v.clone()),
            CountdownOption::WithBorderColor(v) => options.border_color = Some(v.clone()),
            CountdownOption::WithStateBackground(state, v) => {
                options.state_mut(*state).background = Some(v.clone());
            }
            CountdownOption::WithStateBorder(state, v) => {
                options.state_mut(*state).border = Some(v.clone());
            }
            CountdownOption::WithStateText(state, v) => {
                options.state_mut(*state).text = Some(v.clone());
            }
        }
    }
}

impl Options {
    fn state_mut(&mut self, state: TimerState) -> &mut StateOverrides {
        match state {
            TimerState::Running => &mut self.running,
            TimerState::Finished => &mut self.finished,
            TimerState::Warning => &mut self.warning,
        }
    }
}

/// Sets a caller-chosen identifier.
pub fn with_id(id: impl Into<String>) -> CountdownOption {
    CountdownOption::WithId(id.into())
}

/// Adds one extra CSS class.
pub fn with_class(class: impl Into<String>) -> CountdownOption {
    CountdownOption::WithClasses(vec![class.into()])
}

/// Adds several extra CSS classes at once.
pub fn with_classes<I, S>(classes: I) -> CountdownOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    CountdownOption::WithClasses(classes.into_iter().map(Into::into).collect())
}

/// Appends a raw inline style tail to the container.
pub fn with_inline_style(style: impl Into<String>) -> CountdownOption {
    CountdownOption::WithInlineStyle(style.into())
}

/// Enables or disables the built-in finish sound.
pub fn with_play_sound(enabled: bool) -> CountdownOption {
    CountdownOption::WithPlaySound(if enabled { Sound::On } else { Sound::Off })
}

/// Plays a caller-supplied audio URL when the timer finishes.
pub fn with_sound_source(url: impl Into<String>) -> CountdownOption {
    CountdownOption::WithPlaySound(Sound::Source(url.into()))
}

/// Engages the warning state at the given seconds remaining.
pub fn with_warn_when(seconds: u64) -> CountdownOption {
    CountdownOption::WithWarnWhen(seconds)
}

/// Updates the display every `seconds` instead of every second.
pub fn with_update_every(seconds: u64) -> CountdownOption {
    CountdownOption::WithUpdateEvery(seconds)
}

/// Overrides colon blinking while the timer runs.
pub fn with_blink_colon(blink: bool) -> CountdownOption {
    CountdownOption::WithBlinkColon(blink)
}

/// Starts the countdown as soon as the document loads.
pub fn with_start_immediately(start: bool) -> CountdownOption {
    CountdownOption::WithStartImmediately(start)
}

/// Sets the container's `top` offset.
pub fn with_top(value: impl Into<String>) -> CountdownOption {
    CountdownOption::WithTop(value.into())
}

/// Sets the container's `right` offset.
pub fn with_right(value: impl Into<String>) -> CountdownOption {
    CountdownOption::WithRight(value.into())
}

/// Sets the container's `bottom` offset.
pub fn with_bottom(value: impl Into<String>) -> CountdownOption {
    CountdownOption::WithBottom(value.into())
}

/// Sets the container's `left` offset.
pub fn with_left(value: impl Into<String>) -> CountdownOption {
    CountdownOption::WithLeft(value.into())
}

/// Sets the time display's `font-size`.
pub fn with_font_size(value: impl Into<String>) -> CountdownOption {
    CountdownOption::WithFontSize(value.into())
}

/// Sets the container's `margin`.
pub fn with_margin(value: impl Into<String>) -> CountdownOption {
    CountdownOption::WithMargin(value.into())
}

/// Sets the container's `padding`.
pub fn with_padding(value: impl Into<String>) -> CountdownOption {
    CountdownOption::WithPadding(value.into())
}

/// Sets the container's `box-shadow`.
pub fn with_box_shadow(value: impl Into<String>) -> CountdownOption {
    CountdownOption::WithBoxShadow(value.into())
}

/// Sets the container's `border-width`.
pub fn with_border_width(value: impl Into<String>) -> CountdownOption {
    CountdownOption::WithBorderWidth(value.into())
}

/// Sets the container's `border-radius`.
pub fn with_border_radius(value: impl Into<String>) -> CountdownOption {
    CountdownOption::WithBorderRadius(value.into())
}

/// Sets the time display's `line-height`.
pub fn with_line_height(value: impl Into<String>) -> CountdownOption {
    CountdownOption::WithLineHeight(value.into())
}

/// Sets the idle widget's background color.
pub fn with_background(color: impl Into<String>) -> CountdownOption {
    CountdownOption::WithBackground(color.into())
}

/// Sets the idle widget's text color.
pub fn with_text_color(color: impl Into<String>) -> CountdownOption {
    CountdownOption::WithTextColor(color.into())
}

/// Sets the idle widget's border color.
pub fn with_border_color(color: impl Into<String>) -> CountdownOption {
    CountdownOption::WithBorderColor(color.into())
}

/// Sets the background color for one semantic state.
///
/// The state's border and text colors are derived from this background
/// (darkened border, black-or-white text) unless also overridden.
pub fn with_state_background(state: TimerState, color: impl Into<String>) -> CountdownOption {
    CountdownOption::WithStateBackground(state, color.into())
}

/// Sets the border color for one semantic state.
pub fn with_state_border(state: TimerState, color: impl Into<String>) -> CountdownOption {
    CountdownOption::WithStateBorder(state, color.into())
}

/// Sets the text color for one semantic state.
pub fn with_state_text(state: TimerState, color: impl Into<String>) -> CountdownOption {
    CountdownOption::WithStateText(state, color.into())
}

/// A fully validated, normalized countdown widget.
///
/// Constructed by [`new`] or [`new_fullscreen`], rendered by
/// [`Model::view`], materialized on disk by [`Model::write_assets`].
/// Instances are plain data; nothing here talks to the filesystem or any
/// shared state.
#[derive(Debug, Clone)]
pub struct Model {
    id: String,
    minutes: u64,
    seconds: u64,
    classes: Vec<String>,
    warn_when: u64,
    update_every: u64,
    blink_colon: bool,
    start_immediately: bool,
    play_sound: Sound,
    style: StyleAttr,
    palette: Palette,
}

/// Builds a countdown widget.
///
/// `minutes` and `seconds` may be any non-negative pair; overflowing
/// seconds are folded into minutes first. The normalized minute count must
/// stay below 100 so it fits the two-digit display, otherwise
/// [`CountdownError::DurationOutOfRange`] is returned. A caller-supplied
/// identifier is validated; without one, a random `timer_xxxxxxxx`
/// identifier is drawn from an isolated source.
///
/// # Examples
///
/// ```rust
/// use countdown_widget::countdown::new;
///
/// // 90 seconds normalizes to 01:30.
/// let timer = new(0, 90, &[]).unwrap();
/// assert_eq!((timer.minutes(), timer.seconds()), (1, 30));
///
/// // 100 minutes does not fit the display.
/// assert!(new(100, 0, &[]).is_err());
/// ```
pub fn new(
    minutes: u64,
    seconds: u64,
    opts: &[CountdownOption],
) -> Result<Model, CountdownError> {
    let mut options = Options::default();
    for opt in opts {
        opt.apply(&mut options);
    }
    build(minutes, seconds, options)
}

/// Builds a full-viewport countdown widget.
///
/// A fixed-option preset over [`new`]: the widget fills the viewport
/// (via the `countdown-fullscreen` class), all offsets, margin, padding
/// and border are zeroed, the drop shadow is removed, and
/// `start_immediately` is disabled regardless of caller options. All
/// other options delegate to [`new`] unchanged.
///
/// # Examples
///
/// ```rust
/// use countdown_widget::countdown::{new_fullscreen, with_start_immediately};
///
/// let timer = new_fullscreen(0, 42, &[with_start_immediately(true)]).unwrap();
/// assert!(!timer.start_immediately());
/// assert!(timer.classes().contains(&"countdown-fullscreen".to_string()));
/// ```
pub fn new_fullscreen(
    minutes: u64,
    seconds: u64,
    opts: &[CountdownOption],
) -> Result<Model, CountdownError> {
    let mut combined = opts.to_vec();
    combined.extend([
        with_class("countdown-fullscreen"),
        with_top("0"),
        with_right("0"),
        with_bottom("0"),
        with_left("0"),
        with_margin("0"),
        with_padding("0"),
        with_border_width("0"),
        with_border_radius("0"),
        with_box_shadow("none"),
    ]);
    let mut model = new(minutes, seconds, &combined)?;
    // Forced unconditionally; a later caller option must not re-enable it.
    model.start_immediately = false;
    Ok(model)
}

fn build(minutes: u64, seconds: u64, options: Options) -> Result<Model, CountdownError> {
    // Normalize through total seconds; arithmetic stays checked so an
    // absurd input reports out-of-range rather than wrapping.
    let total = minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .ok_or(CountdownError::DurationOutOfRange { minutes, seconds })?;
    let minutes = total / 60;
    let seconds = total % 60;
    if minutes >= 100 {
        return Err(CountdownError::DurationOutOfRange { minutes, seconds });
    }

    let id = match options.id {
        Some(id) => {
            ident::validate(&id)?;
            id
        }
        None => ident::generate_default(),
    };

    let mut classes = vec!["countdown".to_string()];
    for class in &options.classes {
        for piece in class.split_whitespace() {
            if !classes.iter().any(|existing| existing == piece) {
                classes.push(piece.to_string());
            }
        }
    }

    let update_every = options.update_every.unwrap_or(1).max(1);
    let blink_colon = options.blink_colon.unwrap_or(update_every > 1);

    // Conditional positioning defaults: the widget sits in the bottom
    // right corner unless the caller anchored the opposite edge.
    let right = options
        .right
        .or_else(|| options.left.is_none().then(|| DEFAULT_OFFSET.to_string()));
    let bottom = options
        .bottom
        .or_else(|| options.top.is_none().then(|| DEFAULT_OFFSET.to_string()));

    let mut style = StyleAttr::default();
    style.put_opt("top", options.top.as_deref());
    style.put_opt("right", right.as_deref());
    style.put_opt("bottom", bottom.as_deref());
    style.put_opt("left", options.left.as_deref());
    style.put_opt("margin", options.margin.as_deref());
    style.put_opt("padding", options.padding.as_deref());
    style.put_opt("font-size", options.font_size.as_deref());
    style.put_opt("line-height", options.line_height.as_deref());
    style.put_opt("border-width", options.border_width.as_deref());
    style.put_opt("border-radius", options.border_radius.as_deref());
    style.put_opt("box-shadow", options.box_shadow.as_deref());
    style.put_opt("background", options.background.as_deref());
    style.put_opt("color", options.text_color.as_deref());
    style.put_opt("border-color", options.border_color.as_deref());
    if let Some(raw) = &options.raw_style {
        style.set_raw(raw);
    }

    let palette = Palette::resolve(&options.running, &options.finished, &options.warning);

    Ok(Model {
        id,
        minutes,
        seconds,
        classes,
        warn_when: options.warn_when.unwrap_or(0),
        update_every,
        blink_colon,
        start_immediately: options.start_immediately.unwrap_or(false),
        play_sound: options.play_sound,
        style,
        palette,
    })
}

/// Escape a value for use inside a double-quoted HTML attribute.
fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl Model {
    /// The widget's identifier, as emitted on the container element.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Normalized minute count, `0..100`.
    pub fn minutes(&self) -> u64 {
        self.minutes
    }

    /// Normalized second count, `0..60`.
    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    /// Seconds remaining at which the warning state engages; zero when
    /// the warning state is disabled.
    pub fn warn_when(&self) -> u64 {
        self.warn_when
    }

    /// Seconds between display updates, at least one.
    pub fn update_every(&self) -> u64 {
        self.update_every
    }

    /// Whether the colon blinks while running.
    pub fn blink_colon(&self) -> bool {
        self.blink_colon
    }

    /// Whether the countdown starts on document load.
    pub fn start_immediately(&self) -> bool {
        self.start_immediately
    }

    /// The container's class list, `countdown` first, extras deduplicated
    /// in encounter order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// The container's inline style, built only from supplied options.
    pub fn style_attribute(&self) -> &StyleAttr {
        &self.style
    }

    /// The resolved per-state colors used by the stylesheet.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The data attributes the client script reads, in emission order.
    ///
    /// Attributes are present only when their value is meaningful: no
    /// `data-warn-when` without a threshold, no `data-update-every` at
    /// the default interval, no flags that are off.
    pub fn data_attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = Vec::new();
        if self.warn_when > 0 {
            attrs.push(("data-warn-when", self.warn_when.to_string()));
        }
        if self.update_every > 1 {
            attrs.push(("data-update-every", self.update_every.to_string()));
        }
        match &self.play_sound {
            Sound::Off => {}
            Sound::On => attrs.push(("data-play-sound", "true".to_string())),
            Sound::Source(url) => attrs.push(("data-play-sound", url.clone())),
        }
        if self.blink_colon {
            attrs.push(("data-blink-colon", "true".to_string()));
        }
        if self.start_immediately {
            attrs.push(("data-start-immediately", "true".to_string()));
        }
        attrs
    }

    /// Renders the widget's markup fragment.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use countdown_widget::countdown::{new, with_id};
    ///
    /// let timer = new(5, 0, &[with_id("break-timer")]).unwrap();
    /// let html = timer.view();
    /// assert!(html.starts_with("<div id=\"break-timer\""));
    /// assert!(html.contains(">05<"));
    /// assert!(html.contains(">00<"));
    /// ```
    pub fn view(&self) -> String {
        let mut html = String::new();
        html.push_str(&format!(
            "<div id=\"{}\" class=\"{}\"",
            escape_attr(&self.id),
            escape_attr(&self.classes.join(" "))
        ));
        for (name, value) in self.data_attributes() {
            html.push_str(&format!(" {name}=\"{}\"", escape_attr(&value)));
        }
        if !self.style.is_empty() {
            html.push_str(&format!(" style=\"{}\"", escape_attr(&self.style.render())));
        }
        html.push('>');

        html.push_str(concat!(
            "<div class=\"countdown-controls\">",
            "<button class=\"countdown-bump-down\" tabindex=\"-1\" title=\"Subtract 10 seconds\">&minus;</button>",
            "<button class=\"countdown-bump-up\" tabindex=\"-1\" title=\"Add 10 seconds\">&plus;</button>",
            "</div>"
        ));
        html.push_str(&format!(
            concat!(
                "<code class=\"countdown-time\">",
                "<span class=\"countdown-digits minutes\">{:02}</span>",
                "<span class=\"countdown-digits colon\">:</span>",
                "<span class=\"countdown-digits seconds\">{:02}</span>",
                "</code>"
            ),
            self.minutes, self.seconds
        ));
        html.push_str("</div>");
        html
    }

    /// The substituted stylesheet for this widget, without touching the
    /// filesystem. Useful to embedders that inline CSS.
    pub fn style_sheet(&self) -> String {
        assets::render_stylesheet(&self.palette)
    }

    /// Writes this widget's asset bundle into a fresh private directory.
    ///
    /// Creates a unique temp directory, writes the substituted stylesheet
    /// and the unmodified client script into it, and returns their
    /// locations. Each call gets its own directory, so concurrent widgets
    /// in one process never clobber each other's stylesheet variant. The
    /// directory lives until the host cleans its temp storage; there is
    /// no cleanup contract.
    pub fn write_assets(&self) -> Result<AssetBundle, CountdownError> {
        assets::write(&self.palette)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn normalizes_overflowing_seconds() {
        let timer = new(0, 125, &[]).unwrap();
        assert_eq!(timer.minutes(), 2);
        assert_eq!(timer.seconds(), 5);

        let view = timer.view();
        assert!(view.contains("<span class=\"countdown-digits minutes\">02</span>"));
        assert!(view.contains("<span class=\"countdown-digits seconds\">05</span>"));
    }

    #[test]
    fn zero_pads_both_fields() {
        let timer = new(7, 3, &[]).unwrap();
        let view = timer.view();
        assert!(view.contains(">07<"));
        assert!(view.contains(">03<"));
    }

    #[test]
    fn rejects_durations_of_100_minutes_or_more() {
        let err = new(100, 0, &[]).unwrap_err();
        assert!(matches!(
            err,
            CountdownError::DurationOutOfRange {
                minutes: 100,
                seconds: 0
            }
        ));

        // Overflow through the seconds argument counts too.
        assert!(new(0, 6000, &[]).is_err());
        assert!(new(99, 60, &[]).is_err());
        assert!(new(99, 59, &[]).is_ok());
    }

    #[test]
    fn rejects_durations_too_large_to_normalize() {
        // Inputs past the range of total seconds must error, not wrap.
        assert!(matches!(
            new(u64::MAX, 0, &[]).unwrap_err(),
            CountdownError::DurationOutOfRange { .. }
        ));
        assert!(new(u64::MAX / 60, u64::MAX, &[]).is_err());
        assert!(new(0, u64::MAX, &[]).is_err());
    }

    #[test]
    fn generates_identifier_when_none_supplied() {
        let timer = new(1, 0, &[]).unwrap();
        assert!(timer.id().starts_with("timer_"));
        assert_eq!(timer.id().len(), "timer_".len() + 8);

        let other = new(1, 0, &[]).unwrap();
        assert_ne!(timer.id(), other.id());
    }

    #[test]
    fn validates_supplied_identifier() {
        assert!(new(1, 0, &[with_id("timer_1:a.b-c")]).is_ok());

        let err = new(1, 0, &[with_id("42timer")]).unwrap_err();
        assert!(matches!(err, CountdownError::InvalidIdentifier { .. }));

        let err = new(1, 0, &[with_id("timer one")]).unwrap_err();
        assert!(err.to_string().contains("' '"));
    }

    #[test]
    fn building_leaves_caller_rng_untouched() {
        let mut reference = StdRng::seed_from_u64(42);
        let expected: Vec<u32> = (0..4).map(|_| reference.gen()).collect();

        let mut rng = StdRng::seed_from_u64(42);
        let mut observed = Vec::new();
        for _ in 0..4 {
            let _ = new(1, 0, &[]).unwrap();
            observed.push(rng.gen::<u32>());
        }
        assert_eq!(observed, expected);
    }

    #[test]
    fn class_list_deduplicates_in_encounter_order() {
        let timer = new(1, 0, &[with_classes(["countdown", "foo", "foo"])]).unwrap();
        assert_eq!(timer.classes(), ["countdown", "foo"]);

        let view = timer.view();
        assert!(view.contains("class=\"countdown foo\""));
    }

    #[test]
    fn positioning_defaults_to_bottom_right() {
        let timer = new(1, 0, &[]).unwrap();
        let style = timer.style_attribute();
        assert_eq!(style.get("right"), Some("0"));
        assert_eq!(style.get("bottom"), Some("0"));
        assert_eq!(style.get("top"), None);
        assert_eq!(style.get("left"), None);
    }

    #[test]
    fn left_suppresses_right_default_only() {
        let timer = new(1, 0, &[with_left("1em")]).unwrap();
        let style = timer.style_attribute();
        assert_eq!(style.get("left"), Some("1em"));
        assert_eq!(style.get("right"), None);
        assert_eq!(style.get("bottom"), Some("0"));
    }

    #[test]
    fn top_suppresses_bottom_default_only() {
        let timer = new(1, 0, &[with_top("0")]).unwrap();
        let style = timer.style_attribute();
        assert_eq!(style.get("top"), Some("0"));
        assert_eq!(style.get("bottom"), None);
        assert_eq!(style.get("right"), Some("0"));
    }

    #[test]
    fn explicit_positioning_is_kept_verbatim() {
        let timer = new(1, 0, &[with_right("5%"), with_bottom("10px")]).unwrap();
        let style = timer.style_attribute();
        assert_eq!(style.get("right"), Some("5%"));
        assert_eq!(style.get("bottom"), Some("10px"));
    }

    #[test]
    fn style_holds_only_supplied_options() {
        let timer = new(1, 0, &[with_font_size("4rem")]).unwrap();
        let style = timer.style_attribute();
        assert_eq!(style.get("font-size"), Some("4rem"));
        assert_eq!(style.get("margin"), None);
        assert_eq!(style.get("padding"), None);
        assert_eq!(style.get("border-width"), None);
    }

    #[test]
    fn raw_inline_style_is_appended() {
        let timer = new(1, 0, &[with_top("0"), with_inline_style("opacity: 0.5;")]).unwrap();
        let rendered = timer.style_attribute().render();
        assert!(rendered.ends_with("opacity: 0.5;"));
        assert!(rendered.starts_with("top: 0;"));
    }

    #[test]
    fn data_attributes_absent_by_default() {
        let timer = new(1, 0, &[]).unwrap();
        assert!(timer.data_attributes().is_empty());

        let view = timer.view();
        assert!(!view.contains("data-warn-when"));
        assert!(!view.contains("data-update-every"));
        assert!(!view.contains("data-play-sound"));
        assert!(!view.contains("data-blink-colon"));
        assert!(!view.contains("data-start-immediately"));
    }

    #[test]
    fn data_attributes_present_when_meaningful() {
        let timer = new(
            5,
            0,
            &[
                with_warn_when(30),
                with_update_every(5),
                with_play_sound(true),
                with_start_immediately(true),
            ],
        )
        .unwrap();
        let view = timer.view();
        assert!(view.contains("data-warn-when=\"30\""));
        assert!(view.contains("data-update-every=\"5\""));
        assert!(view.contains("data-play-sound=\"true\""));
        assert!(view.contains("data-blink-colon=\"true\""));
        assert!(view.contains("data-start-immediately=\"true\""));
    }

    #[test]
    fn sound_url_is_emitted_verbatim() {
        let timer = new(1, 0, &[with_sound_source("gong.mp3")]).unwrap();
        let view = timer.view();
        assert!(view.contains("data-play-sound=\"gong.mp3\""));
    }

    #[test]
    fn blink_colon_defaults_to_slow_updates() {
        assert!(!new(1, 0, &[]).unwrap().blink_colon());
        assert!(!new(1, 0, &[with_update_every(1)]).unwrap().blink_colon());
        assert!(new(1, 0, &[with_update_every(2)]).unwrap().blink_colon());

        // An explicit override beats the interval-derived default.
        let quiet = new(1, 0, &[with_update_every(5), with_blink_colon(false)]).unwrap();
        assert!(!quiet.blink_colon());
    }

    #[test]
    fn update_every_of_zero_is_clamped() {
        let timer = new(1, 0, &[with_update_every(0)]).unwrap();
        assert_eq!(timer.update_every(), 1);
        assert!(!timer.view().contains("data-update-every"));
    }

    #[test]
    fn fullscreen_forces_start_immediately_off() {
        let timer = new_fullscreen(0, 42, &[with_start_immediately(true)]).unwrap();
        assert!(!timer.start_immediately());
        assert!(!timer.view().contains("data-start-immediately"));
    }

    #[test]
    fn fullscreen_zeroes_chrome_and_adds_class() {
        let timer = new_fullscreen(0, 42, &[with_margin("2em")]).unwrap();
        assert!(timer.classes().contains(&"countdown-fullscreen".to_string()));

        let style = timer.style_attribute();
        assert_eq!(style.get("margin"), Some("0"));
        assert_eq!(style.get("padding"), Some("0"));
        assert_eq!(style.get("border-width"), Some("0"));
        assert_eq!(style.get("box-shadow"), Some("none"));
        assert_eq!(style.get("top"), Some("0"));
        assert_eq!(style.get("left"), Some("0"));
    }

    #[test]
    fn fullscreen_delegates_other_options() {
        let timer = new_fullscreen(0, 42, &[with_warn_when(10)]).unwrap();
        assert_eq!(timer.warn_when(), 10);
        assert_eq!((timer.minutes(), timer.seconds()), (0, 42));
    }

    #[test]
    fn base_colors_land_in_inline_style() {
        let timer = new(
            1,
            0,
            &[
                with_background("#336699"),
                with_text_color("white"),
                with_border_color("#224466"),
            ],
        )
        .unwrap();
        let style = timer.style_attribute();
        assert_eq!(style.get("background"), Some("#336699"));
        assert_eq!(style.get("color"), Some("white"));
        assert_eq!(style.get("border-color"), Some("#224466"));
    }

    #[test]
    fn state_color_overrides_reach_the_palette() {
        let timer = new(
            1,
            0,
            &[
                with_state_background(TimerState::Running, "#336699"),
                with_state_text(TimerState::Finished, "#123456"),
            ],
        )
        .unwrap();
        let palette = timer.palette();
        assert_eq!(palette.running.background, "#336699");
        assert_eq!(palette.finished.text, "#123456");
        // Untouched state keeps its defaults.
        assert_eq!(palette.warning.background, "#e6c229");
    }

    #[test]
    fn unparseable_state_backgrounds_pass_through() {
        // Free-form color strings, ASCII or not, must never fail the
        // build; derivation just reuses the string verbatim.
        let timer = new(
            1,
            0,
            &[
                with_state_background(TimerState::Running, "var(--brand)"),
                with_state_background(TimerState::Warning, "#é4"),
            ],
        )
        .unwrap();
        let palette = timer.palette();
        assert_eq!(palette.running.background, "var(--brand)");
        assert_eq!(palette.running.border, "var(--brand)");
        assert_eq!(palette.warning.background, "#é4");
        assert_eq!(palette.warning.text, "#ffffff");
    }

    #[test]
    fn view_escapes_attribute_values() {
        let timer = new(1, 0, &[with_inline_style("font-family: \"Fira Sans\";")]).unwrap();
        let view = timer.view();
        assert!(view.contains("&quot;Fira Sans&quot;"));
        assert!(!view.contains("style=\"font-family: \"Fira"));
    }

    #[test]
    fn later_scalar_options_win() {
        let timer = new(1, 0, &[with_top("1em"), with_top("2em")]).unwrap();
        assert_eq!(timer.style_attribute().get("top"), Some("2em"));
    }

    #[test]
    fn markup_shape_is_stable() {
        let timer = new(2, 30, &[with_id("demo")]).unwrap();
        assert_eq!(
            timer.view(),
            concat!(
                "<div id=\"demo\" class=\"countdown\" style=\"right: 0; bottom: 0;\">",
                "<div class=\"countdown-controls\">",
                "<button class=\"countdown-bump-down\" tabindex=\"-1\" title=\"Subtract 10 seconds\">&minus;</button>",
                "<button class=\"countdown-bump-up\" tabindex=\"-1\" title=\"Add 10 seconds\">&plus;</button>",
                "</div>",
                "<code class=\"countdown-time\">",
                "<span class=\"countdown-digits minutes\">02</span>",
                "<span class=\"countdown-digits colon\">:</span>",
                "<span class=\"countdown-digits seconds\">30</span>",
                "</code>",
                "</div>"
            )
        );
    }

    #[test]
    fn style_sheet_reflects_palette() {
        let timer = new(1, 0, &[with_state_background(TimerState::Running, "#112233")]).unwrap();
        let sheet = timer.style_sheet();
        assert!(sheet.contains("#112233"));
        assert!(!sheet.contains("{{"));
    }

    #[test]
    fn write_assets_uses_private_directories() {
        let a = new(1, 0, &[]).unwrap().write_assets().unwrap();
        let b = new(1, 0, &[]).unwrap().write_assets().unwrap();
        assert_ne!(a.dir, b.dir);
        assert!(a.stylesheet.exists());
        assert!(a.script.exists());
        assert!(b.stylesheet.exists());
    }
}

//! Control dispatcher
//!
//! Maps named, typed, runtime-mutable variables to display-pipeline
//! commands. A `set` validates the value, stores it, and synchronously (on
//! the calling thread, before returning) translates it into zero or more
//! [`PendingCommand`]s pushed to the pipeline queue.
//!
//! The dispatcher may be called from any host thread (UI, CLI, IPC) while
//! the presentation path runs elsewhere; all shared state sits behind one
//! mutex and commands cross over through the queue, so no call here ever
//! stalls playback.
//!
//! # Value grammars
//!
//! Crop accepts, in strict precedence order: `"NUM:DEN"` (ratio),
//! `"WxH+X+Y"` (window), `"L+T+R+B"` (borders), and the empty string
//! (reset). Aspect accepts `"NUM:DEN"` with numerator and denominator
//! either both zero or both positive, and the empty string (reset). A
//! malformed crop is logged and ignored; the prior value stays in place.
//!
//! # Examples
//!
//! ```
//! use vidplane_control::{command_channel, ControlConfig, ControlDispatcher, PendingCommand, VarId};
//!
//! let (commands, pipeline) = command_channel();
//! let dispatcher = ControlDispatcher::new(ControlConfig::default(), commands).unwrap();
//! let _ = pipeline.drain(); // initial replay
//!
//! dispatcher.set_string(VarId::Crop, "16:9").unwrap();
//! assert_eq!(
//!     pipeline.try_next(),
//!     Some(PendingCommand::ChangeCropRatio { num: 16, den: 9 })
//! );
//! ```

use parking_lot::Mutex;
use tracing::{debug, error};

use crate::chain::{self, ConfigStore, FilterRegistry};
use crate::command::{CommandSender, PendingCommand};
use crate::error::{ControlError, Result};
use crate::variables::{Choice, VarId, VarTable, VarType, VarValue};

/// Discrete zoom factors offered to the host UI
const ZOOM_CHOICES: [(f64, &str); 4] = [
    (0.25, "1:4 Quarter"),
    (0.5, "1:2 Half"),
    (1.0, "1:1 Original"),
    (2.0, "2:1 Double"),
];

/// Built-in crop presets; the empty string means "default"
const CROP_PRESETS: [(&str, &str); 11] = [
    ("", "Default"),
    ("16:10", "16:10"),
    ("16:9", "16:9"),
    ("185:100", "1.85:1"),
    ("221:100", "2.21:1"),
    ("235:100", "2.35:1"),
    ("239:100", "2.39:1"),
    ("5:3", "5:3"),
    ("4:3", "4:3"),
    ("5:4", "5:4"),
    ("1:1", "1:1"),
];

/// Built-in aspect presets; the empty string means "default"
const ASPECT_PRESETS: [(&str, &str); 9] = [
    ("", "Default"),
    ("1:1", "1:1"),
    ("4:3", "4:3"),
    ("16:9", "16:9"),
    ("16:10", "16:10"),
    ("221:100", "2.21:1"),
    ("235:100", "2.35:1"),
    ("239:100", "2.39:1"),
    ("5:4", "5:4"),
];

/// Scale factors are carried to the pipeline as `round(1000 * f) / 1000`,
/// keeping three decimal digits without floating point in the command.
const ZOOM_DENOMINATOR: u32 = 1000;

/// Initial values and choice extensions for the dispatcher
///
/// Use [`ControlConfig::builder()`] or struct literal syntax with
/// [`Default::default()`].
#[derive(Debug, Clone)]
pub struct ControlConfig {
    /// Initial zoom factor (default: 1.0)
    pub zoom: f64,

    /// Initial scale factor (default: 1.0)
    pub scale: f64,

    /// Fill the display area initially (default: true)
    pub autoscale: bool,

    /// Initial crop specification; non-empty values are applied at
    /// construction (default: empty)
    pub crop: String,

    /// Initial aspect override; non-empty values are applied at
    /// construction (default: empty)
    pub aspect_ratio: String,

    /// Comma-separated extra crop ratios offered as choices (default: empty)
    pub custom_crop_ratios: String,

    /// Comma-separated extra aspect ratios offered as choices (default: empty)
    pub custom_aspect_ratios: String,

    /// Keep the video window on top initially (default: false)
    pub video_on_top: bool,

    /// Start fullscreen (default: false)
    pub fullscreen: bool,

    /// Initial video filter chain (default: empty)
    pub video_filter: String,

    /// Initial subpicture source chain (default: empty)
    pub sub_source: String,

    /// Initial subpicture filter chain (default: empty)
    pub sub_filter: String,

    /// Initial subtitle margin in pixels (default: 0)
    pub sub_margin: i64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            scale: 1.0,
            autoscale: true,
            crop: String::new(),
            aspect_ratio: String::new(),
            custom_crop_ratios: String::new(),
            custom_aspect_ratios: String::new(),
            video_on_top: false,
            fullscreen: false,
            video_filter: String::new(),
            sub_source: String::new(),
            sub_filter: String::new(),
            sub_margin: 0,
        }
    }
}

impl ControlConfig {
    /// Create a new configuration builder
    #[must_use]
    pub fn builder() -> ControlConfigBuilder {
        ControlConfigBuilder::default()
    }

    /// Validate configuration and return any issues
    ///
    /// Returns `Ok(())` if configuration is valid, or a list of issues.
    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut issues = Vec::new();

        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            issues.push("zoom must be a positive factor".to_string());
        }

        if !self.scale.is_finite() || self.scale <= 0.0 {
            issues.push("scale must be a positive factor".to_string());
        }

        for (key, list) in [
            ("custom-crop-ratios", &self.custom_crop_ratios),
            ("custom-aspect-ratios", &self.custom_aspect_ratios),
        ] {
            for entry in list_ratios(list) {
                if parse_ratio(&entry).is_none() {
                    issues.push(format!("{key} entry \"{entry}\" is not NUM:DEN"));
                }
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}

/// Builder for [`ControlConfig`]
#[derive(Debug, Clone, Default)]
pub struct ControlConfigBuilder {
    zoom: Option<f64>,
    scale: Option<f64>,
    autoscale: Option<bool>,
    crop: Option<String>,
    aspect_ratio: Option<String>,
    custom_crop_ratios: Option<String>,
    custom_aspect_ratios: Option<String>,
    video_on_top: Option<bool>,
    fullscreen: Option<bool>,
    video_filter: Option<String>,
    sub_source: Option<String>,
    sub_filter: Option<String>,
    sub_margin: Option<i64>,
}

impl ControlConfigBuilder {
    /// Set the initial zoom factor
    #[must_use]
    pub fn zoom(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }

    /// Set the initial scale factor
    #[must_use]
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Set whether the display area is filled initially
    #[must_use]
    pub fn autoscale(mut self, autoscale: bool) -> Self {
        self.autoscale = Some(autoscale);
        self
    }

    /// Set the initial crop specification
    #[must_use]
    pub fn crop(mut self, crop: impl Into<String>) -> Self {
        self.crop = Some(crop.into());
        self
    }

    /// Set the initial aspect override
    #[must_use]
    pub fn aspect_ratio(mut self, aspect: impl Into<String>) -> Self {
        self.aspect_ratio = Some(aspect.into());
        self
    }

    /// Offer extra crop ratios (comma-separated)
    #[must_use]
    pub fn custom_crop_ratios(mut self, ratios: impl Into<String>) -> Self {
        self.custom_crop_ratios = Some(ratios.into());
        self
    }

    /// Offer extra aspect ratios (comma-separated)
    #[must_use]
    pub fn custom_aspect_ratios(mut self, ratios: impl Into<String>) -> Self {
        self.custom_aspect_ratios = Some(ratios.into());
        self
    }

    /// Keep the video window on top initially
    #[must_use]
    pub fn video_on_top(mut self, on_top: bool) -> Self {
        self.video_on_top = Some(on_top);
        self
    }

    /// Start fullscreen
    #[must_use]
    pub fn fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = Some(fullscreen);
        self
    }

    /// Set the initial video filter chain
    #[must_use]
    pub fn video_filter(mut self, chain: impl Into<String>) -> Self {
        self.video_filter = Some(chain.into());
        self
    }

    /// Set the initial subpicture source chain
    #[must_use]
    pub fn sub_source(mut self, chain: impl Into<String>) -> Self {
        self.sub_source = Some(chain.into());
        self
    }

    /// Set the initial subpicture filter chain
    #[must_use]
    pub fn sub_filter(mut self, chain: impl Into<String>) -> Self {
        self.sub_filter = Some(chain.into());
        self
    }

    /// Set the initial subtitle margin
    #[must_use]
    pub fn sub_margin(mut self, margin: i64) -> Self {
        self.sub_margin = Some(margin);
        self
    }

    /// Build the configuration
    #[must_use]
    pub fn build(self) -> ControlConfig {
        let defaults = ControlConfig::default();

        ControlConfig {
            zoom: self.zoom.unwrap_or(defaults.zoom),
            scale: self.scale.unwrap_or(defaults.scale),
            autoscale: self.autoscale.unwrap_or(defaults.autoscale),
            crop: self.crop.unwrap_or(defaults.crop),
            aspect_ratio: self.aspect_ratio.unwrap_or(defaults.aspect_ratio),
            custom_crop_ratios: self
                .custom_crop_ratios
                .unwrap_or(defaults.custom_crop_ratios),
            custom_aspect_ratios: self
                .custom_aspect_ratios
                .unwrap_or(defaults.custom_aspect_ratios),
            video_on_top: self.video_on_top.unwrap_or(defaults.video_on_top),
            fullscreen: self.fullscreen.unwrap_or(defaults.fullscreen),
            video_filter: self.video_filter.unwrap_or(defaults.video_filter),
            sub_source: self.sub_source.unwrap_or(defaults.sub_source),
            sub_filter: self.sub_filter.unwrap_or(defaults.sub_filter),
            sub_margin: self.sub_margin.unwrap_or(defaults.sub_margin),
        }
    }
}

/// The control variable dispatcher
///
/// Thread-safe: any host thread may call `set`, and the resulting commands
/// cross to the presentation side through the queue handed to
/// [`ControlDispatcher::new`].
pub struct ControlDispatcher {
    state: Mutex<VarTable>,
    commands: CommandSender,
}

impl ControlDispatcher {
    /// Build the dispatcher and register every built-in variable
    ///
    /// Construction replays the initial state to the pipeline the way the
    /// display expects: on-top, the three filter chains, and the subtitle
    /// margin are always announced; crop and aspect only when their initial
    /// value is non-empty.
    pub fn new(config: ControlConfig, commands: CommandSender) -> Result<Self> {
        if let Err(issues) = config.validate() {
            return Err(ControlError::InvalidConfig(issues.join(", ")));
        }

        let dispatcher = Self {
            state: Mutex::new(VarTable::default()),
            commands,
        };

        {
            let mut table = dispatcher.state.lock();

            let zoom_choices = ZOOM_CHOICES
                .iter()
                .map(|&(value, label)| Choice::new(VarValue::Float(value), label))
                .collect();
            table.register(
                VarId::Zoom,
                VarType::Float,
                VarValue::Float(config.zoom),
                zoom_choices,
                true,
            );
            table.register(
                VarId::Scale,
                VarType::Float,
                VarValue::Float(config.scale),
                Vec::new(),
                false,
            );
            table.register(
                VarId::Autoscale,
                VarType::Bool,
                VarValue::Bool(config.autoscale),
                Vec::new(),
                false,
            );

            for id in [
                VarId::CropLeft,
                VarId::CropTop,
                VarId::CropRight,
                VarId::CropBottom,
            ] {
                table.register(id, VarType::Integer, VarValue::Integer(0), Vec::new(), false);
            }

            let crop_choices = CROP_PRESETS
                .iter()
                .map(|&(value, label)| Choice::new(VarValue::String(value.into()), label))
                .collect();
            table.register(
                VarId::Crop,
                VarType::String,
                VarValue::String(config.crop.clone()),
                crop_choices,
                false,
            );
            for ratio in list_ratios(&config.custom_crop_ratios) {
                table.add_choice(
                    VarId::Crop,
                    Choice::new(VarValue::String(ratio.clone()), ratio),
                );
            }

            let aspect_choices = ASPECT_PRESETS
                .iter()
                .map(|&(value, label)| Choice::new(VarValue::String(value.into()), label))
                .collect();
            table.register(
                VarId::AspectRatio,
                VarType::String,
                VarValue::String(config.aspect_ratio.clone()),
                aspect_choices,
                false,
            );
            for ratio in list_ratios(&config.custom_aspect_ratios) {
                table.add_choice(
                    VarId::AspectRatio,
                    Choice::new(VarValue::String(ratio.clone()), ratio),
                );
            }

            table.register(
                VarId::VideoOnTop,
                VarType::Bool,
                VarValue::Bool(config.video_on_top),
                Vec::new(),
                false,
            );
            table.register(
                VarId::Fullscreen,
                VarType::Bool,
                VarValue::Bool(config.fullscreen),
                Vec::new(),
                false,
            );
            table.register(
                VarId::VideoSnapshot,
                VarType::Trigger,
                VarValue::Trigger,
                Vec::new(),
                false,
            );
            table.register(
                VarId::VideoFilter,
                VarType::String,
                VarValue::String(config.video_filter.clone()),
                Vec::new(),
                false,
            );
            table.register(
                VarId::SubSource,
                VarType::String,
                VarValue::String(config.sub_source.clone()),
                Vec::new(),
                false,
            );
            table.register(
                VarId::SubFilter,
                VarType::String,
                VarValue::String(config.sub_filter.clone()),
                Vec::new(),
                false,
            );
            table.register(
                VarId::SubMargin,
                VarType::Integer,
                VarValue::Integer(config.sub_margin),
                Vec::new(),
                false,
            );
        }

        // replay initial state to the pipeline
        if !config.crop.is_empty() {
            let _ = dispatcher.set_string(VarId::Crop, config.crop);
        }
        if !config.aspect_ratio.is_empty() {
            let _ = dispatcher.set_string(VarId::AspectRatio, config.aspect_ratio);
        }
        let _ = dispatcher.set_bool(VarId::VideoOnTop, config.video_on_top);
        let _ = dispatcher.set_string(VarId::VideoFilter, config.video_filter);
        let _ = dispatcher.set_string(VarId::SubSource, config.sub_source);
        let _ = dispatcher.set_string(VarId::SubFilter, config.sub_filter);
        let _ = dispatcher.set_integer(VarId::SubMargin, config.sub_margin);

        Ok(dispatcher)
    }

    /// Set a variable by its wire name
    pub fn set_by_name(&self, name: &str, value: VarValue) -> Result<()> {
        let id = VarId::from_name(name)
            .ok_or_else(|| ControlError::UnknownVariable(name.to_string()))?;
        self.set(id, value)
    }

    /// Set a variable
    ///
    /// Validates the type (and the choice set where one is binding), stores
    /// the value, and emits the translated commands before returning.
    pub fn set(&self, id: VarId, value: VarValue) -> Result<()> {
        let mut table = self.state.lock();
        self.set_locked(&mut table, id, value)
    }

    /// Typed convenience setter for float variables
    pub fn set_float(&self, id: VarId, value: f64) -> Result<()> {
        self.set(id, VarValue::Float(value))
    }

    /// Typed convenience setter for boolean variables
    pub fn set_bool(&self, id: VarId, value: bool) -> Result<()> {
        self.set(id, VarValue::Bool(value))
    }

    /// Typed convenience setter for integer variables
    pub fn set_integer(&self, id: VarId, value: i64) -> Result<()> {
        self.set(id, VarValue::Integer(value))
    }

    /// Typed convenience setter for string variables
    pub fn set_string(&self, id: VarId, value: impl Into<String>) -> Result<()> {
        self.set(id, VarValue::String(value.into()))
    }

    /// Fire a trigger variable
    pub fn trigger(&self, id: VarId) -> Result<()> {
        self.set(id, VarValue::Trigger)
    }

    /// Current value of a variable
    pub fn get(&self, id: VarId) -> Result<VarValue> {
        let table = self.state.lock();
        table
            .get(id)
            .map(|var| var.value.clone())
            .ok_or_else(|| ControlError::UnknownVariable(id.name().to_string()))
    }

    /// Choices a variable offers, for UI/CLI discoverability
    pub fn choices(&self, id: VarId) -> Vec<Choice> {
        let table = self.state.lock();
        table
            .get(id)
            .map(|var| var.choices.clone())
            .unwrap_or_default()
    }

    /// Toggle a filter module in the chain that accepts it
    ///
    /// `registry` resolves which chain knows the module. Enabling appends
    /// the module if absent; disabling removes the exact token. When
    /// `persist` is given, the new chain is also stored under the chain
    /// variable's name before the pipeline learns about it.
    pub fn toggle_filter(
        &self,
        registry: &dyn FilterRegistry,
        module: &str,
        enable: bool,
        persist: Option<&dyn ConfigStore>,
    ) -> Result<()> {
        let Some(kind) = registry.classify(module) else {
            error!("unable to find filter module \"{module}\"");
            return Err(ControlError::UnknownFilter(module.to_string()));
        };
        let id = kind.variable();

        let mut table = self.state.lock();
        let current = table
            .get(id)
            .map(|var| var.value.as_str().to_string())
            .unwrap_or_default();

        let next = if enable {
            chain::append_module(&current, module)
        } else {
            chain::remove_module(&current, module)
        };
        // already in the requested state: nothing to do
        let Some(next) = next else { return Ok(()) };

        if let Some(store) = persist {
            store.put_string(id.name(), &next);
        }
        self.set_locked(&mut table, id, VarValue::String(next))
    }

    /// Apply one change with the table lock held
    ///
    /// Internal so dependent variables (zoom rewriting scale, border edges
    /// aggregating) can chain without re-locking.
    fn set_locked(&self, table: &mut VarTable, id: VarId, value: VarValue) -> Result<()> {
        {
            let var = table
                .get_mut(id)
                .ok_or_else(|| ControlError::UnknownVariable(id.name().to_string()))?;

            if value.kind() != var.ty {
                return Err(ControlError::TypeMismatch {
                    name: id.name(),
                    expected: var.ty,
                });
            }
            if var.restrict_choices && !var.choices.iter().any(|c| c.value == value) {
                return Err(ControlError::ChoiceRejected {
                    name: id.name(),
                    value: value.to_string(),
                });
            }
        }

        match id {
            VarId::Zoom => {
                store(table, id, value.clone());
                // a zoom selection is just a scale rewrite
                self.set_locked(table, VarId::Scale, value)?;
            }
            VarId::Scale => {
                let factor = value.as_float();
                store(table, id, value);
                let num = (f64::from(ZOOM_DENOMINATOR) * factor).round() as u32;
                self.commands.push(PendingCommand::ChangeZoom {
                    num,
                    den: ZOOM_DENOMINATOR,
                });
            }
            VarId::Autoscale => {
                let filled = value.as_bool();
                store(table, id, value);
                self.commands.push(PendingCommand::ChangeDisplayFilled(filled));
            }
            VarId::Crop => {
                let text = value.as_str();
                match parse_crop(text) {
                    Some(command) => {
                        store(table, id, value.clone());
                        self.commands.push(command);
                    }
                    None => {
                        // recovered locally: prior value stays in place
                        error!("unknown crop format ({text})");
                    }
                }
            }
            VarId::CropLeft | VarId::CropTop | VarId::CropRight | VarId::CropBottom => {
                store(table, id, value);
                self.commands.push(PendingCommand::ChangeCropBorder {
                    left: border(table, VarId::CropLeft),
                    top: border(table, VarId::CropTop),
                    right: border(table, VarId::CropRight),
                    bottom: border(table, VarId::CropBottom),
                });
            }
            VarId::AspectRatio => {
                let text = value.as_str();
                match parse_aspect(text) {
                    Some((num, den)) => {
                        store(table, id, value.clone());
                        self.commands
                            .push(PendingCommand::ChangeAspectRatio { num, den });
                    }
                    None => {
                        // mismatched zero/sign combination: silently ignored
                        debug!("ignoring aspect ratio ({text})");
                    }
                }
            }
            VarId::VideoOnTop => {
                let on_top = value.as_bool();
                store(table, id, value);
                self.commands.push(PendingCommand::ChangeOnTop(on_top));
            }
            VarId::Fullscreen => {
                let fullscreen = value.as_bool();
                let changed = table
                    .get(id)
                    .map(|var| var.value.as_bool() != fullscreen)
                    .unwrap_or(false);
                store(table, id, value);
                if changed {
                    self.commands
                        .push(PendingCommand::ChangeFullscreen(fullscreen));
                }
            }
            VarId::VideoSnapshot => {
                self.commands.push(PendingCommand::TakeSnapshot);
            }
            VarId::VideoFilter => {
                let chain = value.as_str().to_string();
                store(table, id, value);
                self.commands.push(PendingCommand::ChangeFilters(chain));
            }
            VarId::SubSource => {
                let chain = value.as_str().to_string();
                store(table, id, value);
                self.commands.push(PendingCommand::ChangeSubSources(chain));
            }
            VarId::SubFilter => {
                let chain = value.as_str().to_string();
                store(table, id, value);
                self.commands.push(PendingCommand::ChangeSubFilters(chain));
            }
            VarId::SubMargin => {
                let margin = value.as_integer();
                store(table, id, value);
                self.commands.push(PendingCommand::ChangeSubMargin(margin));
            }
        }
        Ok(())
    }
}

/// Store a validated value
fn store(table: &mut VarTable, id: VarId, value: VarValue) {
    if let Some(var) = table.get_mut(id) {
        var.value = value;
    }
}

/// Read one crop border edge, clamped to pixel range
fn border(table: &VarTable, id: VarId) -> u32 {
    table
        .get(id)
        .map(|var| var.value.as_integer().clamp(0, i64::from(u32::MAX)) as u32)
        .unwrap_or(0)
}

/// Split a comma-separated ratio list, dropping empty entries
fn list_ratios(list: &str) -> impl Iterator<Item = String> + '_ {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
}

/// Parse `"NUM:DEN"`
fn parse_ratio(text: &str) -> Option<(u32, u32)> {
    let (num, den) = text.split_once(':')?;
    Some((num.parse().ok()?, den.parse().ok()?))
}

/// Parse `"WxH+X+Y"`
fn parse_window(text: &str) -> Option<(u32, u32, u32, u32)> {
    let (width, rest) = text.split_once('x')?;
    let mut parts = rest.split('+');
    let height = parts.next()?;
    let x = parts.next()?;
    let y = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some((
        width.parse().ok()?,
        height.parse().ok()?,
        x.parse().ok()?,
        y.parse().ok()?,
    ))
}

/// Parse `"L+T+R+B"`
fn parse_border(text: &str) -> Option<(u32, u32, u32, u32)> {
    let mut parts = text.split('+');
    let left = parts.next()?;
    let top = parts.next()?;
    let right = parts.next()?;
    let bottom = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some((
        left.parse().ok()?,
        top.parse().ok()?,
        right.parse().ok()?,
        bottom.parse().ok()?,
    ))
}

/// Translate a crop specification, trying the grammars in precedence order
fn parse_crop(text: &str) -> Option<PendingCommand> {
    if let Some((num, den)) = parse_ratio(text) {
        return Some(PendingCommand::ChangeCropRatio { num, den });
    }
    if let Some((width, height, x, y)) = parse_window(text) {
        return Some(PendingCommand::ChangeCropWindow {
            x,
            y,
            width,
            height,
        });
    }
    if let Some((left, top, right, bottom)) = parse_border(text) {
        return Some(PendingCommand::ChangeCropBorder {
            left,
            top,
            right,
            bottom,
        });
    }
    if text.is_empty() {
        return Some(PendingCommand::ChangeCropRatio { num: 0, den: 0 });
    }
    None
}

/// Translate an aspect specification
///
/// Numerator and denominator must be both zero or both positive; anything
/// else (including a parse failure) yields `None`.
fn parse_aspect(text: &str) -> Option<(u32, u32)> {
    if text.is_empty() {
        return Some((0, 0));
    }
    let (num, den) = parse_ratio(text)?;
    if (num > 0) == (den > 0) {
        Some((num, den))
    } else {
        None
    }
}

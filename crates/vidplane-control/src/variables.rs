//! Typed control variables
//!
//! Every runtime-mutable setting is a named, typed variable. The set of
//! variables is a closed enumeration ([`VarId`]) so the dispatcher can match
//! exhaustively instead of dispatching on strings; the host still addresses
//! variables by their wire names (`"aspect-ratio"`, `"video-on-top"`, ...)
//! through [`VarId::from_name`].

use std::collections::HashMap;
use std::fmt;

use tracing::warn;

/// Identifier of a built-in control variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarId {
    /// `zoom`, discrete zoom factor selection (rewrites `scale`)
    Zoom,
    /// `scale`, free scale factor, translated to a zoom command
    Scale,
    /// `autoscale`, fill the display area
    Autoscale,
    /// `crop`, ratio, window, or border crop specification
    Crop,
    /// `crop-left`, left border, aggregated with the other three edges
    CropLeft,
    /// `crop-top`
    CropTop,
    /// `crop-right`
    CropRight,
    /// `crop-bottom`
    CropBottom,
    /// `aspect-ratio`, source aspect override
    AspectRatio,
    /// `video-on-top`, keep the window above the others
    VideoOnTop,
    /// `fullscreen`
    Fullscreen,
    /// `video-snapshot`, trigger a frame grab
    VideoSnapshot,
    /// `video-filter`, video filter chain membership
    VideoFilter,
    /// `sub-source`, subpicture source chain membership
    SubSource,
    /// `sub-filter`, subpicture filter chain membership
    SubFilter,
    /// `sub-margin`, subtitle displacement in pixels
    SubMargin,
}

impl VarId {
    /// Every built-in variable, in registration order
    pub const ALL: [VarId; 16] = [
        VarId::Zoom,
        VarId::Scale,
        VarId::Autoscale,
        VarId::Crop,
        VarId::CropLeft,
        VarId::CropTop,
        VarId::CropRight,
        VarId::CropBottom,
        VarId::AspectRatio,
        VarId::VideoOnTop,
        VarId::Fullscreen,
        VarId::VideoSnapshot,
        VarId::VideoFilter,
        VarId::SubSource,
        VarId::SubFilter,
        VarId::SubMargin,
    ];

    /// The wire name the host uses for this variable
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            VarId::Zoom => "zoom",
            VarId::Scale => "scale",
            VarId::Autoscale => "autoscale",
            VarId::Crop => "crop",
            VarId::CropLeft => "crop-left",
            VarId::CropTop => "crop-top",
            VarId::CropRight => "crop-right",
            VarId::CropBottom => "crop-bottom",
            VarId::AspectRatio => "aspect-ratio",
            VarId::VideoOnTop => "video-on-top",
            VarId::Fullscreen => "fullscreen",
            VarId::VideoSnapshot => "video-snapshot",
            VarId::VideoFilter => "video-filter",
            VarId::SubSource => "sub-source",
            VarId::SubFilter => "sub-filter",
            VarId::SubMargin => "sub-margin",
        }
    }

    /// Look a variable up by its wire name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.name() == name)
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared type of a control variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    /// Signed integer
    Integer,
    /// Floating point
    Float,
    /// Boolean
    Bool,
    /// UTF-8 string
    String,
    /// Value-less command trigger
    Trigger,
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VarType::Integer => "integer",
            VarType::Float => "float",
            VarType::Bool => "boolean",
            VarType::String => "string",
            VarType::Trigger => "trigger",
        })
    }
}

/// A control variable value
#[derive(Debug, Clone, PartialEq)]
pub enum VarValue {
    /// Signed integer
    Integer(i64),
    /// Floating point
    Float(f64),
    /// Boolean
    Bool(bool),
    /// UTF-8 string
    String(String),
    /// Value-less command trigger
    Trigger,
}

impl VarValue {
    /// The type this value belongs to
    #[must_use]
    pub fn kind(&self) -> VarType {
        match self {
            VarValue::Integer(_) => VarType::Integer,
            VarValue::Float(_) => VarType::Float,
            VarValue::Bool(_) => VarType::Bool,
            VarValue::String(_) => VarType::String,
            VarValue::Trigger => VarType::Trigger,
        }
    }

    pub(crate) fn as_integer(&self) -> i64 {
        match *self {
            VarValue::Integer(v) => v,
            _ => 0,
        }
    }

    pub(crate) fn as_float(&self) -> f64 {
        match *self {
            VarValue::Float(v) => v,
            _ => 0.0,
        }
    }

    pub(crate) fn as_bool(&self) -> bool {
        matches!(*self, VarValue::Bool(true))
    }

    pub(crate) fn as_str(&self) -> &str {
        match self {
            VarValue::String(s) => s,
            _ => "",
        }
    }
}

impl fmt::Display for VarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarValue::Integer(v) => write!(f, "{v}"),
            VarValue::Float(v) => write!(f, "{v}"),
            VarValue::Bool(v) => write!(f, "{v}"),
            VarValue::String(v) => f.write_str(v),
            VarValue::Trigger => f.write_str("(trigger)"),
        }
    }
}

/// One enumerated value a variable offers for UI/CLI discoverability
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    /// The value to set
    pub value: VarValue,
    /// Human-readable label
    pub label: String,
}

impl Choice {
    pub(crate) fn new(value: VarValue, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// Registered state of one variable
#[derive(Debug, Clone)]
pub(crate) struct Variable {
    pub(crate) ty: VarType,
    pub(crate) value: VarValue,
    pub(crate) choices: Vec<Choice>,
    /// Whether set() refuses values outside the choice list
    pub(crate) restrict_choices: bool,
}

/// The variable table behind the dispatcher's lock
#[derive(Default)]
pub(crate) struct VarTable {
    vars: HashMap<VarId, Variable>,
}

impl VarTable {
    /// Declare a variable; idempotent
    ///
    /// Re-registering with the same type keeps the existing state.
    /// Re-registering with a different type is a programming error: it
    /// panics in debug builds and is ignored with a warning in release.
    pub(crate) fn register(
        &mut self,
        id: VarId,
        ty: VarType,
        default: VarValue,
        choices: Vec<Choice>,
        restrict_choices: bool,
    ) {
        if let Some(existing) = self.vars.get(&id) {
            if existing.ty != ty {
                debug_assert!(
                    false,
                    "variable {id} re-registered as {ty}, was {}",
                    existing.ty
                );
                warn!(%id, %ty, "ignoring re-registration with a different type");
            }
            return;
        }
        debug_assert_eq!(default.kind(), ty, "default value type for {id}");
        self.vars.insert(
            id,
            Variable {
                ty,
                value: default,
                choices,
                restrict_choices,
            },
        );
    }

    pub(crate) fn get(&self, id: VarId) -> Option<&Variable> {
        self.vars.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: VarId) -> Option<&mut Variable> {
        self.vars.get_mut(&id)
    }

    /// Append a choice unless an equal value is already listed
    pub(crate) fn add_choice(&mut self, id: VarId, choice: Choice) {
        if let Some(var) = self.vars.get_mut(&id) {
            if !var.choices.iter().any(|c| c.value == choice.value) {
                var.choices.push(choice);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for id in VarId::ALL {
            assert_eq!(VarId::from_name(id.name()), Some(id));
        }
        assert_eq!(VarId::from_name("no-such-variable"), None);
    }

    #[test]
    fn test_value_kinds() {
        assert_eq!(VarValue::Integer(3).kind(), VarType::Integer);
        assert_eq!(VarValue::Float(0.5).kind(), VarType::Float);
        assert_eq!(VarValue::Trigger.kind(), VarType::Trigger);
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut table = VarTable::default();
        table.register(
            VarId::Fullscreen,
            VarType::Bool,
            VarValue::Bool(false),
            Vec::new(),
            false,
        );
        if let Some(var) = table.get_mut(VarId::Fullscreen) {
            var.value = VarValue::Bool(true);
        }

        // second declaration keeps the mutated state
        table.register(
            VarId::Fullscreen,
            VarType::Bool,
            VarValue::Bool(false),
            Vec::new(),
            false,
        );
        assert_eq!(
            table.get(VarId::Fullscreen).map(|v| v.value.clone()),
            Some(VarValue::Bool(true))
        );
    }

    #[test]
    #[should_panic(expected = "re-registered")]
    #[cfg(debug_assertions)]
    fn test_type_change_panics_in_debug() {
        let mut table = VarTable::default();
        table.register(
            VarId::Zoom,
            VarType::Float,
            VarValue::Float(1.0),
            Vec::new(),
            true,
        );
        table.register(
            VarId::Zoom,
            VarType::String,
            VarValue::String(String::new()),
            Vec::new(),
            false,
        );
    }

    #[test]
    fn test_add_choice_deduplicates() {
        let mut table = VarTable::default();
        table.register(
            VarId::Crop,
            VarType::String,
            VarValue::String(String::new()),
            Vec::new(),
            false,
        );
        table.add_choice(VarId::Crop, Choice::new(VarValue::String("16:9".into()), "16:9"));
        table.add_choice(VarId::Crop, Choice::new(VarValue::String("16:9".into()), "16:9"));
        assert_eq!(table.get(VarId::Crop).map(|v| v.choices.len()), Some(1));
    }
}

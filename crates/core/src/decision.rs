//! Display decisions handed back to the host.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::id::InstanceId;

/// What the host should render for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DisplayDecision {
    /// The complication is intentionally suppressed
    Hidden,
    /// The complication shows content
    Shown(Shown),
}

impl DisplayDecision {
    /// Whether the decision suppresses the complication.
    pub fn is_hidden(&self) -> bool {
        matches!(self, Self::Hidden)
    }

    /// Shown content, if any.
    pub fn shown(&self) -> Option<&Shown> {
        match self {
            Self::Hidden => None,
            Self::Shown(shown) => Some(shown),
        }
    }
}

/// Visible complication content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shown {
    /// Primary text, never empty
    pub label: String,

    /// Accessibility text
    pub content_description: String,

    /// Secondary text slot, read by faces that do not render the label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Ring value, for ranged complications
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranged_value: Option<RangedValue>,

    /// Where a tap on the complication leads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tap_target: Option<TapTarget>,
}

impl Shown {
    /// Create shown content with a label and content description.
    pub fn new(label: impl Into<String>, content_description: impl Into<String>) -> Self {
        let label = label.into();
        debug_assert!(!label.is_empty(), "shown complications need a label");
        Self {
            label,
            content_description: content_description.into(),
            title: None,
            ranged_value: None,
            tap_target: None,
        }
    }

    /// Set the title slot.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Attach a ring value.
    pub fn with_ranged_value(mut self, ranged_value: RangedValue) -> Self {
        self.ranged_value = Some(ranged_value);
        self
    }

    /// Attach a tap target.
    pub fn with_tap_target(mut self, tap_target: TapTarget) -> Self {
        self.tap_target = Some(tap_target);
        self
    }
}

/// A bounded value, `min <= value <= max` by construction.
///
/// Deserialization goes through [`RangedValue::new`], so decoded values are
/// clamped the same way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRangedValue")]
pub struct RangedValue {
    value: f32,
    min: f32,
    max: f32,
}

#[derive(Deserialize)]
struct RawRangedValue {
    value: f32,
    min: f32,
    max: f32,
}

impl From<RawRangedValue> for RangedValue {
    fn from(raw: RawRangedValue) -> Self {
        Self::new(raw.value, raw.min, raw.max)
    }
}

impl RangedValue {
    /// Create a ranged value, clamping `value` into `[min, max]`.
    ///
    /// A `max` below `min` collapses the range to `min`.
    pub fn new(value: f32, min: f32, max: f32) -> Self {
        let max = if max < min { min } else { max };
        Self {
            value: value.max(min).min(max),
            min,
            max,
        }
    }

    /// Current value.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Lower bound.
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f32 {
        self.max
    }
}

/// External screen a tap can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryPoint {
    /// The exercise screen
    ExerciseScreen,
    /// The main screen, asked to resume the foreground service
    ResumeService,
}

/// Opaque intent descriptor for a tap action.
///
/// `request_code` is the instance id so every generated target is distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapTarget {
    /// Screen to open
    pub entry_point: EntryPoint,

    /// Intent action
    pub action: String,

    /// Request code, unique per complication instance
    pub request_code: i32,

    /// Extra key/value parameters
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, String>,
}

/// Extra naming where an activity launch came from.
pub const EXTRA_LAUNCH_SOURCE: &str = "launch_source";

/// Launch source value for taps on a complication.
pub const SOURCE_COMPLICATION: &str = "complication";

/// Intent action that asks the main screen to resume the service.
pub const ACTION_RESUME_FROM_COMPLICATION: &str = "RESUME_FROM_COMPLICATION";

impl TapTarget {
    /// Tap target opening the exercise screen from `instance`.
    pub fn open_exercise(instance: InstanceId) -> Self {
        let mut extras = BTreeMap::new();
        extras.insert(EXTRA_LAUNCH_SOURCE.to_string(), SOURCE_COMPLICATION.to_string());
        Self {
            entry_point: EntryPoint::ExerciseScreen,
            action: format!("open_from_complication_{}", instance),
            request_code: instance.get(),
            extras,
        }
    }

    /// Tap target resuming the foreground service from `instance`.
    pub fn resume_service(instance: InstanceId) -> Self {
        Self {
            entry_point: EntryPoint::ResumeService,
            action: ACTION_RESUME_FROM_COMPLICATION.to_string(),
            request_code: instance.get(),
            extras: BTreeMap::new(),
        }
    }
}

/// Host-level answer to an evaluate or preview request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Evaluation {
    /// A decision for the requested capability
    Data {
        /// The decision
        decision: DisplayDecision,
    },
    /// The provider does not implement the requested capability
    Unsupported,
}

impl Evaluation {
    /// Wrap a decision.
    pub fn data(decision: DisplayDecision) -> Self {
        Self::Data { decision }
    }

    /// The decision, unless unsupported.
    pub fn decision(&self) -> Option<&DisplayDecision> {
        match self {
            Self::Data { decision } => Some(decision),
            Self::Unsupported => None,
        }
    }

    /// Whether the capability was unsupported.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranged_value_clamps() {
        let ranged = RangedValue::new(900.0, 0.0, 840.0);
        assert_eq!(ranged.value(), 840.0);

        let ranged = RangedValue::new(-3.0, 0.0, 840.0);
        assert_eq!(ranged.value(), 0.0);
    }

    #[test]
    fn test_ranged_value_degenerate_range() {
        let ranged = RangedValue::new(5.0, 10.0, 2.0);
        assert_eq!(ranged.max(), 10.0);
        assert_eq!(ranged.value(), 10.0);
    }

    #[test]
    fn test_ranged_value_decoding_clamps() {
        let ranged: RangedValue =
            serde_json::from_str(r#"{"value":900.0,"min":0.0,"max":840.0}"#).unwrap();
        assert_eq!(ranged, RangedValue::new(840.0, 0.0, 840.0));

        let ranged: RangedValue = serde_json::from_str(r#"{"value":5.0,"min":10.0,"max":2.0}"#).unwrap();
        assert_eq!((ranged.value(), ranged.min(), ranged.max()), (10.0, 10.0, 10.0));

        let shown: Shown = serde_json::from_str(
            r#"{"label":"+1h00'","content_description":"x","ranged_value":{"value":-4.0,"min":0.0,"max":840.0}}"#,
        )
        .unwrap();
        assert_eq!(shown.ranged_value.unwrap().value(), 0.0);
    }

    #[test]
    fn test_ranged_value_serializes_fields() {
        let json = serde_json::to_value(RangedValue::new(45.0, 0.0, 60.0)).unwrap();
        assert_eq!(json, serde_json::json!({"value": 45.0, "min": 0.0, "max": 60.0}));
    }

    #[test]
    fn test_ranged_value_nan_is_clamped() {
        let ranged = RangedValue::new(f32::NAN, 0.0, 1.0);
        assert!(ranged.value() >= ranged.min() && ranged.value() <= ranged.max());
    }

    #[test]
    fn test_tap_targets_unique_per_instance() {
        let a = TapTarget::open_exercise(InstanceId(3));
        let b = TapTarget::open_exercise(InstanceId(4));
        assert_ne!(a, b);
        assert_eq!(a.action, "open_from_complication_3");
        assert_eq!(a.request_code, 3);
        assert_eq!(a.extras.get(EXTRA_LAUNCH_SOURCE).map(String::as_str), Some(SOURCE_COMPLICATION));

        let resume = TapTarget::resume_service(InstanceId(9));
        assert_eq!(resume.entry_point, EntryPoint::ResumeService);
        assert_eq!(resume.action, ACTION_RESUME_FROM_COMPLICATION);
        assert_eq!(resume.request_code, 9);
    }

    #[test]
    fn test_evaluation_json_shape() {
        let json = serde_json::to_value(Evaluation::data(DisplayDecision::Hidden)).unwrap();
        assert_eq!(json["result"], "data");
        assert_eq!(json["decision"]["state"], "hidden");

        let json = serde_json::to_value(Evaluation::Unsupported).unwrap();
        assert_eq!(json["result"], "unsupported");
    }
}

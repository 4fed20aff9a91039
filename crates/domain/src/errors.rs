//! Error types used throughout axbridge
//!
//! Remote calls report a raw [`AxStatus`]. The status is translated into the
//! closed [`AxError`] set exactly once, by [`AxError::from_status`], when it
//! crosses from the transport port into the core layer.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw status code returned by the remote accessibility service.
///
/// The numeric values match the `AXError` codes published by
/// ApplicationServices. Unknown codes are carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AxStatus(pub i32);

impl AxStatus {
    pub const SUCCESS: Self = Self(0);
    pub const FAILURE: Self = Self(-25200);
    pub const ILLEGAL_ARGUMENT: Self = Self(-25201);
    pub const INVALID_UI_ELEMENT: Self = Self(-25202);
    pub const INVALID_UI_ELEMENT_OBSERVER: Self = Self(-25203);
    pub const CANNOT_COMPLETE: Self = Self(-25204);
    pub const ATTRIBUTE_UNSUPPORTED: Self = Self(-25205);
    pub const ACTION_UNSUPPORTED: Self = Self(-25206);
    pub const NOTIFICATION_UNSUPPORTED: Self = Self(-25207);
    pub const NOT_IMPLEMENTED: Self = Self(-25208);
    pub const NOTIFICATION_ALREADY_REGISTERED: Self = Self(-25209);
    pub const NOTIFICATION_NOT_REGISTERED: Self = Self(-25210);
    pub const API_DISABLED: Self = Self(-25211);
    pub const NO_VALUE: Self = Self(-25212);
    pub const PARAMETERIZED_ATTRIBUTE_UNSUPPORTED: Self = Self(-25213);
    pub const NOT_ENOUGH_PRECISION: Self = Self(-25214);

    /// Raw numeric code.
    pub const fn code(self) -> i32 {
        self.0
    }

    pub const fn is_success(self) -> bool {
        self.0 == Self::SUCCESS.0
    }

    /// Human-readable name of the status, as the OS headers describe it.
    pub const fn description(self) -> &'static str {
        match self.0 {
            0 => "Success",
            -25200 => "A system error occurred",
            -25201 => "Illegal argument",
            -25202 => "Invalid UI element",
            -25203 => "Invalid observer",
            -25204 => "Messaging failed",
            -25205 => "Attribute unsupported",
            -25206 => "Action unsupported",
            -25207 => "Notification unsupported",
            -25208 => "Not implemented",
            -25209 => "Notification already registered",
            -25210 => "Notification not registered",
            -25211 => "Accessibility API disabled",
            -25212 => "No value",
            -25213 => "Parameterized attribute unsupported",
            -25214 => "Not enough precision",
            _ => "Unknown error",
        }
    }
}

impl fmt::Display for AxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.0)
    }
}

/// Closed error set for every accessibility operation.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum AxError {
    #[error(
        "Accessibility permission not granted. Enable in: System Settings > Privacy & Security \
         > Accessibility"
    )]
    AccessibilityDisabled,

    #[error("Invalid reference: the remote element no longer exists")]
    InvalidReference,

    #[error("Invalid observer")]
    InvalidObserver,

    #[error("Cannot complete: the remote application did not respond")]
    CannotComplete,

    #[error("Attribute unsupported by this element")]
    AttributeUnsupported,

    #[error("Action unsupported by this element")]
    ActionUnsupported,

    #[error("Notification unsupported by this element")]
    NotificationUnsupported,

    #[error("Not implemented by the remote application")]
    NotImplemented,

    #[error("Accessibility API unavailable")]
    ApiDisabled,

    #[error("Attribute is read-only")]
    NotSettable,

    #[error("Attribute '{attribute}' has no value")]
    AttributeNil { attribute: String },

    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("Element not found: {description}")]
    ElementNotFound { description: String },

    #[error("Application not found: {identifier}")]
    ApplicationNotFound { identifier: String },

    #[error("Parameterized attribute unsupported")]
    NoParameterizedAttribute,

    #[error("Unknown accessibility API error: {code}")]
    UnknownApiError { code: i32 },
}

impl AxError {
    /// Map a non-success remote status into the local taxonomy.
    ///
    /// `attribute` names the attribute the call was about, when there is one,
    /// so that an explicit "no value" reply can say which attribute was empty.
    pub fn from_status(status: AxStatus, attribute: Option<&str>) -> Self {
        match status {
            AxStatus::FAILURE | AxStatus::CANNOT_COMPLETE => Self::CannotComplete,
            AxStatus::ILLEGAL_ARGUMENT | AxStatus::INVALID_UI_ELEMENT => Self::InvalidReference,
            AxStatus::INVALID_UI_ELEMENT_OBSERVER => Self::InvalidObserver,
            AxStatus::ATTRIBUTE_UNSUPPORTED => Self::AttributeUnsupported,
            AxStatus::ACTION_UNSUPPORTED => Self::ActionUnsupported,
            AxStatus::NOTIFICATION_UNSUPPORTED => Self::NotificationUnsupported,
            AxStatus::NOT_IMPLEMENTED => Self::NotImplemented,
            AxStatus::API_DISABLED => Self::ApiDisabled,
            AxStatus::NO_VALUE => {
                Self::attribute_nil(attribute.unwrap_or(UNKNOWN_ATTRIBUTE))
            }
            AxStatus::PARAMETERIZED_ATTRIBUTE_UNSUPPORTED => Self::NoParameterizedAttribute,
            other => Self::UnknownApiError { code: other.code() },
        }
    }

    /// Convert a raw status into `Ok(())` or the mapped error.
    pub fn check(status: AxStatus, attribute: Option<&str>) -> AxResult<()> {
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::from_status(status, attribute))
        }
    }

    pub fn attribute_nil(attribute: impl Into<String>) -> Self {
        Self::AttributeNil { attribute: attribute.into() }
    }

    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch { expected: expected.into(), actual: actual.into() }
    }

    pub fn element_not_found(description: impl Into<String>) -> Self {
        Self::ElementNotFound { description: description.into() }
    }

    pub fn application_not_found(identifier: impl Into<String>) -> Self {
        Self::ApplicationNotFound { identifier: identifier.into() }
    }

    /// Stable machine-readable name of the error kind, for structured logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AccessibilityDisabled => "accessibility_disabled",
            Self::InvalidReference => "invalid_reference",
            Self::InvalidObserver => "invalid_observer",
            Self::CannotComplete => "cannot_complete",
            Self::AttributeUnsupported => "attribute_unsupported",
            Self::ActionUnsupported => "action_unsupported",
            Self::NotificationUnsupported => "notification_unsupported",
            Self::NotImplemented => "not_implemented",
            Self::ApiDisabled => "api_disabled",
            Self::NotSettable => "not_settable",
            Self::AttributeNil { .. } => "attribute_nil",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::ElementNotFound { .. } => "element_not_found",
            Self::ApplicationNotFound { .. } => "application_not_found",
            Self::NoParameterizedAttribute => "no_parameterized_attribute",
            Self::UnknownApiError { .. } => "unknown_api_error",
        }
    }

    /// True when the handle points at a remote object that has gone away.
    pub const fn is_stale_reference(&self) -> bool {
        matches!(self, Self::InvalidReference)
    }

    /// True when the failure only means "nothing there", as opposed to a
    /// broken contract or a transport failure.
    pub const fn is_absence(&self) -> bool {
        matches!(self, Self::AttributeNil { .. } | Self::ElementNotFound { .. })
    }
}

const UNKNOWN_ATTRIBUTE: &str = "unknown";

/// Result type alias for accessibility operations
pub type AxResult<T> = std::result::Result<T, AxError>;

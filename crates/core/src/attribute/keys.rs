//! Catalog of typed attribute keys
//!
//! Each constant fixes both the wire name and the local type for one
//! well-known attribute.

use axbridge_domain::constants::attributes as name;
use axbridge_domain::{CharRange, Point, Rect, Size, WireValue};

use super::AttributeKey;
use crate::element::Element;

// Identity
pub const ROLE: AttributeKey<String> = AttributeKey::from_static(name::ROLE);
pub const SUBROLE: AttributeKey<String> = AttributeKey::from_static(name::SUBROLE);
pub const ROLE_DESCRIPTION: AttributeKey<String> = AttributeKey::from_static(name::ROLE_DESCRIPTION);
pub const TITLE: AttributeKey<String> = AttributeKey::from_static(name::TITLE);
pub const DESCRIPTION: AttributeKey<String> = AttributeKey::from_static(name::DESCRIPTION);
pub const HELP: AttributeKey<String> = AttributeKey::from_static(name::HELP);
pub const IDENTIFIER: AttributeKey<String> = AttributeKey::from_static(name::IDENTIFIER);

/// `AXValue` as whatever the element reports.
pub const VALUE: AttributeKey<WireValue> = AttributeKey::from_static(name::VALUE);
/// `AXValue` read as text.
pub const STRING_VALUE: AttributeKey<String> = AttributeKey::from_static(name::VALUE);

// State
pub const ENABLED: AttributeKey<bool> = AttributeKey::from_static(name::ENABLED);
pub const FOCUSED: AttributeKey<bool> = AttributeKey::from_static(name::FOCUSED);
pub const SELECTED: AttributeKey<bool> = AttributeKey::from_static(name::SELECTED);

// Geometry
pub const POSITION: AttributeKey<Point> = AttributeKey::from_static(name::POSITION);
pub const SIZE: AttributeKey<Size> = AttributeKey::from_static(name::SIZE);
pub const FRAME: AttributeKey<Rect> = AttributeKey::from_static(name::FRAME);

// Hierarchy
pub const PARENT: AttributeKey<Element> = AttributeKey::from_static(name::PARENT);
pub const CHILDREN: AttributeKey<Vec<Element>> = AttributeKey::from_static(name::CHILDREN);
pub const TOP_LEVEL_UI_ELEMENT: AttributeKey<Element> =
    AttributeKey::from_static(name::TOP_LEVEL_UI_ELEMENT);

// Windows
pub const WINDOWS: AttributeKey<Vec<Element>> = AttributeKey::from_static(name::WINDOWS);
pub const MAIN_WINDOW: AttributeKey<Element> = AttributeKey::from_static(name::MAIN_WINDOW);
pub const FOCUSED_WINDOW: AttributeKey<Element> = AttributeKey::from_static(name::FOCUSED_WINDOW);
pub const FOCUSED_UI_ELEMENT: AttributeKey<Element> =
    AttributeKey::from_static(name::FOCUSED_UI_ELEMENT);
pub const MENU_BAR: AttributeKey<Element> = AttributeKey::from_static(name::MENU_BAR);

// Application
pub const FRONTMOST: AttributeKey<bool> = AttributeKey::from_static(name::FRONTMOST);
pub const HIDDEN: AttributeKey<bool> = AttributeKey::from_static(name::HIDDEN);

// Text
pub const NUMBER_OF_CHARACTERS: AttributeKey<i64> =
    AttributeKey::from_static(name::NUMBER_OF_CHARACTERS);
pub const SELECTED_TEXT: AttributeKey<String> = AttributeKey::from_static(name::SELECTED_TEXT);
pub const SELECTED_TEXT_RANGE: AttributeKey<CharRange> =
    AttributeKey::from_static(name::SELECTED_TEXT_RANGE);
pub const VISIBLE_CHARACTER_RANGE: AttributeKey<CharRange> =
    AttributeKey::from_static(name::VISIBLE_CHARACTER_RANGE);
pub const INSERTION_POINT_LINE_NUMBER: AttributeKey<i64> =
    AttributeKey::from_static(name::INSERTION_POINT_LINE_NUMBER);

//! Convenience accessors and actions
//!
//! Thin wrappers over the marshaller for the attributes and actions most
//! callers need. Optional text and relation accessors return `None` for any
//! failure. State flags fall back to a fixed default when the element does
//! not report them.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use axbridge_domain::constants::{actions, attributes};
use axbridge_domain::{AxResult, CharRange, Point, Rect, Size, WireValue};

use crate::attribute::keys;
use crate::element::Element;
use crate::ports::BatchPolicy;

impl Element {
    /// `AXRole`, e.g. `AXButton`.
    pub fn role(&self) -> Option<String> {
        self.get_or_nil(&keys::ROLE)
    }

    /// `AXSubrole`, e.g. `AXCloseButton`.
    pub fn subrole(&self) -> Option<String> {
        self.get_or_nil(&keys::SUBROLE)
    }

    /// Localized role name.
    pub fn role_description(&self) -> Option<String> {
        self.get_or_nil(&keys::ROLE_DESCRIPTION)
    }

    /// `AXTitle`.
    pub fn title(&self) -> Option<String> {
        self.get_or_nil(&keys::TITLE)
    }

    /// `AXDescription`.
    pub fn description(&self) -> Option<String> {
        self.get_or_nil(&keys::DESCRIPTION)
    }

    /// `AXHelp` tooltip text.
    pub fn help(&self) -> Option<String> {
        self.get_or_nil(&keys::HELP)
    }

    /// Developer-assigned `AXIdentifier`.
    pub fn identifier(&self) -> Option<String> {
        self.get_or_nil(&keys::IDENTIFIER)
    }

    /// `AXValue` in whatever shape the element reports it.
    pub fn value(&self) -> Option<WireValue> {
        self.get_or_nil(&keys::VALUE)
    }

    /// `AXValue` when it is text.
    pub fn string_value(&self) -> Option<String> {
        self.get_or_nil(&keys::STRING_VALUE)
    }

    /// Enabled unless the element says otherwise.
    pub fn is_enabled(&self) -> bool {
        self.get_or_nil(&keys::ENABLED).unwrap_or(true)
    }

    /// Has keyboard focus; false when unreported.
    pub fn is_focused(&self) -> bool {
        self.get_or_nil(&keys::FOCUSED).unwrap_or(false)
    }

    /// Selected; false when unreported.
    pub fn is_selected(&self) -> bool {
        self.get_or_nil(&keys::SELECTED).unwrap_or(false)
    }

    /// Top-left corner in screen coordinates.
    pub fn position(&self) -> Option<Point> {
        self.get_or_nil(&keys::POSITION)
    }

    /// `AXSize`.
    pub fn frame_size(&self) -> Option<Size> {
        self.get_or_nil(&keys::SIZE)
    }

    /// Screen rectangle from position and size; `None` if either is missing.
    pub fn frame(&self) -> Option<Rect> {
        Some(Rect::new(self.position()?, self.frame_size()?))
    }

    /// Move the element.
    pub fn set_position(&self, position: Point) -> AxResult<()> {
        self.set(&keys::POSITION, position)
    }

    /// Resize the element.
    pub fn set_frame_size(&self, size: Size) -> AxResult<()> {
        self.set(&keys::SIZE, size)
    }

    /// Move then resize.
    pub fn set_frame(&self, frame: Rect) -> AxResult<()> {
        self.set_position(frame.origin)?;
        self.set_frame_size(frame.size)
    }

    /// Containing element.
    pub fn parent(&self) -> Option<Element> {
        self.get_or_nil(&keys::PARENT)
    }

    /// Children in remote order; empty when unreadable.
    pub fn children(&self) -> Vec<Element> {
        self.get_or_nil(&keys::CHILDREN).unwrap_or_default()
    }

    /// Window or sheet that contains this element.
    pub fn top_level_ui_element(&self) -> Option<Element> {
        self.get_or_nil(&keys::TOP_LEVEL_UI_ELEMENT)
    }

    /// Application windows; empty when unreadable.
    pub fn windows(&self) -> Vec<Element> {
        self.get_or_nil(&keys::WINDOWS).unwrap_or_default()
    }

    /// Application main window.
    pub fn main_window(&self) -> Option<Element> {
        self.get_or_nil(&keys::MAIN_WINDOW)
    }

    /// Application window with focus.
    pub fn focused_window(&self) -> Option<Element> {
        self.get_or_nil(&keys::FOCUSED_WINDOW)
    }

    /// Element with keyboard focus below this one.
    pub fn focused_ui_element(&self) -> Option<Element> {
        self.get_or_nil(&keys::FOCUSED_UI_ELEMENT)
    }

    /// Application menu bar.
    pub fn menu_bar(&self) -> Option<Element> {
        self.get_or_nil(&keys::MENU_BAR)
    }

    /// Application is frontmost; false when unreported.
    pub fn is_frontmost(&self) -> bool {
        self.get_or_nil(&keys::FRONTMOST).unwrap_or(false)
    }

    /// Application is hidden; false when unreported.
    pub fn is_hidden(&self) -> bool {
        self.get_or_nil(&keys::HIDDEN).unwrap_or(false)
    }

    /// Length of a text element's value.
    pub fn number_of_characters(&self) -> Option<i64> {
        self.get_or_nil(&keys::NUMBER_OF_CHARACTERS)
    }

    /// Currently selected text.
    pub fn selected_text(&self) -> Option<String> {
        self.get_or_nil(&keys::SELECTED_TEXT)
    }

    /// Range of the selected text.
    pub fn selected_text_range(&self) -> Option<CharRange> {
        self.get_or_nil(&keys::SELECTED_TEXT_RANGE)
    }

    /// Range of the text currently on screen.
    pub fn visible_character_range(&self) -> Option<CharRange> {
        self.get_or_nil(&keys::VISIBLE_CHARACTER_RANGE)
    }

    /// Line holding the caret.
    pub fn insertion_point_line_number(&self) -> Option<i64> {
        self.get_or_nil(&keys::INSERTION_POINT_LINE_NUMBER)
    }

    /// Perform `AXPress`.
    pub fn press(&self) -> AxResult<()> {
        self.perform_action(actions::PRESS)
    }

    /// Perform `AXIncrement`.
    pub fn increment(&self) -> AxResult<()> {
        self.perform_action(actions::INCREMENT)
    }

    /// Perform `AXDecrement`.
    pub fn decrement(&self) -> AxResult<()> {
        self.perform_action(actions::DECREMENT)
    }

    /// Perform `AXConfirm`.
    pub fn confirm(&self) -> AxResult<()> {
        self.perform_action(actions::CONFIRM)
    }

    /// Perform `AXCancel`.
    pub fn cancel(&self) -> AxResult<()> {
        self.perform_action(actions::CANCEL)
    }

    /// Perform `AXShowMenu`.
    pub fn show_menu(&self) -> AxResult<()> {
        self.perform_action(actions::SHOW_MENU)
    }

    /// Perform `AXRaise`.
    pub fn raise(&self) -> AxResult<()> {
        self.perform_action(actions::RAISE)
    }

    /// Give this element keyboard focus.
    pub fn focus(&self) -> AxResult<()> {
        self.set(&keys::FOCUSED, true)
    }

    /// Replace the element's text value.
    pub fn set_value(&self, text: &str) -> AxResult<()> {
        self.set_string(attributes::VALUE, text)
    }

    /// Every attribute the element exposes, read in one round trip.
    ///
    /// Attributes whose value cannot be read are left out.
    pub fn all_attributes(&self) -> AxResult<BTreeMap<String, WireValue>> {
        let names = self.attribute_names()?;
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let slots = self.read_slots(&refs, BatchPolicy::Continue);
        Ok(names
            .iter()
            .zip(slots)
            .filter_map(|(name, slot)| slot.map(|value| (name.clone(), value)))
            .collect())
    }

    /// Indented outline of the subtree, one element per line, two spaces per
    /// level.
    pub fn tree_description(&self, max_depth: usize) -> String {
        let mut out = String::new();
        self.describe_into(&mut out, 0, max_depth);
        out
    }

    fn describe_into(&self, out: &mut String, depth: usize, max_depth: usize) {
        let _ = writeln!(out, "{}{self}", "  ".repeat(depth));
        if depth >= max_depth {
            return;
        }
        for child in self.children() {
            child.describe_into(out, depth + 1, max_depth);
        }
    }
}

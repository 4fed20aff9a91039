//! Well-known accessibility names and library defaults
//!
//! The name catalogs mirror the string values of the `kAX*` constants in the
//! ApplicationServices headers. They are plain data; typed attribute keys are
//! built on top of them in `axbridge-core`.

/// Default depth budget for tree searches, in edges from the search root.
pub const DEFAULT_SEARCH_MAX_DEPTH: usize = 10;

/// Default lifetime of a cached permission check.
pub const DEFAULT_PERMISSION_CACHE_TTL_SECS: u64 = 300;

/// Option key understood by `AXIsProcessTrustedWithOptions`.
pub const TRUSTED_CHECK_OPTION_PROMPT: &str = "AXTrustedCheckOptionPrompt";

/// Element roles.
pub mod roles {
    pub const APPLICATION: &str = "AXApplication";
    pub const SYSTEM_WIDE: &str = "AXSystemWide";
    pub const WINDOW: &str = "AXWindow";
    pub const SHEET: &str = "AXSheet";
    pub const DRAWER: &str = "AXDrawer";

    // Controls
    pub const BUTTON: &str = "AXButton";
    pub const RADIO_BUTTON: &str = "AXRadioButton";
    pub const CHECK_BOX: &str = "AXCheckBox";
    pub const POP_UP_BUTTON: &str = "AXPopUpButton";
    pub const MENU_BUTTON: &str = "AXMenuButton";
    pub const TAB_GROUP: &str = "AXTabGroup";
    pub const SLIDER: &str = "AXSlider";
    pub const INCREMENTOR: &str = "AXIncrementor";
    pub const BUSY_INDICATOR: &str = "AXBusyIndicator";
    pub const PROGRESS_INDICATOR: &str = "AXProgressIndicator";
    pub const RELEVANCE_INDICATOR: &str = "AXRelevanceIndicator";
    pub const LEVEL_INDICATOR: &str = "AXLevelIndicator";

    // Text
    pub const TEXT_FIELD: &str = "AXTextField";
    pub const TEXT_AREA: &str = "AXTextArea";
    pub const STATIC_TEXT: &str = "AXStaticText";

    // Menus
    pub const MENU_BAR: &str = "AXMenuBar";
    pub const MENU_BAR_ITEM: &str = "AXMenuBarItem";
    pub const MENU: &str = "AXMenu";
    pub const MENU_ITEM: &str = "AXMenuItem";

    // Tables and lists
    pub const TABLE: &str = "AXTable";
    pub const OUTLINE: &str = "AXOutline";
    pub const BROWSER: &str = "AXBrowser";
    pub const LIST: &str = "AXList";
    pub const ROW: &str = "AXRow";
    pub const COLUMN: &str = "AXColumn";
    pub const CELL: &str = "AXCell";

    // Scrolling
    pub const SCROLL_AREA: &str = "AXScrollArea";
    pub const SCROLL_BAR: &str = "AXScrollBar";

    // Containers
    pub const GROUP: &str = "AXGroup";
    pub const SPLIT_GROUP: &str = "AXSplitGroup";
    pub const SPLITTER: &str = "AXSplitter";
    pub const TOOLBAR: &str = "AXToolbar";

    pub const IMAGE: &str = "AXImage";
    pub const VALUE_INDICATOR: &str = "AXValueIndicator";
    pub const LINK: &str = "AXLink";
    pub const WEB_AREA: &str = "AXWebArea";
    pub const COMBO_BOX: &str = "AXComboBox";
    pub const DISCLOSURE_TRIANGLE: &str = "AXDisclosureTriangle";
    pub const COLOR_WELL: &str = "AXColorWell";
    pub const GROW_AREA: &str = "AXGrowArea";
    pub const HANDLE: &str = "AXHandle";
    pub const HELP_TAG: &str = "AXHelpTag";
    pub const MATTE: &str = "AXMatte";
    pub const RULER: &str = "AXRuler";
    pub const RULER_MARKER: &str = "AXRulerMarker";
    pub const UNKNOWN: &str = "AXUnknown";
}

/// Element subroles.
pub mod subroles {
    pub const CLOSE_BUTTON: &str = "AXCloseButton";
    pub const MINIMIZE_BUTTON: &str = "AXMinimizeButton";
    pub const ZOOM_BUTTON: &str = "AXZoomButton";
    pub const TOOLBAR_BUTTON: &str = "AXToolbarButton";
    pub const FULL_SCREEN_BUTTON: &str = "AXFullScreenButton";
    pub const SECURE_TEXT_FIELD: &str = "AXSecureTextField";
    pub const SEARCH_FIELD: &str = "AXSearchField";
    pub const TABLE_ROW: &str = "AXTableRow";
    pub const OUTLINE_ROW: &str = "AXOutlineRow";
    pub const STANDARD_WINDOW: &str = "AXStandardWindow";
    pub const DIALOG: &str = "AXDialog";
    pub const SYSTEM_DIALOG: &str = "AXSystemDialog";
    pub const FLOATING_WINDOW: &str = "AXFloatingWindow";
    pub const SYSTEM_FLOATING_WINDOW: &str = "AXSystemFloatingWindow";
    pub const INCREMENT_ARROW: &str = "AXIncrementArrow";
    pub const DECREMENT_ARROW: &str = "AXDecrementArrow";
    pub const INCREMENT_PAGE: &str = "AXIncrementPage";
    pub const DECREMENT_PAGE: &str = "AXDecrementPage";
    pub const TEXT_ATTACHMENT: &str = "AXTextAttachment";
    pub const TEXT_LINK: &str = "AXTextLink";
    pub const TIMELINE: &str = "AXTimeline";
    pub const SORT_BUTTON: &str = "AXSortButton";
    pub const RATING_INDICATOR: &str = "AXRatingIndicator";
    pub const CONTENT_LIST: &str = "AXContentList";
    pub const DEFINITION_LIST: &str = "AXDefinitionList";
    pub const DESCRIPTION_LIST: &str = "AXDescriptionList";
    pub const TOGGLE: &str = "AXToggle";
    pub const SWITCH: &str = "AXSwitch";
    pub const UNKNOWN: &str = "AXUnknown";
}

/// Attribute names.
pub mod attributes {
    pub const ROLE: &str = "AXRole";
    pub const SUBROLE: &str = "AXSubrole";
    pub const ROLE_DESCRIPTION: &str = "AXRoleDescription";
    pub const TITLE: &str = "AXTitle";
    pub const DESCRIPTION: &str = "AXDescription";
    pub const HELP: &str = "AXHelp";
    pub const VALUE: &str = "AXValue";
    pub const IDENTIFIER: &str = "AXIdentifier";

    // State
    pub const ENABLED: &str = "AXEnabled";
    pub const FOCUSED: &str = "AXFocused";
    pub const SELECTED: &str = "AXSelected";

    // Geometry
    pub const POSITION: &str = "AXPosition";
    pub const SIZE: &str = "AXSize";
    pub const FRAME: &str = "AXFrame";

    // Hierarchy
    pub const PARENT: &str = "AXParent";
    pub const CHILDREN: &str = "AXChildren";
    pub const TOP_LEVEL_UI_ELEMENT: &str = "AXTopLevelUIElement";

    // Windows
    pub const WINDOWS: &str = "AXWindows";
    pub const MAIN_WINDOW: &str = "AXMainWindow";
    pub const FOCUSED_WINDOW: &str = "AXFocusedWindow";
    pub const FOCUSED_UI_ELEMENT: &str = "AXFocusedUIElement";

    pub const MENU_BAR: &str = "AXMenuBar";

    // Application
    pub const FRONTMOST: &str = "AXFrontmost";
    pub const HIDDEN: &str = "AXHidden";

    // Text
    pub const NUMBER_OF_CHARACTERS: &str = "AXNumberOfCharacters";
    pub const SELECTED_TEXT: &str = "AXSelectedText";
    pub const SELECTED_TEXT_RANGE: &str = "AXSelectedTextRange";
    pub const VISIBLE_CHARACTER_RANGE: &str = "AXVisibleCharacterRange";
    pub const INSERTION_POINT_LINE_NUMBER: &str = "AXInsertionPointLineNumber";
}

/// Action names.
pub mod actions {
    pub const PRESS: &str = "AXPress";
    pub const INCREMENT: &str = "AXIncrement";
    pub const DECREMENT: &str = "AXDecrement";
    pub const CONFIRM: &str = "AXConfirm";
    pub const CANCEL: &str = "AXCancel";
    pub const SHOW_MENU: &str = "AXShowMenu";
    pub const PICK: &str = "AXPick";
    pub const RAISE: &str = "AXRaise";
    pub const SHOW_ALTERNATE_UI: &str = "AXShowAlternateUI";
    pub const SHOW_DEFAULT_UI: &str = "AXShowDefaultUI";
}

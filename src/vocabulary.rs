//! Whitelist tables for the vocabulary rules
//!
//! The defaults cover the WinUI 3 controls a typical page uses;
//! configuration adds to them.

use std::collections::{HashMap, HashSet};

const KNOWN_ELEMENTS: &[&str] = &[
    "Page",
    "ResourceDictionary",
    "Grid",
    "StackPanel",
    "Canvas",
    "TextBlock",
    "Button",
    "TabView",
    "TabViewItem",
    "ComboBox",
    "FontIcon",
    "DataTemplate",
    "ItemsControl",
    "Border",
    "ToolTip",
    "ToolTipService",
    "Flyout",
    "ProgressRing",
    "controls:DataGrid",
    "controls:DataGridTextColumn",
    "controls:DockPanel",
    "SolidColorBrush",
];

const KNOWN_CONTROLS: &[&str] = &[
    "Button",
    "TextBox",
    "TextBlock",
    "Page",
    "Grid",
    "StackPanel",
    "Canvas",
    "ComboBox",
    "TabView",
    "TabViewItem",
    "FontIcon",
    "DataTemplate",
    "ItemsControl",
    "Border",
    "ToolTip",
    "ToolTipService",
    "Flyout",
    "ProgressRing",
    "controls:DataGrid",
    "controls:DataGridTextColumn",
    "controls:DockPanel",
    "SolidColorBrush",
    "local:HalfWidthConverter",
    "local:BooleanToVisibilityConverter",
    "local:InvertBooleanConverter",
    "local:NullableBooleanToBooleanConverter",
    "local:TemplateSelector",
];

const KNOWN_ATTRIBUTES: &[(&str, &[&str])] = &[
    (
        "Grid",
        &[
            "Row",
            "Column",
            "RowDefinitions",
            "ColumnDefinitions",
            "Background",
            "Opacity",
            "Visibility",
        ],
    ),
    (
        "TextBlock",
        &[
            "Text",
            "FontSize",
            "Foreground",
            "HorizontalAlignment",
            "VerticalAlignment",
            "Margin",
            "Grid.Row",
            "Grid.Column",
            "Grid.ColumnSpan",
            "Visibility",
            "Style",
        ],
    ),
    (
        "Button",
        &[
            "Content",
            "Click",
            "Command",
            "Style",
            "Margin",
            "Padding",
            "Height",
            "Width",
            "IsEnabled",
            "ToolTipService.ToolTip",
            "HorizontalAlignment",
            "FontSize",
        ],
    ),
    (
        "ComboBox",
        &[
            "ItemsSource",
            "SelectedItem",
            "IsEditable",
            "Width",
            "Height",
            "ToolTipService.ToolTip",
            "Margin",
            "HorizontalAlignment",
            "VerticalAlignment",
        ],
    ),
    ("TabView", &["TabItems", "SelectedItem"]),
    ("DataTemplate", &["DataType"]),
    ("ItemsControl", &["ItemTemplate", "ItemsSource"]),
    ("Border", &["Background", "BorderBrush", "BorderThickness", "CornerRadius"]),
    ("ToolTip", &["Content", "Placement"]),
    ("Flyout", &["Content", "Placement"]),
    ("ProgressRing", &["IsActive", "Width", "Height"]),
    ("controls:DataGrid", &["ItemsSource", "AutoGenerateColumns", "Columns"]),
    ("controls:DataGridTextColumn", &["Header", "Binding"]),
    ("controls:DockPanel", &["LastChildFill", "Dock"]),
    ("SolidColorBrush", &["Color"]),
];

/// Known tag names and per-element attribute whitelists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    elements: HashSet<String>,
    controls: HashSet<String>,
    attributes: HashMap<String, HashSet<String>>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::winui()
    }
}

impl Vocabulary {
    /// Vocabulary with no entries at all
    pub fn empty() -> Self {
        Self {
            elements: HashSet::new(),
            controls: HashSet::new(),
            attributes: HashMap::new(),
        }
    }

    /// The built-in WinUI 3 tables
    pub fn winui() -> Self {
        let mut vocab = Self::empty();
        vocab.add_elements(KNOWN_ELEMENTS.iter().copied());
        vocab.add_controls(KNOWN_CONTROLS.iter().copied());
        for (element, attrs) in KNOWN_ATTRIBUTES {
            vocab.add_attributes(element, attrs.iter().copied());
        }
        vocab
    }

    pub fn add_elements<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.elements.insert(name.into());
        }
    }

    pub fn add_controls<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.controls.insert(name.into());
        }
    }

    /// Merge attribute names into the whitelist of `element`, creating it if needed
    pub fn add_attributes<I, S>(&mut self, element: &str, attrs: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed = self.attributes.entry(element.to_string()).or_default();
        for attr in attrs {
            allowed.insert(attr.into());
        }
    }

    pub fn is_known_element(&self, name: &str) -> bool {
        self.elements.contains(name)
    }

    pub fn is_known_control(&self, name: &str) -> bool {
        self.controls.contains(name)
    }

    /// Attribute whitelist for a tag, if the tag has one
    pub fn allowed_attributes(&self, element: &str) -> Option<&HashSet<String>> {
        self.attributes.get(element)
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn control_count(&self) -> usize {
        self.controls.len()
    }

    pub fn whitelist_count(&self) -> usize {
        self.attributes.len()
    }
}

/// Converters and markup extensions the project defines
///
/// Empty by default. While a set is empty the matching rule has nothing to
/// compare against and stays silent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionRegistry {
    converters: HashSet<String>,
    markup_extensions: HashSet<String>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_converter(mut self, name: impl Into<String>) -> Self {
        self.converters.insert(name.into());
        self
    }

    pub fn with_markup_extension(mut self, name: impl Into<String>) -> Self {
        self.markup_extensions.insert(name.into());
        self
    }

    pub fn add_converters<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.converters.insert(name.into());
        }
    }

    pub fn add_markup_extensions<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.markup_extensions.insert(name.into());
        }
    }

    pub fn converters(&self) -> &HashSet<String> {
        &self.converters
    }

    pub fn markup_extensions(&self) -> &HashSet<String> {
        &self.markup_extensions
    }
}

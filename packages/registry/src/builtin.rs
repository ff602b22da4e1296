//! Block types shipped with the editor

use crate::definition::BlockDefinition;
use crate::entry::{Category, PropSchema};

const ALIGNMENTS: &[(&str, &str)] = &[("left", "Left"), ("center", "Center"), ("right", "Right")];

#[derive(Debug)]
pub struct Title;

impl BlockDefinition for Title {
    fn type_key(&self) -> &'static str {
        "title"
    }

    fn display_label(&self) -> &'static str {
        "Title"
    }

    fn category(&self) -> Category {
        Category::Basic
    }

    fn props_schema(&self) -> Vec<PropSchema> {
        vec![
            PropSchema::text("text", "Text", "Title"),
            PropSchema::select(
                "level",
                "Level",
                "h1",
                &[
                    ("h1", "Heading 1"),
                    ("h2", "Heading 2"),
                    ("h3", "Heading 3"),
                    ("h4", "Heading 4"),
                ],
            ),
            PropSchema::select("align", "Alignment", "left", ALIGNMENTS),
            PropSchema::color("color", "Color", "#111111"),
        ]
    }
}

#[derive(Debug)]
pub struct Text;

impl BlockDefinition for Text {
    fn type_key(&self) -> &'static str {
        "text"
    }

    fn display_label(&self) -> &'static str {
        "Text"
    }

    fn category(&self) -> Category {
        Category::Basic
    }

    fn props_schema(&self) -> Vec<PropSchema> {
        vec![
            PropSchema::text("text", "Text", "Write something..."),
            PropSchema::number("size", "Font size", 16.0),
            PropSchema::select("align", "Alignment", "left", ALIGNMENTS),
            PropSchema::color("color", "Color", "#333333"),
        ]
    }
}

#[derive(Debug)]
pub struct Button;

impl BlockDefinition for Button {
    fn type_key(&self) -> &'static str {
        "button"
    }

    fn display_label(&self) -> &'static str {
        "Button"
    }

    fn category(&self) -> Category {
        Category::Basic
    }

    fn props_schema(&self) -> Vec<PropSchema> {
        vec![
            PropSchema::text("label", "Label", "Button"),
            PropSchema::text("url", "Link", ""),
            PropSchema::select(
                "variant",
                "Style",
                "primary",
                &[("primary", "Primary"), ("secondary", "Secondary"), ("outline", "Outline")],
            ),
            PropSchema::color("color", "Color", "#3366ff"),
            PropSchema::boolean("newTab", "Open in new tab", false),
        ]
    }
}

#[derive(Debug)]
pub struct Image;

impl BlockDefinition for Image {
    fn type_key(&self) -> &'static str {
        "image"
    }

    fn display_label(&self) -> &'static str {
        "Image"
    }

    fn category(&self) -> Category {
        Category::Media
    }

    fn props_schema(&self) -> Vec<PropSchema> {
        vec![
            PropSchema::text("src", "Image URL", ""),
            PropSchema::text("alt", "Alt text", ""),
            PropSchema::number("width", "Width (%)", 100.0),
            PropSchema::boolean("rounded", "Rounded corners", false),
        ]
    }
}

#[derive(Debug)]
pub struct Video;

impl BlockDefinition for Video {
    fn type_key(&self) -> &'static str {
        "video"
    }

    fn display_label(&self) -> &'static str {
        "Video"
    }

    fn category(&self) -> Category {
        Category::Media
    }

    fn props_schema(&self) -> Vec<PropSchema> {
        vec![
            PropSchema::text("url", "Video URL", ""),
            PropSchema::boolean("autoplay", "Autoplay", false),
            PropSchema::boolean("controls", "Show controls", true),
        ]
    }
}

#[derive(Debug)]
pub struct Container;

impl BlockDefinition for Container {
    fn type_key(&self) -> &'static str {
        "container"
    }

    fn display_label(&self) -> &'static str {
        "Container"
    }

    fn category(&self) -> Category {
        Category::Layout
    }

    fn props_schema(&self) -> Vec<PropSchema> {
        vec![
            PropSchema::select(
                "direction",
                "Direction",
                "column",
                &[("column", "Vertical"), ("row", "Horizontal")],
            ),
            PropSchema::number("padding", "Padding", 16.0),
            PropSchema::color("background", "Background", "#ffffff"),
        ]
    }

    fn accepts_children(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct Columns;

impl BlockDefinition for Columns {
    fn type_key(&self) -> &'static str {
        "columns"
    }

    fn display_label(&self) -> &'static str {
        "Columns"
    }

    fn category(&self) -> Category {
        Category::Layout
    }

    fn props_schema(&self) -> Vec<PropSchema> {
        vec![
            PropSchema::number("count", "Columns", 2.0),
            PropSchema::number("gap", "Gap", 16.0),
        ]
    }

    fn accepts_children(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct Divider;

impl BlockDefinition for Divider {
    fn type_key(&self) -> &'static str {
        "divider"
    }

    fn display_label(&self) -> &'static str {
        "Divider"
    }

    fn category(&self) -> Category {
        Category::Layout
    }

    fn props_schema(&self) -> Vec<PropSchema> {
        vec![
            PropSchema::color("color", "Color", "#e5e5e5"),
            PropSchema::number("thickness", "Thickness", 1.0),
        ]
    }
}

#[derive(Debug)]
pub struct Spacer;

impl BlockDefinition for Spacer {
    fn type_key(&self) -> &'static str {
        "spacer"
    }

    fn display_label(&self) -> &'static str {
        "Spacer"
    }

    fn category(&self) -> Category {
        Category::Layout
    }

    fn props_schema(&self) -> Vec<PropSchema> {
        vec![PropSchema::number("height", "Height", 32.0)]
    }
}

#[derive(Debug)]
pub struct Embed;

impl BlockDefinition for Embed {
    fn type_key(&self) -> &'static str {
        "embed"
    }

    fn display_label(&self) -> &'static str {
        "Embed"
    }

    fn category(&self) -> Category {
        Category::Advanced
    }

    fn props_schema(&self) -> Vec<PropSchema> {
        vec![
            PropSchema::text("html", "HTML", ""),
            PropSchema::number("height", "Height", 300.0),
        ]
    }
}

/// Every built-in block type, in palette order
pub fn builtin_blocks() -> Vec<Box<dyn BlockDefinition>> {
    vec![
        Box::new(Title),
        Box::new(Text),
        Box::new(Button),
        Box::new(Image),
        Box::new(Video),
        Box::new(Container),
        Box::new(Columns),
        Box::new(Divider),
        Box::new(Spacer),
        Box::new(Embed),
    ]
}

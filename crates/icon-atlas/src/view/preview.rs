//! The icon page: one icon with adjustable render options.

use std::fmt;

use icon_atlas_net::{IconRenderKey, IconRequestOptions};

/// Size used when the size option is not enabled, in pixels.
pub const DEFAULT_SIZE: u32 = 140;

/// Sizes offered as quick picks, in pixels.
pub const SIZE_SAMPLES: [u32; 7] = [12, 16, 20, 24, 32, 48, 64];

/// Rotations offered by the picker, in degrees.
pub const ROTATE_OPTIONS: [u16; 5] = [0, 45, 90, 135, 180];

/// Mirroring of an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flip {
    /// Mirror left to right.
    Horizontal,
    /// Mirror top to bottom.
    Vertical,
    /// Mirror both ways.
    Both,
}

impl Flip {
    /// Every flip mode, in picker order.
    pub const ALL: [Flip; 3] = [Flip::Horizontal, Flip::Vertical, Flip::Both];

    /// Registry parameter value.
    pub fn as_str(self) -> &'static str {
        match self {
            Flip::Horizontal => "horizontal",
            Flip::Vertical => "vertical",
            Flip::Both => "horizontal,vertical",
        }
    }
}

impl fmt::Display for Flip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of the icon page.
///
/// Each render option has a value and an enable toggle. Only enabled options
/// reach the render request and the snippet; a disabled size renders at
/// [`DEFAULT_SIZE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconPreview {
    /// Collection prefix.
    pub prefix: String,
    /// Icon name.
    pub icon: String,
    /// Size in pixels.
    pub size: u32,
    /// Fill color.
    pub color: String,
    /// Mirroring.
    pub flip: Option<Flip>,
    /// Rotation in degrees.
    pub rotate: Option<u16>,
    /// Whether `size` is applied.
    pub size_enabled: bool,
    /// Whether `color` is applied.
    pub color_enabled: bool,
    /// Whether `flip` is applied.
    pub flip_enabled: bool,
    /// Whether `rotate` is applied.
    pub rotate_enabled: bool,
}

impl IconPreview {
    /// Preview `icon` of collection `prefix` with default options.
    pub fn new(prefix: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            icon: icon.into(),
            size: DEFAULT_SIZE,
            color: "#1f1f1f".to_string(),
            flip: None,
            rotate: Some(90),
            size_enabled: false,
            color_enabled: false,
            flip_enabled: false,
            rotate_enabled: false,
        }
    }

    /// Width and height attribute, e.g. `"140px"`.
    pub fn size_attr(&self) -> String {
        let size = if self.size_enabled {
            self.size
        } else {
            DEFAULT_SIZE
        };
        format!("{size}px")
    }

    fn color_attr(&self) -> Option<&str> {
        self.color_enabled
            .then_some(self.color.as_str())
            .filter(|color| !color.is_empty())
    }

    fn flip_attr(&self) -> Option<Flip> {
        self.flip.filter(|_| self.flip_enabled)
    }

    /// A rotation of zero is the same as none.
    fn rotate_attr(&self) -> Option<u16> {
        self.rotate.filter(|&degrees| self.rotate_enabled && degrees != 0)
    }

    /// Render options for the preview image.
    pub fn request_options(&self) -> IconRequestOptions {
        let size = self.size_attr();
        IconRequestOptions {
            width: Some(size.clone()),
            height: Some(size),
            color: self.color_attr().map(str::to_string),
            flip: self.flip_attr().map(|flip| flip.as_str().to_string()),
            rotate: self.rotate_attr().map(|degrees| format!("{degrees}deg")),
        }
    }

    /// Render cache key for the preview image.
    pub fn render_key(&self) -> IconRenderKey {
        IconRenderKey::new(&self.prefix, &self.icon, self.request_options())
    }

    /// Markup tag reproducing the preview with its enabled options.
    pub fn snippet(&self) -> String {
        let mut attributes = vec![
            format!(r#"collection="{}""#, self.prefix),
            format!(r#"icon="{}""#, self.icon),
        ];

        if self.size_enabled {
            let size = self.size_attr();
            attributes.push(format!(r#"width="{size}""#));
            attributes.push(format!(r#"height="{size}""#));
        }
        if let Some(color) = self.color_attr() {
            attributes.push(format!(r#"color="{color}""#));
        }
        if let Some(flip) = self.flip_attr() {
            attributes.push(format!(r#"flip="{flip}""#));
        }
        if let Some(rotate) = self.rotate_attr() {
            attributes.push(format!(r#"rotate="{rotate}""#));
        }

        format!("<ngx-icon {}></ngx-icon>", attributes.join(" "))
    }

    /// Fully qualified icon name, `prefix:icon`.
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.prefix, self.icon)
    }

    /// File name for downloading the rendered icon.
    pub fn download_file_name(&self) -> String {
        format!("{}-{}px.svg", self.icon, self.size)
    }
}

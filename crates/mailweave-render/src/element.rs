//! Typed editor document.
//!
//! The editor stores each element as `{ "id", "type", "props" }` with a
//! camelCase property bag. [`RawElement`] is that wire shape;
//! [`CanvasElement`] is the typed form the renderer works on. Missing props
//! take the editor's defaults.

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::RenderError;
use crate::style::{BoxSpacing, Dimension};

/// Element exactly as the editor stores it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawElement {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub props: Value,
}

/// A typed document element
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawElement")]
pub struct CanvasElement {
    pub id: String,
    pub kind: ElementKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Text(TextProps),
    Heading(HeadingProps),
    MultiColumn(MultiColumnProps),
    Image(ImageProps),
    Button(ButtonProps),
    Link(LinkProps),
    Hr(HrProps),
    Section(SectionProps),
    Column(ColumnProps),
    Social(SocialProps),
    ProductRow(ProductRowProps),
    InfoTable(InfoTableProps),
    /// Type name the renderer does not know
    Unknown { kind: String },
}

impl ElementKind {
    /// Editor type name
    pub fn type_name(&self) -> &str {
        match self {
            ElementKind::Text(_) => "text",
            ElementKind::Heading(_) => "heading",
            ElementKind::MultiColumn(_) => "multi_column",
            ElementKind::Image(_) => "image",
            ElementKind::Button(_) => "button",
            ElementKind::Link(_) => "link",
            ElementKind::Hr(_) => "hr",
            ElementKind::Section(_) => "section",
            ElementKind::Column(_) => "column",
            ElementKind::Social(_) => "social",
            ElementKind::ProductRow(_) => "product_row",
            ElementKind::InfoTable(_) => "info_table",
            ElementKind::Unknown { kind } => kind,
        }
    }
}

impl CanvasElement {
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    /// Convert an editor element, applying defaults for missing props
    pub fn from_raw(raw: RawElement) -> Result<Self, RenderError> {
        let kind = match raw.kind.as_str() {
            "text" => ElementKind::Text(props(&raw)?),
            "heading" => ElementKind::Heading(props(&raw)?),
            "multi_column" => ElementKind::MultiColumn(props(&raw)?),
            "image" => ElementKind::Image(props(&raw)?),
            "button" => ElementKind::Button(props(&raw)?),
            "link" => ElementKind::Link(props(&raw)?),
            "hr" => ElementKind::Hr(props(&raw)?),
            "section" => ElementKind::Section(props(&raw)?),
            "column" => ElementKind::Column(props(&raw)?),
            "social" => ElementKind::Social(props(&raw)?),
            "product_row" => ElementKind::ProductRow(props(&raw)?),
            "info_table" => ElementKind::InfoTable(props(&raw)?),
            other => ElementKind::Unknown {
                kind: other.to_string(),
            },
        };

        Ok(Self { id: raw.id, kind })
    }

    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }
}

impl TryFrom<RawElement> for CanvasElement {
    type Error = RenderError;

    fn try_from(raw: RawElement) -> Result<Self, Self::Error> {
        Self::from_raw(raw)
    }
}

fn props<T: DeserializeOwned + Default>(raw: &RawElement) -> Result<T, RenderError> {
    if raw.props.is_null() {
        return Ok(T::default());
    }
    let mut props = raw.props.clone();
    strip_nulls(&mut props);
    serde_json::from_value(props)
        .map_err(|e| RenderError::invalid_element(&raw.id, &raw.kind, e.to_string()))
}

/// Drop `null` members so they take the default like missing ones
fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, member| !member.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}

/// Editor number input; a cleared field arrives as `""` and reads as 0
fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Dimension::deserialize(deserializer)? {
        Dimension::Pixels(value) => Ok(value),
        Dimension::Css(text) => {
            let text = text.trim().trim_end_matches("px");
            if text.is_empty() {
                Ok(0.0)
            } else {
                text.parse().map_err(de::Error::custom)
            }
        }
    }
}

/// `value || default` for a cleared text field
fn fill_text(value: &mut String, default: String) {
    if value.trim().is_empty() {
        *value = default;
    }
}

/// `value || default` for a cleared or zero number field
fn fill_number(value: &mut f64, default: f64) {
    if *value == 0.0 || value.is_nan() {
        *value = default;
    }
}

// ─── Shared enums ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    #[default]
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    pub fn tag(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
            HeadingLevel::H4 => "h4",
            HeadingLevel::H5 => "h5",
            HeadingLevel::H6 => "h6",
        }
    }
}

fn s(value: &str) -> String {
    value.to_string()
}

// ─── Text and heading ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextProps {
    /// Rich-text HTML from the editor, emitted as-is
    pub content: String,
    pub font_size: f64,
    pub font_weight: String,
    pub font_family: String,
    pub color: String,
    pub background_color: String,
    pub text_align: TextAlign,
    pub line_height: f64,
    #[serde(flatten)]
    pub spacing: BoxSpacing,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            content: s("Buraya metin yazın"),
            font_size: 16.0,
            font_weight: s("normal"),
            font_family: s("Arial, sans-serif"),
            color: s("#000000"),
            background_color: s("transparent"),
            text_align: TextAlign::Left,
            line_height: 1.5,
            spacing: BoxSpacing::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeadingProps {
    pub content: String,
    #[serde(rename = "as")]
    pub level: HeadingLevel,
    pub font_size: f64,
    pub font_weight: String,
    pub font_family: String,
    pub color: String,
    pub text_align: TextAlign,
    pub margin: String,
    pub padding: String,
}

impl Default for HeadingProps {
    fn default() -> Self {
        Self {
            content: s("Başlık"),
            level: HeadingLevel::H2,
            font_size: 24.0,
            font_weight: s("bold"),
            font_family: s("Arial, sans-serif"),
            color: s("#000000"),
            text_align: TextAlign::Left,
            margin: s("0 0 10px 0"),
            padding: s("0"),
        }
    }
}

// ─── Multi column ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MultiColumnProps {
    pub gap: f64,
    pub padding: String,
    pub background_color: String,
    pub columns: Vec<ColumnData>,
}

impl Default for MultiColumnProps {
    fn default() -> Self {
        Self {
            gap: 0.0,
            padding: s("10px"),
            background_color: s("transparent"),
            columns: vec![
                ColumnData {
                    content: s("Sol Kolon"),
                    ..ColumnData::default()
                },
                ColumnData {
                    content: s("Sağ Kolon"),
                    ..ColumnData::default()
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnContent {
    #[default]
    Text,
    Image,
    Button,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnData {
    pub width: String,
    #[serde(rename = "type")]
    pub content_type: ColumnContent,

    pub content: String,
    pub font_size: f64,
    pub font_weight: String,
    pub font_family: String,
    pub color: String,
    pub text_align: TextAlign,
    pub line_height: f64,
    pub background_color: String,
    #[serde(flatten)]
    pub spacing: BoxSpacing,
    pub border_top: String,
    pub border_right: String,
    pub border_bottom: String,
    pub border_left: String,

    pub src: String,
    pub alt: String,
    pub img_width: Option<Dimension>,
    pub img_height: Option<Dimension>,
    pub img_keep_aspect_ratio: bool,
    pub img_align: TextAlign,
    pub img_background_color: String,
    pub img_padding_top: f64,
    pub img_padding_right: f64,
    pub img_padding_bottom: f64,
    pub img_padding_left: f64,
    pub img_margin_top: f64,
    pub img_margin_right: f64,
    pub img_margin_bottom: f64,
    pub img_margin_left: f64,

    pub btn_text: String,
    pub btn_link: String,
    pub btn_bg: String,
    pub btn_color: String,
    pub btn_font_size: f64,
    pub btn_border_radius: f64,
    pub btn_padding: String,
}

impl Default for ColumnData {
    fn default() -> Self {
        Self {
            width: s("50%"),
            content_type: ColumnContent::Text,
            content: String::new(),
            font_size: 16.0,
            font_weight: s("normal"),
            font_family: s("Arial, sans-serif"),
            color: s("#000000"),
            text_align: TextAlign::Left,
            line_height: 1.5,
            background_color: s("transparent"),
            spacing: BoxSpacing::default(),
            border_top: String::new(),
            border_right: String::new(),
            border_bottom: String::new(),
            border_left: String::new(),
            src: s("https://via.placeholder.com/300x200"),
            alt: s("Resim"),
            img_width: Some(Dimension::Pixels(300.0)),
            img_height: None,
            img_keep_aspect_ratio: true,
            img_align: TextAlign::Center,
            img_background_color: s("transparent"),
            img_padding_top: 0.0,
            img_padding_right: 0.0,
            img_padding_bottom: 0.0,
            img_padding_left: 0.0,
            img_margin_top: 0.0,
            img_margin_right: 0.0,
            img_margin_bottom: 0.0,
            img_margin_left: 0.0,
            btn_text: s("Buton"),
            btn_link: s("#"),
            btn_bg: s("#3A416F"),
            btn_color: s("#ffffff"),
            btn_font_size: 16.0,
            btn_border_radius: 4.0,
            btn_padding: s("12px 24px"),
        }
    }
}

// ─── Image, button, link, hr ────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageProps {
    pub src: String,
    pub alt: String,
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub keep_aspect_ratio: bool,
    pub text_align: TextAlign,
    pub background_color: String,
    pub is_linked: bool,
    pub link_url: String,
    #[serde(flatten)]
    pub spacing: BoxSpacing,
}

impl Default for ImageProps {
    fn default() -> Self {
        Self {
            src: s("https://via.placeholder.com/600x300"),
            alt: s("Image"),
            width: Some(Dimension::Pixels(600.0)),
            height: Some(Dimension::Pixels(300.0)),
            keep_aspect_ratio: true,
            text_align: TextAlign::Center,
            background_color: s("transparent"),
            is_linked: false,
            link_url: String::new(),
            spacing: BoxSpacing::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonProps {
    pub text: String,
    pub href: String,
    pub font_size: f64,
    pub font_weight: String,
    pub color: String,
    pub background_color: String,
    pub border_radius: f64,
    pub padding: String,
    pub text_align: TextAlign,
}

impl Default for ButtonProps {
    fn default() -> Self {
        Self {
            text: s("Tıklayın"),
            href: s("#"),
            font_size: 16.0,
            font_weight: s("bold"),
            color: s("#ffffff"),
            background_color: s("#3A416F"),
            border_radius: 4.0,
            padding: s("12px 24px"),
            text_align: TextAlign::Center,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkProps {
    pub text: String,
    pub href: String,
    pub color: String,
    pub text_decoration: String,
    pub font_size: f64,
}

impl Default for LinkProps {
    fn default() -> Self {
        Self {
            text: s("Buraya tıklayın"),
            href: s("#"),
            color: s("#3A416F"),
            text_decoration: s("underline"),
            font_size: 16.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HrProps {
    pub border_color: String,
    pub margin: String,
}

impl Default for HrProps {
    fn default() -> Self {
        Self {
            border_color: s("#e0e0e0"),
            margin: s("20px 0"),
        }
    }
}

// ─── Section, column, social ────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionProps {
    pub background_color: String,
    pub padding: String,
    pub border_radius: f64,
    /// Plain text, escaped on output
    pub content: String,
}

impl Default for SectionProps {
    fn default() -> Self {
        Self {
            background_color: s("transparent"),
            padding: s("20px"),
            border_radius: 0.0,
            content: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnProps {
    pub width: String,
}

impl Default for ColumnProps {
    fn default() -> Self {
        Self { width: s("50%") }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialProps {
    pub facebook: String,
    pub twitter: String,
    pub instagram: String,
    pub linkedin: String,
    pub youtube: String,
    pub icon_size: f64,
    pub gap: f64,
    pub align: TextAlign,
    pub padding: String,
}

impl Default for SocialProps {
    fn default() -> Self {
        Self {
            facebook: String::new(),
            twitter: String::new(),
            instagram: String::new(),
            linkedin: String::new(),
            youtube: String::new(),
            icon_size: 32.0,
            gap: 10.0,
            align: TextAlign::Center,
            padding: s("10px 0"),
        }
    }
}

impl SocialProps {
    /// `(network, profile url)` for every configured network, in display order
    pub fn links(&self) -> Vec<(&'static str, &str)> {
        [
            ("facebook", self.facebook.as_str()),
            ("twitter", self.twitter.as_str()),
            ("instagram", self.instagram.as_str()),
            ("linkedin", self.linkedin.as_str()),
            ("youtube", self.youtube.as_str()),
        ]
        .into_iter()
        .filter(|(_, url)| !url.trim().is_empty())
        .collect()
    }
}

// ─── Product row ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Table,
    #[default]
    Card,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductColumnType {
    #[default]
    Text,
    Image,
    Price,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductColumn {
    pub id: String,
    pub label: String,
    /// `item.<field>`, `<alias>.<field>`, a bare field, or an outer-context path
    pub variable_key: String,
    pub width: String,
    #[serde(rename = "type")]
    pub column_type: ProductColumnType,
    #[serde(deserialize_with = "lenient_number")]
    pub font_size: f64,
    pub font_weight: String,
    pub color: String,
    pub text_align: TextAlign,
    pub img_width: Option<Dimension>,
    pub img_height: Option<Dimension>,
    pub link_enabled: bool,
    pub link_variable_key: String,
}

impl Default for ProductColumn {
    fn default() -> Self {
        Self {
            id: String::new(),
            label: s("Kolon"),
            variable_key: String::new(),
            width: s("auto"),
            column_type: ProductColumnType::Text,
            font_size: 14.0,
            font_weight: s("normal"),
            color: s("#333333"),
            text_align: TextAlign::Left,
            img_width: None,
            img_height: None,
            link_enabled: false,
            link_variable_key: s("item.url"),
        }
    }
}

impl ProductColumn {
    fn new(
        id: &str,
        label: &str,
        variable_key: &str,
        width: &str,
        column_type: ProductColumnType,
        text_align: TextAlign,
    ) -> Self {
        Self {
            id: s(id),
            label: s(label),
            variable_key: s(variable_key),
            width: s(width),
            column_type,
            text_align,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductRowProps {
    /// Stored by the editor; product rows are always written as a repeat region
    pub is_repeatable: bool,
    /// Data-context path of the item array
    pub repeat_key: String,
    /// Name rows use for the current item
    pub repeat_item_alias: String,
    pub display_mode: DisplayMode,

    pub card_bg_color: String,
    pub card_border_color: String,
    #[serde(deserialize_with = "lenient_number")]
    pub card_border_radius: f64,
    pub card_padding: String,
    #[serde(deserialize_with = "lenient_number")]
    pub card_img_width: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub card_img_height: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub card_img_border_radius: f64,
    pub card_img_variable_key: String,
    pub card_img_link_enabled: bool,
    pub card_img_link_is_static: bool,
    pub card_img_link_variable_key: String,
    pub card_img_link_static_url: String,
    pub card_title_variable_key: String,
    #[serde(deserialize_with = "lenient_number")]
    pub card_title_font_size: f64,
    pub card_title_font_weight: String,
    pub card_title_color: String,
    pub card_subtitle_variable_key: String,
    #[serde(deserialize_with = "lenient_number")]
    pub card_subtitle_font_size: f64,
    pub card_subtitle_color: String,
    pub card_price_variable_key: String,
    #[serde(deserialize_with = "lenient_number")]
    pub card_price_font_size: f64,
    pub card_price_font_weight: String,
    pub card_price_color: String,

    pub show_header: bool,
    pub header_bg_color: String,
    pub header_text_color: String,
    #[serde(deserialize_with = "lenient_number")]
    pub header_font_size: f64,
    pub header_font_weight: String,
    pub row_bg_color: String,
    pub row_border_color: String,
    pub columns: Vec<ProductColumn>,

    pub padding: String,
    #[serde(deserialize_with = "lenient_number")]
    pub border_radius: f64,
    pub table_border_color: String,
    pub table_width: String,
}

impl Default for ProductRowProps {
    fn default() -> Self {
        Self {
            is_repeatable: true,
            repeat_key: s("order_items"),
            repeat_item_alias: s("item"),
            display_mode: DisplayMode::Card,
            card_bg_color: s("#ffffff"),
            card_border_color: s("#eeeeee"),
            card_border_radius: 8.0,
            card_padding: s("12px"),
            card_img_width: 80.0,
            card_img_height: 80.0,
            card_img_border_radius: 4.0,
            card_img_variable_key: s("item.image_url"),
            card_img_link_enabled: false,
            card_img_link_is_static: false,
            card_img_link_variable_key: s("item.url"),
            card_img_link_static_url: String::new(),
            card_title_variable_key: s("item.name"),
            card_title_font_size: 14.0,
            card_title_font_weight: s("normal"),
            card_title_color: s("#333333"),
            card_subtitle_variable_key: s("item.details"),
            card_subtitle_font_size: 13.0,
            card_subtitle_color: s("#666666"),
            card_price_variable_key: s("item.price"),
            card_price_font_size: 15.0,
            card_price_font_weight: s("bold"),
            card_price_color: s("#f57c00"),
            show_header: true,
            header_bg_color: s("#f8f9fa"),
            header_text_color: s("#333333"),
            header_font_size: 14.0,
            header_font_weight: s("bold"),
            row_bg_color: s("#ffffff"),
            row_border_color: s("#e0e0e0"),
            columns: vec![
                ProductColumn {
                    img_width: Some(Dimension::Pixels(60.0)),
                    img_height: Some(Dimension::Pixels(60.0)),
                    ..ProductColumn::new(
                        "product_image",
                        "Ürün",
                        "item.image_url",
                        "80px",
                        ProductColumnType::Image,
                        TextAlign::Center,
                    )
                },
                ProductColumn::new(
                    "product_name",
                    "Ürün Adı",
                    "item.name",
                    "auto",
                    ProductColumnType::Text,
                    TextAlign::Left,
                ),
                ProductColumn::new(
                    "product_quantity",
                    "Adet",
                    "item.quantity",
                    "60px",
                    ProductColumnType::Text,
                    TextAlign::Center,
                ),
                ProductColumn {
                    font_weight: s("bold"),
                    ..ProductColumn::new(
                        "product_price",
                        "Fiyat",
                        "item.price",
                        "100px",
                        ProductColumnType::Price,
                        TextAlign::Right,
                    )
                },
            ],
            padding: s("0"),
            border_radius: 4.0,
            table_border_color: s("#e0e0e0"),
            table_width: s("100%"),
        }
    }
}

impl ProductRowProps {
    /// Copy with cleared editor fields (blank text, zero sizes) back on
    /// their defaults
    pub fn with_fallbacks(&self) -> Self {
        let d = Self::default();
        let mut p = self.clone();

        p.repeat_key = p.repeat_key.trim().to_string();
        p.repeat_item_alias = p.repeat_item_alias.trim().to_string();
        fill_text(&mut p.repeat_key, d.repeat_key);
        fill_text(&mut p.repeat_item_alias, d.repeat_item_alias);

        fill_text(&mut p.card_bg_color, d.card_bg_color);
        fill_text(&mut p.card_border_color, d.card_border_color);
        fill_number(&mut p.card_border_radius, d.card_border_radius);
        fill_text(&mut p.card_padding, d.card_padding);
        fill_number(&mut p.card_img_width, d.card_img_width);
        fill_number(&mut p.card_img_height, d.card_img_height);
        fill_number(&mut p.card_img_border_radius, d.card_img_border_radius);
        fill_text(&mut p.card_img_variable_key, d.card_img_variable_key);
        fill_text(&mut p.card_img_link_variable_key, d.card_img_link_variable_key);
        fill_text(&mut p.card_title_variable_key, d.card_title_variable_key);
        fill_number(&mut p.card_title_font_size, d.card_title_font_size);
        fill_text(&mut p.card_title_font_weight, d.card_title_font_weight);
        fill_text(&mut p.card_title_color, d.card_title_color);
        fill_text(&mut p.card_subtitle_variable_key, d.card_subtitle_variable_key);
        fill_number(&mut p.card_subtitle_font_size, d.card_subtitle_font_size);
        fill_text(&mut p.card_subtitle_color, d.card_subtitle_color);
        fill_text(&mut p.card_price_variable_key, d.card_price_variable_key);
        fill_number(&mut p.card_price_font_size, d.card_price_font_size);
        fill_text(&mut p.card_price_font_weight, d.card_price_font_weight);
        fill_text(&mut p.card_price_color, d.card_price_color);

        fill_text(&mut p.header_bg_color, d.header_bg_color);
        fill_text(&mut p.header_text_color, d.header_text_color);
        fill_number(&mut p.header_font_size, d.header_font_size);
        fill_text(&mut p.header_font_weight, d.header_font_weight);
        fill_text(&mut p.row_bg_color, d.row_bg_color);
        fill_text(&mut p.row_border_color, d.row_border_color);
        fill_text(&mut p.table_border_color, d.table_border_color);
        fill_text(&mut p.table_width, d.table_width);

        for column in &mut p.columns {
            let d = ProductColumn::default();
            fill_text(&mut column.label, d.label);
            fill_number(&mut column.font_size, d.font_size);
            fill_text(&mut column.font_weight, d.font_weight);
            fill_text(&mut column.color, d.color);
            fill_text(&mut column.link_variable_key, d.link_variable_key);
        }
        p
    }
}

// ─── Info table ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelStyle {
    #[default]
    Normal,
    Bold,
    Italic,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueStyle {
    #[default]
    Normal,
    Bold,
    Italic,
    Strikethrough,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InfoRow {
    pub id: String,
    pub label: String,
    /// Outer-context path shown in the value column
    pub value_key: String,
    pub label_style: LabelStyle,
    pub value_style: ValueStyle,
    pub value_color: Option<String>,
    pub value_font_size: Option<f64>,
}

impl Default for InfoRow {
    fn default() -> Self {
        Self {
            id: String::new(),
            label: s("Etiket"),
            value_key: String::new(),
            label_style: LabelStyle::Normal,
            value_style: ValueStyle::Normal,
            value_color: None,
            value_font_size: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InfoTableProps {
    pub show_title: bool,
    pub title: String,
    pub title_font_size: f64,
    pub title_font_weight: String,
    pub title_color: String,
    pub title_bg_color: String,
    pub title_padding: String,
    pub title_border_bottom: String,

    pub table_bg_color: String,
    pub table_border_color: String,
    pub table_border_radius: f64,
    pub table_width: String,

    pub row_padding: String,
    pub row_border_bottom: String,

    pub label_width: String,
    pub label_font_size: f64,
    pub label_font_weight: String,
    pub label_color: String,
    pub label_align: TextAlign,

    pub value_width: String,
    pub value_font_size: f64,
    pub value_font_weight: String,
    pub value_color: String,
    pub value_align: TextAlign,

    pub rows: Vec<InfoRow>,
    #[serde(flatten)]
    pub spacing: BoxSpacing,
}

impl Default for InfoTableProps {
    fn default() -> Self {
        let row = |id: &str, label: &str, key: &str, style: ValueStyle, color: &str| InfoRow {
            id: s(id),
            label: s(label),
            value_key: s(key),
            value_style: style,
            value_color: Some(s(color)),
            ..InfoRow::default()
        };

        Self {
            show_title: true,
            title: s("Sipariş Özeti"),
            title_font_size: 14.0,
            title_font_weight: s("bold"),
            title_color: s("#333333"),
            title_bg_color: s("#f5f5f5"),
            title_padding: s("12px 16px"),
            title_border_bottom: s("1px solid #e0e0e0"),
            table_bg_color: s("#ffffff"),
            table_border_color: s("#e0e0e0"),
            table_border_radius: 0.0,
            table_width: s("100%"),
            row_padding: s("8px 16px"),
            row_border_bottom: s("1px solid #f0f0f0"),
            label_width: s("50%"),
            label_font_size: 14.0,
            label_font_weight: s("normal"),
            label_color: s("#333333"),
            label_align: TextAlign::Left,
            value_width: s("50%"),
            value_font_size: 14.0,
            value_font_weight: s("normal"),
            value_color: s("#333333"),
            value_align: TextAlign::Right,
            rows: vec![
                row("row_1", "Ürün Toplamı", "order.subtotal", ValueStyle::Normal, "#333333"),
                row("row_2", "Kampanya", "order.discount", ValueStyle::Strikethrough, "#999999"),
                row(
                    "row_3",
                    "Ara Toplam",
                    "order.subtotal_after_discount",
                    ValueStyle::Normal,
                    "#333333",
                ),
                InfoRow {
                    label_style: LabelStyle::Bold,
                    value_font_size: Some(16.0),
                    ..row("row_4", "Toplam", "order.total", ValueStyle::Bold, "#333333")
                },
            ],
            spacing: BoxSpacing::default(),
        }
    }
}

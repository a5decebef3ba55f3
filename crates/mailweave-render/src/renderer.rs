//! Element → mail-safe HTML.
//!
//! Fragments use nested presentation tables and inline styles only. Every
//! data-driven value is written as a `[[path]]` placeholder; product rows are
//! wrapped in repeat-region markers written by the configured
//! [`MarkerDialect`], the same one the substitution engine scans with.

use mailweave_core::{
    format_placeholder, is_valid_alias, is_valid_array_key, DialectKind, DocumentConfig,
    MailweaveConfig, MarkerDialect,
};
use tracing::{debug, error, warn};

use crate::element::{
    ButtonProps, CanvasElement, ColumnContent, ColumnData, ColumnProps, DisplayMode, ElementKind,
    HeadingProps, HrProps, ImageProps, InfoRow, InfoTableProps, LabelStyle, LinkProps,
    MultiColumnProps, ProductColumn, ProductColumnType, ProductRowProps, RawElement, SectionProps,
    SocialProps, TextAlign, TextProps, ValueStyle,
};
use crate::error::RenderError;
use crate::shell::DocumentShell;
use crate::style::{px, resolve_spacing, Dimension, Sides, Style};

const FONT_STACK: &str = "Arial, Helvetica, sans-serif";

/// Icon per social network, in display order
const SOCIAL_ICONS: [(&str, &str); 5] = [
    ("facebook", "https://img.icons8.com/color/48/facebook-new.png"),
    ("twitter", "https://img.icons8.com/color/48/twitter--v1.png"),
    ("instagram", "https://img.icons8.com/color/48/instagram-new--v1.png"),
    ("linkedin", "https://img.icons8.com/color/48/linkedin.png"),
    ("youtube", "https://img.icons8.com/color/48/youtube-play.png"),
];

/// Renders editor documents into templates for the substitution engine
#[derive(Debug)]
pub struct TemplateRenderer {
    dialect: Box<dyn MarkerDialect>,
    document: DocumentConfig,
    shell: DocumentShell,
}

impl TemplateRenderer {
    pub fn new(config: &MailweaveConfig) -> Result<Self, RenderError> {
        Ok(Self {
            dialect: config.dialect.build()?,
            document: config.document.clone(),
            shell: DocumentShell::new()?,
        })
    }

    /// Default document settings with the given marker dialect
    pub fn with_dialect(kind: DialectKind) -> Result<Self, RenderError> {
        Self::new(&MailweaveConfig {
            dialect: kind,
            ..MailweaveConfig::default()
        })
    }

    pub fn dialect(&self) -> &dyn MarkerDialect {
        self.dialect.as_ref()
    }

    /// Render a document; any failure yields the fallback shell
    pub fn render(&self, elements: &[CanvasElement], template_name: &str) -> String {
        match self.try_render(elements, template_name) {
            Ok(html) => html,
            Err(e) => {
                error!("Template rendering failed, using fallback shell: {}", e);
                self.fallback(template_name)
            }
        }
    }

    /// Render a document, surfacing the first failure
    pub fn try_render(
        &self,
        elements: &[CanvasElement],
        template_name: &str,
    ) -> Result<String, RenderError> {
        let mut body = String::new();
        for element in elements {
            body.push_str(&self.render_element(element)?);
        }

        debug!(
            "Rendered {} elements with {} markers",
            elements.len(),
            self.dialect.kind()
        );
        self.shell
            .document(self.title(template_name), &body, &self.document)
    }

    /// Convert editor elements and render them
    pub fn render_raw(&self, elements: &[RawElement], template_name: &str) -> String {
        let converted: Result<Vec<CanvasElement>, RenderError> = elements
            .iter()
            .cloned()
            .map(CanvasElement::from_raw)
            .collect();

        match converted {
            Ok(elements) => self.render(&elements, template_name),
            Err(e) => {
                error!("Template rendering failed, using fallback shell: {}", e);
                self.fallback(template_name)
            }
        }
    }

    /// The static preview shell
    pub fn fallback(&self, template_name: &str) -> String {
        self.shell.fallback(self.title(template_name), &self.document)
    }

    fn title<'a>(&'a self, template_name: &'a str) -> &'a str {
        if template_name.trim().is_empty() {
            &self.document.fallback_title
        } else {
            template_name
        }
    }

    /// HTML fragment for one element
    pub fn render_element(&self, element: &CanvasElement) -> Result<String, RenderError> {
        let html = match &element.kind {
            ElementKind::Text(props) => text(props),
            ElementKind::Heading(props) => heading(props),
            ElementKind::MultiColumn(props) => multi_column(props),
            ElementKind::Image(props) => image(props),
            ElementKind::Button(props) => button(props),
            ElementKind::Link(props) => link(props),
            ElementKind::Hr(props) => hr(props),
            ElementKind::Section(props) => section_element(props),
            ElementKind::Column(props) => column(props),
            ElementKind::Social(props) => social(props),
            ElementKind::ProductRow(props) => self.product_row(props)?,
            ElementKind::InfoTable(props) => info_table(props),
            ElementKind::Unknown { kind } => {
                warn!("Element '{}' has unsupported type '{}'", element.id, kind);
                unsupported(kind)
            }
        };
        Ok(html)
    }

    fn product_row(&self, props: &ProductRowProps) -> Result<String, RenderError> {
        let props = props.with_fallbacks();
        let key = props.repeat_key.as_str();
        let alias = props.repeat_item_alias.as_str();

        if !is_valid_array_key(key) {
            return Err(RenderError::invalid_marker("key", key));
        }
        if !is_valid_alias(alias) {
            return Err(RenderError::invalid_marker("alias", alias));
        }

        let markers = RowMarkers {
            open: self.dialect.open_row(),
            close: self.dialect.close_row(),
            attribute: self.dialect.row_attribute(),
        };
        let body = match props.display_mode {
            DisplayMode::Card => product_card(&props, alias, &markers),
            DisplayMode::Table => product_table(&props, alias, &markers),
        };
        let container = Style::new().set("padding", props.padding.as_str());

        debug!("Writing repeat region '{}' as '{}'", key, alias);
        Ok(format!(
            "{}{}{}",
            self.dialect.open_region(key, alias, &container.attribute()),
            body,
            self.dialect.close_region(key)
        ))
    }
}

/// Row delimiters of the configured dialect
#[derive(Debug)]
struct RowMarkers {
    open: &'static str,
    close: &'static str,
    attribute: &'static str,
}

// ─── Building blocks ────────────────────────────────────────────────

fn attr(value: &str) -> String {
    tera::escape_html(value)
}

/// Placeholder for an item field.
///
/// `item.<field>`, `<alias>.<field>` and bare `<field>` keys address the
/// current item; other dotted paths are left for the outer context.
pub(crate) fn item_placeholder(key: &str, alias: &str, fallback_field: &str) -> String {
    let key = key.trim();
    let path = match key.split_once('.') {
        _ if key.is_empty() => format!("{}.{}", alias, fallback_field),
        None => format!("{}.{}", alias, key),
        Some(("item", field)) => format!("{}.{}", alias, field),
        Some(_) => key.to_string(),
    };
    format_placeholder(&path)
}

/// Full-width presentation table with a single cell
fn section(style: &Style, inner: &str) -> String {
    format!(
        "<table align=\"center\" width=\"100%\" border=\"0\" cellpadding=\"0\" cellspacing=\"0\" role=\"presentation\"{}><tbody><tr><td>{}</td></tr></tbody></table>",
        style_attr(style),
        inner
    )
}

fn style_attr(style: &Style) -> String {
    if style.is_empty() {
        String::new()
    } else {
        format!(" style=\"{}\"", style.attribute())
    }
}

fn paragraph(style: &Style, inner: &str) -> String {
    format!("<p{}>{}</p>", style_attr(style), inner)
}

fn img(src: &str, alt: &str, width: Option<String>, height: Option<String>, style: &Style) -> String {
    let mut html = format!("<img src=\"{}\" alt=\"{}\"", attr(src), attr(alt));
    if let Some(width) = width {
        html.push_str(&format!(" width=\"{}\"", attr(&width)));
    }
    if let Some(height) = height {
        html.push_str(&format!(" height=\"{}\"", attr(&height)));
    }
    html.push_str(&style_attr(style));
    html.push_str(" />");
    html
}

fn anchor(href: &str, style: &Style, inner: &str) -> String {
    format!(
        "<a href=\"{}\" target=\"_blank\"{}>{}</a>",
        attr(href),
        style_attr(style),
        inner
    )
}

/// Single-row table aligning its content
fn aligned(align: TextAlign, inner: &str) -> String {
    format!(
        "<table width=\"100%\" border=\"0\" cellpadding=\"0\" cellspacing=\"0\" role=\"presentation\"><tbody><tr><td align=\"{}\">{}</td></tr></tbody></table>",
        align.as_str(),
        inner
    )
}

fn dimension(value: Option<&Dimension>) -> Option<String> {
    value.and_then(|d| d.attribute())
}

fn number(value: f64) -> String {
    value.to_string()
}

fn unsupported(kind: &str) -> String {
    let name: String = kind
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    format!("<!-- unsupported element: {} -->", name)
}

// ─── Simple elements ────────────────────────────────────────────────

fn text(props: &TextProps) -> String {
    let style = Style::new()
        .set_px("font-size", props.font_size)
        .set("font-weight", props.font_weight.as_str())
        .set("font-family", props.font_family.as_str())
        .set("color", props.color.as_str())
        .background(&props.background_color)
        .set("text-align", props.text_align.as_str())
        .set("line-height", number(props.line_height))
        .set("margin", props.spacing.margin())
        .set("padding", props.spacing.padding())
        .set("white-space", "pre-wrap");
    paragraph(&style, &props.content)
}

fn heading(props: &HeadingProps) -> String {
    let style = Style::new()
        .set_px("font-size", props.font_size)
        .set("font-weight", props.font_weight.as_str())
        .set("font-family", props.font_family.as_str())
        .set("color", props.color.as_str())
        .set("text-align", props.text_align.as_str())
        .set("margin", props.margin.as_str())
        .set("padding", props.padding.as_str());
    let tag = props.level.tag();
    format!("<{}{}>{}</{}>", tag, style_attr(&style), attr(&props.content), tag)
}

fn image(props: &ImageProps) -> String {
    let style = Style::new()
        .set("margin", props.spacing.margin())
        .set("padding", props.spacing.padding())
        .background(&props.background_color);

    let width = if props.keep_aspect_ratio {
        None
    } else {
        dimension(props.width.as_ref())
    };
    let picture = img(
        &props.src,
        &props.alt,
        width,
        dimension(props.height.as_ref()),
        &Style::new().set("display", "block").set("max-width", "100%"),
    );
    let content = if props.is_linked && !props.link_url.trim().is_empty() {
        anchor(
            &props.link_url,
            &Style::new().set("text-decoration", "none"),
            &picture,
        )
    } else {
        picture
    };

    section(&style, &aligned(props.text_align, &content))
}

fn button(props: &ButtonProps) -> String {
    let style = Style::new()
        .set_px("font-size", props.font_size)
        .set("font-weight", props.font_weight.as_str())
        .set("color", props.color.as_str())
        .background(&props.background_color)
        .set_px("border-radius", props.border_radius)
        .set("padding", props.padding.as_str())
        .set("display", "inline-block")
        .set("text-decoration", "none");
    section(
        &Style::new().set("text-align", props.text_align.as_str()),
        &anchor(&props.href, &style, &attr(&props.text)),
    )
}

fn link(props: &LinkProps) -> String {
    let style = Style::new()
        .set("color", props.color.as_str())
        .set("text-decoration", props.text_decoration.as_str())
        .set_px("font-size", props.font_size);
    anchor(&props.href, &style, &attr(&props.text))
}

fn hr(props: &HrProps) -> String {
    let style = Style::new()
        .set("width", "100%")
        .set("border", "none")
        .set("border-top", format!("1px solid {}", props.border_color))
        .set("margin", props.margin.as_str());
    format!("<hr{} />", style_attr(&style))
}

fn section_element(props: &SectionProps) -> String {
    let style = Style::new()
        .background(&props.background_color)
        .set("padding", props.padding.as_str())
        .set_px("border-radius", props.border_radius);
    section(&style, &attr(&props.content))
}

fn column(props: &ColumnProps) -> String {
    format!(
        "<div{}></div>",
        style_attr(&Style::new().set("width", props.width.as_str()))
    )
}

fn social(props: &SocialProps) -> String {
    let icon_size = number(props.icon_size);
    let links: String = props
        .links()
        .into_iter()
        .filter_map(|(network, url)| {
            let (_, icon) = SOCIAL_ICONS.iter().find(|(name, _)| *name == network)?;
            let picture = img(
                icon,
                network,
                Some(icon_size.clone()),
                Some(icon_size.clone()),
                &Style::new()
                    .set("display", "block")
                    .set("border", "none")
                    .set("outline", "none"),
            );
            let style = Style::new()
                .set("display", "inline-block")
                .set("margin", format!("0 {}", px(props.gap / 2.0)))
                .set("text-decoration", "none");
            Some(anchor(url, &style, &picture))
        })
        .collect();

    let style = Style::new()
        .set("padding", props.padding.as_str())
        .set("text-align", props.align.as_str());
    section(&style, &links)
}

// ─── Multi column ───────────────────────────────────────────────────

fn multi_column(props: &MultiColumnProps) -> String {
    let last = props.columns.len().saturating_sub(1);
    let half_gap = props.gap / 2.0;

    let cells: String = props
        .columns
        .iter()
        .enumerate()
        .map(|(index, data)| {
            let style = Style::new()
                .set("width", data.width.as_str())
                .set_px("padding-right", if index == last { 0.0 } else { half_gap })
                .set_px("padding-left", if index == 0 { 0.0 } else { half_gap })
                .set("border-top", data.border_top.as_str())
                .set("border-right", data.border_right.as_str())
                .set("border-bottom", data.border_bottom.as_str())
                .set("border-left", data.border_left.as_str())
                .set("vertical-align", "top");
            format!("<td{}>{}</td>", style_attr(&style), column_content(data))
        })
        .collect();

    let style = Style::new()
        .set("padding", props.padding.as_str())
        .background(&props.background_color);
    section(
        &style,
        &format!(
            "<table width=\"100%\" border=\"0\" cellpadding=\"0\" cellspacing=\"0\" role=\"presentation\"><tbody><tr>{}</tr></tbody></table>",
            cells
        ),
    )
}

fn column_content(data: &ColumnData) -> String {
    match data.content_type {
        ColumnContent::Image => {
            let padding = Sides::new(
                data.img_padding_top,
                data.img_padding_right,
                data.img_padding_bottom,
                data.img_padding_left,
            );
            let margin = Sides::new(
                data.img_margin_top,
                data.img_margin_right,
                data.img_margin_bottom,
                data.img_margin_left,
            );
            let width = if data.img_keep_aspect_ratio {
                None
            } else {
                dimension(data.img_width.as_ref())
            };
            let picture = img(
                &data.src,
                &data.alt,
                width,
                dimension(data.img_height.as_ref()),
                &Style::new().set("max-width", "100%").set("display", "block"),
            );
            let style = Style::new()
                .background(&data.img_background_color)
                .set("padding", padding.to_string())
                .set("margin", margin.to_string());
            format!("<div{}>{}</div>", style_attr(&style), aligned(data.img_align, &picture))
        }
        ColumnContent::Button => {
            let style = Style::new()
                .background(&data.btn_bg)
                .set("color", data.btn_color.as_str())
                .set_px("font-size", data.btn_font_size)
                .set("padding", data.btn_padding.as_str())
                .set_px("border-radius", data.btn_border_radius)
                .set("text-align", "center")
                .set("display", "inline-block")
                .set("text-decoration", "none");
            anchor(&data.btn_link, &style, &attr(&data.btn_text))
        }
        ColumnContent::Text => {
            let style = Style::new()
                .set("margin", data.spacing.margin())
                .set("padding", data.spacing.padding())
                .background(&data.background_color)
                .set("white-space", "pre-wrap")
                .set_px("font-size", data.font_size)
                .set("font-weight", data.font_weight.as_str())
                .set("font-family", data.font_family.as_str())
                .set("color", data.color.as_str())
                .set("text-align", data.text_align.as_str())
                .set("line-height", number(data.line_height));
            paragraph(&style, &data.content)
        }
    }
}

// ─── Product row ────────────────────────────────────────────────────

fn product_card(props: &ProductRowProps, alias: &str, markers: &RowMarkers) -> String {
    let image_style = Style::new()
        .set("display", "block")
        .set_px("border-radius", props.card_img_border_radius)
        .set("border", "none")
        .set("outline", "none");
    let picture = img(
        &item_placeholder(&props.card_img_variable_key, alias, "image_url"),
        "Ürün",
        Some(number(props.card_img_width)),
        Some(number(props.card_img_height)),
        &image_style,
    );
    let picture = if props.card_img_link_enabled {
        let href = if props.card_img_link_is_static {
            props.card_img_link_static_url.clone()
        } else {
            item_placeholder(&props.card_img_link_variable_key, alias, "url")
        };
        format!(
            "<a href=\"{}\"{}>{}</a>",
            attr(&href),
            style_attr(&Style::new().set("display", "block")),
            picture
        )
    } else {
        picture
    };

    let title = paragraph(
        &Style::new()
            .set("margin", "0 0 4px 0")
            .set("padding", "0")
            .set_px("font-size", props.card_title_font_size)
            .set("font-weight", props.card_title_font_weight.as_str())
            .set("color", props.card_title_color.as_str())
            .set("font-family", FONT_STACK)
            .set("line-height", "1.4"),
        &attr(&item_placeholder(&props.card_title_variable_key, alias, "name")),
    );
    let subtitle = paragraph(
        &Style::new()
            .set("margin", "0 0 6px 0")
            .set("padding", "0")
            .set_px("font-size", props.card_subtitle_font_size)
            .set("color", props.card_subtitle_color.as_str())
            .set("font-family", FONT_STACK),
        &attr(&item_placeholder(&props.card_subtitle_variable_key, alias, "details")),
    );
    let price = paragraph(
        &Style::new()
            .set("margin", "0")
            .set("padding", "0")
            .set_px("font-size", props.card_price_font_size)
            .set("font-weight", props.card_price_font_weight.as_str())
            .set("color", props.card_price_color.as_str())
            .set("font-family", FONT_STACK),
        &attr(&item_placeholder(&props.card_price_variable_key, alias, "price")),
    );

    let card_style = Style::new()
        .set("width", "100%")
        .set("background-color", props.card_bg_color.as_str())
        .set("border", format!("1px solid {}", props.card_border_color))
        .set_px("border-radius", props.card_border_radius)
        .set("margin-bottom", "8px");
    let image_cell = Style::new()
        .set("width", px(props.card_img_width))
        .set("padding", props.card_padding.as_str())
        .set("vertical-align", "top");
    let info_cell = Style::new()
        .set("padding", props.card_padding.as_str())
        .set("padding-left", "0")
        .set("vertical-align", "top");

    format!(
        "{}<table role=\"presentation\" cellpadding=\"0\" cellspacing=\"0\"{}{}><tbody><tr><td{}>{}</td><td{}>{}{}{}</td></tr></tbody></table>{}",
        markers.open,
        markers.attribute,
        style_attr(&card_style),
        style_attr(&image_cell),
        picture,
        style_attr(&info_cell),
        title,
        subtitle,
        price,
        markers.close
    )
}

fn product_table(props: &ProductRowProps, alias: &str, markers: &RowMarkers) -> String {
    let table_style = Style::new()
        .set("width", props.table_width.as_str())
        .set("border-collapse", "collapse")
        .set("border", format!("1px solid {}", props.table_border_color))
        .set_px("border-radius", props.border_radius);

    let header = if props.show_header {
        let cells: String = props
            .columns
            .iter()
            .map(|column| {
                let style = Style::new()
                    .set("padding", "12px 10px")
                    .set("text-align", column.text_align.as_str())
                    .set_px("font-size", props.header_font_size)
                    .set("font-weight", props.header_font_weight.as_str())
                    .set("font-family", FONT_STACK)
                    .set("color", props.header_text_color.as_str())
                    .set("border-bottom", format!("2px solid {}", props.table_border_color))
                    .set("width", column.width.as_str());
                format!("<th{}>{}</th>", style_attr(&style), attr(&column.label))
            })
            .collect();
        format!(
            "<thead><tr{}>{}</tr></thead>",
            style_attr(&Style::new().set("background-color", props.header_bg_color.as_str())),
            cells
        )
    } else {
        String::new()
    };

    let cells: String = props
        .columns
        .iter()
        .map(|column| {
            let style = Style::new()
                .set("padding", "12px 10px")
                .set("text-align", column.text_align.as_str())
                .set_px("font-size", column.font_size)
                .set("font-weight", column.font_weight.as_str())
                .set("font-family", FONT_STACK)
                .set("color", column.color.as_str())
                .set("border-bottom", format!("1px solid {}", props.row_border_color))
                .set("width", column.width.as_str())
                .set("vertical-align", "middle");
            format!("<td{}>{}</td>", style_attr(&style), product_cell(column, alias))
        })
        .collect();
    let row_style = Style::new().set("background-color", props.row_bg_color.as_str());

    format!(
        "<table role=\"presentation\" cellpadding=\"0\" cellspacing=\"0\"{}>{}<tbody>{}<tr{}{}>{}</tr>{}</tbody></table>",
        style_attr(&table_style),
        header,
        markers.open,
        markers.attribute,
        style_attr(&row_style),
        cells,
        markers.close
    )
}

/// Column image size; blank or zero sizes fall back to 60
fn image_size(size: Option<&Dimension>) -> String {
    dimension(size).unwrap_or_else(|| "60".to_string())
}

fn product_cell(column: &ProductColumn, alias: &str) -> String {
    match column.column_type {
        ProductColumnType::Image => {
            let style = Style::new()
                .set("display", "block")
                .set(
                    "margin",
                    if column.text_align == TextAlign::Center {
                        "0 auto"
                    } else {
                        "0"
                    },
                )
                .set("border", "none")
                .set("outline", "none");
            let picture = img(
                &item_placeholder(&column.variable_key, alias, "image_url"),
                "Ürün",
                Some(image_size(column.img_width.as_ref())),
                Some(image_size(column.img_height.as_ref())),
                &style,
            );
            if column.link_enabled {
                format!(
                    "<a href=\"{}\"{}>{}</a>",
                    attr(&item_placeholder(&column.link_variable_key, alias, "url")),
                    style_attr(&Style::new().set("display", "block")),
                    picture
                )
            } else {
                picture
            }
        }
        ProductColumnType::Text | ProductColumnType::Price => {
            let style = Style::new()
                .set("margin", "0")
                .set("padding", "0")
                .set_px("font-size", column.font_size)
                .set("font-weight", column.font_weight.as_str())
                .set("color", column.color.as_str())
                .set("font-family", FONT_STACK)
                .set("text-align", column.text_align.as_str());
            paragraph(&style, &attr(&item_placeholder(&column.variable_key, alias, "value")))
        }
    }
}

// ─── Info table ─────────────────────────────────────────────────────

fn info_table(props: &InfoTableProps) -> String {
    let table_style = Style::new()
        .set("width", props.table_width.as_str())
        .set("border-collapse", "collapse")
        .set("background-color", props.table_bg_color.as_str())
        .set("border", format!("1px solid {}", props.table_border_color))
        .set_px("border-radius", props.table_border_radius)
        .set("overflow", "hidden");

    let title = if props.show_title {
        let style = Style::new()
            .set("padding", props.title_padding.as_str())
            .set("background-color", props.title_bg_color.as_str())
            .set("border-bottom", props.title_border_bottom.as_str())
            .set_px("font-size", props.title_font_size)
            .set("font-weight", props.title_font_weight.as_str())
            .set("color", props.title_color.as_str())
            .set("text-align", "left")
            .set("font-family", FONT_STACK);
        format!(
            "<thead><tr><th colspan=\"2\"{}>{}</th></tr></thead>",
            style_attr(&style),
            attr(&props.title)
        )
    } else {
        String::new()
    };

    let last = props.rows.len().saturating_sub(1);
    let rows: String = props
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| info_row(props, row, index == last))
        .collect();

    // Outer spacing is applied as padding of the wrapper
    let sides = props.spacing.margin_sides();
    let wrapper = Style::new().set("padding", resolve_spacing(None, sides));

    section(
        &wrapper,
        &format!(
            "<table role=\"presentation\" cellpadding=\"0\" cellspacing=\"0\"{}>{}<tbody>{}</tbody></table>",
            style_attr(&table_style),
            title,
            rows
        ),
    )
}

fn info_row(props: &InfoTableProps, row: &InfoRow, is_last: bool) -> String {
    let border = if is_last {
        "none"
    } else {
        props.row_border_bottom.as_str()
    };
    let cell = |width: &str, align: TextAlign| {
        Style::new()
            .set("width", width)
            .set("padding", props.row_padding.as_str())
            .set("border-bottom", border)
            .set("text-align", align.as_str())
            .set("vertical-align", "middle")
            .set("font-family", FONT_STACK)
    };

    let label_style = Style::new()
        .set("margin", "0")
        .set("padding", "0")
        .set("font-family", FONT_STACK)
        .set_px("font-size", props.label_font_size)
        .set("color", props.label_color.as_str());
    let label_style = match row.label_style {
        LabelStyle::Bold => label_style.set("font-weight", "bold"),
        LabelStyle::Italic => label_style.set("font-style", "italic"),
        LabelStyle::Normal => label_style.set("font-weight", props.label_font_weight.as_str()),
    };

    let value = if row.value_key.trim().is_empty() {
        String::new()
    } else {
        let style = Style::new()
            .set("margin", "0")
            .set("padding", "0")
            .set("font-family", FONT_STACK)
            .set_px(
                "font-size",
                row.value_font_size.unwrap_or(props.value_font_size),
            )
            .set(
                "color",
                row.value_color.as_deref().unwrap_or(&props.value_color),
            );
        let style = match row.value_style {
            ValueStyle::Bold => style.set("font-weight", "bold"),
            ValueStyle::Italic => style.set("font-style", "italic"),
            ValueStyle::Strikethrough => style.set("text-decoration", "line-through"),
            ValueStyle::Normal => style.set("font-weight", "normal"),
        };
        paragraph(&style, &attr(&format_placeholder(row.value_key.trim())))
    };

    format!(
        "<tr><td{}>{}</td><td{}>{}</td></tr>",
        style_attr(&cell(&props.label_width, props.label_align)),
        paragraph(&label_style, &attr(&row.label)),
        style_attr(&cell(&props.value_width, props.value_align)),
        value
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::HeadingLevel;

    fn comment_renderer() -> TemplateRenderer {
        TemplateRenderer::with_dialect(DialectKind::Comment).unwrap()
    }

    #[test]
    fn test_item_placeholder_normalization() {
        assert_eq!(item_placeholder("item.name", "product", "value"), "[[product.name]]");
        assert_eq!(item_placeholder("product.name", "product", "value"), "[[product.name]]");
        assert_eq!(item_placeholder("name", "product", "value"), "[[product.name]]");
        assert_eq!(item_placeholder("  ", "product", "value"), "[[product.value]]");
        assert_eq!(item_placeholder("order.currency", "product", "value"), "[[order.currency]]");
    }

    #[test]
    fn test_heading_fragment() {
        let html = heading(&HeadingProps {
            content: "Fiyat < 100 & indirim".to_string(),
            level: HeadingLevel::H3,
            ..HeadingProps::default()
        });
        assert!(html.starts_with("<h3 style=\"font-size:24px;"));
        assert!(html.contains("margin:0 0 10px 0;padding:0"));
        assert!(html.ends_with(">Fiyat &lt; 100 &amp; indirim</h3>"));
    }

    #[test]
    fn test_text_keeps_rich_content() {
        let html = text(&TextProps {
            content: "<b>Merhaba</b> [[customer.name]]".to_string(),
            ..TextProps::default()
        });
        assert!(html.contains("><b>Merhaba</b> [[customer.name]]</p>"));
        assert!(html.contains("white-space:pre-wrap"));
        assert!(!html.contains("background-color"));
    }

    #[test]
    fn test_unsupported_name_is_sanitized() {
        assert_eq!(unsupported("countdown"), "<!-- unsupported element: countdown -->");
        assert_eq!(unsupported("x--><script>"), "<!-- unsupported element: xscript -->");
    }

    #[test]
    fn test_product_rows_always_write_a_region() {
        let renderer = comment_renderer();
        let html = renderer
            .product_row(&ProductRowProps {
                is_repeatable: false,
                ..ProductRowProps::default()
            })
            .unwrap();
        assert!(html.starts_with("<!-- REPEAT_START:order_items:item -->"));
        assert!(html.contains("<!-- REPEAT_ROW_START -->"));
        assert!(html.contains("[[item.name]]"));
    }

    #[test]
    fn test_blank_repeat_key_and_alias_use_defaults() {
        let renderer = comment_renderer();
        let html = renderer
            .product_row(&ProductRowProps {
                repeat_key: String::new(),
                repeat_item_alias: " ".to_string(),
                card_img_width: 0.0,
                ..ProductRowProps::default()
            })
            .unwrap();
        assert!(html.starts_with("<!-- REPEAT_START:order_items:item -->"));
        assert!(html.ends_with("<!-- REPEAT_END:order_items -->"));
        assert!(html.contains("width=\"80\""));
    }

    #[test]
    fn test_column_image_size_fallback() {
        assert_eq!(image_size(None), "60");
        assert_eq!(image_size(Some(&Dimension::Css(String::new()))), "60");
        assert_eq!(image_size(Some(&Dimension::Pixels(0.0))), "60");
        assert_eq!(image_size(Some(&Dimension::Pixels(48.0))), "48");
    }

    #[test]
    fn test_invalid_repeat_alias_is_rejected() {
        let renderer = comment_renderer();
        let err = renderer
            .product_row(&ProductRowProps {
                repeat_item_alias: "line item".to_string(),
                ..ProductRowProps::default()
            })
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidMarker { ref field, .. } if field == "alias"));
    }

    #[test]
    fn test_info_table_rows() {
        let html = info_table(&InfoTableProps::default());
        assert!(html.contains("[[order.total]]"));
        assert!(html.contains("text-decoration:line-through"));
        assert!(html.contains("Sipariş Özeti"));
        assert_eq!(html.matches("border-bottom:none").count(), 2);
    }

    #[test]
    fn test_social_only_configured_networks() {
        let html = social(&SocialProps {
            instagram: "https://instagram.com/shop".to_string(),
            ..SocialProps::default()
        });
        assert_eq!(html.matches("<a ").count(), 1);
        assert!(html.contains("alt=\"instagram\""));
        assert!(html.contains("width=\"32\" height=\"32\""));
        assert!(html.contains("margin:0 5px"));
    }
}

//! Page and link records as stored in the `pages` and `links` collections.

use std::fmt;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Kind of page, stored as the `type` field of both pages and links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    /// The landing page served at `/`
    Index,
    /// Pages linked from the main navigation
    Main,
    /// Pages linked from the footer
    Footer,
    /// Articles listed on the landing page
    Article,
}

impl PageKind {
    /// All kinds, in navigation order.
    pub const ALL: [PageKind; 4] = [
        PageKind::Index,
        PageKind::Main,
        PageKind::Footer,
        PageKind::Article,
    ];

    /// Value of the `type` field.
    pub fn as_str(self) -> &'static str {
        match self {
            PageKind::Index => "index",
            PageKind::Main => "main",
            PageKind::Footer => "footer",
            PageKind::Article => "article",
        }
    }

    /// URL prefix that routes to pages of this kind.
    pub fn route_prefix(self) -> &'static str {
        match self {
            PageKind::Index => "/",
            PageKind::Main => "/main/",
            PageKind::Footer => "/footer/",
            PageKind::Article => "/article/",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A renderable page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    #[serde(rename = "type")]
    pub kind: PageKind,

    /// URL slug, derived from the title when seeding
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Trusted HTML, rendered without escaping
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,

    /// Page specific stylesheet
    #[serde(
        rename = "customCSS",
        alias = "customCss",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub custom_css: String,

    /// Page specific script
    #[serde(
        rename = "customScript",
        alias = "customJS",
        alias = "customJs",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub custom_js: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,

    /// Embedded video URL
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub video: String,
}

impl Page {
    /// Create an empty page of the given kind.
    pub fn new(kind: PageKind, title: impl Into<String>) -> Self {
        Self {
            id: None,
            kind,
            tag: String::new(),
            title: title.into(),
            description: String::new(),
            content: String::new(),
            custom_css: String::new(),
            custom_js: String::new(),
            images: Vec::new(),
            video: String::new(),
        }
    }

    /// Whether the page carries more than one image.
    pub fn is_slideshow(&self) -> bool {
        self.images.len() > 1
    }

    /// Whether the page embeds a video.
    pub fn has_video(&self) -> bool {
        !self.video.is_empty()
    }
}

/// A navigation entry pointing at a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    #[serde(rename = "type")]
    pub kind: PageKind,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,

    /// Cover image shown in article listings
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cover_image: String,
}

impl Link {
    /// Derive the navigation link for a page.
    ///
    /// Index pages link to `/`, everything else to `/{type}/{tag}`.
    /// Articles use their first image as cover.
    pub fn for_page(page: &Page) -> Self {
        let url = match page.kind {
            PageKind::Index => "/".to_string(),
            kind => format!("/{}/{}", kind, page.tag),
        };

        let cover_image = match page.kind {
            PageKind::Article => page.images.first().cloned().unwrap_or_default(),
            _ => String::new(),
        };

        Self {
            id: None,
            kind: page.kind,
            tag: page.tag.clone(),
            title: page.title.clone(),
            url,
            cover_image,
        }
    }
}

/// Convert a page title into a URL tag.
///
/// Lowercases, folds German umlauts and sharp s to ASCII and drops spaces.
pub fn convert_to_tag(title: &str) -> String {
    let mut tag = String::with_capacity(title.len());

    // per character, so a word-final sigma stays σ
    for c in title.chars().flat_map(char::to_lowercase) {
        match c {
            'ä' => tag.push('a'),
            'ö' => tag.push('o'),
            'ü' => tag.push('u'),
            'ß' => tag.push_str("ss"),
            ' ' => {}
            other => tag.push(other),
        }
    }

    tag
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn converts_titles_to_tags() {
        assert_eq!(convert_to_tag("Über Mich"), "ubermich");
        assert_eq!(convert_to_tag("Größe"), "grosse");
        assert_eq!(convert_to_tag("Portfolio"), "portfolio");
        assert_eq!(convert_to_tag("Kontakt & Impressum"), "kontakt&impressum");
        assert_eq!(convert_to_tag(""), "");
        assert_eq!(convert_to_tag("ΟΔΟΣ"), "οδοσ");
        assert_eq!(convert_to_tag("Foto/Video"), "foto/video");
    }

    #[test]
    fn index_link_points_at_root() {
        let mut page = Page::new(PageKind::Index, "Portfolio");
        page.tag = "portfolio".to_string();

        let link = Link::for_page(&page);

        assert_eq!(link.url, "/");
        assert_eq!(link.kind, PageKind::Index);
        assert_eq!(link.tag, "portfolio");
        assert!(link.cover_image.is_empty());
    }

    #[test]
    fn article_link_uses_first_image_as_cover() {
        let mut page = Page::new(PageKind::Article, "Harz Tour");
        page.tag = "harztour".to_string();
        page.images = vec!["a.jpg".to_string(), "b.jpg".to_string()];

        let link = Link::for_page(&page);

        assert_eq!(link.url, "/article/harztour");
        assert_eq!(link.cover_image, "a.jpg");
    }

    #[test]
    fn article_without_images_has_no_cover() {
        let mut page = Page::new(PageKind::Article, "Notes");
        page.tag = "notes".to_string();

        assert_eq!(Link::for_page(&page).cover_image, "");
    }

    #[test]
    fn main_link_ignores_images() {
        let mut page = Page::new(PageKind::Main, "Lebenslauf");
        page.tag = "lebenslauf".to_string();
        page.images = vec!["cv.jpg".to_string()];

        let link = Link::for_page(&page);

        assert_eq!(link.url, "/main/lebenslauf");
        assert!(link.cover_image.is_empty());
    }

    #[test]
    fn parses_seed_json() {
        let json = r#"[
            {
                "type": "main",
                "title": "Wohnort",
                "content": "<p>Hi</p>",
                "customCSS": "map.css",
                "customJS": "map.js",
                "images": ["x.jpg"]
            }
        ]"#;

        let pages: Vec<Page> = serde_json::from_str(json).unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].kind, PageKind::Main);
        assert_eq!(pages[0].custom_css, "map.css");
        assert_eq!(pages[0].custom_js, "map.js");
        assert!(pages[0].tag.is_empty());
        assert!(!pages[0].has_video());
        assert!(!pages[0].is_slideshow());
    }

    #[test]
    fn omits_empty_fields_when_serialized() {
        let page = Page::new(PageKind::Footer, "Impressum");
        let json = serde_json::to_value(&page).unwrap();

        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["type"], "footer");
        assert!(json.get("customScript").is_none());
    }

    #[test]
    fn route_prefixes_match_kinds() {
        for kind in PageKind::ALL {
            let prefix = kind.route_prefix();
            if kind == PageKind::Index {
                assert_eq!(prefix, "/");
            } else {
                assert_eq!(prefix, format!("/{}/", kind));
            }
        }
    }
}

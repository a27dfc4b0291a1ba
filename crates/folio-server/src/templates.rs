//! Template engine for rendering site pages.
//!
//! Every page is rendered through one of four content templates, each of
//! which extends `base.templ.html`. Templates are loaded lazily from the
//! templates directory and cached until [`TemplateEngine::reload`] is
//! called.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use minijinja::{path_loader, Environment};
use serde::Serialize;

use folio_store::{Link, Page, PageKind};

/// Layout shared by all content templates.
pub const BASE_TEMPLATE: &str = "base.templ.html";

/// Content template used to render a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// Landing page with the article overview
    Index,
    /// Plain page with at most one image
    Page,
    /// Page with an image carousel
    Slideshow,
    /// Page with an embedded video
    Video,
}

impl TemplateKind {
    /// All content templates.
    pub const ALL: [TemplateKind; 4] = [
        TemplateKind::Index,
        TemplateKind::Page,
        TemplateKind::Slideshow,
        TemplateKind::Video,
    ];

    /// File name inside the templates directory.
    pub fn file_name(self) -> &'static str {
        match self {
            TemplateKind::Index => "index.templ.html",
            TemplateKind::Page => "page.templ.html",
            TemplateKind::Slideshow => "slideshow.templ.html",
            TemplateKind::Video => "video.templ.html",
        }
    }

    /// Pick the template for a page reached through a route of `kind`.
    ///
    /// More than one image wins over a video, and both win over the
    /// route's default template.
    pub fn select(kind: PageKind, page: &Page) -> Self {
        if page.is_slideshow() {
            TemplateKind::Slideshow
        } else if page.has_video() {
            TemplateKind::Video
        } else if kind == PageKind::Index {
            TemplateKind::Index
        } else {
            TemplateKind::Page
        }
    }
}

/// Data handed to every template.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateData {
    /// The page being rendered
    pub page: Page,
    /// Link back to the landing page
    pub index_link: Option<Link>,
    /// Main navigation
    pub main_links: Vec<Link>,
    /// Footer navigation
    pub footer_links: Vec<Link>,
    /// Article overview, only filled on the landing page
    pub article_links: Vec<Link>,
}

/// Errors raised by the template engine.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Template directory not found: {0}")]
    MissingDirectory(String),

    #[error("Template {name} not found in {dir}")]
    MissingTemplate { name: &'static str, dir: String },

    #[error("Failed to render {name}: {message}")]
    RenderError { name: &'static str, message: String },
}

/// Template engine using minijinja with a directory loader.
pub struct TemplateEngine {
    env: RwLock<Environment<'static>>,
    dir: PathBuf,
}

impl TemplateEngine {
    /// Create an engine over `dir`.
    ///
    /// Fails if the directory or any of the five templates is missing.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Result<Self, TemplateError> {
        let dir = dir.into();

        if !dir.is_dir() {
            return Err(TemplateError::MissingDirectory(dir.display().to_string()));
        }

        let required = std::iter::once(BASE_TEMPLATE)
            .chain(TemplateKind::ALL.iter().map(|kind| kind.file_name()));
        for name in required {
            if !dir.join(name).is_file() {
                return Err(TemplateError::MissingTemplate {
                    name,
                    dir: dir.display().to_string(),
                });
            }
        }

        let mut env = Environment::new();
        env.set_loader(path_loader(&dir));

        tracing::debug!("Loading templates from {}", dir.display());

        Ok(Self {
            env: RwLock::new(env),
            dir,
        })
    }

    /// Directory templates are loaded from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Render `data` with the given content template.
    pub fn render(&self, kind: TemplateKind, data: &TemplateData) -> Result<String, TemplateError> {
        let name = kind.file_name();
        let render_error = |message: String| TemplateError::RenderError { name, message };

        let env = self
            .env
            .read()
            .map_err(|_| render_error("template cache lock poisoned".to_string()))?;

        let tmpl = env
            .get_template(name)
            .map_err(|e| render_error(e.to_string()))?;

        tmpl.render(data).map_err(|e| render_error(e.to_string()))
    }

    /// Drop cached templates so the next render reads them from disk.
    pub fn reload(&self) {
        if let Ok(mut env) = self.env.write() {
            env.clear_templates();
            tracing::debug!("Cleared template cache for {}", self.dir.display());
        }
    }
}

/// Write the default template set into `dir`.
///
/// Existing files are kept unless `overwrite` is set. Returns the number of
/// files written.
pub fn write_default_templates(dir: &Path, overwrite: bool) -> io::Result<usize> {
    fs::create_dir_all(dir)?;

    let mut written = 0;
    for (name, source) in DEFAULT_TEMPLATES {
        let path = dir.join(name);
        if path.exists() && !overwrite {
            continue;
        }
        fs::write(&path, source)?;
        written += 1;
    }

    Ok(written)
}

/// File name and source of the default templates.
pub const DEFAULT_TEMPLATES: [(&str, &str); 5] = [
    (BASE_TEMPLATE, BASE),
    ("index.templ.html", INDEX),
    ("page.templ.html", PAGE),
    ("slideshow.templ.html", SLIDESHOW),
    ("video.templ.html", VIDEO),
];

const BASE: &str = r##"<!DOCTYPE html>
<html lang="de">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ page.title }}</title>
  {% if page.description %}<meta name="description" content="{{ page.description }}">
  {% endif %}<link rel="stylesheet" href="/static/css/main.css">
  {% if page.customCSS %}<link rel="stylesheet" href="/temporary/assets/css/{{ page.customCSS }}">
  {% endif %}
</head>
<body>
  <header class="site-header">
    {% if index_link %}<a class="site-home" href="{{ index_link.url }}">{{ index_link.title }}</a>{% endif %}
    <nav class="main-nav">
      <ul>
      {% for link in main_links %}
        <li class="nav-item{% if link.tag == page.tag and page.type == 'main' %} active{% endif %}">
          <a href="{{ link.url }}">{{ link.title }}</a>
        </li>
      {% endfor %}
      </ul>
    </nav>
  </header>
  <main class="content">
    {% block content %}{% endblock %}
  </main>
  <footer class="site-footer">
    <ul>
    {% for link in footer_links %}
      <li><a href="{{ link.url }}">{{ link.title }}</a></li>
    {% endfor %}
    </ul>
  </footer>
  {% if page.customScript %}<script src="/temporary/assets/js/{{ page.customScript }}"></script>
  {% endif %}
</body>
</html>"##;

const INDEX: &str = r##"{% extends "base.templ.html" %}

{% block content %}
<section class="intro">
  <h1>{{ page.title }}</h1>
  {{ page.content | safe }}
</section>
{% if article_links %}
<section class="articles">
  {% for article in article_links %}
  <a class="article-card" href="{{ article.url }}">
    {% if article.coverImage %}<img src="/temporary/assets/img/{{ article.coverImage }}" alt="{{ article.title }}">{% endif %}
    <h2>{{ article.title }}</h2>
  </a>
  {% endfor %}
</section>
{% endif %}
{% endblock %}"##;

const PAGE: &str = r##"{% extends "base.templ.html" %}

{% block content %}
<article class="page">
  <h1>{{ page.title }}</h1>
  {% if page.images %}<img class="page-image" src="/temporary/assets/img/{{ page.images[0] }}" alt="{{ page.title }}">{% endif %}
  {{ page.content | safe }}
</article>
{% endblock %}"##;

const SLIDESHOW: &str = r##"{% extends "base.templ.html" %}

{% block content %}
<article class="page">
  <h1>{{ page.title }}</h1>
  <div class="slideshow">
    {% for image in page.images %}
    <figure class="slide{% if loop.first %} active{% endif %}">
      <img src="/temporary/assets/img/{{ image }}" alt="{{ page.title }} {{ loop.index }}">
    </figure>
    {% endfor %}
    <button class="slide-prev" type="button">&lsaquo;</button>
    <button class="slide-next" type="button">&rsaquo;</button>
  </div>
  {{ page.content | safe }}
</article>
<script src="/static/js/slideshow.js"></script>
{% endblock %}"##;

const VIDEO: &str = r##"{% extends "base.templ.html" %}

{% block content %}
<article class="page">
  <h1>{{ page.title }}</h1>
  <div class="video">
    <iframe src="{{ page.video }}" title="{{ page.title }}" allowfullscreen></iframe>
  </div>
  {{ page.content | safe }}
</article>
{% endblock %}"##;

//! Default static assets referenced by the default templates.

use std::fs;
use std::io;
use std::path::Path;

/// Static files written by `folio init`, relative to the static directory.
pub const DEFAULT_ASSETS: [(&str, &str); 2] = [
    ("css/main.css", DEFAULT_CSS),
    ("js/slideshow.js", DEFAULT_JS),
];

/// Write the default assets below `dir`.
///
/// Existing files are kept unless `overwrite` is set. Returns the number of
/// files written.
pub fn write_default_assets(dir: &Path, overwrite: bool) -> io::Result<usize> {
    let mut written = 0;

    for (name, source) in DEFAULT_ASSETS {
        let path = dir.join(name);
        if path.exists() && !overwrite {
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, source)?;
        written += 1;
    }

    Ok(written)
}

const DEFAULT_CSS: &str = r#"/* folio default theme */

:root {
  --background: #fafafa;
  --foreground: #1f2328;
  --muted: #eef0f2;
  --primary: #2f6f8f;
  --content-max-width: 960px;
}

* {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: system-ui, -apple-system, sans-serif;
  background: var(--background);
  color: var(--foreground);
  line-height: 1.6;
}

.site-header,
.site-footer {
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 1rem 2rem;
  background: var(--muted);
}

.site-home {
  font-weight: 700;
  color: var(--foreground);
  text-decoration: none;
}

.main-nav ul,
.site-footer ul {
  display: flex;
  gap: 1rem;
  list-style: none;
  margin: 0;
  padding: 0;
}

.nav-item a,
.site-footer a {
  color: var(--foreground);
  text-decoration: none;
}

.nav-item.active a {
  color: var(--primary);
  font-weight: 600;
}

.content {
  max-width: var(--content-max-width);
  margin: 2rem auto;
  padding: 0 1rem;
}

.articles {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(240px, 1fr));
  gap: 1.5rem;
}

.article-card {
  color: inherit;
  text-decoration: none;
}

.article-card img,
.page-image,
.slide img {
  width: 100%;
  border-radius: 0.5rem;
}

.slideshow {
  position: relative;
}

.slide {
  display: none;
  margin: 0;
}

.slide.active {
  display: block;
}

.slide-prev,
.slide-next {
  position: absolute;
  top: 50%;
  border: none;
  background: rgba(0, 0, 0, 0.4);
  color: #fff;
  font-size: 2rem;
  cursor: pointer;
}

.slide-prev {
  left: 0.5rem;
}

.slide-next {
  right: 0.5rem;
}

.video iframe {
  width: 100%;
  aspect-ratio: 16 / 9;
  border: 0;
}
"#;

const DEFAULT_JS: &str = r#"// folio slideshow
(function() {
  'use strict';

  document.querySelectorAll('.slideshow').forEach(show => {
    const slides = Array.from(show.querySelectorAll('.slide'));
    if (slides.length < 2) return;

    let current = 0;
    const go = step => {
      slides[current].classList.remove('active');
      current = (current + step + slides.length) % slides.length;
      slides[current].classList.add('active');
    };

    show.querySelector('.slide-prev').addEventListener('click', () => go(-1));
    show.querySelector('.slide-next').addEventListener('click', () => go(1));
  });
})();
"#;

//! Site navigation.
//!
//! The nav bar is a fixed route-to-label mapping: the site's information
//! architecture does not change per build, so the links live in code rather
//! than in `site.toml`. Active-link detection is the only logic here —
//! exact match, or nesting under `{path}/`, with the root matching only
//! itself so it doesn't light up on every page.
//!
//! The mobile menu is CSS-only: a hidden checkbox toggled by the hamburger
//! label slides the panel in, so the generated site ships no JavaScript.

use maud::{Markup, html};

/// One navigation entry: display label and absolute route path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub path: &'static str,
}

impl NavLink {
    /// The href emitted into markup: the root stays `/`, every other route
    /// maps to its flat HTML file.
    pub fn href(&self) -> String {
        if self.path == "/" {
            "/".to_string()
        } else {
            format!("{}.html", self.path)
        }
    }
}

/// The site's navigation links, in display order.
pub fn nav_links() -> [NavLink; 5] {
    [
        NavLink { label: "Home", path: "/" },
        NavLink { label: "The Problem", path: "/problem" },
        NavLink { label: "The Solution", path: "/solution" },
        NavLink { label: "Stories", path: "/stories" },
        NavLink { label: "Get Involved", path: "/get-involved" },
    ]
}

/// Whether `link_path` should be highlighted for the page at `current`.
///
/// - `/` matches only itself (never as a prefix).
/// - Every other path matches exactly, or any page nested under it:
///   `/stories` is active on `/stories/maria`.
pub fn is_active(current: &str, link_path: &str) -> bool {
    if link_path == "/" {
        return current == "/";
    }
    current == link_path || current.starts_with(&format!("{link_path}/"))
}

/// Render the site navigation for the page at `current`.
///
/// Hamburger style: checkbox + label toggle, panel slides from the right.
/// The active link's `<li>` gets a `current` class.
pub fn render_nav(current: &str) -> Markup {
    html! {
        input.nav-toggle type="checkbox" id="nav-toggle";
        label.nav-hamburger for="nav-toggle" {
            span.hamburger-line {}
            span.hamburger-line {}
            span.hamburger-line {}
        }
        div.nav-panel {
            label.nav-close for="nav-toggle" { "×" }
            ul {
                @for link in nav_links() {
                    @let active = is_active(current, link.path);
                    li class=[active.then_some("current")] {
                        a href=(link.href()) { (link.label) }
                    }
                }
            }
        }
    }
}

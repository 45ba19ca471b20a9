//! Layout patches: viewport pinning and sidebar visibility.

use crate::provider::Provider;

/// Id of the injected `<meta name="viewport">` element.
pub const VIEWPORT_META_ID: &str = "omni-viewport";

/// Pins the layout viewport to the frame width and disables page-level
/// pinch zoom, which would fight the panel's own zoom.
pub const VIEWPORT_CONTENT: &str = "width=device-width, initial-scale=1, maximum-scale=1, user-scalable=no";

/// Id of the injected stylesheet.
pub const STYLE_ID: &str = "omni-compat-style";

/// Class toggled on a sidebar to hide it.
pub const HIDDEN_CLASS: &str = "omni-hidden";

/// Sidebar candidates, in preference order.
pub const SIDEBAR_SELECTORS: &[&str] = &[
	"[data-testid*=\"sidebar\"]",
	"div[class*=\"sidebar\"]",
	"div[class*=\"Sidebar\"]",
];

pub const RECENTS_BUTTON_ID: &str = "omni-recents-btn";
pub const RECENTS_PATH: &str = "/recents";

/// Stylesheet injected into `provider`'s pages.
pub fn compat_css(provider: Provider) -> String {
	let mut css = format!(".{HIDDEN_CLASS} {{ display: none !important; }}\n");
	let site = match provider {
		// Collapsed-by-default side nav overlaps the composer at panel widths.
		Provider::Gemini => "bard-sidenav-container bard-sidenav { max-width: 72vw !important; }",
		Provider::ChatGPT => "#stage-slideover-sidebar { max-width: 80vw !important; }",
		Provider::Claude => "nav[data-testid*=\"sidebar\"] { z-index: 999998 !important; }",
		Provider::DeepSeek | Provider::Grok => "",
	};
	if !site.is_empty() {
		css.push_str(site);
		css.push('\n');
	}
	css.push_str(&format!("#{RECENTS_BUTTON_ID}:hover {{ background: #333 !important; transform: scale(1.1); }}\n"));
	css
}

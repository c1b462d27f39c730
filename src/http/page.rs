//! Greeting page served while healthy.

use crate::config::PageConfig;

/// Render the page whose buttons drive the trigger endpoints.
pub fn render_greeting(config: &PageConfig) -> String {
    let base = format!("http://{}:{}", config.public_address, config.public_port);
    let button = |path: &str, label: &str| {
        format!(
            "<button onclick=\"let r = new XMLHttpRequest(); r.open('GET', '{base}{path}', false); \
             r.send(null); location.reload()\">{label}</button>"
        )
    };

    [
        "<div>Hello there. I am working and healthy :)</div>\n<br>".to_string(),
        button("/break", "Break me"),
        button("/breakManual", "Break me (solve manually)"),
        button("/addcron", "Add cronjob"),
        button("/removecron", "Remove cronjob"),
    ]
    .join("\n&nbsp; ")
}

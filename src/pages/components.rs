//! Shared page chrome: layout shell, loading indicator and stylesheet.

use maud::{DOCTYPE, Markup, PreEscaped, html};

pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:Inter,-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;background:#000;color:#f1f5f9}
a{color:inherit;text-decoration:none}
a:hover{text-decoration:underline}
.layout{display:flex;height:100vh;justify-content:center}
.column{height:100%;width:100%;max-width:42rem;overflow-y:auto;border-left:1px solid #94a3b8;border-right:1px solid #94a3b8}
.profile-banner{position:relative;height:9rem;background:#475569}
.profile-avatar{position:absolute;bottom:0;left:0;margin-bottom:-74px;margin-left:1rem;border-radius:50%;border:4px solid #000;background:#000}
.profile-spacer{height:74px}
.profile-handle{padding:1rem;font-size:1.5rem;font-weight:700}
.divider{width:100%;border-bottom:1px solid #94a3b8}
.feed{display:flex;flex-direction:column}
.post{display:flex;gap:.75rem;padding:1rem;border-bottom:1px solid #94a3b8}
.post-avatar{border-radius:50%;width:56px;height:56px}
.post-body{display:flex;flex-direction:column}
.post-meta{display:flex;gap:.25rem;color:#cbd5e1}
.post-time{font-weight:300}
.post-content{font-size:1.5rem}
.empty{padding:1rem}
.loading{display:flex;height:100%;width:100%;align-items:center;justify-content:center;padding:2rem}
.spinner{width:2rem;height:2rem;border:3px solid #475569;border-top-color:#f1f5f9;border-radius:50%;animation:spin 1s linear infinite}
@keyframes spin{to{transform:rotate(360deg)}}
"#;

/// Full HTML document around `body`.
pub fn page_shell(title: &str, canonical: Option<&str>, body: Markup, props_json: Option<&str>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                @if let Some(href) = canonical {
                    link rel="canonical" href=(href);
                }
                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                (body)
                @if let Some(json) = props_json {
                    script id="__PAGE_PROPS__" type="application/json" { (PreEscaped(json)) }
                }
            }
        }
    }
}

/// Centered single column.
pub fn page_layout(content: Markup) -> Markup {
    html! {
        main class="layout" {
            div class="column" { (content) }
        }
    }
}

pub fn loading_spinner() -> Markup {
    html! {
        div class="loading" role="status" {
            div class="spinner" {}
        }
    }
}

pub fn loading_page() -> Markup {
    html! {
        div class="loading-page" { (loading_spinner()) }
    }
}

/// Placeholder shown for profiles that don't exist.
pub fn not_found() -> Markup {
    html! { div { "404" } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_emits_canonical_link_only_when_given() {
        let with = page_shell("t", Some("https://chirp.example/@alice"), html! {}, None).into_string();
        assert!(with.contains(r#"<link rel="canonical" href="https://chirp.example/@alice">"#));

        let without = page_shell("t", None, html! {}, None).into_string();
        assert!(!without.contains("canonical"));
        assert!(!without.contains("__PAGE_PROPS__"));
    }
}

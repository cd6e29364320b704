use maud::{html, Markup};

/// Non-blocking notice banner; carried across redirects in the `flash`
/// query parameter. Errors and successes share the same surface.
pub fn flash_banner(flash: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = flash {
            @if !message.is_empty() {
                div class="flash" role="status" { (message) }
            }
        }
    }
}

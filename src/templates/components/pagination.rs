use maud::{html, Markup};

/// Numbered page links plus prev/next, preserving the search keyword.
pub fn pager(base: &str, current_page: u32, total_pages: u32, keyword: &str) -> Markup {
    let link = |page: u32| {
        if keyword.is_empty() {
            format!("{base}?page={page}")
        } else {
            format!(
                "{base}?page={page}&q={}",
                url::form_urlencoded::byte_serialize(keyword.as_bytes()).collect::<String>()
            )
        }
    };

    html! {
        @if total_pages > 1 {
            nav class="pager" {
                @if current_page > 1 {
                    a href=(link(current_page - 1)) { "‹ Prev" }
                }
                @for page in 1..=total_pages {
                    @if page == current_page {
                        span class="current" { (page) }
                    } @else {
                        a href=(link(page)) { (page) }
                    }
                }
                @if current_page < total_pages {
                    a href=(link(current_page + 1)) { "Next ›" }
                }
            }
        }
    }
}

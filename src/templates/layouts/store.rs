use crate::templates::components::flash_banner;
use maud::{html, Markup, DOCTYPE};

pub fn store_layout(
    title: &str,
    logged_in: bool,
    flash: Option<&str>,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href="/static/main.css";
            }
            body {
                header class="flex items-center justify-between px-6 py-3 shadow" {
                    a href="/" { h3 { "Shop" } }
                    nav {
                        ul {
                            li { a href="/" { "Home" } }
                            li { a href="/cart" { "Cart" } }
                        }
                    }
                    @if logged_in {
                        div class="inline" {
                            a href="/account" { "Account" }
                            form action="/logout" method="post" style="display: inline; margin-left: 12px;" {
                                button type="submit" class="link-button" { "Log out" }
                            }
                        }
                    } @else {
                        div class="inline" {
                            a href="/register" { "Create Account" }
                            a href="/login" style="margin-left: 12px;" { "Login" }
                        }
                    }
                }
                (flash_banner(flash))
                (content)
            }
        }
    }
}

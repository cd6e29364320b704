use crate::admin::resources::RESOURCES;
use crate::templates::components::flash_banner;
use maud::{html, Markup, DOCTYPE};

pub fn admin_layout(title: &str, active_key: &str, flash: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " — Back Office" }
                link rel="stylesheet" href="/static/main.css";
            }
            body class="admin" {
                header class="flex items-center justify-between px-6 py-3 shadow" {
                    h3 { "Back Office" }
                    form action="/admin/logout" method="post" style="margin: 0;" {
                        button type="submit" class="link-button" { "Log out" }
                    }
                }
                div class="admin-shell" {
                    aside class="sidebar" {
                        nav {
                            ul {
                                @for spec in RESOURCES {
                                    li {
                                        a href=(format!("/admin/{}", spec.key))
                                          class=[(spec.key == active_key).then_some("active")] {
                                            (spec.name)
                                        }
                                    }
                                }
                            }
                        }
                    }
                    div class="admin-content" {
                        (flash_banner(flash))
                        (content)
                    }
                }
            }
        }
    }
}

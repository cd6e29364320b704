use crate::templates::components::flash_banner;
use maud::{html, Markup, DOCTYPE};

pub struct AdminLoginVm {
    pub user_name: String,
    pub error: Option<String>,
    pub flash: Option<String>,
}

// Standalone page: the admin layout's sidebar assumes a signed-in user.
pub fn admin_login_page(vm: &AdminLoginVm) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { "Back Office Login" }
                link rel="stylesheet" href="/static/main.css";
            }
            body {
                (flash_banner(vm.flash.as_deref()))
                main class="container narrow" {
                    h1 { "Back Office" }
                    form action="/admin/login" method="post" class="card" {
                        div class="form-field" {
                            label for="userName" { "User Name" }
                            input type="text" id="userName" name="userName" value=(vm.user_name);
                        }
                        div class="form-field" {
                            label for="password" { "Password" }
                            input type="password" id="password" name="password";
                        }
                        @if let Some(message) = &vm.error {
                            p class="field-error" { (message) }
                        }
                        button type="submit" { "Sign In" }
                    }
                }
            }
        }
    }
}

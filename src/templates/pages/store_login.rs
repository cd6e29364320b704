use crate::templates::store_layout;
use maud::{html, Markup};
use std::collections::BTreeMap;

pub struct LoginVm {
    pub user_name: String,
    pub error: Option<String>,
    pub flash: Option<String>,
}

pub fn login_page(vm: &LoginVm) -> Markup {
    store_layout(
        "Login",
        false,
        vm.flash.as_deref(),
        html! {
            main class="container narrow" {
                h1 { "Login" }
                form action="/login" method="post" class="card" {
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
                p { "No account yet? " a href="/register" { "Create one" } }
            }
        },
    )
}

pub struct RegisterVm {
    pub values: BTreeMap<String, String>,
    pub errors: BTreeMap<String, String>,
    pub flash: Option<String>,
}

impl RegisterVm {
    fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }
}

pub fn register_page(vm: &RegisterVm) -> Markup {
    let field = |name: &str, label: &str, kind: &str| {
        html! {
            div class="form-field" {
                label for=(name) { (label) }
                input type=(kind) id=(name) name=(name)
                    value=[(kind != "password").then(|| vm.value(name).to_string())];
                @if let Some(message) = vm.errors.get(name) {
                    span class="field-error" { (message) }
                }
            }
        }
    };

    store_layout(
        "Create Account",
        false,
        vm.flash.as_deref(),
        html! {
            main class="container narrow" {
                h1 { "Create Account" }
                form action="/register" method="post" class="card" {
                    (field("fullName", "Full Name", "text"))
                    (field("userName", "User Name", "text"))
                    (field("phoneNumber", "Phone Number", "text"))
                    (field("email", "Email", "text"))
                    (field("password", "Password", "password"))
                    button type="submit" { "Create Account" }
                }
            }
        },
    )
}

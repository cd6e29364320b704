use crate::admin::resources::ResourceSpec;
use crate::templates::admin_layout;
use crate::templates::components::pager;
use maud::{html, Markup};
use serde_json::Value;

pub struct ListVm {
    pub spec: &'static ResourceSpec,
    pub rows: Vec<Value>,
    pub current_page: u32,
    pub total_pages: u32,
    pub keyword: String,
    pub flash: Option<String>,
}

fn cell_text(row: &Value, name: &str) -> String {
    match row.get(name) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => if *b { "Yes" } else { "No" }.to_string(),
        _ => String::new(),
    }
}

pub fn admin_list_page(vm: &ListVm) -> Markup {
    let spec = vm.spec;
    let base = format!("/admin/{}", spec.key);

    admin_layout(
        spec.name,
        spec.key,
        vm.flash.as_deref(),
        html! {
            main {
                div class="flex items-center justify-between" {
                    h1 { (spec.name) " Management" }
                    div class="inline" {
                        a href=(format!("{base}/export")) class="button secondary" { "Export" }
                        a href=(format!("{base}/new")) class="button" { "New " (spec.name) }
                    }
                }

                form action=(base) method="get" class="search" {
                    input type="text" name="q" value=(vm.keyword) placeholder="Search...";
                    button type="submit" { "Search" }
                }

                div class="card" {
                    table {
                        thead {
                            tr {
                                @for field in spec.fields {
                                    @if field.in_table {
                                        th { (field.label) }
                                    }
                                }
                                th { "Actions" }
                            }
                        }
                        tbody {
                            @if vm.rows.is_empty() {
                                tr { td colspan="8" class="muted" { "Nothing to show." } }
                            }
                            @for row in &vm.rows {
                                @let id = cell_text(row, "id");
                                tr {
                                    @for field in spec.fields {
                                        @if field.in_table {
                                            td { (cell_text(row, field.name)) }
                                        }
                                    }
                                    td {
                                        a href=(format!("{base}/{id}/edit")) { "Edit" }
                                        " | "
                                        a href=(format!("{base}/{id}/delete")) class="danger" { "Delete" }
                                    }
                                }
                            }
                        }
                    }
                }

                (pager(&base, vm.current_page, vm.total_pages, &vm.keyword))
            }
        },
    )
}

use crate::api::models::Product;
use crate::templates::components::pager;
use crate::templates::store_layout;
use maud::{html, Markup};

pub struct HomeVm {
    pub products: Vec<Product>,
    pub current_page: u32,
    pub total_pages: u32,
    pub keyword: String,
    pub logged_in: bool,
    pub flash: Option<String>,
}

pub fn home_page(vm: &HomeVm) -> Markup {
    store_layout(
        "Shop",
        vm.logged_in,
        vm.flash.as_deref(),
        html! {
            main class="container" {
                form action="/" method="get" class="search" {
                    input type="text" name="q" value=(vm.keyword) placeholder="Search products...";
                    button type="submit" { "Search" }
                }

                @if vm.products.is_empty() {
                    p { "No products found." }
                } @else {
                    div class="product-grid" {
                        @for product in &vm.products {
                            div class="card product-card" {
                                a href=(format!("/products/{}", product.id)) {
                                    @if let Some(image) = &product.image {
                                        img src=(image) alt=(product.name);
                                    }
                                    h4 { (product.name) }
                                }
                                p class="price" { (product.price) " ₫" }
                                @if product.quantity > 0 {
                                    form action="/cart/add" method="post" {
                                        input type="hidden" name="productId" value=(product.id);
                                        input type="hidden" name="quantity" value="1";
                                        button type="submit" { "Add to cart" }
                                    }
                                } @else {
                                    p class="muted" { "Out of stock" }
                                }
                            }
                        }
                    }
                }

                (pager("/", vm.current_page, vm.total_pages, &vm.keyword))
            }
        },
    )
}

use crate::api::models::Product;
use crate::templates::store_layout;
use maud::{html, Markup};

pub struct ProductVm {
    pub product: Product,
    pub logged_in: bool,
    pub flash: Option<String>,
}

pub fn product_page(vm: &ProductVm) -> Markup {
    let p = &vm.product;
    store_layout(
        &p.name,
        vm.logged_in,
        vm.flash.as_deref(),
        html! {
            main class="container" {
                div class="product-detail" {
                    @if let Some(image) = &p.image {
                        img src=(image) alt=(p.name);
                    }
                    div {
                        h1 { (p.name) }
                        p class="price" { (p.price) " ₫" }
                        @if let Some(brand) = &p.brand_name { p { "Brand: " (brand) } }
                        @if let Some(color) = &p.color_name { p { "Color: " (color) } }
                        @if let Some(size) = &p.size_name { p { "Size: " (size) } }
                        @if let Some(description) = &p.description {
                            p { (description) }
                        }

                        @if p.quantity > 0 {
                            p class="muted" { (p.quantity) " in stock" }
                            form action="/cart/add" method="post" {
                                input type="hidden" name="productId" value=(p.id);
                                label for="quantity" { "Quantity" }
                                input type="number" id="quantity" name="quantity"
                                    value="1" min="1" max=(p.quantity);
                                button type="submit" { "Add to cart" }
                            }
                        } @else {
                            p class="muted" { "Out of stock" }
                        }
                    }
                }
            }
        },
    )
}

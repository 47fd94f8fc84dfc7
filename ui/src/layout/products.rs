use dioxus::prelude::*;

use crate::core::lang::Lang;
use crate::tr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    pub key: &'static str,
    pub href: &'static str,
}

pub const PRODUCTS: [Product; 5] = [
    Product { key: "6dof", href: "/products-6dof.html" },
    Product { key: "3dof", href: "/products-3dof.html" },
    Product { key: "mk14", href: "/products-mk14.html" },
    Product { key: "belt", href: "/products-belt-tensioner.html" },
    Product { key: "acc", href: "/products-accessories.html" },
];

pub fn product_label(lang: Lang, key: &str) -> String {
    match key {
        "6dof" => tr!(lang, "product-6dof"),
        "3dof" => tr!(lang, "product-3dof"),
        "mk14" => tr!(lang, "product-mk14"),
        "belt" => tr!(lang, "product-belt"),
        "acc" => tr!(lang, "product-acc"),
        other => other.to_string(),
    }
}

/// Cross-links to every product except the one the page is about.
#[component]
pub fn OtherProducts(active: Option<String>, lang: Lang) -> Element {
    let heading_en = tr!(Lang::En, "other-products-heading");
    let heading_pl = tr!(Lang::Pl, "other-products-heading");
    let heading = tr!(lang, "other-products-heading");
    let items: Vec<(Product, String)> = PRODUCTS
        .iter()
        .filter(|p| active.as_deref() != Some(p.key))
        .map(|p| (*p, product_label(lang, p.key)))
        .collect();

    rsx! {
        section { class: "container mx-auto px-4 pb-16",
            div { class: "bg-gray-800/60 border border-white/5 rounded-2xl p-8",
                h2 { class: "text-2xl font-bold mb-5", "data-en": "{heading_en}", "data-pl": "{heading_pl}", "{heading}" }
                div { class: "flex flex-wrap gap-3",
                    for (product, label) in items.iter() {
                        a {
                            key: "{product.key}",
                            class: "bg-white/10 hover:bg-white/15 border border-white/10 px-5 py-3 rounded font-semibold",
                            href: product.href,
                            "data-product": product.key,
                            "{label}"
                        }
                    }
                }
            }
        }
    }
}

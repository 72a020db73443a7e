//! HTTP handlers
//!
//! JSON endpoints over the product and category services.

pub mod categories;
pub mod products;
pub mod reports;

pub use categories::{
    category_count, category_exists, create_category, delete_category, get_category,
    get_category_by_name, hard_delete_category, list_active_categories, list_categories,
    search_categories, update_category,
};
pub use products::{
    add_stock, create_product, delete_product, get_product, get_product_by_sku,
    hard_delete_product, list_products, remove_stock, search_products, set_quantity,
    update_product,
};
pub use reports::{inventory_value, low_stock, out_of_stock, products_by_category};

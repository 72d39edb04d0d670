//! Cleaning pipeline and aggregation core shared by the `clean-products`
//! CLI and the `product-lens` dashboard.

pub mod data;

// lib.rs - Root module for the product_quicksearch library
//
// Product quick-search: a page-side search state machine plus the
// products API route that relays searches to a hosted REST database.

pub mod web_app;

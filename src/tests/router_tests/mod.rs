mod catalog_tests;
mod favorites_tests;

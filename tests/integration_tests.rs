// Main integration test file that includes all test modules

mod integration {
    pub mod config_tests;
    pub mod pattern_tests;
    pub mod project_search_tests;
    pub mod root_search_tests;
}

mod helpers {
    pub mod test_harness;
}

mod fakes;
mod search_flow_tests;

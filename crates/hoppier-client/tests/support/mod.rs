#[allow(dead_code)]
pub mod fixture_testkit;

pub mod fake_fetch;

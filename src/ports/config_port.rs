//! Configuration access port trait.
//!
//! Values are looked up by INI-style `[section] key`; `get_int` falls back
//! to `default` when the key is absent or does not parse.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
}

//! Configuration access port trait.
//!
//! Values are addressed by INI-style `[section] key`. Callers parse the
//! string themselves after `domain::config_validation` has checked it.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
}

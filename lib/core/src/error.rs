//! Error handling foundation for studio-bot.
//!
//! Only the `Result` alias lives here. Each crate keeps its own error enums
//! in its own `error` module and layers them with rootcause's `.context()`
//! as a failure travels from storage up to the message handler.

use rootcause::Report;

/// A Result type alias using rootcause's Report for error handling.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_alias_carries_values() {
        let ok: Result<&str> = Ok("reserved");
        assert_eq!(ok.expect("should be ok"), "reserved");
    }
}

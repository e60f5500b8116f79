//! Translation seam.
//!
//! The core localizes every rendered string through this trait; the catalog
//! itself belongs to the host. A bare closure works as a translator, so
//! tests and simple hosts can pass `|key: &str| key.to_string()`.

/// Resolves a translation key to display text.
pub trait Translator {
    fn t(&self, key: &str) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str) -> String,
{
    fn t(&self, key: &str) -> String {
        self(key)
    }
}

#[cfg(test)]
pub(crate) fn key_echo(key: &str) -> String {
    key.to_string()
}

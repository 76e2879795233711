/// Converts errors from their error type (of the submodule) to that of
/// a `roadmend::Error` variant.
///
/// ```rust,ignore
/// use roadmend::load::LoadError;
/// roadmend::impl_err!(LoadError, Load);
/// ```
pub mod err_macro {
    #[macro_export]
    macro_rules! impl_err {
        ($from:ty, $variant:ident) => {
            impl From<$from> for $crate::Error {
                fn from(value: $from) -> Self {
                    $crate::Error::$variant(value)
                }
            }
        };
    }

    pub use impl_err;
}

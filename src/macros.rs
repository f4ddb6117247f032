/// Declares a message catalog type with one accessor per identifier.
///
/// The generated type holds its [`IdentifierCatalog`](crate::core::IdentifierCatalog)
/// in a lazily initialized static and resolves text through the process-wide
/// [`registry::global`](crate::core::registry::global). Declaring the same
/// identifier twice is rejected by the compiler (two accessors with one name).
///
/// ```no_run
/// msgbind::declare_messages! {
///     /// Diagnostics raised by the pipeline builders.
///     pub struct PipelineMessages("com.dynamo.bob.pipeline.messages") {
///         GuiBuilder_MISSING_TEXTURE,
///         GuiBuilder_MISSING_FONT,
///     }
/// }
///
/// let text = PipelineMessages::GuiBuilder_MISSING_TEXTURE();
/// let same = PipelineMessages::get("GuiBuilder_MISSING_TEXTURE");
/// assert_eq!(text, same);
/// let shown = PipelineMessages::format("GuiBuilder_MISSING_FONT", &["title.font"]);
/// ```
///
/// # Panics
///
/// The accessors treat registry errors as fatal: an invalid base name, a
/// missing bundle or an undeclared identifier panics with the error message.
/// Use `try_get` (or `try_catalog`) to handle them instead. Missing translations never panic; they
/// resolve to sentinel text.
#[macro_export]
macro_rules! declare_messages {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident($base:literal) {
            $( $(#[$id_meta:meta])* $id:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        $vis struct $name;

        #[allow(non_snake_case, dead_code)]
        impl $name {
            pub const BUNDLE_NAME: &'static str = $base;

            pub const IDENTIFIERS: &'static [&'static str] = &[$(stringify!($id)),+];

            /// The declared catalog, or the declaration error for an invalid
            /// base name. A failed declaration is not cached.
            pub fn try_catalog() -> $crate::Result<&'static $crate::core::IdentifierCatalog> {
                static CATALOG: ::std::sync::OnceLock<$crate::core::IdentifierCatalog> =
                    ::std::sync::OnceLock::new();
                if let Some(catalog) = CATALOG.get() {
                    return Ok(catalog);
                }
                let catalog = $crate::core::IdentifierCatalog::declare(
                    Self::BUNDLE_NAME,
                    Self::IDENTIFIERS.iter().copied(),
                )?;
                Ok(CATALOG.get_or_init(|| catalog))
            }

            pub fn catalog() -> &'static $crate::core::IdentifierCatalog {
                Self::try_catalog().unwrap_or_else(|err| panic!("{}", err))
            }

            pub fn try_get(identifier: &str) -> $crate::Result<::std::string::String> {
                let catalog = Self::try_catalog()?;
                $crate::core::registry::global().message(catalog, identifier)
            }

            pub fn get(identifier: &str) -> ::std::string::String {
                Self::try_get(identifier).unwrap_or_else(|err| panic!("{}", err))
            }

            /// Bound text with `{0}`, `{1}`, ... replaced by `args`.
            pub fn format<S: ::std::fmt::Display>(
                identifier: &str,
                args: &[S],
            ) -> ::std::string::String {
                $crate::core::format_message(&Self::get(identifier), args)
            }

            $(
                $(#[$id_meta])*
                pub fn $id() -> ::std::string::String {
                    Self::get(stringify!($id))
                }
            )+
        }
    };
}

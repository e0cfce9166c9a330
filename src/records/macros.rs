//! Macros for reducing boilerplate when defining record column sets

/// Define a closed column enum and implement [`Column`](crate::core::record::Column) for it
///
/// Each variant is paired with the stable string key used in URLs, config
/// files and table headers.
///
/// # Example
///
/// ```rust
/// use medadmin::core::record::Column;
///
/// medadmin::define_columns! {
///     /// Columns of the ward list
///     pub enum WardColumn for "ward" {
///         Name => "name",
///         Beds => "beds",
///     }
/// }
///
/// assert_eq!(WardColumn::Beds.key(), "beds");
/// assert_eq!(WardColumn::from_key("name"), Some(WardColumn::Name));
/// assert!(WardColumn::parse("floor").is_err());
/// ```
#[macro_export]
macro_rules! define_columns {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident for $record:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $key:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),*
        }

        impl $crate::core::record::Column for $name {
            fn all() -> &'static [Self] {
                &[ $( $name::$variant ),* ]
            }

            fn key(&self) -> &'static str {
                match self {
                    $( $name::$variant => $key ),*
                }
            }

            fn record_name() -> &'static str {
                $record
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::record::Column::key(self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::core::error::ViewError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                <$name as $crate::core::record::Column>::parse(s)
            }
        }
    };
}

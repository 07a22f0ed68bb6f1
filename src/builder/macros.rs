//! Macros for declaring state enums.

/// Generate a state enum together with its `State` trait implementation.
///
/// Attributes placed on the enum are forwarded, so extra derives such as
/// `Copy` or `Hash` can be added next to the generated ones.
///
/// # Example
///
/// ```
/// use stoplight::state_enum;
/// use stoplight::core::State;
///
/// state_enum! {
///     #[derive(Copy)]
///     pub enum Crossing {
///         Walk,
///         Wait,
///         Closed,
///     }
///     final: [Closed]
///     error: [Closed]
/// }
///
/// assert_eq!(Crossing::Walk.name(), "Walk");
/// assert!(Crossing::Closed.is_final());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
    ) => {
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }

            fn is_error(&self) -> bool {
                match self {
                    $($(Self::$error => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }
        }
    };
}

//! Macros for declaring encounter action ids.

/// Generate an action enum with explicit ids and its `ActionKind` impl.
///
/// The variant name becomes the label printed in diagnostics.
///
/// # Example
///
/// ```
/// use phasechain::action_enum;
/// use phasechain::core::{ActionId, ActionKind};
///
/// action_enum! {
///     pub enum BossAction {
///         Cleave = 0x3A1,
///         Meteor = 0x3A4,
///     }
/// }
///
/// assert_eq!(BossAction::Meteor.action_id(), ActionId(0x3A4));
/// assert_eq!(BossAction::Cleave.label(), "Cleave");
/// ```
#[macro_export]
macro_rules! action_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $id:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::ActionKind for $name {
            fn action_id(&self) -> $crate::core::ActionId {
                match self {
                    $(Self::$variant => $crate::core::ActionId($id)),*
                }
            }

            fn label(&self) -> ::std::string::String {
                match self {
                    $(Self::$variant => ::std::string::String::from(stringify!($variant))),*
                }
            }
        }
    };
}

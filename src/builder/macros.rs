//! Macros for ergonomic identity declarations.

/// Declare a fieldless enum usable as a state identity.
///
/// Derives `Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize`
/// and implements [`StateId`](crate::StateId) and `Display` with the variant
/// name as label. The serde derives resolve through this crate, so callers
/// do not need their own `serde` dependency.
///
/// # Example
///
/// ```
/// use tickfsm::{state_id, StateId};
///
/// state_id! {
///     pub enum Locomotion {
///         Idle,
///         Walking,
///         Running,
///     }
/// }
///
/// assert_eq!(Locomotion::Walking.label(), "Walking");
/// assert_eq!(Locomotion::Running.to_string(), "Running");
/// ```
#[macro_export]
macro_rules! state_id {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            $crate::__serde::Serialize,
            $crate::__serde::Deserialize,
        )]
        #[serde(crate = "tickfsm::__serde")]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::StateId for $name {
            fn label(&self) -> ::std::borrow::Cow<'static, str> {
                match self {
                    $(Self::$variant => ::std::borrow::Cow::Borrowed(stringify!($variant))),*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.pad(&$crate::StateId::label(self))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::StateId;

    state_id! {
        enum TestId {
            Initial,
            Processing,
            Complete,
        }
    }

    #[test]
    fn state_id_macro_generates_labels() {
        assert_eq!(TestId::Initial.label(), "Initial");
        assert_eq!(TestId::Processing.label(), "Processing");
        assert_eq!(TestId::Complete.to_string(), "Complete");
    }

    #[test]
    fn state_id_supports_visibility_and_attributes() {
        state_id! {
            /// Door positions.
            pub enum Door {
                Open,
                #[allow(dead_code)]
                Closed,
            }
        }

        assert_eq!(Door::Open.label(), "Open");
    }

    #[test]
    fn state_id_serializes_by_variant_name() {
        let json = serde_json::to_string(&TestId::Processing).unwrap();
        assert_eq!(json, "\"Processing\"");

        let back: TestId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TestId::Processing);
    }
}

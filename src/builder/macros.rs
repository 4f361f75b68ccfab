//! Macros for declaring capability operations.

/// Generate a fieldless operation enum with its `Operation` impl.
///
/// # Example
///
/// ```
/// use typemachine::core::Operation;
/// use typemachine::operation_enum;
///
/// operation_enum! {
///     pub enum DoorOp {
///         Open,
///         Close,
///     }
/// }
///
/// assert_eq!(DoorOp::Open.name(), "Open");
/// ```
#[macro_export]
macro_rules! operation_enum {
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
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Operation for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::Operation;

    operation_enum! {
        enum TestOp {
            Start,
            Pause,
            Resume,
        }
    }

    #[test]
    fn operation_enum_macro_generates_trait() {
        assert_eq!(TestOp::Start.name(), "Start");
        assert_eq!(TestOp::Pause.name(), "Pause");
        assert_eq!(TestOp::Resume.name(), "Resume");
    }

    #[test]
    fn operation_enum_supports_visibility() {
        operation_enum! {
            pub enum PublicOp {
                Ping,
            }
        }

        assert_eq!(PublicOp::Ping.name(), "Ping");
    }

    #[test]
    fn generated_operations_are_hashable_keys() {
        let mut seen = std::collections::HashSet::new();
        seen.insert(TestOp::Start);
        seen.insert(TestOp::Start);

        assert_eq!(seen.len(), 1);
        assert!(seen.contains(&TestOp::Start));
        assert!(!seen.contains(&TestOp::Pause));
    }
}

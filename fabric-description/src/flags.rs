//! Bit-set filter newtypes shared by query and health descriptions.

/// Declares a `u32` filter newtype with named bits, an `ALL` value, and a
/// validity check against the mask of defined bits.
macro_rules! filter_flags {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$bit_meta:meta])* const $bit:ident = $value:expr; )*
        }
        mask = $mask:expr;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Default,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// No filter: the server applies its default.
            pub const DEFAULT: Self = Self(0);
            $( $(#[$bit_meta])* pub const $bit: Self = Self($value); )*
            /// Every state.
            pub const ALL: Self = Self(0xFFFF);

            /// Creates a filter from raw bits.
            #[must_use]
            pub const fn from_bits(bits: u32) -> Self {
                Self(bits)
            }

            /// Returns the raw bits.
            #[must_use]
            pub const fn bits(self) -> u32 {
                self.0
            }

            #[must_use]
            pub const fn is_default(self) -> bool {
                self.0 == 0
            }

            /// Returns true if every bit in `other` is set in `self`.
            #[must_use]
            pub const fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            /// `ALL`, or any combination of the defined bits.
            #[must_use]
            pub const fn is_valid(self) -> bool {
                self.0 == Self::ALL.0 || self.0 & !($mask) == 0
            }

            pub(crate) fn require_valid(self, field: &str) -> fabric_types::Result<()> {
                if self.is_valid() {
                    Ok(())
                } else {
                    Err(fabric_types::Error::invalid_argument(
                        field,
                        format!("undefined filter bits {:#x}", self.0),
                    ))
                }
            }
        }

        impl std::ops::BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl std::ops::BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }
    };
}

pub(crate) use filter_flags;

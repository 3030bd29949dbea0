//! Bit flag sets
//!
//! Small newtype flag sets used for interactor arbitration. Each set wraps an
//! integer and supports explicit OR-in / AND-NOT-out updates, so per-object
//! state never needs a shared counter.

/// Define a flag set newtype with named single-bit constants.
///
/// The generated type is `Copy`, serde-transparent and offers the usual set
/// operations (`insert`, `remove`, `contains`, `intersects`) plus the bit
/// operators.
macro_rules! flag_set {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident: $repr:ty {
            $(
                $(#[$flag_meta:meta])*
                const $flag:ident = $value:expr;
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        $vis struct $name($repr);

        impl $name {
            $(
                $(#[$flag_meta])*
                pub const $flag: Self = Self($value);
            )*

            /// Create a set from raw bits
            pub const fn from_bits(bits: $repr) -> Self {
                Self(bits)
            }

            /// Raw bits of this set
            pub const fn bits(self) -> $repr {
                self.0
            }

            /// True when no bit is set
            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }

            /// True when every bit of `other` is set in `self`
            pub const fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            /// True when `self` and `other` share at least one bit
            pub const fn intersects(self, other: Self) -> bool {
                self.0 & other.0 != 0
            }

            /// OR the bits of `other` in
            pub fn insert(&mut self, other: Self) {
                self.0 |= other.0;
            }

            /// AND-NOT the bits of `other` out
            pub fn remove(&mut self, other: Self) {
                self.0 &= !other.0;
            }

            /// Number of set bits
            pub const fn count(self) -> u32 {
                self.0.count_ones()
            }

            /// True when exactly one bit is set
            pub const fn is_single(self) -> bool {
                self.0.count_ones() == 1
            }

            /// Iterate over the single-bit members, lowest bit first
            pub fn iter(self) -> impl Iterator<Item = Self> {
                let bits = self.0;
                (0..<$repr>::BITS)
                    .map(|shift| (1 as $repr) << shift)
                    .filter(move |bit| bits & bit != 0)
                    .map(Self)
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

        impl std::ops::BitAnd for $name {
            type Output = Self;
            fn bitand(self, rhs: Self) -> Self {
                Self(self.0 & rhs.0)
            }
        }

        impl std::ops::Not for $name {
            type Output = Self;
            fn not(self) -> Self {
                Self(!self.0)
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({:#b})", stringify!($name), self.0)
            }
        }
    };
}

pub(crate) use flag_set;

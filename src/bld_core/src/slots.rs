//! Names of the piece slots of the cube, in the order the state vectors use.
//!
//! Any slot can serve as a buffer, so these are also the accepted buffer
//! labels.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::BldError;

macro_rules! slot_enum {
    ($(#[$meta:meta])* $name:ident, $count:expr; $($variant:ident),* $(,)?) => {
        $(#[$meta])*
        #[allow(clippy::upper_case_acronyms)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $($variant),*
        }

        impl $name {
            pub const ALL: [Self; $count] = {
                use $name::*;
                let v = [$($variant),*];

                let mut i = 0;
                while i < v.len() {
                    assert!(i == v[i] as usize);
                    i += 1;
                }

                v
            };

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),*
                }
            }

            pub fn index(self) -> usize {
                self as usize
            }
        }

        impl FromStr for $name {
            type Err = BldError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|slot| slot.label() == s)
                    .ok_or_else(|| BldError::InvalidBufferLabel(s.to_owned()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

slot_enum!(
    /// Edge slots: UF UL UB UR FL BL BR FR DF DL DB DR
    EdgeSlot, 12;
    UF, UL, UB, UR, FL, BL, BR, FR, DF, DL, DB, DR
);

slot_enum!(
    /// Corner slots: UBL UBR UFR UFL DFL DFR DBR DBL
    CornerSlot, 8;
    UBL, UBR, UFR, UFL, DFL, DFR, DBR, DBL
);

impl Default for EdgeSlot {
    fn default() -> Self {
        EdgeSlot::UF
    }
}

impl Default for CornerSlot {
    fn default() -> Self {
        CornerSlot::UFR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for slot in EdgeSlot::ALL {
            assert_eq!(slot.label().parse::<EdgeSlot>().unwrap(), slot);
        }
        for slot in CornerSlot::ALL {
            assert_eq!(slot.label().parse::<CornerSlot>().unwrap(), slot);
        }
    }

    #[test]
    fn indices_follow_state_order() {
        assert_eq!(EdgeSlot::UF.index(), 0);
        assert_eq!(EdgeSlot::FR.index(), 7);
        assert_eq!(EdgeSlot::DR.index(), 11);
        assert_eq!(CornerSlot::UBL.index(), 0);
        assert_eq!(CornerSlot::UFR.index(), 2);
        assert_eq!(CornerSlot::DBL.index(), 7);
    }

    #[test]
    fn unknown_labels_are_rejected() {
        assert_eq!(
            "UFR".parse::<EdgeSlot>(),
            Err(BldError::InvalidBufferLabel("UFR".to_owned()))
        );
        assert_eq!(
            "uf".parse::<EdgeSlot>(),
            Err(BldError::InvalidBufferLabel("uf".to_owned()))
        );
        assert_eq!(
            "UF".parse::<CornerSlot>(),
            Err(BldError::InvalidBufferLabel("UF".to_owned()))
        );
        assert!("".parse::<CornerSlot>().is_err());
    }
}

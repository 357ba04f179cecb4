//! Option sets for custom embroidery requests.
//!
//! Each option is a closed enumeration with a kebab-case wire value, the
//! same string the request form submits.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a submitted option value is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {value}")]
pub struct OptionError {
    pub field: &'static str,
    pub value: String,
}

macro_rules! option_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => ($wire:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every option in display order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire value submitted with the form.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }

            /// Human-readable label.
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = OptionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|option| option.as_str() == s.trim())
                    .ok_or_else(|| OptionError {
                        field: $field,
                        value: s.to_owned(),
                    })
            }
        }
    };
}

option_enum! {
    /// Kind of embroidery work requested.
    EmbroideryType, "embroidery type" {
        Logo => ("logo", "Logo Embroidery"),
        Text => ("text", "Text / Monogram"),
        Patch => ("patch", "Custom Patch"),
        Puff => ("3d-puff", "3D Puff"),
        Custom => ("custom", "Custom Design"),
    }
}

option_enum! {
    /// Where on the garment the design goes.
    Placement, "placement" {
        LeftChest => ("left-chest", "Left Chest"),
        FullBack => ("full-back", "Full Back"),
        Sleeve => ("sleeve", "Sleeve"),
        CapFront => ("cap-front", "Cap Front"),
        Other => ("other", "Other"),
    }
}

option_enum! {
    /// Budget bracket for the whole order.
    Budget, "budget" {
        Under100 => ("under-100", "Under $100"),
        Up500 => ("100-500", "$100 - $500"),
        Up1000 => ("500-1000", "$500 - $1,000"),
        Over1000 => ("over-1000", "Over $1,000"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_values() {
        assert_eq!("3d-puff".parse::<EmbroideryType>().unwrap(), EmbroideryType::Puff);
        assert_eq!("left-chest".parse::<Placement>().unwrap(), Placement::LeftChest);
        assert_eq!("500-1000".parse::<Budget>().unwrap(), Budget::Up1000);
    }

    #[test]
    fn test_unknown_value_names_the_field() {
        let err = "pocket".parse::<Placement>().unwrap_err();
        assert_eq!(err.to_string(), "invalid placement: pocket");
    }

    #[test]
    fn test_serde_uses_wire_value() {
        assert_eq!(serde_json::to_string(&Budget::Over1000).unwrap(), "\"over-1000\"");
    }
}

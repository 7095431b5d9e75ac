//! String-valued enumerations of the card schema.
//!
//! Values are matched case-insensitively when parsing and written back in
//! the schema's camelCase spelling.

use std::fmt;

/// Common behaviour of schema enumerations.
pub trait CardEnum: Copy + Default + Sized + 'static {
    /// Schema name of the enumeration, used in warnings.
    const NAME: &'static str;
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(value))
    }
}

macro_rules! card_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($schema:literal) default $default:ident {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl CardEnum for $name {
            const NAME: &'static str = $schema;
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = <String as serde::Deserialize>::deserialize(deserializer)?;
                <$name as CardEnum>::parse(&value).ok_or_else(|| {
                    serde::de::Error::custom(format!("unknown {} value `{}`", $schema, value))
                })
            }
        }
    };
}

card_enum! {
    /// Vertical gap placed before an element.
    Spacing ("spacing") default Default {
        None => "none",
        Small => "small",
        Default => "default",
        Medium => "medium",
        Large => "large",
        ExtraLarge => "extraLarge",
        Padding => "padding",
    }
}

card_enum! {
    TextSize ("size") default Default {
        Small => "small",
        Default => "default",
        Medium => "medium",
        Large => "large",
        ExtraLarge => "extraLarge",
    }
}

card_enum! {
    TextWeight ("weight") default Default {
        Lighter => "lighter",
        Default => "default",
        Bolder => "bolder",
    }
}

card_enum! {
    TextColor ("color") default Default {
        Default => "default",
        Dark => "dark",
        Light => "light",
        Accent => "accent",
        Good => "good",
        Warning => "warning",
        Attention => "attention",
    }
}

card_enum! {
    HorizontalAlignment ("horizontalAlignment") default Left {
        Left => "left",
        Center => "center",
        Right => "right",
    }
}

card_enum! {
    VerticalContentAlignment ("verticalContentAlignment") default Top {
        Top => "top",
        Center => "center",
        Bottom => "bottom",
    }
}

card_enum! {
    ImageSize ("imageSize") default Auto {
        Auto => "auto",
        Stretch => "stretch",
        Small => "small",
        Medium => "medium",
        Large => "large",
    }
}

card_enum! {
    ImageStyle ("imageStyle") default Default {
        Default => "default",
        Person => "person",
    }
}

card_enum! {
    /// Style of a container; cascades to its children during rendering.
    ContainerStyle ("containerStyle") default Default {
        Default => "default",
        Emphasis => "emphasis",
    }
}

card_enum! {
    ChoiceSetStyle ("choiceSetStyle") default Compact {
        Compact => "compact",
        Expanded => "expanded",
    }
}

card_enum! {
    TextInputStyle ("textInputStyle") default Text {
        Text => "text",
        Tel => "tel",
        Url => "url",
        Email => "email",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(Spacing::parse("ExtraLarge"), Some(Spacing::ExtraLarge));
        assert_eq!(TextWeight::parse("BOLDER"), Some(TextWeight::Bolder));
        assert_eq!(ImageStyle::parse(" person "), Some(ImageStyle::Person));
        assert_eq!(TextColor::parse("purple"), None);
    }

    #[test]
    fn serde_uses_schema_spelling() {
        let json = serde_json::to_string(&Spacing::ExtraLarge).unwrap();
        assert_eq!(json, "\"extraLarge\"");
        let size: ImageSize = serde_json::from_str("\"Medium\"").unwrap();
        assert_eq!(size, ImageSize::Medium);
        let err = serde_json::from_str::<ContainerStyle>("\"loud\"").unwrap_err();
        assert!(err.to_string().contains("unknown containerStyle value"));
    }

    #[test]
    fn defaults_match_schema() {
        assert_eq!(HorizontalAlignment::default(), HorizontalAlignment::Left);
        assert_eq!(ChoiceSetStyle::default(), ChoiceSetStyle::Compact);
        assert_eq!(ImageSize::default(), ImageSize::Auto);
    }
}

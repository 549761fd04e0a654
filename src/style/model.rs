//! Style values with a defined default for every field.
//!
//! A [`Style`] is always complete: new widgets start from [`Style::default()`]
//! and only ever change through direct assignment or [`Style::apply`], which
//! overwrites exactly the fields present in a [`StylePatch`].

use std::fmt;
use std::str::FromStr;

/// A keyword that is not a valid spelling for the requested property.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown {property} keyword `{value}`")]
pub struct UnknownKeyword {
    pub property: &'static str,
    pub value: String,
}

impl UnknownKeyword {
    fn new(property: &'static str, value: &str) -> Self {
        Self {
            property,
            value: value.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Keyword enums
// ---------------------------------------------------------------------------

/// Declares a keyword enum together with its markup spellings.
///
/// The same table drives both `FromStr` and `Display`, so every variant
/// round-trips exactly.
macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $property:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The markup spelling of this keyword.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownKeyword;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($text => Ok($name::$variant),)+
                    other => Err(UnknownKeyword::new($property, other)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

keyword_enum! {
    /// Main-axis distribution of a container's children.
    Justify, "justify" {
        #[default]
        FlexStart => "flex-start",
        Center => "center",
        FlexEnd => "flex-end",
        SpaceBetween => "space-between",
        SpaceAround => "space-around",
        SpaceEvenly => "space-evenly",
    }
}

keyword_enum! {
    /// Cross-axis alignment of a container's children.
    Align, "align" {
        #[default]
        Stretch => "stretch",
        FlexStart => "flex-start",
        Center => "center",
        FlexEnd => "flex-end",
        Baseline => "baseline",
    }
}

keyword_enum! {
    /// Per-widget override of the parent's cross-axis alignment.
    AlignSelf, "align-self" {
        #[default]
        Auto => "auto",
        FlexStart => "flex-start",
        Center => "center",
        FlexEnd => "flex-end",
        Stretch => "stretch",
    }
}

keyword_enum! {
    /// Relative text size; the backend maps it to a concrete font.
    FontSize, "font-size" {
        Small => "small",
        #[default]
        Default => "default",
        Large => "large",
    }
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// The complete style of one widget.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub margin: f32,
    pub padding: f32,
    /// Spacing between children of a container.
    pub gap: f32,
    pub justify: Justify,
    pub align: Align,
    pub align_self: AlignSelf,
    pub disabled: bool,
    /// Free-form visual variant name, e.g. `primary` or `danger`.
    pub variant: String,
    pub font_size: FontSize,
    pub bold: bool,
    pub text_color: String,
    pub bg_color: String,
    pub stretch: bool,
    pub wrap: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            margin: 0.0,
            padding: 0.0,
            gap: 8.0,
            justify: Justify::FlexStart,
            align: Align::Stretch,
            align_self: AlignSelf::Auto,
            disabled: false,
            variant: "default".to_string(),
            font_size: FontSize::Default,
            bold: false,
            text_color: "default".to_string(),
            bg_color: "default".to_string(),
            stretch: false,
            wrap: false,
        }
    }
}

impl Style {
    /// Overwrite every field that is present in `patch`.
    ///
    /// Applying the same patch twice yields the same style as applying it once.
    pub fn apply(&mut self, patch: &StylePatch) {
        if let Some(v) = patch.margin {
            self.margin = v;
        }
        if let Some(v) = patch.padding {
            self.padding = v;
        }
        if let Some(v) = patch.gap {
            self.gap = v;
        }
        if let Some(v) = patch.justify {
            self.justify = v;
        }
        if let Some(v) = patch.align {
            self.align = v;
        }
        if let Some(v) = patch.align_self {
            self.align_self = v;
        }
        if let Some(v) = patch.disabled {
            self.disabled = v;
        }
        if let Some(v) = &patch.variant {
            self.variant.clone_from(v);
        }
        if let Some(v) = patch.font_size {
            self.font_size = v;
        }
        if let Some(v) = patch.bold {
            self.bold = v;
        }
        if let Some(v) = &patch.text_color {
            self.text_color.clone_from(v);
        }
        if let Some(v) = &patch.bg_color {
            self.bg_color.clone_from(v);
        }
        if let Some(v) = patch.stretch {
            self.stretch = v;
        }
        if let Some(v) = patch.wrap {
            self.wrap = v;
        }
    }

    /// True if the variant is anything other than `default`.
    pub fn has_variant(&self) -> bool {
        self.variant != "default"
    }
}

// ---------------------------------------------------------------------------
// StylePatch
// ---------------------------------------------------------------------------

/// A partial style: `None` fields leave the target untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StylePatch {
    pub margin: Option<f32>,
    pub padding: Option<f32>,
    pub gap: Option<f32>,
    pub justify: Option<Justify>,
    pub align: Option<Align>,
    pub align_self: Option<AlignSelf>,
    pub disabled: Option<bool>,
    pub variant: Option<String>,
    pub font_size: Option<FontSize>,
    pub bold: Option<bool>,
    pub text_color: Option<String>,
    pub bg_color: Option<String>,
    pub stretch: Option<bool>,
    pub wrap: Option<bool>,
}

impl StylePatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_margin(mut self, v: f32) -> Self {
        self.margin = Some(v);
        self
    }

    pub fn with_padding(mut self, v: f32) -> Self {
        self.padding = Some(v);
        self
    }

    pub fn with_gap(mut self, v: f32) -> Self {
        self.gap = Some(v);
        self
    }

    pub fn with_justify(mut self, v: Justify) -> Self {
        self.justify = Some(v);
        self
    }

    pub fn with_align(mut self, v: Align) -> Self {
        self.align = Some(v);
        self
    }

    pub fn with_align_self(mut self, v: AlignSelf) -> Self {
        self.align_self = Some(v);
        self
    }

    pub fn with_disabled(mut self, v: bool) -> Self {
        self.disabled = Some(v);
        self
    }

    pub fn with_variant(mut self, v: impl Into<String>) -> Self {
        self.variant = Some(v.into());
        self
    }

    pub fn with_font_size(mut self, v: FontSize) -> Self {
        self.font_size = Some(v);
        self
    }

    pub fn with_bold(mut self, v: bool) -> Self {
        self.bold = Some(v);
        self
    }

    pub fn with_text_color(mut self, v: impl Into<String>) -> Self {
        self.text_color = Some(v.into());
        self
    }

    pub fn with_bg_color(mut self, v: impl Into<String>) -> Self {
        self.bg_color = Some(v.into());
        self
    }

    pub fn with_stretch(mut self, v: bool) -> Self {
        self.stretch = Some(v);
        self
    }

    pub fn with_wrap(mut self, v: bool) -> Self {
        self.wrap = Some(v);
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_documented_values() {
        let s = Style::default();
        assert_eq!(s.margin, 0.0);
        assert_eq!(s.padding, 0.0);
        assert_eq!(s.gap, 8.0);
        assert_eq!(s.justify, Justify::FlexStart);
        assert_eq!(s.align, Align::Stretch);
        assert_eq!(s.align_self, AlignSelf::Auto);
        assert_eq!(s.variant, "default");
        assert_eq!(s.font_size, FontSize::Default);
        assert_eq!(s.text_color, "default");
        assert_eq!(s.bg_color, "default");
        assert!(!s.disabled && !s.bold && !s.stretch && !s.wrap);
    }

    #[test]
    fn enum_defaults_agree_with_style_defaults() {
        let s = Style::default();
        assert_eq!(Justify::default(), s.justify);
        assert_eq!(Align::default(), s.align);
        assert_eq!(AlignSelf::default(), s.align_self);
        assert_eq!(FontSize::default(), s.font_size);
    }

    #[test]
    fn keywords_round_trip() {
        for j in Justify::ALL {
            assert_eq!(j.to_string().parse::<Justify>(), Ok(*j));
        }
        for a in Align::ALL {
            assert_eq!(a.to_string().parse::<Align>(), Ok(*a));
        }
        for a in AlignSelf::ALL {
            assert_eq!(a.to_string().parse::<AlignSelf>(), Ok(*a));
        }
        for f in FontSize::ALL {
            assert_eq!(f.to_string().parse::<FontSize>(), Ok(*f));
        }
    }

    #[test]
    fn keyword_parse_trims_whitespace() {
        assert_eq!(" space-between ".parse::<Justify>(), Ok(Justify::SpaceBetween));
    }

    #[test]
    fn unknown_keyword_names_property() {
        let err = "sideways".parse::<Align>().unwrap_err();
        assert_eq!(err.property, "align");
        assert_eq!(err.value, "sideways");
        assert_eq!(err.to_string(), "unknown align keyword `sideways`");
    }

    #[test]
    fn align_self_rejects_baseline() {
        assert!("baseline".parse::<AlignSelf>().is_err());
        assert_eq!("baseline".parse::<Align>(), Ok(Align::Baseline));
    }

    #[test]
    fn apply_overwrites_only_present_fields() {
        let mut s = Style::default();
        let patch = StylePatch::new()
            .with_padding(12.0)
            .with_justify(Justify::Center)
            .with_variant("primary");
        s.apply(&patch);

        assert_eq!(s.padding, 12.0);
        assert_eq!(s.justify, Justify::Center);
        assert_eq!(s.variant, "primary");
        assert_eq!(s.gap, 8.0);
        assert_eq!(s.margin, 0.0);
    }

    #[test]
    fn apply_is_idempotent() {
        let patch = StylePatch::new()
            .with_margin(4.0)
            .with_bold(true)
            .with_text_color("#ff0000")
            .with_align_self(AlignSelf::Center);

        let mut once = Style::default();
        once.apply(&patch);
        let mut twice = once.clone();
        twice.apply(&patch);

        assert_eq!(once, twice);
    }

    #[test]
    fn empty_patch_is_noop() {
        let mut s = Style::default();
        s.gap = 3.0;
        let before = s.clone();
        s.apply(&StylePatch::new());
        assert_eq!(s, before);
        assert!(StylePatch::new().is_empty());
        assert!(!StylePatch::new().with_wrap(true).is_empty());
    }
}

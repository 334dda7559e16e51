use tracing::warn;

use orrery_shared::StarVariant;

pub const STAR_ASSET_DIR: &str = "/icons/stars";

/// How sector star icons are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconStyle {
    /// Embedded glyphs, switched over the known variants.
    Inline,
    /// External assets addressed by variant name.
    #[default]
    FileAssets,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StarIcon {
    /// Embedded glyph plus its brush fill.
    Glyph {
        variant: StarVariant,
        fill: &'static str,
    },
    /// Path of an external asset file.
    Asset(String),
}

/// Icon for a star variant string, or `None` for classes this build does not
/// know; those cells render without an icon.
pub fn star_icon(style: IconStyle, variant_name: &str) -> Option<StarIcon> {
    let Some(variant) = StarVariant::from_name(variant_name) else {
        warn!("unknown star variant: {variant_name:?}");
        return None;
    };
    Some(match style {
        IconStyle::Inline => StarIcon::Glyph {
            variant,
            fill: glyph_fill(variant),
        },
        IconStyle::FileAssets => {
            StarIcon::Asset(format!("{STAR_ASSET_DIR}/{}.svg", variant.name()))
        }
    })
}

const fn glyph_fill(variant: StarVariant) -> &'static str {
    match variant {
        StarVariant::WhiteMainline => "white",
        StarVariant::YellowMainline => "orange",
        StarVariant::BlueMainline => "dodgerblue",
        StarVariant::WhiteDwarf => "ghostwhite",
        StarVariant::RedGiant => "firebrick",
    }
}

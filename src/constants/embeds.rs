use serenity::all::{Colour, CreateEmbed};

// ============================================================================
// Color Palette
// ============================================================================

/// Primary color - Blurple
pub const PRIMARY_COLOR: Colour = Colour::from_rgb(88, 101, 242);

/// Success color - Green
pub const SUCCESS_COLOR: Colour = Colour::from_rgb(87, 242, 135);

/// Error color - Red
pub const ERROR_COLOR: Colour = Colour::from_rgb(237, 66, 69);

/// Warning color - Yellow
pub const WARNING_COLOR: Colour = Colour::from_rgb(254, 231, 92);

/// Info/neutral color - Greyple
pub const INFO_COLOR: Colour = Colour::from_rgb(148, 155, 164);

// ============================================================================
// Text Formatting
// ============================================================================

/// Bullet point character
pub const BULLET: &str = "•";

// ============================================================================
// Embed Builders
// ============================================================================

/// Create a standard/primary embed
pub fn standard_embed() -> CreateEmbed {
    CreateEmbed::new().color(PRIMARY_COLOR)
}

/// Create a success embed
pub fn success_embed() -> CreateEmbed {
    CreateEmbed::new().color(SUCCESS_COLOR)
}

/// Create an error embed
pub fn error_embed() -> CreateEmbed {
    CreateEmbed::new().color(ERROR_COLOR)
}

/// Create a warning embed
pub fn warning_embed() -> CreateEmbed {
    CreateEmbed::new().color(WARNING_COLOR)
}

/// Create an info/neutral embed
pub fn info_embed() -> CreateEmbed {
    CreateEmbed::new().color(INFO_COLOR)
}

use ratatui::style::Color;

// Primary brand colors
pub const ACCENT: Color = Color::Rgb(129, 140, 248);       // #818CF8 - indigo
pub const ACCENT_DIM: Color = Color::Rgb(99, 102, 241);    // Dimmed indigo
pub const SUCCESS: Color = Color::Rgb(134, 188, 111);      // Soft green
pub const WARNING: Color = Color::Rgb(229, 192, 123);      // Warm amber
pub const ERROR: Color = Color::Rgb(248, 113, 113);        // Soft red

// Text colors
pub const TEXT: Color = Color::Rgb(240, 240, 240);         // #f0f0f0 - primary text
pub const TEXT_SECONDARY: Color = Color::Rgb(180, 180, 180); // Secondary text
pub const TEXT_MUTED: Color = Color::Rgb(144, 144, 144);   // #909090 - muted text

// Background colors
pub const BG_BASE: Color = Color::Rgb(24, 24, 27);         // #18181B - darkest background
pub const BG_SURFACE: Color = Color::Rgb(39, 39, 42);      // #27272A - content panels
pub const BG_SELECTED: Color = Color::Rgb(55, 55, 62);     // Selected tree row

// Border colors
pub const BORDER: Color = Color::Rgb(63, 63, 70);          // Subtle border
pub const BORDER_FOCUS: Color = ACCENT;

// Decision colors
pub const KEEP: Color = SUCCESS;
pub const DELETE: Color = ERROR;

//! Default color palette for the interactive shell.

pub mod catppuccin {
    use nu_ansi_term::Color;

    /// Catppuccin Mocha, trimmed to the accents the highlighter uses.
    pub struct Mocha;

    impl Mocha {
        // Subtle dim, for non-instruction text
        pub const SURFACE2: Color = Color::Rgb(108, 112, 134);

        // Accents
        pub const RED: Color = Color::Rgb(243, 139, 168);
        pub const GREEN: Color = Color::Rgb(166, 227, 161);
        pub const YELLOW: Color = Color::Rgb(249, 226, 175);
        pub const MAUVE: Color = Color::Rgb(203, 166, 247);
        pub const PEACH: Color = Color::Rgb(250, 179, 135);
        pub const TEAL: Color = Color::Rgb(148, 226, 213);
        pub const SKY: Color = Color::Rgb(137, 220, 235);
    }
}
